//! Form state and the generate action
//!
//! The form holds one active [`Mode`] and the values of every field. Editing
//! a field never touches the encoded value; only [`FormController::generate`]
//! does, after which every field is cleared and the redraw version bumps.

mod field;

pub use field::{ContactFields, Field, Mode};

use crate::format::{self, DEFAULT_COUNTRY_CODE};

/// Owns the form state for a single session
#[derive(Debug, Clone)]
pub struct FormController {
    mode: Mode,
    text: String,
    pdf_url: String,
    contact: ContactFields,
    encoded: String,
    redraw: u64,
    country_code: String,
}

impl FormController {
    /// Create an empty form in text mode using `country_code` for phone numbers
    pub fn new(country_code: impl Into<String>) -> Self {
        Self {
            mode: Mode::default(),
            text: String::new(),
            pdf_url: String::new(),
            contact: ContactFields::default(),
            encoded: String::new(),
            redraw: 0,
            country_code: country_code.into(),
        }
    }

    /// Currently active mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Switch the active mode. Field values are left as they are.
    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            tracing::debug!(from = %self.mode, to = %mode, "Form mode changed");
        }
        self.mode = mode;
    }

    /// Fields shown for the active mode
    pub fn visible_fields(&self) -> &'static [Field] {
        self.mode.fields()
    }

    /// Current value of a field
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Text => &self.text,
            Field::PdfUrl => &self.pdf_url,
            Field::Name => &self.contact.name,
            Field::Phone => &self.contact.phone,
            Field::Email => &self.contact.email,
            Field::Address => &self.contact.address,
        }
    }

    /// Replace a field's value. Any field may be edited in any mode.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        tracing::debug!(field = %field, len = value.len(), "Form field edited");
        let slot = match field {
            Field::Text => &mut self.text,
            Field::PdfUrl => &mut self.pdf_url,
            Field::Name => &mut self.contact.name,
            Field::Phone => &mut self.contact.phone,
            Field::Email => &mut self.contact.email,
            Field::Address => &mut self.contact.address,
        };
        *slot = value;
    }

    /// Free text entered for text mode
    pub fn text(&self) -> &str {
        &self.text
    }

    /// URL entered for pdf mode
    pub fn pdf_url(&self) -> &str {
        &self.pdf_url
    }

    /// Contact record shared by contact, email and phone modes
    pub fn contact(&self) -> &ContactFields {
        &self.contact
    }

    /// Country code prefixed to phone numbers
    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    /// The value generate would produce right now
    pub fn preview(&self) -> String {
        format::format_value(
            self.mode,
            &self.text,
            &self.pdf_url,
            &self.contact,
            &self.country_code,
        )
    }

    /// Format the active mode into the encoded value, clear all fields and
    /// bump the redraw version.
    pub fn generate(&mut self) -> &str {
        self.encoded = self.preview();
        self.redraw += 1;

        self.text.clear();
        self.pdf_url.clear();
        self.contact = ContactFields::default();

        tracing::info!(
            mode = %self.mode,
            value_len = self.encoded.len(),
            redraw = self.redraw,
            "Generated QR value"
        );

        &self.encoded
    }

    /// Value last produced by generate (empty before the first one)
    pub fn encoded_value(&self) -> &str {
        &self.encoded
    }

    /// Whether there is a non-empty encoded value to draw
    pub fn has_value(&self) -> bool {
        !self.encoded.is_empty()
    }

    /// Number of generate actions so far
    pub fn redraw_version(&self) -> u64 {
        self.redraw
    }
}

impl Default for FormController {
    fn default() -> Self {
        Self::new(DEFAULT_COUNTRY_CODE)
    }
}
