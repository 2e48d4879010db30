//! Form modes and field identifiers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Content type selected in the form
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Free text, encoded verbatim
    #[default]
    Text,
    /// Link to a PDF document, encoded verbatim
    Pdf,
    /// Contact card rendered as a vCard
    Contact,
    /// Email address rendered as a `mailto:` URI
    Email,
    /// Phone number rendered as a `tel:` URI
    Phone,
}

impl Mode {
    /// All modes in selector order
    pub const ALL: &'static [Mode] = &[
        Mode::Text,
        Mode::Pdf,
        Mode::Contact,
        Mode::Email,
        Mode::Phone,
    ];

    /// Identifier used on the command line and in JSON
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Text => "text",
            Mode::Pdf => "pdf",
            Mode::Contact => "contact",
            Mode::Email => "email",
            Mode::Phone => "phone",
        }
    }

    /// Heading shown above the mode's inputs
    pub fn heading(self) -> &'static str {
        match self {
            Mode::Text => "Text to QR",
            Mode::Pdf => "PDF URL to QR",
            Mode::Contact => "Contact Details",
            Mode::Email => "Email Address to QR",
            Mode::Phone => "Phone Number to QR",
        }
    }

    /// Inputs shown while this mode is active
    pub fn fields(self) -> &'static [Field] {
        match self {
            Mode::Text => &[Field::Text],
            Mode::Pdf => &[Field::PdfUrl],
            Mode::Contact => &[Field::Name, Field::Phone, Field::Email, Field::Address],
            Mode::Email => &[Field::Email],
            Mode::Phone => &[Field::Phone],
        }
    }

    /// Parse a mode identifier (case-insensitive)
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" => Some(Self::Text),
            "pdf" => Some(Self::Pdf),
            "contact" => Some(Self::Contact),
            "email" => Some(Self::Email),
            "phone" => Some(Self::Phone),
            _ => None,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(value).ok_or_else(|| {
            format!("Unknown mode '{value}', expected text, pdf, contact, email or phone")
        })
    }
}

/// Identity of a single form input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// Text mode input
    Text,
    /// PDF mode input
    PdfUrl,
    /// Contact name
    Name,
    /// Phone number, without country code
    Phone,
    /// Email address
    Email,
    /// Postal address
    Address,
}

impl Field {
    /// Every field, in display order
    pub const ALL: &'static [Field] = &[
        Field::Text,
        Field::PdfUrl,
        Field::Name,
        Field::Phone,
        Field::Email,
        Field::Address,
    ];

    /// Identifier used on the command line and in JSON
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Text => "text",
            Field::PdfUrl => "pdf_url",
            Field::Name => "name",
            Field::Phone => "phone",
            Field::Email => "email",
            Field::Address => "address",
        }
    }

    /// Placeholder label of the input
    pub fn label(self) -> &'static str {
        match self {
            Field::Text => "Enter text",
            Field::PdfUrl => "Enter PDF URL",
            Field::Name => "Name",
            Field::Phone => "Phone",
            Field::Email => "Email",
            Field::Address => "Address",
        }
    }

    /// Parse a field identifier (case-insensitive, `pdf` and `url` accepted for the link)
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" => Some(Self::Text),
            "pdf_url" | "pdf" | "url" => Some(Self::PdfUrl),
            "name" => Some(Self::Name),
            "phone" => Some(Self::Phone),
            "email" => Some(Self::Email),
            "address" => Some(Self::Address),
            _ => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(value).ok_or_else(|| {
            format!("Unknown field '{value}', expected text, pdf_url, name, phone, email or address")
        })
    }
}

/// Contact record shared by contact, email and phone modes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFields {
    /// Formatted name
    pub name: String,
    /// Phone number without country code
    pub phone: String,
    /// Email address
    pub email: String,
    /// Postal address
    pub address: String,
}
