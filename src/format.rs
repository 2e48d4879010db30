//! Value formatting for each form mode
//!
//! These are pure mappings from field values to the string that ends up in
//! the QR symbol. Nothing is validated: an empty or malformed field simply
//! produces a sparse string.

use crate::form::{ContactFields, Mode};

/// Country code prefixed to phone numbers when none is configured
pub const DEFAULT_COUNTRY_CODE: &str = "+91";

/// Build the encoded value for `mode` from the current field values.
pub fn format_value(
    mode: Mode,
    text: &str,
    pdf_url: &str,
    contact: &ContactFields,
    country_code: &str,
) -> String {
    match mode {
        Mode::Text => text.to_string(),
        Mode::Pdf => pdf_url.to_string(),
        Mode::Contact => vcard(contact, country_code),
        Mode::Email => mailto(&contact.email),
        Mode::Phone => tel(&contact.phone, country_code),
    }
}

/// Contact card in vCard 3.0 layout: FN, TEL, EMAIL, ADR in that order.
pub fn vcard(contact: &ContactFields, country_code: &str) -> String {
    [
        "BEGIN:VCARD".to_string(),
        "VERSION:3.0".to_string(),
        format!("FN:{}", contact.name),
        format!("TEL:{}{}", country_code, contact.phone),
        format!("EMAIL:{}", contact.email),
        format!("ADR:{}", contact.address),
        "END:VCARD".to_string(),
    ]
    .join("\n")
}

/// `mailto:` URI for an email address
pub fn mailto(email: &str) -> String {
    format!("mailto:{email}")
}

/// `tel:` URI with the country code prefixed to the number
pub fn tel(phone: &str, country_code: &str) -> String {
    format!("tel:{country_code}{phone}")
}
