//! QR symbol rendering
//!
//! Turns the encoded value into what the screen shows: a placeholder while
//! nothing has been generated, or a fixed-size square symbol otherwise.

mod renderer;

pub use renderer::CodeRenderer;

use image::GrayImage;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Message shown in place of a symbol while the encoded value is empty
pub const PLACEHOLDER: &str = "Your QR here";

/// Largest accepted symbol area side, in pixels
pub const MAX_SIZE: u32 = 4096;

/// Largest accepted padding, in pixels
pub const MAX_PADDING: u32 = 1024;

/// What the symbol area currently shows
#[derive(Debug, Clone)]
pub enum SymbolArea {
    /// No value yet; show [`PLACEHOLDER`]
    Placeholder,
    /// A freshly drawn symbol
    Symbol(Symbol),
}

impl SymbolArea {
    /// The drawn symbol, if any
    pub fn symbol(&self) -> Option<&Symbol> {
        match self {
            SymbolArea::Placeholder => None,
            SymbolArea::Symbol(symbol) => Some(symbol),
        }
    }

    /// Whether a symbol is mounted
    pub fn is_symbol(&self) -> bool {
        matches!(self, SymbolArea::Symbol(_))
    }
}

/// A rendered QR symbol together with the value it encodes
#[derive(Debug, Clone)]
pub struct Symbol {
    /// Encoded value
    pub value: String,
    /// Redraw version this symbol was drawn for
    pub redraw: u64,
    /// QR version chosen by the encoder
    pub version: i16,
    /// Modules per side, excluding the quiet zone
    pub modules: u32,
    /// Grayscale raster of the symbol region including padding
    pub image: GrayImage,
    terminal: String,
}

impl Symbol {
    /// Pixel width of the symbol region
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Pixel height of the symbol region
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Half-block Unicode rendering suitable for a terminal
    pub fn to_terminal(&self) -> &str {
        &self.terminal
    }
}

/// Error correction level used when encoding symbols
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EccLevel {
    /// ~7% recovery
    #[default]
    L,
    /// ~15% recovery
    M,
    /// ~25% recovery
    Q,
    /// ~30% recovery
    H,
}

impl EccLevel {
    /// Parse a level letter (case-insensitive)
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "L" => Some(Self::L),
            "M" => Some(Self::M),
            "Q" => Some(Self::Q),
            "H" => Some(Self::H),
            _ => None,
        }
    }

    pub(crate) fn to_qrcode(self) -> qrcode::EcLevel {
        match self {
            EccLevel::L => qrcode::EcLevel::L,
            EccLevel::M => qrcode::EcLevel::M,
            EccLevel::Q => qrcode::EcLevel::Q,
            EccLevel::H => qrcode::EcLevel::H,
        }
    }
}

impl fmt::Display for EccLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            EccLevel::L => "L",
            EccLevel::M => "M",
            EccLevel::Q => "Q",
            EccLevel::H => "H",
        };
        f.write_str(letter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ecc_parse() {
        assert_eq!(EccLevel::parse("h"), Some(EccLevel::H));
        assert_eq!(EccLevel::parse(" M "), Some(EccLevel::M));
        assert_eq!(EccLevel::parse("X"), None);
        assert_eq!(EccLevel::default(), EccLevel::L);
    }

    #[test]
    fn test_placeholder_has_no_symbol() {
        let display = SymbolArea::Placeholder;
        assert!(display.symbol().is_none());
        assert!(!display.is_symbol());
    }
}
