//! Error types for qrform operations

use thiserror::Error;

/// Result type alias using qrform's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for qrform operations
#[derive(Error, Debug)]
pub enum Error {
    /// QR code encoding failed (usually a payload too long for any version)
    #[error("Failed to encode QR code: {0}")]
    QrEncode(String),

    /// Export was requested while no symbol is on display
    #[error("Nothing to export: generate a QR code first")]
    NothingToExport,

    /// Interactive command could not be parsed
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image processing error
    #[error("Image processing error: {0}")]
    Image(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Error::Image(e.to_string())
    }
}

impl From<qrcode::types::QrError> for Error {
    fn from(e: qrcode::types::QrError) -> Self {
        Error::QrEncode(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Other(format!("JSON error: {}", e))
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(e: tokio::task::JoinError) -> Self {
        Error::Other(format!("Background task failed: {}", e))
    }
}
