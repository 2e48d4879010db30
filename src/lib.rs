//! qrform - form-driven QR code generator
//!
//! Pick a content type, fill in its fields and render the result as a QR
//! symbol that can be saved as JPG or PNG.
//!
//! # Features
//!
//! - **Five modes**: free text, PDF link, vCard contact, `mailto:` and `tel:` URIs
//! - **Fixed-size symbols**: square rasters drawn with the `qrcode` crate
//! - **Downloads**: `qrcode.jpg` / `qrcode.png` captured off the async runtime
//!
//! # Example
//!
//! ```no_run
//! use qrform::{ExportFormat, Field, Mode, QrFormConfig, Session};
//!
//! #[tokio::main]
//! async fn main() -> qrform::Result<()> {
//!     let mut session = Session::new(&QrFormConfig::default());
//!
//!     session.form_mut().set_mode(Mode::Contact);
//!     session.form_mut().set_field(Field::Name, "Ana");
//!     session.form_mut().set_field(Field::Phone, "9999999999");
//!     session.generate()?;
//!
//!     if let Some(path) = session.download(ExportFormat::Png).await? {
//!         println!("Saved {}", path.display());
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs, rust_2024_compatibility)]

pub mod config;
pub mod error;
pub mod export;
pub mod form;
pub mod format;
pub mod interactive;
pub mod logging;
pub mod output;
pub mod render;
pub mod session;

// Re-exports for convenience
pub use error::{Error, Result};

pub use config::{ExportOptions, LogRotation, LoggingOptions, QrFormConfig, RenderOptions};
pub use export::{ExportFormat, Exporter};
pub use form::{ContactFields, Field, FormController, Mode};
pub use render::{CodeRenderer, EccLevel, Symbol, SymbolArea};
pub use session::Session;
