//! Downloading the displayed symbol as an image file

use crate::config::ExportOptions;
use crate::error::{Error, Result};
use crate::render::SymbolArea;
use image::codecs::jpeg::JpegEncoder;
use image::{GrayImage, ImageFormat};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Cursor;
use std::path::PathBuf;
use std::str::FromStr;

/// Raster formats offered for download
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// JPEG, saved with a `.jpg` extension
    Jpg,
    /// PNG
    Png,
}

impl ExportFormat {
    /// Download actions in the order they are offered
    pub const ALL: &'static [ExportFormat] = &[ExportFormat::Jpg, ExportFormat::Png];

    /// File extension without the dot
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Jpg => "jpg",
            ExportFormat::Png => "png",
        }
    }

    /// Parse a format name (case-insensitive, `jpeg` accepted)
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(Self::Jpg),
            "png" => Some(Self::Png),
            _ => None,
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(value)
            .ok_or_else(|| format!("Unsupported download format '{value}', expected jpg or png"))
    }
}

/// Captures the displayed symbol region and saves it to disk
#[derive(Debug, Clone)]
pub struct Exporter {
    directory: PathBuf,
    file_stem: String,
    jpeg_quality: u8,
}

impl Exporter {
    /// Create an exporter from export options
    pub fn new(options: &ExportOptions) -> Self {
        Self {
            directory: options.directory.clone(),
            file_stem: options.file_stem.clone(),
            jpeg_quality: options.jpeg_quality.clamp(1, 100),
        }
    }

    /// Name of the file written for `format`, e.g. `qrcode.png`
    pub fn file_name(&self, format: ExportFormat) -> String {
        format!("{}.{}", self.file_stem, format.extension())
    }

    /// Full destination path for `format`
    pub fn path_for(&self, format: ExportFormat) -> PathBuf {
        self.directory.join(self.file_name(format))
    }

    /// Rasterize the displayed symbol into encoded image bytes.
    ///
    /// Fails with [`Error::NothingToExport`] while the placeholder is shown.
    pub async fn capture(&self, area: &SymbolArea, format: ExportFormat) -> Result<Vec<u8>> {
        let symbol = area.symbol().ok_or(Error::NothingToExport)?;
        let image = symbol.image.clone();
        let quality = self.jpeg_quality;

        tokio::task::spawn_blocking(move || encode(&image, format, quality)).await?
    }

    /// Capture the displayed symbol and write it to [`Exporter::path_for`].
    pub async fn export(&self, area: &SymbolArea, format: ExportFormat) -> Result<PathBuf> {
        let bytes = match self.capture(area, format).await {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!(%format, "Symbol capture failed: {err}");
                return Err(err);
            }
        };

        if !self.directory.as_os_str().is_empty() {
            tokio::fs::create_dir_all(&self.directory).await.map_err(|e| {
                Error::Io(std::io::Error::new(
                    e.kind(),
                    format!(
                        "Failed to create directory {}: {e}",
                        self.directory.display()
                    ),
                ))
            })?;
        }

        let path = self.path_for(format);
        tokio::fs::write(&path, &bytes).await.map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to write {}: {e}", path.display()),
            ))
        })?;

        tracing::info!(path = %path.display(), bytes = bytes.len(), "Saved QR code");
        Ok(path)
    }
}

impl Default for Exporter {
    fn default() -> Self {
        Self::new(&ExportOptions::default())
    }
}

fn encode(image: &GrayImage, format: ExportFormat, quality: u8) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    match format {
        ExportFormat::Png => image.write_to(&mut buffer, ImageFormat::Png)?,
        ExportFormat::Jpg => {
            JpegEncoder::new_with_quality(&mut buffer, quality).encode_image(image)?
        }
    }
    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::CodeRenderer;

    #[test]
    fn test_file_names() {
        let exporter = Exporter::default();
        assert_eq!(exporter.file_name(ExportFormat::Jpg), "qrcode.jpg");
        assert_eq!(exporter.file_name(ExportFormat::Png), "qrcode.png");
        assert_eq!(
            exporter.path_for(ExportFormat::Png),
            PathBuf::from("./qrcode.png")
        );
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("JPEG".parse::<ExportFormat>(), Ok(ExportFormat::Jpg));
        assert_eq!(ExportFormat::parse("png"), Some(ExportFormat::Png));
        assert!("gif".parse::<ExportFormat>().is_err());
    }

    #[tokio::test]
    async fn test_capture_placeholder_fails() {
        let exporter = Exporter::default();
        let result = exporter
            .capture(&SymbolArea::Placeholder, ExportFormat::Png)
            .await;
        assert!(matches!(result, Err(Error::NothingToExport)));
    }

    #[tokio::test]
    async fn test_capture_magic_bytes() {
        let display = CodeRenderer::default().render("hello", 1).unwrap();
        let exporter = Exporter::default();

        let png = exporter.capture(&display, ExportFormat::Png).await.unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

        let jpg = exporter.capture(&display, ExportFormat::Jpg).await.unwrap();
        assert_eq!(&jpg[..3], &[0xFF, 0xD8, 0xFF]);
    }

    #[tokio::test]
    async fn test_png_capture_keeps_dimensions() {
        let display = CodeRenderer::default().render("hello", 1).unwrap();
        let png = Exporter::default()
            .capture(&display, ExportFormat::Png)
            .await
            .unwrap();
        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (288, 288));
    }
}
