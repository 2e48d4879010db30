//! qrform runtime configuration handling

use crate::error::{Error, Result};
use crate::format::DEFAULT_COUNTRY_CODE;
use crate::render::{EccLevel, MAX_PADDING, MAX_SIZE};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level configuration structure loaded from disk and environment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QrFormConfig {
    /// Symbol rendering and formatting options
    pub render: RenderOptions,
    /// Download options
    pub export: ExportOptions,
    /// Logging configuration
    pub logging: LoggingOptions,
}

impl QrFormConfig {
    /// Load configuration from an explicit path or fall back to discovered defaults.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = if let Some(path) = explicit_path {
            Self::from_file(path)?
        } else if let Some(path) = Self::discover_file()? {
            tracing::info!("Using configuration file: {}", path.display());
            Self::from_file(&path)?
        } else {
            tracing::debug!("No qrform.toml / qrform.yaml found, using defaults");
            Self::default()
        };

        config.apply_overrides(&|key| env::var(key).ok());
        Ok(config)
    }

    /// Attempt to locate a configuration file in common locations.
    fn discover_file() -> Result<Option<PathBuf>> {
        let cwd =
            env::current_dir().map_err(|e| Error::Config(format!("Failed to read cwd: {e}")))?;
        for candidate in ["qrform.toml", "qrform.yaml", "qrform.yml"] {
            let path = cwd.join(candidate);
            if path.exists() {
                return Ok(Some(path));
            }
        }

        if let Some(xdg_config) = env::var_os("XDG_CONFIG_HOME") {
            let base = PathBuf::from(xdg_config).join("qrform");
            for candidate in ["config.toml", "config.yaml"] {
                let path = base.join(candidate);
                if path.exists() {
                    return Ok(Some(path));
                }
            }
        }

        Ok(None)
    }

    /// Read configuration from a concrete file path.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {e}", path.display())))?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        let mut config =
            Self::from_str_with_format(&contents, &extension).map_err(|e| match e {
                Error::Config(message) => Error::Config(format!("{message} ({})", path.display())),
                other => other,
            })?;
        config.normalize();
        Ok(config)
    }

    /// Parse configuration text in the given format (`toml`, `yaml` or `yml`).
    pub fn from_str_with_format(contents: &str, format: &str) -> Result<Self> {
        match format {
            "toml" => toml::from_str(contents)
                .map_err(|e| Error::Config(format!("Failed to parse TOML: {e}"))),
            "yaml" | "yml" => serde_yaml::from_str(contents)
                .map_err(|e| Error::Config(format!("Failed to parse YAML: {e}"))),
            other => Err(Error::Config(format!(
                "Unsupported config format '{}', expected toml/yaml",
                other
            ))),
        }
    }

    /// Apply `QRFORM_*` overrides looked up through `var`, then normalize.
    ///
    /// Values that fail to parse are ignored.
    pub fn apply_overrides(&mut self, var: &dyn Fn(&str) -> Option<String>) {
        self.render.apply_overrides(var);
        self.export.apply_overrides(var);
        self.logging.apply_overrides(var);
        self.normalize();
    }

    /// Clamp values into their supported ranges.
    pub fn normalize(&mut self) {
        self.render.size = self.render.size.clamp(1, MAX_SIZE);
        self.render.padding = self.render.padding.min(MAX_PADDING);
        self.export.jpeg_quality = self.export.jpeg_quality.clamp(1, 100);
        if self.export.file_stem.trim().is_empty() {
            self.export.file_stem = ExportOptions::default().file_stem;
        }
    }
}

/// How symbols are drawn and how phone numbers are prefixed
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Side length of the symbol area in pixels
    pub size: u32,
    /// White border around the symbol area in pixels
    pub padding: u32,
    /// Error correction level
    pub ecc_level: EccLevel,
    /// Draw the standard four-module quiet zone
    pub quiet_zone: bool,
    /// Prefix applied to phone numbers in contact and phone modes
    pub country_code: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            size: 256,
            padding: 16,
            ecc_level: EccLevel::L,
            quiet_zone: true,
            country_code: DEFAULT_COUNTRY_CODE.to_string(),
        }
    }
}

impl RenderOptions {
    pub(crate) fn apply_overrides(&mut self, var: &dyn Fn(&str) -> Option<String>) {
        if let Some(size) = var("QRFORM_SIZE") {
            if let Ok(parsed) = size.parse::<u32>() {
                self.size = parsed;
            }
        }
        if let Some(padding) = var("QRFORM_PADDING") {
            if let Ok(parsed) = padding.parse::<u32>() {
                self.padding = parsed;
            }
        }
        if let Some(ecc) = var("QRFORM_ECC") {
            if let Some(parsed) = EccLevel::parse(&ecc) {
                self.ecc_level = parsed;
            }
        }
        if let Some(code) = var("QRFORM_COUNTRY_CODE") {
            self.country_code = code;
        }
    }
}

/// Where and how downloads are written
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Directory that receives downloaded files
    pub directory: PathBuf,
    /// File name without extension
    pub file_stem: String,
    /// JPEG quality (1-100)
    pub jpeg_quality: u8,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            file_stem: "qrcode".to_string(),
            jpeg_quality: 92,
        }
    }
}

impl ExportOptions {
    pub(crate) fn apply_overrides(&mut self, var: &dyn Fn(&str) -> Option<String>) {
        if let Some(dir) = var("QRFORM_EXPORT_DIR") {
            self.directory = PathBuf::from(dir);
        }
        if let Some(stem) = var("QRFORM_FILE_STEM") {
            self.file_stem = stem;
        }
        if let Some(quality) = var("QRFORM_JPEG_QUALITY") {
            if let Ok(parsed) = quality.parse::<u8>() {
                self.jpeg_quality = parsed;
            }
        }
    }
}

/// Structured logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingOptions {
    /// Default log level (overridable via `QRFORM_LOG_LEVEL`)
    pub level: String,
    /// Optional log file path for teeing structured logs
    pub file: Option<PathBuf>,
    /// Force ANSI colors in stderr logging
    pub color: bool,
    /// Optional log rotation strategy applied to `file`
    pub rotation: Option<LogRotation>,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
            color: true,
            rotation: None,
        }
    }
}

impl LoggingOptions {
    pub(crate) fn apply_overrides(&mut self, var: &dyn Fn(&str) -> Option<String>) {
        if let Some(level) = var("QRFORM_LOG_LEVEL") {
            self.level = level;
        }
        if let Some(file) = var("QRFORM_LOG_FILE") {
            self.file = Some(PathBuf::from(file));
        }
        if let Some(color) = var("QRFORM_LOG_COLOR") {
            match color.to_ascii_lowercase().as_str() {
                "0" | "false" | "off" => self.color = false,
                "1" | "true" | "on" => self.color = true,
                _ => {}
            }
        }
        if let Some(rotation) = var("QRFORM_LOG_ROTATION") {
            if let Some(parsed) = LogRotation::parse(&rotation) {
                self.rotation = Some(parsed);
            }
        }
    }
}

/// Supported log rotation policies for file sinks
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    /// Rotate log files once per hour
    Hourly,
    /// Rotate log files once per day
    Daily,
}

impl LogRotation {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "hourly" => Some(Self::Hourly),
            "daily" => Some(Self::Daily),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = QrFormConfig::default();
        assert_eq!(config.render.size, 256);
        assert_eq!(config.render.country_code, "+91");
        assert_eq!(config.export.file_stem, "qrcode");
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_parse_toml_sections() {
        let contents = r#"
            [render]
            size = 512
            ecc_level = "H"
            country_code = "+1"

            [export]
            directory = "/tmp/codes"
            jpeg_quality = 80

            [logging]
            level = "debug"
            rotation = "daily"
        "#;
        let config = QrFormConfig::from_str_with_format(contents, "toml").unwrap();
        assert_eq!(config.render.size, 512);
        assert_eq!(config.render.ecc_level, EccLevel::H);
        assert_eq!(config.render.country_code, "+1");
        assert_eq!(config.render.padding, 16);
        assert_eq!(config.export.directory, PathBuf::from("/tmp/codes"));
        assert_eq!(config.export.jpeg_quality, 80);
        assert_eq!(config.logging.rotation, Some(LogRotation::Daily));
    }

    #[test]
    fn test_parse_yaml() {
        let contents = "render:\n  quiet_zone: false\nexport:\n  file_stem: badge\n";
        let config = QrFormConfig::from_str_with_format(contents, "yaml").unwrap();
        assert!(!config.render.quiet_zone);
        assert_eq!(config.export.file_stem, "badge");
    }

    #[test]
    fn test_invalid_values_are_config_errors() {
        let result = QrFormConfig::from_str_with_format("[render]\necc_level = \"Z\"\n", "toml");
        assert!(matches!(result, Err(Error::Config(_))));

        let result = QrFormConfig::from_str_with_format("", "ini");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_normalize_clamps() {
        let mut config = QrFormConfig::default();
        config.export.jpeg_quality = 0;
        config.export.file_stem = "  ".to_string();
        config.render.size = 0;
        config.normalize();
        assert_eq!(config.export.jpeg_quality, 1);
        assert_eq!(config.export.file_stem, "qrcode");
        assert_eq!(config.render.size, 1);

        config.render.size = u32::MAX;
        config.render.padding = u32::MAX;
        config.normalize();
        assert_eq!(config.render.size, MAX_SIZE);
        assert_eq!(config.render.padding, MAX_PADDING);
    }

    fn vars(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key| {
            pairs
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| value.to_string())
        }
    }

    #[test]
    fn test_overrides_replace_file_values() {
        let contents = "[render]\nsize = 512\ncountry_code = \"+1\"\n";
        let mut config = QrFormConfig::from_str_with_format(contents, "toml").unwrap();
        config.apply_overrides(&vars(&[
            ("QRFORM_SIZE", "300"),
            ("QRFORM_ECC", "q"),
            ("QRFORM_COUNTRY_CODE", "+44"),
            ("QRFORM_EXPORT_DIR", "/srv/codes"),
            ("QRFORM_FILE_STEM", "badge"),
            ("QRFORM_LOG_LEVEL", "debug"),
            ("QRFORM_LOG_COLOR", "off"),
            ("QRFORM_LOG_ROTATION", "hourly"),
        ]));

        assert_eq!(config.render.size, 300);
        assert_eq!(config.render.ecc_level, EccLevel::Q);
        assert_eq!(config.render.country_code, "+44");
        assert_eq!(config.export.directory, PathBuf::from("/srv/codes"));
        assert_eq!(config.export.file_stem, "badge");
        assert_eq!(config.logging.level, "debug");
        assert!(!config.logging.color);
        assert_eq!(config.logging.rotation, Some(LogRotation::Hourly));
    }

    #[test]
    fn test_unparseable_overrides_are_ignored() {
        let mut config = QrFormConfig::default();
        config.apply_overrides(&vars(&[
            ("QRFORM_SIZE", "big"),
            ("QRFORM_PADDING", "-4"),
            ("QRFORM_ECC", "Z"),
            ("QRFORM_JPEG_QUALITY", "high"),
            ("QRFORM_LOG_COLOR", "maybe"),
            ("QRFORM_LOG_ROTATION", "weekly"),
        ]));

        assert_eq!(config.render.size, 256);
        assert_eq!(config.render.padding, 16);
        assert_eq!(config.render.ecc_level, EccLevel::L);
        assert_eq!(config.export.jpeg_quality, 92);
        assert!(config.logging.color);
        assert_eq!(config.logging.rotation, None);
    }

    #[test]
    fn test_override_values_are_clamped() {
        let mut config = QrFormConfig::default();
        config.apply_overrides(&vars(&[("QRFORM_JPEG_QUALITY", "250")]));
        assert_eq!(config.export.jpeg_quality, 100);

        config.apply_overrides(&vars(&[
            ("QRFORM_JPEG_QUALITY", "0"),
            ("QRFORM_PADDING", "4294967295"),
        ]));
        assert_eq!(config.export.jpeg_quality, 1);
        assert_eq!(config.render.padding, MAX_PADDING);
    }
}
