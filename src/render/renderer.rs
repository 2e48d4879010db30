//! Symbol renderer built on the `qrcode` crate

use crate::config::RenderOptions;
use crate::error::{Error, Result};
use crate::render::{EccLevel, MAX_PADDING, MAX_SIZE, Symbol, SymbolArea};
use image::{GrayImage, Luma};
use qrcode::render::unicode;
use qrcode::{Color, QrCode, Version};

const QUIET_ZONE_MODULES: u32 = 4;
const DARK: Luma<u8> = Luma([0]);
const LIGHT: Luma<u8> = Luma([255]);

/// QR code renderer producing fixed-size square symbols
#[derive(Debug, Clone)]
pub struct CodeRenderer {
    size: u32,
    padding: u32,
    ecc_level: EccLevel,
    quiet_zone: bool,
}

impl CodeRenderer {
    /// Create a renderer from render options
    pub fn new(options: &RenderOptions) -> Self {
        Self {
            size: options.size.clamp(1, MAX_SIZE),
            padding: options.padding.min(MAX_PADDING),
            ecc_level: options.ecc_level,
            quiet_zone: options.quiet_zone,
        }
    }

    /// Side length of the symbol area, excluding padding
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Render `value` for redraw `version`. An empty value yields the placeholder.
    pub fn render(&self, value: &str, version: u64) -> Result<SymbolArea> {
        if value.is_empty() {
            return Ok(SymbolArea::Placeholder);
        }

        let ecc = self.ecc_level.to_qrcode();
        let code = QrCode::with_error_correction_level(value.as_bytes(), ecc)?;
        let image = self.rasterize(&code)?;

        let qr_version = match code.version() {
            Version::Normal(v) | Version::Micro(v) => v,
        };

        let terminal = code
            .render::<unicode::Dense1x2>()
            .dark_color(unicode::Dense1x2::Light)
            .light_color(unicode::Dense1x2::Dark)
            .quiet_zone(self.quiet_zone)
            .build();

        tracing::debug!(
            qr_version,
            modules = code.width(),
            pixels = image.width(),
            redraw = version,
            "Rendered QR symbol"
        );

        Ok(SymbolArea::Symbol(Symbol {
            value: value.to_string(),
            redraw: version,
            version: qr_version,
            modules: code.width() as u32,
            image,
            terminal,
        }))
    }

    fn rasterize(&self, code: &QrCode) -> Result<GrayImage> {
        let modules = code.width() as u32;
        let quiet = if self.quiet_zone { QUIET_ZONE_MODULES } else { 0 };
        let layout = Layout::compute(modules, quiet, self.size, self.padding)?;

        if layout.drawn > self.size {
            tracing::warn!(
                requested = self.size,
                drawn = layout.drawn,
                "Payload needs more modules than the configured size; growing the symbol"
            );
        }

        let mut img = GrayImage::from_pixel(layout.side, layout.side, LIGHT);
        let scale = layout.scale;
        for (i, color) in code.to_colors().iter().enumerate() {
            if *color != Color::Dark {
                continue;
            }
            let x = layout.origin + (i as u32 % modules) * scale;
            let y = layout.origin + (i as u32 / modules) * scale;
            for dy in 0..scale {
                for dx in 0..scale {
                    img.put_pixel(x + dx, y + dy, DARK);
                }
            }
        }

        Ok(img)
    }
}

/// Pixel geometry of a symbol: modules scaled into a centered square area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    /// Pixels per module
    scale: u32,
    /// Side of the scaled symbol including quiet zone
    drawn: u32,
    /// Side of the whole canvas including padding
    side: u32,
    /// Offset of the first data module on both axes
    origin: u32,
}

impl Layout {
    fn compute(modules: u32, quiet: u32, size: u32, padding: u32) -> Result<Self> {
        let overflow = || {
            Error::Image(format!(
                "Symbol of {modules} modules does not fit a {size} px area with {padding} px padding"
            ))
        };

        let total = quiet
            .checked_mul(2)
            .and_then(|q| q.checked_add(modules))
            .filter(|t| *t > 0)
            .ok_or_else(overflow)?;
        let scale = (size / total).max(1);
        let drawn = total.checked_mul(scale).ok_or_else(overflow)?;
        let area = drawn.max(size);
        let side = padding
            .checked_mul(2)
            .and_then(|p| p.checked_add(area))
            .ok_or_else(overflow)?;
        let origin = quiet
            .checked_mul(scale)
            .and_then(|q| q.checked_add(padding))
            .and_then(|o| o.checked_add((area - drawn) / 2))
            .ok_or_else(overflow)?;

        Ok(Self {
            scale,
            drawn,
            side,
            origin,
        })
    }
}

impl Default for CodeRenderer {
    fn default() -> Self {
        Self::new(&RenderOptions::default())
    }
}
