//! One form session: form state, the symbol on display and downloads

use crate::config::QrFormConfig;
use crate::error::Result;
use crate::export::{ExportFormat, Exporter};
use crate::form::FormController;
use crate::render::{CodeRenderer, SymbolArea};
use std::path::PathBuf;

/// Owns everything the screen shows for the lifetime of a session
#[derive(Debug)]
pub struct Session {
    form: FormController,
    renderer: CodeRenderer,
    exporter: Exporter,
    display: SymbolArea,
}

impl Session {
    /// Create a session with an empty form and the placeholder on display
    pub fn new(config: &QrFormConfig) -> Self {
        Self {
            form: FormController::new(config.render.country_code.clone()),
            renderer: CodeRenderer::new(&config.render),
            exporter: Exporter::new(&config.export),
            display: SymbolArea::Placeholder,
        }
    }

    /// Form state
    pub fn form(&self) -> &FormController {
        &self.form
    }

    /// Mutable form state for field edits and mode changes
    pub fn form_mut(&mut self) -> &mut FormController {
        &mut self.form
    }

    /// Exporter used for downloads
    pub fn exporter(&self) -> &Exporter {
        &self.exporter
    }

    /// Current symbol area
    pub fn display(&self) -> &SymbolArea {
        &self.display
    }

    /// Run the form's generate action and redraw the symbol from scratch.
    ///
    /// The form is submitted and cleared even when the value cannot be drawn;
    /// in that case the placeholder replaces any earlier symbol so nothing
    /// stale stays downloadable.
    pub fn generate(&mut self) -> Result<&SymbolArea> {
        self.form.generate();
        match self
            .renderer
            .render(self.form.encoded_value(), self.form.redraw_version())
        {
            Ok(area) => self.display = area,
            Err(err) => {
                self.display = SymbolArea::Placeholder;
                tracing::warn!(
                    value_len = self.form.encoded_value().len(),
                    redraw = self.form.redraw_version(),
                    "Could not draw QR code: {err}"
                );
                return Err(err);
            }
        }
        Ok(&self.display)
    }

    /// Download actions currently offered; none until a symbol is shown
    pub fn download_actions(&self) -> &'static [ExportFormat] {
        if self.display.is_symbol() {
            ExportFormat::ALL
        } else {
            &[]
        }
    }

    /// Download the displayed symbol.
    ///
    /// Returns `Ok(None)` without writing anything when no download action is
    /// offered.
    pub async fn download(&self, format: ExportFormat) -> Result<Option<PathBuf>> {
        if !self.download_actions().contains(&format) {
            tracing::debug!(%format, "Download requested with no symbol on display; ignoring");
            return Ok(None);
        }
        self.exporter.export(&self.display, format).await.map(Some)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(&QrFormConfig::default())
    }
}
