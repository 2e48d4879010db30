//! Helpers for presenting the session as text or JSON

use crate::export::ExportFormat;
use crate::form::FormController;
use crate::render::{PLACEHOLDER, SymbolArea};
use crate::session::Session;
use serde_json::{Value, json};

/// Combined structured and human-readable representation of the view
#[derive(Debug, Clone)]
pub struct RenderedView {
    /// Structured JSON representation suitable for scripting
    pub json: Value,
    /// Human-readable lines for terminal presentation
    pub human: Vec<String>,
}

/// Render the symbol area and download actions of a session.
///
/// With `preview` off the Unicode symbol is left out of the human lines.
pub fn render_view(session: &Session, preview: bool) -> RenderedView {
    let json = view_value(session);
    let form = session.form();
    let mut human = Vec::new();

    match session.display() {
        SymbolArea::Placeholder => human.push(PLACEHOLDER.to_string()),
        SymbolArea::Symbol(symbol) => {
            human.push(format!(
                "QR code ({} mode, version {}, {}x{} px, redraw {})",
                form.mode(),
                symbol.version,
                symbol.width(),
                symbol.height(),
                symbol.redraw
            ));
            human.push("Value:".to_string());
            human.extend(symbol.value.lines().map(|line| format!("  {line}")));
            if preview {
                human.push(String::new());
                human.extend(symbol.to_terminal().lines().map(str::to_string));
                human.push(String::new());
            }
        }
    }

    let actions = session.download_actions();
    if !actions.is_empty() {
        let labels: Vec<String> = actions.iter().map(|f| download_label(*f)).collect();
        human.push(format!("Actions: {}", labels.join(" | ")));
    }

    RenderedView { json, human }
}

/// Structured JSON representation of the view
pub fn view_value(session: &Session) -> Value {
    let form = session.form();
    let symbol = session.display().symbol().map(|symbol| {
        json!({
            "version": symbol.version,
            "modules": symbol.modules,
            "width": symbol.width(),
            "height": symbol.height(),
        })
    });
    let placeholder = match session.display() {
        SymbolArea::Placeholder => Some(PLACEHOLDER),
        SymbolArea::Symbol(_) => None,
    };

    json!({
        "mode": form.mode(),
        "redraw": form.redraw_version(),
        "value": form.encoded_value(),
        "symbol": symbol,
        "placeholder": placeholder,
        "downloads": session.download_actions(),
    })
}

/// Render the inputs of the active mode with their current values.
pub fn render_form(form: &FormController) -> Vec<String> {
    let mut lines = vec![format!("Mode: {} [{}]", form.mode().heading(), form.mode())];
    for field in form.visible_fields() {
        let value = form.field(*field);
        let shown = if value.is_empty() {
            format!("<{}>", field.label())
        } else {
            value.to_string()
        };
        lines.push(format!("  {:<8} {}", field.as_str(), shown));
    }
    lines
}

/// Button label for a download action
pub fn download_label(format: ExportFormat) -> String {
    format!("Download {}", format.extension().to_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{Field, Mode};

    #[test]
    fn test_placeholder_view() {
        let session = Session::default();
        let view = render_view(&session, true);
        assert_eq!(view.human, vec![PLACEHOLDER.to_string()]);
        assert_eq!(view.json["placeholder"], "Your QR here");
        assert!(view.json["symbol"].is_null());
        assert_eq!(view.json["downloads"], json!([]));
    }

    #[test]
    fn test_symbol_view() {
        let mut session = Session::default();
        session.form_mut().set_mode(Mode::Phone);
        session.form_mut().set_field(Field::Phone, "5550123");
        session.generate().unwrap();

        let view = render_view(&session, false);
        assert!(view.human.contains(&"  tel:+915550123".to_string()));
        assert_eq!(
            view.human.last().map(String::as_str),
            Some("Actions: Download JPG | Download PNG")
        );
        assert_eq!(view.json["mode"], "phone");
        assert_eq!(view.json["redraw"], 1);
        assert_eq!(view.json["value"], "tel:+915550123");
        assert_eq!(view.json["symbol"]["width"], 288);
        assert_eq!(view.json["downloads"], json!(["jpg", "png"]));
    }

    #[test]
    fn test_form_lines_show_labels_for_empty_fields() {
        let mut form = FormController::default();
        form.set_mode(Mode::Contact);
        form.set_field(Field::Name, "Ana");

        let lines = render_form(&form);
        assert_eq!(lines[0], "Mode: Contact Details [contact]");
        assert!(lines[1].ends_with("Ana"));
        assert!(lines[2].ends_with("<Phone>"));
        assert_eq!(lines.len(), 5);
    }
}
