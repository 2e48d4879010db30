//! Line-driven interactive session
//!
//! Reads one command per line and drives a [`Session`] the way the form UI
//! would: pick a mode, fill fields, generate, download.

use crate::error::{Error, Result};
use crate::export::ExportFormat;
use crate::form::{Field, Mode};
use crate::output::{render_form, render_view};
use crate::session::Session;
use serde_json::json;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

const HELP: &[&str] = &[
    "Commands:",
    "  mode <text|pdf|contact|email|phone>   switch the form mode",
    "  set <field> <value>                  set a field (text, pdf_url, name, phone, email, address)",
    "  show                                 show the form and the current QR code",
    "  generate                             generate the QR code and clear the form",
    "  download <jpg|png>                   save the QR code (after generate)",
    "  help                                 show this help",
    "  quit                                 leave the session",
];

/// A parsed interactive command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Switch the active mode
    Mode(Mode),
    /// Replace a field value
    Set(Field, String),
    /// Print the form and the symbol area
    Show,
    /// Run the generate action
    Generate,
    /// Download the displayed symbol
    Download(ExportFormat),
    /// Print command help
    Help,
    /// End the session
    Quit,
}

impl Command {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    ///
    /// For `set`, everything after the field name and a single space is the
    /// value, kept verbatim.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim_start();
        if line.trim().is_empty() {
            return Ok(None);
        }

        let (name, rest) = line.split_once(' ').unwrap_or((line, ""));
        let command = match name.to_ascii_lowercase().as_str() {
            "mode" => Command::Mode(rest.trim().parse().map_err(Error::InvalidCommand)?),
            "set" => {
                let rest = rest.trim_start();
                let (field, value) = rest.split_once(' ').unwrap_or((rest, ""));
                if field.is_empty() {
                    return Err(Error::InvalidCommand(
                        "usage: set <field> <value>".to_string(),
                    ));
                }
                Command::Set(
                    field.parse().map_err(Error::InvalidCommand)?,
                    value.to_string(),
                )
            }
            "show" => Command::Show,
            "generate" => Command::Generate,
            "download" => {
                Command::Download(rest.trim().parse().map_err(Error::InvalidCommand)?)
            }
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => {
                return Err(Error::InvalidCommand(format!(
                    "unknown command '{other}', type 'help' for a list"
                )));
            }
        };
        Ok(Some(command))
    }
}

/// Output settings for an interactive session
#[derive(Debug, Clone, Copy)]
pub struct InteractiveOptions {
    /// Emit JSON objects instead of human-readable lines
    pub json: bool,
    /// Include the Unicode symbol preview in human output
    pub preview: bool,
}

impl Default for InteractiveOptions {
    fn default() -> Self {
        Self {
            json: false,
            preview: true,
        }
    }
}

/// Run commands from `input` against `session` until `quit` or EOF.
///
/// Command errors are reported on `out` and the session continues; only
/// I/O failures on `input` or `out` end it early.
pub async fn run<R, W>(
    session: &mut Session,
    input: R,
    out: &mut W,
    options: InteractiveOptions,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    if !options.json {
        writeln!(out, "QR Code Generator (type 'help' for commands)")?;
        write_lines(out, &render_form(session.form()))?;
    }

    while let Some(line) = lines.next_line().await? {
        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                report_error(out, &err, options)?;
                continue;
            }
        };

        if command == Command::Quit {
            break;
        }

        if let Err(err) = execute(session, command, out, options).await {
            match err {
                Error::Io(_) => return Err(err),
                other => report_error(out, &other, options)?,
            }
        }
    }

    tracing::debug!("Interactive session ended");
    Ok(())
}

async fn execute<W: Write>(
    session: &mut Session,
    command: Command,
    out: &mut W,
    options: InteractiveOptions,
) -> Result<()> {
    match command {
        Command::Mode(mode) => {
            session.form_mut().set_mode(mode);
            if !options.json {
                write_lines(out, &render_form(session.form()))?;
            }
        }
        Command::Set(field, value) => {
            session.form_mut().set_field(field, value);
        }
        Command::Show => {
            let view = render_view(session, options.preview);
            if options.json {
                let mut value = view.json;
                value["form"] = json!({
                    "fields": session
                        .form()
                        .visible_fields()
                        .iter()
                        .map(|f| (f.as_str().to_string(), json!(session.form().field(*f))))
                        .collect::<serde_json::Map<String, serde_json::Value>>(),
                });
                writeln!(out, "{}", serde_json::to_string(&value)?)?;
            } else {
                write_lines(out, &render_form(session.form()))?;
                write_lines(out, &view.human)?;
            }
        }
        Command::Generate => {
            session.generate()?;
            let view = render_view(session, options.preview);
            if options.json {
                writeln!(out, "{}", serde_json::to_string(&view.json)?)?;
            } else {
                write_lines(out, &view.human)?;
            }
        }
        Command::Download(format) => {
            if let Some(path) = session.download(format).await? {
                if options.json {
                    writeln!(out, "{}", json!({ "saved": path.display().to_string() }))?;
                } else {
                    writeln!(out, "Saved {}", path.display())?;
                }
            }
        }
        Command::Help => {
            if !options.json {
                write_lines(out, HELP)?;
            }
        }
        Command::Quit => {}
    }
    Ok(())
}

fn report_error<W: Write>(out: &mut W, err: &Error, options: InteractiveOptions) -> Result<()> {
    if options.json {
        writeln!(out, "{}", json!({ "error": err.to_string() }))?;
    } else {
        writeln!(out, "error: {err}")?;
    }
    Ok(())
}

fn write_lines<W: Write, S: AsRef<str>>(out: &mut W, lines: &[S]) -> Result<()> {
    for line in lines {
        writeln!(out, "{}", line.as_ref())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_set_keeps_value_verbatim() {
        let command = Command::parse("set address 12 Main St, Apt  4 ").unwrap();
        assert_eq!(
            command,
            Some(Command::Set(Field::Address, "12 Main St, Apt  4 ".to_string()))
        );
    }

    #[test]
    fn test_parse_set_without_value_clears() {
        assert_eq!(
            Command::parse("set phone").unwrap(),
            Some(Command::Set(Field::Phone, String::new()))
        );
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(Command::parse("  ").unwrap(), None);
        assert_eq!(Command::parse("mode Email").unwrap(), Some(Command::Mode(Mode::Email)));
        assert_eq!(
            Command::parse("download jpeg").unwrap(),
            Some(Command::Download(ExportFormat::Jpg))
        );
        assert_eq!(Command::parse("GENERATE").unwrap(), Some(Command::Generate));
        assert_eq!(Command::parse("exit").unwrap(), Some(Command::Quit));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(Command::parse("mode fax"), Err(Error::InvalidCommand(_))));
        assert!(matches!(Command::parse("set"), Err(Error::InvalidCommand(_))));
        assert!(matches!(Command::parse("set zip 123"), Err(Error::InvalidCommand(_))));
        assert!(matches!(Command::parse("download gif"), Err(Error::InvalidCommand(_))));
        assert!(matches!(Command::parse("print"), Err(Error::InvalidCommand(_))));
    }

    #[tokio::test]
    async fn test_scripted_session() {
        let script = "mode phone\nset phone 5550123\nbogus\ngenerate\nquit\ngenerate\n";
        let mut session = Session::default();
        let mut out = Vec::new();
        let options = InteractiveOptions {
            json: false,
            preview: false,
        };

        run(&mut session, script.as_bytes(), &mut out, options)
            .await
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Mode: Phone Number to QR [phone]"));
        assert!(text.contains("error: Invalid command: unknown command 'bogus'"));
        assert!(text.contains("  tel:+915550123"));
        assert!(text.contains("Actions: Download JPG | Download PNG"));
        assert_eq!(session.form().redraw_version(), 1);
    }

    #[tokio::test]
    async fn test_download_before_generate_prints_nothing() {
        let mut session = Session::default();
        let mut out = Vec::new();
        let options = InteractiveOptions {
            json: true,
            preview: false,
        };

        run(&mut session, "download png\n".as_bytes(), &mut out, options)
            .await
            .unwrap();

        assert!(out.is_empty());
    }
}
