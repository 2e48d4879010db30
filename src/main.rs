//! qrform command-line entrypoint

use clap::{Args, Parser, Subcommand};
use qrform::interactive::{self, InteractiveOptions};
use qrform::output::render_view;
use qrform::{ExportFormat, Field, Mode, QrFormConfig, Result, Session, logging};
use serde_json::Value;
use std::io::Write;
use std::path::PathBuf;
use tokio::io::BufReader;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "qrform",
    version,
    about = "Generate QR codes for text, PDF links, contacts, email addresses and phone numbers"
)]
struct Cli {
    /// Optional configuration file (toml/yaml). Defaults to qrform.{toml,yaml} in cwd/XDG config.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Output results as JSON instead of human-readable text
    #[arg(long, global = true)]
    json: bool,

    /// Override the log level (e.g. debug, info, warn)
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fill the form once, generate the QR code and optionally download it
    Generate(GenerateArgs),
    /// Drive the form interactively, one command per line on stdin
    Interactive {
        /// Directory that receives downloads
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,

        /// Do not print the QR code in the terminal
        #[arg(long)]
        no_preview: bool,
    },
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Content type: text, pdf, contact, email or phone
    #[arg(value_name = "MODE")]
    mode: Mode,

    /// Text to encode (text mode)
    #[arg(long)]
    text: Option<String>,

    /// PDF link to encode (pdf mode)
    #[arg(long)]
    url: Option<String>,

    /// Contact name
    #[arg(long)]
    name: Option<String>,

    /// Phone number without country code
    #[arg(long)]
    phone: Option<String>,

    /// Email address
    #[arg(long)]
    email: Option<String>,

    /// Postal address
    #[arg(long)]
    address: Option<String>,

    /// Save the QR code in this format (repeatable: --download png --download jpg)
    #[arg(long, value_name = "FORMAT")]
    download: Vec<ExportFormat>,

    /// Directory that receives downloads
    #[arg(long, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Do not print the QR code in the terminal
    #[arg(long)]
    no_preview: bool,
}

impl GenerateArgs {
    fn field_values(&self) -> Vec<(Field, &str)> {
        [
            (Field::Text, &self.text),
            (Field::PdfUrl, &self.url),
            (Field::Name, &self.name),
            (Field::Phone, &self.phone),
            (Field::Email, &self.email),
            (Field::Address, &self.address),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_deref().map(|v| (field, v)))
        .collect()
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = QrFormConfig::load(cli.config.as_deref())?;

    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }

    let out_dir = match &cli.command {
        Command::Generate(args) => args.out_dir.clone(),
        Command::Interactive { out_dir, .. } => out_dir.clone(),
    };
    if let Some(dir) = out_dir {
        config.export.directory = dir;
    }

    logging::init(&config.logging)?;
    info!(render = ?config.render, export = ?config.export, "Starting qrform");

    let mut session = Session::new(&config);

    match cli.command {
        Command::Generate(args) => handle_generate(&mut session, &args, cli.json).await,
        Command::Interactive { no_preview, .. } => {
            let options = InteractiveOptions {
                json: cli.json,
                preview: !no_preview,
            };
            let stdin = BufReader::new(tokio::io::stdin());
            let mut stdout = std::io::stdout();
            interactive::run(&mut session, stdin, &mut stdout, options).await?;
            stdout.flush()?;
            Ok(())
        }
    }
}

async fn handle_generate(session: &mut Session, args: &GenerateArgs, json: bool) -> Result<()> {
    let form = session.form_mut();
    form.set_mode(args.mode);
    for (field, value) in args.field_values() {
        if !args.mode.fields().contains(&field) {
            tracing::warn!(%field, mode = %args.mode, "Field is not used by this mode");
        }
        form.set_field(field, value);
    }

    session.generate()?;
    let view = render_view(session, !args.no_preview);

    let mut saved = Vec::new();
    for format in &args.download {
        match session.download(*format).await? {
            Some(path) => saved.push(path),
            None => info!(%format, "Nothing generated; download skipped"),
        }
    }

    if json {
        let mut root = view.json;
        root["saved"] = Value::from(
            saved
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>(),
        );
        println!("{}", serde_json::to_string_pretty(&root)?);
    } else {
        for line in &view.human {
            println!("{line}");
        }
        for path in &saved {
            println!("Saved {}", path.display());
        }
    }

    Ok(())
}
