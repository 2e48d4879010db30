//! Logging setup for the qrform binary
//!
//! Console output goes to stderr so stdout only carries the rendered view or
//! JSON. A bare level such as `debug` applies to qrform's own events while
//! the encoder and image crates stay at `warn`; a full directive string
//! (`qrform=trace,image=info`) is used as given.

use crate::config::{LogRotation, LoggingOptions};
use crate::error::{Error, Result};
use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::OnceLock;
use tracing_appender::non_blocking::{NonBlocking, NonBlockingBuilder, WorkerGuard};
use tracing_appender::rolling;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

const CRATE_TARGET: &str = "qrform";
const DEPENDENCY_LEVEL: &str = "warn";

static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Install the global subscriber. Later calls are no-ops.
pub fn init(options: &LoggingOptions) -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let filter = build_filter(&options.level)?;

    let console = fmt::layer()
        .with_timer(UtcTime::rfc_3339())
        .with_writer(io::stderr)
        .with_ansi(options.color)
        .with_target(false);

    let file = file_writer(options)?.map(|writer| {
        fmt::layer()
            .with_timer(UtcTime::rfc_3339())
            .with_writer(writer)
            .with_ansi(false)
            .with_target(true)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file)
        .try_init()
        .map_err(|e| Error::Config(format!("Failed to install tracing subscriber: {e}")))
}

/// Expand a configured level into filter directives.
pub fn filter_directives(level: &str) -> String {
    let level = level.trim();
    if level.is_empty() {
        DEPENDENCY_LEVEL.to_string()
    } else if level.contains('=') || level.contains(',') {
        level.to_string()
    } else {
        format!("{DEPENDENCY_LEVEL},{CRATE_TARGET}={level}")
    }
}

fn build_filter(level: &str) -> Result<EnvFilter> {
    let directives = filter_directives(level);
    EnvFilter::try_new(&directives)
        .map_err(|e| Error::Config(format!("Invalid log level '{level}': {e}")))
}

/// Non-blocking writer for the optional log file, rotated when configured.
fn file_writer(options: &LoggingOptions) -> Result<Option<NonBlocking>> {
    let Some(path) = options.file.as_deref() else {
        return Ok(None);
    };

    let file_name = match (options.rotation, path.file_name()) {
        (Some(_), None) => {
            return Err(Error::Config(format!(
                "Log file path '{}' must include a filename when rotation is enabled",
                path.display()
            )));
        }
        (_, name) => name,
    };

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir).map_err(|e| {
        Error::Config(format!(
            "Failed to create log directory {}: {e}",
            dir.display()
        ))
    })?;

    let builder = NonBlockingBuilder::default().lossy(false);
    let (writer, guard) = match (options.rotation, file_name) {
        (Some(LogRotation::Hourly), Some(name)) => builder.finish(rolling::hourly(dir, name)),
        (Some(LogRotation::Daily), Some(name)) => builder.finish(rolling::daily(dir, name)),
        _ => {
            let file = OpenOptions::new()
                .append(true)
                .create(true)
                .open(path)
                .map_err(|e| {
                    Error::Config(format!("Failed to open log file {}: {e}", path.display()))
                })?;
            builder.finish(file)
        }
    };

    let _ = FILE_GUARD.set(guard);
    Ok(Some(writer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_bare_level_targets_this_crate() {
        assert_eq!(filter_directives("debug"), "warn,qrform=debug");
        assert_eq!(filter_directives(" info "), "warn,qrform=info");
        assert_eq!(filter_directives(""), "warn");
    }

    #[test]
    fn test_directive_strings_pass_through() {
        assert_eq!(
            filter_directives("qrform=trace,image=info"),
            "qrform=trace,image=info"
        );
        assert_eq!(filter_directives("qrform::export=debug"), "qrform::export=debug");
    }

    #[test]
    fn test_invalid_level_is_config_error() {
        assert!(build_filter("debug").is_ok());
        assert!(matches!(build_filter("loud"), Err(Error::Config(_))));
    }

    #[test]
    fn test_no_file_means_no_writer() {
        let options = LoggingOptions::default();
        assert!(file_writer(&options).unwrap().is_none());
    }

    #[test]
    fn test_rotation_requires_file_name() {
        let options = LoggingOptions {
            file: Some(PathBuf::from("logs/..")),
            rotation: Some(LogRotation::Daily),
            ..LoggingOptions::default()
        };
        assert!(matches!(file_writer(&options), Err(Error::Config(_))));
    }
}
