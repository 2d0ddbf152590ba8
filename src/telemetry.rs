//! Tracing subscriber setup
//!
//! Log lines go to the console and are appended to the configured log file.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Arc;

use tracing::{warn, Level};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. If the log file can't
/// be opened the proxy keeps running with console output only.
pub fn init_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(config.level)));

    let (file_layer, file_error) = match open_log_file(&config.file) {
        Ok(file) => (
            Some(
                fmt::layer()
                    .with_writer(Arc::new(file))
                    .with_ansi(false)
                    .with_target(true),
            ),
            None,
        ),
        Err(e) => (None, Some(e)),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .with(file_layer)
        .init();

    if let Some(e) = file_error {
        warn!(
            path = %config.file.display(),
            error = %e,
            "Could not open log file, logging to console only"
        );
    }
}

/// Filter directives used when `RUST_LOG` is not set
pub fn default_directives(level: Level) -> String {
    let level = level.to_string().to_lowercase();
    format!("litellm_proxy={level},tower_http={level}")
}

/// Open the log file for appending, creating it if needed
pub fn open_log_file(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}
