use std::{fs::OpenOptions, path::PathBuf, sync::Mutex};

use anyhow::Context;
use tracing_subscriber::{fmt::format::FmtSpan, prelude::*, EnvFilter};

const DEFAULT_FILTER: &str = "wall=info,lights=info";
const DEFAULT_LOG_FILE: &str = "wall.log";

/// Sends traces to a file, the terminal itself is taken by the wall.
///
/// `RUST_LOG` overrides the default filter.
pub fn setup_tracing(log_file: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    let log_path = log_file.unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_LOG_FILE));

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("could not open log file {}", log_path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
        .context("tracing was already initialized")?;

    tracing::info!(path = ?log_path, "tracing initialized");

    Ok(log_path)
}
