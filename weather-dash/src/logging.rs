use anyhow::{Context, Result, anyhow};
use std::{
    fs::{self, File, OpenOptions},
    path::{Path, PathBuf},
    sync::Mutex,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use weather_dash_core::Config;

const DEFAULT_FILTER: &str = "weather_dash=info,weather_dash_core=info";

/// Install the global subscriber, writing to the configured log file.
///
/// The terminal belongs to the dashboard while it runs, so nothing is ever
/// logged to stdout or stderr. Returns the path being written to.
pub fn init(config: &Config) -> Result<PathBuf> {
    let path = config
        .log_file_path()
        .ok_or_else(|| anyhow!("Could not determine platform cache directory"))?;

    let file = open(&path)?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(path)
}

fn open(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))
}
