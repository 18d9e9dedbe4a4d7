//! Binary crate for the `weather-dash` terminal dashboard.
//!
//! This crate focuses on:
//! - Startup: environment configuration and logging
//! - The refresh loop over timer, input and shutdown signal
//! - Painting the panes rendered by `weather-dash-core`

use weather_dash_core::{Config, Dashboard, RenderOptions, provider_from_config};

mod app;
mod input;
mod logging;
mod tui;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Configuration errors surface before the terminal is touched.
    let config = Config::from_env()?;

    match logging::init(&config) {
        Ok(path) => tracing::info!(log_file = %path.display(), ?config, "starting weather-dash"),
        Err(err) => eprintln!("weather-dash: logging disabled: {err:#}"),
    }

    let provider = provider_from_config(&config)?;
    let dashboard = Dashboard::new(
        provider,
        config.location.clone(),
        RenderOptions { units: config.units },
        config.fail_fast,
    );

    app::run(dashboard, config.refresh_every).await
}
