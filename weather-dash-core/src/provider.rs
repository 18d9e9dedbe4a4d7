use crate::{
    Config,
    model::{CurrentConditions, Forecast, Location},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Number of forecast entries requested per refresh.
pub const FORECAST_ENTRIES: usize = 5;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions at `location`.
    async fn current(&self, location: &Location) -> anyhow::Result<CurrentConditions>;

    /// Up to `entries` forecast entries for `location`, earliest first.
    async fn forecast(&self, location: &Location, entries: usize) -> anyhow::Result<Forecast>;
}

/// Construct the provider described by `config`.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let provider =
        OpenWeatherProvider::new(config.api_key.clone(), config.units, config.http_timeout)?;

    Ok(Box::new(provider))
}
