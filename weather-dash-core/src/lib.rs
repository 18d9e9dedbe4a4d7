//! Core library for the `weather-dash` terminal dashboard.
//!
//! This crate defines:
//! - Environment configuration
//! - The weather provider abstraction and its OpenWeatherMap implementation
//! - Snapshot models and the text rendering of dashboard panes
//! - Dashboard state: refresh cycle and input dispatch
//!
//! It has no terminal dependency; `weather-dash` paints what this crate renders.

pub mod config;
pub mod dashboard;
pub mod model;
pub mod provider;
pub mod render;

pub use config::{Config, ConfigError};
pub use dashboard::{Dashboard, InputEvent, Transition};
pub use model::{Condition, CurrentConditions, Forecast, ForecastEntry, Location, Units};
pub use provider::{WeatherProvider, provider_from_config};
pub use render::{Panes, RenderOptions};
