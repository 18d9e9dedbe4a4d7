use directories::ProjectDirs;
use std::{path::PathBuf, time::Duration};
use thiserror::Error;

use crate::model::{Location, Units};

pub const API_KEY_VAR: &str = "OWM_API_KEY";
pub const LOCALE_VAR: &str = "WEATHER_LOCALE";
pub const COUNTRY_CODE_VAR: &str = "WEATHER_COUNTRY_CODE";
pub const ZIP_VAR: &str = "WEATHER_LOCATION_ZIP";

pub const UNITS_VAR: &str = "WEATHER_UNITS";
pub const REFRESH_SECS_VAR: &str = "WEATHER_REFRESH_SECS";
pub const HTTP_TIMEOUT_SECS_VAR: &str = "WEATHER_HTTP_TIMEOUT_SECS";
pub const FAIL_FAST_VAR: &str = "WEATHER_FAIL_FAST";
pub const LOG_FILE_VAR: &str = "WEATHER_LOG_FILE";

const DEFAULT_REFRESH: Duration = Duration::from_secs(60);
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} not set")]
    Missing(&'static str),

    #[error("WEATHER_LOCATION_ZIP must be a non-zero integer, got '{0}'")]
    InvalidZip(String),

    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Runtime configuration, read once from the environment at startup.
#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub location: Location,
    pub units: Units,

    /// Period between two refresh cycles.
    pub refresh_every: Duration,

    /// Upper bound for a single provider request.
    pub http_timeout: Duration,

    /// Exit on the first failed refresh instead of showing an error indicator.
    pub fail_fast: bool,

    /// Explicit log file; `None` means the platform default (see [`Config::log_file_path`]).
    pub log_file: Option<PathBuf>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("location", &self.location)
            .field("units", &self.units)
            .field("refresh_every", &self.refresh_every)
            .field("http_timeout", &self.http_timeout)
            .field("fail_fast", &self.fail_fast)
            .field("log_file", &self.log_file)
            .finish()
    }
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Required values are checked in a fixed order (ZIP, locale, country code,
    /// API key) and the first failure is returned.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let postal_code = parse_zip(lookup(ZIP_VAR))?;
        let locale = required(&lookup, LOCALE_VAR)?;
        let country_code = required(&lookup, COUNTRY_CODE_VAR)?;
        let api_key = required(&lookup, API_KEY_VAR)?;

        let units = match non_empty(lookup(UNITS_VAR)) {
            Some(value) => Units::try_from(value.as_str()).map_err(|reason| {
                ConfigError::Invalid { var: UNITS_VAR, reason }
            })?,
            None => Units::default(),
        };

        let refresh_every = seconds(&lookup, REFRESH_SECS_VAR)?.unwrap_or(DEFAULT_REFRESH);
        let http_timeout =
            seconds(&lookup, HTTP_TIMEOUT_SECS_VAR)?.unwrap_or(DEFAULT_HTTP_TIMEOUT);

        let fail_fast = match non_empty(lookup(FAIL_FAST_VAR)) {
            Some(value) => parse_flag(&value).ok_or_else(|| ConfigError::Invalid {
                var: FAIL_FAST_VAR,
                reason: format!("expected a boolean, got '{value}'"),
            })?,
            None => false,
        };

        let log_file = non_empty(lookup(LOG_FILE_VAR)).map(PathBuf::from);

        Ok(Self {
            api_key,
            location: Location { postal_code, country_code, locale },
            units,
            refresh_every,
            http_timeout,
            fail_fast,
            log_file,
        })
    }

    /// Path the log file is written to: the explicit override, or the
    /// platform cache directory.
    pub fn log_file_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.log_file {
            return Some(path.clone());
        }

        ProjectDirs::from("dev", "weather-dash", "weather-dash")
            .map(|dirs| dirs.cache_dir().join("weather-dash.log"))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn required<F>(lookup: &F, var: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    non_empty(lookup(var)).ok_or(ConfigError::Missing(var))
}

fn parse_zip(value: Option<String>) -> Result<String, ConfigError> {
    let zip = non_empty(value).ok_or(ConfigError::Missing(ZIP_VAR))?;

    match zip.parse::<i64>() {
        Ok(n) if n != 0 => Ok(zip),
        _ => Err(ConfigError::InvalidZip(zip)),
    }
}

fn seconds<F>(lookup: &F, var: &'static str) -> Result<Option<Duration>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = non_empty(lookup(var)) else {
        return Ok(None);
    };

    match value.parse::<u64>() {
        Ok(n) if n > 0 => Ok(Some(Duration::from_secs(n))),
        _ => Err(ConfigError::Invalid {
            var,
            reason: format!("expected a positive number of seconds, got '{value}'"),
        }),
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
