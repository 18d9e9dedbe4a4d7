use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::model::{Condition, CurrentConditions, Forecast, ForecastEntry, Location, Units};

use super::WeatherProvider;

const BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
const USER_AGENT: &str = concat!("weather-dash/", env!("CARGO_PKG_VERSION"));

#[derive(Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    units: Units,
    http: Client,
}

impl std::fmt::Debug for OpenWeatherProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherProvider")
            .field("units", &self.units)
            .finish_non_exhaustive()
    }
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, units: Units, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client for OpenWeather")?;

        Ok(Self { api_key, units, http })
    }

    /// GET `endpoint` for `location` and return the body of a successful response.
    async fn fetch(
        &self,
        endpoint: &str,
        what: &str,
        location: &Location,
        extra: &[(&str, String)],
    ) -> Result<String> {
        let url = format!("{BASE_URL}/{endpoint}");

        let mut query: Vec<(&str, String)> = vec![
            ("zip", location.zip_query()),
            ("appid", self.api_key.clone()),
            ("units", self.units.as_str().to_string()),
            ("lang", location.locale.clone()),
        ];
        query.extend(extra.iter().cloned());

        tracing::debug!(endpoint, zip = %location.zip_query(), "requesting OpenWeather {what}");

        let res = self
            .http
            .get(&url)
            .query(&query)
            .send()
            .await
            .with_context(|| format!("Failed to send request to OpenWeather ({what})"))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .with_context(|| format!("Failed to read OpenWeather {what} response body"))?;

        if !status.is_success() {
            return Err(anyhow!(
                "OpenWeather {} request failed with status {}: {}",
                what,
                status,
                truncate_body(&body),
            ));
        }

        Ok(body)
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    #[serde(default)]
    pressure: f64,
    #[serde(default)]
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
}

/// Sunrise and sunset are left out for places in polar day or night.
#[derive(Debug, Default, Deserialize)]
struct OwSys {
    #[serde(default)]
    sunrise: Option<i64>,
    #[serde(default)]
    sunset: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    #[serde(default)]
    timezone: i32,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
    #[serde(default)]
    sys: OwSys,
}

#[derive(Debug, Deserialize)]
struct OwCity {
    #[serde(default)]
    timezone: i32,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    city: OwCity,
    #[serde(default)]
    list: Vec<OwForecastEntry>,
}

fn conditions(weather: Vec<OwWeather>) -> Vec<Condition> {
    weather
        .into_iter()
        .map(|w| Condition { main: w.main, description: w.description })
        .collect()
}

fn parse_current(body: &str) -> Result<CurrentConditions> {
    let parsed: OwCurrentResponse =
        serde_json::from_str(body).context("Failed to parse OpenWeather current JSON")?;

    Ok(CurrentConditions {
        location_name: parsed.name,
        conditions: conditions(parsed.weather),
        temperature: parsed.main.temp,
        feels_like: parsed.main.feels_like,
        temp_max: parsed.main.temp_max,
        temp_min: parsed.main.temp_min,
        humidity_pct: parsed.main.humidity,
        pressure_hpa: parsed.main.pressure,
        sunrise: parsed.sys.sunrise,
        sunset: parsed.sys.sunset,
        utc_offset_secs: parsed.timezone,
    })
}

fn parse_forecast(body: &str, entries: usize) -> Result<Forecast> {
    let parsed: OwForecastResponse =
        serde_json::from_str(body).context("Failed to parse OpenWeather forecast JSON")?;

    let entries = parsed
        .list
        .into_iter()
        .take(entries)
        .map(|entry| {
            Ok(ForecastEntry {
                time: unix_to_utc(entry.dt)?,
                conditions: conditions(entry.weather),
                temperature: entry.main.temp,
                feels_like: entry.main.feels_like,
                temp_max: entry.main.temp_max,
                temp_min: entry.main.temp_min,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Forecast {
        utc_offset_secs: parsed.city.timezone,
        entries,
    })
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, location: &Location) -> Result<CurrentConditions> {
        let body = self.fetch("weather", "current weather", location, &[]).await?;
        parse_current(&body)
    }

    async fn forecast(&self, location: &Location, entries: usize) -> Result<Forecast> {
        let cnt = [("cnt", entries.to_string())];
        let body = self.fetch("forecast", "forecast", location, &cnt).await?;
        parse_forecast(&body, entries)
    }
}

fn unix_to_utc(ts: i64) -> Result<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(ts, 0)
        .ok_or_else(|| anyhow!("OpenWeather returned an out-of-range timestamp: {ts}"))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
