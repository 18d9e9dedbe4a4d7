use chrono::{DateTime, FixedOffset, Offset, Utc};

/// The fixed place the dashboard reports on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Postal code as configured; validated numeric, leading zeros kept.
    pub postal_code: String,
    pub country_code: String,
    pub locale: String,
}

impl Location {
    /// `zip` query value understood by the provider, e.g. `94040,us`.
    pub fn zip_query(&self) -> String {
        format!("{},{}", self.postal_code, self.country_code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Units {
    #[default]
    Metric,
    Imperial,
    Standard,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
            Units::Standard => "standard",
        }
    }

    pub fn temperature_label(&self) -> &'static str {
        match self {
            Units::Metric => "°C",
            Units::Imperial => "°F",
            Units::Standard => "K",
        }
    }
}

impl std::fmt::Display for Units {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Units {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "metric" => Ok(Units::Metric),
            "imperial" => Ok(Units::Imperial),
            "standard" => Ok(Units::Standard),
            _ => Err(format!(
                "unknown units '{value}', expected one of: metric, imperial, standard"
            )),
        }
    }
}

/// One weather condition as reported by the provider, e.g. `Rain (light rain)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub main: String,
    pub description: String,
}

impl Condition {
    pub fn phrase(&self) -> String {
        format!("{} ({})", self.main, self.description)
    }
}

/// Point-in-time reading for the location.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub location_name: String,
    pub conditions: Vec<Condition>,
    pub temperature: f64,
    pub feels_like: f64,
    pub temp_max: f64,
    pub temp_min: f64,
    pub humidity_pct: u8,
    pub pressure_hpa: f64,
    /// Unix seconds; `None` when the provider reports no sunrise, as in polar day or night.
    pub sunrise: Option<i64>,
    pub sunset: Option<i64>,
    /// Shift of the location's local clock from UTC, in seconds.
    pub utc_offset_secs: i32,
}

impl CurrentConditions {
    pub fn utc_offset(&self) -> FixedOffset {
        offset_or_utc(self.utc_offset_secs)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastEntry {
    pub time: DateTime<Utc>,
    pub conditions: Vec<Condition>,
    pub temperature: f64,
    pub feels_like: f64,
    pub temp_max: f64,
    pub temp_min: f64,
}

/// Ordered forecast entries, earliest first.
#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    pub utc_offset_secs: i32,
    pub entries: Vec<ForecastEntry>,
}

impl Forecast {
    pub fn utc_offset(&self) -> FixedOffset {
        offset_or_utc(self.utc_offset_secs)
    }
}

fn offset_or_utc(secs: i32) -> FixedOffset {
    FixedOffset::east_opt(secs).unwrap_or_else(|| Utc.fix())
}
