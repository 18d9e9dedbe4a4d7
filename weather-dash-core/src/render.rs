//! Text builders for the three dashboard panes.
//!
//! Every function here is a pure function of the snapshot it is given; the
//! dashboard recomputes all panes from one current/forecast pair at a time.

use chrono::{DateTime, FixedOffset, TimeZone};
use std::fmt::Display;

use crate::model::{Condition, CurrentConditions, Forecast, ForecastEntry, Units};

/// Line placed between two forecast blocks.
pub const FORECAST_DIVIDER: &str = "--------------------------------";

const SECTION_DIVIDER: &str = "-----------------";

/// Shown in place of a clock when a timestamp is absent or cannot be represented.
const UNKNOWN_CLOCK: &str = "--:--";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub units: Units,
}

/// Rendered text for the headline and the two content panes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Panes {
    pub headline: String,
    pub current: String,
    pub forecast: String,
}

impl Panes {
    pub fn render(current: &CurrentConditions, forecast: &Forecast, options: RenderOptions) -> Self {
        Self {
            headline: headline(current),
            current: current_panel(current, options),
            forecast: forecast_panel(forecast),
        }
    }
}

/// `HH:MM` for a Unix timestamp, on the clock of `offset`.
pub fn clock_from_unix(ts: i64, offset: FixedOffset) -> String {
    match DateTime::from_timestamp(ts, 0) {
        Some(utc) => clock(&utc.with_timezone(&offset)),
        None => UNKNOWN_CLOCK.to_string(),
    }
}

/// `HH:MM`, zero padded.
pub fn clock<Tz: TimeZone>(dt: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    dt.format("%H:%M").to_string()
}

/// `YYYY/MM/DD HH:MM`, zero padded.
pub fn date_time<Tz: TimeZone>(dt: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    dt.format("%Y/%m/%d %H:%M").to_string()
}

fn phrases(conditions: &[Condition]) -> String {
    conditions.iter().map(Condition::phrase).collect::<Vec<_>>().join(" ")
}

pub fn headline(current: &CurrentConditions) -> String {
    format!("{} - {}", current.location_name, phrases(&current.conditions))
}

pub fn current_panel(current: &CurrentConditions, options: RenderOptions) -> String {
    let unit = options.units.temperature_label();
    let offset = current.utc_offset();

    let sun = |ts: Option<i64>| match ts {
        Some(ts) => clock_from_unix(ts, offset),
        None => UNKNOWN_CLOCK.to_string(),
    };
    let sunrise = sun(current.sunrise);
    let sunset = sun(current.sunset);

    [
        String::new(),
        String::new(),
        format!("   Now: {} {unit}", current.temperature),
        format!(" Feels: {} {unit}", current.feels_like),
        SECTION_DIVIDER.to_string(),
        format!("  High: {} {unit}", current.temp_max),
        format!("   Low: {} {unit}", current.temp_min),
        SECTION_DIVIDER.to_string(),
        format!("   Hum: {} %", current.humidity_pct),
        format!(" Press: {} hPa", current.pressure_hpa),
        SECTION_DIVIDER.to_string(),
        format!("  rise: {sunrise}"),
        format!("   set: {sunset}"),
    ]
    .join("\n")
}

fn forecast_block(entry: &ForecastEntry, offset: FixedOffset) -> String {
    format!(
        " {} - {}\n T:{} F:{} H:{} L:{}",
        date_time(&entry.time.with_timezone(&offset)),
        phrases(&entry.conditions),
        entry.temperature,
        entry.feels_like,
        entry.temp_max,
        entry.temp_min,
    )
}

/// One block per entry, in order, with [`FORECAST_DIVIDER`] between blocks.
pub fn forecast_panel(forecast: &Forecast) -> String {
    let offset = forecast.utc_offset();

    forecast
        .entries
        .iter()
        .map(|entry| forecast_block(entry, offset))
        .collect::<Vec<_>>()
        .join(&format!("\n{FORECAST_DIVIDER}\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(y, mo, d)
            .and_then(|date| date.and_hms_opt(h, mi, 0))
            .expect("valid date")
            .and_utc()
    }

    fn condition(main: &str, description: &str) -> Condition {
        Condition { main: main.into(), description: description.into() }
    }

    fn current() -> CurrentConditions {
        CurrentConditions {
            location_name: "Mountain View".into(),
            conditions: vec![condition("Rain", "light rain"), condition("Mist", "mist")],
            temperature: 12.5,
            feels_like: 11.8,
            temp_max: 14.2,
            temp_min: 10.0,
            humidity_pct: 87,
            pressure_hpa: 1012.0,
            sunrise: Some(at(2023, 11, 14, 6, 5).timestamp()),
            sunset: Some(at(2023, 11, 14, 17, 0).timestamp()),
            utc_offset_secs: 0,
        }
    }

    fn entry(hour: u32, temperature: f64) -> ForecastEntry {
        ForecastEntry {
            time: at(2023, 11, 15, hour, 0),
            conditions: vec![condition("Clouds", "overcast clouds")],
            temperature,
            feels_like: temperature - 1.0,
            temp_max: temperature + 0.5,
            temp_min: temperature - 0.5,
        }
    }

    fn forecast(entries: Vec<ForecastEntry>) -> Forecast {
        Forecast { utc_offset_secs: 0, entries }
    }

    #[test]
    fn clock_is_zero_padded() {
        let utc = FixedOffset::east_opt(0).expect("valid offset");

        assert_eq!(clock(&at(2024, 1, 1, 9, 5)), "09:05");
        assert_eq!(clock(&at(2024, 1, 1, 23, 0)), "23:00");
        assert_eq!(clock_from_unix(at(2024, 1, 1, 0, 7).timestamp(), utc), "00:07");
    }

    #[test]
    fn clock_follows_location_offset() {
        let pacific = FixedOffset::west_opt(8 * 3600).expect("valid offset");
        let ts = at(2024, 1, 1, 17, 30).timestamp();

        assert_eq!(clock_from_unix(ts, pacific), "09:30");
    }

    #[test]
    fn clock_from_out_of_range_timestamp_is_placeholder() {
        let utc = FixedOffset::east_opt(0).expect("valid offset");
        assert_eq!(clock_from_unix(i64::MAX, utc), "--:--");
    }

    #[test]
    fn date_time_is_zero_padded() {
        assert_eq!(date_time(&at(2024, 3, 7, 4, 9)), "2024/03/07 04:09");
    }

    #[test]
    fn headline_has_name_and_every_phrase_in_order() {
        let line = headline(&current());

        assert_eq!(line, "Mountain View - Rain (light rain) Mist (mist)");
    }

    #[test]
    fn headline_without_conditions_still_names_location() {
        let mut snapshot = current();
        snapshot.conditions.clear();

        assert!(headline(&snapshot).starts_with("Mountain View"));
    }

    #[test]
    fn current_panel_layout() {
        let panel = current_panel(&current(), RenderOptions::default());
        let lines: Vec<&str> = panel.lines().collect();

        assert_eq!(lines[0], "");
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], "   Now: 12.5 °C");
        assert_eq!(lines[3], " Feels: 11.8 °C");
        assert_eq!(lines[5], "  High: 14.2 °C");
        assert_eq!(lines[6], "   Low: 10 °C");
        assert_eq!(lines[8], "   Hum: 87 %");
        assert_eq!(lines[9], " Press: 1012 hPa");
        assert_eq!(lines[11], "  rise: 06:05");
        assert_eq!(lines[12], "   set: 17:00");
    }

    #[test]
    fn current_panel_shows_sun_times_on_location_clock() {
        let mut snapshot = current();
        snapshot.utc_offset_secs = 3600;

        let panel = current_panel(&snapshot, RenderOptions::default());

        assert!(panel.contains("  rise: 07:05"));
        assert!(panel.contains("   set: 18:00"));
    }

    #[test]
    fn missing_sun_times_render_placeholder() {
        let mut snapshot = current();
        snapshot.sunrise = None;
        snapshot.sunset = None;

        let panel = current_panel(&snapshot, RenderOptions::default());
        let lines: Vec<&str> = panel.lines().collect();

        assert_eq!(lines[11], "  rise: --:--");
        assert_eq!(lines[12], "   set: --:--");
    }

    #[test]
    fn current_panel_uses_unit_label() {
        let options = RenderOptions { units: Units::Imperial };
        let panel = current_panel(&current(), options);

        assert!(panel.contains("Now: 12.5 °F"));
        assert!(!panel.contains("°C"));
    }

    #[test]
    fn forecast_has_one_block_per_entry_with_dividers_between() {
        let panel = forecast_panel(&forecast(vec![entry(0, 13.0), entry(3, 11.0), entry(6, 9.0)]));

        let blocks: Vec<&str> = panel.split(&format!("\n{FORECAST_DIVIDER}\n")).collect();
        assert_eq!(blocks.len(), 3);
        assert!(blocks[0].starts_with(" 2023/11/15 00:00 - Clouds (overcast clouds)"));
        assert!(blocks[1].starts_with(" 2023/11/15 03:00"));
        assert!(blocks[2].ends_with("T:9 F:8 H:9.5 L:8.5"));

        assert!(!panel.starts_with(FORECAST_DIVIDER));
        assert!(!panel.trim_end().ends_with(FORECAST_DIVIDER));
        assert_eq!(panel.matches(FORECAST_DIVIDER).count(), 2);
    }

    #[test]
    fn single_entry_has_no_divider() {
        let panel = forecast_panel(&forecast(vec![entry(0, 13.0)]));
        assert!(!panel.contains(FORECAST_DIVIDER));
    }

    #[test]
    fn empty_forecast_renders_empty_body() {
        let panel = forecast_panel(&forecast(vec![]));
        assert!(panel.is_empty());
    }

    #[test]
    fn panes_render_from_one_snapshot_pair() {
        let snapshot = forecast(vec![entry(0, 13.0)]);
        let panes = Panes::render(&current(), &snapshot, RenderOptions::default());

        assert_eq!(panes.headline, headline(&current()));
        assert!(panes.current.contains("Now: 12.5"));
        assert!(panes.forecast.contains("T:13"));
    }
}
