use assert_cmd::{Command, cargo::cargo_bin_cmd};
use predicates::prelude::*;

fn dashboard(vars: &[(&str, &str)]) -> Command {
    let mut cmd = cargo_bin_cmd!("weather-dash");
    cmd.env_clear();
    for (name, value) in vars {
        cmd.env(name, value);
    }
    cmd
}

/// Invalid configuration must fail before the terminal is touched, so
/// nothing at all is written to stdout.
fn assert_config_error(vars: &[(&str, &str)], expected: &str) {
    dashboard(vars)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(expected));
}

#[test]
fn missing_zip_is_reported_first() {
    assert_config_error(&[], "WEATHER_LOCATION_ZIP not set");
}

#[test]
fn zero_zip_is_rejected() {
    assert_config_error(
        &[("WEATHER_LOCATION_ZIP", "0")],
        "WEATHER_LOCATION_ZIP must be a non-zero integer",
    );
}

#[test]
fn non_numeric_zip_is_rejected() {
    assert_config_error(&[("WEATHER_LOCATION_ZIP", "abc")], "got 'abc'");
}

#[test]
fn missing_locale_is_named() {
    assert_config_error(
        &[
            ("WEATHER_LOCATION_ZIP", "94040"),
            ("WEATHER_COUNTRY_CODE", "us"),
            ("OWM_API_KEY", "KEY"),
        ],
        "WEATHER_LOCALE not set",
    );
}

#[test]
fn missing_country_code_is_named() {
    assert_config_error(
        &[("WEATHER_LOCATION_ZIP", "94040"), ("WEATHER_LOCALE", "en"), ("OWM_API_KEY", "KEY")],
        "WEATHER_COUNTRY_CODE not set",
    );
}

#[test]
fn missing_api_key_is_named() {
    assert_config_error(
        &[("WEATHER_LOCATION_ZIP", "94040"), ("WEATHER_LOCALE", "en"), ("WEATHER_COUNTRY_CODE", "us")],
        "OWM_API_KEY not set",
    );
}
