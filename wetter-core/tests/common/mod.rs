//! Shared fixtures for the HTTP-level tests.

#![allow(dead_code)]

use chrono::{DateTime, Utc};
use wetter_core::{Config, ForecastConfig, GeocoderConfig};
use wiremock::MockServer;

pub const HOURLY_LEN: usize = 48;
pub const DAILY_LEN: usize = 2;

/// Open-Meteo style payload for Berlin: overcast, 8.2 °C, 14 km/h wind,
/// 48 hours over 2024-01-15 and 2024-01-16.
pub fn forecast_fixture() -> serde_json::Value {
    let time: Vec<String> = (0..HOURLY_LEN)
        .map(|i| format!("2024-01-{:02}T{:02}:00", 15 + i / 24, i % 24))
        .collect();
    let temperature: Vec<f64> = (0..HOURLY_LEN).map(|i| 2.0 + (i % 24) as f64 * 0.5).collect();
    let precipitation: Vec<f64> = (0..HOURLY_LEN).map(|i| if i % 6 == 0 { 0.4 } else { 0.0 }).collect();

    serde_json::json!({
        "latitude": 52.52,
        "longitude": 13.405,
        "timezone": "Europe/Berlin",
        "utc_offset_seconds": 3600,
        "current_weather": {
            "temperature": 8.2,
            "windspeed": 14.0,
            "winddirection": 240,
            "weathercode": 3,
            "time": "2024-01-15T10:00"
        },
        "hourly": {
            "time": time,
            "temperature_2m": temperature,
            "precipitation": precipitation,
            "cloudcover": vec![75.0; HOURLY_LEN],
            "windspeed_10m": vec![14.0; HOURLY_LEN]
        },
        "daily": {
            "time": ["2024-01-15", "2024-01-16"],
            "temperature_2m_max": [13.5, 12.0],
            "temperature_2m_min": [2.0, 1.5],
            "precipitation_sum": [1.6, 0.0]
        }
    })
}

pub fn berlin_candidates() -> serde_json::Value {
    serde_json::json!([{
        "place_id": 240109189,
        "lat": "52.52",
        "lon": "13.405",
        "display_name": "Berlin, Deutschland",
        "type": "city"
    }])
}

/// 10:00 UTC on 2024-01-15, i.e. 11:00 in Berlin.
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2024-01-15T10:00:00Z")
        .map(|dt| dt.with_timezone(&Utc))
        .expect("valid timestamp")
}

pub fn geocoder_config(server: &MockServer, timeout_secs: u64) -> GeocoderConfig {
    GeocoderConfig {
        base_url: server.uri(),
        timeout_secs,
        ..Default::default()
    }
}

pub fn forecast_config(server: &MockServer) -> ForecastConfig {
    ForecastConfig {
        base_url: server.uri(),
        timeout_secs: 5,
        ..Default::default()
    }
}

/// Both services pointed at the same mock server.
pub fn mock_config(server: &MockServer) -> Config {
    Config {
        geocoder: geocoder_config(server, 5),
        forecast: forecast_config(server),
    }
}
