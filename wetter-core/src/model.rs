use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::ForecastError;

/// A committed city name. Blank input never becomes a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoQuery {
    pub city_name: String,
}

impl GeoQuery {
    /// Trim the raw input; `None` means there is nothing to look up.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        Some(Self { city_name: trimmed.to_string() })
    }
}

/// A resolved position. Always within the valid latitude/longitude ranges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return None;
        }
        Some(Self { latitude, longitude })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrentWeather {
    pub temperature_c: f64,
    pub wind_speed_kmh: f64,
    pub weather_code: i32,
}

/// One hour of the forecast, stamped in the forecast zone.
///
/// `None` marks a value the forecast source left out for that hour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourlyPoint {
    pub timestamp: DateTime<Tz>,
    pub temperature_c: Option<f64>,
    pub precipitation_mm: Option<f64>,
    pub cloud_cover_pct: Option<f64>,
    pub wind_speed_kmh: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub temp_max_c: Option<f64>,
    pub temp_min_c: Option<f64>,
    pub precipitation_sum_mm: Option<f64>,
}

/// Forecast payload as delivered by Open-Meteo.
///
/// Each section is a set of parallel arrays sharing the `time` axis.
/// Use [`ForecastResponse::validate`] before indexing into them. Series
/// values are `null` where the source has no data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResponse {
    /// Offset of the wall-clock labels on both `time` axes.
    #[serde(default)]
    pub utc_offset_seconds: Option<i32>,
    pub current_weather: CurrentWeatherPayload,
    pub hourly: HourlyPayload,
    pub daily: DailyPayload,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeatherPayload {
    pub temperature: f64,
    pub windspeed: f64,
    pub weathercode: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyPayload {
    pub time: Vec<String>,
    pub temperature_2m: Vec<Option<f64>>,
    pub precipitation: Vec<Option<f64>>,
    pub cloudcover: Vec<Option<f64>>,
    pub windspeed_10m: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPayload {
    pub time: Vec<String>,
    pub temperature_2m_max: Vec<Option<f64>>,
    pub temperature_2m_min: Vec<Option<f64>>,
    pub precipitation_sum: Vec<Option<f64>>,
}

impl ForecastResponse {
    /// Check that every series has exactly one value per timestamp.
    pub fn validate(&self) -> Result<(), ForecastError> {
        let hourly = &self.hourly;
        check_lengths(
            "hourly",
            hourly.time.len(),
            &[
                ("temperature_2m", hourly.temperature_2m.len()),
                ("precipitation", hourly.precipitation.len()),
                ("cloudcover", hourly.cloudcover.len()),
                ("windspeed_10m", hourly.windspeed_10m.len()),
            ],
        )?;

        let daily = &self.daily;
        check_lengths(
            "daily",
            daily.time.len(),
            &[
                ("temperature_2m_max", daily.temperature_2m_max.len()),
                ("temperature_2m_min", daily.temperature_2m_min.len()),
                ("precipitation_sum", daily.precipitation_sum.len()),
            ],
        )
    }
}

fn check_lengths(
    section: &str,
    expected: usize,
    series: &[(&str, usize)],
) -> Result<(), ForecastError> {
    for (name, len) in series {
        if *len != expected {
            return Err(ForecastError::Parse(format!(
                "{section}.{name} has {len} values but {section}.time has {expected}"
            )));
        }
    }
    Ok(())
}
