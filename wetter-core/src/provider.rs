use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    error::{ForecastError, GeoError},
    model::{Coordinates, ForecastResponse},
};

pub mod nominatim;
pub mod open_meteo;

pub use nominatim::NominatimGeocoder;
pub use open_meteo::OpenMeteoClient;

/// Resolves a city name to coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    async fn resolve(&self, city_name: &str) -> Result<Coordinates, GeoError>;
}

/// Retrieves the current, hourly and daily forecast for a position.
#[async_trait]
pub trait ForecastSource: Send + Sync + Debug {
    async fn fetch(&self, coordinates: Coordinates) -> Result<ForecastResponse, ForecastError>;
}

/// Shorten an upstream body for error messages.
pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }

    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path)
}
