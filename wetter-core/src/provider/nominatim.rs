use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{config::GeocoderConfig, error::GeoError, model::Coordinates};

use super::{Geocoder, endpoint, truncate_body};

/// City lookup against OpenStreetMap Nominatim, restricted to one country.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    base_url: String,
    country_code: String,
    http: Client,
}

/// Nominatim sends coordinates as strings; numbers are accepted as well.
#[derive(Debug, Deserialize)]
struct NominatimCandidate {
    lat: Option<Value>,
    lon: Option<Value>,
}

impl NominatimGeocoder {
    pub fn new(config: &GeocoderConfig) -> Result<Self, GeoError> {
        let http = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| GeoError::Network(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: config.base_url.clone(),
            country_code: config.country_code.clone(),
            http,
        })
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn resolve(&self, city_name: &str) -> Result<Coordinates, GeoError> {
        let url = endpoint(&self.base_url, "search");
        debug!(city = city_name, %url, "Geocoding request");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", city_name),
                ("countrycodes", self.country_code.as_str()),
                ("format", "json"),
                ("limit", "1"),
            ])
            .send()
            .await
            .map_err(|e| {
                warn!(city = city_name, timeout = e.is_timeout(), "Geocoding request failed: {e}");
                GeoError::Network(e.to_string())
            })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| GeoError::Network(format!("Failed to read geocoding response: {e}")))?;

        if !status.is_success() {
            return Err(GeoError::Network(format!(
                "Geocoding request failed with status {}: {}",
                status,
                truncate_body(&body),
            )));
        }

        let candidates: Vec<NominatimCandidate> = serde_json::from_str(&body).map_err(|e| {
            GeoError::Network(format!("Malformed geocoding response: {e}"))
        })?;

        let first = candidates
            .into_iter()
            .next()
            .ok_or_else(|| GeoError::NotFound(city_name.to_string()))?;

        let coordinates = candidate_coordinates(&first)?;
        info!(
            city = city_name,
            lat = coordinates.latitude(),
            lon = coordinates.longitude(),
            "Resolved city"
        );
        Ok(coordinates)
    }
}

fn candidate_coordinates(candidate: &NominatimCandidate) -> Result<Coordinates, GeoError> {
    let lat = coordinate(candidate.lat.as_ref(), "lat")?;
    let lon = coordinate(candidate.lon.as_ref(), "lon")?;

    Coordinates::new(lat, lon)
        .ok_or_else(|| GeoError::Parse(format!("Coordinates out of range: {lat}, {lon}")))
}

fn coordinate(value: Option<&Value>, field: &str) -> Result<f64, GeoError> {
    let parsed = match value {
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(Value::Number(n)) => n.as_f64(),
        _ => None,
    };

    parsed.ok_or_else(|| GeoError::Parse(format!("Candidate field '{field}' is missing or not numeric")))
}
