use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use crate::{
    config::ForecastConfig,
    error::ForecastError,
    model::{Coordinates, ForecastResponse},
};

use super::{ForecastSource, endpoint, truncate_body};

const HOURLY_VARIABLES: &str = "temperature_2m,precipitation,cloudcover,windspeed_10m";
const DAILY_VARIABLES: &str = "temperature_2m_max,temperature_2m_min,precipitation_sum";

/// Forecast retrieval from the Open-Meteo API (no API key needed).
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    base_url: String,
    timezone: String,
    http: Client,
}

impl OpenMeteoClient {
    pub fn new(config: &ForecastConfig) -> Result<Self, ForecastError> {
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ForecastError::Network(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: config.base_url.clone(),
            timezone: config.timezone.clone(),
            http,
        })
    }
}

#[async_trait]
impl ForecastSource for OpenMeteoClient {
    async fn fetch(&self, coordinates: Coordinates) -> Result<ForecastResponse, ForecastError> {
        let url = endpoint(&self.base_url, "forecast");
        let latitude = coordinates.latitude().to_string();
        let longitude = coordinates.longitude().to_string();
        debug!(%url, %latitude, %longitude, "Forecast request");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("latitude", latitude.as_str()),
                ("longitude", longitude.as_str()),
                ("current_weather", "true"),
                ("hourly", HOURLY_VARIABLES),
                ("daily", DAILY_VARIABLES),
                ("timezone", self.timezone.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                warn!(timeout = e.is_timeout(), "Forecast request failed: {e}");
                ForecastError::Network(e.to_string())
            })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| ForecastError::Network(format!("Failed to read forecast response: {e}")))?;

        if !status.is_success() {
            return Err(ForecastError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        let parsed: ForecastResponse = serde_json::from_str(&body)
            .map_err(|e| ForecastError::Parse(format!("Failed to parse forecast JSON: {e}")))?;
        parsed.validate()?;

        debug!(
            hourly = parsed.hourly.time.len(),
            daily = parsed.daily.time.len(),
            "Forecast received"
        );
        Ok(parsed)
    }
}
