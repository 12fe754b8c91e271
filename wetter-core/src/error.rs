use thiserror::Error;

/// Message shown when the geocoder finds no city for the input.
pub const MSG_INVALID_CITY: &str = "Stadt ungültig";

/// Generic message for every other failure of a dashboard query.
pub const MSG_GENERIC_ERROR: &str = "Fehler beim Abrufen der Daten";

/// Failures of a city lookup.
#[derive(Debug, Error)]
pub enum GeoError {
    /// Transport failure, timeout, error status or a body that is not a candidate list.
    #[error("Geocoding request failed: {0}")]
    Network(String),

    /// The service answered with zero candidates.
    #[error("No city found for '{0}'")]
    NotFound(String),

    /// A candidate was returned but its coordinates are unusable.
    #[error("Geocoding response could not be parsed: {0}")]
    Parse(String),
}

/// Failures of a forecast retrieval or of turning its payload into series.
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("Forecast request failed: {0}")]
    Network(String),

    #[error("Forecast service answered with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Forecast payload is malformed: {0}")]
    Parse(String),
}

/// A failed dashboard query, as seen by the renderer.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("City not found: {0}")]
    CityNotFound(String),

    #[error(transparent)]
    Geocoding(GeoError),

    #[error(transparent)]
    Forecast(#[from] ForecastError),
}

impl From<GeoError> for PipelineError {
    fn from(err: GeoError) -> Self {
        match err {
            GeoError::NotFound(city) => PipelineError::CityNotFound(city),
            other => PipelineError::Geocoding(other),
        }
    }
}

impl PipelineError {
    /// The single status line the renderer shows for this failure.
    pub fn user_message(&self) -> &'static str {
        match self {
            PipelineError::CityNotFound(_) => MSG_INVALID_CITY,
            PipelineError::Geocoding(_) | PipelineError::Forecast(_) => MSG_GENERIC_ERROR,
        }
    }
}
