//! Core library for the `wetter` dashboard.
//!
//! This crate defines:
//! - City lookup (Nominatim) and forecast retrieval (Open-Meteo)
//! - Classifier tables for weather codes, temperature and wind
//! - The view model the dashboard renders, and the pipeline producing it
//! - Configuration handling
//!
//! It is used by `wetter-cli`, but any renderer can consume [`Outcome`] and
//! [`ViewModel`] directly.

pub mod classify;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod model;
pub mod provider;
pub mod view;

pub use config::{Config, ForecastConfig, GeocoderConfig};
pub use dashboard::{Dashboard, DashboardSession, DisplayState, Outcome};
pub use error::{ForecastError, GeoError, PipelineError};
pub use model::{Coordinates, CurrentWeather, DailyPoint, ForecastResponse, GeoQuery, HourlyPoint};
pub use provider::{ForecastSource, Geocoder, NominatimGeocoder, OpenMeteoClient};
pub use view::{DisplayMode, SummaryCard, ViewModel, ViewModelBuilder};
