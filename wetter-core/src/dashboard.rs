//! One input event in, one outcome out.
//!
//! [`Dashboard`] runs geocoding, forecast retrieval and view model building
//! strictly in sequence. [`DashboardSession`] wraps it for interactive use,
//! where a newer query supersedes one still in flight.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::{
    config::Config,
    error::PipelineError,
    model::GeoQuery,
    provider::{ForecastSource, Geocoder, NominatimGeocoder, OpenMeteoClient},
    view::{ViewModel, ViewModelBuilder},
};

/// Result of handling one input event.
#[derive(Debug)]
pub enum Outcome {
    /// Blank input: nothing was requested and the display stays as it is.
    NoInput,
    Ready(Box<ViewModel>),
    Failed(PipelineError),
    /// A newer query was submitted before this one finished.
    Superseded,
}

/// What the renderer shows after an outcome: either a full dashboard or a
/// status message with every slot cleared.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayState {
    pub status: String,
    pub city_label: String,
    pub view: Option<ViewModel>,
}

impl Outcome {
    /// `None` when the current display must be left untouched.
    pub fn display_state(&self) -> Option<DisplayState> {
        match self {
            Outcome::NoInput | Outcome::Superseded => None,
            Outcome::Ready(vm) => Some(DisplayState {
                status: String::new(),
                city_label: vm.city_label.clone(),
                view: Some(vm.as_ref().clone()),
            }),
            Outcome::Failed(err) => Some(DisplayState {
                status: err.user_message().to_string(),
                city_label: String::new(),
                view: None,
            }),
        }
    }
}

/// The geocode -> forecast -> build pipeline.
#[derive(Debug, Clone)]
pub struct Dashboard {
    geocoder: Arc<dyn Geocoder>,
    forecast: Arc<dyn ForecastSource>,
    builder: ViewModelBuilder,
}

impl Dashboard {
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        forecast: Arc<dyn ForecastSource>,
        builder: ViewModelBuilder,
    ) -> Self {
        Self { geocoder, forecast, builder }
    }

    /// Wire up the Nominatim and Open-Meteo clients described by `config`.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let geocoder = NominatimGeocoder::new(&config.geocoder)?;
        let forecast = OpenMeteoClient::new(&config.forecast)?;
        let builder = ViewModelBuilder::new(config.timezone()?);

        Ok(Self::new(Arc::new(geocoder), Arc::new(forecast), builder))
    }

    /// Handle one committed input.
    pub async fn run(&self, raw_input: &str, now: DateTime<Utc>) -> Outcome {
        match GeoQuery::parse(raw_input) {
            None => Outcome::NoInput,
            Some(query) => into_outcome(self.execute(&query, now).await),
        }
    }

    pub async fn execute(
        &self,
        query: &GeoQuery,
        now: DateTime<Utc>,
    ) -> Result<ViewModel, PipelineError> {
        let coordinates = self.geocoder.resolve(&query.city_name).await?;
        let forecast = self.forecast.fetch(coordinates).await?;
        let view = self.builder.build(&query.city_name, coordinates, &forecast, now)?;

        info!(
            city = %query.city_name,
            hourly = view.hourly.len(),
            today = view.today.len(),
            daily = view.daily.len(),
            "Dashboard ready"
        );
        Ok(view)
    }
}

fn into_outcome(result: Result<ViewModel, PipelineError>) -> Outcome {
    match result {
        Ok(view) => Outcome::Ready(Box::new(view)),
        Err(err) => {
            warn!("Dashboard query failed: {err}");
            Outcome::Failed(err)
        }
    }
}

/// Interactive front of a [`Dashboard`]: only the latest submission may
/// produce a result.
#[derive(Debug)]
pub struct DashboardSession {
    dashboard: Dashboard,
    generation: AtomicU64,
    in_flight: Mutex<Option<CancellationToken>>,
}

impl DashboardSession {
    pub fn new(dashboard: Dashboard) -> Self {
        Self {
            dashboard,
            generation: AtomicU64::new(0),
            in_flight: Mutex::new(None),
        }
    }

    /// Submit a new input. Blank input is ignored and does not cancel the
    /// query in flight; anything else cancels it.
    pub async fn submit(&self, raw_input: &str, now: DateTime<Utc>) -> Outcome {
        let Some(query) = GeoQuery::parse(raw_input) else {
            return Outcome::NoInput;
        };

        let token = CancellationToken::new();
        let generation = {
            let mut slot = self.in_flight.lock();
            if let Some(previous) = slot.replace(token.clone()) {
                previous.cancel();
            }
            self.generation.fetch_add(1, Ordering::SeqCst) + 1
        };

        let result = tokio::select! {
            biased;
            _ = token.cancelled() => {
                debug!(city = %query.city_name, generation, "Query cancelled");
                return Outcome::Superseded;
            }
            result = self.dashboard.execute(&query, now) => result,
        };

        {
            let mut slot = self.in_flight.lock();
            if self.generation.load(Ordering::SeqCst) != generation {
                debug!(city = %query.city_name, generation, "Discarding stale result");
                return Outcome::Superseded;
            }
            *slot = None;
        }

        into_outcome(result)
    }

    /// Cancel whatever is in flight, e.g. when the user quits.
    pub fn cancel(&self) {
        if let Some(token) = self.in_flight.lock().take() {
            token.cancel();
            self.generation.fetch_add(1, Ordering::SeqCst);
        }
    }
}
