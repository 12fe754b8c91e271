//! Assembles forecast data into what the dashboard displays.
//!
//! The builder never reads the clock: "today" is decided by the `now` passed
//! in, so identical inputs always produce identical view models.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;

use crate::{
    classify::Conditions,
    error::ForecastError,
    model::{Coordinates, CurrentWeather, DailyPoint, ForecastResponse, HourlyPoint},
};

pub const PRECIPITATION_CHART_TITLE: &str = "Niederschlag (stündlich)";
pub const DAILY_CHART_TITLE: &str = "Min / Max Temperatur & Niederschlag je Tag";

const HOURLY_FORMAT: &str = "%Y-%m-%dT%H:%M";
const DAILY_FORMAT: &str = "%Y-%m-%d";

/// Which part of the hourly series the temperature chart shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    Today,
    #[default]
    FullHorizon,
}

impl DisplayMode {
    pub fn toggled(self) -> Self {
        match self {
            DisplayMode::Today => DisplayMode::FullHorizon,
            DisplayMode::FullHorizon => DisplayMode::Today,
        }
    }

    /// Label of the toggle button selecting this mode.
    pub fn label(self) -> &'static str {
        match self {
            DisplayMode::Today => "Heute",
            DisplayMode::FullHorizon => "7 Tage",
        }
    }

    pub fn temperature_title(self) -> &'static str {
        match self {
            DisplayMode::Today => "Temperaturverlauf - Heute",
            DisplayMode::FullHorizon => "Temperaturverlauf - Nächste 7 Tage",
        }
    }
}

/// One of the three summary cards.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryCard {
    pub title: &'static str,
    pub icon: &'static str,
    pub value: String,
}

/// The hourly temperature chart in one display mode.
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureChart<'a> {
    pub title: &'static str,
    pub points: &'a [HourlyPoint],
    /// First and last timestamp shown; `None` when there is nothing to show.
    pub range: Option<(DateTime<Tz>, DateTime<Tz>)>,
}

/// Everything the renderer needs for one successfully resolved city.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    pub city_name: String,
    pub city_label: String,
    pub coordinates: Coordinates,
    pub current: CurrentWeather,
    pub conditions: Conditions,
    pub cards: Vec<SummaryCard>,
    pub hourly: Vec<HourlyPoint>,
    pub today: Vec<HourlyPoint>,
    pub daily: Vec<DailyPoint>,
}

impl ViewModel {
    /// The hourly series for the given mode, without re-deriving anything.
    pub fn hourly_for(&self, mode: DisplayMode) -> &[HourlyPoint] {
        match mode {
            DisplayMode::Today => &self.today,
            DisplayMode::FullHorizon => &self.hourly,
        }
    }

    pub fn temperature_chart(&self, mode: DisplayMode) -> TemperatureChart<'_> {
        let points = self.hourly_for(mode);
        let range = points
            .first()
            .zip(points.last())
            .map(|(first, last)| (first.timestamp, last.timestamp));

        TemperatureChart { title: mode.temperature_title(), points, range }
    }
}

/// Builds view models in a fixed forecast zone.
#[derive(Debug, Clone, Copy)]
pub struct ViewModelBuilder {
    tz: Tz,
}

impl Default for ViewModelBuilder {
    fn default() -> Self {
        Self::new(chrono_tz::Europe::Berlin)
    }
}

impl ViewModelBuilder {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    pub fn build(
        &self,
        city_name: &str,
        coordinates: Coordinates,
        forecast: &ForecastResponse,
        now: DateTime<Utc>,
    ) -> Result<ViewModel, ForecastError> {
        forecast.validate()?;

        let current = CurrentWeather {
            temperature_c: forecast.current_weather.temperature,
            wind_speed_kmh: forecast.current_weather.windspeed,
            weather_code: forecast.current_weather.weathercode,
        };
        let conditions = Conditions::classify(&current);

        let hourly = self.hourly_series(forecast)?;
        let today_date = now.with_timezone(&self.tz).date_naive();
        let today = hourly
            .iter()
            .filter(|p| p.timestamp.date_naive() == today_date)
            .copied()
            .collect();

        let daily = daily_series(forecast)?;
        let cards = summary_cards(&current, &conditions);

        Ok(ViewModel {
            city_name: city_name.to_string(),
            city_label: format!("Wetterdaten für: {}", capitalize(city_name)),
            coordinates,
            current,
            conditions,
            cards,
            hourly,
            today,
            daily,
        })
    }

    fn hourly_series(&self, forecast: &ForecastResponse) -> Result<Vec<HourlyPoint>, ForecastError> {
        let h = &forecast.hourly;
        let offset = forecast
            .utc_offset_seconds
            .map(|secs| {
                FixedOffset::east_opt(secs)
                    .ok_or_else(|| ForecastError::Parse(format!("Invalid UTC offset: {secs}s")))
            })
            .transpose()?;

        h.time
            .iter()
            .enumerate()
            .map(|(i, raw)| {
                Ok::<_, ForecastError>(HourlyPoint {
                    timestamp: self.parse_local(raw, offset)?,
                    temperature_c: h.temperature_2m[i],
                    precipitation_mm: h.precipitation[i],
                    cloud_cover_pct: h.cloudcover[i],
                    wind_speed_kmh: h.windspeed_10m[i],
                })
            })
            .collect()
    }

    /// Turn a wall-clock label into an instant in the forecast zone.
    ///
    /// Open-Meteo labels the whole axis with the single offset it reports,
    /// so labels are read at that offset when it is known. Without one the
    /// label is read in the zone itself: a DST fold resolves to the earlier
    /// instant and a label inside a DST gap moves forward by the gap.
    fn parse_local(
        &self,
        raw: &str,
        offset: Option<FixedOffset>,
    ) -> Result<DateTime<Tz>, ForecastError> {
        let naive = NaiveDateTime::parse_from_str(raw, HOURLY_FORMAT)
            .map_err(|e| ForecastError::Parse(format!("Invalid hourly timestamp '{raw}': {e}")))?;

        let resolved = match offset {
            Some(offset) => naive
                .and_local_timezone(offset)
                .single()
                .map(|dt| dt.with_timezone(&self.tz)),
            None => self
                .tz
                .from_local_datetime(&naive)
                .earliest()
                .or_else(|| self.tz.from_local_datetime(&(naive + TimeDelta::hours(1))).earliest()),
        };

        resolved.ok_or_else(|| {
            ForecastError::Parse(format!("Timestamp '{raw}' cannot be placed in {}", self.tz))
        })
    }
}

fn daily_series(forecast: &ForecastResponse) -> Result<Vec<DailyPoint>, ForecastError> {
    let d = &forecast.daily;

    d.time
        .iter()
        .enumerate()
        .map(|(i, raw)| {
            let date = NaiveDate::parse_from_str(raw, DAILY_FORMAT)
                .map_err(|e| ForecastError::Parse(format!("Invalid date '{raw}': {e}")))?;

            Ok::<_, ForecastError>(DailyPoint {
                date,
                temp_max_c: d.temperature_2m_max[i],
                temp_min_c: d.temperature_2m_min[i],
                precipitation_sum_mm: d.precipitation_sum[i],
            })
        })
        .collect()
}

fn summary_cards(current: &CurrentWeather, conditions: &Conditions) -> Vec<SummaryCard> {
    vec![
        SummaryCard {
            title: "Temperatur",
            icon: conditions.temperature_icon,
            value: format!("{:.1} °C", current.temperature_c),
        },
        SummaryCard {
            title: "Windgeschwindigkeit",
            icon: conditions.wind_icon,
            value: format!("{:.1} km/h", current.wind_speed_kmh),
        },
        SummaryCard {
            title: "Wetterlage",
            icon: conditions.weather_icon,
            value: conditions.description.to_string(),
        },
    ]
}

/// Upper-case the first character, lower-case the rest ("bad TÖLZ" -> "Bad tölz").
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
