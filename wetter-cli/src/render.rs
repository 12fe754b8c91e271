//! Plain-text renderer for dashboard states.

use std::fmt;

use wetter_core::{
    DisplayMode, DisplayState, ViewModel,
    view::{DAILY_CHART_TITLE, PRECIPITATION_CHART_TITLE},
};

const BAR_WIDTH: usize = 30;
const HOUR_FORMAT: &str = "%H:%M";
const DAY_HOUR_FORMAT: &str = "%a %d.%m. %H:%M";
/// Shown where the forecast has no value.
const MISSING: &str = "k. A.";

pub fn render(state: &DisplayState, mode: DisplayMode) -> String {
    Screen { state, mode }.to_string()
}

/// One dashboard state drawn in one display mode.
struct Screen<'a> {
    state: &'a DisplayState,
    mode: DisplayMode,
}

impl fmt::Display for Screen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state;

        if !state.status.is_empty() {
            writeln!(f, "{}", state.status)?;
        }
        if !state.city_label.is_empty() {
            writeln!(f, "{}\n", state.city_label)?;
        }
        match &state.view {
            Some(view) => write_view(f, view, self.mode),
            None => Ok(()),
        }
    }
}

fn write_view(f: &mut fmt::Formatter<'_>, view: &ViewModel, mode: DisplayMode) -> fmt::Result {
    for card in &view.cards {
        writeln!(f, "  {:<20} {:<28} [{}]", card.title, card.value, card.icon)?;
    }

    write_temperature(f, view, mode)?;
    write_precipitation(f, view)?;
    write_daily(f, view)
}

fn write_temperature(f: &mut fmt::Formatter<'_>, view: &ViewModel, mode: DisplayMode) -> fmt::Result {
    let chart = view.temperature_chart(mode);
    writeln!(f, "\n{}   [{}] / {}", chart.title, mode.label(), mode.toggled().label())?;

    let Some((start, end)) = chart.range else {
        return writeln!(f, "  keine Daten");
    };
    writeln!(f, "  {} - {}", start.format(DAY_HOUR_FORMAT), end.format(DAY_HOUR_FORMAT))?;

    let (min, max) = min_max(chart.points.iter().filter_map(|p| p.temperature_c));
    // Seven days of hourly rows are too many for a terminal; show every third hour.
    let step = match mode {
        DisplayMode::Today => 1,
        DisplayMode::FullHorizon => 3,
    };
    let format = match mode {
        DisplayMode::Today => HOUR_FORMAT,
        DisplayMode::FullHorizon => DAY_HOUR_FORMAT,
    };

    for p in chart.points.iter().step_by(step) {
        let when = p.timestamp.format(format).to_string();
        match p.temperature_c {
            Some(t) => writeln!(f, "  {when:>16} {t:>6.1} °C {}", bar(t, min, max))?,
            None => writeln!(f, "  {when:>16} {MISSING:>9}")?,
        }
    }
    Ok(())
}

fn write_precipitation(f: &mut fmt::Formatter<'_>, view: &ViewModel) -> fmt::Result {
    writeln!(f, "\n{PRECIPITATION_CHART_TITLE}")?;

    let wet: Vec<_> = view
        .hourly
        .iter()
        .filter_map(|p| p.precipitation_mm.filter(|mm| *mm > 0.0).map(|mm| (p.timestamp, mm)))
        .collect();
    if wet.is_empty() {
        return writeln!(f, "  kein Niederschlag");
    }

    let (_, max) = min_max(wet.iter().map(|(_, mm)| *mm));
    for (timestamp, mm) in wet {
        writeln!(
            f,
            "  {:>16} {mm:>6.1} mm {}",
            timestamp.format(DAY_HOUR_FORMAT).to_string(),
            bar(mm, 0.0, max)
        )?;
    }
    Ok(())
}

fn write_daily(f: &mut fmt::Formatter<'_>, view: &ViewModel) -> fmt::Result {
    writeln!(f, "\n{DAILY_CHART_TITLE}")?;
    writeln!(f, "  {:<12} {:>8} {:>8} {:>9}", "Datum", "Max", "Min", "Regen")?;

    for d in &view.daily {
        writeln!(
            f,
            "  {:<12} {:>8} {:>8} {:>9}",
            d.date.format("%a %d.%m.").to_string(),
            reading(d.temp_max_c, "°C"),
            reading(d.temp_min_c, "°C"),
            reading(d.precipitation_sum_mm, "mm")
        )?;
    }
    Ok(())
}

fn reading(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{v:.1} {unit}"),
        None => MISSING.to_string(),
    }
}

fn min_max(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)))
}

fn bar(value: f64, min: f64, max: f64) -> String {
    let span = max - min;
    let fraction = if span > 0.0 { (value - min) / span } else { 1.0 };
    let len = (fraction.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(len.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use wetter_core::{
        Coordinates, ForecastResponse, ViewModelBuilder,
        model::{CurrentWeatherPayload, DailyPayload, HourlyPayload},
    };

    fn view() -> ViewModel {
        let forecast = ForecastResponse {
            utc_offset_seconds: Some(3600),
            current_weather: CurrentWeatherPayload {
                temperature: 8.2,
                windspeed: 14.0,
                weathercode: 3,
            },
            hourly: HourlyPayload {
                time: vec![
                    "2024-01-15T10:00".into(),
                    "2024-01-15T11:00".into(),
                    "2024-01-16T10:00".into(),
                ],
                temperature_2m: vec![Some(4.0), Some(6.0), Some(9.0)],
                precipitation: vec![Some(0.0), Some(1.2), None],
                cloudcover: vec![Some(90.0), Some(100.0), Some(40.0)],
                windspeed_10m: vec![Some(14.0), Some(15.0), Some(9.0)],
            },
            daily: DailyPayload {
                time: vec!["2024-01-15".into(), "2024-01-16".into()],
                temperature_2m_max: vec![Some(8.0), Some(9.5)],
                temperature_2m_min: vec![Some(1.0), None],
                precipitation_sum: vec![Some(1.2), Some(0.0)],
            },
        };
        let now: DateTime<Utc> = "2024-01-15T09:00:00Z".parse().expect("timestamp");

        ViewModelBuilder::default()
            .build(
                "berlin",
                Coordinates::new(52.52, 13.405).expect("valid"),
                &forecast,
                now,
            )
            .expect("view model")
    }

    fn ready_state() -> DisplayState {
        let view = view();
        DisplayState { status: String::new(), city_label: view.city_label.clone(), view: Some(view) }
    }

    #[test]
    fn dashboard_shows_cards_and_all_charts() {
        let text = render(&ready_state(), DisplayMode::FullHorizon);

        assert!(text.contains("Wetterdaten für: Berlin"));
        assert!(text.contains("8.2 °C"));
        assert!(text.contains("14.0 km/h"));
        assert!(text.contains("Bewölkt"));
        assert!(text.contains("Temperaturverlauf - Nächste 7 Tage"));
        assert!(text.contains(PRECIPITATION_CHART_TITLE));
        assert!(text.contains(DAILY_CHART_TITLE));
    }

    #[test]
    fn today_mode_only_lists_todays_hours() {
        let text = render(&ready_state(), DisplayMode::Today);

        assert!(text.contains("Temperaturverlauf - Heute"));
        assert!(text.contains("   10:00"));
        assert!(text.contains("   11:00"));
        assert!(!text.contains("   9.0 °C"));
    }

    #[test]
    fn failure_shows_only_status() {
        let state = DisplayState {
            status: "Stadt ungültig".into(),
            city_label: String::new(),
            view: None,
        };

        assert_eq!(render(&state, DisplayMode::Today), "Stadt ungültig\n");
    }

    #[test]
    fn bars_scale_between_min_and_max() {
        assert_eq!(bar(0.0, 0.0, 10.0).chars().count(), 1);
        assert_eq!(bar(10.0, 0.0, 10.0).chars().count(), BAR_WIDTH);
        assert_eq!(bar(3.0, 3.0, 3.0).chars().count(), BAR_WIDTH);
    }

    #[test]
    fn missing_values_are_marked_not_dropped() {
        let text = render(&ready_state(), DisplayMode::FullHorizon);

        // One wet hour; the hour without a precipitation value is not listed.
        assert_eq!(text.matches(" mm █").count(), 1);
        assert!(text.contains("1.2 mm"));

        let daily = text.split(DAILY_CHART_TITLE).nth(1).expect("daily table");
        assert!(daily.contains("9.5 °C"));
        assert!(daily.contains(MISSING));
    }
}
