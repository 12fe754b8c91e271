//! Lookup tables turning raw forecast values into labels and icon ids.
//!
//! Every function here is total: unknown codes and out-of-range values map to
//! a defined result.

use crate::model::CurrentWeather;

/// Description for codes outside the table.
pub const UNKNOWN_DESCRIPTION: &str = "Unbekannt";

/// Icon id for codes outside the table.
pub const UNKNOWN_ICON: &str = "unknown.png";

/// WMO weather code, German description, icon asset.
const WEATHER_CODES: &[(i32, &str, &str)] = &[
    (0, "Klarer Himmel", "KlarerHimmel.png"),
    (1, "Überwiegend klar", "ÜberwiegendKlar.png"),
    (2, "Teilweise bewölkt", "TeilweiseBewölkt.png"),
    (3, "Bewölkt", "Bewölkt.png"),
    (45, "Nebel", "Nebel.png"),
    (48, "Nebel mit Reif", "NebelMitReif.png"),
    (51, "Leichter Nieselregen", "LeichterNieselregen.png"),
    (53, "Mäßiger Nieselregen", "MäßigerNieselregen.png"),
    (55, "Starker Nieselregen", "StarkerNieselregen.png"),
    (61, "Leichter Regen", "LeichterRegen.png"),
    (63, "Mäßiger Regen", "MäßigerRegen.png"),
    (65, "Starker Regen", "StarkerRegen.png"),
    (71, "Leichter Schneefall", "LeichterSchneefall.png"),
    (73, "Mäßiger Schneefall", "MäßigerSchneefall.png"),
    (75, "Starker Schneefall", "StarkerSchneefall.png"),
    (80, "Leichter Regenschauer", "LeichterRegenschauer.png"),
    (81, "Mäßiger Regenschauer", "MäßigerRegenschauer.png"),
    (82, "Heftiger Regenschauer", "HeftigerRegenschauer.png"),
    (95, "Gewitter", "Gewitter.png"),
    (96, "Gewitter mit leichtem Hagel", "GewitterMitLeichtemHagel.png"),
    (99, "Gewitter mit starkem Hagel", "GewitterMitStarkemHagel.png"),
];

fn lookup(code: i32) -> Option<&'static (i32, &'static str, &'static str)> {
    WEATHER_CODES.iter().find(|(c, _, _)| *c == code)
}

pub fn weather_description(code: i32) -> &'static str {
    lookup(code).map_or(UNKNOWN_DESCRIPTION, |entry| entry.1)
}

pub fn weather_icon_id(code: i32) -> &'static str {
    lookup(code).map_or(UNKNOWN_ICON, |entry| entry.2)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureBand {
    Cold,
    Mild,
    Hot,
}

impl TemperatureBand {
    /// `< 5` cold, `[5, 20)` mild, everything else hot.
    pub fn from_celsius(temp_c: f64) -> Self {
        if temp_c < 5.0 {
            TemperatureBand::Cold
        } else if temp_c < 20.0 {
            TemperatureBand::Mild
        } else {
            TemperatureBand::Hot
        }
    }

    pub fn icon_id(&self) -> &'static str {
        match self {
            TemperatureBand::Cold => "cold_temp.png",
            TemperatureBand::Mild => "mild_temp.png",
            TemperatureBand::Hot => "hot_temp.png",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindBand {
    Low,
    Mild,
    Strong,
    VeryStrong,
}

impl WindBand {
    /// `< 10` low, `[10, 20)` mild, `[20, 35)` strong, everything else very strong.
    pub fn from_kmh(speed_kmh: f64) -> Self {
        if speed_kmh < 10.0 {
            WindBand::Low
        } else if speed_kmh < 20.0 {
            WindBand::Mild
        } else if speed_kmh < 35.0 {
            WindBand::Strong
        } else {
            WindBand::VeryStrong
        }
    }

    pub fn icon_id(&self) -> &'static str {
        match self {
            WindBand::Low => "low_wind.png",
            WindBand::Mild => "mild_wind.png",
            WindBand::Strong => "strong_wind.png",
            WindBand::VeryStrong => "very_strong_wind.png",
        }
    }
}

pub fn temperature_icon_id(temp_c: f64) -> &'static str {
    TemperatureBand::from_celsius(temp_c).icon_id()
}

pub fn wind_icon_id(speed_kmh: f64) -> &'static str {
    WindBand::from_kmh(speed_kmh).icon_id()
}

/// Labels and icon ids derived from the current conditions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conditions {
    pub description: &'static str,
    pub weather_icon: &'static str,
    pub temperature_icon: &'static str,
    pub wind_icon: &'static str,
}

impl Conditions {
    pub fn classify(current: &CurrentWeather) -> Self {
        Self {
            description: weather_description(current.weather_code),
            weather_icon: weather_icon_id(current.weather_code),
            temperature_icon: temperature_icon_id(current.temperature_c),
            wind_icon: wind_icon_id(current.wind_speed_kmh),
        }
    }
}
