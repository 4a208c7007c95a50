//! Weather conditions and the records that drive effect selection
//!
//! Providers deliver a [`WeatherData`] record; the effect composer only looks at its
//! classification and a handful of scalars (wind, precipitation intensity, cloud cover).
//! Classification follows the WMO weather interpretation codes reported by Open-Meteo.

use crate::core_types::units::{Degrees, Fahrenheit, MilesPerHour, Percent};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Weather classification used to pick an animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    Clear,
    PartlyCloudy,
    Cloudy,
    Fog,
    Drizzle,
    Rain,
    HeavyRain,
    FreezingRain,
    Snow,
    HeavySnow,
    Thunderstorm,
    Unknown,
}

impl WeatherCondition {
    /// Every classification, in display order
    pub const ALL: [WeatherCondition; 12] = [
        WeatherCondition::Clear,
        WeatherCondition::PartlyCloudy,
        WeatherCondition::Cloudy,
        WeatherCondition::Fog,
        WeatherCondition::Drizzle,
        WeatherCondition::Rain,
        WeatherCondition::HeavyRain,
        WeatherCondition::FreezingRain,
        WeatherCondition::Snow,
        WeatherCondition::HeavySnow,
        WeatherCondition::Thunderstorm,
        WeatherCondition::Unknown,
    ];

    /// Classify a WMO weather interpretation code
    ///
    /// | Code            | Condition      |
    /// |-----------------|----------------|
    /// | 0, 1            | Clear          |
    /// | 2               | Partly cloudy  |
    /// | 3               | Cloudy         |
    /// | 45, 48          | Fog            |
    /// | 51, 53, 55      | Drizzle        |
    /// | 56, 57, 66, 67  | Freezing rain  |
    /// | 61, 63, 80, 81  | Rain           |
    /// | 65, 82          | Heavy rain     |
    /// | 71, 73, 77, 85  | Snow           |
    /// | 75, 86          | Heavy snow     |
    /// | 95, 96, 99      | Thunderstorm   |
    ///
    /// Any other code is `Unknown`.
    pub fn from_wmo_code(code: u8) -> Self {
        match code {
            0 | 1 => WeatherCondition::Clear,
            2 => WeatherCondition::PartlyCloudy,
            3 => WeatherCondition::Cloudy,
            45 | 48 => WeatherCondition::Fog,
            51 | 53 | 55 => WeatherCondition::Drizzle,
            56 | 57 | 66 | 67 => WeatherCondition::FreezingRain,
            61 | 63 | 80 | 81 => WeatherCondition::Rain,
            65 | 82 => WeatherCondition::HeavyRain,
            71 | 73 | 77 | 85 => WeatherCondition::Snow,
            75 | 86 => WeatherCondition::HeavySnow,
            95 | 96 | 99 => WeatherCondition::Thunderstorm,
            _ => WeatherCondition::Unknown,
        }
    }

    /// Parse a user-facing name (`"heavy-rain"`, `"heavy_rain"`, `"storm"`, ...)
    pub fn from_name(name: &str) -> Option<Self> {
        let normalised = name.trim().to_lowercase().replace(['-', ' '], "_");
        let condition = match normalised.as_str() {
            "clear" | "sunny" => WeatherCondition::Clear,
            "partly_cloudy" => WeatherCondition::PartlyCloudy,
            "cloudy" | "overcast" => WeatherCondition::Cloudy,
            "fog" | "mist" => WeatherCondition::Fog,
            "drizzle" => WeatherCondition::Drizzle,
            "rain" => WeatherCondition::Rain,
            "heavy_rain" => WeatherCondition::HeavyRain,
            "freezing_rain" => WeatherCondition::FreezingRain,
            "snow" => WeatherCondition::Snow,
            "heavy_snow" => WeatherCondition::HeavySnow,
            "thunderstorm" | "storm" => WeatherCondition::Thunderstorm,
            "unknown" => WeatherCondition::Unknown,
            _ => return None,
        };
        Some(condition)
    }

    /// Human readable label
    pub fn label(self) -> &'static str {
        match self {
            WeatherCondition::Clear => "Clear",
            WeatherCondition::PartlyCloudy => "Partly cloudy",
            WeatherCondition::Cloudy => "Cloudy",
            WeatherCondition::Fog => "Fog",
            WeatherCondition::Drizzle => "Drizzle",
            WeatherCondition::Rain => "Rain",
            WeatherCondition::HeavyRain => "Heavy rain",
            WeatherCondition::FreezingRain => "Freezing rain",
            WeatherCondition::Snow => "Snow",
            WeatherCondition::HeavySnow => "Heavy snow",
            WeatherCondition::Thunderstorm => "Thunderstorm",
            WeatherCondition::Unknown => "Unknown",
        }
    }

    /// Single-glyph icon for compact status lines
    pub fn icon(self) -> char {
        match self {
            WeatherCondition::Clear => '☀',
            WeatherCondition::PartlyCloudy => '⛅',
            WeatherCondition::Cloudy | WeatherCondition::Unknown => '☁',
            WeatherCondition::Fog => '≡',
            WeatherCondition::Drizzle | WeatherCondition::Rain | WeatherCondition::HeavyRain => {
                '☂'
            }
            WeatherCondition::FreezingRain
            | WeatherCondition::Snow
            | WeatherCondition::HeavySnow => '❄',
            WeatherCondition::Thunderstorm => '⚡',
        }
    }
}

impl fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn default_is_day() -> bool {
    true
}

/// A single weather observation
///
/// Optional intensities are absent when the provider does not report them; the
/// composer then falls back to per-condition defaults.
///
/// # Example
/// ```
/// use weather_fx_core::{WeatherCondition, WeatherData};
///
/// let weather = WeatherData::preset(WeatherCondition::Rain).with_wind(20.0, 270.0);
/// assert_eq!(weather.condition, WeatherCondition::Rain);
/// assert_eq!(weather.wind_direction.hemisphere_sign(), -1.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherData {
    pub condition: WeatherCondition,
    pub temperature: Fahrenheit,
    pub wind_speed: MilesPerHour,
    pub wind_direction: Degrees,
    /// Rain rate as reported by the provider (mm/h)
    #[serde(default)]
    pub rain_intensity: Option<f32>,
    /// Snowfall rate as reported by the provider (cm/h)
    #[serde(default)]
    pub snow_intensity: Option<f32>,
    #[serde(default)]
    pub cloud_cover: Percent,
    pub location: String,
    pub description: String,
    #[serde(default = "default_is_day")]
    pub is_day: bool,
}

impl WeatherData {
    /// Representative observation for a condition, used in synthetic mode
    pub fn preset(condition: WeatherCondition) -> Self {
        let (temperature, wind_speed, wind_direction, cloud_cover) = match condition {
            WeatherCondition::Clear => (72.0, 4.0, 90.0, 5.0),
            WeatherCondition::PartlyCloudy => (68.0, 8.0, 120.0, 45.0),
            WeatherCondition::Cloudy => (60.0, 10.0, 200.0, 90.0),
            WeatherCondition::Fog => (50.0, 2.0, 45.0, 100.0),
            WeatherCondition::Drizzle => (55.0, 6.0, 135.0, 95.0),
            WeatherCondition::Rain => (54.0, 12.0, 160.0, 100.0),
            WeatherCondition::HeavyRain => (52.0, 20.0, 150.0, 100.0),
            WeatherCondition::FreezingRain => (30.0, 10.0, 315.0, 100.0),
            WeatherCondition::Snow => (28.0, 6.0, 300.0, 100.0),
            WeatherCondition::HeavySnow => (22.0, 18.0, 290.0, 100.0),
            WeatherCondition::Thunderstorm => (78.0, 25.0, 100.0, 100.0),
            WeatherCondition::Unknown => (60.0, 5.0, 180.0, 50.0),
        };

        Self {
            condition,
            temperature: Fahrenheit::new(temperature),
            wind_speed: MilesPerHour::new(wind_speed),
            wind_direction: Degrees::new(wind_direction),
            rain_intensity: None,
            snow_intensity: None,
            cloud_cover: Percent::new(cloud_cover),
            location: "Synthetic".to_string(),
            description: condition.label().to_string(),
            is_day: true,
        }
    }

    /// Override wind speed (mph) and bearing (degrees)
    pub fn with_wind(mut self, speed: f32, direction: f32) -> Self {
        self.wind_speed = MilesPerHour::new(speed);
        self.wind_direction = Degrees::new(direction);
        self
    }

    /// Override the day/night flag
    pub fn with_daylight(mut self, is_day: bool) -> Self {
        self.is_day = is_day;
        self
    }

    /// Override the location label
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Signed horizontal wind in cells/frame, `speed / divisor` pushed
    /// towards the hemisphere the wind comes from
    pub fn wind_drift(&self, divisor: f32) -> f32 {
        self.wind_speed.value() / divisor * self.wind_direction.hemisphere_sign()
    }

    /// One-line summary for an info bar
    pub fn summary(&self) -> String {
        format!(
            " {} │ {} │ {} │ Wind: {} ",
            self.location, self.temperature, self.description, self.wind_speed
        )
    }
}
