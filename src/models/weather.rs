//! Weather reading returned by the weather lookup

use serde::{Deserialize, Serialize};

/// One day of the short forecast attached to a reading
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ForecastDay {
    /// ISO date (YYYY-MM-DD)
    pub date: String,
    /// Daily high in Celsius
    pub high: i32,
    /// Daily low in Celsius
    pub low: i32,
    pub condition: String,
    pub icon: String,
}

/// Current conditions for a location, recomputed per request
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeatherData {
    pub location: String,
    /// Temperature in Celsius, rounded
    pub temperature: i32,
    /// Human-readable description, e.g. "partly cloudy"
    pub condition: String,
    /// Provider icon code, e.g. "02d"
    pub icon: String,
    /// Relative humidity in percent
    pub humidity: u8,
    /// Wind speed in m/s
    pub wind_speed: f64,
    pub forecast: Vec<ForecastDay>,
}

impl WeatherData {
    /// Format temperature with unit
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{}°C", self.temperature)
    }

    /// Format wind information
    #[must_use]
    pub fn format_wind(&self) -> String {
        format!("{:.1} m/s", self.wind_speed)
    }
}
