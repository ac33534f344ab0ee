//! Canned weather readings used when no live provider is configured
//! or the live provider fails.

use chrono::{Days, NaiveDate};

use crate::models::{ForecastDay, WeatherData};

struct CannedReading {
    temperature: i32,
    condition: &'static str,
    icon: &'static str,
}

const KNOWN_LOCATIONS: &[(&str, CannedReading)] = &[
    ("Paris", CannedReading { temperature: 18, condition: "partly cloudy", icon: "02d" }),
    ("Amsterdam", CannedReading { temperature: 15, condition: "rainy", icon: "10d" }),
    ("Berlin", CannedReading { temperature: 16, condition: "cloudy", icon: "04d" }),
    ("Prague", CannedReading { temperature: 14, condition: "sunny", icon: "01d" }),
    ("Tokyo", CannedReading { temperature: 22, condition: "sunny", icon: "01d" }),
    ("Kyoto", CannedReading { temperature: 20, condition: "partly cloudy", icon: "02d" }),
    ("Reykjavik", CannedReading { temperature: 8, condition: "windy", icon: "50d" }),
];

const DEFAULT_READING: CannedReading = CannedReading {
    temperature: 20,
    condition: "sunny",
    icon: "01d",
};

const HUMIDITY: u8 = 65;
const WIND_SPEED: f64 = 3.2;

// Exact, case-sensitive key match; "paris" gets the default reading.
fn lookup(location: &str) -> &'static CannedReading {
    KNOWN_LOCATIONS
        .iter()
        .find(|(name, _)| *name == location)
        .map_or(&DEFAULT_READING, |(_, reading)| reading)
}

/// Deterministic reading for `location`, with a three-day forecast starting
/// the day after `today`. Unknown locations get the default reading.
#[must_use]
pub fn reading_for(location: &str, today: NaiveDate) -> WeatherData {
    let reading = lookup(location);
    let t = reading.temperature;
    let day = |offset: u64| {
        today
            .checked_add_days(Days::new(offset))
            .unwrap_or(today)
            .format("%Y-%m-%d")
            .to_string()
    };

    WeatherData {
        location: location.to_string(),
        temperature: t,
        condition: reading.condition.to_string(),
        icon: reading.icon.to_string(),
        humidity: HUMIDITY,
        wind_speed: WIND_SPEED,
        forecast: vec![
            ForecastDay {
                date: day(1),
                high: t + 2,
                low: t - 5,
                condition: reading.condition.to_string(),
                icon: reading.icon.to_string(),
            },
            ForecastDay {
                date: day(2),
                high: t + 1,
                low: t - 4,
                condition: "sunny".to_string(),
                icon: "01d".to_string(),
            },
            ForecastDay {
                date: day(3),
                high: t + 3,
                low: t - 3,
                condition: "cloudy".to_string(),
                icon: "04d".to_string(),
            },
        ],
    }
}
