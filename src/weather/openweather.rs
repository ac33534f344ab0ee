//! OpenWeatherMap current-conditions client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use super::WeatherProvider;
use crate::config::WeatherConfig;
use crate::models::WeatherData;
use crate::{Result, TripPlannerError};

pub struct OpenWeatherProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherProvider {
    pub fn new(config: &WeatherConfig, api_key: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("TripPlanner/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TripPlannerError::weather(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn current_url(&self, location: &str) -> String {
        format!(
            "{}/weather?q={}&appid={}&units=metric",
            self.base_url,
            urlencoding::encode(location),
            self.api_key
        )
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    fn name(&self) -> &'static str {
        "openweathermap"
    }

    #[instrument(skip(self))]
    async fn current(&self, location: &str) -> Result<WeatherData> {
        debug!("Calling the OpenWeatherMap API");
        let response = self
            .client
            .get(self.current_url(location))
            .send()
            .await
            .map_err(|e| TripPlannerError::weather(e.to_string()))?;

        if !response.status().is_success() {
            return Err(TripPlannerError::weather(format!(
                "Weather data not available (status {})",
                response.status()
            )));
        }

        let body: CurrentResponse = response
            .json()
            .await
            .map_err(|e| TripPlannerError::weather(format!("Invalid weather response: {e}")))?;

        body.try_into()
    }
}

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    name: String,
    main: MainReading,
    weather: Vec<Condition>,
    wind: Wind,
}

#[derive(Debug, Deserialize)]
struct MainReading {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct Wind {
    speed: f64,
}

impl TryFrom<CurrentResponse> for WeatherData {
    type Error = TripPlannerError;

    fn try_from(response: CurrentResponse) -> Result<Self> {
        let condition = response
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| TripPlannerError::weather("No conditions in response"))?;

        #[allow(clippy::cast_possible_truncation)]
        let temperature = response.main.temp.round() as i32;

        Ok(WeatherData {
            location: response.name,
            temperature,
            condition: condition.description,
            icon: condition.icon,
            humidity: response.main.humidity,
            wind_speed: response.wind.speed,
            // The current-conditions endpoint carries no forecast.
            forecast: Vec::new(),
        })
    }
}
