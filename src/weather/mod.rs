//! Weather lookup
//!
//! Readings come from a live provider when one is configured. Any provider
//! failure falls back to the canned table, so a lookup never fails.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, instrument, warn};

use crate::Result;
use crate::config::WeatherConfig;
use crate::models::WeatherData;

pub mod canned;
pub mod openweather;

pub use openweather::OpenWeatherProvider;

/// Source of current weather readings
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn current(&self, location: &str) -> Result<WeatherData>;
}

#[derive(Clone, Default)]
pub struct WeatherService {
    provider: Option<Arc<dyn WeatherProvider>>,
}

impl WeatherService {
    /// Service answering from the canned table only
    #[must_use]
    pub fn canned() -> Self {
        Self { provider: None }
    }

    #[must_use]
    pub fn with_provider(provider: Arc<dyn WeatherProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    /// Use OpenWeatherMap when an API key is configured, canned data otherwise
    pub fn from_config(config: &WeatherConfig) -> Result<Self> {
        match &config.api_key {
            Some(key) => {
                let provider = OpenWeatherProvider::new(config, key.clone())?;
                Ok(Self::with_provider(Arc::new(provider)))
            }
            None => Ok(Self::canned()),
        }
    }

    #[instrument(skip(self))]
    pub async fn lookup(&self, location: &str) -> WeatherData {
        if let Some(provider) = &self.provider {
            match provider.current(location).await {
                Ok(weather) => return weather,
                Err(e) => warn!(
                    provider = provider.name(),
                    "Weather provider failed, using canned data: {e}"
                ),
            }
        }
        debug!("Serving canned weather");
        canned::reading_for(location, Utc::now().date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TripPlannerError;

    struct FailingProvider;

    #[async_trait]
    impl WeatherProvider for FailingProvider {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn current(&self, _location: &str) -> Result<WeatherData> {
            Err(TripPlannerError::weather("unreachable"))
        }
    }

    struct FixedProvider;

    #[async_trait]
    impl WeatherProvider for FixedProvider {
        fn name(&self) -> &'static str {
            "fixed"
        }

        async fn current(&self, location: &str) -> Result<WeatherData> {
            let mut weather = canned::reading_for(location, Utc::now().date_naive());
            weather.temperature = -40;
            Ok(weather)
        }
    }

    #[tokio::test]
    async fn test_canned_lookup() {
        let weather = WeatherService::canned().lookup("Paris").await;
        assert_eq!(weather.temperature, 18);
        assert_eq!(weather.forecast.len(), 3);
    }

    #[tokio::test]
    async fn test_provider_failure_falls_back() {
        let service = WeatherService::with_provider(Arc::new(FailingProvider));
        let weather = service.lookup("Tokyo").await;
        assert_eq!(weather.temperature, 22);
        assert_eq!(weather.condition, "sunny");
    }

    #[tokio::test]
    async fn test_provider_result_is_used() {
        let service = WeatherService::with_provider(Arc::new(FixedProvider));
        assert_eq!(service.lookup("Paris").await.temperature, -40);
    }

    #[test]
    fn test_from_config_without_key_is_canned() {
        let config = crate::config::TripPlannerConfig::default();
        let service = WeatherService::from_config(&config.weather).unwrap();
        assert!(service.provider.is_none());
    }
}
