//! `TripPlanner` - trip planning service
//!
//! This library provides the trip store and access service, the HTTP API
//! over it, weather lookups, and a client for talking to a running server.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod service;
pub mod store;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use api::AppState;
pub use client::{ApiClient, ClientState};
pub use config::TripPlannerConfig;
pub use error::TripPlannerError;
pub use models::{DayItinerary, NewTrip, TravelMode, Trip, TripStatus, TripUpdate, WeatherData};
pub use service::TripService;
pub use store::{InMemoryTripRepository, TripRepository};
pub use weather::WeatherService;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TripPlannerError>;

/// Handler state backed by the seeded in-memory store
pub fn default_state(config: &TripPlannerConfig) -> Result<AppState> {
    let repository = InMemoryTripRepository::with_seed_data()?;
    let trips = TripService::new(std::sync::Arc::new(repository));
    let weather = WeatherService::from_config(&config.weather)?;
    Ok(AppState::new(trips, weather))
}
