//! Data models for the TripPlanner service
//!
//! This module contains the domain models organized by concern:
//! - Trip: trips, day itineraries, travel segments and request payloads
//! - Weather: weather readings and short forecasts

pub mod trip;
pub mod weather;

// Re-export all public types for convenient access
pub use trip::{
    DayItinerary, NewTrip, StatusCounts, TravelMode, TravelModeKind, Trip, TripFilter, TripStatus,
    TripUpdate,
};
pub use weather::{ForecastDay, WeatherData};
