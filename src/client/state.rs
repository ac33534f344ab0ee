//! Client-side mirror of the trips held by the server
//!
//! Trips fetched from the server are merged with trips created locally.
//! When both sides hold the same id the server copy wins.

use std::collections::{HashMap, HashSet};

use crate::models::{Trip, TripUpdate, WeatherData};

#[derive(Debug, Default, Clone)]
pub struct ClientState {
    trips: Vec<Trip>,
    selected: Option<String>,
    weather: HashMap<String, WeatherData>,
}

impl ClientState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    pub fn set_trips(&mut self, trips: Vec<Trip>) {
        self.trips = trips;
    }

    /// Server trips first, in server order, then local trips the server does not know
    pub fn merge_server_trips(&mut self, server: Vec<Trip>) {
        let server_ids: HashSet<&str> = server.iter().map(|t| t.id.as_str()).collect();
        let local: Vec<Trip> = self
            .trips
            .iter()
            .filter(|t| !server_ids.contains(t.id.as_str()))
            .cloned()
            .collect();

        let mut merged = server;
        merged.extend(local);
        self.trips = merged;
    }

    pub fn add_trip(&mut self, trip: Trip) {
        self.trips.push(trip);
    }

    /// Apply `update` to every held trip with the given id
    pub fn update_trip(&mut self, id: &str, update: &TripUpdate) {
        for trip in self.trips.iter_mut().filter(|t| t.id == id) {
            update.clone().apply_to(trip);
        }
    }

    /// Remove the trip, clearing the selection if it pointed at it
    pub fn delete_trip(&mut self, id: &str) {
        self.trips.retain(|t| t.id != id);
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
    }

    pub fn find(&self, id: &str) -> Option<&Trip> {
        self.trips.iter().find(|t| t.id == id)
    }

    pub fn select(&mut self, id: Option<&str>) {
        self.selected = id.map(str::to_string);
    }

    #[must_use]
    pub fn selected(&self) -> Option<&Trip> {
        self.selected.as_deref().and_then(|id| self.find(id))
    }

    pub fn set_weather(&mut self, location: impl Into<String>, weather: WeatherData) {
        self.weather.insert(location.into(), weather);
    }

    #[must_use]
    pub fn weather_for(&self, location: &str) -> Option<&WeatherData> {
        self.weather.get(location)
    }
}
