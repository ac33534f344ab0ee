//! Trip record store
//!
//! Trips live in process memory only: a fixed seed list loaded at startup
//! followed by the trips created while the process runs. Nothing survives a
//! restart. Seed trips are read-only; update and remove only ever touch
//! created trips.
//!
//! Each call takes the lock once, so individual operations are atomic, but
//! there is no transaction spanning several calls.

use parking_lot::RwLock;
use tracing::debug;

use crate::models::{Trip, TripUpdate};
use crate::{Result, TripPlannerError};

const SEED_TRIPS: &str = include_str!("seed_trips.json");

/// Storage backend for trips
pub trait TripRepository: Send + Sync {
    /// Every trip, seed order followed by creation order
    fn all(&self) -> Result<Vec<Trip>>;

    /// First trip with the given id, seed trips first
    fn find(&self, id: &str) -> Result<Option<Trip>>;

    /// Append a created trip. No uniqueness check is made.
    fn insert(&self, trip: Trip) -> Result<Trip>;

    /// Shallow-merge `update` into the created trip with the given id
    fn update(&self, id: &str, update: TripUpdate) -> Result<Option<Trip>>;

    /// Remove the created trip with the given id
    fn remove(&self, id: &str) -> Result<bool>;
}

/// Parse the bundled seed trips
pub fn seed_trips() -> Result<Vec<Trip>> {
    serde_json::from_str(SEED_TRIPS)
        .map_err(|e| TripPlannerError::storage(format!("Invalid seed data: {e}")))
}

pub struct InMemoryTripRepository {
    seed: Vec<Trip>,
    created: RwLock<Vec<Trip>>,
}

impl InMemoryTripRepository {
    #[must_use]
    pub fn new(seed: Vec<Trip>) -> Self {
        Self {
            seed,
            created: RwLock::new(Vec::new()),
        }
    }

    /// Repository pre-populated with the bundled seed trips
    pub fn with_seed_data() -> Result<Self> {
        let seed = seed_trips()?;
        debug!("Loaded {} seed trips", seed.len());
        Ok(Self::new(seed))
    }
}

impl TripRepository for InMemoryTripRepository {
    fn all(&self) -> Result<Vec<Trip>> {
        let created = self.created.read();
        Ok(self.seed.iter().chain(created.iter()).cloned().collect())
    }

    fn find(&self, id: &str) -> Result<Option<Trip>> {
        if let Some(trip) = self.seed.iter().find(|t| t.id == id) {
            return Ok(Some(trip.clone()));
        }
        Ok(self.created.read().iter().find(|t| t.id == id).cloned())
    }

    fn insert(&self, trip: Trip) -> Result<Trip> {
        self.created.write().push(trip.clone());
        Ok(trip)
    }

    fn update(&self, id: &str, update: TripUpdate) -> Result<Option<Trip>> {
        let mut created = self.created.write();
        let Some(trip) = created.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        update.apply_to(trip);
        Ok(Some(trip.clone()))
    }

    fn remove(&self, id: &str) -> Result<bool> {
        let mut created = self.created.write();
        match created.iter().position(|t| t.id == id) {
            Some(index) => {
                created.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewTrip, TripStatus};

    fn trip(id: &str) -> Trip {
        NewTrip {
            id: Some(id.to_string()),
            title: Some(format!("Trip {id}")),
            start_date: Some("2024-01-01".to_string()),
            end_date: Some("2024-01-02".to_string()),
            ..NewTrip::default()
        }
        .into_trip(String::new)
    }

    #[test]
    fn test_seed_data_parses() {
        let seed = seed_trips().unwrap();
        assert_eq!(seed.len(), 3);
        assert_eq!(seed[0].id, "1");
        assert_eq!(seed[0].title, "European Adventure");
        assert_eq!(seed[1].status, TripStatus::Completed);
        assert_eq!(seed[2].status, TripStatus::Ongoing);
        assert_eq!(seed[0].days[0].travel_modes[0].cost, Some(650.0));
    }

    #[test]
    fn test_all_keeps_seed_then_creation_order() {
        let repo = InMemoryTripRepository::new(vec![trip("s1"), trip("s2")]);
        repo.insert(trip("c1")).unwrap();
        repo.insert(trip("c2")).unwrap();

        let ids: Vec<_> = repo.all().unwrap().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, ["s1", "s2", "c1", "c2"]);
    }

    #[test]
    fn test_seed_trips_are_immutable() {
        let repo = InMemoryTripRepository::new(vec![trip("s1")]);
        let update = TripUpdate {
            title: Some("changed".to_string()),
            ..TripUpdate::default()
        };

        assert!(repo.update("s1", update).unwrap().is_none());
        assert!(!repo.remove("s1").unwrap());
        assert_eq!(repo.find("s1").unwrap().unwrap().title, "Trip s1");
    }

    #[test]
    fn test_find_prefers_seed_on_collision() {
        let repo = InMemoryTripRepository::new(vec![trip("dup")]);
        let mut created = trip("dup");
        created.title = "Created".to_string();
        repo.insert(created).unwrap();

        assert_eq!(repo.all().unwrap().len(), 2);
        assert_eq!(repo.find("dup").unwrap().unwrap().title, "Trip dup");
    }

    #[test]
    fn test_update_and_remove_created() {
        let repo = InMemoryTripRepository::new(Vec::new());
        repo.insert(trip("c1")).unwrap();

        let update = TripUpdate {
            status: Some(TripStatus::Completed),
            ..TripUpdate::default()
        };
        let updated = repo.update("c1", update).unwrap().unwrap();
        assert_eq!(updated.status, TripStatus::Completed);
        assert_eq!(repo.find("c1").unwrap().unwrap().status, TripStatus::Completed);

        assert!(repo.remove("c1").unwrap());
        assert!(!repo.remove("c1").unwrap());
        assert!(repo.find("c1").unwrap().is_none());
    }
}
