//! Trip access service
//!
//! Thin layer over a [`TripRepository`] that assigns identifiers on create
//! and provides the search and summary views used by the trips listing.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use tracing::{debug, info, instrument};

use crate::Result;
use crate::models::{NewTrip, StatusCounts, Trip, TripFilter, TripUpdate};
use crate::store::TripRepository;

/// Time-based identifiers: Unix milliseconds, bumped to stay strictly increasing
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicI64,
}

impl IdGenerator {
    pub fn next_id(&self) -> String {
        let now = Utc::now().timestamp_millis();
        let previous = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or(now);
        now.max(previous + 1).to_string()
    }
}

#[derive(Clone)]
pub struct TripService {
    repository: Arc<dyn TripRepository>,
    ids: Arc<IdGenerator>,
}

impl TripService {
    pub fn new(repository: Arc<dyn TripRepository>) -> Self {
        Self {
            repository,
            ids: Arc::new(IdGenerator::default()),
        }
    }

    pub fn list_all(&self) -> Result<Vec<Trip>> {
        self.repository.all()
    }

    #[instrument(skip(self))]
    pub fn get_by_id(&self, id: &str) -> Result<Option<Trip>> {
        let trip = self.repository.find(id)?;
        debug!(found = trip.is_some(), "Trip lookup");
        Ok(trip)
    }

    /// Store a new trip, generating an id when none (or an empty one) was given.
    ///
    /// Ids are not checked against existing trips.
    #[instrument(skip_all)]
    pub fn create(&self, new_trip: NewTrip) -> Result<Trip> {
        let trip = new_trip.into_trip(|| self.ids.next_id());
        let stored = self.repository.insert(trip)?;
        info!(id = %stored.id, title = %stored.title, "Created trip");
        Ok(stored)
    }

    #[instrument(skip(self, update))]
    pub fn update(&self, id: &str, update: TripUpdate) -> Result<Option<Trip>> {
        let updated = self.repository.update(id, update)?;
        if updated.is_some() {
            info!("Updated trip");
        }
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub fn delete(&self, id: &str) -> Result<bool> {
        let removed = self.repository.remove(id)?;
        if removed {
            info!("Deleted trip");
        }
        Ok(removed)
    }

    pub fn search(&self, filter: &TripFilter) -> Result<Vec<Trip>> {
        Ok(self
            .repository
            .all()?
            .into_iter()
            .filter(|trip| filter.matches(trip))
            .collect())
    }

    pub fn status_counts(&self) -> Result<StatusCounts> {
        Ok(StatusCounts::tally(&self.repository.all()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TripStatus;
    use crate::store::InMemoryTripRepository;

    fn service() -> TripService {
        TripService::new(Arc::new(InMemoryTripRepository::with_seed_data().unwrap()))
    }

    fn new_trip(id: Option<&str>, title: &str) -> NewTrip {
        NewTrip {
            id: id.map(str::to_string),
            title: Some(title.to_string()),
            description: "A test trip".to_string(),
            start_date: Some("2024-12-25".to_string()),
            end_date: Some("2024-12-30".to_string()),
            destinations: vec!["Paris".to_string()],
            ..NewTrip::default()
        }
    }

    #[test]
    fn test_list_all_includes_seed_trips() {
        let trips = service().list_all().unwrap();
        assert!(!trips.is_empty());
        assert_eq!(trips[0].id, "1");
    }

    #[test]
    fn test_create_keeps_given_id() {
        let service = service();
        let created = service.create(new_trip(Some("test-1"), "Test Trip")).unwrap();
        assert_eq!(created.id, "test-1");

        let found = service.get_by_id("test-1").unwrap().unwrap();
        assert_eq!(found, created);
    }

    #[test]
    fn test_create_generates_unique_ids() {
        let service = service();
        let first = service.create(new_trip(None, "One")).unwrap();
        let second = service.create(new_trip(None, "Two")).unwrap();

        assert!(!first.id.is_empty());
        assert_ne!(first.id, second.id);
        assert!(second.id.parse::<i64>().unwrap() > first.id.parse::<i64>().unwrap());
    }

    #[test]
    fn test_list_grows_with_creates() {
        let service = service();
        let mut previous = service.list_all().unwrap().len();
        for i in 0..5 {
            service.create(new_trip(None, &format!("Trip {i}"))).unwrap();
            let current = service.list_all().unwrap().len();
            assert!(current > previous);
            previous = current;
        }
    }

    #[test]
    fn test_get_unknown_id() {
        assert!(service().get_by_id("non-existent").unwrap().is_none());
    }

    #[test]
    fn test_update_and_delete_created_trip() {
        let service = service();
        service.create(new_trip(Some("c-1"), "Draft")).unwrap();

        let update = TripUpdate {
            title: Some("Final".to_string()),
            ..TripUpdate::default()
        };
        let updated = service.update("c-1", update).unwrap().unwrap();
        assert_eq!(updated.title, "Final");
        assert_eq!(updated.destinations, vec!["Paris".to_string()]);

        assert!(service.delete("c-1").unwrap());
        assert!(service.get_by_id("c-1").unwrap().is_none());
        assert!(!service.delete("c-1").unwrap());
    }

    #[test]
    fn test_seed_trip_cannot_be_updated_or_deleted() {
        let service = service();
        assert!(service.update("1", TripUpdate::default()).unwrap().is_none());
        assert!(!service.delete("1").unwrap());
    }

    #[test]
    fn test_search_and_counts() {
        let service = service();
        let filter = TripFilter {
            query: Some("kyoto".to_string()),
            status: None,
        };
        let found = service.search(&filter).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Japanese Discovery");

        let counts = service.status_counts().unwrap();
        assert_eq!(counts.all, 3);
        assert_eq!(counts.planned, 1);

        let filter = TripFilter {
            query: None,
            status: Some(TripStatus::Ongoing),
        };
        assert_eq!(service.search(&filter).unwrap()[0].id, "3");
    }

    #[test]
    fn test_id_generator_is_strictly_increasing() {
        let ids = IdGenerator::default();
        let generated: Vec<i64> = (0..100).map(|_| ids.next_id().parse().unwrap()).collect();
        assert!(generated.windows(2).all(|w| w[1] > w[0]));
    }
}
