//! Trip, itinerary and travel segment models

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::TripPlannerError;

/// Lifecycle state of a trip
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TripStatus {
    #[default]
    Planned,
    Ongoing,
    Completed,
}

impl TripStatus {
    pub const ALL: [TripStatus; 3] = [
        TripStatus::Planned,
        TripStatus::Ongoing,
        TripStatus::Completed,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TripStatus::Planned => "planned",
            TripStatus::Ongoing => "ongoing",
            TripStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for TripStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TripStatus {
    type Err = TripPlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TripStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                TripPlannerError::validation(format!(
                    "Invalid status '{s}'. Must be one of: planned, ongoing, completed"
                ))
            })
    }
}

/// Kind of transportation used for a travel segment
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TravelModeKind {
    Flight,
    Train,
    Bus,
    Car,
    Walk,
}

/// One transportation segment within a day
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TravelMode {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TravelModeKind,
    pub from: String,
    pub to: String,
    /// Free-form, e.g. "7h 30m"
    pub duration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
}

/// One day's activities, travel and lodging
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DayItinerary {
    pub id: String,
    pub date: String,
    pub location: String,
    #[serde(default)]
    pub activities: Vec<String>,
    #[serde(default)]
    pub travel_modes: Vec<TravelMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accommodation: Option<String>,
}

/// A planned journey
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Dates are kept as sent; no format or ordering is enforced.
    pub start_date: String,
    pub end_date: String,
    pub destinations: Vec<String>,
    pub days: Vec<DayItinerary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_cost: Option<f64>,
    pub status: TripStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Trip {
    /// Inclusive number of days between start and end, when both are ISO dates
    #[must_use]
    pub fn duration_days(&self) -> Option<i64> {
        let start = NaiveDate::parse_from_str(&self.start_date, "%Y-%m-%d").ok()?;
        let end = NaiveDate::parse_from_str(&self.end_date, "%Y-%m-%d").ok()?;
        let days = (end - start).num_days();
        (days >= 0).then_some(days + 1)
    }

    /// Sum of all travel segment costs that carry a price
    #[must_use]
    pub fn travel_cost(&self) -> f64 {
        self.days
            .iter()
            .flat_map(|day| &day.travel_modes)
            .filter_map(|mode| mode.cost)
            .sum()
    }

    /// Case-insensitive match against title, description and destinations
    #[must_use]
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
            || self
                .destinations
                .iter()
                .any(|dest| dest.to_lowercase().contains(&query))
    }
}

/// Payload accepted when creating a trip.
///
/// Required fields are optional here so that their absence can be reported
/// as a validation failure rather than a malformed body.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewTrip {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default)]
    pub destinations: Vec<String>,
    #[serde(default)]
    pub days: Vec<DayItinerary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_cost: Option<f64>,
    #[serde(default)]
    pub status: TripStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

fn present(value: Option<&String>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

impl NewTrip {
    /// Check that title, start date and end date are present and non-empty
    pub fn validate(&self) -> crate::Result<()> {
        if present(self.title.as_ref())
            && present(self.start_date.as_ref())
            && present(self.end_date.as_ref())
        {
            Ok(())
        } else {
            Err(TripPlannerError::validation(
                "Missing required fields: title, startDate, endDate",
            ))
        }
    }

    /// Build the stored trip, falling back to `generated_id` when no id was sent
    #[must_use]
    pub fn into_trip(self, generated_id: impl FnOnce() -> String) -> Trip {
        let id = self.id.filter(|id| !id.is_empty()).unwrap_or_else(generated_id);
        Trip {
            id,
            title: self.title.unwrap_or_default(),
            description: self.description,
            start_date: self.start_date.unwrap_or_default(),
            end_date: self.end_date.unwrap_or_default(),
            destinations: self.destinations,
            days: self.days,
            total_cost: self.total_cost,
            status: self.status,
            image_url: self.image_url,
        }
    }
}

impl From<Trip> for NewTrip {
    fn from(trip: Trip) -> Self {
        Self {
            id: Some(trip.id),
            title: Some(trip.title),
            description: trip.description,
            start_date: Some(trip.start_date),
            end_date: Some(trip.end_date),
            destinations: trip.destinations,
            days: trip.days,
            total_cost: trip.total_cost,
            status: trip.status,
            image_url: trip.image_url,
        }
    }
}

// Distinguishes an explicit `null` (Some(None)) from an absent field (None).
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Partial set of fields applied on top of an existing trip.
///
/// Lists are replaced as a whole. `totalCost` and `imageUrl` can be cleared
/// with an explicit `null`.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TripUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destinations: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days: Option<Vec<DayItinerary>>,
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_cost: Option<Option<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TripStatus>,
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_url: Option<Option<String>>,
}

impl TripUpdate {
    /// Shallow-merge the present fields into `trip`
    pub fn apply_to(self, trip: &mut Trip) {
        if let Some(title) = self.title {
            trip.title = title;
        }
        if let Some(description) = self.description {
            trip.description = description;
        }
        if let Some(start_date) = self.start_date {
            trip.start_date = start_date;
        }
        if let Some(end_date) = self.end_date {
            trip.end_date = end_date;
        }
        if let Some(destinations) = self.destinations {
            trip.destinations = destinations;
        }
        if let Some(days) = self.days {
            trip.days = days;
        }
        if let Some(total_cost) = self.total_cost {
            trip.total_cost = total_cost;
        }
        if let Some(status) = self.status {
            trip.status = status;
        }
        if let Some(image_url) = self.image_url {
            trip.image_url = image_url;
        }
    }
}

/// Optional search constraints over the trip list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripFilter {
    pub query: Option<String>,
    pub status: Option<TripStatus>,
}

impl TripFilter {
    #[must_use]
    pub fn matches(&self, trip: &Trip) -> bool {
        let query_ok = self
            .query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .is_none_or(|q| trip.matches_query(q));
        let status_ok = self.status.is_none_or(|status| trip.status == status);
        query_ok && status_ok
    }
}

/// Number of trips per status
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub all: usize,
    pub planned: usize,
    pub ongoing: usize,
    pub completed: usize,
}

impl StatusCounts {
    #[must_use]
    pub fn tally<'a>(trips: impl IntoIterator<Item = &'a Trip>) -> Self {
        trips.into_iter().fold(Self::default(), |mut counts, trip| {
            counts.all += 1;
            match trip.status {
                TripStatus::Planned => counts.planned += 1,
                TripStatus::Ongoing => counts.ongoing += 1,
                TripStatus::Completed => counts.completed += 1,
            }
            counts
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn sample_trip() -> Trip {
        Trip {
            id: "t-1".to_string(),
            title: "Alpine Loop".to_string(),
            description: "Lakes and passes".to_string(),
            start_date: "2024-07-01".to_string(),
            end_date: "2024-07-05".to_string(),
            destinations: vec!["Zurich".to_string(), "Lucerne".to_string()],
            days: vec![DayItinerary {
                id: "t-1-1".to_string(),
                date: "2024-07-01".to_string(),
                location: "Zurich".to_string(),
                activities: vec!["Old town".to_string()],
                travel_modes: vec![
                    TravelMode {
                        id: "t-1-1-1".to_string(),
                        kind: TravelModeKind::Train,
                        from: "Geneva".to_string(),
                        to: "Zurich".to_string(),
                        duration: "2h 45m".to_string(),
                        cost: Some(90.0),
                    },
                    TravelMode {
                        id: "t-1-1-2".to_string(),
                        kind: TravelModeKind::Walk,
                        from: "Station".to_string(),
                        to: "Hotel".to_string(),
                        duration: "15m".to_string(),
                        cost: None,
                    },
                ],
                accommodation: None,
            }],
            total_cost: Some(1200.0),
            status: TripStatus::Planned,
            image_url: None,
        }
    }

    #[test]
    fn test_trip_wire_format_is_camel_case() {
        let value = serde_json::to_value(sample_trip()).unwrap();
        assert_eq!(value["startDate"], "2024-07-01");
        assert_eq!(value["totalCost"], 1200.0);
        assert_eq!(value["status"], "planned");
        assert_eq!(value["days"][0]["travelModes"][0]["type"], "train");
        assert!(value.get("imageUrl").is_none());
    }

    #[rstest]
    #[case("2024-07-01", "2024-07-05", Some(5))]
    #[case("2024-07-01", "2024-07-01", Some(1))]
    #[case("2024-07-05", "2024-07-01", None)]
    #[case("soon", "2024-07-01", None)]
    fn test_duration_days(#[case] start: &str, #[case] end: &str, #[case] expected: Option<i64>) {
        let mut trip = sample_trip();
        trip.start_date = start.to_string();
        trip.end_date = end.to_string();
        assert_eq!(trip.duration_days(), expected);
    }

    #[test]
    fn test_travel_cost_skips_unpriced_segments() {
        assert_eq!(sample_trip().travel_cost(), 90.0);
    }

    #[rstest]
    #[case("alpine", true)]
    #[case("PASSES", true)]
    #[case("lucerne", true)]
    #[case("tokyo", false)]
    fn test_matches_query(#[case] query: &str, #[case] expected: bool) {
        assert_eq!(sample_trip().matches_query(query), expected);
    }

    #[rstest]
    #[case("planned", TripStatus::Planned)]
    #[case("Ongoing", TripStatus::Ongoing)]
    #[case(" completed ", TripStatus::Completed)]
    fn test_status_from_str(#[case] input: &str, #[case] expected: TripStatus) {
        assert_eq!(input.parse::<TripStatus>().unwrap(), expected);
    }

    #[test]
    fn test_status_from_str_rejects_unknown() {
        let err = "cancelled".parse::<TripStatus>().unwrap_err();
        assert!(matches!(err, TripPlannerError::Validation { .. }));
    }

    #[test]
    fn test_new_trip_validation() {
        let payload: NewTrip = serde_json::from_value(json!({
            "description": "no required fields",
            "destinations": ["Paris"],
            "status": "planned",
            "days": []
        }))
        .unwrap();
        assert!(payload.validate().is_err());

        let payload: NewTrip = serde_json::from_value(json!({
            "title": "",
            "startDate": "2024-12-25",
            "endDate": "2024-12-30"
        }))
        .unwrap();
        assert!(payload.validate().is_err());

        let payload: NewTrip = serde_json::from_value(json!({
            "title": "Winter",
            "startDate": "2024-12-25",
            "endDate": "2024-12-30"
        }))
        .unwrap();
        assert!(payload.validate().is_ok());
        assert_eq!(payload.status, TripStatus::Planned);
    }

    #[test]
    fn test_into_trip_keeps_given_id() {
        let payload = NewTrip {
            id: Some("given".to_string()),
            title: Some("T".to_string()),
            ..NewTrip::default()
        };
        let trip = payload.into_trip(|| "generated".to_string());
        assert_eq!(trip.id, "given");
    }

    #[test]
    fn test_into_trip_generates_id_for_empty() {
        let payload = NewTrip {
            id: Some(String::new()),
            ..NewTrip::default()
        };
        let trip = payload.into_trip(|| "generated".to_string());
        assert_eq!(trip.id, "generated");
    }

    #[test]
    fn test_update_is_shallow_merge() {
        let mut trip = sample_trip();
        let update: TripUpdate = serde_json::from_value(json!({
            "title": "Alpine Loop II",
            "destinations": ["Bern"],
            "totalCost": null,
            "status": "ongoing"
        }))
        .unwrap();

        update.apply_to(&mut trip);

        assert_eq!(trip.title, "Alpine Loop II");
        assert_eq!(trip.destinations, vec!["Bern".to_string()]);
        assert_eq!(trip.total_cost, None);
        assert_eq!(trip.status, TripStatus::Ongoing);
        assert_eq!(trip.description, "Lakes and passes");
        assert_eq!(trip.days.len(), 1);
    }

    #[test]
    fn test_update_absent_nullable_keeps_value() {
        let mut trip = sample_trip();
        let update: TripUpdate = serde_json::from_value(json!({ "title": "x" })).unwrap();
        update.apply_to(&mut trip);
        assert_eq!(trip.total_cost, Some(1200.0));
    }

    #[test]
    fn test_filter_and_counts() {
        let mut ongoing = sample_trip();
        ongoing.id = "t-2".to_string();
        ongoing.status = TripStatus::Ongoing;
        let trips = [sample_trip(), ongoing];

        let filter = TripFilter {
            query: Some("  ".to_string()),
            status: Some(TripStatus::Ongoing),
        };
        let matched: Vec<_> = trips.iter().filter(|t| filter.matches(t)).collect();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id, "t-2");

        let counts = StatusCounts::tally(&trips);
        assert_eq!(
            counts,
            StatusCounts {
                all: 2,
                planned: 1,
                ongoing: 1,
                completed: 0
            }
        );
    }
}
