use axum::{
    Router,
    body::Bytes,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use crate::{
    TripPlannerError,
    models::{NewTrip, StatusCounts, Trip, TripFilter, TripStatus, TripUpdate, WeatherData},
    service::TripService,
    weather::WeatherService,
};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub trips: TripService,
    pub weather: WeatherService,
}

impl AppState {
    pub fn new(trips: TripService, weather: WeatherService) -> Self {
        Self { trips, weather }
    }
}

/// Error response rendered as `{ "error": message }`
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl From<TripPlannerError> for ApiError {
    fn from(err: TripPlannerError) -> Self {
        let status = err.status_code();
        if status.is_server_error() {
            error!("Request failed: {err}");
        }
        Self::new(status, err.user_message())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

/// Client errors pass through; server faults are logged and replaced by `message`.
fn fault(message: &'static str) -> impl Fn(TripPlannerError) -> ApiError {
    move |err| {
        if err.status_code().is_server_error() {
            error!("{message}: {err}");
            ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, message)
        } else {
            err.into()
        }
    }
}

fn trip_not_found() -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, "Trip not found")
}

fn parse_body<T: serde::de::DeserializeOwned>(
    body: &Bytes,
    message: &'static str,
) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| {
        error!("{message}: malformed payload: {e}");
        ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    })
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub q: Option<String>,
    pub status: Option<String>,
}

impl ListQuery {
    fn into_filter(self) -> crate::Result<TripFilter> {
        let status = match self.status.as_deref().map(str::trim) {
            None | Some("" | "all") => None,
            Some(status) => Some(status.parse::<TripStatus>()?),
        };
        Ok(TripFilter {
            query: self.q,
            status,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    pub location: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/trips", get(list_trips).post(create_trip))
        .route(
            "/trips/{id}",
            get(get_trip).patch(update_trip).delete(delete_trip),
        )
        .route("/stats/trips", get(trip_stats))
        .route("/weather", get(get_weather))
        .with_state(state)
}

async fn list_trips(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<Trip>>, ApiError> {
    let Query(query) = query?;
    let filter = query.into_filter()?;
    let trips = state
        .trips
        .search(&filter)
        .map_err(fault("Failed to fetch trips"))?;
    Ok(Json(trips))
}

async fn create_trip(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Trip>), ApiError> {
    const FAILED: &str = "Failed to create trip";

    let payload: NewTrip = parse_body(&body, FAILED)?;
    payload.validate()?;
    let trip = state.trips.create(payload).map_err(fault(FAILED))?;
    Ok((StatusCode::CREATED, Json(trip)))
}

async fn get_trip(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Trip>, ApiError> {
    state
        .trips
        .get_by_id(&id)
        .map_err(fault("Failed to fetch trip"))?
        .map(Json)
        .ok_or_else(trip_not_found)
}

async fn update_trip(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Trip>, ApiError> {
    const FAILED: &str = "Failed to update trip";

    let update: TripUpdate = parse_body(&body, FAILED)?;
    state
        .trips
        .update(&id, update)
        .map_err(fault(FAILED))?
        .map(Json)
        .ok_or_else(trip_not_found)
}

async fn delete_trip(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state
        .trips
        .delete(&id)
        .map_err(fault("Failed to delete trip"))?
    {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(trip_not_found())
    }
}

async fn trip_stats(State(state): State<AppState>) -> Result<Json<StatusCounts>, ApiError> {
    let counts = state
        .trips
        .status_counts()
        .map_err(fault("Failed to fetch trips"))?;
    Ok(Json(counts))
}

async fn get_weather(
    State(state): State<AppState>,
    query: Result<Query<WeatherQuery>, QueryRejection>,
) -> Result<Json<WeatherData>, ApiError> {
    let Query(query) = query?;
    let location = query
        .location
        .filter(|l| !l.is_empty())
        .ok_or_else(|| TripPlannerError::validation("Location parameter is required"))?;

    Ok(Json(state.weather.lookup(&location).await))
}
