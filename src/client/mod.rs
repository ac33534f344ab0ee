//! HTTP client for the trips API
//!
//! Used by the CLI to talk to a running server. Error responses are turned
//! back into [`TripPlannerError`]s carrying the server's `error` message.

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::models::{NewTrip, Trip, TripUpdate, WeatherData};
use crate::{Result, TripPlannerError};

pub mod state;

pub use state::ClientState;

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// `base_url` points at the API root, e.g. `http://localhost:3000/api`
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("TripPlanner/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TripPlannerError::api(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn trip_url(&self, id: &str) -> String {
        self.url(&format!("/trips/{}", urlencoding::encode(id)))
    }

    async fn send(request: RequestBuilder) -> Result<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| TripPlannerError::api(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .map(|body| body.error)
            .unwrap_or_else(|_| status.to_string());
        debug!(%status, "API request failed: {message}");

        Err(match status {
            StatusCode::BAD_REQUEST => TripPlannerError::validation(message),
            StatusCode::NOT_FOUND => TripPlannerError::not_found(message),
            _ => TripPlannerError::api(message),
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        response
            .json()
            .await
            .map_err(|e| TripPlannerError::api(format!("Invalid response body: {e}")))
    }

    /// All trips, optionally filtered by search text and status
    #[instrument(skip(self))]
    pub async fn list_trips(&self, query: Option<&str>, status: Option<&str>) -> Result<Vec<Trip>> {
        let mut params = Vec::new();
        if let Some(q) = query {
            params.push(format!("q={}", urlencoding::encode(q)));
        }
        if let Some(status) = status {
            params.push(format!("status={}", urlencoding::encode(status)));
        }
        let mut url = self.url("/trips");
        if !params.is_empty() {
            url = format!("{url}?{}", params.join("&"));
        }

        Self::decode(Self::send(self.client.get(url)).await?).await
    }

    /// Trip by id; `None` when the server answers 404
    #[instrument(skip(self))]
    pub async fn get_trip(&self, id: &str) -> Result<Option<Trip>> {
        match Self::send(self.client.get(self.trip_url(id))).await {
            Ok(response) => Self::decode(response).await.map(Some),
            Err(TripPlannerError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    #[instrument(skip_all)]
    pub async fn create_trip(&self, trip: &NewTrip) -> Result<Trip> {
        let request = self.client.post(self.url("/trips")).json(trip);
        Self::decode(Self::send(request).await?).await
    }

    #[instrument(skip(self, update))]
    pub async fn update_trip(&self, id: &str, update: &TripUpdate) -> Result<Trip> {
        let request = self.client.patch(self.trip_url(id)).json(update);
        Self::decode(Self::send(request).await?).await
    }

    #[instrument(skip(self))]
    pub async fn delete_trip(&self, id: &str) -> Result<()> {
        Self::send(self.client.delete(self.trip_url(id))).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn weather(&self, location: &str) -> Result<WeatherData> {
        let url = self.url(&format!(
            "/weather?location={}",
            urlencoding::encode(location)
        ));
        Self::decode(Self::send(self.client.get(url)).await?).await
    }

    /// Fetch the server's trips and merge them into `state`
    pub async fn refresh(&self, state: &mut ClientState) -> Result<()> {
        let trips = self.list_trips(None, None).await?;
        state.merge_server_trips(trips);
        Ok(())
    }
}
