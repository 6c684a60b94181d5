//! Booking API HTTP client.

use std::time::Duration;

use reqwest::Url;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::domain::{Booking, BookingId, Station, StationId};

use super::error::ApiError;
use super::remote::RemoteApi;

/// Default base URL for the booking API.
const DEFAULT_BASE_URL: &str = "https://605c94c36d85de00170da8b4.mockapi.io";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// How much of an unparseable body to keep for diagnostics.
const BODY_EXCERPT_CHARS: usize = 500;

/// Configuration for the booking API client.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl ApiConfig {
    /// Create a config pointing at the default backend.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// HTTP client for the booking API.
///
/// Every request carries `Content-Type: application/json`; the backend
/// needs no authentication.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a new booking API client.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ApiError::InvalidConfig(format!("{}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidConfig(format!(
                "{} cannot be used as a base URL",
                config.base_url
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http, base_url })
    }

    /// The base URL requests are made against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build an endpoint URL, percent-encoding each path segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// GET an endpoint and return the body of a successful response.
    async fn get_text(&self, url: Url) -> Result<String, ApiError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(response.text().await?)
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Json {
        message: e.to_string(),
        body: Some(body.chars().take(BODY_EXCERPT_CHARS).collect()),
    })
}

/// Decode a booking list record by record, skipping those that do not decode.
///
/// Only a body that is not a JSON array fails as a whole.
fn decode_bookings(body: &str) -> Result<Vec<Booking>, ApiError> {
    let records: Vec<Value> = decode(body)?;

    Ok(records
        .into_iter()
        .filter_map(|record| {
            let id = record.get("id").map(Value::to_string).unwrap_or_default();
            serde_json::from_value(record)
                .map_err(|e| warn!(booking_id = %id, error = %e, "skipping malformed booking"))
                .ok()
        })
        .collect())
}

/// An absent booking comes back as an empty body or a JSON `null`.
fn is_empty_body(body: &str) -> bool {
    let trimmed = body.trim();
    trimmed.is_empty() || trimmed == "null"
}

impl RemoteApi for ApiClient {
    async fn get_stations(&self) -> Result<Vec<Station>, ApiError> {
        let body = self.get_text(self.endpoint(&["stations"])).await?;
        decode(&body)
    }

    async fn get_station_bookings(&self, station_id: &StationId) -> Result<Vec<Booking>, ApiError> {
        let url = self.endpoint(&["stations", station_id.as_str(), "bookings"]);
        let body = self.get_text(url).await?;
        decode_bookings(&body)
    }

    async fn get_booking(
        &self,
        station_id: &StationId,
        booking_id: &BookingId,
    ) -> Result<Option<Booking>, ApiError> {
        let url = self.endpoint(&[
            "stations",
            station_id.as_str(),
            "bookings",
            booking_id.as_str(),
        ]);

        let body = match self.get_text(url).await {
            Ok(body) => body,
            Err(ApiError::Status { status: 404, .. }) => return Ok(None),
            Err(e) => return Err(e),
        };

        if is_empty_body(&body) {
            return Ok(None);
        }

        decode(&body).map(Some)
    }
}
