use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use thiserror::Error;
use tracing::{debug, warn};

use crate::booking::Booking;
use crate::listing::Listing;
use crate::registration::RegisterRequest;

// Error types for the backend collaborator
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("server responded {status}: {message}")]
    Response { status: u16, message: String },

    #[error("could not decode server payload: {0}")]
    Decode(String),

    #[error("user already exists")]
    UserAlreadyExists,
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:4000".to_string(),
            timeout_ms: 10_000,
        }
    }
}

// Request counters, snapshotted per call
#[derive(Debug, Default, Clone)]
pub struct ClientStats {
    pub requests_sent: usize,
    pub requests_succeeded: usize,
    pub requests_failed: usize,
}

// The backend surface the catalog pages depend on: one atomic listing
// payload, the admin booking reads and deletes, and registration.
#[async_trait]
pub trait CatalogApi: Send + Sync + 'static {
    // Fetch the full listing collection as one ordered payload
    async fn fetch_places(&self) -> Result<Vec<Listing>, ApiError>;

    // Fetch the bookings recorded against one place
    async fn booking_info(&self, place_id: &str) -> Result<Vec<Booking>, ApiError>;

    // Delete a booking by identifier
    async fn cancel_booking(&self, booking_id: &str) -> Result<(), ApiError>;

    // Create a user from already-validated fields
    async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError>;

    // Get client statistics
    fn stats(&self) -> ClientStats;
}

// HTTP implementation against the booking platform server
pub struct HttpCatalogClient {
    http: reqwest::Client,
    config: ClientConfig,
    stats: Mutex<ClientStats>,
}

impl HttpCatalogClient {
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            config,
            stats: Mutex::new(ClientStats::default()),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    async fn ok_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(ApiError::Response {
            status: status.as_u16(),
            message,
        })
    }

    fn finish<T>(&self, op: &str, result: Result<T, ApiError>) -> Result<T, ApiError> {
        let mut stats = self.stats.lock();
        stats.requests_sent += 1;
        match &result {
            Ok(_) => stats.requests_succeeded += 1,
            Err(err) => {
                stats.requests_failed += 1;
                warn!(op, %err, "request failed");
            }
        }
        result
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogClient {
    async fn fetch_places(&self) -> Result<Vec<Listing>, ApiError> {
        debug!("GET /places");
        let result: Result<Vec<Listing>, ApiError> = async {
            let response = self.http.get(self.url("/places")).send().await?;
            let response = Self::ok_status(response).await?;
            Ok(response.json().await?)
        }
        .await;

        self.finish("fetch_places", result)
    }

    async fn booking_info(&self, place_id: &str) -> Result<Vec<Booking>, ApiError> {
        debug!(place_id, "GET /booking-info");
        let result: Result<Vec<Booking>, ApiError> = async {
            let url = self.url(&format!("/booking-info/{}", place_id));
            let response = self.http.get(url).send().await?;
            let response = Self::ok_status(response).await?;
            Ok(response.json().await?)
        }
        .await;

        self.finish("booking_info", result)
    }

    async fn cancel_booking(&self, booking_id: &str) -> Result<(), ApiError> {
        debug!(booking_id, "DELETE /adminCancelBooking");
        let result: Result<(), ApiError> = async {
            let url = self.url(&format!("/adminCancelBooking/{}", booking_id));
            let response = self.http.delete(url).send().await?;
            Self::ok_status(response).await?;
            Ok(())
        }
        .await;

        self.finish("cancel_booking", result)
    }

    async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        debug!(email = %request.email, "POST /register");
        let result: Result<(), ApiError> = async {
            let response = self
                .http
                .post(self.url("/register"))
                .json(request)
                .send()
                .await?;
            if response.status() == reqwest::StatusCode::CONFLICT {
                return Err(ApiError::UserAlreadyExists);
            }
            Self::ok_status(response).await?;
            Ok(())
        }
        .await;

        self.finish("register", result)
    }

    fn stats(&self) -> ClientStats {
        self.stats.lock().clone()
    }
}
