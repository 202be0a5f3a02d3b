// --- File: crates/bookify_api/src/client.rs ---
//! REST client for the booking backend.
//!
//! Implements the `BookingService` seam over the four endpoints the client
//! consumes: `/services`, `/availability`, `/bookings` and `/my-bookings`.

use bookify_common::http::HTTP_CLIENT;
use bookify_common::models::{Booking, BookingOutcome, BookingRequest, Service};
use bookify_common::services::{BookingService, BoxFuture};
use bookify_config::ApiConfig;
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::{debug, warn};

use crate::wire;

// --- Error Handling ---
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("booking API request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("booking API returned an error: status={status}, message='{message}'")]
    Api { status: StatusCode, message: String },
    #[error("failed to parse booking API response: {0}")]
    Parse(String),
}

/// Client for the booking backend.
pub struct BookingApiClient {
    client: Client,
    base_url: String,
}

impl BookingApiClient {
    /// Create a client using the shared process-wide HTTP client.
    pub fn new(config: &ApiConfig) -> Self {
        Self::with_client(HTTP_CLIENT.clone(), &config.base_url)
    }

    /// Create a client with a custom `reqwest::Client` (e.g. custom timeout).
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_services(&self) -> Result<Vec<Service>, ApiError> {
        let response = self.client.get(self.url("/services")).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::Api {
                status,
                message: wire::failure_message(&body),
            });
        }

        let services: Vec<Service> = serde_json::from_str(&body)
            .map_err(|err| ApiError::Parse(format!("unrecognized service catalog: {err}")))?;
        debug!("Fetched {} services from catalog", services.len());
        Ok(services)
    }

    async fn get_availability(
        &self,
        service_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<DateTime<Utc>>, ApiError> {
        let date_param = date.format("%Y-%m-%d").to_string();
        let response = self
            .client
            .get(self.url("/availability"))
            .query(&[("serviceId", service_id), ("date", date_param.as_str())])
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::Api {
                status,
                message: wire::failure_message(&body),
            });
        }

        let slots = wire::parse_availability(&body)?;
        debug!(
            "Fetched {} slots for service {} on {}",
            slots.len(),
            service_id,
            date_param
        );
        Ok(slots)
    }

    async fn post_booking(
        &self,
        request: BookingRequest,
        token: &str,
    ) -> Result<BookingOutcome, ApiError> {
        let response = self
            .client
            .post(self.url("/bookings"))
            .bearer_auth(token)
            .json(&request)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            Ok(BookingOutcome {
                success: true,
                booking_id: wire::booking_id(&body),
                message: None,
            })
        } else {
            // A rejection is a business outcome, not a transport failure.
            let message = wire::error_field(&body);
            warn!(
                "Booking rejected for service {}: status={}, message={:?}",
                request.service_id, status, message
            );
            Ok(BookingOutcome {
                success: false,
                booking_id: None,
                message,
            })
        }
    }

    async fn get_my_bookings(&self, token: &str) -> Result<Vec<Booking>, ApiError> {
        let response = self
            .client
            .get(self.url("/my-bookings"))
            .bearer_auth(token)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::Api {
                status,
                message: wire::failure_message(&body),
            });
        }

        serde_json::from_str(&body)
            .map_err(|err| ApiError::Parse(format!("unrecognized bookings list: {err}")))
    }
}

impl BookingService for BookingApiClient {
    type Error = ApiError;

    fn list_services(&self) -> BoxFuture<'_, Vec<Service>, Self::Error> {
        Box::pin(self.get_services())
    }

    fn availability(
        &self,
        service_id: &str,
        date: NaiveDate,
    ) -> BoxFuture<'_, Vec<DateTime<Utc>>, Self::Error> {
        let service_id = service_id.to_string();
        Box::pin(async move { self.get_availability(&service_id, date).await })
    }

    fn create_booking(
        &self,
        request: BookingRequest,
        token: &str,
    ) -> BoxFuture<'_, BookingOutcome, Self::Error> {
        let token = token.to_string();
        Box::pin(async move { self.post_booking(request, &token).await })
    }

    fn my_bookings(&self, token: &str) -> BoxFuture<'_, Vec<Booking>, Self::Error> {
        let token = token.to_string();
        Box::pin(async move { self.get_my_bookings(&token).await })
    }
}
