// --- File: crates/bookify_common/src/models.rs ---

// Data structures shared across the client crates: the wire-facing booking
// entities and the request/outcome types the flow controller works with.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A bookable service from the catalog.
///
/// Immutable from the client's perspective; fetched from `GET /services` and
/// never mutated locally. Unknown fields (e.g. `createdAt`) are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Service {
    pub id: String,
    pub name: String,
    pub price: f64,
    /// Duration in minutes.
    pub duration: i64,
}

/// The body sent to `POST /bookings`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingRequest {
    #[serde(rename = "serviceId")]
    pub service_id: String,
    #[serde(rename = "startTime")]
    pub start_time: DateTime<Utc>,
}

/// Outcome of a booking submission.
///
/// A server-side rejection travels on the `Ok` channel with `success = false`
/// and the message extracted from the failure body; only transport or parse
/// failures surface as errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingOutcome {
    pub success: bool,
    pub booking_id: Option<String>,
    pub message: Option<String>,
}

/// Reference to the booked service inside a `/my-bookings` entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceRef {
    pub name: String,
}

/// An existing booking as returned by `GET /my-bookings`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Booking {
    pub id: String,
    /// Absent when the service was deleted after the booking was made.
    #[serde(default)]
    pub service: Option<ServiceRef>,
    #[serde(rename = "startTime")]
    pub start_time: DateTime<Utc>,
    #[serde(rename = "endTime")]
    pub end_time: DateTime<Utc>,
    pub status: String,
}

impl Booking {
    /// Service name for display, tolerating a missing service reference.
    pub fn service_name(&self) -> &str {
        self.service
            .as_ref()
            .map(|s| s.name.as_str())
            .unwrap_or("Unknown Service")
    }
}
