// --- File: crates/bookify_api/src/wire.rs ---
//! Wire-level parsing for the booking backend's responses.
//!
//! The availability endpoint changed shape across backend versions: newer
//! deployments wrap the slot list in an object under an `availability` key,
//! older ones return the bare array. Both are tolerated here; the wrapped
//! form is the canonical contract.

use crate::client::ApiError;
use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum AvailabilityBody {
    Wrapped { availability: Vec<String> },
    Bare(Vec<String>),
}

/// Parses an availability response body into slot instants.
///
/// Any unrecognized shape, and any entry that is not a valid RFC 3339
/// instant, fails the whole response. An empty list is a valid response and
/// is distinct from a parse failure.
pub(crate) fn parse_availability(body: &str) -> Result<Vec<DateTime<Utc>>, ApiError> {
    let parsed: AvailabilityBody = serde_json::from_str(body)
        .map_err(|err| ApiError::Parse(format!("unrecognized availability shape: {err}")))?;

    let raw = match parsed {
        AvailabilityBody::Wrapped { availability } => availability,
        AvailabilityBody::Bare(slots) => slots,
    };

    raw.iter()
        .map(|slot| {
            DateTime::parse_from_rfc3339(slot)
                .map(|instant| instant.with_timezone(&Utc))
                .map_err(|err| ApiError::Parse(format!("invalid slot instant '{slot}': {err}")))
        })
        .collect()
}

#[derive(Deserialize, Default)]
struct ErrorBody {
    error: Option<String>,
}

/// Extracts the `error` field from a failure body, if there is one.
pub(crate) fn error_field(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.error)
}

/// Failure message for a non-success response: the `error` field when
/// present, the raw body otherwise.
pub(crate) fn failure_message(body: &str) -> String {
    error_field(body).unwrap_or_else(|| body.trim().to_string())
}

#[derive(Deserialize, Default)]
struct CreatedBody {
    id: Option<String>,
}

/// Booking id from a creation success body. The success shape is not pinned
/// down by the backend, so anything unparseable simply yields no id.
pub(crate) fn booking_id(body: &str) -> Option<String> {
    serde_json::from_str::<CreatedBody>(body)
        .ok()
        .and_then(|parsed| parsed.id)
}
