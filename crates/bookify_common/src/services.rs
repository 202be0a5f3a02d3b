// --- File: crates/bookify_common/src/services.rs ---
//! Service abstractions for the external collaborators.
//!
//! The booking backend and the identity provider are reached through these
//! traits so the flow controller can be exercised with test doubles instead
//! of live HTTP endpoints.

use crate::models::{Booking, BookingOutcome, BookingRequest, Service};
use chrono::{DateTime, NaiveDate, Utc};
use std::future::Future;
use std::pin::Pin;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// A trait for the remote booking API.
///
/// Mirrors the four REST operations the client consumes. Implementations
/// decide how failures are represented; callers only need the error to be
/// displayable and to know that a server-side booking rejection arrives as
/// `BookingOutcome { success: false, .. }` rather than as an `Err`.
pub trait BookingService: Send + Sync {
    /// Error type returned by booking API operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch the service catalog.
    fn list_services(&self) -> BoxFuture<'_, Vec<Service>, Self::Error>;

    /// Fetch available slot instants for a (service, date) pair.
    ///
    /// An `Ok` with an empty vector means the day is fully booked; a shape
    /// the implementation cannot recognize is an error.
    fn availability(
        &self,
        service_id: &str,
        date: NaiveDate,
    ) -> BoxFuture<'_, Vec<DateTime<Utc>>, Self::Error>;

    /// Submit a booking with the caller's bearer token attached.
    fn create_booking(
        &self,
        request: BookingRequest,
        token: &str,
    ) -> BoxFuture<'_, BookingOutcome, Self::Error>;

    /// Fetch the authenticated user's bookings.
    fn my_bookings(&self, token: &str) -> BoxFuture<'_, Vec<Booking>, Self::Error>;
}

/// A trait for reading the current session's bearer token.
///
/// The token is owned by the authentication collaborator; flow controllers
/// only read it immediately before an authenticated call. `None` means the
/// user is not logged in, which is a precondition failure rather than a
/// network error.
pub trait TokenProvider: Send + Sync {
    fn access_token(&self) -> Option<String>;
}
