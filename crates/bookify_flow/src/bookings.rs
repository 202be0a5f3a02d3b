// --- File: crates/bookify_flow/src/bookings.rs ---
//! View controller for the user's existing bookings.

use bookify_common::models::Booking;
use bookify_common::services::{BookingService, TokenProvider};
use std::sync::Arc;
use tracing::warn;

use crate::feedback::Feedback;

pub struct MyBookings<S, P> {
    api: Arc<S>,
    tokens: Arc<P>,
    bookings: Vec<Booking>,
    loading: bool,
    feedback: Option<Feedback>,
}

impl<S, P> MyBookings<S, P>
where
    S: BookingService,
    P: TokenProvider,
{
    pub fn new(api: Arc<S>, tokens: Arc<P>) -> Self {
        Self {
            api,
            tokens,
            bookings: Vec::new(),
            loading: false,
            feedback: None,
        }
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    /// Load the authenticated user's bookings.
    ///
    /// A missing token is a precondition failure and makes no network call.
    pub async fn load(&mut self) {
        let Some(token) = self.tokens.access_token() else {
            self.feedback = Some(Feedback::NotLoggedIn);
            return;
        };

        self.loading = true;
        match self.api.my_bookings(&token).await {
            Ok(bookings) => {
                self.bookings = bookings;
                self.feedback = None;
            }
            Err(err) => {
                warn!("Failed to load bookings: {err}");
                self.feedback = Some(Feedback::BookingsUnavailable);
            }
        }
        self.loading = false;
    }
}
