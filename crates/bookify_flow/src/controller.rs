// --- File: crates/bookify_flow/src/controller.rs ---
//! The booking flow controller.
//!
//! Holds the user's in-progress selection (service, date, slot), sequences
//! the dependent fetches against the booking API, and derives user-facing
//! feedback from each outcome. Availability is a lagging pure function of
//! the (service, date) pair: any change of either re-fetches the whole set,
//! nothing is patched incrementally.

use bookify_common::models::{BookingRequest, Service};
use bookify_common::services::{BookingService, TokenProvider};
use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::feedback::Feedback;

pub struct BookingFlow<S, P> {
    api: Arc<S>,
    tokens: Arc<P>,
    services: Vec<Service>,
    selected_service: Option<String>,
    selected_date: Option<NaiveDate>,
    available_slots: Vec<DateTime<Utc>>,
    selected_slot: Option<String>,
    loading: bool,
    feedback: Option<Feedback>,
}

impl<S, P> BookingFlow<S, P>
where
    S: BookingService,
    P: TokenProvider,
{
    pub fn new(api: Arc<S>, tokens: Arc<P>) -> Self {
        Self {
            api,
            tokens,
            services: Vec::new(),
            selected_service: None,
            selected_date: None,
            available_slots: Vec::new(),
            selected_slot: None,
            loading: false,
            feedback: None,
        }
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn selected_service(&self) -> Option<&str> {
        self.selected_service.as_deref()
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    pub fn available_slots(&self) -> &[DateTime<Utc>] {
        &self.available_slots
    }

    pub fn selected_slot(&self) -> Option<&str> {
        self.selected_slot.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn dismiss_feedback(&mut self) {
        self.feedback = None;
    }

    /// Load the service catalog. Called once at startup; a failure is
    /// terminal until the flow is recreated, there is no retry.
    pub async fn load_services(&mut self) {
        match self.api.list_services().await {
            Ok(services) => {
                debug!("Loaded {} services", services.len());
                self.services = services;
            }
            Err(err) => {
                warn!("Failed to load services: {err}");
                self.services.clear();
                self.feedback = Some(Feedback::ServicesUnavailable);
            }
        }
    }

    /// Select a service. The previously selected slot belonged to the old
    /// (service, date) pair, so it is dropped and availability re-fetched.
    pub async fn set_service(&mut self, service_id: impl Into<String>) {
        let service_id = service_id.into();
        if self.selected_service.as_deref() == Some(service_id.as_str()) {
            return;
        }
        self.selected_service = Some(service_id);
        self.selected_slot = None;
        self.load_availability().await;
    }

    /// Select a date; same invalidation rule as `set_service`.
    pub async fn set_date(&mut self, date: NaiveDate) {
        if self.selected_date == Some(date) {
            return;
        }
        self.selected_date = Some(date);
        self.selected_slot = None;
        self.load_availability().await;
    }

    pub fn select_slot(&mut self, slot: impl Into<String>) {
        self.selected_slot = Some(slot.into());
    }

    /// Fetch availability for the current (service, date) pair.
    ///
    /// No-op while the selection is partial. A well-formed empty set raises
    /// the distinct "no slots" message; a failed or unparseable fetch clears
    /// the slots and raises a load error instead of silently keeping stale
    /// ones.
    ///
    /// The exclusive borrow serializes fetches: a later selection change
    /// cannot start its fetch until this one has settled, so completions
    /// apply in selection order.
    pub async fn load_availability(&mut self) {
        let (Some(service_id), Some(date)) = (self.selected_service.clone(), self.selected_date)
        else {
            return;
        };

        match self.api.availability(&service_id, date).await {
            Ok(slots) if slots.is_empty() => {
                self.available_slots.clear();
                self.feedback = Some(Feedback::NoSlots);
            }
            Ok(slots) => {
                self.available_slots = slots;
                self.feedback = None;
            }
            Err(err) => {
                warn!("Failed to load slots for {service_id} on {date}: {err}");
                self.available_slots.clear();
                self.feedback = Some(Feedback::SlotsUnavailable);
            }
        }
    }

    /// Advisory only: the submit action is disabled while a submission is in
    /// flight, but this is not a mutual-exclusion guarantee.
    pub fn can_submit(&self) -> bool {
        !self.loading
            && self.selected_service.is_some()
            && self.selected_date.is_some()
            && self.selected_slot.is_some()
    }

    /// Submit the current draft.
    ///
    /// Preconditions are checked in order, short-circuiting before any
    /// network call: selections present, session token present, slot parses
    /// as an instant. `loading` is reset on every exit path.
    pub async fn submit_booking(&mut self) {
        let (Some(service_id), Some(_date), Some(slot)) = (
            self.selected_service.clone(),
            self.selected_date,
            self.selected_slot.clone(),
        ) else {
            self.feedback = Some(Feedback::MissingSelection);
            return;
        };

        let Some(token) = self.tokens.access_token() else {
            self.feedback = Some(Feedback::NotLoggedIn);
            return;
        };

        let Ok(start_time) = DateTime::parse_from_rfc3339(&slot) else {
            self.feedback = Some(Feedback::InvalidSlot);
            return;
        };

        self.loading = true;
        self.feedback = None;

        let request = BookingRequest {
            service_id,
            start_time: start_time.with_timezone(&Utc),
        };

        match self.api.create_booking(request, &token).await {
            Ok(outcome) if outcome.success => {
                debug!("Booking confirmed: {:?}", outcome.booking_id);
                self.feedback = Some(Feedback::BookingConfirmed);
                self.selected_slot = None;
                self.loading = false;
                // The just-booked slot is expected to vanish from the
                // refreshed set; that is the server's responsibility.
                self.refresh_availability().await;
            }
            Ok(outcome) => {
                let message = outcome
                    .message
                    .unwrap_or_else(|| "the server rejected the booking".to_string());
                self.feedback = Some(Feedback::BookingFailed(message));
                self.loading = false;
            }
            Err(err) => {
                warn!("Booking submission failed: {err}");
                self.feedback = Some(Feedback::RequestFailed);
                self.loading = false;
            }
        }
    }

    // Post-booking refresh for the same pair; keeps the success feedback in
    // place, unlike `load_availability`.
    async fn refresh_availability(&mut self) {
        let (Some(service_id), Some(date)) = (self.selected_service.clone(), self.selected_date)
        else {
            return;
        };

        match self.api.availability(&service_id, date).await {
            Ok(slots) => self.available_slots = slots,
            Err(err) => {
                warn!("Failed to refresh slots after booking: {err}");
                self.available_slots.clear();
            }
        }
    }
}
