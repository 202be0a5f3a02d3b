// --- File: crates/bookify_flow/src/feedback.rs ---

use std::fmt;

/// User-facing feedback derived from flow outcomes.
///
/// Every variant maps to one dismissable message; none of them is fatal and
/// none triggers an automatic retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    /// The service catalog could not be loaded.
    ServicesUnavailable,
    /// The availability fetch failed or returned an unparseable shape.
    SlotsUnavailable,
    /// Availability loaded fine; the day just has nothing left.
    NoSlots,
    /// The user's booking list could not be loaded.
    BookingsUnavailable,
    /// Submission preconditions: a selection is missing.
    MissingSelection,
    /// Submission preconditions: no session token.
    NotLoggedIn,
    /// Submission preconditions: the selected slot is not a valid instant.
    InvalidSlot,
    /// The server rejected the booking; carries the server's message.
    BookingFailed(String),
    BookingConfirmed,
    /// Transport-level failure during submission.
    RequestFailed,
}

impl Feedback {
    /// Whether the message reports a problem (drives the CLI exit code).
    /// `NoSlots` is informational, not an error.
    pub fn is_error(&self) -> bool {
        !matches!(self, Feedback::BookingConfirmed | Feedback::NoSlots)
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feedback::ServicesUnavailable => write!(f, "Failed to load services."),
            Feedback::SlotsUnavailable => write!(f, "Failed to load available slots."),
            Feedback::NoSlots => write!(f, "No available slots for this date."),
            Feedback::BookingsUnavailable => write!(f, "Failed to load your bookings."),
            Feedback::MissingSelection => write!(f, "Please fill out all fields."),
            Feedback::NotLoggedIn => write!(f, "You must be logged in to book."),
            Feedback::InvalidSlot => write!(f, "Invalid time selected."),
            Feedback::BookingFailed(message) => write!(f, "Booking failed: {message}"),
            Feedback::BookingConfirmed => write!(f, "Booking successful!"),
            Feedback::RequestFailed => write!(f, "Something went wrong. Try again."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_message_carries_server_detail() {
        let feedback = Feedback::BookingFailed("slot_taken".to_string());
        assert!(feedback.to_string().contains("slot_taken"));
    }

    #[test]
    fn only_confirmation_and_no_slots_are_non_errors() {
        assert!(!Feedback::BookingConfirmed.is_error());
        assert!(!Feedback::NoSlots.is_error());
        assert!(Feedback::NotLoggedIn.is_error());
        assert!(Feedback::RequestFailed.is_error());
    }
}
