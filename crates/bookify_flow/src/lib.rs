// --- File: crates/bookify_flow/src/lib.rs ---
// Declare modules within this crate
pub mod bookings;
pub mod controller;
pub mod feedback;

pub use bookings::MyBookings;
pub use controller::BookingFlow;
pub use feedback::Feedback;
