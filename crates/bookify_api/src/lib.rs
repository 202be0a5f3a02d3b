// --- File: crates/bookify_api/src/lib.rs ---
// Declare modules within this crate
pub mod client;
mod wire;

pub use client::{ApiError, BookingApiClient};
