// --- File: crates/bookify_common/src/lib.rs ---

// Declare modules within this crate
pub mod http; // HTTP client utilities
pub mod logging; // Logging utilities
pub mod models; // Shared booking data structures
pub mod services; // Service abstractions

// Re-export the shared models for easier access
pub use models::{Booking, BookingOutcome, BookingRequest, Service, ServiceRef};

// Re-export the service seams for easier access
pub use services::{BookingService, BoxFuture, TokenProvider};

// Re-export HTTP utilities for easier access
pub use http::{create_client, HTTP_CLIENT};
