// --- File: crates/bookify_auth/src/lib.rs ---
// Declare modules within this crate
pub mod client;
#[cfg(test)]
mod client_test;
pub mod session;
#[cfg(test)]
mod session_test;

pub use client::{AuthClient, AuthError, LoginTokens};
pub use session::{SessionStore, StoredSession};
