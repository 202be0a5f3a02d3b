// --- File: crates/bookify_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- Booking API Config ---
// Base URL of the booking backend this client talks to.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiConfig {
    pub base_url: String, // e.g. http://localhost:4000, loaded via BOOKIFY_API__BASE_URL
}

// --- Identity Provider Config ---
// Holds non-secret settings for the hosted identity provider.
// Credentials are never stored here; the password comes from BOOKIFY_PASSWORD.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AuthConfig {
    pub provider_url: String, // Mandatory
    pub client_id: Option<String>,
    pub redirect_url: Option<String>,
}

// --- Session Config ---
// Where the logged-in session is persisted between invocations.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct SessionConfig {
    pub file: Option<String>,
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Booking API config is mandatory
    pub api: ApiConfig,

    // --- Optional Feature Configurations ---
    #[serde(default)]
    pub auth: Option<AuthConfig>,
    #[serde(default)]
    pub session: Option<SessionConfig>,
}
