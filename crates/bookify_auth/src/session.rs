// --- File: crates/bookify_auth/src/session.rs ---
//! Session storage for the logged-in user's tokens.
//!
//! The store is the single owner of the bearer token; other crates read it
//! through the `TokenProvider` seam. It can optionally be backed by a JSON
//! file so separate invocations of the CLI share one session.

use crate::client::{AuthError, LoginTokens};
use bookify_common::services::TokenProvider;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{debug, warn};

/// The persisted shape of a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredSession {
    pub access_token: String,
    pub id_token: Option<String>,
}

impl From<LoginTokens> for StoredSession {
    fn from(tokens: LoginTokens) -> Self {
        Self {
            access_token: tokens.access_token,
            id_token: tokens.id_token,
        }
    }
}

/// In-memory session store with optional file persistence.
pub struct SessionStore {
    path: Option<PathBuf>,
    session: Mutex<Option<StoredSession>>,
}

impl SessionStore {
    /// A store that lives only for the current process.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            session: Mutex::new(None),
        }
    }

    /// A store backed by a JSON file, seeded from it when it exists.
    ///
    /// An unreadable or corrupt file is treated as "not logged in" rather
    /// than an error; logging in again rewrites it.
    pub fn with_file(path: PathBuf) -> Self {
        let session = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<StoredSession>(&contents) {
                Ok(session) => {
                    debug!("Loaded session from {}", path.display());
                    Some(session)
                }
                Err(err) => {
                    warn!("Ignoring corrupt session file {}: {}", path.display(), err);
                    None
                }
            },
            Err(_) => None,
        };

        Self {
            path: Some(path),
            session: Mutex::new(session),
        }
    }

    /// Replace the stored session, persisting it when file-backed.
    pub fn store(&self, session: StoredSession) -> Result<(), AuthError> {
        if let Some(path) = &self.path {
            let contents = serde_json::to_string_pretty(&session)
                .map_err(|err| AuthError::Parse(err.to_string()))?;
            fs::write(path, contents)?;
        }
        *self.session.lock().expect("session lock poisoned") = Some(session);
        Ok(())
    }

    /// Forget the session and remove the backing file, if any.
    pub fn clear(&self) -> Result<(), AuthError> {
        if let Some(path) = &self.path {
            if path.exists() {
                fs::remove_file(path)?;
            }
        }
        *self.session.lock().expect("session lock poisoned") = None;
        Ok(())
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.lock().expect("session lock poisoned").is_some()
    }
}

impl TokenProvider for SessionStore {
    fn access_token(&self) -> Option<String> {
        self.session
            .lock()
            .expect("session lock poisoned")
            .as_ref()
            .map(|session| session.access_token.clone())
    }
}
