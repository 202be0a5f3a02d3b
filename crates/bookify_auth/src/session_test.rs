// --- File: crates/bookify_auth/src/session_test.rs ---

use crate::session::{SessionStore, StoredSession};
use bookify_common::services::TokenProvider;

fn session(token: &str) -> StoredSession {
    StoredSession {
        access_token: token.to_string(),
        id_token: None,
    }
}

#[test]
fn in_memory_store_round_trips_a_token() {
    let store = SessionStore::in_memory();
    assert_eq!(store.access_token(), None);
    assert!(!store.is_logged_in());

    store.store(session("tok_abc")).unwrap();
    assert_eq!(store.access_token().as_deref(), Some("tok_abc"));
    assert!(store.is_logged_in());

    store.clear().unwrap();
    assert_eq!(store.access_token(), None);
}

#[test]
fn file_backed_store_persists_across_instances() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let store = SessionStore::with_file(path.clone());
    store.store(session("tok_abc")).unwrap();

    let reopened = SessionStore::with_file(path.clone());
    assert_eq!(reopened.access_token().as_deref(), Some("tok_abc"));

    reopened.clear().unwrap();
    assert!(!path.exists());

    let emptied = SessionStore::with_file(path);
    assert_eq!(emptied.access_token(), None);
}

#[test]
fn corrupt_session_file_reads_as_logged_out() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "not json at all").unwrap();

    let store = SessionStore::with_file(path);
    assert_eq!(store.access_token(), None);
    // Logging in again replaces the corrupt file.
    store.store(session("tok_new")).unwrap();
    assert_eq!(store.access_token().as_deref(), Some("tok_new"));
}
