// --- File: crates/bookify_auth/src/client_test.rs ---

use crate::client::{parse_login_response, AuthError};

#[test]
fn successful_login_yields_tokens() {
    let body = r#"{"data": {"access_token": "tok_abc", "id_token": "idt_xyz"}}"#;
    let tokens = parse_login_response(body).unwrap();
    assert_eq!(tokens.access_token, "tok_abc");
    assert_eq!(tokens.id_token.as_deref(), Some("idt_xyz"));
}

#[test]
fn id_token_is_optional() {
    let body = r#"{"data": {"access_token": "tok_abc"}}"#;
    let tokens = parse_login_response(body).unwrap();
    assert!(tokens.id_token.is_none());
}

#[test]
fn provider_errors_become_credential_failures() {
    let body = r#"{"errors": [{"message": "bad password"}]}"#;
    let err = parse_login_response(body).unwrap_err();
    match err {
        AuthError::Credentials(message) => assert_eq!(message, "bad password"),
        other => panic!("expected credential failure, got {other:?}"),
    }
}

#[test]
fn missing_access_token_is_a_credential_failure() {
    let err = parse_login_response(r#"{"data": {}}"#).unwrap_err();
    assert!(matches!(err, AuthError::Credentials(_)));

    let err = parse_login_response(r#"{}"#).unwrap_err();
    assert!(matches!(err, AuthError::Credentials(_)));
}

#[test]
fn garbage_body_is_a_parse_error() {
    let err = parse_login_response("<html>oops</html>").unwrap_err();
    assert!(matches!(err, AuthError::Parse(_)));
}
