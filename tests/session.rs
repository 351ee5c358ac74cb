use taskboard::session::Session;
use tempfile::TempDir;

const HOSTED_SESSION: &str = r#"{
    "access_token": "eyJhbGciOiJIUzI1NiJ9.payload.sig",
    "token_type": "bearer",
    "expires_in": 3600,
    "expires_at": 1736951400,
    "refresh_token": "r-123",
    "user": {
        "id": "8d0f5f3e-1c2b-4a6f-9e4d-0b1f2a3c4d5e",
        "aud": "authenticated",
        "email": "u1@example.com",
        "app_metadata": { "provider": "email" }
    }
}"#;

#[test]
fn test_parse_hosted_session() {
    let session = Session::from_token(HOSTED_SESSION).unwrap();
    assert_eq!(session.owner_id(), "8d0f5f3e-1c2b-4a6f-9e4d-0b1f2a3c4d5e");
    assert_eq!(session.user.email.as_deref(), Some("u1@example.com"));
    assert_eq!(session.refresh_token.as_deref(), Some("r-123"));
    assert_eq!(session.expires_in, Some(3600));
}

#[test]
fn test_minimal_session_uses_defaults() {
    let session = Session::from_token(r#"{"access_token": "t", "user": {"id": "u1"}}"#).unwrap();
    assert_eq!(session.token_type, "bearer");
    assert_eq!(session.refresh_token, None);
    assert_eq!(session.user.email, None);
}

#[test]
fn test_blank_user_id_is_rejected() {
    assert!(Session::from_token(r#"{"access_token": "t", "user": {"id": "  "}}"#).is_err());
    assert!(Session::from_token("not json").is_err());
}

#[test]
fn test_save_and_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("session.json");

    assert!(Session::load(&path).unwrap().is_none());

    let session = Session::from_token(HOSTED_SESSION).unwrap();
    session.save(&path).unwrap();

    let loaded = Session::load(&path).unwrap().unwrap();
    assert_eq!(loaded, session);
}
