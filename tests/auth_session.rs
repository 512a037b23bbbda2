//! Login flow and the persisted session file.

mod common;

use common::{client, MockBackend, MockResponse};
use fleetdesk::api::{ApiError, AuthApi};
use fleetdesk::domain::AdminProfile;
use fleetdesk::session::{SecureString, Session, SessionError, SessionStore};
use serde_json::json;
use tempfile::TempDir;

fn profile() -> AdminProfile {
    AdminProfile {
        id: "adm1".to_string(),
        name: "Asha".to_string(),
        email: "asha@example.com".to_string(),
        role: Some("superadmin".to_string()),
    }
}

#[tokio::test]
async fn login_installs_token_for_later_requests() {
    let backend = MockBackend::start().await;
    backend
        .enqueue(MockResponse::value(json!({
            "data": {
                "token": "jwt-123",
                "admin": {"_id": "adm1", "name": "Asha", "email": "asha@example.com"}
            }
        })))
        .await;
    backend
        .enqueue(MockResponse::value(json!({
            "data": {"_id": "adm1", "name": "Asha", "email": "asha@example.com", "role": "ops"}
        })))
        .await;

    let api_client = client(&backend.api_url());
    let auth = AuthApi::new(api_client.clone());
    let login = auth.login("asha@example.com", "secret").await.unwrap();
    assert_eq!(login.token.expose(), "jwt-123");
    assert_eq!(login.profile.display_name(), "Asha");
    assert!(api_client.has_token());

    let profile = auth.profile().await.unwrap();
    assert_eq!(profile.role.as_deref(), Some("ops"));

    let requests = backend.captured_requests().await;
    assert_eq!(requests[0].line(), "POST /api/auth/login");
    assert_eq!(
        requests[0].json(),
        json!({"email": "asha@example.com", "password": "secret"})
    );
    assert_eq!(requests[0].header("authorization"), None);
    assert_eq!(requests[1].line(), "GET /api/auth/profile");
    assert_eq!(requests[1].header("authorization"), Some("Bearer jwt-123"));
}

#[tokio::test]
async fn rejected_login_leaves_client_anonymous() {
    let backend = MockBackend::start().await;
    backend
        .enqueue(MockResponse::error(401, "Invalid credentials"))
        .await;

    let api_client = client(&backend.api_url());
    let err = AuthApi::new(api_client.clone())
        .login("asha@example.com", "wrong")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized { ref message } if message == "Invalid credentials"));
    assert!(!api_client.has_token());
}

#[tokio::test]
async fn profile_without_token_skips_the_request() {
    let backend = MockBackend::start().await;
    let err = AuthApi::new(client(&backend.api_url()))
        .profile()
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized { .. }));
    assert!(backend.captured_requests().await.is_empty());
}

#[test]
fn session_round_trips_and_clears() {
    let dir = TempDir::new().unwrap();
    let store = SessionStore::new(dir.path().join("nested").join("session.json"));

    let empty = store.load().unwrap();
    assert!(!empty.is_logged_in());

    let session = Session {
        token: Some(SecureString::new("jwt-123".to_string())),
        profile: Some(profile()),
    };
    store.save(&session).unwrap();
    let loaded = store.load().unwrap();
    assert_eq!(loaded, session);
    assert!(loaded.is_logged_in());

    store.clear().unwrap();
    assert!(!store.path().exists());
    // Clearing twice is fine
    store.clear().unwrap();
}

#[cfg(unix)]
#[test]
fn session_file_is_private() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let store = SessionStore::new(dir.path().join("session.json"));
    store.save(&Session::default()).unwrap();
    let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn cache_profile_keeps_token() {
    let dir = TempDir::new().unwrap();
    let store = SessionStore::new(dir.path().join("session.json"));
    store
        .save(&Session {
            token: Some(SecureString::new("jwt-123".to_string())),
            profile: None,
        })
        .unwrap();

    let session = store.cache_profile(profile()).unwrap();
    assert_eq!(session.token.as_ref().map(SecureString::expose), Some("jwt-123"));
    assert_eq!(store.load().unwrap().profile, Some(profile()));
}

#[test]
fn corrupt_session_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "{not json").unwrap();
    let err = SessionStore::new(path).load().unwrap_err();
    assert!(matches!(err, SessionError::Corrupt { .. }));
}

#[test]
fn token_never_appears_in_debug_output() {
    let session = Session {
        token: Some(SecureString::new("jwt-123".to_string())),
        profile: None,
    };
    assert!(!format!("{:?}", session).contains("jwt-123"));
}
