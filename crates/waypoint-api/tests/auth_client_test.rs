//! Contract tests for AuthClient and the session-expiry forced logout.

use std::sync::Arc;

use waypoint_api::{ApiClient, ApiError};
use waypoint_core::config::ClientConfig;
use waypoint_core::credentials::{
    AuthUser, CredentialStore, Credentials, MemoryCredentialStore,
};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_with_store(
    mock_server: &MockServer,
    store: Arc<MemoryCredentialStore>,
) -> ApiClient {
    let config = ClientConfig::new(mock_server.uri())
        .unwrap()
        .with_timeout_secs(5);
    ApiClient::new(config, store).unwrap()
}

fn user_json() -> serde_json::Value {
    serde_json::json!({
        "id": 7,
        "email": "amira@example.com",
        "username": "amira",
        "name": "Amira",
        "full_name": "Amira B.",
        "role": "student",
        "permissions": [],
        "is_verified": true,
        "created_at": "2026-01-10T09:00:00"
    })
}

#[tokio::test]
async fn login_persists_credentials() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_partial_json(serde_json::json!({
            "email": "amira@example.com",
            "password": "secret123"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "access_token": "jwt-abc",
            "token_type": "bearer",
            "user": user_json(),
            "message": "Login successful"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = Arc::new(MemoryCredentialStore::new());
    let client = client_with_store(&mock_server, store.clone());

    let credentials = client
        .auth()
        .login("amira@example.com", "secret123")
        .await
        .unwrap();
    assert_eq!(credentials.token, "jwt-abc");
    assert_eq!(credentials.user.id, 7);

    // The store is the single source of truth for later calls.
    let stored = store.get().await.unwrap();
    assert_eq!(stored.token, "jwt-abc");
    assert_eq!(stored.user.email, "amira@example.com");
}

#[tokio::test]
async fn login_rejection_leaves_store_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "success": false,
            "error": "Invalid credentials"
        })))
        .mount(&mock_server)
        .await;

    let store = Arc::new(MemoryCredentialStore::new());
    let client = client_with_store(&mock_server, store.clone());

    let result = client.auth().login("amira@example.com", "wrong").await;
    match result.unwrap_err() {
        ApiError::Api { status, message, .. } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Invalid credentials");
        }
        other => panic!("expected ApiError::Api, got: {other:?}"),
    }
    assert!(store.get().await.is_none());
}

#[tokio::test]
async fn signup_defaults_username_and_student_role() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/signup"))
        .and(body_partial_json(serde_json::json!({
            "name": "Amira",
            "username": "amira",
            "role": "student"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "success": true,
            "access_token": "jwt-new",
            "token_type": "bearer",
            "user": user_json()
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = Arc::new(MemoryCredentialStore::new());
    let client = client_with_store(&mock_server, store.clone());

    let credentials = client
        .auth()
        .signup("Amira", "amira@example.com", "secret123", None)
        .await
        .unwrap();
    assert_eq!(credentials.token, "jwt-new");
    assert!(store.get().await.is_some());
}

#[tokio::test]
async fn me_sends_bearer_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .and(header("authorization", "Bearer jwt-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "user": user_json()
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = Arc::new(MemoryCredentialStore::with_credentials(Credentials {
        user: AuthUser {
            id: 7,
            name: "Amira".to_string(),
            email: "amira@example.com".to_string(),
            username: Some("amira".to_string()),
            role: Some("student".to_string()),
            is_verified: true,
        },
        token: "jwt-abc".to_string(),
    }));
    let client = client_with_store(&mock_server, store);

    let user = client.auth().me().await.unwrap();
    assert_eq!(user.id, 7);
    assert_eq!(user.name, "Amira");
}

#[tokio::test]
async fn expired_token_forces_logout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "success": false,
            "error": "Token expired"
        })))
        .mount(&mock_server)
        .await;

    let store = Arc::new(MemoryCredentialStore::with_credentials(Credentials {
        user: AuthUser {
            id: 7,
            name: "Amira".to_string(),
            email: "amira@example.com".to_string(),
            username: None,
            role: None,
            is_verified: false,
        },
        token: "stale".to_string(),
    }));
    let client = client_with_store(&mock_server, store.clone());

    let result = client.auth().me().await;
    assert!(matches!(result.unwrap_err(), ApiError::SessionExpired));
    // Forced logout: the stale credentials are gone.
    assert!(store.get().await.is_none());
}

#[tokio::test]
async fn logout_clears_store_without_backend_call() {
    let mock_server = MockServer::start().await;
    // No mock mounted: any request would 404 and fail the test via expect.

    let store = Arc::new(MemoryCredentialStore::with_credentials(Credentials {
        user: AuthUser {
            id: 7,
            name: "Amira".to_string(),
            email: "amira@example.com".to_string(),
            username: None,
            role: None,
            is_verified: false,
        },
        token: "jwt-abc".to_string(),
    }));
    let client = client_with_store(&mock_server, store.clone());

    client.auth().logout().await.unwrap();
    assert!(store.get().await.is_none());
}
