//! Authenticated identity and credential storage.
//!
//! The bearer token and stored identity are read by every outgoing call and
//! written only by the auth flows (login, signup, logout). Readers take a
//! snapshot per call rather than subscribing to live mutation, so a logout
//! racing an in-flight call cannot break that call's response handler.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

/// The authenticated user as returned by the backend auth endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
}

impl AuthUser {
    /// Whether this user holds the admin role.
    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some("admin")
    }
}

/// A stored identity plus its bearer token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub user: AuthUser,
    pub token: String,
}

/// Storage for the authenticated identity and bearer token.
///
/// Single-writer discipline: only the auth flows call `set`/`clear`.
/// `get` returns a snapshot; callers must tolerate the snapshot going
/// stale (e.g. a missing token at response time).
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Returns a snapshot of the stored credentials, if any.
    async fn get(&self) -> Option<Credentials>;

    /// Replaces the stored credentials.
    async fn set(&self, credentials: Credentials) -> crate::error::Result<()>;

    /// Clears the stored credentials (logout or forced logout).
    async fn clear(&self) -> crate::error::Result<()>;
}

/// In-memory credential store.
///
/// Suitable for tests and for callers that manage persistence themselves.
#[derive(Debug, Clone, Default)]
pub struct MemoryCredentialStore {
    credentials: Arc<RwLock<Option<Credentials>>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with credentials.
    pub fn with_credentials(credentials: Credentials) -> Self {
        Self {
            credentials: Arc::new(RwLock::new(Some(credentials))),
        }
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn get(&self) -> Option<Credentials> {
        self.credentials.read().await.clone()
    }

    async fn set(&self, credentials: Credentials) -> crate::error::Result<()> {
        *self.credentials.write().await = Some(credentials);
        Ok(())
    }

    async fn clear(&self) -> crate::error::Result<()> {
        *self.credentials.write().await = None;
        Ok(())
    }
}
