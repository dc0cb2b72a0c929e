//! File-backed credential store.
//!
//! Persists the authenticated identity and bearer token as a TOML document
//! so the session survives client restarts. The file is loaded once when
//! the store opens and cached in memory; writes go to both the cache and
//! the file, and `clear` removes the file.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use waypoint_core::credentials::{CredentialStore, Credentials};
use waypoint_core::error::{Result, WaypointError};

use crate::paths;

/// Credential store persisting to a TOML file under the user config dir.
#[derive(Clone)]
pub struct TomlCredentialStore {
    path: PathBuf,
    cache: Arc<RwLock<Option<Credentials>>>,
}

impl TomlCredentialStore {
    /// Opens the store at the default location, loading any persisted
    /// credentials.
    ///
    /// A corrupt or partially written file is treated as absent rather than
    /// failing the open; the next login overwrites it.
    pub async fn open_default() -> Result<Self> {
        Self::open(paths::credentials_file()?).await
    }

    /// Opens the store at an explicit path.
    pub async fn open(path: PathBuf) -> Result<Self> {
        let cache = match tokio::fs::read_to_string(&path).await {
            Ok(content) => match toml::from_str::<Credentials>(&content) {
                Ok(credentials) => Some(credentials),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable credentials file");
                    None
                }
            },
            Err(_) => None,
        };

        Ok(Self {
            path,
            cache: Arc::new(RwLock::new(cache)),
        })
    }

    async fn write_file(&self, credentials: &Credentials) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| WaypointError::io(format!("failed to create {}: {e}", parent.display())))?;
        }
        let content = toml::to_string_pretty(credentials)?;
        tokio::fs::write(&self.path, content)
            .await
            .map_err(|e| WaypointError::io(format!("failed to write {}: {e}", self.path.display())))
    }
}

#[async_trait]
impl CredentialStore for TomlCredentialStore {
    async fn get(&self) -> Option<Credentials> {
        self.cache.read().await.clone()
    }

    async fn set(&self, credentials: Credentials) -> Result<()> {
        self.write_file(&credentials).await?;
        *self.cache.write().await = Some(credentials);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.cache.write().await = None;
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(WaypointError::io(format!(
                "failed to remove {}: {e}",
                self.path.display()
            ))),
        }
    }
}
