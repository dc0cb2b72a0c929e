//! Client configuration.
//!
//! The backend base URL comes from the environment and defaults to the local
//! development host. Override via `WAYPOINT_API_URL` for staging or testing.

use url::Url;

use crate::error::{Result, WaypointError};

/// Default backend base URL for local development.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for connecting to the Waypoint backend.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend service.
    pub base_url: Url,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl ClientConfig {
    /// Builds a configuration for an explicit base URL.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        let base_url = Url::parse(base_url.as_ref())
            .map_err(|e| WaypointError::config(format!("invalid base URL: {e}")))?;
        Ok(Self {
            base_url,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `WAYPOINT_API_URL` (default: `http://localhost:5000`)
    /// - `WAYPOINT_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self> {
        let raw = std::env::var("WAYPOINT_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let base_url = Url::parse(&raw)
            .map_err(|e| WaypointError::config(format!("invalid WAYPOINT_API_URL '{raw}': {e}")))?;

        let timeout_secs = std::env::var("WAYPOINT_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Self {
            base_url,
            timeout_secs,
        })
    }

    /// Overrides the per-request timeout.
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            // The default URL is a compile-time constant; parsing cannot fail.
            base_url: Url::parse(DEFAULT_API_URL).unwrap_or_else(|_| {
                unreachable!("DEFAULT_API_URL is a valid URL")
            }),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_local_backend() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url.as_str(), "http://localhost:5000/");
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn explicit_url_is_parsed() {
        let config = ClientConfig::new("https://api.waypoint.example").unwrap();
        assert_eq!(config.base_url.host_str(), Some("api.waypoint.example"));
    }

    #[test]
    fn invalid_url_is_rejected() {
        assert!(ClientConfig::new("not a url").is_err());
    }

    #[test]
    fn timeout_override() {
        let config = ClientConfig::default().with_timeout_secs(5);
        assert_eq!(config.timeout_secs, 5);
    }
}
