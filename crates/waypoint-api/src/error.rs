//! API client error type.
//!
//! Every failure talking to the backend is normalized into a typed variant
//! carrying the endpoint it came from. Nothing in this crate panics on a bad
//! response; transport failures and backend-reported failures both surface
//! as values the caller can present.

use thiserror::Error;
use waypoint_core::WaypointError;

/// Errors from the Waypoint backend API client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (connection refused, DNS, timeout).
    #[error("request to {endpoint} failed: {source}")]
    Http {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// Non-success response from the backend, with its reported reason.
    #[error("{endpoint} returned {status}: {message}")]
    Api {
        endpoint: String,
        status: u16,
        message: String,
    },

    /// The response body did not match the expected shape.
    #[error("failed to decode response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The stored bearer token was rejected; credentials have been cleared.
    #[error("session expired, please log in again")]
    SessionExpired,

    /// Client-side configuration problem (bad header value, bad URL).
    #[error("client configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// The human-readable reason to surface to a caller or UI.
    ///
    /// Backend-reported failures are surfaced verbatim; transport failures
    /// keep their endpoint context.
    pub fn reason(&self) -> String {
        match self {
            Self::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Whether this error forced a logout.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired)
    }
}

impl From<ApiError> for WaypointError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Http { .. } => WaypointError::transport(err.to_string()),
            ApiError::Api { message, .. } => WaypointError::backend(message),
            ApiError::Deserialization { .. } => WaypointError::backend(err.to_string()),
            ApiError::SessionExpired => WaypointError::SessionExpired,
            ApiError::Config(msg) => WaypointError::config(msg),
        }
    }
}
