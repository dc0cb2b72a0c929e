//! Shared request/response plumbing for all sub-clients.
//!
//! The gateway attaches the bearer token from a per-call credential
//! snapshot, serializes JSON bodies, normalizes transport failures, and
//! detects session expiry: a 401 on an authenticated call while a token is
//! stored clears the credential store and maps to `ApiError::SessionExpired`.

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use waypoint_core::config::ClientConfig;
use waypoint_core::credentials::CredentialStore;

use crate::error::ApiError;

/// Error body the backend attaches to non-success responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

pub(crate) struct Gateway {
    http: reqwest::Client,
    base_url: Url,
    store: Arc<dyn CredentialStore>,
}

impl Gateway {
    pub(crate) fn new(
        config: ClientConfig,
        store: Arc<dyn CredentialStore>,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url,
            store,
        })
    }

    pub(crate) fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    /// Full URL for a path relative to the base URL (no leading slash).
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        path: &str,
        query: &[(&str, String)],
        authenticated: bool,
    ) -> Result<T, ApiError> {
        let mut request = self.http.get(self.url(path));
        if !query.is_empty() {
            request = request.query(query);
        }
        self.send(endpoint, request, authenticated).await
    }

    pub(crate) async fn post_json<B: serde::Serialize, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        path: &str,
        body: &B,
        authenticated: bool,
    ) -> Result<T, ApiError> {
        let request = self.http.post(self.url(path)).json(body);
        self.send(endpoint, request, authenticated).await
    }

    pub(crate) async fn delete_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        path: &str,
        query: &[(&str, String)],
        authenticated: bool,
    ) -> Result<T, ApiError> {
        let mut request = self.http.delete(self.url(path));
        if !query.is_empty() {
            request = request.query(query);
        }
        self.send(endpoint, request, authenticated).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        mut request: RequestBuilder,
        authenticated: bool,
    ) -> Result<T, ApiError> {
        // Snapshot the token once per call; a logout racing this request
        // must not affect the in-flight response handling.
        let mut had_token = false;
        if authenticated {
            if let Some(credentials) = self.store.get().await {
                had_token = true;
                request = request.bearer_auth(&credentials.token);
            }
        }

        let response = request.send().await.map_err(|e| ApiError::Http {
            endpoint: endpoint.to_string(),
            source: e,
        })?;

        self.decode(endpoint, response, had_token).await
    }

    async fn decode<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        response: Response,
        had_token: bool,
    ) -> Result<T, ApiError> {
        let status = response.status();

        // Token rejected: force logout so the next call starts clean.
        if status == StatusCode::UNAUTHORIZED && had_token {
            tracing::warn!(endpoint, "bearer token rejected, clearing stored session");
            if let Err(e) = self.store.clear().await {
                tracing::error!(endpoint, error = %e, "failed to clear stored credentials");
            }
            return Err(ApiError::SessionExpired);
        }

        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("unknown error")
                        .to_string()
                });
            return Err(ApiError::Api {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        response.json().await.map_err(|e| ApiError::Deserialization {
            endpoint: endpoint.to_string(),
            source: e,
        })
    }
}
