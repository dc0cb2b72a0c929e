//! Typed client for the auth endpoints.
//!
//! These are the only flows that write the credential store: login and
//! signup persist the returned identity + token, logout clears them. Every
//! other call takes a read-only snapshot.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use waypoint_core::credentials::{AuthUser, Credentials};

use crate::error::ApiError;
use crate::gateway::Gateway;

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct SignupRequest<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
    username: &'a str,
    // Public signups are always students; elevated roles are provisioned
    // through the admin console.
    role: &'static str,
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    #[serde(default)]
    access_token: Option<String>,
    user: AuthUser,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MeResponse {
    user: AuthUser,
}

/// Client for the auth endpoints.
#[derive(Clone)]
pub struct AuthClient {
    gateway: Arc<Gateway>,
}

impl AuthClient {
    pub(crate) fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    /// Authenticates and persists the returned identity + token.
    ///
    /// Calls `POST /api/auth/login`.
    pub async fn login(&self, email: &str, password: &str) -> Result<Credentials, ApiError> {
        let endpoint = "POST /auth/login";
        let response: AuthResponse = self
            .gateway
            .post_json(endpoint, "api/auth/login", &LoginRequest { email, password }, false)
            .await?;

        let token = response.access_token.ok_or_else(|| ApiError::Api {
            endpoint: endpoint.to_string(),
            status: 200,
            message: "login response did not include an access token".to_string(),
        })?;

        let credentials = Credentials {
            user: response.user,
            token,
        };
        self.gateway
            .store()
            .set(credentials.clone())
            .await
            .map_err(|e| ApiError::Config(format!("failed to persist credentials: {e}")))?;

        tracing::info!(user = %credentials.user.email, "logged in");
        Ok(credentials)
    }

    /// Registers a new account and persists the returned identity + token.
    ///
    /// Calls `POST /api/auth/signup`. The username defaults to the local
    /// part of the email when not provided.
    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
        username: Option<&str>,
    ) -> Result<Credentials, ApiError> {
        let endpoint = "POST /auth/signup";
        let derived = email.split('@').next().unwrap_or(email);
        let request = SignupRequest {
            name,
            email,
            password,
            username: username.unwrap_or(derived),
            role: "student",
        };

        let response: AuthResponse = self
            .gateway
            .post_json(endpoint, "api/auth/signup", &request, false)
            .await?;

        let token = response.access_token.ok_or_else(|| ApiError::Api {
            endpoint: endpoint.to_string(),
            status: 200,
            message: response
                .message
                .unwrap_or_else(|| "signup response did not include an access token".to_string()),
        })?;

        let credentials = Credentials {
            user: response.user,
            token,
        };
        self.gateway
            .store()
            .set(credentials.clone())
            .await
            .map_err(|e| ApiError::Config(format!("failed to persist credentials: {e}")))?;

        Ok(credentials)
    }

    /// Fetches the current user from the token.
    ///
    /// Calls `GET /api/auth/me` (authenticated).
    pub async fn me(&self) -> Result<AuthUser, ApiError> {
        let response: MeResponse = self
            .gateway
            .get_json("GET /auth/me", "api/auth/me", &[], true)
            .await?;
        Ok(response.user)
    }

    /// Clears the stored credentials. No backend call.
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.gateway
            .store()
            .clear()
            .await
            .map_err(|e| ApiError::Config(format!("failed to clear credentials: {e}")))
    }
}
