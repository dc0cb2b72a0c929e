//! # waypoint-api -- Typed HTTP client for the Waypoint backend
//!
//! Provides ergonomic, typed access to the backend REST API:
//! - **Auth** via `/api/auth` (login, signup, current user)
//! - **Chatbot** via `/api/chatbot` (messages, stored conversations)
//! - **Suggester** via `/api/suggester` (career suggestion wizard)
//! - **Recommender** via `/api/recommender` (course recommendation survey)
//! - **Testing** via `/api/tests` (recording sessions and reports)
//!
//! All business logic lives behind these endpoints; this crate only issues
//! REST calls and renders their results into typed values. One shared
//! gateway attaches the bearer token from a per-call credential snapshot,
//! normalizes transport failures, and forces a logout when the backend
//! rejects the stored token.

pub mod auth;
pub mod chatbot;
pub mod error;
mod gateway;
pub mod recommender;
pub mod suggester;
pub mod testing;
pub mod types;

pub use error::ApiError;
pub use types::{ChatHistoryMessage, SurveyQuestion};

use std::sync::Arc;

use waypoint_core::config::ClientConfig;
use waypoint_core::credentials::CredentialStore;

use gateway::Gateway;

/// Top-level backend API client. Holds sub-clients for each endpoint group.
#[derive(Clone)]
pub struct ApiClient {
    auth: auth::AuthClient,
    chatbot: chatbot::ChatbotClient,
    suggester: suggester::SuggesterClient,
    recommender: recommender::RecommenderClient,
    testing: testing::TestingClient,
}

impl ApiClient {
    /// Create a new API client from configuration and a credential store.
    pub fn new(
        config: ClientConfig,
        store: Arc<dyn CredentialStore>,
    ) -> Result<Self, ApiError> {
        let gateway = Arc::new(Gateway::new(config, store)?);

        Ok(Self {
            auth: auth::AuthClient::new(gateway.clone()),
            chatbot: chatbot::ChatbotClient::new(gateway.clone()),
            suggester: suggester::SuggesterClient::new(gateway.clone()),
            recommender: recommender::RecommenderClient::new(gateway.clone()),
            testing: testing::TestingClient::new(gateway),
        })
    }

    /// Access the auth client.
    pub fn auth(&self) -> &auth::AuthClient {
        &self.auth
    }

    /// Access the chatbot client.
    pub fn chatbot(&self) -> &chatbot::ChatbotClient {
        &self.chatbot
    }

    /// Access the career suggester client.
    pub fn suggester(&self) -> &suggester::SuggesterClient {
        &self.suggester
    }

    /// Access the course recommender client.
    pub fn recommender(&self) -> &recommender::RecommenderClient {
        &self.recommender
    }

    /// Access the test-recording client.
    pub fn testing(&self) -> &testing::TestingClient {
        &self.testing
    }
}
