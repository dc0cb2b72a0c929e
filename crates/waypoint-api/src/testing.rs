//! Typed client for the test-recording endpoints.
//!
//! These three calls back the recording harness and are unauthenticated in
//! the backend. All of them are single attempts with no automatic retry;
//! the recording controller owns the failure semantics.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use waypoint_core::capability::Capability;
use waypoint_core::recording::InteractionRecord;
use waypoint_core::report::Report;

use crate::error::ApiError;
use crate::gateway::Gateway;

#[derive(Debug, Serialize)]
struct StartRecordingRequest<'a> {
    user_id: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct LogInteractionRequest<'a> {
    session_id: &'a str,
    ai_type: Capability,
    interaction: &'a InteractionRecord,
}

#[derive(Debug, Serialize)]
struct StopRecordingRequest<'a> {
    session_id: &'a str,
}

/// Response to a start-recording call.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordingStarted {
    pub session_id: String,
    #[serde(default)]
    pub started_at: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response to a log-interaction call.
#[derive(Debug, Clone, Deserialize)]
pub struct InteractionLogged {
    /// Authoritative interaction total for the session.
    pub total_interactions: u64,
    #[serde(default)]
    pub interaction_id: Option<String>,
}

/// Response to a stop-recording call.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordingStopped {
    #[serde(default)]
    pub report: Report,
    #[serde(default)]
    pub message: Option<String>,
}

/// Live status of an active recording session.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordingSessionStatus {
    pub session_id: String,
    #[serde(default)]
    pub started_at: Option<String>,
    #[serde(default)]
    pub total_interactions: u64,
    #[serde(default)]
    pub ai_types_tested: Vec<String>,
    #[serde(default)]
    pub interactions_by_type: HashMap<String, u64>,
}

/// Client for the test-recording endpoints.
#[derive(Clone)]
pub struct TestingClient {
    gateway: Arc<Gateway>,
}

impl TestingClient {
    pub(crate) fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    /// Starts a recording session, optionally tagged with a user id.
    ///
    /// Calls `POST /api/tests/start-recording`.
    pub async fn start_recording(&self, user_id: Option<&str>) -> Result<RecordingStarted, ApiError> {
        let request = StartRecordingRequest { user_id };
        self.gateway
            .post_json(
                "POST /tests/start-recording",
                "api/tests/start-recording",
                &request,
                false,
            )
            .await
    }

    /// Logs one interaction against an active session.
    ///
    /// Calls `POST /api/tests/log-interaction`. The returned total is
    /// authoritative; callers must overwrite their count with it rather
    /// than increment locally.
    pub async fn log_interaction(
        &self,
        session_id: &str,
        ai_type: Capability,
        interaction: &InteractionRecord,
    ) -> Result<InteractionLogged, ApiError> {
        let request = LogInteractionRequest {
            session_id,
            ai_type,
            interaction,
        };
        self.gateway
            .post_json(
                "POST /tests/log-interaction",
                "api/tests/log-interaction",
                &request,
                false,
            )
            .await
    }

    /// Stops a recording session and returns the diagnostic report.
    ///
    /// Calls `POST /api/tests/stop-recording`.
    pub async fn stop_recording(&self, session_id: &str) -> Result<RecordingStopped, ApiError> {
        let request = StopRecordingRequest { session_id };
        self.gateway
            .post_json(
                "POST /tests/stop-recording",
                "api/tests/stop-recording",
                &request,
                false,
            )
            .await
    }

    /// Fetches the live status of an active session.
    ///
    /// Calls `GET /api/tests/session-status/{session_id}`.
    pub async fn session_status(
        &self,
        session_id: &str,
    ) -> Result<RecordingSessionStatus, ApiError> {
        let endpoint = format!("GET /tests/session-status/{session_id}");
        self.gateway
            .get_json(
                &endpoint,
                &format!("api/tests/session-status/{session_id}"),
                &[],
                false,
            )
            .await
    }
}
