//! Backend seam for the recording controller.
//!
//! The controller talks to the recording endpoints through this trait so
//! the state machine can be exercised against a mock in tests. The real
//! implementation delegates to the typed testing client.

use async_trait::async_trait;

use waypoint_api::error::ApiError;
use waypoint_api::testing::{
    InteractionLogged, RecordingSessionStatus, RecordingStarted, RecordingStopped, TestingClient,
};
use waypoint_core::capability::Capability;
use waypoint_core::recording::InteractionRecord;

/// The three recording calls plus the live status lookup.
///
/// All calls are single attempts; retry policy belongs to the caller.
#[async_trait]
pub trait RecordingBackend: Send + Sync {
    async fn start_recording(&self, user_hint: Option<&str>)
        -> Result<RecordingStarted, ApiError>;

    async fn log_interaction(
        &self,
        session_id: &str,
        capability: Capability,
        record: &InteractionRecord,
    ) -> Result<InteractionLogged, ApiError>;

    async fn stop_recording(&self, session_id: &str) -> Result<RecordingStopped, ApiError>;

    async fn session_status(&self, session_id: &str)
        -> Result<RecordingSessionStatus, ApiError>;
}

#[async_trait]
impl RecordingBackend for TestingClient {
    async fn start_recording(
        &self,
        user_hint: Option<&str>,
    ) -> Result<RecordingStarted, ApiError> {
        TestingClient::start_recording(self, user_hint).await
    }

    async fn log_interaction(
        &self,
        session_id: &str,
        capability: Capability,
        record: &InteractionRecord,
    ) -> Result<InteractionLogged, ApiError> {
        TestingClient::log_interaction(self, session_id, capability, record).await
    }

    async fn stop_recording(&self, session_id: &str) -> Result<RecordingStopped, ApiError> {
        TestingClient::stop_recording(self, session_id).await
    }

    async fn session_status(
        &self,
        session_id: &str,
    ) -> Result<RecordingSessionStatus, ApiError> {
        TestingClient::session_status(self, session_id).await
    }
}
