//! Recording session controller.
//!
//! Owns the test-mode state machine: `Idle` (test mode off), `Armed` (test
//! mode on, not recording), `Recording` (session active), `Stopping` (stop
//! request in flight).
//!
//! Failure semantics: all backend calls are single attempts. A failed start
//! leaves the recorder `Armed`; a failed stop leaves it `Recording` with the
//! same session (stop is retryable); a failed interaction log is reported to
//! the caller and the record is dropped. The backend-reported interaction
//! total always overwrites the local count — the client never increments it
//! speculatively.
//!
//! Every response handler checks a generation counter before mutating
//! state: in-flight calls are not cancelled on navigation or disable, so a
//! response may arrive after the state has moved on and must be discarded.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{RwLock, mpsc};

use waypoint_api::testing::RecordingSessionStatus;
use waypoint_core::capability::Capability;
use waypoint_core::recording::{InteractionRecord, RecordingSession};
use waypoint_core::report::Report;

use crate::backend::RecordingBackend;
use crate::events::{EventSink, RecorderEvent};

/// Externally visible controller phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecorderPhase {
    Idle,
    Armed,
    Recording,
    Stopping,
}

/// Point-in-time view of the controller, for status displays.
#[derive(Debug, Clone, PartialEq)]
pub struct RecorderSnapshot {
    pub phase: RecorderPhase,
    pub test_mode: bool,
    pub is_recording: bool,
    pub session_id: Option<String>,
    pub interaction_count: u64,
}

/// Failure outcomes of controller operations.
///
/// The controller never panics and never propagates backend failures as
/// anything other than one of these values; internal state is consistent
/// after any outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecorderError {
    #[error("test mode is not enabled")]
    TestModeDisabled,
    #[error("a recording session is already active")]
    AlreadyRecording,
    #[error("a stop request is in flight")]
    StopInFlight,
    #[error("not recording or no capability detected")]
    NotRecording,
    #[error("no active recording session")]
    NoActiveSession,
    #[error("{0}")]
    Backend(String),
    #[error("recorder state changed while the request was in flight")]
    Superseded,
}

#[derive(Debug, Clone)]
enum State {
    Idle,
    Armed,
    Recording(RecordingSession),
    Stopping(RecordingSession),
}

struct Inner {
    state: State,
    /// Generation counter, bumped on every transition. Response handlers
    /// compare against the value captured at dispatch time and discard
    /// stale responses instead of mutating moved-on state.
    epoch: u64,
    /// Test-mode disable requested while a stop was in flight.
    pending_disable: bool,
}

/// The test-mode recording state machine.
pub struct RecordingController {
    inner: Arc<RwLock<Inner>>,
    backend: Arc<dyn RecordingBackend>,
    events: EventSink,
}

impl RecordingController {
    /// Creates a controller in `Idle` over the given backend.
    pub fn new(backend: Arc<dyn RecordingBackend>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                state: State::Idle,
                epoch: 0,
                pending_disable: false,
            })),
            backend,
            events: EventSink::new(None),
        }
    }

    /// Creates a controller that emits notifications on the given channel.
    pub fn with_events(
        backend: Arc<dyn RecordingBackend>,
        sender: mpsc::UnboundedSender<RecorderEvent>,
    ) -> Self {
        let mut controller = Self::new(backend);
        controller.events = EventSink::new(Some(sender));
        controller
    }

    /// Enables test mode (`Idle` → `Armed`). No network call.
    ///
    /// Returns `true` if test mode was newly enabled, `false` if it was
    /// already on.
    pub async fn enable_test_mode(&self) -> bool {
        let mut inner = self.inner.write().await;
        match inner.state {
            State::Idle => {
                inner.state = State::Armed;
                inner.epoch += 1;
                drop(inner);
                tracing::info!("test mode enabled");
                self.events.emit(RecorderEvent::TestModeEnabled);
                true
            }
            _ => false,
        }
    }

    /// Disables test mode.
    ///
    /// - `Armed` → `Idle` with no network call.
    /// - `Recording` → performs the same stop sequence as
    ///   [`stop_recording`](Self::stop_recording) first; the report is
    ///   returned on success. On failure recording continues and test mode
    ///   stays on.
    /// - `Stopping` → the disable is queued and applied when the in-flight
    ///   stop resolves.
    pub async fn disable_test_mode(&self) -> Result<Option<Report>, RecorderError> {
        {
            let mut inner = self.inner.write().await;
            match inner.state {
                State::Idle => return Ok(None),
                State::Armed => {
                    inner.state = State::Idle;
                    inner.epoch += 1;
                    drop(inner);
                    tracing::info!("test mode disabled");
                    self.events.emit(RecorderEvent::TestModeDisabled);
                    return Ok(None);
                }
                State::Stopping(_) => {
                    inner.pending_disable = true;
                    drop(inner);
                    tracing::info!("test mode disable queued behind in-flight stop");
                    self.events.emit(RecorderEvent::DisableQueued);
                    return Ok(None);
                }
                State::Recording(_) => {}
            }
        }

        // Recording: stop first, then settle in Idle.
        self.stop_recording().await.map(Some)
    }

    /// Starts a recording session (`Armed` → `Recording`).
    ///
    /// On failure the recorder stays `Armed`, no session id is stored, and
    /// the backend reason is surfaced to the caller.
    pub async fn start_recording(
        &self,
        user_hint: Option<&str>,
    ) -> Result<RecordingSession, RecorderError> {
        let epoch = {
            let inner = self.inner.read().await;
            match inner.state {
                State::Armed => inner.epoch,
                State::Idle => return Err(RecorderError::TestModeDisabled),
                State::Recording(_) => return Err(RecorderError::AlreadyRecording),
                State::Stopping(_) => return Err(RecorderError::StopInFlight),
            }
        };

        match self.backend.start_recording(user_hint).await {
            Ok(started) => {
                let mut inner = self.inner.write().await;
                if inner.epoch != epoch || !matches!(inner.state, State::Armed) {
                    tracing::debug!(
                        session_id = %started.session_id,
                        "discarding stale start-recording response"
                    );
                    return Err(RecorderError::Superseded);
                }
                let session = RecordingSession::new(started.session_id, started.started_at);
                inner.state = State::Recording(session.clone());
                inner.epoch += 1;
                drop(inner);
                tracing::info!(session_id = %session.session_id, "recording started");
                self.events.emit(RecorderEvent::RecordingStarted {
                    session_id: session.session_id.clone(),
                });
                Ok(session)
            }
            Err(e) => {
                let reason = e.reason();
                tracing::warn!(error = %reason, "failed to start recording");
                self.events.emit(RecorderEvent::StartFailed {
                    reason: reason.clone(),
                });
                Err(RecorderError::Backend(reason))
            }
        }
    }

    /// Submits one interaction record against the active session.
    ///
    /// The capability is resolved from `route` at log time — it can change
    /// mid-session without stopping recording. Unless the controller is
    /// `Recording` and the route resolves to a capability, this is a no-op
    /// that reports failure without any network call.
    ///
    /// On success the returned total (the backend's authoritative count)
    /// replaces the local count. On failure the record is dropped after
    /// reporting — at-most-once delivery, by design.
    pub async fn log_interaction(
        &self,
        route: &str,
        record: InteractionRecord,
    ) -> Result<u64, RecorderError> {
        let (session_id, epoch, capability) = {
            let inner = self.inner.read().await;
            match (&inner.state, Capability::from_route(route)) {
                (State::Recording(session), Some(capability)) => {
                    (session.session_id.clone(), inner.epoch, capability)
                }
                _ => return Err(RecorderError::NotRecording),
            }
        };

        match self
            .backend
            .log_interaction(&session_id, capability, &record)
            .await
        {
            Ok(logged) => {
                let mut inner = self.inner.write().await;
                if inner.epoch != epoch {
                    tracing::debug!("discarding stale log-interaction response");
                    return Err(RecorderError::Superseded);
                }
                if let State::Recording(session) = &mut inner.state {
                    if session.session_id == session_id {
                        session.interaction_count = logged.total_interactions;
                    }
                }
                drop(inner);
                tracing::debug!(
                    %capability,
                    total = logged.total_interactions,
                    "interaction logged"
                );
                self.events.emit(RecorderEvent::InteractionLogged {
                    capability,
                    total: logged.total_interactions,
                });
                Ok(logged.total_interactions)
            }
            Err(e) => {
                let reason = e.reason();
                tracing::warn!(%capability, error = %reason, "interaction record dropped");
                self.events.emit(RecorderEvent::LogFailed {
                    reason: reason.clone(),
                });
                Err(RecorderError::Backend(reason))
            }
        }
    }

    /// Stops the active session (`Recording` → `Stopping` → `Idle`).
    ///
    /// On success the session is cleared, the count reset, and the backend
    /// report returned unchanged for presentation. On failure the recorder
    /// returns to `Recording` with the same session — no data is lost and
    /// the stop may be retried.
    pub async fn stop_recording(&self) -> Result<Report, RecorderError> {
        let (session_id, epoch) = {
            let mut inner = self.inner.write().await;
            match &inner.state {
                State::Recording(session) => {
                    let session = session.clone();
                    let session_id = session.session_id.clone();
                    inner.state = State::Stopping(session);
                    inner.epoch += 1;
                    (session_id, inner.epoch)
                }
                State::Stopping(_) => return Err(RecorderError::StopInFlight),
                _ => return Err(RecorderError::NoActiveSession),
            }
        };

        match self.backend.stop_recording(&session_id).await {
            Ok(stopped) => {
                let mut inner = self.inner.write().await;
                if inner.epoch != epoch {
                    tracing::debug!("discarding stale stop-recording response");
                    return Err(RecorderError::Superseded);
                }
                inner.state = State::Idle;
                inner.epoch += 1;
                let disable_was_queued = std::mem::take(&mut inner.pending_disable);
                drop(inner);
                tracing::info!(session_id = %session_id, "recording stopped");
                self.events.emit(RecorderEvent::RecordingStopped {
                    session_id: session_id.clone(),
                });
                if disable_was_queued {
                    self.events.emit(RecorderEvent::TestModeDisabled);
                }
                Ok(stopped.report)
            }
            Err(e) => {
                let reason = e.reason();
                let mut inner = self.inner.write().await;
                if inner.epoch == epoch {
                    if let State::Stopping(session) = &inner.state {
                        // Recording is still considered active; stop is
                        // retryable. A queued disable is abandoned here so
                        // the session is not silently thrown away.
                        let session = session.clone();
                        inner.state = State::Recording(session);
                        inner.epoch += 1;
                        inner.pending_disable = false;
                    }
                }
                drop(inner);
                tracing::warn!(session_id = %session_id, error = %reason, "failed to stop recording");
                self.events.emit(RecorderEvent::StopFailed {
                    reason: reason.clone(),
                });
                Err(RecorderError::Backend(reason))
            }
        }
    }

    /// Fetches the backend's live view of the active session.
    pub async fn live_status(&self) -> Result<RecordingSessionStatus, RecorderError> {
        let session_id = {
            let inner = self.inner.read().await;
            match &inner.state {
                State::Recording(session) | State::Stopping(session) => {
                    session.session_id.clone()
                }
                _ => return Err(RecorderError::NoActiveSession),
            }
        };
        self.backend
            .session_status(&session_id)
            .await
            .map_err(|e| RecorderError::Backend(e.reason()))
    }

    /// Returns a point-in-time view of the controller.
    pub async fn snapshot(&self) -> RecorderSnapshot {
        let inner = self.inner.read().await;
        let (phase, session) = match &inner.state {
            State::Idle => (RecorderPhase::Idle, None),
            State::Armed => (RecorderPhase::Armed, None),
            State::Recording(session) => (RecorderPhase::Recording, Some(session)),
            State::Stopping(session) => (RecorderPhase::Stopping, Some(session)),
        };
        RecorderSnapshot {
            phase,
            test_mode: phase != RecorderPhase::Idle,
            is_recording: phase == RecorderPhase::Recording,
            session_id: session.map(|s| s.session_id.clone()),
            interaction_count: session.map(|s| s.interaction_count).unwrap_or(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use tokio::sync::Semaphore;
    use waypoint_api::error::ApiError;
    use waypoint_api::testing::{InteractionLogged, RecordingStarted, RecordingStopped};
    use waypoint_core::recording::ChatInteraction;
    use waypoint_core::report::ReportStatus;

    // Mock backend with programmable responses and optional gates to hold
    // calls in flight.
    #[derive(Default)]
    struct MockBackend {
        start_results: Mutex<VecDeque<Result<RecordingStarted, ApiError>>>,
        log_results: Mutex<VecDeque<Result<InteractionLogged, ApiError>>>,
        stop_results: Mutex<VecDeque<Result<RecordingStopped, ApiError>>>,
        start_gate: Option<Arc<Semaphore>>,
        stop_gate: Option<Arc<Semaphore>>,
        calls: Mutex<Vec<String>>,
    }

    impl MockBackend {
        fn new() -> Self {
            Self::default()
        }

        fn push_start_ok(&self, session_id: &str) {
            self.start_results.lock().unwrap().push_back(Ok(RecordingStarted {
                session_id: session_id.to_string(),
                started_at: Some("2026-03-01T10:04:17".to_string()),
                message: None,
            }));
        }

        fn push_start_err(&self, message: &str) {
            self.start_results.lock().unwrap().push_back(Err(api_error(message)));
        }

        fn push_log_ok(&self, total: u64) {
            self.log_results.lock().unwrap().push_back(Ok(InteractionLogged {
                total_interactions: total,
                interaction_id: None,
            }));
        }

        fn push_log_err(&self, message: &str) {
            self.log_results.lock().unwrap().push_back(Err(api_error(message)));
        }

        fn push_stop_ok(&self, score: f64) {
            self.stop_results.lock().unwrap().push_back(Ok(RecordingStopped {
                report: Report {
                    status: Some(ReportStatus::Pass),
                    overall_score: Some(score),
                    ..Report::default()
                },
                message: None,
            }));
        }

        fn push_stop_err(&self, message: &str) {
            self.stop_results.lock().unwrap().push_back(Err(api_error(message)));
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    fn api_error(message: &str) -> ApiError {
        ApiError::Api {
            endpoint: "POST /tests".to_string(),
            status: 500,
            message: message.to_string(),
        }
    }

    #[async_trait::async_trait]
    impl RecordingBackend for MockBackend {
        async fn start_recording(
            &self,
            _user_hint: Option<&str>,
        ) -> Result<RecordingStarted, ApiError> {
            self.calls.lock().unwrap().push("start".to_string());
            if let Some(gate) = &self.start_gate {
                gate.acquire().await.unwrap().forget();
            }
            self.start_results
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected start-recording call")
        }

        async fn log_interaction(
            &self,
            _session_id: &str,
            capability: Capability,
            _record: &InteractionRecord,
        ) -> Result<InteractionLogged, ApiError> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("log:{capability}"));
            self.log_results
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected log-interaction call")
        }

        async fn stop_recording(&self, _session_id: &str) -> Result<RecordingStopped, ApiError> {
            self.calls.lock().unwrap().push("stop".to_string());
            if let Some(gate) = &self.stop_gate {
                gate.acquire().await.unwrap().forget();
            }
            self.stop_results
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected stop-recording call")
        }

        async fn session_status(
            &self,
            _session_id: &str,
        ) -> Result<RecordingSessionStatus, ApiError> {
            Err(api_error("not implemented in mock"))
        }
    }

    fn chat_record() -> InteractionRecord {
        InteractionRecord::Chat(ChatInteraction {
            user_message: "hello".to_string(),
            ai_response: "hi, how can I help with your career?".to_string(),
            response_time_ms: 120,
            conversation_id: None,
        })
    }

    #[tokio::test]
    async fn enable_and_disable_toggle_armed() {
        let controller = RecordingController::new(Arc::new(MockBackend::new()));
        assert_eq!(controller.snapshot().await.phase, RecorderPhase::Idle);

        assert!(controller.enable_test_mode().await);
        let snapshot = controller.snapshot().await;
        assert_eq!(snapshot.phase, RecorderPhase::Armed);
        assert!(snapshot.test_mode);
        assert!(!snapshot.is_recording);

        // Enabling twice is a no-op.
        assert!(!controller.enable_test_mode().await);

        assert_eq!(controller.disable_test_mode().await.unwrap(), None);
        assert_eq!(controller.snapshot().await.phase, RecorderPhase::Idle);
    }

    #[tokio::test]
    async fn start_requires_armed() {
        let backend = Arc::new(MockBackend::new());
        let controller = RecordingController::new(backend.clone());

        let result = controller.start_recording(Some("u1")).await;
        assert_eq!(result.unwrap_err(), RecorderError::TestModeDisabled);
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn start_success_enters_recording_with_zero_count() {
        let backend = Arc::new(MockBackend::new());
        backend.push_start_ok("s1");
        let controller = RecordingController::new(backend.clone());

        controller.enable_test_mode().await;
        let session = controller.start_recording(Some("u1")).await.unwrap();
        assert_eq!(session.session_id, "s1");
        assert_eq!(session.interaction_count, 0);

        let snapshot = controller.snapshot().await;
        assert_eq!(snapshot.phase, RecorderPhase::Recording);
        assert_eq!(snapshot.session_id.as_deref(), Some("s1"));
        assert_eq!(snapshot.interaction_count, 0);
    }

    #[tokio::test]
    async fn start_failure_leaves_armed_without_session() {
        let backend = Arc::new(MockBackend::new());
        backend.push_start_err("db unreachable");
        let controller = RecordingController::new(backend);

        controller.enable_test_mode().await;
        let result = controller.start_recording(Some("u1")).await;
        assert_eq!(
            result.unwrap_err(),
            RecorderError::Backend("db unreachable".to_string())
        );

        let snapshot = controller.snapshot().await;
        assert_eq!(snapshot.phase, RecorderPhase::Armed);
        assert!(snapshot.session_id.is_none());
    }

    #[tokio::test]
    async fn start_while_recording_is_rejected_without_network() {
        let backend = Arc::new(MockBackend::new());
        backend.push_start_ok("s1");
        let controller = RecordingController::new(backend.clone());

        controller.enable_test_mode().await;
        controller.start_recording(None).await.unwrap();
        let result = controller.start_recording(None).await;
        assert_eq!(result.unwrap_err(), RecorderError::AlreadyRecording);
        assert_eq!(backend.calls(), vec!["start"]);
    }

    #[tokio::test]
    async fn log_while_not_recording_makes_no_network_call() {
        let backend = Arc::new(MockBackend::new());
        let controller = RecordingController::new(backend.clone());

        // Idle
        let result = controller.log_interaction("/chatbot", chat_record()).await;
        assert_eq!(result.unwrap_err(), RecorderError::NotRecording);

        // Armed
        controller.enable_test_mode().await;
        let result = controller.log_interaction("/chatbot", chat_record()).await;
        assert_eq!(result.unwrap_err(), RecorderError::NotRecording);

        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn log_with_unresolved_capability_makes_no_network_call() {
        let backend = Arc::new(MockBackend::new());
        backend.push_start_ok("s1");
        let controller = RecordingController::new(backend.clone());

        controller.enable_test_mode().await;
        controller.start_recording(None).await.unwrap();

        let result = controller.log_interaction("/dashboard", chat_record()).await;
        assert_eq!(result.unwrap_err(), RecorderError::NotRecording);
        assert_eq!(backend.calls(), vec!["start"]);
    }

    #[tokio::test]
    async fn count_is_overwritten_with_backend_total() {
        let backend = Arc::new(MockBackend::new());
        backend.push_start_ok("s1");
        // The backend says 5, regardless of how many calls we issued.
        backend.push_log_ok(5);
        let controller = RecordingController::new(backend);

        controller.enable_test_mode().await;
        controller.start_recording(None).await.unwrap();
        let total = controller
            .log_interaction("/chatbot", chat_record())
            .await
            .unwrap();
        assert_eq!(total, 5);
        assert_eq!(controller.snapshot().await.interaction_count, 5);
    }

    #[tokio::test]
    async fn failed_log_drops_record_and_preserves_state() {
        let backend = Arc::new(MockBackend::new());
        backend.push_start_ok("s1");
        backend.push_log_ok(1);
        backend.push_log_err("session storage full");
        let controller = RecordingController::new(backend);

        controller.enable_test_mode().await;
        controller.start_recording(None).await.unwrap();
        controller
            .log_interaction("/chatbot", chat_record())
            .await
            .unwrap();

        let result = controller.log_interaction("/chatbot", chat_record()).await;
        assert!(matches!(result.unwrap_err(), RecorderError::Backend(_)));

        // Still recording with the last acknowledged count.
        let snapshot = controller.snapshot().await;
        assert_eq!(snapshot.phase, RecorderPhase::Recording);
        assert_eq!(snapshot.interaction_count, 1);
    }

    #[tokio::test]
    async fn stop_failure_preserves_recording_and_session_id() {
        let backend = Arc::new(MockBackend::new());
        backend.push_start_ok("s1");
        backend.push_stop_err("report generation failed");
        let controller = RecordingController::new(backend);

        controller.enable_test_mode().await;
        controller.start_recording(None).await.unwrap();

        let result = controller.stop_recording().await;
        assert_eq!(
            result.unwrap_err(),
            RecorderError::Backend("report generation failed".to_string())
        );

        let snapshot = controller.snapshot().await;
        assert_eq!(snapshot.phase, RecorderPhase::Recording);
        assert_eq!(snapshot.session_id.as_deref(), Some("s1"));
    }

    #[tokio::test]
    async fn stop_success_settles_idle_and_hands_over_report() {
        let backend = Arc::new(MockBackend::new());
        backend.push_start_ok("s1");
        backend.push_stop_ok(88.5);
        let controller = RecordingController::new(backend);

        controller.enable_test_mode().await;
        controller.start_recording(None).await.unwrap();

        let report = controller.stop_recording().await.unwrap();
        assert_eq!(report.status, Some(ReportStatus::Pass));
        assert_eq!(report.overall_score, Some(88.5));

        let snapshot = controller.snapshot().await;
        assert_eq!(snapshot.phase, RecorderPhase::Idle);
        assert!(snapshot.session_id.is_none());
        assert_eq!(snapshot.interaction_count, 0);
    }

    #[tokio::test]
    async fn full_session_flow_tracks_capability_per_route() {
        let (sender, mut receiver) = mpsc::unbounded_channel();
        let backend = Arc::new(MockBackend::new());
        backend.push_start_ok("s1");
        backend.push_log_ok(1);
        backend.push_log_ok(2);
        backend.push_stop_ok(88.5);
        let controller = RecordingController::with_events(backend.clone(), sender);

        controller.enable_test_mode().await;
        controller.start_recording(Some("u1")).await.unwrap();

        let total = controller
            .log_interaction("/chatbot", chat_record())
            .await
            .unwrap();
        assert_eq!(total, 1);

        // Navigation changed the active capability; resolution happens at
        // log time.
        let total = controller
            .log_interaction("/career-suggester", chat_record())
            .await
            .unwrap();
        assert_eq!(total, 2);

        let report = controller.stop_recording().await.unwrap();
        assert_eq!(report.overall_score, Some(88.5));
        assert_eq!(controller.snapshot().await.phase, RecorderPhase::Idle);

        assert_eq!(
            backend.calls(),
            vec!["start", "log:chatbot", "log:career_suggester", "stop"]
        );

        let mut events = Vec::new();
        while let Ok(event) = receiver.try_recv() {
            events.push(event);
        }
        assert!(events.contains(&RecorderEvent::TestModeEnabled));
        assert!(events.contains(&RecorderEvent::RecordingStarted {
            session_id: "s1".to_string()
        }));
        assert!(events.contains(&RecorderEvent::InteractionLogged {
            capability: Capability::CareerSuggestion,
            total: 2
        }));
        assert!(events.contains(&RecorderEvent::RecordingStopped {
            session_id: "s1".to_string()
        }));
    }

    #[tokio::test]
    async fn disable_while_recording_stops_first() {
        let backend = Arc::new(MockBackend::new());
        backend.push_start_ok("s1");
        backend.push_stop_ok(70.0);
        let controller = RecordingController::new(backend.clone());

        controller.enable_test_mode().await;
        controller.start_recording(None).await.unwrap();

        let report = controller.disable_test_mode().await.unwrap();
        assert!(report.is_some());
        assert_eq!(controller.snapshot().await.phase, RecorderPhase::Idle);
        assert_eq!(backend.calls(), vec!["start", "stop"]);
    }

    #[tokio::test]
    async fn disable_while_stopping_is_queued_until_stop_resolves() {
        let gate = Arc::new(Semaphore::new(0));
        let backend = Arc::new(MockBackend {
            stop_gate: Some(gate.clone()),
            ..MockBackend::new()
        });
        backend.push_start_ok("s1");
        backend.push_stop_ok(90.0);

        let (sender, mut receiver) = mpsc::unbounded_channel();
        let controller = Arc::new(RecordingController::with_events(backend, sender));

        controller.enable_test_mode().await;
        controller.start_recording(None).await.unwrap();

        let stopper = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.stop_recording().await })
        };
        // Let the stop reach the gated backend call.
        tokio::task::yield_now().await;
        while controller.snapshot().await.phase != RecorderPhase::Stopping {
            tokio::task::yield_now().await;
        }

        // Disable is queued, not applied.
        assert_eq!(controller.disable_test_mode().await.unwrap(), None);
        assert_eq!(controller.snapshot().await.phase, RecorderPhase::Stopping);

        // Release the in-flight stop.
        gate.add_permits(1);
        let report = stopper.await.unwrap().unwrap();
        assert_eq!(report.overall_score, Some(90.0));
        assert_eq!(controller.snapshot().await.phase, RecorderPhase::Idle);

        let mut events = Vec::new();
        while let Ok(event) = receiver.try_recv() {
            events.push(event);
        }
        assert!(events.contains(&RecorderEvent::DisableQueued));
        assert!(events.contains(&RecorderEvent::TestModeDisabled));
    }

    #[tokio::test]
    async fn stale_start_response_is_discarded_after_disable() {
        let gate = Arc::new(Semaphore::new(0));
        let backend = Arc::new(MockBackend {
            start_gate: Some(gate.clone()),
            ..MockBackend::new()
        });
        backend.push_start_ok("s1");

        let controller = Arc::new(RecordingController::new(backend.clone()));
        controller.enable_test_mode().await;

        let starter = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.start_recording(None).await })
        };
        // Let the start reach the gated backend call.
        while backend.calls().is_empty() {
            tokio::task::yield_now().await;
        }

        // Test mode goes off while the start is in flight.
        controller.disable_test_mode().await.unwrap();
        assert_eq!(controller.snapshot().await.phase, RecorderPhase::Idle);

        // The start response arrives into moved-on state and is discarded.
        gate.add_permits(1);
        let result = starter.await.unwrap();
        assert_eq!(result.unwrap_err(), RecorderError::Superseded);

        let snapshot = controller.snapshot().await;
        assert_eq!(snapshot.phase, RecorderPhase::Idle);
        assert!(snapshot.session_id.is_none());
    }

    #[tokio::test]
    async fn stop_while_stopping_is_rejected() {
        let gate = Arc::new(Semaphore::new(0));
        let backend = Arc::new(MockBackend {
            stop_gate: Some(gate.clone()),
            ..MockBackend::new()
        });
        backend.push_start_ok("s1");
        backend.push_stop_ok(80.0);

        let controller = Arc::new(RecordingController::new(backend));
        controller.enable_test_mode().await;
        controller.start_recording(None).await.unwrap();

        let stopper = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.stop_recording().await })
        };
        while controller.snapshot().await.phase != RecorderPhase::Stopping {
            tokio::task::yield_now().await;
        }

        let result = controller.stop_recording().await;
        assert_eq!(result.unwrap_err(), RecorderError::StopInFlight);

        gate.add_permits(1);
        stopper.await.unwrap().unwrap();
    }
}
