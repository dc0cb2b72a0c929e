//! Recorder event stream.
//!
//! Every state transition that reaches the backend emits one event. These
//! are presentation side effects (toast-equivalents), not part of the state
//! contract: a headless consumer can ignore the channel entirely, and an
//! unconsumed or closed channel never blocks the recorder.

use serde::Serialize;
use tokio::sync::mpsc;

use waypoint_core::capability::Capability;

/// One user-visible notification from the recording controller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum RecorderEvent {
    /// Test mode was switched on.
    TestModeEnabled,
    /// Test mode was switched off.
    TestModeDisabled,
    /// Test mode disable requested while a stop was in flight; it will be
    /// applied when the stop resolves.
    DisableQueued,
    /// A recording session started.
    RecordingStarted { session_id: String },
    /// The start request failed; the recorder stays armed.
    StartFailed { reason: String },
    /// An interaction was accepted by the backend.
    InteractionLogged { capability: Capability, total: u64 },
    /// An interaction was rejected or lost; the record is dropped.
    LogFailed { reason: String },
    /// A recording session stopped and produced a report.
    RecordingStopped { session_id: String },
    /// The stop request failed; recording continues.
    StopFailed { reason: String },
}

/// Fan-out handle for recorder events.
#[derive(Clone, Default)]
pub(crate) struct EventSink {
    sender: Option<mpsc::UnboundedSender<RecorderEvent>>,
}

impl EventSink {
    pub(crate) fn new(sender: Option<mpsc::UnboundedSender<RecorderEvent>>) -> Self {
        Self { sender }
    }

    /// Non-blocking send; if the receiver is dropped we just skip.
    pub(crate) fn emit(&self, event: RecorderEvent) {
        if let Some(sender) = &self.sender {
            let _ = sender.send(event);
        }
    }
}
