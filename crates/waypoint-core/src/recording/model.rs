//! Recording session domain model.

use serde::{Deserialize, Serialize};

/// An active recording session as tracked by the client.
///
/// The backend is the authority for `interaction_count`: it returns the
/// total on every successful log call and the client overwrites its copy
/// with that value. The client never increments the count speculatively,
/// which guards against double-counting from retries or out-of-order
/// delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordingSession {
    /// Opaque identifier issued by the backend when recording starts.
    pub session_id: String,
    /// Last interaction total reported by the backend.
    pub interaction_count: u64,
    /// Timestamp when the backend started the session (ISO 8601 format).
    pub started_at: Option<String>,
}

impl RecordingSession {
    /// Creates a fresh session with a zero count.
    pub fn new(session_id: String, started_at: Option<String>) -> Self {
        Self {
            session_id,
            interaction_count: 0,
            started_at,
        }
    }
}
