//! Interaction producers.
//!
//! One exchange runner per capability screen. Each runner issues the real
//! capability request, measures wall-clock response time, and — when a
//! recording session is active and the current route resolves to a
//! capability — hands one interaction record to the recording controller.
//!
//! A failed log is reported and dropped; the exchange result itself is
//! still returned to the caller. Recording is diagnostic, not
//! transactional.

mod chat;
mod recommendation;
mod suggestion;

pub use chat::ChatProducer;
pub use recommendation::RecommendationProducer;
pub use suggestion::SuggestionProducer;

use crate::controller::{RecorderError, RecordingController};
use waypoint_core::recording::InteractionRecord;

/// Hands a record to the controller, swallowing the expected outcomes.
///
/// `NotRecording` is the normal case outside a session; backend failures
/// mean the one record is lost, which is accepted.
pub(crate) async fn log_best_effort(
    controller: &RecordingController,
    route: &str,
    record: InteractionRecord,
) {
    match controller.log_interaction(route, record).await {
        Ok(_) => {}
        Err(RecorderError::NotRecording) => {}
        Err(e) => {
            tracing::warn!(route, error = %e, "interaction not recorded");
        }
    }
}
