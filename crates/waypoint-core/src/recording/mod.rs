//! Recording-session domain module.
//!
//! A recording session is a bounded interval, identified by an opaque
//! backend-issued id, during which AI interactions are captured for later
//! scoring.
//!
//! # Module Structure
//!
//! - `model`: The active session model (`RecordingSession`)
//! - `interaction`: Interaction record types, one variant per capability

mod interaction;
mod model;

// Re-export public API
pub use interaction::{
    ChatInteraction, InteractionRecord, RecommendationInteraction, SuggestionInteraction,
};
pub use model::RecordingSession;
