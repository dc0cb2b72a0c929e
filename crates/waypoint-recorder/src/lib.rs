//! Test-mode interaction recording for the Waypoint client.
//!
//! The recording controller owns a four-state machine (`Idle` → `Armed` →
//! `Recording` → `Stopping`) over the backend's recording endpoints. The
//! producers wrap the three capability screens' exchanges and feed timed
//! interaction records into the controller; the presenter renders the
//! report a stopped session returns.

pub mod backend;
pub mod controller;
pub mod events;
pub mod presenter;
pub mod producers;

pub use backend::RecordingBackend;
pub use controller::{RecorderError, RecorderPhase, RecorderSnapshot, RecordingController};
pub use events::RecorderEvent;
pub use producers::{ChatProducer, RecommendationProducer, SuggestionProducer};
