pub mod capability;
pub mod config;
pub mod credentials;
pub mod error;
pub mod recording;
pub mod report;

// Re-export common types
pub use capability::Capability;
pub use config::ClientConfig;
pub use credentials::{AuthUser, CredentialStore, Credentials, MemoryCredentialStore};
pub use error::{Result, WaypointError};
pub use recording::{InteractionRecord, RecordingSession};
pub use report::Report;
