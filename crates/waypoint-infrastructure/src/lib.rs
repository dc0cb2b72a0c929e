//! Infrastructure implementations for the Waypoint client.
//!
//! Provides the persistent credential store backing
//! `waypoint_core::credentials::CredentialStore` and the path conventions
//! for client state on disk.

pub mod paths;
pub mod toml_credential_store;

pub use toml_credential_store::TomlCredentialStore;
