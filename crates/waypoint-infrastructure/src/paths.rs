//! Centralized path management for persisted client state.

use std::path::PathBuf;

use waypoint_core::error::{Result, WaypointError};

/// Name of the application directory under the user config dir.
const APP_DIR: &str = "waypoint";

/// File holding the persisted identity and bearer token.
const CREDENTIALS_FILE: &str = "credentials.toml";

/// Returns the application config directory, `~/.config/waypoint` on Linux.
pub fn config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR))
        .ok_or_else(|| WaypointError::config("could not determine the user config directory"))
}

/// Returns the path of the credentials file.
pub fn credentials_file() -> Result<PathBuf> {
    Ok(config_dir()?.join(CREDENTIALS_FILE))
}
