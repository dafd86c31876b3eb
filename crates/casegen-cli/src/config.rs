//! Configuration loading for the CLI.
//!
//! The CLI shares the server's TOML format. An explicit `--config` path must
//! exist; otherwise `casegen.toml` in the working directory is used when
//! present, and built-in defaults when not.

use crate::error::Result;
use casegen_server::config::ServerConfig;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "casegen.toml";

/// Load configuration and apply environment overrides.
pub fn load(explicit: Option<&Path>) -> Result<ServerConfig> {
    let config = match resolve_path(explicit) {
        Some(path) => {
            debug!("Loading configuration from {}", path.display());
            ServerConfig::from_file(&path)?
        }
        None => ServerConfig::default(),
    };

    Ok(config.with_env_overrides()?)
}

fn resolve_path(explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let local = PathBuf::from(DEFAULT_CONFIG_FILE);
            local.exists().then_some(local)
        }
    }
}
