use std::path::PathBuf;
use tracing::{debug, warn};

use crate::types::DashboardError;

pub(super) const CONFIG_PATH_ENV: &str = "CALLBOARD_CONFIG";

/// Get the path to the config.json file
/// An explicit `CALLBOARD_CONFIG` wins, otherwise config.json in the app root
/// (parent of the directory holding the executable)
pub(super) fn get_config_path() -> Result<PathBuf, DashboardError> {
    if let Ok(custom) = std::env::var(CONFIG_PATH_ENV) {
        let trimmed = custom.trim();
        if !trimmed.is_empty() {
            return Ok(PathBuf::from(trimmed));
        }
    }

    // Executable is at: app_root/bin/callboard-backend
    // Config should be at: app_root/config.json
    if let Ok(exe_path) = std::env::current_exe() {
        debug!(path = %exe_path.display(), "Executable path detected");

        if let Some(app_root) = exe_path.parent().and_then(|bin_dir| bin_dir.parent()) {
            let config_path = app_root.join("config.json");
            if config_path.exists() {
                debug!(path = %config_path.display(), "Using app root config");
                return Ok(config_path);
            }
        }
    }

    warn!("Using fallback: looking for config.json in current directory");
    let cwd = std::env::current_dir()
        .map_err(|err| DashboardError::Config(format!("Failed to determine working dir: {err}")))?;
    Ok(cwd.join("config.json"))
}
