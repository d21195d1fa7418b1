use dirs::home_dir;
use std::{env, path::PathBuf};

use tally_config::{Config, ConfigManager};

use crate::errors::Result;

const DEFAULT_DIR_NAME: &str = ".tally";
const HOME_ENV: &str = "TALLY_HOME";

/// Returns the application-specific data directory, defaulting to `~/.tally`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Config manager rooted at [`app_data_dir`].
pub fn config_manager() -> Result<ConfigManager> {
    Ok(ConfigManager::with_base_dir(app_data_dir())?)
}

/// Loads the user's preferences, or defaults when none were saved.
pub fn load_config() -> Result<Config> {
    let config = config_manager()?.load()?;
    tracing::debug!(
        palette_size = config.palette_size,
        view_mode = %config.default_view_mode,
        "configuration loaded"
    );
    Ok(config)
}
