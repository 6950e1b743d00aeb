use std::path::PathBuf;

use anyhow::{anyhow, Result};

/// Name of the directory inside the os config dir
const APP_DIR_NAME: &str = "plfilter";

/// Get the config directory of this application, creating it if missing
pub fn get_app_config_path() -> Result<PathBuf> {
    let mut path = dirs::config_dir().ok_or_else(|| anyhow!("failed to find os config dir."))?;
    path.push(APP_DIR_NAME);

    if !path.exists() {
        std::fs::create_dir_all(&path)?;
    }
    Ok(path)
}
