use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use figment::{
    providers::{Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use super::{Settings, FILE_NAME};
use crate::utils::get_app_config_path;

/// The version written into new config files
pub const CURRENT_VERSION: &str = "1";

/// The type used by the application / the latest config version
///
/// This type exists so that it is easier to differentiate when the explicit type is meant, or later meant to be changed as a whole
type ApplicationType = Settings;

/// Only used to find out which version a file has before extracting the rest
#[derive(Debug, Deserialize)]
struct VersionOnly {
    version: Option<String>,
}

/// Wrapper that adds the `version` field when saving
#[derive(Debug, Serialize)]
struct SettingsVersioned<'a> {
    version: &'a str,
    #[serde(flatten)]
    settings: &'a ApplicationType,
}

/// Read a config file, needs to be toml formatted
///
/// Files without a `version` field are read as the current version.
/// A missing file results in the default settings.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<ApplicationType> {
    let figment = Figment::new().merge(Toml::file(path.as_ref()));

    let version_only: VersionOnly = figment.extract()?;
    match version_only.version.as_deref() {
        None | Some(CURRENT_VERSION) => (),
        Some(other) => bail!("Unsupported config version \"{other}\""),
    }

    let data: ApplicationType = figment.extract()?;

    Ok(data)
}

/// Save type used by the application as a config file
///
/// Will only save the latest version
pub fn save_file<P: AsRef<Path>>(path: P, config: &ApplicationType) -> Result<()> {
    let data = SettingsVersioned {
        version: CURRENT_VERSION,
        settings: config,
    };
    std::fs::write(path, toml::to_string(&data)?)?;

    Ok(())
}

/// Get the path of the default config file, creating the config dir if necessary
pub fn default_config_path() -> Result<PathBuf> {
    Ok(get_app_config_path()?.join(FILE_NAME))
}

/// Load the config from `path`, or from the default location if `None`
///
/// Unlike the default location, a explicitly given file has to exist.
pub fn load(path: Option<&Path>) -> Result<ApplicationType> {
    let path = match path {
        Some(p) => {
            if !p.exists() {
                bail!("Config file \"{}\" does not exist", p.display());
            }
            p.to_path_buf()
        }
        None => default_config_path()?,
    };

    info!("Loading config from \"{}\"", path.display());
    from_file(&path).with_context(|| format!("Reading config \"{}\"", path.display()))
}
