use log::debug;
use path_clean::PathClean;
use serde::{Deserialize, Serialize};
use std::env::VarError;
use std::path::{Path, PathBuf};
use utility::{Error, Result};

/// CONFIG_LOCATION_ENV is the name of the env variable used
/// to configure the location of the nuclio config folder.
/// When not set, DEFAULT_DIR location is used.
pub const CONFIG_LOCATION_ENV: &str = "NUCLIO_CONFIG";

pub const DEFAULT_DIR: &str = "~/.nuclio";
pub const DEFAULT_FILE: &str = "config.yml";

/// DEFAULT_CI_DIR is the 'nuclio' directory in the current directory
/// used when running in a CI environment.
pub const DEFAULT_CI_DIR: &str = "./nuclio";

/// ConfigFile for the nuclio CLI.
#[derive(Serialize, Deserialize, Default, Clone, Debug, PartialEq)]
pub struct ConfigFile {
    /// dashboard url, e.g. http://127.0.0.1:8070
    #[serde(default)]
    #[serde(skip_serializing_if = "utility::is_default")]
    pub dashboard: String,
    /// namespace used when no flag or env var selects one
    #[serde(default)]
    #[serde(skip_serializing_if = "utility::is_default")]
    pub namespace: String,
}

/// config_dir returns the path to the nuclio config directory.
/// When
/// 1. CI = "true" and NUCLIO_CONFIG="", then it will return `./nuclio`, which is located in the current working directory.
/// 2. NUCLIO_CONFIG="<path>", then it will return the path value in NUCLIO_CONFIG
/// 3. CI = "" and NUCLIO_CONFIG="", then it will return the default location ~/.nuclio
pub fn config_dir() -> Result<String> {
    match std::env::var(CONFIG_LOCATION_ENV) {
        Ok(overrid) => {
            if overrid.is_empty() && is_running_in_ci() {
                Ok(DEFAULT_CI_DIR.into())
            } else if !overrid.is_empty() {
                Ok(overrid)
            } else {
                Ok(DEFAULT_DIR.into())
            }
        }
        Err(VarError::NotPresent) => {
            if is_running_in_ci() {
                Ok(DEFAULT_CI_DIR.into())
            } else {
                Ok(DEFAULT_DIR.into())
            }
        }
        Err(e) => Err(Error::Custom(format!("{:?}", e))),
    }
}

/// is_running_in_ci checks the ENV var CI and returns true if it's set to true or 1
fn is_running_in_ci() -> bool {
    match std::env::var("CI") {
        Ok(val) => val == "1" || val == "true",
        Err(_) => false,
    }
}

/// full path of the config file, with ~ expanded
pub fn config_path() -> Result<PathBuf> {
    let dir = config_dir()?;
    let dir = shellexpand::tilde(&dir);
    Ok(PathBuf::from(dir.into_owned()).join(DEFAULT_FILE).clean())
}

impl ConfigFile {
    /// load reads the yaml file from disk, a missing or empty file is an empty config
    pub fn load(path: &Path) -> Result<ConfigFile> {
        let data = match std::fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("no config file at {}", path.display());
                return Ok(ConfigFile::default());
            }
            Err(e) => return Err(Error::Io(e)),
        };
        if data.trim().is_empty() {
            return Ok(ConfigFile::default());
        }
        let conf: ConfigFile = serde_yaml::from_str(data.as_str())?;
        debug!("loaded config from {}", path.display());
        Ok(conf)
    }
}

/// reads the config file at the location selected by the environment
pub fn lookup_config() -> Result<ConfigFile> {
    let path = config_path()?;
    ConfigFile::load(&path)
}
