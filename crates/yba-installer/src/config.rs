use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{InstallerError, Result};

pub const INPUT_FILE: &str = "/opt/yba-ctl/yba-ctl.yml";
pub const LOG_FILE: &str = "/opt/yba-ctl/yba-ctl.log";
pub const INSTALLING_MARKER: &str = "/opt/yba-ctl/.installing";
pub const INSTALLED_MARKER: &str = "/opt/yba-ctl/.installed";

pub const DEFAULT_INSTALL_ROOT: &str = "/opt/yugabyte";
pub const DEFAULT_SERVICE_USER: &str = "yugabyte";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InstallerConfig {
    #[serde(rename = "installRoot")]
    pub install_root: PathBuf,
    pub service_username: String,
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            install_root: PathBuf::from(DEFAULT_INSTALL_ROOT),
            service_username: DEFAULT_SERVICE_USER.to_string(),
        }
    }
}

impl InstallerConfig {
    pub fn from_yaml_str(input: &str) -> std::result::Result<Self, serde_yaml::Error> {
        if input.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(input)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(err) => {
                return Err(InstallerError::Config {
                    path: path.to_path_buf(),
                    message: err.to_string(),
                });
            }
        };

        Self::from_yaml_str(&raw).map_err(|err| InstallerError::Config {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }
}
