use std::fs;
use std::path::{Path, PathBuf};

use yba_core::YbVersion;

use crate::error::{InstallerError, Result};
use crate::fs_utils::{create_dir, force_symlink};

pub const SOFTWARE_DIR: &str = "software";
pub const DATA_DIR: &str = "data";
pub const ACTIVE_SYMLINK: &str = "active";
pub const INSTALLER_DATA_DIR: &str = "yba-installer";
pub const CERTS_DIR: &str = "certs";

pub const CONFIG_TEMPLATE_DIR: &str = "templates";
pub const CRON_DIR: &str = "cron";
pub const SYSTEMD_DIR: &str = "/etc/systemd/system";
pub const REFERENCE_CONFIG_FILE: &str = "yba-ctl.yml.reference";

pub const POSTGRES_PACKAGE_GLOB: &str = "postgresql-*-linux-x64-binaries.tar.gz";
pub const JAVA_PACKAGE_GLOB: &str = "OpenJDK8U-jdk_x64_linux_*.tar.gz";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallLayout {
    base_install: PathBuf,
    version: YbVersion,
}

impl InstallLayout {
    pub fn new(base_install: impl Into<PathBuf>, version: YbVersion) -> Self {
        Self {
            base_install: base_install.into(),
            version,
        }
    }

    pub fn base_install(&self) -> &Path {
        &self.base_install
    }

    pub fn version(&self) -> &YbVersion {
        &self.version
    }

    pub fn data_root(&self) -> PathBuf {
        self.base_install.join(DATA_DIR)
    }

    pub fn software_root(&self) -> PathBuf {
        self.base_install.join(SOFTWARE_DIR)
    }

    pub fn working_directory(&self) -> PathBuf {
        self.software_root().join(self.version.to_string())
    }

    pub fn active_symlink(&self) -> PathBuf {
        self.software_root().join(ACTIVE_SYMLINK)
    }

    pub fn install_version_dir(&self) -> PathBuf {
        self.working_directory()
            .join(format!("yba_installer-{}", self.version))
    }

    pub fn installer_data_dir(&self) -> PathBuf {
        self.data_root().join(INSTALLER_DATA_DIR)
    }

    pub fn self_signed_certs_dir(&self) -> PathBuf {
        self.installer_data_dir().join(CERTS_DIR)
    }

    pub fn ensure_base_dirs(&self) -> Result<()> {
        for dir in [
            self.data_root(),
            self.software_root(),
            self.working_directory(),
            self.installer_data_dir(),
        ] {
            create_dir(&dir, 0o755)?;
        }
        Ok(())
    }

    pub fn activate_working_directory(&self) -> Result<PathBuf> {
        let link = self.active_symlink();
        force_symlink(&self.working_directory(), &link)?;
        Ok(link)
    }
}

pub fn single_glob_match(pattern: &str) -> Result<PathBuf> {
    let paths = glob::glob(pattern).map_err(|err| InstallerError::InvalidGlob {
        pattern: pattern.to_string(),
        message: err.to_string(),
    })?;

    let mut matches = Vec::new();
    for entry in paths {
        let path = entry.map_err(|err| InstallerError::InvalidGlob {
            pattern: pattern.to_string(),
            message: err.to_string(),
        })?;
        matches.push(path);
    }

    if matches.len() != 1 {
        return Err(InstallerError::GlobMatch {
            pattern: pattern.to_string(),
            matches,
        });
    }
    Ok(matches.remove(0))
}

pub fn postgres_package_path(bundle_dir: &Path) -> Result<PathBuf> {
    single_glob_match(&bundle_dir.join(POSTGRES_PACKAGE_GLOB).to_string_lossy())
}

pub fn java_package_path(bundle_dir: &Path) -> Result<PathBuf> {
    single_glob_match(&bundle_dir.join(JAVA_PACKAGE_GLOB).to_string_lossy())
}

pub fn binary_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().map_err(|source| InstallerError::BinaryDir { source })?;
    let real = fs::canonicalize(&exe).map_err(|source| InstallerError::BinaryDir { source })?;
    Ok(real
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("/")))
}

pub fn reference_config_path(bundle_dir: &Path) -> PathBuf {
    bundle_dir.join(REFERENCE_CONFIG_FILE)
}
