use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use yba_core::YbVersion;

use crate::error::{InstallerError, Result};
use crate::layout::InstallLayout;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrunePlan {
    pub software_root: PathBuf,
    pub active_version: String,
    pub remove: Vec<PathBuf>,
        pub retained: Option<PathBuf>,
}

#[derive(Debug)]
pub struct PruneFailure {
    pub path: PathBuf,
    pub error: InstallerError,
}

#[derive(Debug, Default)]
pub struct PruneReport {
    pub removed: Vec<PathBuf>,
    pub retained: Option<PathBuf>,
    pub failures: Vec<PruneFailure>,
}

impl PruneReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

pub fn plan_prune(software_root: &Path, active_symlink: &Path) -> Result<PrunePlan> {
    let entries =
        fs::read_dir(software_root).map_err(|source| InstallerError::SoftwareRootUnreadable {
            path: software_root.to_path_buf(),
            source,
        })?;

    let active_path = fs::canonicalize(active_symlink).map_err(|source| {
        InstallerError::ActiveSymlinkUnresolvable {
            path: active_symlink.to_path_buf(),
            source,
        }
    })?;
    let active_version = active_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut candidates = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| InstallerError::SoftwareRootUnreadable {
            path: software_root.to_path_buf(),
            source,
        })?;
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        debug!("Entry before prune {name}");
        if name == active_version {
            continue;
        }
        match YbVersion::parse(&name) {
            Ok(version) => candidates.push((version, name)),
            Err(_) => debug!("Skipping non-release entry {name}"),
        }
    }

    candidates.sort_by(|a, b| a.0.cmp(&b.0));
    for (_, name) in &candidates {
        debug!("Release candidate {name}");
    }

    let retained = candidates
        .pop()
        .map(|(_, name)| software_root.join(name));
    let remove = candidates
        .into_iter()
        .map(|(_, name)| software_root.join(name))
        .collect();

    Ok(PrunePlan {
        software_root: software_root.to_path_buf(),
        active_version,
        remove,
        retained,
    })
}

pub fn execute_prune(plan: &PrunePlan) -> PruneReport {
    let mut report = PruneReport {
        retained: plan.retained.clone(),
        ..PruneReport::default()
    };

    for path in &plan.remove {
        warn!("Removing old release directory {}", path.display());
        match remove_entry(path) {
            Ok(()) => report.removed.push(path.clone()),
            // Keep going; the caller reports every failure at the end.
            Err(err) => {
                warn!("Failed to remove {}: {err}", path.display());
                report.failures.push(PruneFailure {
                    path: path.clone(),
                    error: InstallerError::io(format!("failed to remove {}", path.display()), err),
                });
            }
        }
    }

    report
}

fn remove_entry(path: &Path) -> io::Result<()> {
    // Release-named plain files are stale too.
    if fs::symlink_metadata(path)?.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}

pub fn prune_past_installs(layout: &InstallLayout) -> Result<PruneReport> {
    let plan = plan_prune(&layout.software_root(), &layout.active_symlink())?;
    Ok(execute_prune(&plan))
}
