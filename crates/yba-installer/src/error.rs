use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;
use yba_core::MetadataError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Fatal,
    Recoverable,
}

#[derive(Debug, Error)]
pub enum InstallerError {
    #[error("failed to load config {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },
    #[error(transparent)]
    VersionMetadata(#[from] MetadataError),
    #[error("failed to read software root {}: {source}", .path.display())]
    SoftwareRootUnreadable { path: PathBuf, source: io::Error },
    #[error("failed to resolve active symlink {}: {source}", .path.display())]
    ActiveSymlinkUnresolvable { path: PathBuf, source: io::Error },
    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidGlob { pattern: String, message: String },
    #[error("expected exactly one match for glob '{pattern}', found {}", .matches.len())]
    GlobMatch {
        pattern: String,
        matches: Vec<PathBuf>,
    },
    #[error("failed to start command '{command}': {source}")]
    CommandSpawn { command: String, source: io::Error },
    #[error("command '{command}' failed with {status} and stderr {stderr}")]
    CommandFailed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },
    #[error("failed to determine privilege level: {0}")]
    PrivilegeCheck(String),
    #[error("failed to determine binary directory: {source}")]
    BinaryDir { source: io::Error },
    #[error("failed to copy {} to {}: {source}", .src.display(), .dst.display())]
    FileCopy {
        src: PathBuf,
        dst: PathBuf,
        source: io::Error,
    },
    #[error("failed to move {} to {}: {source}", .src.display(), .dst.display())]
    FileMove {
        src: PathBuf,
        dst: PathBuf,
        source: io::Error,
    },
    #[error("failed to create directory {}: {source}", .path.display())]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("failed to create file {}: {source}", .path.display())]
    CreateFile { path: PathBuf, source: io::Error },
    #[error("failed to determine primary IP address: {source}")]
    PrimaryIp { source: io::Error },
    #[error("{context}: {source}")]
    Io { context: String, source: io::Error },
    #[error("failed to read confirmation: {0}")]
    Prompt(String),
}

impl InstallerError {
    pub fn severity(&self) -> Severity {
        match self {
            Self::Config { .. }
            | Self::VersionMetadata(_)
            | Self::SoftwareRootUnreadable { .. }
            | Self::ActiveSymlinkUnresolvable { .. }
            | Self::InvalidGlob { .. }
            | Self::GlobMatch { .. }
            | Self::CommandSpawn { .. }
            | Self::PrivilegeCheck(_)
            | Self::BinaryDir { .. }
            | Self::FileCopy { .. }
            | Self::FileMove { .. }
            | Self::CreateDir { .. }
            | Self::CreateFile { .. }
            | Self::PrimaryIp { .. } => Severity::Fatal,
            Self::CommandFailed { .. } | Self::Io { .. } | Self::Prompt(_) => {
                Severity::Recoverable
            }
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }

    pub(crate) fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

pub type Result<T, E = InstallerError> = std::result::Result<T, E>;
