use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::version::{VersionParseError, YbVersion};

pub const VERSION_METADATA_FILE: &str = "version_metadata.json";
pub const MODE_ENV_VAR: &str = "YBA_MODE";

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("failed to read version metadata {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse version metadata: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("version metadata is missing field '{0}'")]
    MissingField(&'static str),
    #[error("version metadata field '{0}' must be a string or number")]
    UnsupportedValue(&'static str),
    #[error("invalid version in metadata file: {0}")]
    InvalidVersion(#[from] VersionParseError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildNumberSource {
    BuildNumber,
    // dev itest builds carry PRE_RELEASE in build_number
    BuildId,
}

impl BuildNumberSource {
    pub fn from_env() -> Self {
        Self::from_mode(std::env::var(MODE_ENV_VAR).ok().as_deref())
    }

    pub fn from_mode(mode: Option<&str>) -> Self {
        match mode {
            Some("dev") => Self::BuildId,
            _ => Self::BuildNumber,
        }
    }

    fn field_name(self) -> &'static str {
        match self {
            Self::BuildNumber => "build_number",
            Self::BuildId => "build_id",
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct VersionMetadata {
    #[serde(default)]
    pub version_number: Option<Value>,
    #[serde(default)]
    pub build_number: Option<Value>,
    #[serde(default)]
    pub build_id: Option<Value>,
}

impl VersionMetadata {
    pub fn from_json_str(input: &str) -> Result<Self, MetadataError> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn load(dir: &Path) -> Result<Self, MetadataError> {
        let path = dir.join(VERSION_METADATA_FILE);
        let raw = fs::read_to_string(&path).map_err(|source| MetadataError::Read {
            path: path.clone(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn resolve_version(&self, source: BuildNumberSource) -> Result<YbVersion, MetadataError> {
        let version_number = render_field("version_number", self.version_number.as_ref())?;
        let build = match source {
            BuildNumberSource::BuildNumber => self.build_number.as_ref(),
            BuildNumberSource::BuildId => self.build_id.as_ref(),
        };
        let build = render_field(source.field_name(), build)?;
        Ok(YbVersion::parse(&format!("{version_number}-b{build}"))?)
    }
}

fn render_field(name: &'static str, value: Option<&Value>) -> Result<String, MetadataError> {
    match value {
        None | Some(Value::Null) => Err(MetadataError::MissingField(name)),
        Some(Value::String(text)) => Ok(text.trim().to_string()),
        Some(Value::Number(number)) => Ok(number.to_string()),
        Some(_) => Err(MetadataError::UnsupportedValue(name)),
    }
}
