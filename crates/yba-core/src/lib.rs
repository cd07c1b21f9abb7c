mod metadata;
mod version;

pub use metadata::{
    BuildNumberSource, MetadataError, VersionMetadata, MODE_ENV_VAR, VERSION_METADATA_FILE,
};
pub use version::{is_valid_version, less_versions, VersionParseError, YbVersion};
