use std::io::{BufRead, Write};
use std::path::Path;

use yba_core::{BuildNumberSource, VersionMetadata};

use crate::config::InstallerConfig;
use crate::confirm::{user_confirm, ConfirmPolicy, DefaultAnswer};
use crate::error::Result;
use crate::layout::InstallLayout;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Workflow {
    #[default]
    Install,
    Upgrade,
}

impl Workflow {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Install => "install",
            Self::Upgrade => "upgrade",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallContext {
    pub layout: InstallLayout,
    pub workflow: Workflow,
    pub confirm: ConfirmPolicy,
}

impl InstallContext {
    pub fn new(layout: InstallLayout, workflow: Workflow, confirm: ConfirmPolicy) -> Self {
        Self {
            layout,
            workflow,
            confirm,
        }
    }

    pub fn load(
        config: &InstallerConfig,
        metadata_dir: &Path,
        build_source: BuildNumberSource,
        workflow: Workflow,
        confirm: ConfirmPolicy,
    ) -> Result<Self> {
        let version = VersionMetadata::load(metadata_dir)?.resolve_version(build_source)?;
        let layout = InstallLayout::new(config.install_root.clone(), version);
        Ok(Self::new(layout, workflow, confirm))
    }

    pub fn confirm<R: BufRead, W: Write>(
        &self,
        prompt: &str,
        default: DefaultAnswer,
        input: &mut R,
        output: &mut W,
    ) -> Result<bool> {
        user_confirm(self.confirm, prompt, default, input, output)
    }
}
