use crate::error::{InstallerError, Result};
use crate::process::CommandRunner;

const OS_RELEASE_NAME_SCRIPT: &str = "awk -F= '/^NAME/{print $2}' /etc/os-release";

const YUM_DISTRIBUTIONS: [&str; 5] = ["RedHat", "CentOS", "Oracle", "Alma", "Amazon"];
const APT_DISTRIBUTIONS: [&str; 2] = ["Ubuntu", "Debian"];

pub fn has_sudo_access(runner: &dyn CommandRunner) -> Result<bool> {
    let output = runner
        .run("id", &["-u"])
        .map_err(|err| InstallerError::PrivilegeCheck(err.to_string()))?;
    let uid = output.stdout.trim();
    let uid: u32 = uid
        .parse()
        .map_err(|_| InstallerError::PrivilegeCheck(format!("unexpected `id -u` output '{uid}'")))?;
    Ok(uid == 0)
}

pub fn current_user(runner: &dyn CommandRunner) -> Result<String> {
    let output = runner
        .run("id", &["-un"])
        .map_err(|err| InstallerError::PrivilegeCheck(err.to_string()))?;
    let user = output.stdout.trim();
    if user.is_empty() {
        return Err(InstallerError::PrivilegeCheck(
            "`id -un` returned no user name".to_string(),
        ));
    }
    Ok(user.to_string())
}

pub fn detect_os(runner: &dyn CommandRunner) -> Result<String> {
    let output = runner.run("bash", &["-c", OS_RELEASE_NAME_SCRIPT])?;
    Ok(output.stdout.trim().trim_matches('"').to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsFamily {
    Yum,
    Apt,
}

impl OsFamily {
    pub fn classify(os_name: &str) -> Option<Self> {
        if YUM_DISTRIBUTIONS.iter().any(|name| os_name.contains(name)) {
            return Some(Self::Yum);
        }
        if APT_DISTRIBUTIONS.iter().any(|name| os_name.contains(name)) {
            return Some(Self::Apt);
        }
        None
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Yum => "yum",
            Self::Apt => "apt",
        }
    }
}
