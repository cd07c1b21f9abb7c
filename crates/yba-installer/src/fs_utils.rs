use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{InstallerError, Result};
use crate::process::CommandRunner;

const COPIED_FILE_MODE: u32 = 0o644;

pub fn remove_file_if_exists(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err),
    }
}

pub fn copy_file(src: &Path, dst: &Path) -> Result<()> {
    let copy_error = |source| InstallerError::FileCopy {
        src: src.to_path_buf(),
        dst: dst.to_path_buf(),
        source,
    };
    let bytes = fs::read(src).map_err(copy_error)?;
    fs::write(dst, &bytes).map_err(copy_error)?;
    set_mode(dst, COPIED_FILE_MODE).map_err(copy_error)?;

    debug!(
        "Copy from {} to {} executed successfully.",
        src.display(),
        dst.display()
    );
    Ok(())
}

pub fn move_file(src: &Path, dst: &Path) -> Result<()> {
    fs::rename(src, dst).map_err(|source| InstallerError::FileMove {
        src: src.to_path_buf(),
        dst: dst.to_path_buf(),
        source,
    })?;

    debug!(
        "Move from {} to {} executed successfully.",
        src.display(),
        dst.display()
    );
    Ok(())
}

pub fn force_symlink(target: &Path, link: &Path) -> Result<()> {
    if let Ok(metadata) = fs::symlink_metadata(link) {
        if metadata.is_dir() {
            return Err(InstallerError::io(
                format!("refusing to replace directory {} with symlink", link.display()),
                io::Error::new(io::ErrorKind::AlreadyExists, "destination is a directory"),
            ));
        }
        remove_file_if_exists(link).map_err(|err| {
            InstallerError::io(format!("failed to remove {}", link.display()), err)
        })?;
    }

    create_symlink_entry(target, link)?;
    debug!("Linked {} -> {}", link.display(), target.display());
    Ok(())
}

pub fn create_symlink(pkg_dir: &Path, link_dir: &Path, name: &str) -> Result<PathBuf> {
    let link = link_dir.join(name);
    force_symlink(&pkg_dir.join(name), &link)?;
    Ok(link)
}

pub fn create_dir(dir: &Path, mode: u32) -> Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;

    builder
        .create(dir)
        .map_err(|source| InstallerError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })
}

pub fn create_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        create_dir(parent, 0o777)?;
    }
    File::create(path).map_err(|source| InstallerError::CreateFile {
        path: path.to_path_buf(),
        source,
    })
}

pub fn chown(
    runner: &dyn CommandRunner,
    dir: &Path,
    user: &str,
    group: &str,
    recursive: bool,
) -> Result<()> {
    let owner = format!("{user}:{group}");
    let dir = dir.display().to_string();
    let mut args = Vec::with_capacity(3);
    if recursive {
        args.push("-R");
    }
    args.push(owner.as_str());
    args.push(dir.as_str());
    runner.run("chown", &args)?;
    Ok(())
}

fn set_mode(path: &Path, mode: u32) -> io::Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(mode))?;
    }
    #[cfg(not(unix))]
    let _ = (path, mode);
    Ok(())
}

fn create_symlink_entry(target: &Path, link: &Path) -> Result<()> {
    #[cfg(unix)]
    let created = std::os::unix::fs::symlink(target, link);
    #[cfg(windows)]
    let created = if target.is_dir() {
        std::os::windows::fs::symlink_dir(target, link)
    } else {
        std::os::windows::fs::symlink_file(target, link)
    };

    created.map_err(|err| {
        InstallerError::io(
            format!(
                "failed to create symlink {} -> {}",
                link.display(),
                target.display()
            ),
            err,
        )
    })
}
