mod config;
mod confirm;
mod context;
mod error;
mod fs_utils;
mod layout;
mod net;
mod privilege;
mod process;
mod prune;

pub use config::{
    InstallerConfig, DEFAULT_INSTALL_ROOT, DEFAULT_SERVICE_USER, INPUT_FILE, INSTALLED_MARKER,
    INSTALLING_MARKER, LOG_FILE,
};
pub use confirm::{user_confirm, ConfirmPolicy, DefaultAnswer};
pub use context::{InstallContext, Workflow};
pub use error::{InstallerError, Result, Severity};
pub use fs_utils::{
    chown, copy_file, create_dir, create_file, create_symlink, force_symlink, move_file,
    remove_file_if_exists,
};
pub use layout::{
    binary_dir, java_package_path, postgres_package_path, reference_config_path,
    single_glob_match, InstallLayout, ACTIVE_SYMLINK, CONFIG_TEMPLATE_DIR, CRON_DIR,
    JAVA_PACKAGE_GLOB, POSTGRES_PACKAGE_GLOB, SYSTEMD_DIR,
};
pub use net::{guess_primary_ip, guess_primary_ip_towards};
pub use privilege::{current_user, detect_os, has_sudo_access, OsFamily};
pub use process::{run_command, CommandOutput, CommandRunner, SystemCommandRunner};
pub use prune::{
    execute_prune, plan_prune, prune_past_installs, PruneFailure, PrunePlan, PruneReport,
};
