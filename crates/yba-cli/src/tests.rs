use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use clap_complete::Shell;
use yba_core::YbVersion;
use yba_installer::{
    CommandOutput, CommandRunner, ConfirmPolicy, InstallContext, InstallLayout, InstallerError,
    PrunePlan, PruneReport, Workflow,
};

use crate::completion::write_completions_script;
use crate::dispatch::{
    confirm_policy_for, format_doctor_lines, format_paths_lines, format_prune_plan_lines,
    format_prune_report_lines, workflow_for,
};
use crate::render::{render_status_line, OutputStyle};
use crate::{Cli, Commands};

struct ScriptedRunner;

impl CommandRunner for ScriptedRunner {
    fn run(&self, program: &str, args: &[&str]) -> yba_installer::Result<CommandOutput> {
        let stdout = match (program, args.first().copied()) {
            ("id", Some("-un")) => "yugabyte\n",
            ("id", Some("-u")) => "1000\n",
            ("bash", _) => "\"CentOS Linux\"\n",
            _ => {
                return Err(InstallerError::CommandSpawn {
                    command: program.to_string(),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "not scripted"),
                })
            }
        };
        Ok(CommandOutput {
            stdout: stdout.to_string(),
            stderr: String::new(),
            elapsed: Duration::ZERO,
        })
    }
}

fn sample_context() -> InstallContext {
    InstallContext::new(
        InstallLayout::new(
            "/opt/yugabyte",
            YbVersion::parse("2.18.2.0-b12").expect("version must parse"),
        ),
        Workflow::Install,
        ConfirmPolicy::interactive(),
    )
}

#[test]
fn parses_prune_with_global_flags() {
    let cli = Cli::try_parse_from([
        "yba-ctl",
        "prune",
        "--dry-run",
        "--force",
        "--config",
        "/tmp/yba-ctl.yml",
    ])
    .expect("cli must parse");

    assert!(cli.force);
    assert!(!cli.upgrade);
    assert_eq!(cli.config, Some(PathBuf::from("/tmp/yba-ctl.yml")));
    assert!(matches!(cli.command, Commands::Prune { dry_run: true }));
}

#[test]
fn generate_secret_defaults_to_32_bytes() {
    let cli = Cli::try_parse_from(["yba-ctl", "generate-secret"]).expect("cli must parse");
    assert!(matches!(cli.command, Commands::GenerateSecret { bytes: 32 }));

    let cli = Cli::try_parse_from(["yba-ctl", "generate-secret", "--bytes", "12"])
        .expect("cli must parse");
    assert!(matches!(cli.command, Commands::GenerateSecret { bytes: 12 }));
}

#[test]
fn rejects_unknown_completion_shell() {
    let err = Cli::try_parse_from(["yba-ctl", "completion", "tcsh"]).expect_err("must fail");
    assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
}

#[test]
fn flags_map_to_session_settings() {
    assert_eq!(workflow_for(true), Workflow::Upgrade);
    assert_eq!(workflow_for(false), Workflow::Install);
    assert!(confirm_policy_for(true).skip_confirmation);
    assert!(!confirm_policy_for(false).skip_confirmation);
}

#[test]
fn paths_lines_list_canonical_layout() {
    let lines = format_paths_lines(&sample_context());
    assert_eq!(lines.len(), 8);
    assert!(lines[0].starts_with("workflow:") && lines[0].ends_with("install"));
    assert!(lines[1].ends_with("2.18.2.0-b12"));
    assert!(lines[4].ends_with("/opt/yugabyte/software/2.18.2.0-b12"));
    assert!(lines[5].ends_with("/opt/yugabyte/software/active"));
    assert!(lines[7].ends_with("/opt/yugabyte/data/yba-installer/certs"));
}

#[test]
fn prune_plan_lines_report_nothing_to_prune() {
    let plan = PrunePlan {
        software_root: PathBuf::from("/opt/yugabyte/software"),
        active_version: "2.18.2.0-b12".to_string(),
        remove: Vec::new(),
        retained: None,
    };
    assert_eq!(
        format_prune_plan_lines(&plan),
        vec![
            "active release: 2.18.2.0-b12",
            "keeping fallback: none",
            "nothing to prune",
        ]
    );
}

#[test]
fn prune_plan_lines_list_removals() {
    let plan = PrunePlan {
        software_root: PathBuf::from("/opt/yugabyte/software"),
        active_version: "2.18.2.0-b12".to_string(),
        remove: vec![PathBuf::from("/opt/yugabyte/software/2.16.1.0-b234")],
        retained: Some(PathBuf::from("/opt/yugabyte/software/2.17.0.0-b50")),
    };
    assert_eq!(
        format_prune_plan_lines(&plan),
        vec![
            "active release: 2.18.2.0-b12",
            "keeping fallback: /opt/yugabyte/software/2.17.0.0-b50",
            "would remove: /opt/yugabyte/software/2.16.1.0-b234",
        ]
    );
}

#[test]
fn prune_report_lines_badge_removals_and_failures() {
    let report = PruneReport {
        removed: vec![PathBuf::from("/opt/yugabyte/software/2.14.0.0-b1")],
        retained: None,
        failures: vec![yba_installer::PruneFailure {
            path: PathBuf::from("/opt/yugabyte/software/2.15.0.0-b1"),
            error: InstallerError::Prompt("stub".to_string()),
        }],
    };

    let lines = format_prune_report_lines(&report, OutputStyle::Rich);
    assert_eq!(lines[0], "[OK] removed /opt/yugabyte/software/2.14.0.0-b1");
    assert!(lines[1].starts_with("[WARN] "));

    let plain = format_prune_report_lines(&report, OutputStyle::Plain);
    assert_eq!(plain[0], "removed /opt/yugabyte/software/2.14.0.0-b1");
}

#[test]
fn render_status_line_plain_is_unadorned() {
    assert_eq!(
        render_status_line(OutputStyle::Plain, "ok", "pruned 2 releases"),
        "pruned 2 releases"
    );
    assert_eq!(
        render_status_line(OutputStyle::Rich, "warn", "prune cancelled"),
        "[WARN] prune cancelled"
    );
}

#[test]
fn doctor_lines_report_user_privilege_and_family() {
    let lines = format_doctor_lines(&ScriptedRunner, Some(IpAddr::from([10, 0, 0, 7])))
        .expect("doctor must succeed");
    assert!(lines[0].ends_with("yugabyte"));
    assert!(lines[1].ends_with("no"));
    assert!(lines[2].ends_with("CentOS Linux"));
    assert!(lines[3].ends_with("yum"));
    assert!(lines[4].ends_with("10.0.0.7"));

    let lines = format_doctor_lines(&ScriptedRunner, None).expect("doctor must succeed");
    assert!(lines[4].ends_with("unknown"));
}

#[test]
fn completion_script_names_binary() {
    let mut script = Vec::new();
    write_completions_script(Shell::Bash, &mut script).expect("must generate");
    let script = String::from_utf8(script).expect("utf8 script");
    assert!(script.contains("yba-ctl"));
    assert!(script.contains("prune"));
}
