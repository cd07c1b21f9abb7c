use std::io;
use std::net::IpAddr;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use yba_core::BuildNumberSource;
use yba_installer::{
    binary_dir, current_user, detect_os, execute_prune, guess_primary_ip, has_sudo_access,
    plan_prune, CommandRunner, ConfirmPolicy, DefaultAnswer, InstallContext, InstallerConfig,
    OsFamily, PrunePlan, PruneReport, SystemCommandRunner, Workflow, INPUT_FILE,
};
use yba_security::generate_random_string_url_safe;

use crate::completion::write_completions_script;
use crate::render::{
    current_output_style, print_status, render_key_value, render_status_line, OutputStyle,
};
use crate::{Cli, Commands};

pub(crate) fn run_cli(cli: Cli) -> Result<()> {
    let output_style = current_output_style();

    match &cli.command {
        Commands::Completion { shell } => {
            let mut stdout = io::stdout().lock();
            write_completions_script(*shell, &mut stdout)?;
        }
        Commands::GenerateSecret { bytes } => {
            println!("{}", generate_random_string_url_safe(*bytes)?);
        }
        Commands::Doctor => {
            let primary_ip = match guess_primary_ip() {
                Ok(ip) => Some(ip),
                Err(err) => {
                    tracing::info!("could not guess primary IP: {err}");
                    None
                }
            };
            for line in format_doctor_lines(&SystemCommandRunner, primary_ip)? {
                println!("{line}");
            }
        }
        Commands::Paths => {
            let context = load_context(&cli)?;
            for line in format_paths_lines(&context) {
                println!("{line}");
            }
        }
        Commands::Version => {
            let context = load_context(&cli)?;
            println!("{}", context.layout.version());
        }
        Commands::Activate => {
            let context = load_context(&cli)?;
            let working_directory = context.layout.working_directory();
            if !working_directory.is_dir() {
                return Err(anyhow!(
                    "install directory does not exist: {}",
                    working_directory.display()
                ));
            }
            let link = context.layout.activate_working_directory()?;
            print_status(
                output_style,
                "ok",
                &format!(
                    "{} -> {}",
                    link.display(),
                    working_directory.display()
                ),
            );
        }
        Commands::Prune { dry_run } => {
            let context = load_context(&cli)?;
            run_prune(&context, *dry_run, output_style)?;
        }
    }

    Ok(())
}

fn load_context(cli: &Cli) -> Result<InstallContext> {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(INPUT_FILE));
    let config = InstallerConfig::load(&config_path)?;
    let bundle_dir = match &cli.bundle_dir {
        Some(dir) => dir.clone(),
        None => binary_dir()?,
    };

    let context = InstallContext::load(
        &config,
        &bundle_dir,
        BuildNumberSource::from_env(),
        workflow_for(cli.upgrade),
        confirm_policy_for(cli.force),
    )
    .with_context(|| {
        format!(
            "failed to resolve install version from {}",
            bundle_dir.display()
        )
    })?;
    tracing::debug!(
        "{} workflow targeting {}",
        context.workflow.as_str(),
        context.layout.working_directory().display()
    );
    Ok(context)
}

pub(crate) fn workflow_for(upgrade: bool) -> Workflow {
    if upgrade {
        Workflow::Upgrade
    } else {
        Workflow::Install
    }
}

pub(crate) fn confirm_policy_for(force: bool) -> ConfirmPolicy {
    if force {
        ConfirmPolicy::skip()
    } else {
        ConfirmPolicy::interactive()
    }
}

fn run_prune(context: &InstallContext, dry_run: bool, output_style: OutputStyle) -> Result<()> {
    let plan = plan_prune(
        &context.layout.software_root(),
        &context.layout.active_symlink(),
    )?;
    for line in format_prune_plan_lines(&plan) {
        println!("{line}");
    }
    if plan.remove.is_empty() || dry_run {
        return Ok(());
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    let proceed = context.confirm(
        &format!("Remove {} old release directories?", plan.remove.len()),
        DefaultAnswer::No,
        &mut input,
        &mut output,
    )?;
    if !proceed {
        print_status(output_style, "warn", "prune cancelled");
        return Ok(());
    }

    let report = execute_prune(&plan);
    for line in format_prune_report_lines(&report, output_style) {
        println!("{line}");
    }
    if !report.is_clean() {
        return Err(anyhow!(
            "failed to remove {} of {} release directories",
            report.failures.len(),
            plan.remove.len()
        ));
    }
    Ok(())
}

pub(crate) fn format_paths_lines(context: &InstallContext) -> Vec<String> {
    let layout = &context.layout;
    vec![
        render_key_value("workflow:", context.workflow.as_str()),
        render_key_value("version:", &layout.version().to_string()),
        render_key_value("base install:", &layout.base_install().display().to_string()),
        render_key_value("data root:", &layout.data_root().display().to_string()),
        render_key_value(
            "install root:",
            &layout.working_directory().display().to_string(),
        ),
        render_key_value(
            "active symlink:",
            &layout.active_symlink().display().to_string(),
        ),
        render_key_value(
            "installer dir:",
            &layout.install_version_dir().display().to_string(),
        ),
        render_key_value(
            "certs dir:",
            &layout.self_signed_certs_dir().display().to_string(),
        ),
    ]
}

pub(crate) fn format_prune_plan_lines(plan: &PrunePlan) -> Vec<String> {
    let mut lines = vec![format!("active release: {}", plan.active_version)];
    match &plan.retained {
        Some(path) => lines.push(format!("keeping fallback: {}", path.display())),
        None => lines.push("keeping fallback: none".to_string()),
    }
    if plan.remove.is_empty() {
        lines.push("nothing to prune".to_string());
        return lines;
    }
    for path in &plan.remove {
        lines.push(format!("would remove: {}", path.display()));
    }
    lines
}

pub(crate) fn format_prune_report_lines(report: &PruneReport, style: OutputStyle) -> Vec<String> {
    let mut lines = Vec::new();
    for path in &report.removed {
        lines.push(render_status_line(
            style,
            "ok",
            &format!("removed {}", path.display()),
        ));
    }
    for failure in &report.failures {
        lines.push(render_status_line(
            style,
            "warn",
            &failure.error.to_string(),
        ));
    }
    lines
}

pub(crate) fn format_doctor_lines(
    runner: &dyn CommandRunner,
    primary_ip: Option<IpAddr>,
) -> Result<Vec<String>> {
    let user = current_user(runner)?;
    let privileged = has_sudo_access(runner)?;
    let os_name = detect_os(runner).unwrap_or_else(|err| {
        tracing::info!("could not detect OS: {err}");
        "unknown".to_string()
    });
    let family = OsFamily::classify(&os_name)
        .map(OsFamily::as_str)
        .unwrap_or("unsupported");

    Ok(vec![
        render_key_value("user:", &user),
        render_key_value("root:", if privileged { "yes" } else { "no" }),
        render_key_value("os:", &os_name),
        render_key_value("package family:", family),
        render_key_value(
            "primary ip:",
            &primary_ip.map_or_else(|| "unknown".to_string(), |ip| ip.to_string()),
        ),
    ])
}
