use std::process::Command;
use std::time::{Duration, Instant};

use tracing::{debug, info, trace};

use crate::error::{InstallerError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub elapsed: Duration,
}

pub trait CommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        run_command(program, args)
    }
}

pub fn run_command(program: &str, args: &[&str]) -> Result<CommandOutput> {
    let full_command = render_command(program, args);
    debug!("About to run command {full_command}");
    let started_at = Instant::now();

    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|source| InstallerError::CommandSpawn {
            command: full_command.clone(),
            source,
        })?;
    let elapsed = started_at.elapsed();
    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    if !output.status.success() {
        info!(
            "ERROR: '{full_command}' failed with {}\nPrinting stdout/stderr {stdout}{stderr}",
            output.status
        );
        return Err(InstallerError::CommandFailed {
            command: full_command,
            status: output.status,
            stderr,
        });
    }

    debug!(
        "Completed running command: {full_command} [took {:.3} secs]",
        elapsed.as_secs_f64()
    );
    trace!("Stdout for command {full_command} was \n{stdout}\n");
    trace!("Stderr for command {full_command} was \n{stderr}\n");

    Ok(CommandOutput {
        stdout,
        stderr,
        elapsed,
    })
}

pub(crate) fn render_command(program: &str, args: &[&str]) -> String {
    if args.is_empty() {
        return program.to_string();
    }
    format!("{program} {}", args.join(" "))
}
