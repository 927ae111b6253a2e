//! Toolchain subprocess execution.
//!
//! Long compiles must be observable while they run, so streamed commands get
//! the parent's stdout and stderr handed over at spawn time. Nothing is
//! buffered and replayed. Stdin is always closed.

use std::collections::BTreeMap;
use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, info};

use super::{BuildOutcome, ToolchainError};

fn command_line(program: &str, args: &[String]) -> String {
  if args.is_empty() {
    program.to_string()
  } else {
    format!("{} {}", program, args.join(" "))
  }
}

/// Run a command with its output streamed straight to ours.
///
/// # Arguments
///
/// * `program` - Program to spawn, resolved through `PATH`
/// * `args` - Arguments after the program
/// * `env` - Variables added on top of the inherited environment
/// * `cwd` - Working directory
pub async fn run_streaming(program: &str, args: &[String], env: &BTreeMap<String, String>, cwd: &Path) -> BuildOutcome {
  let cmd = command_line(program, args);
  info!(cmd = %cmd, "running");
  debug!(working_dir = ?cwd, env = ?env, "spawning process");

  let status = Command::new(program)
    .args(args)
    .envs(env)
    .current_dir(cwd)
    .stdin(Stdio::null())
    .stdout(Stdio::inherit())
    .stderr(Stdio::inherit())
    .status()
    .await;

  match status {
    Ok(status) if status.success() => BuildOutcome::Success,
    Ok(status) => BuildOutcome::Failure(ToolchainError::Status {
      cmd,
      code: status.code(),
    }),
    Err(source) => BuildOutcome::Failure(ToolchainError::Spawn {
      program: program.to_string(),
      source,
    }),
  }
}

/// Run a query command and return its stdout.
///
/// Stderr still goes straight to ours so warnings stay visible.
pub async fn run_captured(program: &str, args: &[String], cwd: &Path) -> Result<String, ToolchainError> {
  let cmd = command_line(program, args);
  debug!(cmd = %cmd, working_dir = ?cwd, "querying");

  let output = Command::new(program)
    .args(args)
    .current_dir(cwd)
    .stdin(Stdio::null())
    .stderr(Stdio::inherit())
    .output()
    .await
    .map_err(|source| ToolchainError::Spawn {
      program: program.to_string(),
      source,
    })?;

  if !output.status.success() {
    return Err(ToolchainError::Status {
      cmd,
      code: output.status.code(),
    });
  }

  Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
