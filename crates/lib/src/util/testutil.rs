//! Test utilities for rlambda-lib.
//!
//! Cross-platform shell helpers plus [`FakeToolchain`], which stands in for
//! cargo and rustup so the build pass can be driven without a compiler.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::build::BuildCommand;
use crate::config::Profile;
use crate::toolchain::{BuildOutcome, Toolchain, ToolchainError};

/// Returns the shell command and args to execute a shell script.
#[cfg(unix)]
pub fn shell_cmd(script: &str) -> (&'static str, Vec<String>) {
  ("/bin/sh", vec!["-c".to_string(), script.to_string()])
}

#[cfg(windows)]
pub fn shell_cmd(script: &str) -> (&'static str, Vec<String>) {
  ("cmd.exe", vec!["/C".to_string(), script.to_string()])
}

/// Returns the command and args to echo a message.
#[cfg(unix)]
pub fn echo_msg(msg: &str) -> (&'static str, Vec<String>) {
  ("/bin/echo", vec![msg.to_string()])
}

#[cfg(windows)]
pub fn echo_msg(msg: &str) -> (&'static str, Vec<String>) {
  ("cmd.exe", vec!["/C".to_string(), format!("echo {}", msg)])
}

/// In-memory toolchain.
///
/// `build` writes a fake executable where cargo would, for every binary
/// registered for the package (the package name itself by default). Every call
/// is recorded in order.
#[derive(Debug, Default)]
pub struct FakeToolchain {
  pub target_root: PathBuf,
  /// Exit code every compile fails with.
  pub fail_build: Option<i32>,
  pub fail_ensure: bool,
  /// Report success without writing any executable.
  pub skip_output: bool,
  binaries: HashMap<String, Vec<String>>,
  calls: Mutex<Vec<String>>,
}

impl FakeToolchain {
  pub fn new(target_root: &Path) -> Self {
    Self {
      target_root: target_root.to_path_buf(),
      ..Default::default()
    }
  }

  pub fn with_binary(mut self, package: &str, binary: &str) -> Self {
    self
      .binaries
      .entry(package.to_string())
      .or_default()
      .push(binary.to_string());
    self
  }

  pub fn calls(&self) -> Vec<String> {
    self.calls.lock().unwrap().clone()
  }

  fn record(&self, call: String) {
    self.calls.lock().unwrap().push(call);
  }

  fn output_dir(&self, args: &[String]) -> PathBuf {
    let target = args
      .iter()
      .position(|a| a == "--target")
      .and_then(|i| args.get(i + 1))
      .map(String::as_str);
    let profile = if args.iter().any(|a| a == "--release") {
      Profile::Release
    } else {
      Profile::Dev
    };
    crate::build::source_dir(&self.target_root, target, profile)
  }
}

impl Toolchain for FakeToolchain {
  async fn ensure_target(&self, target: &str, _cwd: &Path) -> Result<(), ToolchainError> {
    self.record(format!("ensure {}", target));
    if self.fail_ensure {
      return Err(ToolchainError::Status {
        cmd: format!("rustup target add {}", target),
        code: Some(1),
      });
    }
    Ok(())
  }

  async fn target_directory(&self, _cwd: &Path) -> Result<PathBuf, ToolchainError> {
    self.record("metadata".to_string());
    Ok(self.target_root.clone())
  }

  async fn build(&self, command: &BuildCommand, _cwd: &Path) -> BuildOutcome {
    self.record(format!("build {}", command));
    if let Some(code) = self.fail_build {
      return BuildOutcome::Failure(ToolchainError::Status {
        cmd: format!("cargo {}", command),
        code: Some(code),
      });
    }
    if self.skip_output {
      return BuildOutcome::Success;
    }

    let package = command
      .args
      .iter()
      .position(|a| a == "-p")
      .and_then(|i| command.args.get(i + 1))
      .cloned()
      .unwrap_or_default();
    let binaries = self.binaries.get(&package).cloned().unwrap_or_else(|| vec![package.clone()]);

    let dir = self.output_dir(&command.args);
    std::fs::create_dir_all(&dir).unwrap();
    for binary in binaries {
      std::fs::write(dir.join(&binary), format!("binary {}", binary)).unwrap();
    }
    BuildOutcome::Success
  }
}
