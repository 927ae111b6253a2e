//! External Rust toolchain.
//!
//! The build pass talks to the toolchain through [`Toolchain`]: one idempotent
//! "make this target available" request, one side-effect-free metadata query,
//! and the compile itself. [`Cargo`] drives the real `rustup` and
//! `cargo zigbuild` binaries.

pub mod process;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::build::BuildCommand;
use crate::consts::{CARGO_ENV, RUSTUP_ENV};
use crate::target;

/// Errors that can occur while talking to the toolchain.
#[derive(Debug, Error)]
pub enum ToolchainError {
  /// The program could not be started at all.
  #[error("failed to run {program}")]
  Spawn { program: String, source: std::io::Error },

  /// The program ran and exited unsuccessfully.
  #[error("command failed with exit code {code:?}: {cmd}")]
  Status { cmd: String, code: Option<i32> },

  /// `cargo metadata` printed something we could not read.
  #[error("invalid cargo metadata")]
  Metadata(#[from] serde_json::Error),
}

/// Result of one compile.
#[derive(Debug)]
pub enum BuildOutcome {
  Success,
  Failure(ToolchainError),
}

impl BuildOutcome {
  pub fn into_result(self) -> Result<(), ToolchainError> {
    match self {
      BuildOutcome::Success => Ok(()),
      BuildOutcome::Failure(err) => Err(err),
    }
  }
}

/// The subset of `cargo metadata` output we read.
#[derive(Debug, Deserialize)]
struct CargoMetadata {
  target_directory: PathBuf,
}

/// Parse `cargo metadata --format-version 1` output.
pub fn parse_target_directory(json: &str) -> Result<PathBuf, ToolchainError> {
  let metadata: CargoMetadata = serde_json::from_str(json)?;
  Ok(metadata.target_directory)
}

/// Operations the build pass needs from a Rust toolchain.
///
/// Every call blocks the pass until the external process finishes.
#[allow(async_fn_in_trait)]
pub trait Toolchain {
  /// Make sure the standard library for `target` is installed. Idempotent.
  async fn ensure_target(&self, target: &str, cwd: &Path) -> Result<(), ToolchainError>;

  /// Cargo's root output directory for the project in `cwd`.
  async fn target_directory(&self, cwd: &Path) -> Result<PathBuf, ToolchainError>;

  /// Compile, streaming the compiler's output live.
  async fn build(&self, command: &BuildCommand, cwd: &Path) -> BuildOutcome;
}

/// The real `cargo` + `rustup` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cargo {
  pub cargo: String,
  pub rustup: String,
}

impl Default for Cargo {
  fn default() -> Self {
    Self {
      cargo: "cargo".to_string(),
      rustup: "rustup".to_string(),
    }
  }
}

impl Cargo {
  /// Programs from `RLAMBDA_CARGO` / `RLAMBDA_RUSTUP`, falling back to the
  /// ones on `PATH`.
  pub fn from_env() -> Self {
    let defaults = Self::default();
    Self {
      cargo: std::env::var(CARGO_ENV).unwrap_or(defaults.cargo),
      rustup: std::env::var(RUSTUP_ENV).unwrap_or(defaults.rustup),
    }
  }
}

impl Toolchain for Cargo {
  async fn ensure_target(&self, target: &str, cwd: &Path) -> Result<(), ToolchainError> {
    // rustup only knows bare triples
    let triple = target::normalize(target);
    info!(target = %triple, "ensuring target is installed");
    let args = vec!["target".to_string(), "add".to_string(), triple.to_string()];
    process::run_streaming(&self.rustup, &args, &BTreeMap::new(), cwd)
      .await
      .into_result()
  }

  async fn target_directory(&self, cwd: &Path) -> Result<PathBuf, ToolchainError> {
    let args = vec![
      "metadata".to_string(),
      "--format-version".to_string(),
      "1".to_string(),
      "--no-deps".to_string(),
    ];
    let stdout = process::run_captured(&self.cargo, &args, cwd).await?;
    parse_target_directory(&stdout)
  }

  async fn build(&self, command: &BuildCommand, cwd: &Path) -> BuildOutcome {
    process::run_streaming(&self.cargo, &command.args, &command.env, cwd).await
  }
}
