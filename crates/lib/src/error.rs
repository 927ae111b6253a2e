//! Build pass errors.
//!
//! Every variant aborts the whole pass. Nothing is retried: compiles are
//! deterministic for the same inputs, so a human fixes the cause and re-runs.

use thiserror::Error;

use crate::package::PackageError;
use crate::toolchain::ToolchainError;

#[derive(Debug, Error)]
pub enum BuildError {
  /// Nothing in scope declares the Rust runtime. Almost always a manifest
  /// mistake, so it is not treated as an empty success.
  #[error("no functions with runtime \"rust\" found; set provider.runtime or functions.<name>.runtime to \"rust\"")]
  NoRustFunctions,

  #[error("function not found: {0}")]
  UnknownFunction(String),

  #[error("unsupported host OS {0}: cargo zigbuild runs on linux, macos and windows")]
  UnsupportedHost(String),

  #[error("failed to install target {target} for {handler}")]
  EnsureTarget {
    handler: String,
    target: String,
    source: ToolchainError,
  },

  #[error("failed to query cargo metadata for {handler}")]
  Metadata { handler: String, source: ToolchainError },

  #[error("failed to build {handler}")]
  Compile { handler: String, source: ToolchainError },

  #[error("failed to package {handler}")]
  Package { handler: String, source: PackageError },
}

impl BuildError {
  /// Handler of the function that failed, when the failure belongs to one.
  pub fn handler(&self) -> Option<&str> {
    match self {
      BuildError::EnsureTarget { handler, .. }
      | BuildError::Metadata { handler, .. }
      | BuildError::Compile { handler, .. }
      | BuildError::Package { handler, .. } => Some(handler),
      BuildError::NoRustFunctions | BuildError::UnknownFunction(_) | BuildError::UnsupportedHost(_) => None,
    }
  }
}
