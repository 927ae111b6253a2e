//! Compiler command synthesis.
//!
//! The command targets `cargo zigbuild`, which links against zig's libc so the
//! same invocation produces Linux binaries from any supported host OS.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::config::{Profile, resolve_cargo_flags, resolve_env};
use crate::consts::BUILD_SUBCOMMAND;
use crate::manifest::{FunctionBuildOptions, RustConfig};
use crate::target;

/// Arguments (after the cargo program) and extra environment for one compile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildCommand {
  pub args: Vec<String>,
  #[serde(skip_serializing_if = "BTreeMap::is_empty")]
  pub env: BTreeMap<String, String>,
}

impl fmt::Display for BuildCommand {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.args.join(" "))
  }
}

/// Build the `zigbuild` invocation for one package.
///
/// The target goes on the command line exactly as configured, version
/// qualifier included.
pub fn synthesize(
  unit: Option<&FunctionBuildOptions>,
  global: Option<&RustConfig>,
  package: &str,
  profile: Profile,
) -> BuildCommand {
  let mut args = vec![BUILD_SUBCOMMAND.to_string(), "-p".to_string(), package.to_string()];

  if profile.is_release() {
    args.push("--release".to_string());
  }

  if let Some(target) = target::resolve(unit, global) {
    args.push("--target".to_string());
    args.push(target);
  }

  args.extend(resolve_cargo_flags(unit, global));
  args.retain(|arg| !arg.is_empty());

  BuildCommand {
    args,
    env: resolve_env(unit, global),
  }
}
