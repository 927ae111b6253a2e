//! Build settings resolution.
//!
//! Every setting resolves in three tiers: the function's own `rust` block, then
//! the service-wide `custom.rust` block, then a built-in default.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::manifest::{FunctionBuildOptions, RustConfig};

/// Name of the development profile in the manifest.
pub const DEV_PROFILE: &str = "dev";

/// Cargo build profile.
///
/// Anything other than an explicit `"dev"` builds in release mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
  Dev,
  #[default]
  Release,
}

impl Profile {
  pub fn from_name(name: Option<&str>) -> Self {
    match name {
      Some(DEV_PROFILE) => Self::Dev,
      _ => Self::Release,
    }
  }

  /// Output directory cargo and the packager use for this profile.
  pub fn dir_name(&self) -> &'static str {
    match self {
      Self::Dev => "debug",
      Self::Release => "release",
    }
  }

  pub fn is_release(&self) -> bool {
    matches!(self, Self::Release)
  }
}

impl fmt::Display for Profile {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Dev => write!(f, "dev"),
      Self::Release => write!(f, "release"),
    }
  }
}

/// Pick the first non-blank value, function override first.
pub(crate) fn first_present<'a>(unit: Option<&'a str>, global: Option<&'a str>) -> Option<&'a str> {
  let present = |value: &&str| !value.trim().is_empty();
  unit.filter(present).or(global.filter(present))
}

pub fn resolve_profile(unit: Option<&FunctionBuildOptions>, global: Option<&RustConfig>) -> Profile {
  Profile::from_name(first_present(
    unit.and_then(|u| u.profile.as_deref()),
    global.and_then(|g| g.profile.as_deref()),
  ))
}

/// Extra cargo flags, split on whitespace with empty tokens dropped.
pub fn resolve_cargo_flags(unit: Option<&FunctionBuildOptions>, global: Option<&RustConfig>) -> Vec<String> {
  first_present(
    unit.and_then(|u| u.cargo_flags.as_deref()),
    global.and_then(|g| g.cargo_flags.as_deref()),
  )
  .unwrap_or_default()
  .split_whitespace()
  .map(str::to_string)
  .collect()
}

/// Environment for the compiler; function entries win over service-wide ones.
pub fn resolve_env(unit: Option<&FunctionBuildOptions>, global: Option<&RustConfig>) -> BTreeMap<String, String> {
  let mut env = global.map(|g| g.env.clone()).unwrap_or_default();
  if let Some(unit) = unit {
    env.extend(unit.env.iter().map(|(k, v)| (k.clone(), v.clone())));
  }
  env
}
