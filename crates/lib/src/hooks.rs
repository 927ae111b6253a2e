//! Lifecycle events that trigger a build, per host framework version.
//!
//! The host fires named lifecycle events; which of them exist depends on its
//! version. [`HOOK_TABLE`] lists each event with the host versions it applies
//! to, and [`hooks_for`] evaluates it once for a given host.

use semver::{Version, VersionReq};
use thiserror::Error;

/// One lifecycle event and the host versions that should trigger a build on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HookRule {
  pub event: &'static str,
  /// A `semver` requirement, e.g. `">=1.38.0, <1.40.0"`.
  pub versions: &'static str,
}

pub const HOOK_TABLE: &[HookRule] = &[
  HookRule {
    event: "before:package:createDeploymentArtifacts",
    versions: "*",
  },
  HookRule {
    event: "before:deploy:function:packageFunction",
    versions: "*",
  },
  HookRule {
    event: "before:offline:start",
    versions: "*",
  },
  HookRule {
    event: "before:offline:start:init",
    versions: "*",
  },
  // Local invoke only ran plugin hooks in this window.
  HookRule {
    event: "before:invoke:local:invoke",
    versions: ">=1.38.0, <1.40.0",
  },
];

#[derive(Debug, Error)]
pub enum HookError {
  #[error("invalid host version {version:?}")]
  InvalidVersion { version: String, source: semver::Error },

  #[error("invalid version range {versions:?} for {event}")]
  InvalidRange {
    event: &'static str,
    versions: &'static str,
    source: semver::Error,
  },
}

/// Parse a host version string, tolerating a leading `v` and missing
/// minor/patch components (`"1.38"` reads as `1.38.0`).
pub fn parse_host_version(version: &str) -> Result<Version, HookError> {
  let trimmed = version.trim();
  let trimmed = trimmed.strip_prefix('v').unwrap_or(trimmed);
  let split = trimmed.find(['-', '+']).unwrap_or(trimmed.len());
  let (core, rest) = trimmed.split_at(split);

  let padded = match core.split('.').count() {
    1 => format!("{}.0.0{}", core, rest),
    2 => format!("{}.0{}", core, rest),
    _ => trimmed.to_string(),
  };

  Version::parse(&padded).map_err(|source| HookError::InvalidVersion {
    version: version.to_string(),
    source,
  })
}

/// Events from `table` that apply to `version`, in table order.
pub fn hooks_in(table: &[HookRule], version: &Version) -> Result<Vec<&'static str>, HookError> {
  let mut events = Vec::new();
  for rule in table {
    let req = VersionReq::parse(rule.versions).map_err(|source| HookError::InvalidRange {
      event: rule.event,
      versions: rule.versions,
      source,
    })?;
    if req.matches(version) {
      events.push(rule.event);
    }
  }
  Ok(events)
}

/// Events from [`HOOK_TABLE`] that apply to `version`.
pub fn hooks_for(version: &Version) -> Result<Vec<&'static str>, HookError> {
  hooks_in(HOOK_TABLE, version)
}
