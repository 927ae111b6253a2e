//! Compilation target resolution.
//!
//! A target may carry a glibc version qualifier (`x86_64-unknown-linux-gnu.2.17`).
//! `cargo zigbuild` needs that qualifier on its command line, but cargo writes
//! its output under the bare triple, so path lookups use [`normalize`].

use crate::config::first_present;
use crate::manifest::{FunctionBuildOptions, RustConfig};

/// Target for a function: its own override, else the service-wide one.
///
/// `None` means "let cargo build for the host". A blank value counts as unset.
pub fn resolve(unit: Option<&FunctionBuildOptions>, global: Option<&RustConfig>) -> Option<String> {
  first_present(
    unit.and_then(|u| u.target.as_deref()),
    global.and_then(|g| g.target.as_deref()),
  )
  .map(|t| t.trim().to_string())
}

/// Strip the version qualifier: everything from the first `.` on.
pub fn normalize(target: &str) -> &str {
  target.split('.').next().unwrap_or(target)
}
