//! Compiled executable lookup.

use std::path::{Path, PathBuf};

use crate::config::Profile;
use crate::target;

/// Directory cargo writes the executable to.
///
/// `target_root` is cargo's `target_directory`. Cross builds land under the
/// bare triple; host builds have no triple segment.
pub fn source_dir(target_root: &Path, target: Option<&str>, profile: Profile) -> PathBuf {
  let mut dir = target_root.to_path_buf();
  if let Some(target) = target {
    dir.push(target::normalize(target));
  }
  dir.join(profile.dir_name())
}

/// Full path of the compiled binary.
pub fn executable_path(target_root: &Path, target: Option<&str>, profile: Profile, binary: &str) -> PathBuf {
  source_dir(target_root, target, profile).join(binary)
}
