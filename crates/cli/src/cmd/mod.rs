mod build;
mod hook;
mod hooks;
mod plan;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rlambda_lib::manifest::ServiceManifest;

pub use build::cmd_build;
pub use hook::cmd_hook;
pub use hooks::cmd_hooks;
pub use plan::cmd_plan;

/// Load a manifest and return it with the directory it lives in.
fn load_manifest(path: &Path) -> Result<(ServiceManifest, PathBuf)> {
  let path = dunce::canonicalize(path).with_context(|| format!("Manifest not found: {}", path.display()))?;
  let manifest = ServiceManifest::load(&path).with_context(|| format!("Failed to load {}", path.display()))?;
  let service_dir = path
    .parent()
    .map(Path::to_path_buf)
    .with_context(|| format!("Manifest has no parent directory: {}", path.display()))?;
  Ok((manifest, service_dir))
}

fn runtime() -> Result<tokio::runtime::Runtime> {
  tokio::runtime::Runtime::new().context("Failed to create async runtime")
}
