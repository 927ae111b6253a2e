//! Build pass over a manifest's Rust functions.
//!
//! A pass selects the functions in scope, keeps those whose effective runtime
//! is `rust`, and for each one in manifest order: ensures the target is
//! installed, compiles, finds the executable, zips it, and repoints the
//! function at the archive with the generic native runtime. The first failure
//! ends the pass; the failing function and everything after it stay untouched.
//!
//! # Submodule flow
//!
//! ```text
//! plan() -> target::resolve -> build::synthesize
//! run()  -> Toolchain::ensure_target -> Toolchain::build
//!        -> Toolchain::target_directory -> build::executable_path
//!        -> package::package -> UnitStore::patch_unit
//! ```

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::build::{BuildCommand, executable_path, synthesize};
use crate::config::{Profile, resolve_profile};
use crate::consts::{NATIVE_RUNTIME, RUST_RUNTIME};
use crate::error::BuildError;
use crate::handler::CargoBinary;
use crate::manifest::{RustConfig, UnitStore};
use crate::package::{self, PackagedArchive, artifact_path, output_dir};
use crate::platform::os::Os;
use crate::target;
use crate::toolchain::Toolchain;

/// Options supplied by the host for one pass.
#[derive(Debug, Clone, Default)]
pub struct PassOptions {
  /// Restrict the pass to a single function.
  pub function: Option<String>,
  /// Directory holding the manifest. Cargo runs here and a relative `srcPath`
  /// is resolved against it.
  pub service_dir: PathBuf,
}

/// Everything resolved for one function before anything runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitPlan {
  pub name: String,
  pub handler: String,
  #[serde(flatten)]
  pub cargo: CargoBinary,
  pub profile: Profile,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub target: Option<String>,
  pub command: BuildCommand,
  pub artifact: PathBuf,
}

/// Functions a pass would build, and the ones it leaves alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PassPlan {
  pub source_root: PathBuf,
  pub units: Vec<UnitPlan>,
  pub skipped: Vec<String>,
}

/// A function that was built and packaged.
#[derive(Debug, Clone, Serialize)]
pub struct PackagedUnit {
  #[serde(flatten)]
  pub plan: UnitPlan,
  /// Archive size in bytes.
  pub size: u64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PassReport {
  pub packaged: Vec<PackagedUnit>,
  pub skipped: Vec<String>,
}

/// Root that archives are written under and artifact paths point into.
///
/// `srcPath` wins when set; a relative one is taken from `service_dir`.
pub fn source_root(service_dir: &Path, config: Option<&RustConfig>) -> PathBuf {
  match config.and_then(|c| c.src_path.as_deref()) {
    Some(src) => service_dir.join(src),
    None => service_dir.to_path_buf(),
  }
}

/// Resolve every in-scope Rust function without touching the toolchain.
///
/// # Errors
///
/// - [`BuildError::UnknownFunction`] when `options.function` names nothing
/// - [`BuildError::NoRustFunctions`] when no function in scope uses `rust`
pub fn plan<S: UnitStore>(store: &S, options: &PassOptions) -> Result<PassPlan, BuildError> {
  let names = match &options.function {
    Some(name) => {
      if store.unit(name).is_none() {
        return Err(BuildError::UnknownFunction(name.clone()));
      }
      vec![name.clone()]
    }
    None => store.unit_names(),
  };

  let global = store.build_config();
  let mut plan = PassPlan {
    source_root: source_root(&options.service_dir, global),
    ..Default::default()
  };

  for name in names {
    let Some(unit) = store.unit(&name) else {
      continue;
    };

    let runtime = unit.runtime.as_deref().or(store.default_runtime());
    if runtime != Some(RUST_RUNTIME) {
      debug!(function = %name, runtime = ?runtime, "skipping non-rust function");
      plan.skipped.push(name);
      continue;
    }

    let overrides = unit.rust.as_ref();
    let cargo = CargoBinary::from_handler(&unit.handler);
    let profile = resolve_profile(overrides, global);
    let artifact = artifact_path(&plan.source_root, profile, &cargo.binary);

    plan.units.push(UnitPlan {
      handler: unit.handler.clone(),
      target: target::resolve(overrides, global),
      command: synthesize(overrides, global, &cargo.package, profile),
      name,
      cargo,
      profile,
      artifact,
    });
  }

  if plan.units.is_empty() {
    return Err(BuildError::NoRustFunctions);
  }

  Ok(plan)
}

/// Run a full build pass, patching `store` as functions are packaged.
///
/// Cargo's target directory is queried once, on the first function that
/// needs it, and reused for the rest of the pass.
pub async fn run<S: UnitStore, T: Toolchain>(
  store: &mut S,
  toolchain: &T,
  options: &PassOptions,
) -> Result<PassReport, BuildError> {
  let plan = plan(store, options)?;
  if Os::current().is_none() {
    return Err(BuildError::UnsupportedHost(std::env::consts::OS.to_string()));
  }

  info!(
    functions = plan.units.len(),
    skipped = plan.skipped.len(),
    source_root = %plan.source_root.display(),
    "starting build pass"
  );

  let mut target_root = None;
  let mut report = PassReport {
    packaged: Vec::with_capacity(plan.units.len()),
    skipped: plan.skipped,
  };

  for unit in plan.units {
    let archive = build_unit(toolchain, &unit, &options.service_dir, &plan.source_root, &mut target_root).await?;

    store.patch_unit(&unit.name, unit.artifact.clone(), NATIVE_RUNTIME);
    info!(function = %unit.name, artifact = %unit.artifact.display(), "function packaged");

    report.packaged.push(PackagedUnit {
      plan: unit,
      size: archive.size,
    });
  }

  if store.default_runtime() == Some(RUST_RUNTIME) {
    store.set_default_runtime(NATIVE_RUNTIME);
  }

  Ok(report)
}

async fn build_unit<T: Toolchain>(
  toolchain: &T,
  unit: &UnitPlan,
  cwd: &Path,
  source_root: &Path,
  target_root: &mut Option<PathBuf>,
) -> Result<PackagedArchive, BuildError> {
  info!(
    handler = %unit.handler,
    cargo = %unit.cargo,
    profile = %unit.profile,
    target = ?unit.target,
    "building function"
  );

  if let Some(target) = &unit.target {
    toolchain
      .ensure_target(target, cwd)
      .await
      .map_err(|source| BuildError::EnsureTarget {
        handler: unit.handler.clone(),
        target: target.clone(),
        source,
      })?;
  }

  toolchain
    .build(&unit.command, cwd)
    .await
    .into_result()
    .map_err(|source| BuildError::Compile {
      handler: unit.handler.clone(),
      source,
    })?;

  let root = match target_root.clone() {
    Some(root) => root,
    None => {
      let root = toolchain
        .target_directory(cwd)
        .await
        .map_err(|source| BuildError::Metadata {
          handler: unit.handler.clone(),
          source,
        })?;
      debug!(target_directory = %root.display(), "resolved cargo target directory");
      target_root.insert(root).clone()
    }
  };

  let executable = executable_path(&root, unit.target.as_deref(), unit.profile, &unit.cargo.binary);
  package::package(
    &executable,
    &output_dir(source_root, unit.profile),
    &unit.cargo.binary,
  )
  .map_err(|source| BuildError::Package {
    handler: unit.handler.clone(),
    source,
  })
}
