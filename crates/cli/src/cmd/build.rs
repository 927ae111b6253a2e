//! Implementation of the `rlambda build` command.

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use rlambda_lib::pass::{self, PassOptions, PassReport};
use rlambda_lib::toolchain::Cargo;

use super::{load_manifest, runtime};
use crate::output::{OutputFormat, format_elapsed, print_info, print_json, print_packaged, print_stat, print_success};

#[derive(Serialize)]
struct BuildJson<'a> {
  #[serde(flatten)]
  report: &'a PassReport,
  duration_ms: u128,
  written: bool,
}

/// Execute the build command.
///
/// Runs one pass over the manifest. With `write`, the rewritten artifact
/// paths and runtimes are saved back to the manifest file; otherwise the
/// file is left as it was.
pub fn cmd_build(manifest_path: &Path, function: Option<String>, write: bool, format: OutputFormat) -> Result<()> {
  let (mut manifest, service_dir) = load_manifest(manifest_path)?;
  let options = PassOptions { function, service_dir };
  let toolchain = Cargo::from_env();

  let start = Instant::now();
  let rt = runtime()?;
  let report = rt.block_on(pass::run(&mut manifest, &toolchain, &options))?;
  let elapsed = start.elapsed();

  if write {
    manifest
      .save(manifest_path)
      .with_context(|| format!("Failed to write {}", manifest_path.display()))?;
    info!(path = %manifest_path.display(), "manifest updated");
  }

  print_report(&report, elapsed, write, format)
}

pub(super) fn print_report(report: &PassReport, elapsed: Duration, written: bool, format: OutputFormat) -> Result<()> {
  if format.is_json() {
    return print_json(&BuildJson {
      report,
      duration_ms: elapsed.as_millis(),
      written,
    });
  }

  for unit in &report.packaged {
    print_packaged(&unit.plan.name, &unit.plan.artifact, unit.size);
  }

  print_success(&format!(
    "Packaged {} function(s) in {}",
    report.packaged.len(),
    format_elapsed(elapsed)
  ));
  if !report.skipped.is_empty() {
    print_stat("Skipped", &report.skipped.join(", "));
  }
  if written {
    print_info("Manifest updated");
  }

  Ok(())
}
