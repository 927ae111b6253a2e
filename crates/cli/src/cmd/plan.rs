//! Implementation of the `rlambda plan` command.

use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use rlambda_lib::pass::{self, PassOptions, PassPlan};
use rlambda_lib::platform;

use super::load_manifest;
use crate::output::{OutputFormat, print_info, print_json, print_planned, print_stat};

#[derive(Serialize)]
struct PlanJson<'a> {
  host: Option<String>,
  #[serde(flatten)]
  plan: &'a PassPlan,
}

/// Execute the plan command.
///
/// Resolves every in-scope function the way `build` would and prints the
/// commands and artifact paths, without invoking cargo.
pub fn cmd_plan(manifest_path: &Path, function: Option<String>, format: OutputFormat) -> Result<()> {
  let (manifest, service_dir) = load_manifest(manifest_path)?;
  let options = PassOptions { function, service_dir };
  let plan = pass::plan(&manifest, &options)?;
  let host = platform::platform_triple();

  if format.is_json() {
    return print_json(&PlanJson { host, plan: &plan });
  }

  print_info(&format!("Build plan for {}", manifest_path.display()));
  print_stat("Host", host.as_deref().unwrap_or("unsupported"));
  print_stat("Source root", &plan.source_root.display().to_string());
  println!();

  for unit in &plan.units {
    print_planned(&unit.name, &unit.handler, &unit.command.to_string(), &unit.artifact);
  }

  if !plan.skipped.is_empty() {
    println!();
    print_stat("Skipped", &plan.skipped.join(", "));
  }

  Ok(())
}
