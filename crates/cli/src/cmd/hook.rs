//! Implementation of the `rlambda hook` command.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};

use rlambda_lib::pass::PassOptions;
use rlambda_lib::plugin::Plugin;
use rlambda_lib::toolchain::Cargo;

use super::build::print_report;
use super::{load_manifest, runtime};
use crate::output::{OutputFormat, print_info, print_json, print_stat};

/// Execute the hook command.
///
/// Behaves the way the host framework drives the plugin: the host version
/// fixes which events are registered, and only a registered `event` runs a
/// build pass.
pub fn cmd_hook(
  event: &str,
  manifest_path: &Path,
  host_version: &str,
  function: Option<String>,
  write: bool,
  format: OutputFormat,
) -> Result<()> {
  let (mut manifest, service_dir) = load_manifest(manifest_path)?;
  let options = PassOptions { function, service_dir };
  let plugin = Plugin::new(host_version, Cargo::from_env(), options)?;

  let start = Instant::now();
  let rt = runtime()?;
  let Some(report) = rt.block_on(plugin.on_event(event, &mut manifest))? else {
    if format.is_json() {
      return print_json(&serde_json::json!({
        "event": event,
        "registered": false,
        "hooks": plugin.hooks(),
      }));
    }
    print_info(&format!(
      "Event {} is not registered for host {}, nothing to do",
      event,
      plugin.host_version()
    ));
    print_stat("Registered", &plugin.hooks().join(", "));
    return Ok(());
  };

  if write {
    manifest
      .save(manifest_path)
      .with_context(|| format!("Failed to write {}", manifest_path.display()))?;
  }

  print_report(&report, start.elapsed(), write, format)
}
