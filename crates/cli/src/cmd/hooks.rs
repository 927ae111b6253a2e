//! Implementation of the `rlambda hooks` command.

use anyhow::Result;
use serde::Serialize;

use rlambda_lib::hooks;

use crate::output::{OutputFormat, print_info, print_json, symbols};

#[derive(Serialize)]
struct HooksJson {
  host_version: String,
  events: Vec<&'static str>,
}

/// Execute the hooks command.
pub fn cmd_hooks(host_version: &str, format: OutputFormat) -> Result<()> {
  let version = hooks::parse_host_version(host_version)?;
  let events = hooks::hooks_for(&version)?;

  if format.is_json() {
    return print_json(&HooksJson {
      host_version: version.to_string(),
      events,
    });
  }

  print_info(&format!("Lifecycle events for host {}:", version));
  for event in events {
    println!("  {} {}", symbols::ARROW, event);
  }
  Ok(())
}
