//! Terminal output for rlambda commands.
//!
//! Status lines go to stdout with a colored leading symbol; errors go to
//! stderr. `--format json` replaces all of it with one JSON document on stdout
//! so scripts can read the result while cargo's own output stays on stderr.

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

impl OutputFormat {
  pub fn is_json(self) -> bool {
    matches!(self, OutputFormat::Json)
  }
}

pub mod symbols {
  pub const SUCCESS: &str = "✓";
  pub const ERROR: &str = "✗";
  pub const INFO: &str = "•";
  pub const ARROW: &str = "→";
}

/// Archive sizes, in binary units.
pub fn format_size(bytes: u64) -> String {
  const KIB: u64 = 1024;
  const MIB: u64 = KIB * 1024;

  if bytes >= MIB {
    format!("{:.1} MB", bytes as f64 / MIB as f64)
  } else if bytes >= KIB {
    format!("{:.1} KB", bytes as f64 / KIB as f64)
  } else {
    format!("{} B", bytes)
  }
}

/// Pass wall time. Release builds run for minutes, so seconds are the floor.
pub fn format_elapsed(elapsed: Duration) -> String {
  let secs = elapsed.as_secs();
  if secs >= 60 {
    format!("{}m {}s", secs / 60, secs % 60)
  } else {
    format!("{:.1}s", elapsed.as_secs_f64())
  }
}

pub fn print_success(message: &str) {
  println!(
    "{} {}",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    message
  );
}

pub fn print_error(message: &str) {
  eprintln!(
    "{} {}",
    symbols::ERROR.if_supports_color(Stream::Stderr, |s| s.red()),
    message.if_supports_color(Stream::Stderr, |s| s.red())
  );
}

pub fn print_info(message: &str) {
  println!(
    "{} {}",
    symbols::INFO.if_supports_color(Stream::Stdout, |s| s.blue()),
    message
  );
}

pub fn print_stat(label: &str, value: &str) {
  println!(
    "  {}: {}",
    label.if_supports_color(Stream::Stdout, |s| s.dimmed()),
    value
  );
}

/// `  ✓ create → /srv/orders/target/lambda/release/create.zip (1.2 MB)`
pub fn print_packaged(name: &str, artifact: &Path, size: u64) {
  println!(
    "  {} {} {} {} ({})",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    name.if_supports_color(Stream::Stdout, |s| s.bold()),
    symbols::ARROW,
    artifact.display(),
    format_size(size)
  );
}

/// One planned function: its handler, the cargo invocation and the archive it
/// would produce.
pub fn print_planned(name: &str, handler: &str, command: &str, artifact: &Path) {
  println!(
    "  {} {} {}",
    symbols::INFO.if_supports_color(Stream::Stdout, |s| s.blue()),
    name.if_supports_color(Stream::Stdout, |s| s.bold()),
    format!("({})", handler).if_supports_color(Stream::Stdout, |s| s.dimmed())
  );
  println!("      cargo {}", command);
  println!("      {} {}", symbols::ARROW, artifact.display());
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
  println!("{}", json);
  Ok(())
}
