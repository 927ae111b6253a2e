mod cmd;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use output::{OutputFormat, print_error};

const DEFAULT_MANIFEST: &str = "serverless.json";

/// rlambda - build Rust functions into native-runtime deployment archives
#[derive(Parser)]
#[command(name = "rlambda")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable debug logging
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Output format
  #[arg(short = 'o', long, global = true, value_enum, default_value_t)]
  format: OutputFormat,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Compile and package every Rust function in a manifest
  Build {
    /// Service manifest (.json, .yml or .yaml)
    #[arg(default_value = DEFAULT_MANIFEST)]
    manifest: PathBuf,

    /// Only build this function
    #[arg(short, long)]
    function: Option<String>,

    /// Save the rewritten artifact paths and runtimes back to the manifest
    #[arg(long)]
    write: bool,
  },

  /// Show what a build would run, without running it
  Plan {
    /// Service manifest (.json, .yml or .yaml)
    #[arg(default_value = DEFAULT_MANIFEST)]
    manifest: PathBuf,

    /// Only plan this function
    #[arg(short, long)]
    function: Option<String>,
  },

  /// Handle a host lifecycle event, building if the event is registered
  Hook {
    /// Lifecycle event name, e.g. before:package:createDeploymentArtifacts
    event: String,

    /// Service manifest (.json, .yml or .yaml)
    #[arg(default_value = DEFAULT_MANIFEST)]
    manifest: PathBuf,

    /// Version of the host framework firing the event
    #[arg(long)]
    host_version: String,

    /// Only build this function
    #[arg(short, long)]
    function: Option<String>,

    /// Save the rewritten artifact paths and runtimes back to the manifest
    #[arg(long)]
    write: bool,
  },

  /// List the lifecycle events a host version triggers builds on
  Hooks {
    /// Version of the host framework
    #[arg(long)]
    host_version: String,
  },
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "info" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let result = match cli.command {
    Commands::Build {
      manifest,
      function,
      write,
    } => cmd::cmd_build(&manifest, function, write, cli.format),
    Commands::Plan { manifest, function } => cmd::cmd_plan(&manifest, function, cli.format),
    Commands::Hook {
      event,
      manifest,
      host_version,
      function,
      write,
    } => cmd::cmd_hook(&event, &manifest, &host_version, function, write, cli.format),
    Commands::Hooks { host_version } => cmd::cmd_hooks(&host_version, cli.format),
  };

  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      print_error(&format!("{:#}", err));
      ExitCode::FAILURE
    }
  }
}
