//! Fixed names shared across the build pipeline.

/// Runtime tag marking a function as Rust source that still needs compiling.
pub const RUST_RUNTIME: &str = "rust";

/// Generic runtime tag for "run whatever executable is in the archive".
pub const NATIVE_RUNTIME: &str = "provided.al2";

/// Entry name the native runtime executes inside the archive.
pub const BOOTSTRAP: &str = "bootstrap";

/// Separates the cargo package from the binary name in a handler string.
pub const HANDLER_DELIMITER: char = '.';

/// Archive output root, relative to the source root.
pub const ARTIFACT_ROOT: &str = "target/lambda";

/// Cargo subcommand that cross-compiles through zig.
pub const BUILD_SUBCOMMAND: &str = "zigbuild";

/// Environment variable overriding the cargo program.
pub const CARGO_ENV: &str = "RLAMBDA_CARGO";

/// Environment variable overriding the rustup program.
pub const RUSTUP_ENV: &str = "RLAMBDA_RUSTUP";
