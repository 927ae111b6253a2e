//! rlambda-lib: build Rust functions into deployable native-runtime archives
//!
//! The crate is organized around one build pass:
//! - `manifest`: the host-owned service description and the `UnitStore` handle
//! - `config`, `target`, `handler`: per-function settings resolution
//! - `build`: `cargo zigbuild` command synthesis and output lookup
//! - `toolchain`: the external cargo/rustup processes
//! - `package`: zipping the executable as `bootstrap`
//! - `pass`: the orchestrator tying it together
//! - `hooks`, `plugin`: when the host triggers a pass

pub mod build;
pub mod config;
pub mod consts;
pub mod error;
pub mod handler;
pub mod hooks;
pub mod manifest;
pub mod package;
pub mod pass;
pub mod platform;
pub mod plugin;
pub mod target;
pub mod toolchain;
pub mod util;

pub use error::BuildError;
