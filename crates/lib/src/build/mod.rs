//! Compile step: command synthesis and output lookup.
//!
//! # Submodules
//!
//! - [`command`] - `cargo zigbuild` argument vector and environment
//! - [`locate`] - where cargo leaves the compiled executable

pub mod command;
pub mod locate;

pub use command::{BuildCommand, synthesize};
pub use locate::{executable_path, source_dir};
