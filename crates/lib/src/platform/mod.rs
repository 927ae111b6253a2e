//! Host platform detection.
//!
//! The build command relies on `cargo-zigbuild`, which only runs on a fixed set
//! of host operating systems. A pass refuses to start anywhere else.

pub mod os;

use std::fmt;

use os::Os;

/// A supported build host, e.g. `aarch64-darwin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Platform {
  /// `std::env::consts::ARCH` of the host.
  pub arch: &'static str,
  pub os: Os,
}

impl Platform {
  /// Detect the current host
  ///
  /// Returns `None` if the OS cannot run the cross-compiling wrapper
  pub fn current() -> Option<Self> {
    Some(Self {
      arch: std::env::consts::ARCH,
      os: Os::current()?,
    })
  }

  pub fn triple(&self) -> String {
    format!("{}-{}", self.arch, self.os)
  }
}

impl fmt::Display for Platform {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.triple())
  }
}

/// Host string for the current system, if it can build.
pub fn platform_triple() -> Option<String> {
  Platform::current().map(|p| p.triple())
}
