//! Handler string parsing.

use std::fmt;

use serde::Serialize;

use crate::consts::HANDLER_DELIMITER;

/// Cargo package and binary a handler refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CargoBinary {
  pub package: String,
  pub binary: String,
}

impl CargoBinary {
  /// Split `"<package>.<binary>"`; without a delimiter, or with nothing
  /// after it, the binary is named after the package.
  pub fn from_handler(handler: &str) -> Self {
    let (package, binary) = match handler.split_once(HANDLER_DELIMITER) {
      Some((package, binary)) if !binary.is_empty() => (package, binary),
      Some((package, _)) => (package, package),
      None => (handler, handler),
    };
    Self {
      package: package.to_string(),
      binary: binary.to_string(),
    }
  }
}

impl fmt::Display for CargoBinary {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}{}{}", self.package, HANDLER_DELIMITER, self.binary)
  }
}
