//! Service manifest types.
//!
//! The manifest is owned by the host framework. Only the fields the build pass
//! reads or patches are typed; everything else is carried through `extra` so a
//! rewritten manifest keeps every key the host wrote.
//!
//! # Example
//!
//! ```json
//! {
//!   "service": "orders",
//!   "provider": { "name": "aws", "runtime": "rust" },
//!   "custom": { "rust": { "target": "x86_64-unknown-linux-gnu.2.17", "cargoFlags": "--locked" } },
//!   "functions": {
//!     "create": { "handler": "orders.create", "rust": { "profile": "dev" } }
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Top-level service manifest.
///
/// Functions are kept in a [`BTreeMap`] so the build pass visits them in a
/// stable order.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceManifest {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub service: Option<String>,
  #[serde(default)]
  pub provider: Provider,
  #[serde(default, skip_serializing_if = "Custom::is_empty")]
  pub custom: Custom,
  #[serde(default)]
  pub functions: BTreeMap<String, FunctionDef>,
  #[serde(flatten)]
  pub extra: BTreeMap<String, Value>,
}

/// Provider block; `runtime` is the default for every function.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
  #[serde(default)]
  pub name: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub runtime: Option<String>,
  #[serde(flatten)]
  pub extra: BTreeMap<String, Value>,
}

/// `custom` block. Only `custom.rust` belongs to us.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Custom {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub rust: Option<RustConfig>,
  #[serde(flatten)]
  pub extra: BTreeMap<String, Value>,
}

impl Custom {
  fn is_empty(&self) -> bool {
    self.rust.is_none() && self.extra.is_empty()
  }
}

/// Service-wide build settings (`custom.rust`).
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RustConfig {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub target: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub cargo_flags: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub profile: Option<String>,
  /// Source root used in artifact paths when the toolchain sees the project
  /// under a different directory than the host.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub src_path: Option<PathBuf>,
  #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
  pub env: BTreeMap<String, String>,
}

/// One deployable function.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDef {
  /// `<package>.<binary>`, or just `<package>` when they share a name.
  pub handler: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub runtime: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub rust: Option<FunctionBuildOptions>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub package: Option<PackageDef>,
  #[serde(flatten)]
  pub extra: BTreeMap<String, Value>,
}

/// Per-function overrides (`functions.<name>.rust`).
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionBuildOptions {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub profile: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub cargo_flags: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub target: Option<String>,
  #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
  pub env: BTreeMap<String, String>,
}

/// `functions.<name>.package`; the pass fills in `artifact`.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageDef {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub artifact: Option<PathBuf>,
  #[serde(flatten)]
  pub extra: BTreeMap<String, Value>,
}
