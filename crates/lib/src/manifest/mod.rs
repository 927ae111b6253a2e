//! Service manifest loading and the handle the build pass patches through.
//!
//! The host owns the manifest. The build pass never takes it over; it reads and
//! patches a handful of fields through [`UnitStore`].

mod types;

use std::path::{Path, PathBuf};

use thiserror::Error;

pub use types::*;

/// Errors that can occur while reading or writing a manifest file.
#[derive(Debug, Error)]
pub enum ManifestError {
  #[error("failed to read manifest {}", path.display())]
  Read { path: PathBuf, source: std::io::Error },

  #[error("failed to write manifest {}", path.display())]
  Write { path: PathBuf, source: std::io::Error },

  #[error("invalid JSON manifest {}", path.display())]
  Json { path: PathBuf, source: serde_json::Error },

  #[error("invalid YAML manifest {}", path.display())]
  Yaml { path: PathBuf, source: serde_yaml::Error },

  #[error("unsupported manifest format: {} (expected .json, .yml or .yaml)", path.display())]
  UnsupportedFormat { path: PathBuf },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
  Json,
  Yaml,
}

fn format_of(path: &Path) -> Result<Format, ManifestError> {
  match path.extension().and_then(|e| e.to_str()) {
    Some("json") => Ok(Format::Json),
    Some("yml") | Some("yaml") => Ok(Format::Yaml),
    _ => Err(ManifestError::UnsupportedFormat {
      path: path.to_path_buf(),
    }),
  }
}

impl ServiceManifest {
  /// Load a manifest, picking the parser from the file extension.
  pub fn load(path: &Path) -> Result<Self, ManifestError> {
    let format = format_of(path)?;
    let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
      path: path.to_path_buf(),
      source,
    })?;

    match format {
      Format::Json => serde_json::from_str(&content).map_err(|source| ManifestError::Json {
        path: path.to_path_buf(),
        source,
      }),
      Format::Yaml => serde_yaml::from_str(&content).map_err(|source| ManifestError::Yaml {
        path: path.to_path_buf(),
        source,
      }),
    }
  }

  /// Write the manifest back in the format its extension names.
  pub fn save(&self, path: &Path) -> Result<(), ManifestError> {
    let content = match format_of(path)? {
      Format::Json => {
        let mut json = serde_json::to_string_pretty(self).map_err(|source| ManifestError::Json {
          path: path.to_path_buf(),
          source,
        })?;
        json.push('\n');
        json
      }
      Format::Yaml => serde_yaml::to_string(self).map_err(|source| ManifestError::Yaml {
        path: path.to_path_buf(),
        source,
      })?,
    };

    std::fs::write(path, content).map_err(|source| ManifestError::Write {
      path: path.to_path_buf(),
      source,
    })
  }
}

/// Read and patch access to the functions of a host-owned manifest.
pub trait UnitStore {
  /// Function names in enumeration order.
  fn unit_names(&self) -> Vec<String>;

  fn unit(&self, name: &str) -> Option<&FunctionDef>;

  /// Manifest-wide runtime used by functions that declare none.
  fn default_runtime(&self) -> Option<&str>;

  /// Service-wide build settings, if any were declared.
  fn build_config(&self) -> Option<&RustConfig>;

  /// Point a function at its packaged archive and switch its runtime.
  ///
  /// Returns `false` when no function has that name.
  fn patch_unit(&mut self, name: &str, artifact: PathBuf, runtime: &str) -> bool;

  fn set_default_runtime(&mut self, runtime: &str);
}

impl UnitStore for ServiceManifest {
  fn unit_names(&self) -> Vec<String> {
    self.functions.keys().cloned().collect()
  }

  fn unit(&self, name: &str) -> Option<&FunctionDef> {
    self.functions.get(name)
  }

  fn default_runtime(&self) -> Option<&str> {
    self.provider.runtime.as_deref()
  }

  fn build_config(&self) -> Option<&RustConfig> {
    self.custom.rust.as_ref()
  }

  fn patch_unit(&mut self, name: &str, artifact: PathBuf, runtime: &str) -> bool {
    let Some(function) = self.functions.get_mut(name) else {
      return false;
    };
    function.package.get_or_insert_with(PackageDef::default).artifact = Some(artifact);
    function.runtime = Some(runtime.to_string());
    true
  }

  fn set_default_runtime(&mut self, runtime: &str) {
    self.provider.runtime = Some(runtime.to_string());
  }
}
