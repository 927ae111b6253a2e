//! Deployment archive construction.
//!
//! The native runtime executes a file called `bootstrap` at the root of the
//! function's zip. Whatever the binary was called, it is stored under that name
//! with execute permissions. Entry timestamps are pinned to the zip epoch so
//! rebuilding unchanged inputs yields identical archive bytes.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::config::Profile;
use crate::consts::{ARTIFACT_ROOT, BOOTSTRAP};

/// Errors that can occur while packaging an executable.
#[derive(Debug, Error)]
pub enum PackageError {
  /// The toolchain reported success but left no executable where expected.
  #[error("compiled executable not found at {}", path.display())]
  MissingExecutable { path: PathBuf },

  #[error("failed to create directory {}", path.display())]
  CreateDir { path: PathBuf, source: std::io::Error },

  #[error("failed to write archive {}", path.display())]
  Io { path: PathBuf, source: std::io::Error },

  #[error("failed to write archive {}", path.display())]
  Zip {
    path: PathBuf,
    source: zip::result::ZipError,
  },
}

/// A written archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackagedArchive {
  pub path: PathBuf,
  /// Archive size in bytes.
  pub size: u64,
}

/// `<src_root>/target/lambda/<release|debug>`
pub fn output_dir(src_root: &Path, profile: Profile) -> PathBuf {
  src_root.join(ARTIFACT_ROOT).join(profile.dir_name())
}

/// `<src_root>/target/lambda/<release|debug>/<binary>.zip`
pub fn artifact_path(src_root: &Path, profile: Profile, binary: &str) -> PathBuf {
  output_dir(src_root, profile).join(format!("{}.zip", binary))
}

/// Zip `executable` as `bootstrap` into `<output_dir>/<logical_name>.zip`.
///
/// Creates `output_dir` and its ancestors when missing. An existing archive at
/// the same path is replaced.
pub fn package(executable: &Path, output_dir: &Path, logical_name: &str) -> Result<PackagedArchive, PackageError> {
  if !executable.is_file() {
    return Err(PackageError::MissingExecutable {
      path: executable.to_path_buf(),
    });
  }

  fs::create_dir_all(output_dir).map_err(|source| PackageError::CreateDir {
    path: output_dir.to_path_buf(),
    source,
  })?;

  let path = output_dir.join(format!("{}.zip", logical_name));
  debug!(executable = ?executable, archive = ?path, "packaging");

  let io_err = |source| PackageError::Io {
    path: path.clone(),
    source,
  };
  let zip_err = |source| PackageError::Zip {
    path: path.clone(),
    source,
  };

  let mut input = BufReader::new(File::open(executable).map_err(io_err)?);
  let output = BufWriter::new(File::create(&path).map_err(io_err)?);

  let options = SimpleFileOptions::default()
    .compression_method(CompressionMethod::Deflated)
    .unix_permissions(0o755)
    .last_modified_time(DateTime::default());

  let mut zip = ZipWriter::new(output);
  zip.start_file(BOOTSTRAP, options).map_err(zip_err)?;
  std::io::copy(&mut input, &mut zip).map_err(io_err)?;
  let mut output = zip.finish().map_err(zip_err)?;
  std::io::Write::flush(&mut output).map_err(io_err)?;
  drop(output);

  let size = fs::metadata(&path).map_err(io_err)?.len();
  info!(archive = %path.display(), size, "archive written");

  Ok(PackagedArchive { path, size })
}
