//! Shared test helpers for CLI integration tests.

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Stand-in for `cargo`. `metadata` reports `$FAKE_TARGET_DIR`; `zigbuild`
/// writes an executable where a real build would put it.
const FAKE_CARGO: &str = r#"#!/bin/sh
echo "cargo $*" >> "$FAKE_LOG"
case "$1" in
  metadata)
    printf '{"target_directory":"%s","workspace_root":"%s"}\n' "$FAKE_TARGET_DIR" "$PWD"
    exit 0
    ;;
  zigbuild)
    shift
    ;;
  *)
    echo "unexpected cargo command: $1" >&2
    exit 2
    ;;
esac

if [ -n "$FAKE_BUILD_FAIL" ]; then
  echo "error[E0425]: cannot find value" >&2
  exit 101
fi

package=""
profile="debug"
target=""
while [ $# -gt 0 ]; do
  case "$1" in
    -p) package="$2"; shift ;;
    --release) profile="release" ;;
    --target) target="${2%%.*}"; shift ;;
  esac
  shift
done

if [ -n "$target" ]; then
  out="$FAKE_TARGET_DIR/$target/$profile"
else
  out="$FAKE_TARGET_DIR/$profile"
fi
mkdir -p "$out"
printf '#!/bin/sh\necho %s\n' "$package" > "$out/${FAKE_BINARY:-$package}"
echo "   Compiling $package" >&2
"#;

/// Stand-in for `rustup`.
const FAKE_RUSTUP: &str = r#"#!/bin/sh
echo "rustup $*" >> "$FAKE_LOG"
if [ -n "$FAKE_RUSTUP_FAIL" ]; then
  echo "error: toolchain does not support target" >&2
  exit 1
fi
exit 0
"#;

/// Isolated test environment.
///
/// Each test gets a service directory holding the manifest, a cargo target
/// directory, and its own fake toolchain scripts and invocation log.
pub struct TestEnv {
  pub temp: TempDir,
  pub manifest_path: PathBuf,
}

impl TestEnv {
  /// Write `content` as `service/<file_name>` and install the fake toolchain.
  pub fn with_manifest(file_name: &str, content: &str) -> Self {
    let temp = TempDir::new().unwrap();
    let service = temp.path().join("service");
    std::fs::create_dir_all(&service).unwrap();
    let manifest_path = service.join(file_name);
    std::fs::write(&manifest_path, content).unwrap();

    let bin = temp.path().join("bin");
    std::fs::create_dir_all(&bin).unwrap();
    write_script(&bin.join("cargo"), FAKE_CARGO);
    write_script(&bin.join("rustup"), FAKE_RUSTUP);

    Self { temp, manifest_path }
  }

  pub fn service_path(&self) -> PathBuf {
    let p = self.temp.path().join("service");
    dunce::canonicalize(&p).unwrap_or(p)
  }

  pub fn target_path(&self) -> PathBuf {
    self.temp.path().join("target")
  }

  pub fn log_path(&self) -> PathBuf {
    self.temp.path().join("toolchain.log")
  }

  /// Toolchain invocations so far, one per line.
  pub fn calls(&self) -> Vec<String> {
    std::fs::read_to_string(self.log_path())
      .unwrap_or_default()
      .lines()
      .map(str::to_string)
      .collect()
  }

  pub fn manifest_json(&self) -> serde_json::Value {
    serde_json::from_str(&std::fs::read_to_string(&self.manifest_path).unwrap()).unwrap()
  }

  /// Create an rlambda command wired to the fake toolchain.
  pub fn rlambda_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("rlambda");
    let bin = self.temp.path().join("bin");
    cmd
      .current_dir(self.service_path())
      .env("RLAMBDA_CARGO", bin.join("cargo"))
      .env("RLAMBDA_RUSTUP", bin.join("rustup"))
      .env("FAKE_TARGET_DIR", self.target_path())
      .env("FAKE_LOG", self.log_path())
      .env_remove("FAKE_BUILD_FAIL")
      .env_remove("FAKE_RUSTUP_FAIL")
      .env_remove("FAKE_BINARY")
      .env_remove("RUST_LOG");
    cmd
  }
}

fn write_script(path: &Path, content: &str) {
  std::fs::write(path, content).unwrap();
  std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
}

/// Names of the entries in a zip archive.
pub fn zip_entries(path: &Path) -> Vec<String> {
  let file = std::fs::File::open(path).unwrap();
  let archive = zip::ZipArchive::new(file).unwrap();
  archive.file_names().map(str::to_string).collect()
}
