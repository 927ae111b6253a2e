//! Build command integration tests.

use predicates::prelude::*;
use serial_test::serial;

use super::common::{TestEnv, zip_entries};

const SERVICE: &str = r#"{
  "service": "orders",
  "provider": { "name": "aws", "runtime": "rust", "region": "eu-west-1" },
  "functions": {
    "create": { "handler": "orders.create" },
    "legacy": { "handler": "index.main", "runtime": "nodejs18.x" }
  }
}"#;

#[test]
#[serial]
fn build_packages_and_rewrites_manifest() {
  let env = TestEnv::with_manifest("serverless.json", SERVICE);

  env
    .rlambda_cmd()
    .env("FAKE_BINARY", "create")
    .args(["build", "--write"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Packaged 1 function(s)"));

  let archive = env.service_path().join("target/lambda/release/create.zip");
  assert!(archive.is_file());
  assert_eq!(zip_entries(&archive), vec!["bootstrap"]);

  let manifest = env.manifest_json();
  assert_eq!(manifest["provider"]["runtime"], "provided.al2");
  assert_eq!(manifest["provider"]["region"], "eu-west-1");
  assert_eq!(manifest["functions"]["create"]["runtime"], "provided.al2");
  assert_eq!(
    manifest["functions"]["create"]["package"]["artifact"],
    archive.display().to_string()
  );
  assert_eq!(manifest["functions"]["legacy"]["runtime"], "nodejs18.x");
  assert!(manifest["functions"]["legacy"].get("package").is_none());

  assert_eq!(env.calls(), vec!["cargo zigbuild -p orders --release", "cargo metadata --format-version 1 --no-deps"]);
}

#[test]
#[serial]
fn build_without_write_leaves_manifest() {
  let env = TestEnv::with_manifest("serverless.json", SERVICE);

  env
    .rlambda_cmd()
    .env("FAKE_BINARY", "create")
    .arg("build")
    .assert()
    .success();

  assert!(env.service_path().join("target/lambda/release/create.zip").is_file());
  assert_eq!(env.manifest_json()["provider"]["runtime"], "rust");
}

#[test]
#[serial]
fn build_with_versioned_target_installs_bare_triple() {
  let env = TestEnv::with_manifest(
    "serverless.json",
    r#"{
      "provider": { "name": "aws", "runtime": "rust" },
      "custom": { "rust": { "target": "x86_64-unknown-linux-gnu.2.17" } },
      "functions": { "api": { "handler": "api.api" } }
    }"#,
  );

  env.rlambda_cmd().arg("build").assert().success();

  assert_eq!(
    env.calls(),
    vec![
      "rustup target add x86_64-unknown-linux-gnu",
      "cargo zigbuild -p api --release --target x86_64-unknown-linux-gnu.2.17",
      "cargo metadata --format-version 1 --no-deps",
    ]
  );
  assert!(env.service_path().join("target/lambda/release/api.zip").is_file());
}

#[test]
#[serial]
fn build_dev_profile_uses_debug_dirs() {
  let env = TestEnv::with_manifest(
    "serverless.json",
    r#"{
      "provider": { "name": "aws", "runtime": "rust" },
      "functions": { "api": { "handler": "api", "rust": { "profile": "dev" } } }
    }"#,
  );

  env.rlambda_cmd().args(["build", "--write"]).assert().success();

  assert_eq!(env.calls()[0], "cargo zigbuild -p api");
  let archive = env.service_path().join("target/lambda/debug/api.zip");
  assert!(archive.is_file());
  assert_eq!(
    env.manifest_json()["functions"]["api"]["package"]["artifact"],
    archive.display().to_string()
  );
}

#[test]
#[serial]
fn compile_failure_leaves_manifest_untouched() {
  let env = TestEnv::with_manifest("serverless.json", SERVICE);
  let before = env.manifest_json();

  let output = env
    .rlambda_cmd()
    .env("FAKE_BUILD_FAIL", "1")
    .args(["build", "--write"])
    .output()
    .unwrap();
  assert!(!output.status.success());

  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("failed to build orders.create"));
  assert_eq!(stderr.matches("command failed with exit code Some(101)").count(), 1);

  assert_eq!(env.manifest_json(), before);
  assert!(!env.service_path().join("target/lambda").exists());
}

#[test]
#[serial]
fn target_install_failure_aborts_before_compile() {
  let env = TestEnv::with_manifest(
    "serverless.json",
    r#"{
      "provider": { "name": "aws", "runtime": "rust" },
      "custom": { "rust": { "target": "aarch64-unknown-linux-gnu" } },
      "functions": { "api": { "handler": "api.api" } }
    }"#,
  );

  env
    .rlambda_cmd()
    .env("FAKE_RUSTUP_FAIL", "1")
    .arg("build")
    .assert()
    .failure()
    .stderr(predicate::str::contains("failed to install target aarch64-unknown-linux-gnu"));

  assert_eq!(env.calls(), vec!["rustup target add aarch64-unknown-linux-gnu"]);
}

#[test]
#[serial]
fn missing_executable_is_reported() {
  let env = TestEnv::with_manifest("serverless.json", SERVICE);

  // the fake writes `orders`, the handler asks for `create`
  env
    .rlambda_cmd()
    .arg("build")
    .assert()
    .failure()
    .stderr(predicate::str::contains("failed to package orders.create"));
}

#[test]
#[serial]
fn build_single_function_from_yaml() {
  let env = TestEnv::with_manifest(
    "serverless.yml",
    r#"service: mixed
provider:
  name: aws
  runtime: rust
functions:
  one:
    handler: one
  two:
    handler: two
"#,
  );

  env
    .rlambda_cmd()
    .args(["build", "serverless.yml", "-f", "two", "--write"])
    .assert()
    .success();

  assert_eq!(env.calls()[0], "cargo zigbuild -p two --release");
  assert!(env.service_path().join("target/lambda/release/two.zip").is_file());
  assert!(!env.service_path().join("target/lambda/release/one.zip").exists());

  let yaml = std::fs::read_to_string(&env.manifest_path).unwrap();
  assert!(yaml.contains("provided.al2"));
  assert!(yaml.contains("two.zip"));
}

#[test]
#[serial]
fn build_json_report() {
  let env = TestEnv::with_manifest("serverless.json", SERVICE);

  let output = env
    .rlambda_cmd()
    .env("FAKE_BINARY", "create")
    .args(["build", "-o", "json"])
    .output()
    .unwrap();
  assert!(output.status.success());

  let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(json["packaged"][0]["name"], "create");
  assert_eq!(json["packaged"][0]["package"], "orders");
  assert!(json["packaged"][0]["size"].as_u64().unwrap() > 0);
  assert_eq!(json["skipped"][0], "legacy");
  assert_eq!(json["written"], false);
}
