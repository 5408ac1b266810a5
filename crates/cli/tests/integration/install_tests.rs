use predicates::prelude::*;
use serde_json::json;

use super::common::TestEnv;

#[test]
fn install_extracts_release() {
  let mut env = TestEnv::new();
  let release = env.serve_release("v20.0.0");

  env
    .vnode_cmd()
    .args(["install", "20.0.0"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Installed v20.0.0"))
    .stdout(predicate::str::contains("vnode use v20.0.0"));

  release.assert();
  let node = env.version_dir("v20.0.0").join("bin/node");
  assert_eq!(std::fs::read_to_string(node).unwrap(), "#!/bin/sh\necho node\n");
  assert!(env.bin_link("node").symlink_metadata().is_err(), "non-interactive install must not activate");
}

#[test]
#[cfg(unix)]
fn install_with_use_activates() {
  let mut env = TestEnv::new();
  let _mock = env.serve_release("v20.0.0");

  env
    .vnode_cmd()
    .args(["install", "v20.0.0", "--use"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Now using v20.0.0"))
    .stdout(predicate::str::contains("export PATH="));

  let target = std::fs::read_link(env.bin_link("node")).unwrap();
  assert_eq!(target, env.version_dir("v20.0.0").join("bin/node"));
  assert!(env.bin_link("npx").symlink_metadata().is_ok());
}

#[test]
fn install_lts_resolves_from_manifest() {
  let mut env = TestEnv::new();
  let _mock = env.serve_manifest(&[
    super::common::release("v22.0.0", "2024-09-01", json!(false)),
    super::common::release("v20.0.0", "2024-04-01", json!("Iron")),
    super::common::release("v18.0.0", "2023-04-01", json!(true)),
  ]);
  let _mock = env.serve_release("v20.0.0");

  env
    .vnode_cmd()
    .args(["install", "lts"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Latest LTS is v20.0.0"));

  assert!(env.version_dir("v20.0.0").is_dir());
}

#[test]
fn install_already_installed_skips_download() {
  let env = TestEnv::new();
  env.fake_install("v20.0.0", &["node"]);

  env
    .vnode_cmd()
    .args(["install", "20.0.0"])
    .assert()
    .success()
    .stdout(predicate::str::contains("already installed"));
}

#[test]
fn install_verbose_logs_debug_events() {
  let mut env = TestEnv::new();
  let _mock = env.serve_release("v20.0.0");

  env
    .vnode_cmd()
    .args(["--verbose", "install", "20.0.0"])
    .assert()
    .success()
    .stderr(predicate::str::contains("installing"));
}

#[test]
fn install_quiet_by_default() {
  let mut env = TestEnv::new();
  let _mock = env.serve_release("v20.0.0");

  env
    .vnode_cmd()
    .args(["install", "20.0.0"])
    .assert()
    .success()
    .stderr(predicate::str::contains("installing").not());
}

#[test]
fn install_unknown_version_fails_cleanly() {
  let mut env = TestEnv::new();
  let _mock = env.server.mock("GET", mockito::Matcher::Any).with_status(404).create();

  env
    .vnode_cmd()
    .args(["install", "99.0.0"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Failed to install v99.0.0"))
    .stderr(predicate::str::contains("404"));

  assert!(!env.version_dir("v99.0.0").exists());
}
