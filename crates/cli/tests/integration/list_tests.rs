use predicates::prelude::*;
use serde_json::{Value, json};

use super::common::{TestEnv, release};

#[test]
fn list_empty() {
  let env = TestEnv::new();

  env
    .vnode_cmd()
    .arg("list")
    .assert()
    .success()
    .stdout(predicate::str::contains("No versions installed"));
}

#[test]
#[cfg(unix)]
fn list_marks_active_and_lts() {
  let mut env = TestEnv::new();
  let manifest = env.serve_manifest(&[
    release("v21.0.0", "2023-10-17", json!(false)),
    release("v20.0.0", "2024-04-01", json!("Iron")),
  ]);
  env.fake_install("v20.0.0", &["node"]);
  env.fake_install("v21.0.0", &["node"]);
  env.vnode_cmd().args(["use", "21.0.0"]).assert().success();

  env
    .vnode_cmd()
    .arg("ls")
    .assert()
    .success()
    .stdout(predicate::str::contains("v20.0.0 [LTS]"))
    .stdout(predicate::str::contains("v21.0.0 (active)"));

  manifest.assert();
}

#[test]
fn list_survives_manifest_failure() {
  let mut env = TestEnv::new();
  let _mock = env.fail_manifest();
  env.fake_install("v20.0.0", &["node"]);

  env
    .vnode_cmd()
    .arg("list")
    .assert()
    .success()
    .stdout(predicate::str::contains("v20.0.0"))
    .stdout(predicate::str::contains("[LTS]").not())
    .stderr(predicate::str::contains("LTS status unknown"));
}

#[test]
fn list_json_output() {
  let mut env = TestEnv::new();
  let _mock = env.serve_manifest(&[release("v20.0.0", "2024-04-01", json!("Iron"))]);
  env.fake_install("v20.0.0", &["node"]);

  let output = env.vnode_cmd().args(["list", "-o", "json"]).output().unwrap();
  assert!(output.status.success());

  let rows: Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(rows, json!([{ "version": "v20.0.0", "active": false, "lts": true }]));
}
