use predicates::prelude::*;
use serde_json::json;

use super::common::{TestEnv, release};

#[test]
#[cfg(unix)]
fn use_switches_links() {
  let env = TestEnv::new();
  env.fake_install("v18.0.0", &["node", "npm", "npx"]);
  env.fake_install("v20.0.0", &["node", "npm", "npx"]);

  env.vnode_cmd().args(["use", "18.0.0"]).assert().success();
  env
    .vnode_cmd()
    .args(["use", "v20.0.0"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Now using v20.0.0"));

  for name in ["node", "npm", "npx"] {
    let target = std::fs::read_link(env.bin_link(name)).unwrap();
    assert!(target.starts_with(env.version_dir("v20.0.0")), "{name} -> {}", target.display());
  }
}

#[test]
fn use_not_installed_fails() {
  let env = TestEnv::new();

  env
    .vnode_cmd()
    .args(["use", "21.0.0"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("not installed"));
}

#[test]
#[cfg(unix)]
fn use_without_npm_warns_but_succeeds() {
  let env = TestEnv::new();
  env.fake_install("v0.10.0", &["node"]);

  env
    .vnode_cmd()
    .args(["use", "0.10.0"])
    .assert()
    .success()
    .stderr(predicate::str::contains("npm is not provided"))
    .stderr(predicate::str::contains("npx is not provided"));
}

#[test]
fn use_version_without_node_binary_fails() {
  let env = TestEnv::new();
  env.fake_install("v21.0.0", &["npm"]);

  env
    .vnode_cmd()
    .args(["use", "21.0.0"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("has no node binary"));
}

#[test]
#[cfg(unix)]
fn use_lts_picks_installed_lts() {
  let mut env = TestEnv::new();
  let _mock = env.serve_manifest(&[
    release("v22.0.0", "2024-09-01", json!(false)),
    release("v20.0.0", "2024-04-01", json!("Iron")),
    release("v18.0.0", "2023-04-01", json!("Hydrogen")),
  ]);
  env.fake_install("v18.0.0", &["node"]);
  env.fake_install("v22.0.0", &["node"]);

  env
    .vnode_cmd()
    .args(["use", "lts"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Now using v18.0.0"));
}

#[test]
fn use_lts_without_installed_lts_fails() {
  let mut env = TestEnv::new();
  let _mock = env.serve_manifest(&[release("v22.0.0", "2024-09-01", json!(false))]);
  env.fake_install("v22.0.0", &["node"]);

  env
    .vnode_cmd()
    .args(["use", "lts"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("no installed version is an LTS release"));
}
