use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn uninstall_removes_version() {
  let env = TestEnv::new();
  env.fake_install("v18.0.0", &["node"]);

  env
    .vnode_cmd()
    .args(["uninstall", "18.0.0"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Uninstalled v18.0.0"));

  assert!(!env.version_dir("v18.0.0").exists());
}

#[test]
fn remove_alias_works() {
  let env = TestEnv::new();
  env.fake_install("v18.0.0", &["node"]);

  env.vnode_cmd().args(["remove", "v18.0.0"]).assert().success();

  assert!(!env.version_dir("v18.0.0").exists());
}

#[test]
#[cfg(unix)]
fn uninstall_active_version_is_refused() {
  let env = TestEnv::new();
  env.fake_install("v20.0.0", &["node"]);
  env.vnode_cmd().args(["use", "20.0.0"]).assert().success();

  env
    .vnode_cmd()
    .args(["uninstall", "20.0.0"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("currently active"));

  assert!(env.version_dir("v20.0.0").join("bin/node").is_file());
}

#[test]
fn uninstall_missing_version_fails() {
  let env = TestEnv::new();

  env
    .vnode_cmd()
    .args(["uninstall", "1.2.3"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("v1.2.3 is not installed"));
}
