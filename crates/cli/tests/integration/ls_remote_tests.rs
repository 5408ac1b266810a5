use predicates::prelude::*;
use serde_json::{Value, json};

use super::common::{TestEnv, daily_releases, release};

fn listed_rows(stdout: &[u8]) -> Vec<String> {
  String::from_utf8_lossy(stdout)
    .lines()
    .filter(|line| line.starts_with('v'))
    .map(str::to_string)
    .collect()
}

#[test]
fn ls_remote_limits_and_notes_truncation() {
  let mut env = TestEnv::new();
  let _mock = env.serve_manifest(&daily_releases(25));

  let output = env.vnode_cmd().arg("ls-remote").output().unwrap();
  assert!(output.status.success());

  let rows = listed_rows(&output.stdout);
  assert_eq!(rows.len(), 20);
  assert!(rows[0].starts_with("v1.24.0"), "newest first, got {}", rows[0]);
  assert!(String::from_utf8_lossy(&output.stdout).contains("Use --all"));
}

#[test]
fn ls_remote_all_lists_everything() {
  let mut env = TestEnv::new();
  let _mock = env.serve_manifest(&daily_releases(25));

  let output = env.vnode_cmd().args(["ls-remote", "--all"]).output().unwrap();
  assert!(output.status.success());

  assert_eq!(listed_rows(&output.stdout).len(), 25);
  assert!(!String::from_utf8_lossy(&output.stdout).contains("Use --all"));
}

#[test]
fn ls_remote_lts_filter_and_annotations() {
  let mut env = TestEnv::new();
  let _mock = env.serve_manifest(&[
    release("v22.0.0", "2024-09-01", json!(false)),
    release("v20.0.0", "2024-04-01", json!("Iron")),
    release("v18.0.0", "2023-04-01", json!(true)),
  ]);
  env.fake_install("v18.0.0", &["node"]);

  let output = env.vnode_cmd().args(["list-remote", "--lts"]).output().unwrap();
  assert!(output.status.success());

  let rows = listed_rows(&output.stdout);
  assert_eq!(rows.len(), 2);
  assert!(rows[0].starts_with("v20.0.0"));
  assert!(rows[0].contains("[LTS: Iron]"));
  assert!(rows[1].contains("[LTS]"));
  assert!(rows[1].contains("(installed)"));
}

#[test]
fn ls_remote_json_output() {
  let mut env = TestEnv::new();
  let _mock = env.serve_manifest(&daily_releases(3));

  let output = env.vnode_cmd().args(["ls-remote", "-o", "json"]).output().unwrap();
  assert!(output.status.success());

  let listing: Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(listing["total"], 3);
  assert_eq!(listing["truncated"], false);
  assert_eq!(listing["rows"][0]["version"], "v1.2.0");
  assert_eq!(listing["rows"][0]["npm"], "10.2.0");
  assert_eq!(listing["rows"][0]["files"], json!(["linux-x64", "osx-arm64-tar"]));
}

#[test]
fn ls_remote_manifest_failure_is_an_error() {
  let mut env = TestEnv::new();
  let _mock = env.fail_manifest();

  env
    .vnode_cmd()
    .arg("ls-remote")
    .assert()
    .failure()
    .stderr(predicate::str::contains("Failed to fetch release manifest"));
}
