//! Test utilities for vnode-lib.
//!
//! Helpers for building in-memory `.tar.gz` archives shaped like Node.js
//! release tarballs.

use std::io::Write;

use flate2::Compression;
use flate2::write::GzEncoder;
use tar::{Builder, EntryType, Header};

/// One entry of a synthetic archive.
pub enum TestEntry<'a> {
  Dir(&'a str),
  File { path: &'a str, mode: u32, contents: &'a [u8] },
  Symlink { path: &'a str, target: &'a str },
}

/// Build a gzip-compressed tarball from the given entries, in order.
pub fn tar_gz(entries: &[TestEntry<'_>]) -> Vec<u8> {
  let encoder = GzEncoder::new(Vec::new(), Compression::default());
  let mut builder = Builder::new(encoder);

  for entry in entries {
    let mut header = Header::new_gnu();
    match entry {
      TestEntry::Dir(path) => {
        header.set_entry_type(EntryType::Directory);
        header.set_mode(0o755);
        header.set_size(0);
        builder.append_data(&mut header, path, std::io::empty()).unwrap();
      }
      TestEntry::File { path, mode, contents } => {
        header.set_entry_type(EntryType::Regular);
        header.set_mode(*mode);
        header.set_size(contents.len() as u64);
        builder.append_data(&mut header, path, *contents).unwrap();
      }
      TestEntry::Symlink { path, target } => {
        header.set_entry_type(EntryType::Symlink);
        header.set_mode(0o777);
        header.set_size(0);
        builder.append_link(&mut header, path, target).unwrap();
      }
    }
  }

  let mut encoder = builder.into_inner().unwrap();
  encoder.flush().unwrap();
  encoder.finish().unwrap()
}

pub const NODE_SCRIPT: &[u8] = b"#!/bin/sh\necho node\n";
pub const NPM_CLI: &[u8] = b"#!/usr/bin/env node\nconsole.log('npm')\n";

/// A tarball laid out like `node-<version>-<target>.tar.gz`.
pub fn node_tarball(version: &str) -> Vec<u8> {
  let wrapper = format!("node-{}-linux-x64", version);
  let paths: Vec<String> = [
    "",
    "bin/",
    "bin/node",
    "lib/node_modules/npm/bin/",
    "lib/node_modules/npm/bin/npm-cli.js",
    "lib/node_modules/npm/bin/npx-cli.js",
    "bin/npm",
    "bin/npx",
    "README.md",
  ]
  .iter()
  .map(|p| format!("{}/{}", wrapper, p))
  .collect();

  tar_gz(&[
    TestEntry::Dir(&paths[0]),
    TestEntry::Dir(&paths[1]),
    TestEntry::File {
      path: &paths[2],
      mode: 0o755,
      contents: NODE_SCRIPT,
    },
    TestEntry::Dir(&paths[3]),
    TestEntry::File {
      path: &paths[4],
      mode: 0o755,
      contents: NPM_CLI,
    },
    TestEntry::File {
      path: &paths[5],
      mode: 0o755,
      contents: NPM_CLI,
    },
    TestEntry::Symlink {
      path: &paths[6],
      target: "../lib/node_modules/npm/bin/npm-cli.js",
    },
    TestEntry::Symlink {
      path: &paths[7],
      target: "../lib/node_modules/npm/bin/npx-cli.js",
    },
    TestEntry::File {
      path: &paths[8],
      mode: 0o644,
      contents: b"# Node.js\n",
    },
  ])
}
