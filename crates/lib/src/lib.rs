//! vnode-lib: Core logic for the vnode Node.js version manager
//!
//! This crate provides the pieces the `vnode` CLI is assembled from:
//! - `manifest`: fetching and decoding the remote release index
//! - `version`: version identifiers and `lts` alias resolution
//! - `install`: downloading and extracting release archives
//! - `activate`: pointing the stable `bin/` links at an installed version
//! - `store`: the set of installed versions on disk
//! - `listing`: display models for `list` and `ls-remote`

pub mod activate;
pub mod config;
pub mod consts;
pub mod install;
pub mod listing;
pub mod manifest;
pub mod platform;
pub mod store;
pub mod util;
pub mod version;
