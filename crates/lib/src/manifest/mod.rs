//! Remote release manifest.
//!
//! The manifest is fetched fresh on every call; nothing is cached between
//! invocations and failed requests are not retried.

mod types;

pub use types::*;

use reqwest::Client;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::Config;

#[derive(Debug, Error)]
pub enum ManifestError {
  /// The request could not be sent or the body could not be read.
  #[error("failed to fetch {url}: {source}")]
  Network {
    url: String,
    #[source]
    source: reqwest::Error,
  },

  /// The server answered with a non-success status.
  #[error("fetching {url} failed with HTTP {status}")]
  BadStatus { url: String, status: u16 },

  /// The body is not a JSON array of manifest entries.
  #[error("invalid manifest from {url}: {source}")]
  Decode {
    url: String,
    #[source]
    source: serde_json::Error,
  },
}

/// Client for the release index (`<dist_url>/index.json`).
#[derive(Debug, Clone)]
pub struct ManifestClient {
  url: String,
  http: Client,
}

impl ManifestClient {
  pub fn new(config: &Config) -> Self {
    Self::with_url(config.manifest_url())
  }

  pub fn with_url(url: impl Into<String>) -> Self {
    Self {
      url: url.into(),
      http: Client::new(),
    }
  }

  pub fn url(&self) -> &str {
    &self.url
  }

  /// Fetch and decode the manifest, preserving its order.
  pub async fn fetch(&self) -> Result<Vec<ManifestEntry>, ManifestError> {
    info!(url = %self.url, "fetching version manifest");

    let response = self.http.get(&self.url).send().await.map_err(|source| ManifestError::Network {
      url: self.url.clone(),
      source,
    })?;

    let status = response.status();
    if !status.is_success() {
      return Err(ManifestError::BadStatus {
        url: self.url.clone(),
        status: status.as_u16(),
      });
    }

    let body = response.bytes().await.map_err(|source| ManifestError::Network {
      url: self.url.clone(),
      source,
    })?;

    let entries: Vec<ManifestEntry> = serde_json::from_slice(&body).map_err(|source| ManifestError::Decode {
      url: self.url.clone(),
      source,
    })?;

    debug!(count = entries.len(), "decoded manifest");
    Ok(entries)
  }
}
