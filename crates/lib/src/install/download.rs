//! Archive download.

use std::path::Path;

use reqwest::Client;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use super::InstallError;

/// Stream `url` into the file at `dest`, returning the number of bytes written.
pub(crate) async fn download(http: &Client, url: &str, dest: &Path) -> Result<u64, InstallError> {
  info!(url = %url, "downloading archive");

  let download_err = |source: reqwest::Error| InstallError::Download {
    url: url.to_string(),
    source,
  };
  let io_err = |source: std::io::Error| InstallError::Io {
    path: dest.to_path_buf(),
    source,
  };

  let mut response = http.get(url).send().await.map_err(download_err)?;

  let status = response.status();
  if !status.is_success() {
    return Err(InstallError::BadStatus {
      url: url.to_string(),
      status: status.as_u16(),
    });
  }

  let mut file = fs::File::create(dest).await.map_err(io_err)?;
  let mut written: u64 = 0;

  while let Some(chunk) = response.chunk().await.map_err(download_err)? {
    file.write_all(&chunk).await.map_err(io_err)?;
    written += chunk.len() as u64;
  }
  file.flush().await.map_err(io_err)?;

  debug!(path = %dest.display(), bytes = written, "download complete");
  Ok(written)
}
