//! Save generated media to a local file.

use std::path::Path;

use futures_util::StreamExt;
use reqwest::Client;
use tokio::io::AsyncWriteExt;
use tracing::info;

use crate::error::{ClientError, ClientResult};

/// Stream a media URL to a local file. Returns the number of bytes written.
pub async fn download_to(http: &Client, url: &str, path: &Path) -> ClientResult<u64> {
    let response = http.get(url).send().await?;

    if !response.status().is_success() {
        return Err(ClientError::rejection(format!(
            "download failed: upstream returned {}",
            response.status()
        )));
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let mut file = tokio::fs::File::create(path).await?;
    let mut stream = response.bytes_stream();
    let mut written: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }

    file.flush().await?;

    info!(url = %url, path = %path.display(), bytes = written, "Saved media");

    Ok(written)
}
