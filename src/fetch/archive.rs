use futures_util::StreamExt;
use reqwest::{header::ACCEPT_ENCODING, Client};
use std::path::Path;
use tokio::{
    fs::{self, File},
    io::AsyncWriteExt,
};
use tracing::{debug, info, instrument, warn};
use url::Url;

use super::progress::DownloadProgress;
use crate::error::{EtlError, Result};

/// HTTP client that writes response bodies to disk exactly as received.
///
/// Transparent decoding stays off: a `.tar.gz` served with
/// `Content-Encoding: gzip` must not land on disk already gunzipped.
pub fn archive_client() -> reqwest::Result<Client> {
    Client::builder().no_gzip().no_deflate().build()
}

/// Download `url` into `dest`, streaming chunks to disk as they arrive.
///
/// Returns the number of bytes written once the file is flushed and closed.
/// On any failure the partially written file is removed.
#[instrument(level = "info", skip(client, url, dest), fields(url = %url, dest = %dest.as_ref().display()))]
pub async fn download_archive(client: &Client, url: &Url, dest: impl AsRef<Path>) -> Result<u64> {
    let dest = dest.as_ref();
    let mut file = File::create(dest)
        .await
        .map_err(|source| EtlError::DownloadWrite {
            path: dest.to_path_buf(),
            source,
        })?;

    let outcome = stream_to_file(client, url, dest, &mut file).await;
    drop(file);

    match outcome {
        Ok(bytes) => {
            info!(bytes, "download complete");
            Ok(bytes)
        }
        Err(err) => {
            if let Err(e) = fs::remove_file(dest).await {
                warn!(error = %e, "failed to remove partial download");
            } else {
                debug!("removed partial download");
            }
            Err(err)
        }
    }
}

async fn stream_to_file(client: &Client, url: &Url, dest: &Path, file: &mut File) -> Result<u64> {
    let download_err = |source| EtlError::Download {
        url: url.to_string(),
        source,
    };
    let write_err = |source| EtlError::DownloadWrite {
        path: dest.to_path_buf(),
        source,
    };

    let response = client
        .get(url.clone())
        .header(ACCEPT_ENCODING, "gzip, deflate")
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(download_err)?;

    let mut progress = DownloadProgress::new(response.content_length());
    debug!(content_length = ?progress.total(), "response received");

    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(download_err)?;
        file.write_all(&chunk).await.map_err(write_err)?;
        progress.advance(chunk.len());
    }

    file.flush().await.map_err(write_err)?;
    Ok(progress.received())
}
