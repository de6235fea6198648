//! HTTP fetcher implementation
//!
//! This module handles every HTTP request the pipeline makes:
//! - Building the shared HTTP client with the configured user agent
//! - Streaming a response body to a file, chunk by chunk
//!
//! There is no retry logic. A failed request, a non-success status or a
//! write error is returned to the caller with the URL attached.

use crate::FetchError;
use reqwest::{Client, Response};
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use url::Url;

/// Builds an HTTP client with proper configuration
///
/// No request or connect timeout is set; a slow server holds its download
/// open until it completes or the connection drops.
///
/// # Example
///
/// ```no_run
/// use page_gallery::pipeline::build_http_client;
///
/// let client = build_http_client("page-gallery/1.0").unwrap();
/// ```
pub fn build_http_client(user_agent: &str) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Sends a GET request and rejects non-success statuses
async fn send(client: &Client, url: &Url) -> Result<Response, FetchError> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|source| FetchError::Http {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    Ok(response)
}

/// Streams the body at `url` into `destination`
///
/// The destination is created or truncated before the first chunk arrives.
/// Success is only reported once every chunk has been written and the file
/// flushed; an interrupted body surfaces as `FetchError::Http`, never as a
/// silently truncated file.
///
/// # Returns
///
/// * `Ok(u64)` - Number of bytes written
/// * `Err(FetchError)` - Request, status or write failure for this URL
pub async fn fetch_to_file(
    client: &Client,
    url: &Url,
    destination: &Path,
) -> Result<u64, FetchError> {
    let mut response = send(client, url).await?;

    let write_error = |source: std::io::Error| FetchError::Write {
        url: url.to_string(),
        path: destination.to_path_buf(),
        source,
    };

    let mut file = File::create(destination).await.map_err(write_error)?;
    let mut written: u64 = 0;

    while let Some(chunk) = response.chunk().await.map_err(|source| FetchError::Http {
        url: url.to_string(),
        source,
    })? {
        file.write_all(&chunk).await.map_err(write_error)?;
        written += chunk.len() as u64;
    }

    file.flush().await.map_err(write_error)?;

    tracing::debug!(
        "Wrote {} bytes from {} to {}",
        written,
        url,
        destination.display()
    );

    Ok(written)
}
