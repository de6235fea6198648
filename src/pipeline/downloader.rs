//! Batch image downloader
//!
//! Downloads every image URL into the output folder as `<index>.<basename>`.
//! A semaphore caps how many downloads are in flight at once; all downloads
//! share one joint wait, and the first failure fails the whole batch.

use crate::pipeline::fetcher::fetch_to_file;
use crate::url::local_file_name;
use crate::GalleryError;
use reqwest::Client;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use url::Url;

/// A downloaded image and where it was saved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRecord {
    /// Position of the image in the extracted sequence
    pub index: usize,

    /// Absolute source URL
    pub url: Url,

    /// Local file the body was written to
    pub path: PathBuf,
}

/// Downloads all `urls` into `output_folder`
///
/// # Failure Policy
///
/// The batch fails on the first download error reported. Downloads still in
/// flight at that point are detached rather than aborted: they run to
/// completion in the background and their files stay on disk. Nothing already
/// written is cleaned up.
///
/// # Arguments
///
/// * `client` - Shared HTTP client
/// * `urls` - Absolute image URLs in extraction order
/// * `output_folder` - Existing folder that receives the files
/// * `max_concurrent` - Maximum downloads in flight at once
///
/// # Returns
///
/// * `Ok(Vec<DownloadRecord>)` - One record per URL, ordered by index
/// * `Err(GalleryError)` - The first download failure
pub async fn download_all(
    client: &Client,
    urls: &[Url],
    output_folder: &Path,
    max_concurrent: usize,
) -> Result<Vec<DownloadRecord>, GalleryError> {
    let semaphore = Arc::new(Semaphore::new(max_concurrent.max(1)));
    let mut tasks = JoinSet::new();

    for (index, url) in urls.iter().enumerate() {
        let record = DownloadRecord {
            index,
            url: url.clone(),
            path: output_folder.join(local_file_name(index, url)),
        };
        let client = client.clone();
        let semaphore = Arc::clone(&semaphore);

        tasks.spawn(async move {
            // The semaphore is never closed, so acquire cannot fail
            let _permit = semaphore.acquire_owned().await.ok();

            tracing::info!(
                "Downloading {} to {}",
                record.url,
                record.path.display()
            );
            fetch_to_file(&client, &record.url, &record.path).await?;

            Ok::<_, GalleryError>(record)
        });
    }

    let mut records = Vec::with_capacity(urls.len());

    while let Some(joined) = tasks.join_next().await {
        let outcome = match joined {
            Ok(result) => result,
            Err(join_error) => Err(GalleryError::from(join_error)),
        };

        match outcome {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::error!("Download failed: {}", e);
                tasks.detach_all();
                return Err(e);
            }
        }
    }

    records.sort_by_key(|record| record.index);

    Ok(records)
}
