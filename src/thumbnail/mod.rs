//! Thumbnailer
//!
//! Resizes every file in the output folder to a fixed width and records the
//! original's metadata and source URL for the gallery.
//!
//! Files are processed one at a time in directory listing order. A file that
//! cannot be decoded, resized or encoded is logged and skipped; only IO
//! failures on the folder itself or on writing a thumbnail abort the stage.

mod codec;
mod naming;

pub use codec::{format_name, scaled_height, CodecError, ImageCodec, ImageInfo, RasterCodec};
pub use naming::{original_file_name, original_path, resized_file_name, resized_path, RESIZED_MARKER};

use crate::pipeline::DownloadRecord;
use crate::GalleryError;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use url::Url;

/// A written thumbnail with the metadata of its source image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizedImage {
    /// Path of the thumbnail file
    pub path: PathBuf,

    /// Metadata read from the original, not the thumbnail
    pub info: ImageInfo,

    /// Source URL recovered from the download records, `None` on a miss
    pub source_url: Option<Url>,
}

/// Outcome of thumbnailing a folder
#[derive(Debug, Default)]
pub struct ThumbnailBatch {
    /// Thumbnails written, in listing order
    pub images: Vec<ResizedImage>,

    /// Files that could not be thumbnailed
    pub skipped: Vec<PathBuf>,
}

impl ThumbnailBatch {
    /// Number of thumbnails whose source URL could not be recovered
    pub fn provenance_misses(&self) -> usize {
        self.images
            .iter()
            .filter(|image| image.source_url.is_none())
            .count()
    }
}

/// Looks up the source URL of a thumbnail
///
/// The original path is derived by stripping the `.resized` marker and must
/// match a record's path exactly.
pub fn find_source_url(records: &[DownloadRecord], resized: &Path) -> Option<Url> {
    let original = original_path(resized)?;
    records
        .iter()
        .find(|record| record.path == original)
        .map(|record| record.url.clone())
}

/// Thumbnails every regular file in `folder`
///
/// The folder is listed once up front, so thumbnails written during this call
/// are not themselves resized. Files left by earlier runs are included.
///
/// # Arguments
///
/// * `codec` - Image codec used for resizing and identification
/// * `folder` - Output folder to scan
/// * `records` - Downloads from this run, for provenance lookup
/// * `width` - Target thumbnail width in pixels
pub async fn resize_all(
    codec: Arc<dyn ImageCodec>,
    folder: &Path,
    records: &[DownloadRecord],
    width: u32,
) -> Result<ThumbnailBatch, GalleryError> {
    let files = list_files(folder).await?;
    let mut batch = ThumbnailBatch::default();

    for original in files {
        tracing::debug!("Trying to resize {}", original.display());

        let (bytes, info) = match resize_and_identify(Arc::clone(&codec), &original, width).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!("Couldn't resize {}: {}", original.display(), e);
                batch.skipped.push(original);
                continue;
            }
        };

        let thumbnail = resized_path(&original);
        tokio::fs::write(&thumbnail, &bytes)
            .await
            .map_err(|e| GalleryError::filesystem("write thumbnail", &thumbnail, e))?;

        let source_url = find_source_url(records, &thumbnail);
        if source_url.is_none() {
            tracing::warn!(
                "No download record for {}; its caption will have no URL",
                original.display()
            );
        }

        batch.images.push(ResizedImage {
            path: thumbnail,
            info,
            source_url,
        });
    }

    tracing::info!(
        "Thumbnailed {} files, skipped {}",
        batch.images.len(),
        batch.skipped.len()
    );

    Ok(batch)
}

/// Resizes then identifies one original on the blocking pool
async fn resize_and_identify(
    codec: Arc<dyn ImageCodec>,
    original: &Path,
    width: u32,
) -> Result<(Vec<u8>, ImageInfo), CodecError> {
    let path = original.to_path_buf();
    tokio::task::spawn_blocking(move || {
        let bytes = codec.resize_to_width(&path, width)?;
        let info = codec.identify(&path)?;
        Ok::<_, CodecError>((bytes, info))
    })
    .await
    .map_err(|e| CodecError::ProcessingFailed(format!("resize task failed: {}", e)))?
}

/// Lists regular files directly inside `folder`
async fn list_files(folder: &Path) -> Result<Vec<PathBuf>, GalleryError> {
    let read_error = |e| GalleryError::filesystem("read output folder", folder, e);

    let mut entries = tokio::fs::read_dir(folder).await.map_err(read_error)?;
    let mut files = Vec::new();

    while let Some(entry) = entries.next_entry().await.map_err(read_error)? {
        let file_type = entry.file_type().await.map_err(read_error)?;
        if file_type.is_file() {
            files.push(entry.path());
        }
    }

    Ok(files)
}
