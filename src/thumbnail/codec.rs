//! Image codec used by the thumbnailer
//!
//! `RasterCodec` sniffs the format from file content rather than the
//! extension, reads dimensions from the header only, and resizes with
//! Lanczos3 before encoding back into the source format.

use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader};
use std::io::{BufReader, Cursor};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unrecognized image format: {0}")]
    UnknownFormat(String),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Metadata of an original (un-resized) image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    /// Lowercase format name, e.g. `jpeg`, `png`, `webp`
    pub format: String,
}

/// Image decode/resize capability used by the thumbnailer
pub trait ImageCodec: Send + Sync {
    /// Reads dimensions and format without decoding pixels
    fn identify(&self, path: &Path) -> Result<ImageInfo, CodecError>;

    /// Resizes to `width` keeping the aspect ratio and encodes in the source format
    fn resize_to_width(&self, path: &Path, width: u32) -> Result<Vec<u8>, CodecError>;
}

/// Height that keeps the source aspect ratio at `target_width`, at least 1px
pub fn scaled_height(source_width: u32, source_height: u32, target_width: u32) -> u32 {
    if source_width == 0 {
        return 1;
    }
    let height = (source_height as f64 * target_width as f64 / source_width as f64).round();
    (height as u32).max(1)
}

/// Lowercase name for an image format
pub fn format_name(format: ImageFormat) -> String {
    match format {
        ImageFormat::Jpeg => "jpeg".to_string(),
        ImageFormat::Png => "png".to_string(),
        ImageFormat::Gif => "gif".to_string(),
        ImageFormat::WebP => "webp".to_string(),
        ImageFormat::Bmp => "bmp".to_string(),
        ImageFormat::Tiff => "tiff".to_string(),
        other => format!("{:?}", other).to_lowercase(),
    }
}

/// Codec backed by the pure Rust `image` crate
#[derive(Debug, Default, Clone, Copy)]
pub struct RasterCodec;

impl RasterCodec {
    pub fn new() -> Self {
        Self
    }
}

/// Opens a file and sniffs its format from content
fn open(path: &Path) -> Result<(ImageReader<BufReader<std::fs::File>>, ImageFormat), CodecError> {
    let reader = ImageReader::open(path)?.with_guessed_format()?;
    let format = reader
        .format()
        .ok_or_else(|| CodecError::UnknownFormat(path.display().to_string()))?;
    Ok((reader, format))
}

impl ImageCodec for RasterCodec {
    fn identify(&self, path: &Path) -> Result<ImageInfo, CodecError> {
        let (reader, format) = open(path)?;
        let (width, height) = reader.into_dimensions().map_err(|e| {
            CodecError::ProcessingFailed(format!(
                "Failed to read dimensions of {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(ImageInfo {
            width,
            height,
            format: format_name(format),
        })
    }

    fn resize_to_width(&self, path: &Path, width: u32) -> Result<Vec<u8>, CodecError> {
        let (reader, format) = open(path)?;
        let img = reader.decode().map_err(|e| {
            CodecError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
        })?;

        let height = scaled_height(img.width(), img.height(), width);
        let mut resized = img.resize_exact(width, height, FilterType::Lanczos3);

        // JPEG has no alpha channel
        if format == ImageFormat::Jpeg {
            resized = DynamicImage::ImageRgb8(resized.to_rgb8());
        }

        let mut buffer = Cursor::new(Vec::new());
        resized.write_to(&mut buffer, format).map_err(|e| {
            CodecError::ProcessingFailed(format!(
                "Failed to encode thumbnail of {}: {}",
                path.display(),
                e
            ))
        })?;

        Ok(buffer.into_inner())
    }
}
