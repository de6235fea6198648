use serde::Deserialize;
use std::path::PathBuf;

/// Default number of downloads allowed in flight at once
pub const DEFAULT_MAX_CONCURRENT: u32 = 8;

/// Default thumbnail width in pixels
pub const DEFAULT_THUMBNAIL_WIDTH: u32 = 120;

/// Default gallery file name inside the output folder
pub const DEFAULT_GALLERY_FILE: &str = "index.html";

/// Main configuration structure for Page-Gallery
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub download: DownloadConfig,
    #[serde(default)]
    pub thumbnail: ThumbnailConfig,
    #[serde(default)]
    pub extractor: ExtractorConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Image download configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DownloadConfig {
    /// Maximum number of image downloads in flight at once
    #[serde(rename = "max-concurrent", default = "default_max_concurrent")]
    pub max_concurrent: u32,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            max_concurrent: default_max_concurrent(),
            user_agent: default_user_agent(),
        }
    }
}

/// Thumbnail configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ThumbnailConfig {
    /// Target thumbnail width in pixels; height follows the aspect ratio
    #[serde(default = "default_thumbnail_width")]
    pub width: u32,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            width: default_thumbnail_width(),
        }
    }
}

/// Which image source extractor to run over the page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractorKind {
    /// Lightweight tag scanner
    #[default]
    Pattern,
    /// Full HTML parser
    Html,
}

/// Extractor configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExtractorConfig {
    #[serde(default)]
    pub kind: ExtractorKind,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// File name of the gallery page written into the output folder
    #[serde(rename = "gallery-file", default = "default_gallery_file")]
    pub gallery_file: String,

    /// Directory for the per-run page temp file (system temp dir when unset)
    #[serde(rename = "scratch-dir", default)]
    pub scratch_dir: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            gallery_file: default_gallery_file(),
            scratch_dir: None,
        }
    }
}

fn default_max_concurrent() -> u32 {
    DEFAULT_MAX_CONCURRENT
}

fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

fn default_thumbnail_width() -> u32 {
    DEFAULT_THUMBNAIL_WIDTH
}

fn default_gallery_file() -> String {
    DEFAULT_GALLERY_FILE.to_string()
}
