//! Page-Gallery: thumbnail gallery builder for a single web page
//!
//! This crate fetches one HTML page, downloads every image it references,
//! thumbnails the downloads and writes a static HTML gallery next to them.

pub mod config;
pub mod output;
pub mod pipeline;
pub mod state;
pub mod thumbnail;
pub mod url;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Page-Gallery operations
#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidTransition {
        from: state::RunStage,
        to: state::RunStage,
    },

    #[error("Failed to {operation} {path}: {source}")]
    Filesystem {
        operation: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Download task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

impl GalleryError {
    /// Wraps an IO error with the operation and path that produced it
    pub fn filesystem(
        operation: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::Filesystem {
            operation,
            path: path.into(),
            source,
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL '{url}': {source}")]
    Parse {
        url: String,
        source: ::url::ParseError,
    },

    #[error("Failed to resolve image source '{src}' against {base}: {source}")]
    Resolve {
        base: String,
        src: String,
        source: ::url::ParseError,
    },

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),
}

/// Errors raised while fetching a single resource
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Failed to write {url} to {path}: {source}")]
    Write {
        url: String,
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result type alias for Page-Gallery operations
pub type Result<T> = std::result::Result<T, GalleryError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use pipeline::{run_gallery, RunContext};
pub use state::RunStage;
pub use thumbnail::{ImageInfo, ResizedImage};
