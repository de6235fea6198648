//! Configuration module for Page-Gallery
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every field has a default, so an absent file or an
//! empty one yields a usable configuration.
//!
//! # Example
//!
//! ```no_run
//! use page_gallery::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("gallery.toml")).unwrap();
//! println!("Thumbnails will be {}px wide", config.thumbnail.width);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, DownloadConfig, ExtractorConfig, ExtractorKind, OutputConfig, ThumbnailConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::{validate, validate_max_concurrent, validate_thumbnail_width};
