//! Pipeline module for building a gallery from a web page
//!
//! This module contains the core run logic, including:
//! - HTTP fetching of the page and images
//! - Image source extraction from HTML
//! - Bounded concurrent downloading
//! - Overall run coordination

mod coordinator;
mod downloader;
mod extractor;
mod fetcher;

pub use coordinator::{run_gallery, Coordinator, RunContext, RunReport};
pub use downloader::{download_all, DownloadRecord};
pub use extractor::{
    extract_image_references, extractor_for, HtmlExtractor, ImageSourceExtractor,
    PatternExtractor,
};
pub use fetcher::{build_http_client, fetch_to_file};
