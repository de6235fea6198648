//! URL handling module for Page-Gallery
//!
//! This module parses the target page URL, resolves image references found in
//! the page against it, and derives local file names from image URLs.

mod basename;
mod resolve;

// Re-export main functions
pub use basename::{image_basename, local_file_name};
pub use resolve::{parse_target_url, resolve_image_url, ImageReference};
