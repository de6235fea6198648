//! Output module for the gallery page and run reports
//!
//! This module handles:
//! - Rendering and writing the HTML gallery
//! - Formatting run statistics

mod gallery;
pub mod stats;

pub use gallery::{render_gallery, write_gallery, GalleryPage};
pub use stats::{format_statistics, print_statistics, RunStatistics};
