//! Run statistics
//!
//! Counts gathered while the pipeline runs, printed once at the end.

use crate::state::RunStage;
use std::time::Duration;

/// Counts and timings for one gallery run
#[derive(Debug, Clone, Default)]
pub struct RunStatistics {
    /// Image tags found in the page
    pub images_found: usize,

    /// Images written to the output folder
    pub images_downloaded: usize,

    /// Thumbnails written
    pub thumbnails_written: usize,

    /// Files in the output folder that could not be thumbnailed
    pub files_skipped: usize,

    /// Thumbnails whose source URL could not be recovered
    pub provenance_misses: usize,

    /// Time spent in each completed stage
    pub stage_timings: Vec<(RunStage, Duration)>,

    /// Wall time for the whole run
    pub elapsed: Duration,
}

/// Formats statistics as the block printed after a run
pub fn format_statistics(stats: &RunStatistics) -> String {
    let mut out = String::new();

    out.push_str("=== Gallery Statistics ===\n\n");
    out.push_str(&format!("  Images found: {}\n", stats.images_found));
    out.push_str(&format!("  Images downloaded: {}\n", stats.images_downloaded));
    out.push_str(&format!("  Thumbnails written: {}\n", stats.thumbnails_written));
    out.push_str(&format!("  Files skipped: {}\n", stats.files_skipped));

    if stats.provenance_misses > 0 {
        out.push_str(&format!(
            "  Thumbnails without source URL: {}\n",
            stats.provenance_misses
        ));
    }

    if !stats.stage_timings.is_empty() {
        out.push_str("\nStage Timings:\n");
        for (stage, duration) in &stats.stage_timings {
            out.push_str(&format!("  {}: {:.2}s\n", stage, duration.as_secs_f64()));
        }
    }

    out.push_str(&format!("\nTotal: {:.2}s\n", stats.elapsed.as_secs_f64()));
    out
}

/// Prints statistics to stdout
pub fn print_statistics(stats: &RunStatistics) {
    print!("{}", format_statistics(stats));
}
