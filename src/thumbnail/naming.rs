//! Thumbnail file naming
//!
//! A thumbnail sits next to its original with `.resized` inserted before the
//! last extension, so `3.photo.jpg` becomes `3.photo.resized.jpg`. Names
//! without an extension get the marker appended as is.

use std::path::{Path, PathBuf};

/// Marker inserted into thumbnail file names
pub const RESIZED_MARKER: &str = "resized";

/// Derives the thumbnail file name from an original file name
pub fn resized_file_name(original: &str) -> String {
    match original.rfind('.') {
        Some(dot) => format!(
            "{}.{}{}",
            &original[..dot],
            RESIZED_MARKER,
            &original[dot..]
        ),
        None => format!("{}{}", original, RESIZED_MARKER),
    }
}

/// Recovers the original file name from a thumbnail file name
///
/// The marker is searched from the end, mirroring `resized_file_name`, so an
/// original that already contains `.resized.` maps back exactly. Returns
/// `None` when the name carries no marker.
pub fn original_file_name(resized: &str) -> Option<String> {
    let marker = format!(".{}.", RESIZED_MARKER);
    if let Some(idx) = resized.rfind(&marker) {
        // Keep the dot that opens the extension
        let rest = &resized[idx + marker.len() - 1..];
        return Some(format!("{}{}", &resized[..idx], rest));
    }
    resized
        .strip_suffix(RESIZED_MARKER)
        .filter(|stem| !stem.is_empty() && !stem.contains('.'))
        .map(str::to_string)
}

/// Thumbnail path for an original image path, in the same folder
pub fn resized_path(original: &Path) -> PathBuf {
    let name = original
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    original.with_file_name(resized_file_name(&name))
}

/// Original image path for a thumbnail path, in the same folder
pub fn original_path(resized: &Path) -> Option<PathBuf> {
    let name = resized.file_name()?.to_string_lossy();
    original_file_name(&name).map(|original| resized.with_file_name(original))
}
