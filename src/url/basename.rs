use url::Url;

/// Returns the last segment of the URL path
///
/// Query and fragment are ignored. A path ending in `/` yields an empty name,
/// which still produces a unique local file thanks to the index prefix.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use page_gallery::url::image_basename;
///
/// let url = Url::parse("http://example.com/img/cat.png?v=2").unwrap();
/// assert_eq!(image_basename(&url), "cat.png");
/// ```
pub fn image_basename(url: &Url) -> String {
    let path = url.path();
    match path.rfind('/') {
        Some(idx) => path[idx + 1..].to_string(),
        None => path.to_string(),
    }
}

/// Builds the local file name `<index>.<basename>` for the nth image
pub fn local_file_name(index: usize, url: &Url) -> String {
    format!("{}.{}", index, image_basename(url))
}
