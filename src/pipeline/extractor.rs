//! Image source extraction from raw HTML
//!
//! Two extractors implement [`ImageSourceExtractor`]:
//! - [`PatternExtractor`] scans the text for `<img ... src="...">` tags
//!   without building a document tree
//! - [`HtmlExtractor`] parses the page with `scraper` and selects `img[src]`
//!
//! Both return raw `src` values in document order, duplicates included.

use crate::config::ExtractorKind;
use crate::url::ImageReference;
use crate::UrlError;
use scraper::{Html, Selector};
use url::Url;

/// Pulls image `src` values out of page markup
pub trait ImageSourceExtractor: Send + Sync {
    /// Returns every image source in document order, duplicates included
    fn extract_image_sources(&self, html: &str) -> Vec<String>;
}

/// Builds the extractor selected in configuration
pub fn extractor_for(kind: ExtractorKind) -> Box<dyn ImageSourceExtractor> {
    match kind {
        ExtractorKind::Pattern => Box::new(PatternExtractor),
        ExtractorKind::Html => Box::new(HtmlExtractor),
    }
}

/// Extracts image sources and resolves each against the page URL
///
/// Fails on the first source that cannot be resolved.
pub fn extract_image_references(
    extractor: &dyn ImageSourceExtractor,
    html: &str,
    base_url: &Url,
) -> Result<Vec<ImageReference>, UrlError> {
    extractor
        .extract_image_sources(html)
        .iter()
        .map(|src| ImageReference::resolve(base_url, src))
        .collect()
}

/// Tag scanner matching `<img` followed, before the tag closes, by a quoted
/// `src` attribute
///
/// Tag and attribute names match case-insensitively and whitespace around
/// `=` is allowed. Unquoted values and malformed tags are not matched.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternExtractor;

impl ImageSourceExtractor for PatternExtractor {
    fn extract_image_sources(&self, html: &str) -> Vec<String> {
        // ASCII lowercasing keeps byte offsets identical to `html`
        let lower = html.to_ascii_lowercase();
        let bytes = lower.as_bytes();
        let mut sources = Vec::new();
        let mut pos = 0;

        while let Some(found) = lower[pos..].find("<img") {
            let tag_start = pos + found;
            let after_name = tag_start + "<img".len();

            // `<imgx` is a different tag
            match bytes.get(after_name) {
                Some(b) if b.is_ascii_whitespace() || *b == b'/' || *b == b'>' => {}
                Some(_) => {
                    pos = after_name;
                    continue;
                }
                None => break,
            }

            match scan_tag_for_src(bytes, after_name) {
                Some((src_range, tag_end)) => {
                    if let Some((start, end)) = src_range {
                        sources.push(html[start..end].to_string());
                    }
                    pos = tag_end + 1;
                }
                // Unterminated tag
                None => break,
            }
        }

        sources
    }
}

/// Walks the attributes of a tag starting at `from`
///
/// Returns the byte range of the first `src` value (if any) and the offset of
/// the closing `>`, or `None` if the tag never closes. Quoted values are
/// skipped whole so a `>` inside them does not end the tag.
fn scan_tag_for_src(bytes: &[u8], from: usize) -> Option<(Option<(usize, usize)>, usize)> {
    let mut src = None;
    let mut i = from;

    while i < bytes.len() {
        match bytes[i] {
            b'>' => return Some((src, i)),
            quote @ (b'"' | b'\'') => {
                let close = find_byte(bytes, i + 1, quote)?;
                i = close + 1;
            }
            b's' if src.is_none()
                && bytes[i..].starts_with(b"src")
                && bytes[i - 1].is_ascii_whitespace() =>
            {
                let mut j = skip_whitespace(bytes, i + 3);
                if bytes.get(j) != Some(&b'=') {
                    i += 3;
                    continue;
                }
                j = skip_whitespace(bytes, j + 1);
                match bytes.get(j) {
                    Some(&quote) if quote == b'"' || quote == b'\'' => {
                        let close = find_byte(bytes, j + 1, quote)?;
                        src = Some((j + 1, close));
                        i = close + 1;
                    }
                    _ => i = j,
                }
            }
            _ => i += 1,
        }
    }

    None
}

fn find_byte(bytes: &[u8], from: usize, needle: u8) -> Option<usize> {
    bytes[from..]
        .iter()
        .position(|b| *b == needle)
        .map(|offset| from + offset)
}

fn skip_whitespace(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    i
}

/// Full HTML parser extractor backed by `scraper`
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlExtractor;

impl ImageSourceExtractor for HtmlExtractor {
    fn extract_image_sources(&self, html: &str) -> Vec<String> {
        let document = Html::parse_document(html);
        let mut sources = Vec::new();

        if let Ok(img_selector) = Selector::parse("img[src]") {
            for element in document.select(&img_selector) {
                if let Some(src) = element.value().attr("src") {
                    sources.push(src.to_string());
                }
            }
        }

        sources
    }
}
