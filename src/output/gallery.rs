//! Gallery page generation
//!
//! Renders the gallery with [maud](https://maud.lambda.xyz/). Every URL,
//! file name and format string comes from the fetched page or its images,
//! so all of it goes through maud's escaping.

use crate::thumbnail::ResizedImage;
use crate::GalleryError;
use chrono::{DateTime, Utc};
use maud::{html, Markup, PreEscaped, DOCTYPE};
use std::path::{Path, PathBuf};
use url::Url;

const GALLERY_CSS: &str = r#"
.box {display: flex; flex-flow: column; align-items: center}
.item {display: flex; flex-flow: column; align-items: center; margin: 2em auto 2em}
.item img {margin-bottom: 1em}
footer {text-align: center; color: #777; font-size: 0.8em; margin: 2em}
"#;

/// A gallery document written to disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryPage {
    /// Where the document was written
    pub path: PathBuf,

    /// Number of image blocks in the document
    pub image_count: usize,
}

/// Renders the full gallery document
///
/// Thumbnails are referenced by file name, relative to the gallery file,
/// which always sits in the same folder.
pub fn render_gallery(
    page_url: &Url,
    images: &[ResizedImage],
    generated_at: DateTime<Utc>,
) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                title { "Images from " (page_url.as_str()) }
                style { (PreEscaped(GALLERY_CSS)) }
            }
            body {
                header {
                    h1 { "Images from " a href=(page_url.as_str()) { (page_url.as_str()) } }
                }
                div.box {
                    @for image in images {
                        (render_item(image))
                    }
                }
                footer {
                    (images.len()) " images, generated "
                    (generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string())
                }
            }
        }
    }
}

/// Renders one thumbnail with its caption
fn render_item(image: &ResizedImage) -> Markup {
    let url = image.source_url.as_ref().map(Url::as_str).unwrap_or("");

    html! {
        div.item {
            img src=(thumbnail_href(&image.path)) alt=(url);
            span.caption {
                "URL: " (url)
                " Original size: " (image.info.width) " x " (image.info.height)
                " Format: " (image.info.format)
            }
        }
    }
}

/// Relative href for a thumbnail file next to the gallery
///
/// File names come from URL paths and may still contain percent escapes,
/// which a browser would otherwise decode before looking up the file.
fn thumbnail_href(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut href = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            '%' => href.push_str("%25"),
            '#' => href.push_str("%23"),
            '?' => href.push_str("%3F"),
            ' ' => href.push_str("%20"),
            _ => href.push(c),
        }
    }
    href
}

/// Renders the gallery and writes it to `folder/file_name`
///
/// An existing file of the same name is overwritten.
pub async fn write_gallery(
    folder: &Path,
    file_name: &str,
    page_url: &Url,
    images: &[ResizedImage],
) -> Result<GalleryPage, GalleryError> {
    let path = folder.join(file_name);
    let markup = render_gallery(page_url, images, Utc::now());

    tokio::fs::write(&path, markup.into_string())
        .await
        .map_err(|e| GalleryError::filesystem("write gallery", &path, e))?;

    tracing::info!("Wrote gallery with {} images to {}", images.len(), path.display());

    Ok(GalleryPage {
        path,
        image_count: images.len(),
    })
}
