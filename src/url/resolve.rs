use crate::UrlError;
use url::Url;

/// An image source as written in the page, together with its absolute form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference {
    /// The `src` value exactly as it appeared in the markup
    pub raw: String,

    /// The absolute URL after resolution against the page URL
    pub resolved: Url,
}

impl ImageReference {
    /// Resolves `raw` against `base` and builds the reference
    pub fn resolve(base: &Url, raw: &str) -> Result<Self, UrlError> {
        Ok(Self {
            raw: raw.to_string(),
            resolved: resolve_image_url(base, raw)?,
        })
    }
}

/// Parses the page URL given on the command line
///
/// Only HTTP and HTTPS pages can be fetched, so any other scheme is rejected
/// up front rather than failing later inside the HTTP client.
///
/// # Examples
///
/// ```
/// use page_gallery::url::parse_target_url;
///
/// let url = parse_target_url("http://example.com/a/b.html").unwrap();
/// assert_eq!(url.host_str(), Some("example.com"));
/// assert!(parse_target_url("ftp://example.com/").is_err());
/// ```
pub fn parse_target_url(url_str: &str) -> Result<Url, UrlError> {
    let url = Url::parse(url_str).map_err(|source| UrlError::Parse {
        url: url_str.to_string(),
        source,
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS pages are supported, got: {}",
            url.scheme()
        )));
    }

    Ok(url)
}

/// Resolves an image `src` value against the page URL
///
/// Standard relative reference resolution applies: absolute sources pass
/// through unchanged, protocol-relative (`//host/x`), root-relative (`/x`)
/// and path-relative (`x`, `../x`) sources resolve against `base`.
///
/// # Examples
///
/// ```
/// use page_gallery::url::resolve_image_url;
/// use url::Url;
///
/// let base = Url::parse("http://example.com/a/b.html").unwrap();
/// let url = resolve_image_url(&base, "../img/x.png").unwrap();
/// assert_eq!(url.as_str(), "http://example.com/img/x.png");
/// ```
pub fn resolve_image_url(base: &Url, raw_src: &str) -> Result<Url, UrlError> {
    base.join(raw_src).map_err(|source| UrlError::Resolve {
        base: base.to_string(),
        src: raw_src.to_string(),
        source,
    })
}
