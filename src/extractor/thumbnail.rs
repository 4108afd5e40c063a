use scraper::{Html, Selector};
use url::Url;

/// Meta tags consulted for a thumbnail, in priority order; first match wins.
const THUMBNAIL_SELECTORS: &[&str] = &[
    "meta[property='og:image']",
    "meta[property='og:image:url']",
    "meta[name='twitter:image']",
    "meta[name='twitter:image:src']",
];

/// Extract a thumbnail URL from Open Graph / Twitter-card meta tags.
/// Relative URLs are resolved against the page URL. Absence is not an error.
pub fn extract_thumbnail(document: &Html, base_url: &Url) -> Option<Url> {
    for selector_str in THUMBNAIL_SELECTORS {
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };
        if let Some(element) = document.select(&selector).next()
            && let Some(content) = element.value().attr("content")
            && !content.trim().is_empty()
            && let Ok(resolved) = base_url.join(content.trim())
        {
            return Some(resolved);
        }
    }
    None
}
