//! DOM sanitation: strips non-content nodes and extracts text by selector,
//! with a broad-container fallback chain for pages no selector fits.

use crate::extractor::model::normalize_whitespace;
use ego_tree::NodeRef;
use scraper::node::Element;
use scraper::{ElementRef, Html, Node, Selector};
use tracing::debug;

/// Tags that never carry article text.
const NOISE_TAGS: &[&str] = &[
    "script", "style", "noscript", "template", "iframe", "svg", "form", "nav", "header", "footer",
    "aside", "button",
];

/// class/id fragments marking noise containers: ads, share widgets,
/// comments, navigation chrome.
const NOISE_HINTS: &[&str] = &[
    "advert",
    "-ad-",
    "ad-banner",
    "adsense",
    "sponsor",
    "promo",
    "share",
    "sns",
    "social",
    "comment",
    "sidebar",
    "side-bar",
    "breadcrumb",
    "related",
    "recommend",
    "newsletter",
    "subscribe",
    "ranking",
    "banner",
    "menu",
    "pagination",
];

/// Block-level tags that get a newline appended so extracted text keeps
/// paragraph structure.
const BLOCK_TAGS: &[&str] = &[
    "p", "div", "br", "li", "ul", "ol", "h1", "h2", "h3", "h4", "h5", "h6", "section", "article",
    "blockquote", "pre", "tr", "dd", "dt",
];

fn is_noise_element(element: &Element) -> bool {
    let name = element.name();
    if NOISE_TAGS.contains(&name) {
        return true;
    }
    let mut hints = String::new();
    if let Some(class) = element.attr("class") {
        hints.push_str(&class.to_ascii_lowercase());
    }
    if let Some(id) = element.attr("id") {
        hints.push(' ');
        hints.push_str(&id.to_ascii_lowercase());
    }
    if let Some(role) = element.attr("role") {
        hints.push(' ');
        hints.push_str(&role.to_ascii_lowercase());
    }
    !hints.is_empty() && NOISE_HINTS.iter().any(|hint| hints.contains(hint))
}

fn collect_text(node: NodeRef<'_, Node>, out: &mut String) {
    match node.value() {
        Node::Text(text) => out.push_str(&text.text),
        Node::Element(element) => {
            if is_noise_element(element) {
                return;
            }
            for child in node.children() {
                collect_text(child, out);
            }
            if BLOCK_TAGS.contains(&element.name()) {
                out.push('\n');
            }
        }
        _ => {
            for child in node.children() {
                collect_text(child, out);
            }
        }
    }
}

/// Visible text of an element with noise subtrees removed, whitespace
/// normalized.
pub fn clean_text(root: ElementRef<'_>) -> String {
    let mut out = String::new();
    collect_text(*root, &mut out);
    normalize_whitespace(&out)
}

/// Try each selector in priority order; accept the first whose concatenated
/// text exceeds `min_length` characters. A selector matching zero nodes is a
/// miss, not an error; so is an unparseable selector.
pub fn extract_by_selectors(document: &Html, selectors: &[&str], min_length: usize) -> Option<String> {
    for selector_str in selectors {
        let Ok(selector) = Selector::parse(selector_str) else {
            debug!(selector = selector_str, "skipping unparseable selector");
            continue;
        };
        let text = document
            .select(&selector)
            .map(clean_text)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n");
        if text.chars().count() > min_length {
            return Some(text);
        }
    }
    None
}

/// Fallback extraction once every configured selector missed: try broad
/// containers in order and return the first non-empty text. The minimum
/// length check is the caller's responsibility.
pub fn fallback_extract(document: &Html, site_container: Option<&str>) -> Option<String> {
    let mut chain: Vec<&str> = vec!["article", "main"];
    if let Some(container) = site_container {
        chain.push(container);
    }
    chain.push("body");

    for selector_str in chain {
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };
        if let Some(element) = document.select(&selector).next() {
            let text = clean_text(element);
            if !text.is_empty() {
                return Some(text);
            }
        }
    }
    None
}
