//! The site rule table. Order matters: specific rules precede the catch-all,
//! which matches every URL and must stay last.

use crate::extractor::adapter::{DEFAULT_MIN_CONTENT_LENGTH, SiteRule};

/// Hosts whose article body lives in JSON-LD structured data; handled by the
/// bespoke [`crate::extractor::adapter::JsonLdAdapter`].
pub const JSONLD_HOSTS: &[&str] = &["news.yahoo.co.jp", "www3.nhk.or.jp"];

pub const SITE_RULES: &[SiteRule] = &[
    SiteRule {
        name: "qiita",
        host_suffixes: &["qiita.com"],
        selectors: &["#personal-public-article-body", ".it-MdContent", "section.markdownContent"],
        min_content_length: 500,
        fallback_container: None,
        thumbnail_only: false,
    },
    SiteRule {
        name: "zenn",
        host_suffixes: &["zenn.dev"],
        selectors: &[".znc", "article .BodyContent_anchorToHeadings"],
        min_content_length: 500,
        fallback_container: None,
        thumbnail_only: false,
    },
    SiteRule {
        name: "note",
        host_suffixes: &["note.com"],
        selectors: &[".note-common-styles__textnote-body", ".p-article__content"],
        min_content_length: 500,
        fallback_container: None,
        thumbnail_only: false,
    },
    SiteRule {
        name: "hatenablog",
        host_suffixes: &["hatenablog.com", "hatenablog.jp", "hateblo.jp", "hatenadiary.jp"],
        selectors: &[".entry-content", "#entry-content"],
        min_content_length: 500,
        fallback_container: Some(".entry-inner"),
        thumbnail_only: false,
    },
    SiteRule {
        name: "publickey",
        host_suffixes: &["publickey1.jp", "publickey2.jp"],
        selectors: &["#maincol .post", "#content .post"],
        min_content_length: 800,
        fallback_container: Some("#maincol"),
        thumbnail_only: false,
    },
    SiteRule {
        name: "itmedia",
        host_suffixes: &["itmedia.co.jp", "atmarkit.itmedia.co.jp"],
        selectors: &["#cmsBody .inner", "#cmsBody"],
        min_content_length: 500,
        fallback_container: Some("#cmsBody"),
        thumbnail_only: false,
    },
    SiteRule {
        name: "gihyo",
        host_suffixes: &["gihyo.jp"],
        selectors: &["#articleBody", ".readingContent"],
        min_content_length: 500,
        fallback_container: None,
        thumbnail_only: false,
    },
    SiteRule {
        name: "codezine",
        host_suffixes: &["codezine.jp"],
        selectors: &[".detailBlock .article-body", ".article-body"],
        min_content_length: 500,
        fallback_container: None,
        thumbnail_only: false,
    },
    SiteRule {
        name: "devto",
        host_suffixes: &["dev.to"],
        selectors: &["#article-body", ".crayons-article__main"],
        min_content_length: 500,
        fallback_container: None,
        thumbnail_only: false,
    },
    SiteRule {
        name: "medium",
        // Medium renders dense text; a higher bar filters paywalled previews.
        host_suffixes: &["medium.com", "towardsdatascience.com"],
        selectors: &["article section", "article"],
        min_content_length: 1000,
        fallback_container: None,
        thumbnail_only: false,
    },
    SiteRule {
        name: "github",
        host_suffixes: &["github.com"],
        selectors: &["article.markdown-body", ".markdown-body"],
        min_content_length: 300,
        fallback_container: None,
        thumbnail_only: false,
    },
    SiteRule {
        name: "speakerdeck",
        host_suffixes: &["speakerdeck.com"],
        selectors: &[],
        min_content_length: DEFAULT_MIN_CONTENT_LENGTH,
        fallback_container: None,
        thumbnail_only: true,
    },
    SiteRule {
        name: "slideshare",
        host_suffixes: &["slideshare.net"],
        selectors: &[],
        min_content_length: DEFAULT_MIN_CONTENT_LENGTH,
        fallback_container: None,
        thumbnail_only: true,
    },
    SiteRule {
        name: "docswell",
        host_suffixes: &["docswell.com"],
        selectors: &[],
        min_content_length: DEFAULT_MIN_CONTENT_LENGTH,
        fallback_container: None,
        thumbnail_only: true,
    },
    SiteRule {
        name: "youtube",
        host_suffixes: &["youtube.com", "youtu.be"],
        selectors: &[],
        min_content_length: DEFAULT_MIN_CONTENT_LENGTH,
        fallback_container: None,
        thumbnail_only: true,
    },
    // Catch-all: empty host list matches every URL. Must stay last.
    SiteRule {
        name: "generic",
        host_suffixes: &[],
        selectors: &[
            ".article-body",
            ".post-content",
            ".entry-content",
            "article .content",
            "#article-body",
            "#main-content",
        ],
        min_content_length: DEFAULT_MIN_CONTENT_LENGTH,
        fallback_container: None,
        thumbnail_only: false,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catch_all_is_last() {
        let last = SITE_RULES.last().unwrap();
        assert_eq!(last.name, "generic");
        assert!(last.host_suffixes.is_empty());
        // No other rule may be a catch-all.
        for rule in &SITE_RULES[..SITE_RULES.len() - 1] {
            assert!(
                !rule.host_suffixes.is_empty(),
                "rule {} shadows the catch-all",
                rule.name
            );
        }
    }

    #[test]
    fn thumbnail_only_rules_have_no_selectors() {
        for rule in SITE_RULES.iter().filter(|r| r.thumbnail_only) {
            assert!(rule.selectors.is_empty(), "rule {}", rule.name);
        }
    }
}
