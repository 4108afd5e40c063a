use matome::extractor::adapter::{Adapter, GenericAdapter, JsonLdAdapter, SiteRule};
use matome::extractor::ExtractorRegistry;
use matome::fetcher::{FetchPolicy, Fetcher};
use matome::sleeper::RecordingSleeper;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn quiet_fetcher() -> Arc<Fetcher> {
    Arc::new(
        Fetcher::with_policy(FetchPolicy {
            max_attempts: 2,
            base_delay: Duration::from_millis(1),
            politeness_delay: Duration::from_millis(1),
            ..FetchPolicy::default()
        })
        .with_sleeper(Arc::new(RecordingSleeper::new())),
    )
}

fn html_response(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_bytes(body.as_bytes())
        .insert_header("Content-Type", "text/html; charset=utf-8")
}

fn registry() -> ExtractorRegistry {
    ExtractorRegistry::new(quiet_fetcher())
}

const LOOPBACK_RULE: SiteRule = SiteRule {
    name: "loopback",
    host_suffixes: &["127.0.0.1"],
    selectors: &[".article-body"],
    min_content_length: 500,
    fallback_container: None,
    thumbnail_only: false,
};

const THUMBNAIL_RULE: SiteRule = SiteRule {
    name: "loopback-thumb",
    host_suffixes: &["127.0.0.1"],
    selectors: &[],
    min_content_length: 500,
    fallback_container: None,
    thumbnail_only: true,
};

#[tokio::test]
async fn primary_selector_extracts_content_and_thumbnail() {
    let server = MockServer::start().await;
    let body = format!(
        "<html><head><meta property=\"og:image\" content=\"/thumb.png\"></head>\
         <body><div class=\"article-body\"><p>{}</p></div></body></html>",
        "本文の段落です。".repeat(80)
    );
    Mock::given(method("GET"))
        .and(path("/article"))
        .respond_with(html_response(&body))
        .mount(&server)
        .await;

    let adapter = GenericAdapter::new(LOOPBACK_RULE, quiet_fetcher());
    let url = format!("{}/article", server.uri());
    let enriched = adapter.enrich(&url).await.unwrap();

    let content = enriched.content.unwrap();
    assert!(content.chars().count() > 500);
    assert!(content.contains("本文の段落です。"));
    let thumbnail = enriched.thumbnail.unwrap();
    assert!(thumbnail.as_str().ends_with("/thumb.png"));
}

#[tokio::test]
async fn short_selector_text_falls_back_to_article_container() {
    // Primary selector yields 400 chars (below the 500 minimum) but the
    // <article> fallback holds 900: the fallback content must win.
    let server = MockServer::start().await;
    let body = format!(
        "<html><body>\
         <div class=\"article-body\">{}</div>\
         <article>{}</article>\
         </body></html>",
        "短".repeat(400),
        "長".repeat(900)
    );
    Mock::given(method("GET"))
        .and(path("/fallback"))
        .respond_with(html_response(&body))
        .mount(&server)
        .await;

    let adapter = GenericAdapter::new(LOOPBACK_RULE, quiet_fetcher());
    let url = format!("{}/fallback", server.uri());
    let enriched = adapter.enrich(&url).await.unwrap();

    let content = enriched.content.unwrap();
    assert!(content.contains('長'));
    assert!(content.chars().count() >= 900);
}

#[tokio::test]
async fn insufficient_content_everywhere_returns_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/thin"))
        .respond_with(html_response(
            "<html><body><article>短い本文だけ</article></body></html>",
        ))
        .mount(&server)
        .await;

    let adapter = GenericAdapter::new(LOOPBACK_RULE, quiet_fetcher());
    let url = format!("{}/thin", server.uri());
    assert!(adapter.enrich(&url).await.is_none());
}

#[tokio::test]
async fn noise_containers_are_stripped_from_fallback() {
    let server = MockServer::start().await;
    let body = format!(
        "<html><body><article>\
         <nav>ナビゲーション</nav>\
         <p>{}</p>\
         <div class=\"sns-share\">シェアしてください</div>\
         <footer>フッター</footer>\
         </article></body></html>",
        "記事の本文です。".repeat(80)
    );
    Mock::given(method("GET"))
        .and(path("/noisy"))
        .respond_with(html_response(&body))
        .mount(&server)
        .await;

    let adapter = GenericAdapter::new(LOOPBACK_RULE, quiet_fetcher());
    let url = format!("{}/noisy", server.uri());
    let content = adapter.enrich(&url).await.unwrap().content.unwrap();
    assert!(content.contains("記事の本文です。"));
    assert!(!content.contains("ナビゲーション"));
    assert!(!content.contains("シェアしてください"));
    assert!(!content.contains("フッター"));
}

#[tokio::test]
async fn thumbnail_only_adapter_returns_partial_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/deck"))
        .respond_with(html_response(
            "<html><head>\
             <meta name=\"twitter:image\" content=\"https://cdn.example.com/slide.jpg\">\
             </head><body>スライドの紹介ページ</body></html>",
        ))
        .mount(&server)
        .await;

    let adapter = GenericAdapter::new(THUMBNAIL_RULE, quiet_fetcher());
    let url = format!("{}/deck", server.uri());
    let enriched = adapter.enrich(&url).await.unwrap();
    assert!(enriched.content.is_none());
    assert_eq!(
        enriched.thumbnail.unwrap().as_str(),
        "https://cdn.example.com/slide.jpg"
    );
}

#[tokio::test]
async fn thumbnail_only_adapter_without_thumbnail_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bare"))
        .respond_with(html_response("<html><body>no meta tags</body></html>"))
        .mount(&server)
        .await;

    let adapter = GenericAdapter::new(THUMBNAIL_RULE, quiet_fetcher());
    let url = format!("{}/bare", server.uri());
    assert!(adapter.enrich(&url).await.is_none());
}

#[tokio::test]
async fn jsonld_adapter_extracts_article_body() {
    let server = MockServer::start().await;
    let article_body = "構造化データに埋め込まれた本文。".repeat(40);
    let body = format!(
        "<html><head><script type=\"application/ld+json\">\
         {{\"@type\":\"NewsArticle\",\"articleBody\":\"{article_body}\"}}\
         </script></head><body><p>表示用の断片</p></body></html>"
    );
    Mock::given(method("GET"))
        .and(path("/news"))
        .respond_with(html_response(&body))
        .mount(&server)
        .await;

    static HOSTS: &[&str] = &["127.0.0.1"];
    let adapter = JsonLdAdapter::new(HOSTS, quiet_fetcher());
    let url = format!("{}/news", server.uri());
    let content = adapter.enrich(&url).await.unwrap().content.unwrap();
    assert!(content.contains("構造化データに埋め込まれた本文。"));
}

#[tokio::test]
async fn fetch_failure_yields_none_not_panic() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let adapter = GenericAdapter::new(LOOPBACK_RULE, quiet_fetcher());
    let url = format!("{}/gone", server.uri());
    assert!(adapter.enrich(&url).await.is_none());
}

#[tokio::test]
async fn registry_enrich_uses_catch_all_for_unknown_host() {
    let server = MockServer::start().await;
    let body = format!(
        "<html><body><div class=\"entry-content\">{}</div></body></html>",
        "汎用アダプタで抽出できる本文。".repeat(60)
    );
    Mock::given(method("GET"))
        .and(path("/generic"))
        .respond_with(html_response(&body))
        .mount(&server)
        .await;

    let registry = registry();
    let url = format!("{}/generic", server.uri());
    let enriched = registry.enrich(&url).await.unwrap();
    assert!(enriched.content.unwrap().contains("汎用アダプタ"));
}

#[tokio::test]
async fn registry_enrich_malformed_url_returns_none() {
    let registry = registry();
    assert!(registry.enrich("::broken::").await.is_none());
}
