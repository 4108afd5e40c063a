use crate::fetcher::{errors::FetchError, types::PageResponse};
use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::{Client, ClientBuilder, StatusCode};
use std::time::Duration;
use tracing::instrument;

const MAX_BODY_SIZE: u64 = 5 * 1024 * 1024; // 5MB
const USER_AGENT: &str = "MatomeBot/0.1 (+https://matome.example.com)";

static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(30))
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(10))
        .default_headers({
            let mut headers = reqwest::header::HeaderMap::new();
            headers.insert(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"
                    .parse()
                    .unwrap(),
            );
            headers.insert(
                reqwest::header::ACCEPT_LANGUAGE,
                "ja,en-US;q=0.8,en;q=0.6".parse().unwrap(),
            );
            headers
        })
        .build()
        .expect("Failed to build HTTP client")
});

static CHARSET_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).unwrap());

/// Single fetch attempt with no retry. Retry policy lives in [`super::retry`].
#[instrument(skip_all, fields(url = %url))]
pub async fn fetch_once(url: &str) -> Result<PageResponse, FetchError> {
    let parsed_url = url::Url::parse(url)?;

    let response = HTTP_CLIENT
        .get(parsed_url)
        .send()
        .await
        .map_err(FetchError::from_reqwest_error)?;

    // Check content length before downloading
    if let Some(content_length) = response.content_length()
        && content_length > MAX_BODY_SIZE
    {
        return Err(FetchError::BodyTooLarge(content_length));
    }

    let final_url = response.url().clone();
    let status = response.status();

    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(FetchError::RateLimited);
    }
    if !status.is_success() {
        return Err(FetchError::Http {
            status,
            retriable: status.is_server_error(),
        });
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|ct| ct.to_str().ok())
        .unwrap_or("text/html")
        .to_string();

    if !content_type.contains("text/html") && !content_type.contains("application/xhtml") {
        return Err(FetchError::UnsupportedContentType(content_type));
    }

    let body_bytes = response
        .bytes()
        .await
        .map_err(|e| FetchError::Io(e.to_string()))?;

    // Check body size after download (in case Content-Length was missing)
    if body_bytes.len() as u64 > MAX_BODY_SIZE {
        return Err(FetchError::BodyTooLarge(body_bytes.len() as u64));
    }

    let (body_utf8, charset) = decode_body(&body_bytes, &content_type)?;

    Ok(PageResponse {
        url_final: final_url,
        status,
        body_raw: body_bytes,
        body_utf8,
        charset,
        fetched_at: Utc::now(),
    })
}

/// Decode the body to UTF-8, using the Content-Type charset when declared and
/// a heuristic detector otherwise. Japanese sources still serve Shift_JIS and
/// EUC-JP often enough that assuming UTF-8 loses articles.
fn decode_body(body_bytes: &[u8], content_type: &str) -> Result<(String, String), FetchError> {
    let encoding = CHARSET_REGEX
        .captures(content_type)
        .and_then(|caps| caps.get(1))
        .and_then(|label| encoding_rs::Encoding::for_label(label.as_str().as_bytes()))
        .unwrap_or_else(|| {
            let mut detector = chardetng::EncodingDetector::new();
            detector.feed(&body_bytes[..body_bytes.len().min(4096)], false);
            detector.guess(None, true)
        });

    let (decoded, used, had_errors) = encoding.decode(body_bytes);
    if had_errors {
        return Err(FetchError::Charset(format!(
            "failed to decode content with encoding: {}",
            used.name()
        )));
    }
    Ok((decoded.into_owned(), used.name().to_string()))
}
