use bytes::Bytes;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use url::Url;

/// A fetched page, decoded to UTF-8.
#[derive(Debug)]
pub struct PageResponse {
    /// URL after redirects.
    pub url_final: Url,
    pub status: StatusCode,
    pub body_raw: Bytes,
    pub body_utf8: String,
    pub charset: String,
    pub fetched_at: DateTime<Utc>,
}
