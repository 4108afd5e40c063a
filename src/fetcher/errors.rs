use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("connect timeout")]
    ConnectTimeout,

    #[error("request timeout")]
    RequestTimeout,

    #[error("too many redirects")]
    RedirectLoop,

    #[error("rate limited (429)")]
    RateLimited,

    #[error("http error {status}")]
    Http {
        status: reqwest::StatusCode,
        retriable: bool,
    },

    #[error("body too large ({0} bytes)")]
    BodyTooLarge(u64),

    #[error("unsupported content-type: {0}")]
    UnsupportedContentType(String),

    #[error("charset error: {0}")]
    Charset(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("io error: {0}")]
    Io(String),

    #[error("unknown: {0}")]
    Unknown(String),
}

impl FetchError {
    /// Whether retrying the same request can reasonably succeed.
    ///
    /// Rate limiting is handled separately by the retry loop (fixed long
    /// backoff, exempt from the exponential schedule).
    pub fn should_retry(&self) -> bool {
        match self {
            // Fatal errors - don't retry
            Self::InvalidUrl(_) => false,
            Self::BodyTooLarge(_) => false,
            Self::UnsupportedContentType(_) => false,
            Self::Charset(_) => false,
            Self::Http { retriable, .. } => *retriable,

            // Temporary errors - retry
            Self::ConnectTimeout => true,
            Self::RequestTimeout => true,
            Self::RedirectLoop => true,
            Self::RateLimited => true,
            Self::Network(_) => true,
            Self::Io(_) => true,
            Self::Unknown(_) => true,
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited)
    }

    pub fn from_reqwest_error(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            if err.is_connect() {
                Self::ConnectTimeout
            } else {
                Self::RequestTimeout
            }
        } else if err.is_redirect() {
            Self::RedirectLoop
        } else if let Some(status) = err.status() {
            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                Self::RateLimited
            } else {
                Self::Http {
                    status,
                    retriable: status.is_server_error(),
                }
            }
        } else if err.is_request() {
            // DNS, connection errors
            Self::Network(err.to_string())
        } else {
            Self::Unknown(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retry_classification() {
        assert!(!FetchError::InvalidUrl(url::ParseError::EmptyHost).should_retry());
        assert!(!FetchError::BodyTooLarge(1000).should_retry());
        assert!(!FetchError::UnsupportedContentType("image/png".into()).should_retry());
        assert!(FetchError::ConnectTimeout.should_retry());
        assert!(FetchError::RequestTimeout.should_retry());
        assert!(FetchError::RateLimited.should_retry());
        assert!(
            !FetchError::Http {
                status: reqwest::StatusCode::NOT_FOUND,
                retriable: false,
            }
            .should_retry()
        );
        assert!(
            FetchError::Http {
                status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                retriable: true,
            }
            .should_retry()
        );
    }
}
