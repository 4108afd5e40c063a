//! Bounded-retry fetch used by every extraction adapter.
//!
//! Transient failures back off exponentially; HTTP 429 gets a dedicated long
//! backoff that does not consume the regular attempt budget. Every successful
//! fetch is followed by a fixed politeness delay to throttle the request rate
//! against a single origin.

use crate::fetcher::{client, errors::FetchError, types::PageResponse};
use crate::sleeper::{Sleeper, TokioSleeper};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

#[derive(Debug, Clone)]
pub struct FetchPolicy {
    /// Attempts counted against transient (non-429) failures.
    pub max_attempts: u32,
    /// Base delay for the exponential schedule: `base * 2^(attempt-1)`.
    pub base_delay: Duration,
    /// Fixed long delay after a 429 response.
    pub rate_limit_delay: Duration,
    /// Cap on consecutive 429 retries, so a permanently throttling origin
    /// cannot loop forever.
    pub max_rate_limit_retries: u32,
    /// Fixed delay after every successful fetch.
    pub politeness_delay: Duration,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(2),
            rate_limit_delay: Duration::from_secs(30),
            max_rate_limit_retries: 3,
            politeness_delay: Duration::from_millis(1500),
        }
    }
}

/// Exponential backoff delay for a 1-based attempt number.
pub fn backoff_delay(attempt: u32, base: Duration) -> Duration {
    // Cap the exponent to prevent overflow
    let exponent = attempt.saturating_sub(1).min(10);
    base.saturating_mul(2_u32.saturating_pow(exponent))
}

pub struct Fetcher {
    policy: FetchPolicy,
    sleeper: Arc<dyn Sleeper>,
}

impl Fetcher {
    pub fn new() -> Self {
        Self::with_policy(FetchPolicy::default())
    }

    pub fn with_policy(policy: FetchPolicy) -> Self {
        Self {
            policy,
            sleeper: Arc::new(TokioSleeper),
        }
    }

    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn policy(&self) -> &FetchPolicy {
        &self.policy
    }

    /// Fetch `url`, retrying transient failures per the policy. The last
    /// error is surfaced once the attempt budget is exhausted.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn fetch(&self, url: &str) -> Result<PageResponse, FetchError> {
        let mut attempt: u32 = 0;
        let mut rate_limit_retries: u32 = 0;

        loop {
            match client::fetch_once(url).await {
                Ok(response) => {
                    self.sleeper.sleep(self.policy.politeness_delay).await;
                    return Ok(response);
                }
                Err(FetchError::RateLimited)
                    if rate_limit_retries < self.policy.max_rate_limit_retries =>
                {
                    // 429 is exempt from the exponential schedule and the
                    // regular attempt budget.
                    rate_limit_retries += 1;
                    warn!(
                        retries = rate_limit_retries,
                        "rate limited, backing off {:?}", self.policy.rate_limit_delay
                    );
                    self.sleeper.sleep(self.policy.rate_limit_delay).await;
                }
                Err(err) => {
                    attempt += 1;
                    if !err.should_retry() || attempt >= self.policy.max_attempts {
                        return Err(err);
                    }
                    let delay = backoff_delay(attempt, self.policy.base_delay);
                    debug!(attempt, error = %err, "fetch failed, retrying in {:?}", delay);
                    self.sleeper.sleep(delay).await;
                }
            }
        }
    }
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new()
    }
}
