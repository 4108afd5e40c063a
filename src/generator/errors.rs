use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("api error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("request failed: {0}")]
    Request(String),

    #[error("malformed response: {0}")]
    Validation(String),

    #[error("quality gate not met: score {score} < {minimum}")]
    QualityGate { score: u32, minimum: u32 },

    #[error("generation failed after {attempts} attempts: {last_error}")]
    Exhausted { attempts: u32, last_error: String },
}

impl GenerationError {
    /// Rate-limit/quota signature match; these failures get a longer pause
    /// before the next attempt. Only API responses are inspected: transport
    /// error text embeds the endpoint URL, where "generateContent" would
    /// false-positive a substring scan.
    pub fn looks_rate_limited(&self) -> bool {
        let Self::Api { status, body } = self else {
            return false;
        };
        if matches!(status, 429 | 503) {
            return true;
        }
        let lower = body.to_ascii_lowercase();
        ["rate", "quota"].iter().any(|needle| lower.contains(needle))
    }
}
