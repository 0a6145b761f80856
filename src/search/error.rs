use std::time::Duration;
use thiserror::Error;

/// Failure at the listings API boundary
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("request to listings API failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("listings API returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("search timed out after {0:?}")]
    Timeout(Duration),

    #[error("failed to decode listings response: {0}")]
    Decode(#[from] serde_json::Error),
}
