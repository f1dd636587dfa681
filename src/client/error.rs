use thiserror::Error;

use crate::utils::{one_line, truncate};

/// Maximum number of body characters carried into an error message.
pub const MAX_BODY_IN_ERROR: usize = 300;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection refused, DNS failure, timeout, TLS error.
    #[error("Request error: {method} {endpoint} - {source}")]
    Transport {
        method: String,
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request failed: {method} {endpoint} - expected status {expected}, got {actual}: {}", truncate(&one_line(.body), MAX_BODY_IN_ERROR))]
    UnexpectedStatus {
        method: String,
        endpoint: String,
        expected: u16,
        actual: u16,
        body: String,
    },

    #[error("Failed to encode request body for {method} {endpoint}: {source}")]
    Encode {
        method: String,
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unexpected response shape from {method} {endpoint}: {source}")]
    Decode {
        method: String,
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}
