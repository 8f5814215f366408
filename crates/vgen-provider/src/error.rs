//! Provider error types.

use thiserror::Error;

pub type ProviderResult<T> = Result<T, ProviderError>;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Runway API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl ProviderError {
    pub fn is_retryable(&self) -> bool {
        match self {
            // A body that fails to decode will not decode on retry either
            ProviderError::Network(e) => !e.is_decode(),
            ProviderError::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}
