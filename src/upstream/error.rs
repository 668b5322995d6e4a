use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API request returned non-200 status code: {status}")]
    Http { status: u16 },

    #[error("Invalid response: {0}")]
    Parse(#[from] serde_json::Error),
}
