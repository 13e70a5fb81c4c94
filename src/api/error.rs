/// Error type for task API calls
///
/// The store treats every variant the same way (log, leave state alone); the
/// split only matters for messages and for callers that want to tell a dead
/// server from a refusing one.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid api url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("api rejected request: {message}")]
    Rejected { message: String },
    #[error("api response is missing `{0}`")]
    MissingPayload(&'static str),
}

impl ApiError {
    /// True when the API answered but said no (`success: false`)
    pub fn is_rejection(&self) -> bool {
        matches!(self, ApiError::Rejected { .. })
    }
}
