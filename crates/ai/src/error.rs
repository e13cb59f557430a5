use thiserror::Error;

#[derive(Debug, Error)]
pub enum AiError {
    #[error("invalid prompt input: {0}")]
    InvalidInput(String),

    #[error("generation request failed: {0}")]
    RequestFailed(String),

    #[error("generation returned no text")]
    EmptyResponse,
}
