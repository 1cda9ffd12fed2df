use thiserror::Error;

use lexclass_core::error::PipelineError;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("invalid client configuration: {0}")]
    Config(String),

    #[error("request failed: {0}")]
    Request(String),

    #[error("request timed out")]
    Timeout,

    #[error("API returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("response parsing failed: {0}")]
    ResponseParse(String),

    #[error("response contained no choices")]
    NoChoices,

    #[error("first choice has no text content")]
    NoContent,
}

impl From<ureq::Error> for LlmError {
    fn from(e: ureq::Error) -> Self {
        match e {
            ureq::Error::Timeout(_) => LlmError::Timeout,
            other => LlmError::Request(other.to_string()),
        }
    }
}

impl From<LlmError> for PipelineError {
    fn from(e: LlmError) -> Self {
        PipelineError::Classification(e.to_string())
    }
}
