use thiserror::Error;

use lexclass_core::error::PipelineError;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("{filename} is not a readable PDF: {message}")]
    DocumentRead { filename: String, message: String },

    #[error("failed to extract text from page {page} of {filename}: {message}")]
    PageText {
        filename: String,
        page: u32,
        message: String,
    },
}

impl From<ExtractError> for PipelineError {
    fn from(e: ExtractError) -> Self {
        PipelineError::DocumentRead(e.to_string())
    }
}
