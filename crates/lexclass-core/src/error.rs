use std::path::PathBuf;

use thiserror::Error;

/// Failures while building the template registry at start-up.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("template not found: {}", path.display())]
    TemplateMissing { path: PathBuf },

    #[error("failed to read template {}: {source}", path.display())]
    TemplateRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no definition registered for characteristic {key}")]
    UndefinedCharacteristic { key: String },

    #[error("template for {key} is empty")]
    TemplateEmpty { key: String },

    #[error("template parse error for {key}: {message}")]
    TemplateParse { key: String, message: String },

    #[error("template for {key} does not render the document text")]
    MissingPlaceholder { key: String },
}

/// Failures of a single classification interaction.
///
/// Every variant is shown to the user as text in the output area.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Please upload a document.")]
    NoDocument,

    #[error("document read failed: {0}")]
    DocumentRead(String),

    #[error("unsupported characteristic: {0}")]
    UnsupportedCharacteristic(String),

    #[error("prompt rendering failed: {0}")]
    Render(String),

    #[error("classification request failed: {0}")]
    Classification(String),
}

impl PipelineError {
    /// The text placed in the output box when an interaction fails.
    pub fn display_text(&self) -> String {
        format!("Error: {self}")
    }
}
