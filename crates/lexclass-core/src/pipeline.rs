//! The classification interaction: extract → render → classify.
//!
//! [`Pipeline::handle`] is what the HTTP routes and the CLI call. It takes
//! the uploaded file and the selected characteristic and always returns an
//! [`Outcome`] carrying the text for the output box, success or failure. Extraction and model calls go
//! through [`TextExtractor`] and [`Classifier`] so tests can substitute
//! counting stubs.
//!
//! Everything here is synchronous. The classifier performs one blocking
//! network call bounded by its own timeout; async callers run the pipeline on
//! a blocking thread.

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use crate::error::PipelineError;
use crate::models::characteristic::ClassificationKey;
use crate::models::classification::{Classification, Outcome};
use crate::models::document::DocumentUpload;
use crate::registry::TemplateRegistry;
use crate::render::render_prompt;

/// System instruction sent with every classification request.
pub const SYSTEM_PROMPT: &str = "\
You are an expert legal document assistant who helps generate professional legal documents.
Analyze the user's requirements and enhance them with proper legal language and structure.";

/// Turns an uploaded file into plain text.
pub trait TextExtractor: Send + Sync {
    fn extract_text(&self, document: &DocumentUpload) -> Result<String, PipelineError>;

    /// No document yields empty text.
    fn extract_optional(
        &self,
        document: Option<&DocumentUpload>,
    ) -> Result<String, PipelineError> {
        match document {
            Some(document) => self.extract_text(document),
            None => Ok(String::new()),
        }
    }
}

/// Sends a system instruction and a user message to a language model and
/// returns the first answer's text.
pub trait Classifier: Send + Sync {
    fn classify(&self, system_prompt: &str, user_prompt: &str) -> Result<String, PipelineError>;
}

#[derive(Clone)]
pub struct Pipeline {
    registry: Arc<TemplateRegistry>,
    extractor: Arc<dyn TextExtractor>,
    classifier: Arc<dyn Classifier>,
}

impl Pipeline {
    pub fn new(
        registry: Arc<TemplateRegistry>,
        extractor: Arc<dyn TextExtractor>,
        classifier: Arc<dyn Classifier>,
    ) -> Self {
        Self {
            registry,
            extractor,
            classifier,
        }
    }

    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    /// Run one interaction.
    ///
    /// A missing document fails before anything else runs. A missing or
    /// blank characteristic selects [`ClassificationKey::DEFAULT`].
    pub fn run(
        &self,
        document: Option<&DocumentUpload>,
        characteristic: Option<&str>,
    ) -> Result<Classification, PipelineError> {
        let document = document.ok_or(PipelineError::NoDocument)?;

        let key = match characteristic.map(str::trim) {
            Some(name) if !name.is_empty() => self.registry.resolve(name)?,
            _ => ClassificationKey::DEFAULT,
        };

        let started = Instant::now();
        info!(
            characteristic = %key,
            filename = %document.filename,
            size = document.bytes.len(),
            "classification started"
        );

        let document_text = self.extractor.extract_text(document)?;
        let user_prompt = render_prompt(&self.registry, key, &document_text)?;
        let text = self.classifier.classify(SYSTEM_PROMPT, &user_prompt)?;

        info!(
            characteristic = %key,
            text_len = document_text.len(),
            response_len = text.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "classification complete"
        );

        Ok(Classification { key, text })
    }

    /// Run one interaction and format the outcome for display.
    pub fn handle(
        &self,
        document: Option<&DocumentUpload>,
        characteristic: Option<&str>,
    ) -> Outcome {
        match self.run(document, characteristic) {
            Ok(classification) => Outcome {
                characteristic: Some(classification.key.to_string()),
                output: classification.display_text(),
                ok: true,
            },
            Err(e) => {
                warn!(error = %e, "classification failed");
                Outcome {
                    characteristic: characteristic.map(str::to_string),
                    output: e.display_text(),
                    ok: false,
                }
            }
        }
    }
}
