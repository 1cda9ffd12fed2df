use tracing::debug;

use crate::error::PipelineError;
use crate::models::characteristic::ClassificationKey;
use crate::registry::TemplateRegistry;

/// Render the prompt template for `key` with the extracted document text.
///
/// The text is inserted unescaped and untruncated.
pub fn render_prompt(
    registry: &TemplateRegistry,
    key: ClassificationKey,
    document_text: &str,
) -> Result<String, PipelineError> {
    let rendered = registry.render(key, document_text)?;
    debug!(
        characteristic = %key,
        text_len = document_text.len(),
        prompt_len = rendered.len(),
        "rendered classification prompt"
    );
    Ok(rendered)
}

/// Like [`render_prompt`], but for a characteristic supplied as text.
///
/// Unknown names fail with [`PipelineError::UnsupportedCharacteristic`];
/// there is no fallback template.
pub fn render_named(
    registry: &TemplateRegistry,
    name: &str,
    document_text: &str,
) -> Result<String, PipelineError> {
    let key = registry.resolve(name)?;
    render_prompt(registry, key, document_text)
}
