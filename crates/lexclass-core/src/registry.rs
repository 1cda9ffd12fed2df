//! The characteristic → prompt template table.
//!
//! Built once at start-up and never mutated afterwards. Construction checks
//! every [`ClassificationKey`] exhaustively: each must have a definition, a
//! non-empty template that parses, and a template that actually renders the
//! document text. Any failure aborts start-up instead of surfacing later as a
//! per-request error.

use std::collections::BTreeMap;
use std::path::Path;

use tera::{Context, Tera};
use tracing::info;

use crate::error::{CoreError, PipelineError};
use crate::models::characteristic::{ClassificationDefinition, ClassificationKey, DEFINITIONS};

/// Context variable the templates receive the extracted text under.
pub const DOCUMENT_TEXT_VAR: &str = "document_text";

const PLACEHOLDER_PROBE: &str = "lexclass-placeholder-probe";

const BUILTIN_TEMPLATES: [(&str, &str); 3] = [
    ("1a1_prompt.jinja", include_str!("../templates/1a1_prompt.jinja")),
    ("2a1_prompt.jinja", include_str!("../templates/2a1_prompt.jinja")),
    ("3a1_prompt.jinja", include_str!("../templates/3a1_prompt.jinja")),
];

#[derive(Debug)]
struct Entry {
    definition: ClassificationDefinition,
    source: String,
}

/// Immutable lookup from characteristic to its template and description.
#[derive(Debug)]
pub struct TemplateRegistry {
    tera: Tera,
    entries: BTreeMap<ClassificationKey, Entry>,
}

impl TemplateRegistry {
    /// Build the registry from the templates compiled into the binary.
    pub fn builtin() -> Result<Self, CoreError> {
        let mut sources = Vec::with_capacity(DEFINITIONS.len());
        for definition in DEFINITIONS {
            let source = BUILTIN_TEMPLATES
                .iter()
                .find(|(name, _)| *name == definition.template_filename)
                .map(|(_, source)| source.to_string())
                .ok_or_else(|| CoreError::TemplateMissing {
                    path: definition.template_filename.into(),
                })?;
            sources.push((definition, source));
        }

        let registry = Self::build(sources)?;
        info!(count = registry.entries.len(), "loaded built-in prompt templates");
        Ok(registry)
    }

    /// Build the registry from `<key>_prompt.jinja` files in `dir`.
    pub fn from_dir(dir: &Path) -> Result<Self, CoreError> {
        let mut sources = Vec::with_capacity(DEFINITIONS.len());
        for definition in DEFINITIONS {
            let path = dir.join(definition.template_filename);
            let source = std::fs::read_to_string(&path).map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    CoreError::TemplateMissing { path: path.clone() }
                } else {
                    CoreError::TemplateRead {
                        path: path.clone(),
                        source: e,
                    }
                }
            })?;
            sources.push((definition, source));
        }

        let registry = Self::build(sources)?;
        info!(
            count = registry.entries.len(),
            dir = %dir.display(),
            "loaded prompt templates from directory"
        );
        Ok(registry)
    }

    fn build(sources: Vec<(ClassificationDefinition, String)>) -> Result<Self, CoreError> {
        let mut tera = Tera::default();
        // Document text goes in verbatim, whatever the template's name.
        tera.autoescape_on(Vec::new());

        let mut entries = BTreeMap::new();
        for (definition, source) in sources {
            let key = definition.key.to_string();
            if source.trim().is_empty() {
                return Err(CoreError::TemplateEmpty { key });
            }

            tera.add_raw_template(definition.template_filename, &source)
                .map_err(|e| CoreError::TemplateParse {
                    key: key.clone(),
                    message: tera_message(&e),
                })?;

            let probe = render_with(&tera, definition.template_filename, PLACEHOLDER_PROBE)
                .map_err(|e| CoreError::TemplateParse {
                    key: key.clone(),
                    message: tera_message(&e),
                })?;
            if !probe.contains(PLACEHOLDER_PROBE) {
                return Err(CoreError::MissingPlaceholder { key });
            }

            entries.insert(definition.key, Entry { definition, source });
        }

        for key in ClassificationKey::ALL {
            if !entries.contains_key(&key) {
                return Err(CoreError::UndefinedCharacteristic {
                    key: key.to_string(),
                });
            }
        }

        Ok(Self { tera, entries })
    }

    pub fn definition(&self, key: ClassificationKey) -> Option<&ClassificationDefinition> {
        self.entries.get(&key).map(|entry| &entry.definition)
    }

    /// All definitions, in the order they are offered to the user.
    pub fn definitions(&self) -> impl Iterator<Item = &ClassificationDefinition> {
        self.entries.values().map(|entry| &entry.definition)
    }

    /// Raw template text for `key`.
    pub fn template_source(&self, key: ClassificationKey) -> Option<&str> {
        self.entries.get(&key).map(|entry| entry.source.as_str())
    }

    /// Parse a user-supplied characteristic name and confirm it is registered.
    pub fn resolve(&self, name: &str) -> Result<ClassificationKey, PipelineError> {
        let key: ClassificationKey = name.parse()?;
        if self.entries.contains_key(&key) {
            Ok(key)
        } else {
            Err(PipelineError::UnsupportedCharacteristic(name.to_string()))
        }
    }

    /// One `- <key>: <description>` line per characteristic.
    pub fn information_block(&self) -> String {
        self.definitions()
            .map(|d| format!("- {}: {}", d.key, d.description))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub(crate) fn render(
        &self,
        key: ClassificationKey,
        document_text: &str,
    ) -> Result<String, PipelineError> {
        let entry = self
            .entries
            .get(&key)
            .ok_or_else(|| PipelineError::UnsupportedCharacteristic(key.to_string()))?;

        render_with(&self.tera, entry.definition.template_filename, document_text)
            .map_err(|e| PipelineError::Render(tera_message(&e)))
    }
}

fn render_with(tera: &Tera, name: &str, document_text: &str) -> tera::Result<String> {
    let mut context = Context::new();
    context.insert(DOCUMENT_TEXT_VAR, document_text);
    tera.render(name, &context)
}

/// Tera reports the useful detail in the error's source chain.
fn tera_message(e: &tera::Error) -> String {
    let mut message = e.to_string();
    let mut source = std::error::Error::source(e);
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    message
}
