//! The single HTML page: upload form on the left, result box on the right.

use serde::Serialize;
use tera::{Context, Tera};

use lexclass_core::models::characteristic::ClassificationKey;
use lexclass_core::registry::TemplateRegistry;

const PAGE_NAME: &str = "index.html";
const PAGE_SOURCE: &str = include_str!("../templates/index.html");

/// One dropdown entry.
#[derive(Debug, Clone, Serialize)]
pub struct CharacteristicSummary {
    pub key: ClassificationKey,
    pub description: String,
    pub default: bool,
}

impl CharacteristicSummary {
    pub fn all(registry: &TemplateRegistry) -> Vec<Self> {
        registry
            .definitions()
            .map(|d| CharacteristicSummary {
                key: d.key,
                description: d.description.to_string(),
                default: d.key == ClassificationKey::DEFAULT,
            })
            .collect()
    }
}

/// Pre-parsed page template plus the static parts of its context.
pub struct IndexPage {
    tera: Tera,
    characteristics: Vec<CharacteristicSummary>,
    information: String,
}

impl IndexPage {
    pub fn new(registry: &TemplateRegistry) -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_template(PAGE_NAME, PAGE_SOURCE)?;

        Ok(Self {
            tera,
            characteristics: CharacteristicSummary::all(registry),
            information: registry.information_block(),
        })
    }

    /// Render the page with `selected` preselected in the dropdown and
    /// `output` in the result box. Values are HTML-escaped.
    pub fn render(&self, selected: &str, output: &str) -> Result<String, tera::Error> {
        let mut context = Context::new();
        context.insert("characteristics", &self.characteristics);
        context.insert("information", &self.information);
        context.insert("selected", selected);
        context.insert("output", output);
        self.tera.render(PAGE_NAME, &context)
    }
}
