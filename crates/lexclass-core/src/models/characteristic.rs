use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// A classification characteristic the user can select.
///
/// The set is fixed at compile time; each variant owns exactly one
/// [`ClassificationDefinition`] in the template registry.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum ClassificationKey {
    #[default]
    #[serde(rename = "1a1")]
    Type1a1,
    #[serde(rename = "2a1")]
    Type2a1,
    #[serde(rename = "3a1")]
    Type3a1,
}

impl ClassificationKey {
    /// Every key, in the order they are offered to the user.
    pub const ALL: [ClassificationKey; 3] = [Self::Type1a1, Self::Type2a1, Self::Type3a1];

    /// The key selected when the user makes no choice.
    pub const DEFAULT: ClassificationKey = Self::Type1a1;

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Type1a1 => "1a1",
            Self::Type2a1 => "2a1",
            Self::Type3a1 => "3a1",
        }
    }
}

impl fmt::Display for ClassificationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClassificationKey {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s.trim())
            .ok_or_else(|| PipelineError::UnsupportedCharacteristic(s.to_string()))
    }
}

/// Static description of one characteristic: which template it renders and
/// what it means.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationDefinition {
    pub key: ClassificationKey,
    pub template_filename: &'static str,
    pub description: &'static str,
}

/// The built-in characteristic table.
pub const DEFINITIONS: [ClassificationDefinition; 3] = [
    ClassificationDefinition {
        key: ClassificationKey::Type1a1,
        template_filename: "1a1_prompt.jinja",
        description: "Classification type 1a1 for legal documents",
    },
    ClassificationDefinition {
        key: ClassificationKey::Type2a1,
        template_filename: "2a1_prompt.jinja",
        description: "Classification type 2a1 for legal documents",
    },
    ClassificationDefinition {
        key: ClassificationKey::Type3a1,
        template_filename: "3a1_prompt.jinja",
        description: "Classification type 3a1 for legal documents",
    },
];
