use serde::Serialize;

use super::characteristic::ClassificationKey;

/// The model's answer for one interaction.
#[derive(Debug, Clone, Serialize)]
pub struct Classification {
    pub key: ClassificationKey,
    pub text: String,
}

impl Classification {
    /// The text placed in the output box: the selected key, a blank line, then
    /// the model's answer.
    pub fn display_text(&self) -> String {
        format!("Selected characteristic: {}\n\n{}", self.key, self.text)
    }
}

/// What one interaction shows the user, success or failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    /// The characteristic that was applied, or the one submitted if the run
    /// failed.
    pub characteristic: Option<String>,
    /// The text shown in the result box.
    pub output: String,
    pub ok: bool,
}
