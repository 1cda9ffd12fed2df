//! Process configuration.
//!
//! Every option can be given as a flag or through its environment variable;
//! `main` loads a `.env` file before parsing so both sources see it. The API
//! key is only demanded by commands that call the model, and its absence
//! stops those commands before any request is served.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Args;
use eyre::{Result, eyre};

use lexclass_core::pipeline::Pipeline;
use lexclass_core::registry::TemplateRegistry;
use lexclass_extract::PdfExtractor;
use lexclass_llm::config::{DEFAULT_BASE_URL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL};
use lexclass_llm::{ChatClient, ChatConfig};

const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Settings shared by every subcommand.
#[derive(Args)]
pub struct Settings {
    /// API key for the chat-completion service.
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Base URL of the OpenAI-compatible API.
    #[arg(long, env = "OPENAI_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub base_url: String,

    /// Model used for classification.
    #[arg(long, env = "LEXCLASS_MODEL", default_value = DEFAULT_MODEL, global = true)]
    pub model: String,

    /// Output length cap for each classification.
    #[arg(long, env = "LEXCLASS_MAX_TOKENS", default_value_t = DEFAULT_MAX_TOKENS, global = true)]
    pub max_tokens: u32,

    /// Seconds to wait for the model before giving up.
    #[arg(long, env = "LEXCLASS_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS, global = true)]
    pub timeout_secs: u64,

    /// Directory of `<key>_prompt.jinja` files replacing the built-in prompts.
    #[arg(long, env = "LEXCLASS_TEMPLATE_DIR", global = true)]
    pub template_dir: Option<PathBuf>,
}

impl Settings {
    pub fn chat_config(&self) -> Result<ChatConfig> {
        let api_key = self
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| eyre!("OPENAI_API_KEY is not set; classification needs an API key"))?;

        Ok(ChatConfig::new(api_key)
            .with_base_url(&self.base_url)
            .with_model(&self.model)
            .with_max_tokens(self.max_tokens)
            .with_timeout(Duration::from_secs(self.timeout_secs)))
    }

    /// Load and validate every prompt template.
    pub fn registry(&self) -> Result<TemplateRegistry> {
        let registry = match &self.template_dir {
            Some(dir) => TemplateRegistry::from_dir(dir)?,
            None => TemplateRegistry::builtin()?,
        };
        Ok(registry)
    }

    /// Build the full extract → render → classify pipeline.
    pub fn pipeline(&self) -> Result<Pipeline> {
        let registry = Arc::new(self.registry()?);
        let classifier = ChatClient::new(self.chat_config()?)?;
        Ok(Pipeline::new(
            registry,
            Arc::new(PdfExtractor::new()),
            Arc::new(classifier),
        ))
    }
}
