//! lexclass-llm
//!
//! Chat-completion calls to an OpenAI-compatible API.

pub mod chat;
pub mod config;
pub mod error;

pub use chat::ChatClient;
pub use config::ChatConfig;
