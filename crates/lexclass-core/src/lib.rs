//! lexclass-core
//!
//! Classification characteristics, prompt templates, and the interaction
//! pipeline. No HTTP or PDF dependency; extraction and model invocation are
//! plugged in through the traits in [`pipeline`].

pub mod error;
pub mod models;
pub mod pipeline;
pub mod registry;
pub mod render;
