//! lexclass-extract
//!
//! Plain-text extraction from uploaded PDF documents.

pub mod error;
#[cfg(feature = "fixtures")]
pub mod fixtures;
pub mod pdf;

pub use pdf::PdfExtractor;
