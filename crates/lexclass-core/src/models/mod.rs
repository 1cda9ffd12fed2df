pub mod characteristic;
pub mod classification;
pub mod document;
