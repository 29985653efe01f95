// file: src/extractor/mod.rs
// description: question extraction module exports
// reference: internal module structure

pub mod patterns;
pub mod questions;

pub use questions::{QuestionExtractor, extract_questions};
