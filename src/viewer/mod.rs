// file: src/viewer/mod.rs
// description: presentation of hydrated paper trees
// reference: internal module structure

pub mod html;
pub mod layout;
pub mod text;

pub use html::HtmlViewer;
pub use layout::{OrderedPaper, OrderedQuestion, order_tree};
pub use text::TextViewer;
