// file: src/api/mod.rs
// description: http surface for uploading and viewing papers
// reference: internal module structure

pub mod error;
pub mod handlers;
pub mod pages;
pub mod router;

pub use error::ApiError;
pub use router::{AppState, build_router, serve};
