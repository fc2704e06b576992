//! Core traits for scribe collaborators.

mod document_store;
mod embedder;

pub use document_store::*;
pub use embedder::*;
