//! Core types for scribe.

mod embedding;
mod extraction;

pub use embedding::*;
pub use extraction::*;
