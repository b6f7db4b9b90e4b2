//! Unified error types for deckwright.
//!
//! The renderer and the persist step report failures through [`Error`];
//! writer-layer errors from `ooxml` are converted into it.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{Error, Result};
