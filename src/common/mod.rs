//! Common types and utilities shared across the crate.
//!
//! Error types, unit conversion for PresentationML coordinates, and XML
//! text escaping used by every part writer.

// Submodule declarations
pub mod error;
pub mod unit;
pub mod xml;

// Re-exports for convenience
pub use error::{Error, Result};
pub use unit::{EMUS_PER_INCH, EMUS_PER_PT, inches_to_emu, pt_to_emu};
