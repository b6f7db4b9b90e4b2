//! Office Open XML (OOXML) format implementation.
//!
//! The module is organized into two layers:
//!
//! 1. **OPC Layer** (`opc`): Low-level package handling (ZIP, parts, relationships)
//! 2. **PresentationML** (`pptx`): layouts, slides, notes and package assembly
//!    for PowerPoint presentations
//!
//! Errors from both layers surface as [`OoxmlError`].
pub mod error;
pub mod opc;
pub mod pptx;

// Re-export commonly used types from OPC layer
pub use opc::{OpcPackage, PackURI};

// Re-export error types
pub use error::{OoxmlError, Result};
