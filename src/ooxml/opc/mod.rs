//! Open Packaging Conventions (OPC) implementation.
//!
//! This module provides the pieces of the OPC specification needed to
//! assemble and inspect Office Open XML packages:
//!
//! - Package structure (parts, relationships)
//! - Content type management
//! - ZIP-based physical packaging
//!
//! Parts are held in insertion order and written to the archive in that
//! order, so a package built the same way always serializes to the same
//! bytes.

pub mod constants;
pub mod error;
pub mod package;
pub mod packuri;
pub mod part;
pub mod phys_pkg;
pub mod pkgwriter;
pub mod rel;

// Re-export commonly used types
pub use error::{OpcError, Result};
pub use package::OpcPackage;
pub use packuri::PackURI;
pub use part::Part;
pub use pkgwriter::PackageWriter;
pub use rel::{Relationship, Relationships};
