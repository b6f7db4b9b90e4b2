//! Error taxonomy of the rendering engine.
use crate::ooxml::error::OoxmlError;
use crate::ooxml::pptx::layout::{LayoutKind, PlaceholderKind};
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for deckwright operations.
///
/// Every variant is terminal: the renderer performs no retries and never
/// hands out a partially rendered document.
#[derive(Error, Debug)]
pub enum Error {
    /// The document-building capability cannot supply a required layout.
    #[error("Layout unavailable: no {0} layout in the catalog")]
    LayoutUnavailable(LayoutKind),

    /// A selected layout lacks a region the slide kind needs.
    #[error("Placeholder missing: layout '{layout}' has no {placeholder} region")]
    PlaceholderMissing {
        layout: String,
        placeholder: PlaceholderKind,
    },

    /// The destination could not be created or written.
    #[error("Failed to persist document to {}: {source}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A slide plan source could not be decoded.
    #[error("Invalid slide plan: {0}")]
    Plan(String),

    /// Package serialization error
    #[error("OOXML error: {0}")]
    Ooxml(OoxmlError),
}

/// Result type for deckwright operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Build a [`Error::Persistence`] for `path`.
    pub(crate) fn persistence(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Persistence {
            path: path.into(),
            source,
        }
    }
}
