//! Writing rendered documents to disk.
use crate::common::error::{Error, Result};
use crate::render::Document;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Write `document` to `destination` as a `.pptx` file.
///
/// Missing parent directories are created and an existing file is
/// replaced. On failure the document is left untouched and can be persisted
/// again elsewhere.
pub fn persist<P: AsRef<Path>>(document: &Document, destination: P) -> Result<()> {
    let path = destination.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            warn!(path = %path.display(), error = %e, "Cannot create destination directory");
            Error::persistence(path, e)
        })?;
    }

    let bytes = document.to_bytes()?;
    fs::write(path, &bytes).map_err(|e| {
        warn!(path = %path.display(), error = %e, "Cannot write document");
        Error::persistence(path, e)
    })?;

    info!(
        path = %path.display(),
        bytes = bytes.len(),
        slides = document.slide_count(),
        "Persisted document"
    );
    Ok(())
}
