//! Rendered documents.
use crate::common::error::Result;
use crate::ooxml::pptx::{Geometry, MutablePresentation, MutableSlide};
use std::io::Write;

/// A fully rendered presentation.
///
/// Produced by [`Renderer::render`](crate::render::Renderer::render); the
/// slides can be inspected but no longer changed.
#[derive(Debug)]
pub struct Document {
    presentation: MutablePresentation,
}

impl Document {
    pub(crate) fn new(presentation: MutablePresentation) -> Self {
        Self { presentation }
    }

    #[inline]
    pub fn slides(&self) -> &[MutableSlide] {
        self.presentation.slides()
    }

    /// Slide at zero-based `index`.
    pub fn slide(&self, index: usize) -> Option<&MutableSlide> {
        self.presentation.slide(index)
    }

    #[inline]
    pub fn slide_count(&self) -> usize {
        self.presentation.slide_count()
    }

    #[inline]
    pub fn geometry(&self) -> Geometry {
        self.presentation.geometry()
    }

    pub fn title(&self) -> Option<&str> {
        self.presentation.title()
    }

    /// The underlying presentation writer.
    #[inline]
    pub fn presentation(&self) -> &MutablePresentation {
        &self.presentation
    }

    /// Serialize to `.pptx` bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.presentation.to_bytes()?)
    }

    /// Serialize into `writer`.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        Ok(self.presentation.write_to(writer)?)
    }
}
