//! Presentation writer for PPTX.
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::pptx::layout::{Geometry, LayoutCatalog, LayoutKind};
use crate::ooxml::pptx::package::Package;
use std::fmt::Write as FmtWrite;
use std::io::Write;
use std::path::Path;

use super::slide::MutableSlide;

/// First `sldId` value PowerPoint accepts.
const FIRST_SLIDE_ID: u32 = 256;

/// A mutable PowerPoint presentation for writing.
///
/// Slides are created bound to a layout from the presentation's
/// [`LayoutCatalog`] and kept in insertion order.
#[derive(Debug)]
pub struct MutablePresentation {
    /// Slides in the presentation
    pub(crate) slides: Vec<MutableSlide>,
    /// Page size in EMUs
    geometry: Geometry,
    layouts: LayoutCatalog,
    /// Title written to the core properties
    title: Option<String>,
}

impl MutablePresentation {
    /// Create an empty presentation with the standard layouts.
    pub fn new(geometry: Geometry) -> Self {
        Self::with_layouts(geometry, LayoutCatalog::standard(&geometry))
    }

    /// Create an empty presentation drawing slides from `layouts`.
    pub fn with_layouts(geometry: Geometry, layouts: LayoutCatalog) -> Self {
        Self {
            slides: Vec::new(),
            geometry,
            layouts,
            title: None,
        }
    }

    /// Add a new slide bound to the layout of `kind`.
    ///
    /// Fails with [`OoxmlError::LayoutUnavailable`] when the catalog has no
    /// such layout.
    pub fn add_slide(&mut self, kind: LayoutKind) -> Result<&mut MutableSlide> {
        let layout = self
            .layouts
            .get(kind)
            .ok_or(OoxmlError::LayoutUnavailable(kind))?;
        let slide_id = FIRST_SLIDE_ID + self.slides.len() as u32;
        let index = self.slides.len();
        self.slides.push(MutableSlide::new(slide_id, layout));
        Ok(&mut self.slides[index])
    }

    /// Get the number of slides.
    #[inline]
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    #[inline]
    pub fn slides(&self) -> &[MutableSlide] {
        &self.slides
    }

    /// Get a slide by index (0-based).
    pub fn slide(&self, index: usize) -> Option<&MutableSlide> {
        self.slides.get(index)
    }

    /// Get a mutable reference to a slide by index (0-based).
    pub fn slide_mut(&mut self, index: usize) -> Option<&mut MutableSlide> {
        self.slides.get_mut(index)
    }

    #[inline]
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    #[inline]
    pub fn layouts(&self) -> &LayoutCatalog {
        &self.layouts
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Set the document title stored in the core properties.
    pub fn set_title(&mut self, title: &str) {
        self.title = Some(title.to_string());
    }

    /// Serialize the presentation to `.pptx` bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Package::from_presentation(self)?.to_bytes()
    }

    /// Serialize the presentation into `writer`.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        Package::from_presentation(self)?.write_to(writer)
    }

    /// Save the presentation to `path`, replacing any existing file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        Package::from_presentation(self)?.save(path)
    }

    /// Generate presentation.xml content with actual relationship IDs.
    ///
    /// # Arguments
    /// * `master_rel_id` - Relationship ID of the slide master
    /// * `notes_master_rel_id` - Relationship ID of the notes master
    /// * `slide_rel_ids` - Relationship IDs of the slides, in slide order
    pub(crate) fn generate_presentation_xml(
        &self,
        master_rel_id: &str,
        notes_master_rel_id: &str,
        slide_rel_ids: &[String],
    ) -> Result<String> {
        if slide_rel_ids.len() != self.slides.len() {
            return Err(OoxmlError::Xml(format!(
                "expected {} slide relationship IDs, got {}",
                self.slides.len(),
                slide_rel_ids.len()
            )));
        }

        let mut xml = String::with_capacity(1024 + self.slides.len() * 48);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(r#"<p:presentation xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" saveSubsetFonts="1">"#);

        // Write slide master ID list
        xml.push_str("<p:sldMasterIdLst>");
        write!(xml, r#"<p:sldMasterId id="2147483648" r:id="{}"/>"#, master_rel_id)?;
        xml.push_str("</p:sldMasterIdLst>");

        write!(
            xml,
            r#"<p:notesMasterIdLst><p:notesMasterId r:id="{}"/></p:notesMasterIdLst>"#,
            notes_master_rel_id
        )?;

        // Write slide ID list
        if !self.slides.is_empty() {
            xml.push_str("<p:sldIdLst>");
            for (slide, rel_id) in self.slides.iter().zip(slide_rel_ids) {
                write!(
                    xml,
                    r#"<p:sldId id="{}" r:id="{}"/>"#,
                    slide.slide_id(),
                    rel_id
                )?;
            }
            xml.push_str("</p:sldIdLst>");
        }

        // Write slide size
        write!(
            xml,
            r#"<p:sldSz cx="{}" cy="{}"/>"#,
            self.geometry.width, self.geometry.height
        )?;

        xml.push_str(r#"<p:notesSz cx="6858000" cy="9144000"/>"#);
        xml.push_str("<p:defaultTextStyle>");
        xml.push_str(r#"<a:defPPr><a:defRPr lang="en-US"/></a:defPPr>"#);
        xml.push_str("</p:defaultTextStyle>");
        xml.push_str("</p:presentation>");

        Ok(xml)
    }
}

impl Default for MutablePresentation {
    fn default() -> Self {
        Self::new(Geometry::default())
    }
}
