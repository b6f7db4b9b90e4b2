//! Slide types and implementation for PPTX presentations.
use crate::ooxml::error::Result;
use crate::ooxml::pptx::layout::{LayoutKind, PlaceholderKind, SlideLayout};

use super::notes::NotesSlide;
use super::shape::MutableShape;
use super::text::TextFrame;

/// A mutable slide in a presentation.
///
/// A slide is bound to one layout for its whole life. Creating it
/// instantiates every placeholder of that layout; further text boxes can be
/// added at absolute positions.
#[derive(Debug, Clone)]
pub struct MutableSlide {
    /// Slide ID (unique identifier within `sldIdLst`)
    pub(crate) slide_id: u32,
    pub(crate) layout_kind: LayoutKind,
    pub(crate) layout_name: String,
    /// Placeholders first, in layout order, then text boxes
    pub(crate) shapes: Vec<MutableShape>,
    /// Speaker notes for the slide
    pub(crate) notes: NotesSlide,
}

impl MutableSlide {
    /// Create a slide bound to `layout`.
    pub(crate) fn new(slide_id: u32, layout: &SlideLayout) -> Self {
        // IDs: 1=group, 2.. = placeholders then user shapes
        let shapes = layout
            .placeholders()
            .iter()
            .enumerate()
            .map(|(i, spec)| MutableShape::new_placeholder(i as u32 + 2, spec))
            .collect();

        Self {
            slide_id,
            layout_kind: layout.kind(),
            layout_name: layout.name().to_string(),
            shapes,
            notes: NotesSlide::new(layout.default_notes()),
        }
    }

    /// Get the slide ID.
    #[inline]
    pub fn slide_id(&self) -> u32 {
        self.slide_id
    }

    #[inline]
    pub fn layout_kind(&self) -> LayoutKind {
        self.layout_kind
    }

    #[inline]
    pub fn layout_name(&self) -> &str {
        &self.layout_name
    }

    /// Text frame of the placeholder of `kind`, if the layout has one.
    pub fn placeholder(&self, kind: PlaceholderKind) -> Option<&TextFrame> {
        self.shapes
            .iter()
            .find(|s| s.placeholder_kind() == Some(kind))
            .map(MutableShape::text_frame)
    }

    /// Mutable text frame of the placeholder of `kind`.
    pub fn placeholder_mut(&mut self, kind: PlaceholderKind) -> Option<&mut TextFrame> {
        self.shapes
            .iter_mut()
            .find(|s| s.placeholder_kind() == Some(kind))
            .map(MutableShape::text_frame_mut)
    }

    /// Text frame of the headline placeholder, whichever title kind the
    /// layout uses.
    pub fn headline(&self) -> Option<&TextFrame> {
        self.shapes
            .iter()
            .find(|s| s.placeholder_kind().is_some_and(|k| k.is_headline()))
            .map(MutableShape::text_frame)
    }

    pub fn headline_mut(&mut self) -> Option<&mut TextFrame> {
        self.shapes
            .iter_mut()
            .find(|s| s.placeholder_kind().is_some_and(|k| k.is_headline()))
            .map(MutableShape::text_frame_mut)
    }

    /// Headline text, if the layout has a headline placeholder.
    pub fn title(&self) -> Option<String> {
        self.headline().map(TextFrame::text)
    }

    /// Add an empty text box to the slide and return it.
    pub fn add_text_box(
        &mut self,
        name: &str,
        x: i64,
        y: i64,
        width: i64,
        height: i64,
    ) -> &mut MutableShape {
        let shape_id = self.next_shape_id();
        let index = self.shapes.len();
        self.shapes
            .push(MutableShape::new_text_box(shape_id, name, x, y, width, height));
        &mut self.shapes[index]
    }

    /// Shapes that are not layout placeholders.
    pub fn text_boxes(&self) -> impl Iterator<Item = &MutableShape> {
        self.shapes.iter().filter(|s| s.placeholder_kind().is_none())
    }

    #[inline]
    pub fn shapes(&self) -> &[MutableShape] {
        &self.shapes
    }

    #[inline]
    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    /// Get the speaker notes for the slide.
    #[inline]
    pub fn notes(&self) -> &NotesSlide {
        &self.notes
    }

    #[inline]
    pub fn notes_mut(&mut self) -> &mut NotesSlide {
        &mut self.notes
    }

    fn next_shape_id(&self) -> u32 {
        self.shapes.iter().map(|s| s.shape_id).max().unwrap_or(1) + 1
    }

    /// Generate slide XML content.
    pub(crate) fn to_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(4096);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);

        xml.push_str(
            r#"<p:sld xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" "#,
        );
        xml.push_str(r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#);
        xml.push_str(
            r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
        );

        xml.push_str("<p:cSld>");
        xml.push_str("<p:spTree>");

        // Write group shape properties (required)
        xml.push_str("<p:nvGrpSpPr>");
        xml.push_str(r#"<p:cNvPr id="1" name=""/>"#);
        xml.push_str("<p:cNvGrpSpPr/>");
        xml.push_str("<p:nvPr/>");
        xml.push_str("</p:nvGrpSpPr>");
        xml.push_str("<p:grpSpPr>");
        xml.push_str("<a:xfrm>");
        xml.push_str(r#"<a:off x="0" y="0"/>"#);
        xml.push_str(r#"<a:ext cx="0" cy="0"/>"#);
        xml.push_str(r#"<a:chOff x="0" y="0"/>"#);
        xml.push_str(r#"<a:chExt cx="0" cy="0"/>"#);
        xml.push_str("</a:xfrm>");
        xml.push_str("</p:grpSpPr>");

        for shape in &self.shapes {
            shape.to_xml(&mut xml)?;
        }

        xml.push_str("</p:spTree>");
        xml.push_str("</p:cSld>");

        xml.push_str(r#"<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>"#);
        xml.push_str("</p:sld>");

        Ok(xml)
    }
}
