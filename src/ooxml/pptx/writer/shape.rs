//! Shape types and implementation for PPTX presentations.
use crate::common::xml::push_escaped_text;
use crate::ooxml::error::Result;
use crate::ooxml::pptx::layout::{PlaceholderKind, PlaceholderSpec};
use std::fmt::Write as FmtWrite;

use super::text::TextFrame;

/// A text-bearing shape on a slide.
#[derive(Debug, Clone)]
pub struct MutableShape {
    /// Shape ID, unique within the slide
    pub(crate) shape_id: u32,
    /// Shape name (`cNvPr/@name`)
    pub(crate) name: String,
    /// Shape type
    pub(crate) shape_type: ShapeType,
    pub(crate) text_frame: TextFrame,
}

#[derive(Debug, Clone)]
pub(crate) enum ShapeType {
    /// Placeholder inheriting its position from the layout
    Placeholder { kind: PlaceholderKind },
    /// Free-form text box at an absolute position
    TextBox {
        x: i64,
        y: i64,
        width: i64,
        height: i64,
    },
}

impl MutableShape {
    /// Instantiate a layout placeholder. The text frame starts out holding
    /// the layout's prompt text.
    pub(crate) fn new_placeholder(shape_id: u32, spec: &PlaceholderSpec) -> Self {
        let text_frame = spec
            .prompt
            .as_deref()
            .map(TextFrame::from_text)
            .unwrap_or_default();
        Self {
            shape_id,
            name: spec.name.clone(),
            shape_type: ShapeType::Placeholder { kind: spec.kind },
            text_frame,
        }
    }

    /// Create a new, empty text box shape.
    pub(crate) fn new_text_box(
        shape_id: u32,
        name: &str,
        x: i64,
        y: i64,
        width: i64,
        height: i64,
    ) -> Self {
        Self {
            shape_id,
            name: name.to_string(),
            shape_type: ShapeType::TextBox {
                x,
                y,
                width,
                height,
            },
            text_frame: TextFrame::new(),
        }
    }

    #[inline]
    pub fn shape_id(&self) -> u32 {
        self.shape_id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The placeholder kind, or `None` for a free-form text box.
    pub fn placeholder_kind(&self) -> Option<PlaceholderKind> {
        match self.shape_type {
            ShapeType::Placeholder { kind } => Some(kind),
            ShapeType::TextBox { .. } => None,
        }
    }

    /// Absolute `(x, y, width, height)` of a text box. Placeholders take
    /// theirs from the layout and return `None`.
    pub fn bounds(&self) -> Option<(i64, i64, i64, i64)> {
        match self.shape_type {
            ShapeType::TextBox {
                x,
                y,
                width,
                height,
            } => Some((x, y, width, height)),
            ShapeType::Placeholder { .. } => None,
        }
    }

    #[inline]
    pub fn text_frame(&self) -> &TextFrame {
        &self.text_frame
    }

    #[inline]
    pub fn text_frame_mut(&mut self) -> &mut TextFrame {
        &mut self.text_frame
    }

    /// Generate `<p:sp>` XML for this shape.
    pub(crate) fn to_xml(&self, xml: &mut String) -> Result<()> {
        xml.push_str("<p:sp>");
        xml.push_str("<p:nvSpPr>");
        write!(xml, r#"<p:cNvPr id="{}" name=""#, self.shape_id)?;
        push_escaped_text(xml, &self.name);
        xml.push_str(r#""/>"#);

        match self.shape_type {
            ShapeType::Placeholder { kind } => {
                xml.push_str(r#"<p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>"#);
                xml.push_str("<p:nvPr>");
                write_ph(xml, kind)?;
                xml.push_str("</p:nvPr>");
                xml.push_str("</p:nvSpPr>");
                xml.push_str("<p:spPr/>");

                xml.push_str("<p:txBody>");
                xml.push_str("<a:bodyPr/>");
            },
            ShapeType::TextBox {
                x,
                y,
                width,
                height,
            } => {
                xml.push_str(r#"<p:cNvSpPr txBox="1"/>"#);
                xml.push_str("<p:nvPr/>");
                xml.push_str("</p:nvSpPr>");

                xml.push_str("<p:spPr>");
                write_xfrm(xml, x, y, width, height);
                xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#);
                xml.push_str("<a:noFill/>");
                xml.push_str("</p:spPr>");

                xml.push_str("<p:txBody>");
                xml.push_str(r#"<a:bodyPr wrap="none" rtlCol="0">"#);
                xml.push_str("<a:spAutoFit/>");
                xml.push_str("</a:bodyPr>");
            },
        }

        xml.push_str("<a:lstStyle/>");
        self.text_frame.write_paragraphs(xml)?;
        xml.push_str("</p:txBody>");
        xml.push_str("</p:sp>");

        Ok(())
    }
}

/// Write a `<p:ph>` element for `kind`.
pub(crate) fn write_ph(xml: &mut String, kind: PlaceholderKind) -> Result<()> {
    write!(xml, r#"<p:ph type="{}""#, kind.ph_type())?;
    if let Some(idx) = kind.idx() {
        write!(xml, r#" idx="{}""#, idx)?;
    }
    xml.push_str("/>");
    Ok(())
}

/// Write an `<a:xfrm>` element.
pub(crate) fn write_xfrm(xml: &mut String, x: i64, y: i64, width: i64, height: i64) {
    let mut buf = itoa::Buffer::new();
    xml.push_str(r#"<a:xfrm><a:off x=""#);
    xml.push_str(buf.format(x));
    xml.push_str(r#"" y=""#);
    xml.push_str(buf.format(y));
    xml.push_str(r#""/><a:ext cx=""#);
    xml.push_str(buf.format(width));
    xml.push_str(r#"" cy=""#);
    xml.push_str(buf.format(height));
    xml.push_str(r#""/></a:xfrm>"#);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::pptx::writer::text::Alignment;

    #[test]
    fn test_placeholder_starts_with_prompt() {
        let spec = PlaceholderSpec::new(PlaceholderKind::Body, "Content Placeholder 2", (0, 0, 10, 10))
            .with_prompt("Click to edit Master text styles");
        let shape = MutableShape::new_placeholder(3, &spec);
        assert_eq!(shape.placeholder_kind(), Some(PlaceholderKind::Body));
        assert_eq!(shape.text_frame().text(), "Click to edit Master text styles");
        assert!(shape.bounds().is_none());
    }

    #[test]
    fn test_placeholder_xml() {
        let spec = PlaceholderSpec::new(PlaceholderKind::Body, "Content Placeholder 2", (0, 0, 10, 10));
        let mut shape = MutableShape::new_placeholder(3, &spec);
        shape.text_frame_mut().add_paragraph("A");

        let mut xml = String::new();
        shape.to_xml(&mut xml).unwrap();
        assert!(xml.contains(r#"<p:cNvPr id="3" name="Content Placeholder 2"/>"#));
        assert!(xml.contains(r#"<p:ph type="body" idx="1"/>"#));
        assert!(xml.contains("<p:spPr/>"));
        assert!(xml.contains("<a:t>A</a:t>"));
    }

    #[test]
    fn test_text_box_xml() {
        let mut shape = MutableShape::new_text_box(4, "Footer", 100, 200, 300, 400);
        shape
            .text_frame_mut()
            .add_paragraph("1/2")
            .set_alignment(Alignment::Right);

        let mut xml = String::new();
        shape.to_xml(&mut xml).unwrap();
        assert!(xml.contains(r#"<p:cNvSpPr txBox="1"/>"#));
        assert!(xml.contains(r#"<a:off x="100" y="200"/><a:ext cx="300" cy="400"/>"#));
        assert!(xml.contains(r#"algn="r""#));
        assert_eq!(shape.bounds(), Some((100, 200, 300, 400)));
    }
}
