//! Speaker notes attached to a slide.
use crate::ooxml::error::Result;
use crate::ooxml::pptx::layout::PlaceholderKind;

use super::shape::write_ph;
use super::text::TextFrame;

/// The notes page of a slide.
///
/// Holds a single text frame written into the notes body placeholder. A new
/// notes page starts with the default notes of the slide's layout, if any.
#[derive(Debug, Clone, Default)]
pub struct NotesSlide {
    text_frame: TextFrame,
}

impl NotesSlide {
    pub(crate) fn new(default_notes: Option<&str>) -> Self {
        Self {
            text_frame: default_notes.map(TextFrame::from_text).unwrap_or_default(),
        }
    }

    /// Remove all notes text.
    pub fn clear(&mut self) {
        self.text_frame.clear();
    }

    /// Replace the notes with `text`, one paragraph per line.
    pub fn set_text(&mut self, text: &str) {
        self.text_frame.set_text(text);
    }

    /// Notes paragraphs joined with `\n`.
    pub fn text(&self) -> String {
        self.text_frame.text()
    }

    #[inline]
    pub fn text_frame(&self) -> &TextFrame {
        &self.text_frame
    }

    #[inline]
    pub fn text_frame_mut(&mut self) -> &mut TextFrame {
        &mut self.text_frame
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text_frame.is_empty()
    }

    /// Generate notes slide XML content.
    pub(crate) fn to_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(1024);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);

        xml.push_str(
            r#"<p:notes xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" "#,
        );
        xml.push_str(r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#);
        xml.push_str(
            r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
        );

        xml.push_str("<p:cSld>");
        xml.push_str("<p:spTree>");

        // Group shape properties
        xml.push_str("<p:nvGrpSpPr>");
        xml.push_str(r#"<p:cNvPr id="1" name=""/>"#);
        xml.push_str("<p:cNvGrpSpPr/>");
        xml.push_str("<p:nvPr/>");
        xml.push_str("</p:nvGrpSpPr>");
        xml.push_str("<p:grpSpPr/>");

        // Slide image
        xml.push_str("<p:sp>");
        xml.push_str("<p:nvSpPr>");
        xml.push_str(r#"<p:cNvPr id="2" name="Slide Image Placeholder 1"/>"#);
        xml.push_str(r#"<p:cNvSpPr><a:spLocks noGrp="1" noRot="1" noChangeAspect="1"/></p:cNvSpPr>"#);
        xml.push_str(r#"<p:nvPr><p:ph type="sldImg"/></p:nvPr>"#);
        xml.push_str("</p:nvSpPr>");
        xml.push_str("<p:spPr/>");
        xml.push_str("</p:sp>");

        // Notes text
        xml.push_str("<p:sp>");
        xml.push_str("<p:nvSpPr>");
        xml.push_str(r#"<p:cNvPr id="3" name="Notes Placeholder 2"/>"#);
        xml.push_str(r#"<p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>"#);
        xml.push_str("<p:nvPr>");
        write_ph(&mut xml, PlaceholderKind::Body)?;
        xml.push_str("</p:nvPr>");
        xml.push_str("</p:nvSpPr>");
        xml.push_str("<p:spPr/>");
        xml.push_str("<p:txBody>");
        xml.push_str("<a:bodyPr/>");
        xml.push_str("<a:lstStyle/>");
        self.text_frame.write_paragraphs(&mut xml)?;
        xml.push_str("</p:txBody>");
        xml.push_str("</p:sp>");

        xml.push_str("</p:spTree>");
        xml.push_str("</p:cSld>");
        xml.push_str(r#"<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>"#);
        xml.push_str("</p:notes>");

        Ok(xml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_notes_then_clear() {
        let mut notes = NotesSlide::new(Some("Layout notes"));
        assert_eq!(notes.text(), "Layout notes");

        notes.clear();
        notes.set_text("n1");
        assert_eq!(notes.text(), "n1");
    }

    #[test]
    fn test_multiline_notes() {
        let mut notes = NotesSlide::new(None);
        notes.set_text("Goal: one line.\nAudience: ML researchers.");
        assert_eq!(notes.text_frame().paragraph_count(), 2);
    }

    #[test]
    fn test_notes_xml() {
        let mut notes = NotesSlide::new(None);
        notes.set_text("Say hello & wave");
        let xml = notes.to_xml().unwrap();
        assert!(xml.contains(r#"<p:ph type="sldImg"/>"#));
        assert!(xml.contains(r#"<p:ph type="body" idx="1"/>"#));
        assert!(xml.contains("<a:t>Say hello &amp; wave</a:t>"));
    }

    #[test]
    fn test_empty_notes_xml() {
        let xml = NotesSlide::new(None).to_xml().unwrap();
        assert!(!xml.contains("<a:t>"));
    }
}
