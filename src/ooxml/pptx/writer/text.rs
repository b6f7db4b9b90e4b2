//! Text frames for placeholders, text boxes and notes.
use crate::common::unit::pt_to_centipoints;
use crate::common::xml::push_escaped_text;
use crate::ooxml::error::Result;
use std::fmt::Write as FmtWrite;

/// Horizontal paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

impl Alignment {
    /// Value of the `algn` attribute on `<a:pPr>`.
    pub fn as_attr(&self) -> &'static str {
        match self {
            Self::Left => "l",
            Self::Center => "ctr",
            Self::Right => "r",
        }
    }

    pub fn from_attr(value: &str) -> Option<Self> {
        match value {
            "l" => Some(Self::Left),
            "ctr" => Some(Self::Center),
            "r" => Some(Self::Right),
            _ => None,
        }
    }
}

/// A paragraph holding a single run of text.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextParagraph {
    text: String,
    /// Outline level, 0 for top-level bullets
    level: u8,
    alignment: Option<Alignment>,
    /// Font size in points
    font_size: Option<f64>,
}

impl TextParagraph {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            ..Default::default()
        }
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: &str) -> &mut Self {
        self.text = text.to_string();
        self
    }

    #[inline]
    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn set_level(&mut self, level: u8) -> &mut Self {
        self.level = level;
        self
    }

    #[inline]
    pub fn alignment(&self) -> Option<Alignment> {
        self.alignment
    }

    pub fn set_alignment(&mut self, alignment: Alignment) -> &mut Self {
        self.alignment = Some(alignment);
        self
    }

    #[inline]
    pub fn font_size(&self) -> Option<f64> {
        self.font_size
    }

    pub fn set_font_size(&mut self, size_pt: f64) -> &mut Self {
        self.font_size = Some(size_pt);
        self
    }

    fn write_xml(&self, xml: &mut String) -> Result<()> {
        xml.push_str("<a:p>");

        if self.level > 0 || self.alignment.is_some() {
            xml.push_str("<a:pPr");
            if self.level > 0 {
                write!(xml, r#" lvl="{}""#, self.level)?;
            }
            if let Some(alignment) = self.alignment {
                write!(xml, r#" algn="{}""#, alignment.as_attr())?;
            }
            xml.push_str("/>");
        }

        // A paragraph always carries a run, even when its text is empty, so
        // that it stays distinguishable from an empty frame. Line breaks
        // inside the paragraph become <a:br>.
        for (i, line) in self.text.split(['\n', '\u{B}']).enumerate() {
            if i > 0 {
                xml.push_str("<a:br>");
                self.write_run_properties(xml, "a:rPr")?;
                xml.push_str("</a:br>");
            }
            xml.push_str("<a:r>");
            self.write_run_properties(xml, "a:rPr")?;
            xml.push_str("<a:t>");
            push_escaped_text(xml, line);
            xml.push_str("</a:t>");
            xml.push_str("</a:r>");
        }

        self.write_run_properties(xml, "a:endParaRPr")?;
        xml.push_str("</a:p>");
        Ok(())
    }

    fn write_run_properties(&self, xml: &mut String, tag: &str) -> Result<()> {
        write!(xml, r#"<{} lang="en-US""#, tag)?;
        if let Some(size) = self.font_size {
            write!(xml, r#" sz="{}""#, pt_to_centipoints(size))?;
        }
        xml.push_str(r#" dirty="0"/>"#);
        Ok(())
    }
}

/// Ordered paragraphs of a shape's text body.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextFrame {
    paragraphs: Vec<TextParagraph>,
}

impl TextFrame {
    /// Create an empty text frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a text frame holding `text`, one paragraph per line.
    pub fn from_text(text: &str) -> Self {
        let mut frame = Self::new();
        frame.set_text(text);
        frame
    }

    /// Remove every paragraph.
    pub fn clear(&mut self) {
        self.paragraphs.clear();
    }

    /// Replace the content with `text`, split on `\n` into paragraphs.
    ///
    /// An empty string leaves the frame empty.
    pub fn set_text(&mut self, text: &str) {
        self.clear();
        if text.is_empty() {
            return;
        }
        for line in text.split('\n') {
            self.paragraphs.push(TextParagraph::new(line));
        }
    }

    /// Append a paragraph and return it for further formatting.
    pub fn add_paragraph(&mut self, text: &str) -> &mut TextParagraph {
        let index = self.paragraphs.len();
        self.paragraphs.push(TextParagraph::new(text));
        &mut self.paragraphs[index]
    }

    #[inline]
    pub fn paragraphs(&self) -> &[TextParagraph] {
        &self.paragraphs
    }

    #[inline]
    pub fn paragraphs_mut(&mut self) -> &mut [TextParagraph] {
        &mut self.paragraphs
    }

    #[inline]
    pub fn paragraph_count(&self) -> usize {
        self.paragraphs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    /// Paragraph texts joined with `\n`.
    pub fn text(&self) -> String {
        let mut text = String::new();
        for (i, para) in self.paragraphs.iter().enumerate() {
            if i > 0 {
                text.push('\n');
            }
            text.push_str(para.text());
        }
        text
    }

    /// Write the paragraphs of a `<p:txBody>`.
    ///
    /// DrawingML requires at least one `<a:p>`; an empty frame is written as
    /// a single paragraph without runs.
    pub(crate) fn write_paragraphs(&self, xml: &mut String) -> Result<()> {
        if self.paragraphs.is_empty() {
            xml.push_str(r#"<a:p><a:endParaRPr lang="en-US" dirty="0"/></a:p>"#);
            return Ok(());
        }
        for para in &self.paragraphs {
            para.write_xml(xml)?;
        }
        Ok(())
    }
}
