//! Read-back of written `.pptx` packages.
//!
//! [`DeckSummary`] walks a package the way PowerPoint resolves it
//! (presentation, slide list, per-slide layout and notes relationships) and
//! reports the text each slide carries. It understands the subset of
//! PresentationML this crate writes: run paragraphs in `<p:sp>` shapes.
//! Line breaks (`<a:br>`) read back as `\n` and `_xHHHH_` escapes are
//! decoded.

use crate::common::xml::{unescape_text, unescape_xml};
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::relationship_type as rt;
use crate::ooxml::opc::error::OpcError;
use crate::ooxml::opc::packuri::{PACKAGE_URI, PackURI};
use crate::ooxml::opc::phys_pkg::PhysPkgReader;
use crate::ooxml::opc::rel::Relationships;
use crate::ooxml::pptx::layout::Geometry;
use crate::ooxml::pptx::writer::text::Alignment;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::path::Path;

/// A paragraph as read back from a text body.
#[derive(Debug, Clone, PartialEq)]
pub struct ParagraphSummary {
    pub text: String,
    pub level: u8,
    pub alignment: Option<Alignment>,
}

/// A free-form text box (any shape that is not a placeholder).
#[derive(Debug, Clone, PartialEq)]
pub struct TextBoxSummary {
    pub name: String,
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
    pub paragraphs: Vec<ParagraphSummary>,
}

impl TextBoxSummary {
    /// Paragraph texts joined with `\n`.
    pub fn text(&self) -> String {
        join_paragraphs(&self.paragraphs)
    }
}

/// Text content of one slide.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SlideSummary {
    /// `name` of the bound layout's `<p:cSld>`
    pub layout_name: String,
    /// Text of the `title` or `ctrTitle` placeholder
    pub headline: Option<String>,
    /// Text of the `subTitle` placeholder
    pub subtitle: Option<String>,
    /// Paragraphs of the body placeholder
    pub body: Vec<ParagraphSummary>,
    pub text_boxes: Vec<TextBoxSummary>,
    /// Notes text, paragraphs joined with `\n`
    pub notes: String,
}

impl SlideSummary {
    /// Body paragraph texts.
    pub fn body_texts(&self) -> Vec<&str> {
        self.body.iter().map(|p| p.text.as_str()).collect()
    }
}

/// Summary of a presentation package.
///
/// # Examples
///
/// ```rust
/// use deckwright::ooxml::pptx::{DeckSummary, Geometry, LayoutKind, MutablePresentation, PlaceholderKind};
///
/// let mut pres = MutablePresentation::new(Geometry::WIDESCREEN);
/// let slide = pres.add_slide(LayoutKind::Content)?;
/// if let Some(title) = slide.placeholder_mut(PlaceholderKind::Title) {
///     title.set_text("Motivation");
/// }
///
/// let summary = DeckSummary::from_bytes(&pres.to_bytes()?)?;
/// assert_eq!(summary.slide_count(), 1);
/// assert_eq!(summary.slides[0].headline.as_deref(), Some("Motivation"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DeckSummary {
    pub geometry: Geometry,
    pub slides: Vec<SlideSummary>,
}

impl DeckSummary {
    /// Read the package at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_bytes(&data)
    }

    /// Read a package held in memory.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut phys = PhysPkgReader::new(data)?;

        let pkg_uri = PackURI::new(PACKAGE_URI).map_err(OpcError::InvalidPackUri)?;
        let pkg_rels = load_rels(&mut phys, &pkg_uri)?;
        let pres_uri = pkg_rels.part_with_reltype(rt::OFFICE_DOCUMENT)?.target_partname()?;
        let pres_rels = load_rels(&mut phys, &pres_uri)?;

        let (geometry, slide_r_ids) = parse_presentation(&phys.blob_for(&pres_uri)?)?;

        let mut slides = Vec::with_capacity(slide_r_ids.len());
        for r_id in &slide_r_ids {
            let slide_uri = pres_rels
                .get(r_id)
                .ok_or_else(|| OpcError::RelationshipNotFound(r_id.clone()))?
                .target_partname()?;
            slides.push(read_slide(&mut phys, &slide_uri)?);
        }

        Ok(Self { geometry, slides })
    }

    #[inline]
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }
}

fn load_rels(phys: &mut PhysPkgReader<'_>, source: &PackURI) -> Result<Relationships> {
    match phys.rels_xml_for(source)? {
        Some(xml) => Ok(Relationships::from_xml(source.base_uri(), &xml)?),
        None => Ok(Relationships::new(source.base_uri().to_string())),
    }
}

fn read_slide(phys: &mut PhysPkgReader<'_>, slide_uri: &PackURI) -> Result<SlideSummary> {
    let rels = load_rels(phys, slide_uri)?;
    let mut summary = SlideSummary::default();

    if let Ok(layout) = rels.part_with_reltype(rt::SLIDE_LAYOUT) {
        let layout_xml = phys.blob_for(&layout.target_partname()?)?;
        summary.layout_name = parse_csld_name(&layout_xml)?.unwrap_or_default();
    }

    for shape in parse_shapes(&phys.blob_for(slide_uri)?)? {
        match shape.ph_type.as_deref() {
            Some("title") | Some("ctrTitle") => {
                summary.headline = Some(join_paragraphs(&shape.paragraphs))
            },
            Some("subTitle") => summary.subtitle = Some(join_paragraphs(&shape.paragraphs)),
            Some("body") => summary.body = shape.paragraphs,
            Some(_) => {},
            None => summary.text_boxes.push(TextBoxSummary {
                name: shape.name,
                x: shape.x,
                y: shape.y,
                width: shape.width,
                height: shape.height,
                paragraphs: shape.paragraphs,
            }),
        }
    }

    if let Ok(notes) = rels.part_with_reltype(rt::NOTES_SLIDE) {
        let notes_xml = phys.blob_for(&notes.target_partname()?)?;
        summary.notes = parse_shapes(&notes_xml)?
            .into_iter()
            .find(|s| s.ph_type.as_deref() == Some("body"))
            .map(|s| join_paragraphs(&s.paragraphs))
            .unwrap_or_default();
    }

    Ok(summary)
}

fn join_paragraphs(paragraphs: &[ParagraphSummary]) -> String {
    paragraphs
        .iter()
        .map(|p| p.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

fn attr_value(e: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>> {
    for attr in e.attributes() {
        let attr = attr.map_err(|e| OoxmlError::Xml(e.to_string()))?;
        if attr.key.as_ref() == key {
            let value = std::str::from_utf8(&attr.value)
                .map_err(|e| OoxmlError::Xml(e.to_string()))?;
            return Ok(Some(unescape_xml(value)));
        }
    }
    Ok(None)
}

fn attr_i64(e: &BytesStart<'_>, key: &[u8]) -> Result<i64> {
    Ok(attr_value(e, key)?
        .and_then(|v| v.parse().ok())
        .unwrap_or(0))
}

/// Slide size and ordered slide relationship IDs from presentation.xml.
fn parse_presentation(xml: &[u8]) -> Result<(Geometry, Vec<String>)> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();

    let mut geometry = Geometry::new(0, 0);
    let mut slide_r_ids = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                b"sldSz" => geometry = Geometry::new(attr_i64(e, b"cx")?, attr_i64(e, b"cy")?),
                b"sldId" => {
                    if let Some(r_id) = attr_value(e, b"r:id")? {
                        slide_r_ids.push(r_id);
                    }
                },
                _ => {},
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(OoxmlError::Xml(e.to_string())),
            _ => {},
        }
        buf.clear();
    }

    Ok((geometry, slide_r_ids))
}

/// `name` attribute of `<p:cSld>`.
fn parse_csld_name(xml: &[u8]) -> Result<Option<String>> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e))
                if e.local_name().as_ref() == b"cSld" =>
            {
                return Ok(attr_value(e, b"name")?.map(|name| unescape_text(&name)));
            },
            Ok(Event::Eof) => return Ok(None),
            Err(e) => return Err(OoxmlError::Xml(e.to_string())),
            _ => {},
        }
        buf.clear();
    }
}

#[derive(Debug, Default)]
struct ShapeText {
    name: String,
    ph_type: Option<String>,
    x: i64,
    y: i64,
    width: i64,
    height: i64,
    paragraphs: Vec<ParagraphSummary>,
}

/// Event-driven state while walking a shape tree.
#[derive(Default)]
struct ShapeCollector {
    shapes: Vec<ShapeText>,
    shape: Option<ShapeText>,
    paragraph: Option<ParagraphSummary>,
    has_run: bool,
    runless_paragraphs: usize,
    in_text: bool,
    in_xfrm: bool,
}

impl ShapeCollector {
    fn open(&mut self, e: &BytesStart<'_>, is_start: bool) -> Result<()> {
        match e.local_name().as_ref() {
            b"sp" if is_start => {
                self.shape = Some(ShapeText::default());
                self.runless_paragraphs = 0;
            },
            b"cNvPr" => {
                if let Some(s) = self.shape.as_mut() {
                    s.name = unescape_text(&attr_value(e, b"name")?.unwrap_or_default());
                }
            },
            b"ph" => {
                if let Some(s) = self.shape.as_mut() {
                    // An untyped placeholder is a body placeholder
                    let ph_type = attr_value(e, b"type")?.unwrap_or_else(|| "body".to_string());
                    s.ph_type = Some(ph_type);
                }
            },
            b"xfrm" if is_start => self.in_xfrm = true,
            b"off" if self.in_xfrm => {
                if let Some(s) = self.shape.as_mut() {
                    s.x = attr_i64(e, b"x")?;
                    s.y = attr_i64(e, b"y")?;
                }
            },
            b"ext" if self.in_xfrm => {
                if let Some(s) = self.shape.as_mut() {
                    s.width = attr_i64(e, b"cx")?;
                    s.height = attr_i64(e, b"cy")?;
                }
            },
            b"p" => {
                self.has_run = false;
                let para = ParagraphSummary {
                    text: String::new(),
                    level: 0,
                    alignment: None,
                };
                if is_start {
                    self.paragraph = Some(para);
                } else if let Some(s) = self.shape.as_mut() {
                    s.paragraphs.push(para);
                    self.runless_paragraphs += 1;
                }
            },
            b"pPr" => {
                if let Some(p) = self.paragraph.as_mut() {
                    p.level = attr_value(e, b"lvl")?
                        .and_then(|v| v.parse().ok())
                        .unwrap_or(0);
                    p.alignment = attr_value(e, b"algn")?
                        .as_deref()
                        .and_then(Alignment::from_attr);
                }
            },
            b"r" => self.has_run = true,
            b"br" => {
                if let Some(p) = self.paragraph.as_mut() {
                    p.text.push('\n');
                }
            },
            b"t" if is_start => self.in_text = true,
            _ => {},
        }
        Ok(())
    }

    fn push_text(&mut self, text: &str) {
        if let (true, Some(p)) = (self.in_text, self.paragraph.as_mut()) {
            p.text.push_str(text);
        }
    }

    fn close(&mut self, local_name: &[u8]) {
        match local_name {
            b"t" => self.in_text = false,
            b"xfrm" => self.in_xfrm = false,
            b"p" => {
                if let (Some(mut p), Some(s)) = (self.paragraph.take(), self.shape.as_mut()) {
                    if !self.has_run {
                        self.runless_paragraphs += 1;
                    }
                    p.text = unescape_text(&p.text);
                    s.paragraphs.push(p);
                }
            },
            b"sp" => {
                if let Some(mut s) = self.shape.take() {
                    if s.paragraphs.len() == 1 && self.runless_paragraphs == 1 {
                        s.paragraphs.clear();
                    }
                    self.shapes.push(s);
                }
            },
            _ => {},
        }
    }
}

/// Collect the `<p:sp>` shapes of a slide or notes slide.
///
/// A text body whose only paragraph has no run is empty and yields no
/// paragraphs.
fn parse_shapes(xml: &[u8]) -> Result<Vec<ShapeText>> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(false);
    let mut buf = Vec::new();
    let mut collector = ShapeCollector::default();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => collector.open(&e, true)?,
            Ok(Event::Empty(e)) => collector.open(&e, false)?,
            Ok(Event::Text(e)) => {
                let text = std::str::from_utf8(&e).map_err(|e| OoxmlError::Xml(e.to_string()))?;
                collector.push_text(&unescape_xml(text));
            },
            // Entity references arrive separately from the text around them
            Ok(Event::GeneralRef(e)) => {
                let name = std::str::from_utf8(&e)
                    .map_err(|e| OoxmlError::Xml(e.to_string()))?;
                collector.push_text(&unescape_xml(&format!("&{};", name)));
            },
            Ok(Event::End(e)) => collector.close(e.local_name().as_ref()),
            Ok(Event::Eof) => break,
            Err(e) => return Err(OoxmlError::Xml(e.to_string())),
            _ => {},
        }
        buf.clear();
    }

    Ok(collector.shapes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SLIDE_XML: &str = concat!(
        r#"<p:sld xmlns:p="p" xmlns:a="a"><p:cSld><p:spTree>"#,
        r#"<p:sp><p:nvSpPr><p:cNvPr id="2" name="Title 1"/><p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr>"#,
        r#"<p:spPr/><p:txBody><a:bodyPr/><a:p><a:r><a:rPr/><a:t>R&amp;D</a:t></a:r></a:p></p:txBody></p:sp>"#,
        r#"<p:sp><p:nvSpPr><p:cNvPr id="3" name="Body"/><p:nvPr><p:ph idx="1"/></p:nvPr></p:nvSpPr>"#,
        r#"<p:spPr/><p:txBody><a:bodyPr/><a:p><a:endParaRPr/></a:p></p:txBody></p:sp>"#,
        r#"<p:sp><p:nvSpPr><p:cNvPr id="4" name="Footer"/><p:nvPr/></p:nvSpPr>"#,
        r#"<p:spPr><a:xfrm><a:off x="10" y="20"/><a:ext cx="30" cy="40"/></a:xfrm></p:spPr>"#,
        r#"<p:txBody><a:bodyPr/><a:p><a:pPr lvl="2" algn="r"/><a:r><a:t>1/2</a:t></a:r></a:p></p:txBody></p:sp>"#,
        r#"</p:spTree></p:cSld></p:sld>"#,
    );

    #[test]
    fn test_parse_shapes() {
        let shapes = parse_shapes(SLIDE_XML.as_bytes()).unwrap();
        assert_eq!(shapes.len(), 3);

        assert_eq!(shapes[0].ph_type.as_deref(), Some("title"));
        assert_eq!(shapes[0].paragraphs[0].text, "R&D");

        assert_eq!(shapes[1].ph_type.as_deref(), Some("body"));
        assert!(shapes[1].paragraphs.is_empty());

        let footer = &shapes[2];
        assert!(footer.ph_type.is_none());
        assert_eq!((footer.x, footer.y, footer.width, footer.height), (10, 20, 30, 40));
        assert_eq!(footer.paragraphs[0].level, 2);
        assert_eq!(footer.paragraphs[0].alignment, Some(Alignment::Right));
    }

    #[test]
    fn test_line_breaks_and_escapes_decoded() {
        let xml = concat!(
            r#"<p:sld xmlns:p="p" xmlns:a="a"><p:cSld><p:spTree>"#,
            r#"<p:sp><p:nvSpPr><p:cNvPr id="2" name="Box_x0001_"/><p:nvPr/></p:nvSpPr><p:txBody>"#,
            r#"<a:p><a:r><a:t>a</a:t></a:r><a:br><a:rPr/></a:br><a:r><a:t>b_x0001_ _x005F_x0041_</a:t></a:r></a:p>"#,
            r#"</p:txBody></p:sp></p:spTree></p:cSld></p:sld>"#,
        );
        let shapes = parse_shapes(xml.as_bytes()).unwrap();
        assert_eq!(shapes[0].name, "Box\u{1}");
        assert_eq!(shapes[0].paragraphs.len(), 1);
        assert_eq!(shapes[0].paragraphs[0].text, "a\nb\u{1} _x0041_");
    }

    #[test]
    fn test_parse_presentation() {
        let xml = concat!(
            r#"<p:presentation xmlns:p="p" xmlns:r="r"><p:sldIdLst>"#,
            r#"<p:sldId id="256" r:id="rId7"/><p:sldId id="257" r:id="rId3"/></p:sldIdLst>"#,
            r#"<p:sldSz cx="12188952" cy="6858000"/></p:presentation>"#,
        );
        let (geometry, r_ids) = parse_presentation(xml.as_bytes()).unwrap();
        assert_eq!(geometry, Geometry::WIDESCREEN);
        assert_eq!(r_ids, vec!["rId7", "rId3"]);
    }

    #[test]
    fn test_parse_csld_name() {
        let xml = r#"<p:sldLayout xmlns:p="p"><p:cSld name="Title Slide"><p:spTree/></p:cSld></p:sldLayout>"#;
        assert_eq!(parse_csld_name(xml.as_bytes()).unwrap().as_deref(), Some("Title Slide"));
    }

    #[test]
    fn test_not_a_package() {
        assert!(DeckSummary::from_bytes(b"not a zip").is_err());
    }
}
