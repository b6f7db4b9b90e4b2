//! Package assembly for PowerPoint presentations.
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::{content_type as ct, relationship_type as rt};
use crate::ooxml::opc::error::OpcError;
use crate::ooxml::opc::{OpcPackage, PackURI, PackageWriter, Part};
use crate::ooxml::pptx::template;
use crate::ooxml::pptx::writer::MutablePresentation;
use chrono::{DateTime, Utc};
use std::io::Write;
use std::path::Path;

/// A PowerPoint (.pptx) package built from a [`MutablePresentation`].
///
/// Holds every part of the finished package: presentation, slide master,
/// layouts, themes, notes master, slides, notes slides, the three
/// presentation property parts and the document properties.
///
/// # Examples
///
/// ```rust
/// use deckwright::ooxml::pptx::{Geometry, LayoutKind, MutablePresentation, Package};
///
/// let mut pres = MutablePresentation::new(Geometry::WIDESCREEN);
/// pres.add_slide(LayoutKind::Title)?;
///
/// let pkg = Package::from_presentation(&pres)?;
/// let bytes = pkg.to_bytes()?;
/// assert!(bytes.starts_with(b"PK"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Package {
    /// The underlying OPC package
    opc: OpcPackage,
}

impl Package {
    /// Assemble the package for `pres`, stamping the core properties with
    /// the current time.
    pub fn from_presentation(pres: &MutablePresentation) -> Result<Self> {
        Self::from_presentation_at(pres, Utc::now())
    }

    /// Assemble the package for `pres` with a fixed creation time.
    pub fn from_presentation_at(pres: &MutablePresentation, created: DateTime<Utc>) -> Result<Self> {
        let mut opc = OpcPackage::new();

        let pres_uri = uri("/ppt/presentation.xml")?;
        let master_uri = uri("/ppt/slideMasters/slideMaster1.xml")?;
        let theme_uri = uri("/ppt/theme/theme1.xml")?;
        let notes_master_uri = uri("/ppt/notesMasters/notesMaster1.xml")?;
        let notes_theme_uri = uri("/ppt/theme/theme2.xml")?;

        let layout_uris = (1..=pres.layouts().len())
            .map(|n| uri(&format!("/ppt/slideLayouts/slideLayout{}.xml", n)))
            .collect::<Result<Vec<_>>>()?;

        // Presentation part: relationships first, XML once the IDs are known
        let mut pres_part = Part::new(pres_uri.clone(), ct::PML_PRESENTATION_MAIN, Vec::<u8>::new());
        let master_rel_id = pres_part.relate_to(&master_uri, rt::SLIDE_MASTER);
        let notes_master_rel_id = pres_part.relate_to(&notes_master_uri, rt::NOTES_MASTER);

        let mut slide_parts = Vec::with_capacity(pres.slide_count());
        let mut notes_parts = Vec::with_capacity(pres.slide_count());
        let mut slide_rel_ids = Vec::with_capacity(pres.slide_count());

        for (index, slide) in pres.slides().iter().enumerate() {
            let number = index + 1;
            let slide_uri = uri(&format!("/ppt/slides/slide{}.xml", number))?;
            let notes_uri = uri(&format!("/ppt/notesSlides/notesSlide{}.xml", number))?;
            let layout_uri = pres
                .layouts()
                .position(slide.layout_kind())
                .and_then(|i| layout_uris.get(i))
                .ok_or(OoxmlError::LayoutUnavailable(slide.layout_kind()))?;

            slide_rel_ids.push(pres_part.relate_to(&slide_uri, rt::SLIDE));

            let mut slide_part = Part::new(slide_uri.clone(), ct::PML_SLIDE, slide.to_xml()?);
            slide_part.relate_to(layout_uri, rt::SLIDE_LAYOUT);
            slide_part.relate_to(&notes_uri, rt::NOTES_SLIDE);
            slide_parts.push(slide_part);

            let mut notes_part = Part::new(notes_uri, ct::PML_NOTES_SLIDE, slide.notes().to_xml()?);
            notes_part.relate_to(&notes_master_uri, rt::NOTES_MASTER);
            notes_part.relate_to(&slide_uri, rt::SLIDE);
            notes_parts.push(notes_part);
        }

        let pres_props_uri = uri("/ppt/presProps.xml")?;
        let view_props_uri = uri("/ppt/viewProps.xml")?;
        let table_styles_uri = uri("/ppt/tableStyles.xml")?;
        pres_part.relate_to(&pres_props_uri, rt::PRES_PROPS);
        pres_part.relate_to(&view_props_uri, rt::VIEW_PROPS);
        pres_part.relate_to(&theme_uri, rt::THEME);
        pres_part.relate_to(&table_styles_uri, rt::TABLE_STYLES);
        pres_part.set_blob(pres.generate_presentation_xml(
            &master_rel_id,
            &notes_master_rel_id,
            &slide_rel_ids,
        )?);
        opc.add_part(pres_part)?;

        // Slide master and layouts
        let mut master_part = Part::new(master_uri.clone(), ct::PML_SLIDE_MASTER, Vec::<u8>::new());
        let layout_rel_ids: Vec<String> = layout_uris
            .iter()
            .map(|layout_uri| master_part.relate_to(layout_uri, rt::SLIDE_LAYOUT))
            .collect();
        master_part.relate_to(&theme_uri, rt::THEME);
        master_part.set_blob(template::slide_master_xml(&pres.geometry(), &layout_rel_ids)?);
        opc.add_part(master_part)?;

        for (layout, layout_uri) in pres.layouts().iter().zip(&layout_uris) {
            let mut layout_part = Part::new(
                layout_uri.clone(),
                ct::PML_SLIDE_LAYOUT,
                template::slide_layout_xml(layout)?,
            );
            layout_part.relate_to(&master_uri, rt::SLIDE_MASTER);
            opc.add_part(layout_part)?;
        }

        opc.add_part(Part::new(theme_uri, ct::OFC_THEME, template::default_theme_xml()))?;

        // Notes master with its own copy of the theme
        let mut notes_master_part = Part::new(
            notes_master_uri,
            ct::PML_NOTES_MASTER,
            template::default_notes_master_xml(),
        );
        notes_master_part.relate_to(&notes_theme_uri, rt::THEME);
        opc.add_part(notes_master_part)?;
        opc.add_part(Part::new(notes_theme_uri, ct::OFC_THEME, template::default_theme_xml()))?;

        for part in slide_parts.into_iter().chain(notes_parts) {
            opc.add_part(part)?;
        }

        opc.add_part(Part::new(pres_props_uri, ct::PML_PRES_PROPS, template::default_pres_props_xml()))?;
        opc.add_part(Part::new(view_props_uri, ct::PML_VIEW_PROPS, template::default_view_props_xml()))?;
        opc.add_part(Part::new(
            table_styles_uri,
            ct::PML_TABLE_STYLES,
            template::default_table_styles_xml(),
        ))?;

        // Document properties
        let core_uri = uri("/docProps/core.xml")?;
        let app_uri = uri("/docProps/app.xml")?;
        opc.add_part(Part::new(
            core_uri.clone(),
            ct::OPC_CORE_PROPERTIES,
            template::core_props_xml(pres.title(), created),
        ))?;
        opc.add_part(Part::new(
            app_uri.clone(),
            ct::OFC_EXTENDED_PROPERTIES,
            template::app_props_xml(pres.slide_count(), pres.slide_count()),
        ))?;

        opc.relate_to(&pres_uri, rt::OFFICE_DOCUMENT);
        opc.relate_to(&core_uri, rt::CORE_PROPERTIES);
        opc.relate_to(&app_uri, rt::EXTENDED_PROPERTIES);

        Ok(Self { opc })
    }

    /// Serialize the package to bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(PackageWriter::to_bytes(&self.opc)?)
    }

    /// Serialize the package into `writer`.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        Ok(PackageWriter::write_to_stream(writer, &self.opc)?)
    }

    /// Write the package to `path`, replacing any existing file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        Ok(PackageWriter::write(path, &self.opc)?)
    }

    /// Get the underlying OPC package.
    ///
    /// This provides access to lower-level package operations.
    #[inline]
    pub fn opc_package(&self) -> &OpcPackage {
        &self.opc
    }
}

fn uri(partname: &str) -> Result<PackURI> {
    Ok(PackURI::new(partname).map_err(OpcError::InvalidPackUri)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::phys_pkg::PhysPkgReader;
    use crate::ooxml::pptx::layout::{Geometry, LayoutKind, PlaceholderKind};
    use chrono::TimeZone;
    use quick_xml::Reader;
    use quick_xml::events::Event;

    fn two_slide_presentation() -> MutablePresentation {
        let mut pres = MutablePresentation::new(Geometry::WIDESCREEN);
        pres.set_title("REGMLAME");
        pres.add_slide(LayoutKind::Title).unwrap();
        pres.add_slide(LayoutKind::Content).unwrap();
        pres
    }

    #[test]
    fn test_package_parts() {
        let pkg = Package::from_presentation(&two_slide_presentation()).unwrap();
        let opc = pkg.opc_package();

        // presentation, master, 2 layouts, 2 themes, notes master,
        // 2 slides, 2 notes slides, 3 props, core, app
        assert_eq!(opc.part_count(), 16);
        assert!(opc.part(&uri("/ppt/slides/slide2.xml").unwrap()).is_ok());
        assert!(opc.part(&uri("/ppt/notesSlides/notesSlide1.xml").unwrap()).is_ok());
        assert_eq!(
            opc.rels().part_with_reltype(rt::OFFICE_DOCUMENT).unwrap().target_ref(),
            "ppt/presentation.xml"
        );
    }

    #[test]
    fn test_slide_relationships() {
        let pkg = Package::from_presentation(&two_slide_presentation()).unwrap();
        let slide = pkg.opc_package().part(&uri("/ppt/slides/slide2.xml").unwrap()).unwrap();

        let layout = slide.rels().part_with_reltype(rt::SLIDE_LAYOUT).unwrap();
        assert_eq!(layout.target_ref(), "../slideLayouts/slideLayout2.xml");
        let notes = slide.rels().part_with_reltype(rt::NOTES_SLIDE).unwrap();
        assert_eq!(notes.target_ref(), "../notesSlides/notesSlide2.xml");
    }

    #[test]
    fn test_core_properties_title() {
        let created = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let pkg = Package::from_presentation_at(&two_slide_presentation(), created).unwrap();
        let core = pkg.opc_package().part(&uri("/docProps/core.xml").unwrap()).unwrap();
        let xml = std::str::from_utf8(core.blob()).unwrap();
        assert!(xml.contains("<dc:title>REGMLAME</dc:title>"));
        assert!(xml.contains("2026-01-02T03:04:05Z"));
    }

    #[test]
    fn test_fixed_time_serialization_is_stable() {
        let created = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let pres = two_slide_presentation();
        let first = Package::from_presentation_at(&pres, created).unwrap().to_bytes().unwrap();
        let second = Package::from_presentation_at(&pres, created).unwrap().to_bytes().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_archive_contents() {
        let bytes = two_slide_presentation().to_bytes().unwrap();
        let mut reader = PhysPkgReader::new(&bytes).unwrap();
        let names = reader.member_names();
        assert_eq!(names[0], "[Content_Types].xml");
        assert!(names.contains(&"ppt/slides/_rels/slide1.xml.rels".to_string()));

        let content_types = reader.content_types_xml().unwrap();
        let content_types = String::from_utf8(content_types).unwrap();
        assert!(content_types.contains(r#"PartName="/ppt/notesSlides/notesSlide2.xml""#));
    }

    /// Every member parses to the end and carries no character XML 1.0
    /// forbids.
    fn assert_well_formed(bytes: &[u8]) {
        let mut phys = PhysPkgReader::new(bytes).unwrap();
        for name in phys.member_names() {
            let blob = phys.blob_for(&uri(&format!("/{}", name)).unwrap()).unwrap();
            let text = std::str::from_utf8(&blob).unwrap();
            assert!(
                !text
                    .chars()
                    .any(|c| matches!(c, '\u{0}'..='\u{8}' | '\u{B}' | '\u{C}' | '\u{E}'..='\u{1F}')),
                "{} carries a character XML forbids",
                name
            );

            let mut reader = Reader::from_reader(blob.as_slice());
            let mut buf = Vec::new();
            loop {
                match reader.read_event_into(&mut buf) {
                    Ok(Event::Eof) => break,
                    Ok(_) => {},
                    Err(e) => panic!("{}: {}", name, e),
                }
                buf.clear();
            }
        }
    }

    #[test]
    fn test_control_characters_keep_parts_well_formed() {
        let mut pres = MutablePresentation::new(Geometry::WIDESCREEN);
        pres.set_title("Deck\u{1}");
        let slide = pres.add_slide(LayoutKind::Content).unwrap();
        slide
            .placeholder_mut(PlaceholderKind::Title)
            .unwrap()
            .set_text("T\u{B}x");
        let body = slide.placeholder_mut(PlaceholderKind::Body).unwrap();
        body.clear();
        body.add_paragraph("a\u{B}b");
        body.add_paragraph("line1\nline2");
        slide.notes_mut().set_text("n\u{1}");

        assert_well_formed(&pres.to_bytes().unwrap());
    }

    #[test]
    fn test_plain_package_is_well_formed() {
        assert_well_formed(&two_slide_presentation().to_bytes().unwrap());
    }
}
