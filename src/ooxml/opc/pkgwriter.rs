//! Package writer for OPC packages.
//!
//! Serializes an [`OpcPackage`] to a ZIP archive: `[Content_Types].xml`,
//! package relationships, then every part followed by its `.rels` part.

use crate::common::xml::push_escaped;
use crate::ooxml::opc::constants::{content_type as ct, namespace};
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::package::OpcPackage;
use crate::ooxml::opc::packuri::{CONTENT_TYPES_URI, PACKAGE_URI, PackURI};
use crate::ooxml::opc::phys_pkg::PhysPkgWriter;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

/// Package writer that serializes an OPC package to a ZIP file.
pub struct PackageWriter;

impl PackageWriter {
    /// Write an OPC package to a file, replacing any existing file.
    pub fn write<P: AsRef<Path>>(path: P, package: &OpcPackage) -> Result<()> {
        let bytes = Self::to_bytes(package)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Write an OPC package to a stream.
    pub fn write_to_stream<W: Write>(mut writer: W, package: &OpcPackage) -> Result<()> {
        let bytes = Self::to_bytes(package)?;
        writer.write_all(&bytes)?;
        Ok(())
    }

    /// Serialize an OPC package to bytes.
    pub fn to_bytes(package: &OpcPackage) -> Result<Vec<u8>> {
        let mut phys_writer = PhysPkgWriter::new();

        Self::write_content_types(&mut phys_writer, package)?;
        Self::write_pkg_rels(&mut phys_writer, package)?;
        Self::write_parts(&mut phys_writer, package)?;

        phys_writer.finish()
    }

    fn write_content_types(phys_writer: &mut PhysPkgWriter, package: &OpcPackage) -> Result<()> {
        let cti = ContentTypesItem::from_package(package);
        let content_types_uri = PackURI::new(CONTENT_TYPES_URI).map_err(OpcError::InvalidPackUri)?;
        phys_writer.write(&content_types_uri, cti.to_xml().as_bytes())
    }

    fn write_pkg_rels(phys_writer: &mut PhysPkgWriter, package: &OpcPackage) -> Result<()> {
        let rels_uri = PackURI::new(PACKAGE_URI)
            .and_then(|uri| uri.rels_uri())
            .map_err(OpcError::InvalidPackUri)?;
        phys_writer.write(&rels_uri, package.rels().to_xml().as_bytes())
    }

    fn write_parts(phys_writer: &mut PhysPkgWriter, package: &OpcPackage) -> Result<()> {
        for part in package.iter_parts() {
            phys_writer.write(part.partname(), part.blob())?;

            if !part.rels().is_empty() {
                let rels_uri = part
                    .partname()
                    .rels_uri()
                    .map_err(OpcError::InvalidPackUri)?;
                phys_writer.write(&rels_uri, part.rels().to_xml().as_bytes())?;
            }
        }

        Ok(())
    }
}

/// Builder for `[Content_Types].xml`.
///
/// Well-known extensions become `Default` elements, everything else an
/// `Override` keyed by partname. Both maps are ordered so the output is
/// stable.
struct ContentTypesItem {
    defaults: BTreeMap<String, String>,
    overrides: BTreeMap<String, String>,
}

impl ContentTypesItem {
    fn new() -> Self {
        let mut defaults = BTreeMap::new();
        defaults.insert("rels".to_string(), ct::OPC_RELATIONSHIPS.to_string());
        defaults.insert("xml".to_string(), ct::XML.to_string());

        Self {
            defaults,
            overrides: BTreeMap::new(),
        }
    }

    fn from_package(package: &OpcPackage) -> Self {
        let mut cti = Self::new();
        for part in package.iter_parts() {
            cti.add_content_type(part.partname(), part.content_type());
        }
        cti
    }

    fn add_content_type(&mut self, partname: &PackURI, content_type: &str) {
        let ext = partname.ext();
        if Self::is_default_content_type(ext, content_type) {
            self.defaults
                .insert(ext.to_string(), content_type.to_string());
        } else {
            self.overrides
                .insert(partname.to_string(), content_type.to_string());
        }
    }

    fn is_default_content_type(ext: &str, content_type: &str) -> bool {
        matches!(
            (ext, content_type),
            ("rels", ct::OPC_RELATIONSHIPS) | ("xml", ct::XML) | ("png", "image/png") | ("jpeg", "image/jpeg")
        )
    }

    fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(256 + self.overrides.len() * 160);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(r#"<Types xmlns=""#);
        xml.push_str(namespace::OPC_CONTENT_TYPES);
        xml.push_str(r#"">"#);

        for (ext, content_type) in &self.defaults {
            xml.push_str(r#"<Default Extension=""#);
            push_escaped(&mut xml, ext);
            xml.push_str(r#"" ContentType=""#);
            push_escaped(&mut xml, content_type);
            xml.push_str(r#""/>"#);
        }

        for (partname, content_type) in &self.overrides {
            xml.push_str(r#"<Override PartName=""#);
            push_escaped(&mut xml, partname);
            xml.push_str(r#"" ContentType=""#);
            push_escaped(&mut xml, content_type);
            xml.push_str(r#""/>"#);
        }

        xml.push_str("</Types>");
        xml
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::constants::relationship_type as rt;
    use crate::ooxml::opc::part::Part;
    use crate::ooxml::opc::phys_pkg::PhysPkgReader;

    #[test]
    fn test_content_types_xml() {
        let mut cti = ContentTypesItem::new();
        cti.add_content_type(
            &PackURI::new("/ppt/slides/slide1.xml").unwrap(),
            ct::PML_SLIDE,
        );
        cti.add_content_type(&PackURI::new("/ppt/media/image1.png").unwrap(), "image/png");

        let xml = cti.to_xml();
        assert!(xml.contains(r#"<Default Extension="png" ContentType="image/png"/>"#));
        assert!(xml.contains(r#"<Override PartName="/ppt/slides/slide1.xml""#));
        assert!(!xml.contains(r#"PartName="/ppt/media/image1.png""#));
    }

    #[test]
    fn test_writes_parts_and_rels() {
        let mut pkg = OpcPackage::new();
        let pres_uri = PackURI::new("/ppt/presentation.xml").unwrap();
        let slide_uri = PackURI::new("/ppt/slides/slide1.xml").unwrap();

        let mut pres = Part::new(pres_uri.clone(), ct::PML_PRESENTATION_MAIN, "<p:presentation/>");
        pres.relate_to(&slide_uri, rt::SLIDE);
        pkg.add_part(pres).unwrap();
        pkg.add_part(Part::new(slide_uri.clone(), ct::PML_SLIDE, "<p:sld/>"))
            .unwrap();
        pkg.relate_to(&pres_uri, rt::OFFICE_DOCUMENT);

        let bytes = PackageWriter::to_bytes(&pkg).unwrap();
        let mut reader = PhysPkgReader::new(&bytes).unwrap();

        assert_eq!(
            reader.member_names(),
            vec![
                "[Content_Types].xml",
                "_rels/.rels",
                "ppt/presentation.xml",
                "ppt/_rels/presentation.xml.rels",
                "ppt/slides/slide1.xml",
            ]
        );
        let rels = reader.rels_xml_for(&pres_uri).unwrap().unwrap();
        assert!(String::from_utf8(rels).unwrap().contains(r#"Target="slides/slide1.xml""#));
        assert!(reader.rels_xml_for(&slide_uri).unwrap().is_none());
    }
}
