//! Relationships between parts of an OPC package.
//!
//! Every part (and the package itself) owns a [`Relationships`] collection
//! that is serialized to its `.rels` part. Targets are stored relative to the
//! source part's directory.

use crate::common::xml::{push_escaped, unescape_xml};
use crate::ooxml::opc::constants::namespace;
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::PackURI;
use quick_xml::Reader;
use quick_xml::events::Event;
use std::collections::HashMap;

/// A single internal relationship from a source part to a target part.
#[derive(Debug, Clone)]
pub struct Relationship {
    /// Relationship ID (e.g., "rId1", "rId2")
    r_id: String,

    /// Relationship type URI
    reltype: String,

    /// Target reference relative to `base_uri`
    target_ref: String,

    /// Directory of the source part
    base_uri: String,
}

impl Relationship {
    pub fn new(r_id: String, reltype: String, target_ref: String, base_uri: String) -> Self {
        Self {
            r_id,
            reltype,
            target_ref,
            base_uri,
        }
    }

    #[inline]
    pub fn r_id(&self) -> &str {
        &self.r_id
    }

    #[inline]
    pub fn reltype(&self) -> &str {
        &self.reltype
    }

    #[inline]
    pub fn target_ref(&self) -> &str {
        &self.target_ref
    }

    /// Absolute partname of the target.
    pub fn target_partname(&self) -> Result<PackURI> {
        PackURI::from_rel_ref(&self.base_uri, &self.target_ref).map_err(OpcError::InvalidPackUri)
    }
}

/// Collection of relationships from a single source.
#[derive(Debug)]
pub struct Relationships {
    /// Directory of the source part, used to resolve targets
    base_uri: String,

    /// Map of relationship ID to Relationship
    rels: HashMap<String, Relationship>,
}

impl Relationships {
    /// Create an empty collection for a source located in `base_uri`.
    pub fn new(base_uri: String) -> Self {
        Self {
            base_uri,
            rels: HashMap::new(),
        }
    }

    /// Parse the XML of a `.rels` part.
    ///
    /// External relationships are skipped; a presentation package written by
    /// this crate never contains them.
    pub fn from_xml(base_uri: &str, xml: &[u8]) -> Result<Self> {
        let mut rels = Self::new(base_uri.to_string());
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                    if e.local_name().as_ref() == b"Relationship" =>
                {
                    let mut r_id = None;
                    let mut reltype = None;
                    let mut target_ref = None;
                    let mut external = false;

                    for attr in e.attributes() {
                        let attr = attr.map_err(|e| OpcError::XmlError(e.to_string()))?;
                        match attr.key.as_ref() {
                            b"Id" => r_id = Some(unescape_xml(std::str::from_utf8(&attr.value)?)),
                            b"Type" => reltype = Some(unescape_xml(std::str::from_utf8(&attr.value)?)),
                            b"Target" => {
                                target_ref = Some(unescape_xml(std::str::from_utf8(&attr.value)?))
                            },
                            b"TargetMode" => external = attr.value.as_ref() == b"External",
                            _ => {},
                        }
                    }

                    if let (Some(id), Some(rt), Some(tr), false) =
                        (r_id, reltype, target_ref, external)
                    {
                        rels.add_relationship(rt, tr, id);
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(OpcError::XmlError(format!("Rels parse error: {}", e))),
                _ => {},
            }
            buf.clear();
        }

        Ok(rels)
    }

    /// Add a relationship with an explicit rId, replacing any previous one
    /// with the same ID.
    pub fn add_relationship(&mut self, reltype: String, target_ref: String, r_id: String) {
        let rel = Relationship::new(r_id.clone(), reltype, target_ref, self.base_uri.clone());
        self.rels.insert(r_id, rel);
    }

    #[inline]
    pub fn get(&self, r_id: &str) -> Option<&Relationship> {
        self.rels.get(r_id)
    }

    /// Return the rId of the relationship of `reltype` to `target_ref`,
    /// creating it with the next free rId if absent.
    pub fn get_or_add(&mut self, reltype: &str, target_ref: &str) -> String {
        if let Some(rel) = self
            .rels
            .values()
            .find(|rel| rel.reltype() == reltype && rel.target_ref() == target_ref)
        {
            return rel.r_id().to_string();
        }

        let r_id = self.next_r_id();
        self.add_relationship(reltype.to_string(), target_ref.to_string(), r_id.clone());
        r_id
    }

    /// Next available relationship ID, filling gaps first.
    fn next_r_id(&self) -> String {
        let mut used_numbers: Vec<u32> = self
            .rels
            .keys()
            .filter_map(|r_id| {
                r_id.strip_prefix("rId")
                    .and_then(|digits| atoi_simd::parse::<u32, false, false>(digits.as_bytes()).ok())
            })
            .collect();
        used_numbers.sort_unstable();

        let mut next_num = 1u32;
        for num in used_numbers {
            match num.cmp(&next_num) {
                std::cmp::Ordering::Equal => next_num += 1,
                std::cmp::Ordering::Greater => break,
                std::cmp::Ordering::Less => {},
            }
        }

        format!("rId{}", next_num)
    }

    /// The single relationship of `reltype`.
    ///
    /// Fails when there is none or more than one.
    pub fn part_with_reltype(&self, reltype: &str) -> Result<&Relationship> {
        let mut matching = self.rels.values().filter(|rel| rel.reltype() == reltype);
        match (matching.next(), matching.next()) {
            (Some(rel), None) => Ok(rel),
            (None, _) => Err(OpcError::RelationshipNotFound(format!(
                "No relationship of type '{}'",
                reltype
            ))),
            (Some(_), Some(_)) => Err(OpcError::InvalidRelationship(format!(
                "Multiple relationships of type '{}'",
                reltype
            ))),
        }
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.rels.values()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rels.is_empty()
    }

    /// Serialize to `.rels` XML, ordered by numeric rId so the output is
    /// stable across runs.
    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(256 + self.rels.len() * 160);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(r#"<Relationships xmlns=""#);
        xml.push_str(namespace::OPC_RELATIONSHIPS);
        xml.push_str(r#"">"#);

        let mut rels: Vec<&Relationship> = self.rels.values().collect();
        rels.sort_by(|a, b| (a.r_id().len(), a.r_id()).cmp(&(b.r_id().len(), b.r_id())));

        for rel in rels {
            xml.push_str(r#"<Relationship Id=""#);
            push_escaped(&mut xml, rel.r_id());
            xml.push_str(r#"" Type=""#);
            push_escaped(&mut xml, rel.reltype());
            xml.push_str(r#"" Target=""#);
            push_escaped(&mut xml, rel.target_ref());
            xml.push_str(r#""/>"#);
        }

        xml.push_str("</Relationships>");
        xml
    }
}

impl Default for Relationships {
    fn default() -> Self {
        Self::new("/".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::constants::relationship_type as rt;

    #[test]
    fn test_next_r_id_fills_gaps() {
        let mut rels = Relationships::new("/ppt".to_string());
        assert_eq!(rels.next_r_id(), "rId1");

        rels.add_relationship(rt::SLIDE.to_string(), "slides/slide1.xml".into(), "rId1".into());
        rels.add_relationship(rt::SLIDE.to_string(), "slides/slide3.xml".into(), "rId3".into());
        assert_eq!(rels.next_r_id(), "rId2");
    }

    #[test]
    fn test_get_or_add_reuses_existing() {
        let mut rels = Relationships::new("/ppt/slides".to_string());
        let first = rels.get_or_add(rt::SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml");
        let again = rels.get_or_add(rt::SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml");
        let notes = rels.get_or_add(rt::NOTES_SLIDE, "../notesSlides/notesSlide1.xml");
        assert_eq!(first, "rId1");
        assert_eq!(again, "rId1");
        assert_eq!(notes, "rId2");
        assert_eq!(rels.len(), 2);
    }

    #[test]
    fn test_xml_round_trip() {
        let mut rels = Relationships::new("/ppt/slides".to_string());
        for n in 1..=11 {
            rels.get_or_add(rt::SLIDE, &format!("slide{}.xml", n));
        }
        let xml = rels.to_xml();
        // numeric order: rId2 precedes rId10
        assert!(xml.find(r#"Id="rId2""#).unwrap() < xml.find(r#"Id="rId10""#).unwrap());

        let parsed = Relationships::from_xml("/ppt/slides", xml.as_bytes()).unwrap();
        assert_eq!(parsed.len(), 11);
        let target = parsed.get("rId11").unwrap().target_partname().unwrap();
        assert_eq!(target.as_str(), "/ppt/slides/slide11.xml");
    }

    #[test]
    fn test_part_with_reltype() {
        let mut rels = Relationships::default();
        rels.get_or_add(rt::OFFICE_DOCUMENT, "ppt/presentation.xml");
        let rel = rels.part_with_reltype(rt::OFFICE_DOCUMENT).unwrap();
        assert_eq!(rel.target_partname().unwrap().as_str(), "/ppt/presentation.xml");
        assert!(rels.part_with_reltype(rt::THEME).is_err());
    }
}
