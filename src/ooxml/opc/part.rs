//! Parts of an OPC package.
//!
//! A part is a named blob with a content type and its own outgoing
//! relationships. The presentation writer builds every part as serialized
//! XML before handing it to the package.

use crate::ooxml::opc::packuri::PackURI;
use crate::ooxml::opc::rel::Relationships;

/// A part in an OPC package.
#[derive(Debug)]
pub struct Part {
    /// The partname (URI) of this part
    partname: PackURI,

    /// The content type of this part
    content_type: String,

    /// Serialized content
    blob: Vec<u8>,

    /// Relationships from this part to other parts
    rels: Relationships,
}

impl Part {
    /// Create a new part with no relationships.
    pub fn new(partname: PackURI, content_type: &str, blob: impl Into<Vec<u8>>) -> Self {
        let rels = Relationships::new(partname.base_uri().to_string());
        Self {
            partname,
            content_type: content_type.to_string(),
            blob: blob.into(),
            rels,
        }
    }

    #[inline]
    pub fn partname(&self) -> &PackURI {
        &self.partname
    }

    #[inline]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    #[inline]
    pub fn blob(&self) -> &[u8] {
        &self.blob
    }

    /// Replace the serialized content.
    pub fn set_blob(&mut self, blob: impl Into<Vec<u8>>) {
        self.blob = blob.into();
    }

    #[inline]
    pub fn rels(&self) -> &Relationships {
        &self.rels
    }

    /// Add or get a relationship to another part and return its rId.
    pub fn relate_to(&mut self, target: &PackURI, reltype: &str) -> String {
        let target_ref = target.relative_ref(self.partname.base_uri());
        self.rels.get_or_add(reltype, &target_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::constants::{content_type as ct, relationship_type as rt};

    #[test]
    fn test_relate_to_uses_relative_target() {
        let mut slide = Part::new(
            PackURI::new("/ppt/slides/slide1.xml").unwrap(),
            ct::PML_SLIDE,
            "<p:sld/>",
        );
        let layout = PackURI::new("/ppt/slideLayouts/slideLayout2.xml").unwrap();
        let r_id = slide.relate_to(&layout, rt::SLIDE_LAYOUT);

        assert_eq!(r_id, "rId1");
        let rel = slide.rels().get("rId1").unwrap();
        assert_eq!(rel.target_ref(), "../slideLayouts/slideLayout2.xml");
        assert_eq!(rel.target_partname().unwrap(), layout);
    }
}
