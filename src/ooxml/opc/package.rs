//! In-memory OPC package.
//!
//! Holds the package-level relationships and an ordered list of parts. Part
//! order is preserved on write so that two serializations of the same
//! package list their members identically.

use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::{PACKAGE_URI, PackURI};
use crate::ooxml::opc::part::Part;
use crate::ooxml::opc::rel::Relationships;
use std::collections::HashMap;

#[derive(Debug)]
pub struct OpcPackage {
    /// Package-level relationships (`/_rels/.rels`)
    rels: Relationships,

    /// Parts in insertion order
    parts: Vec<Part>,

    /// Partname to index in `parts`
    index: HashMap<PackURI, usize>,
}

impl OpcPackage {
    /// Create an empty package.
    pub fn new() -> Self {
        Self {
            rels: Relationships::new(PACKAGE_URI.to_string()),
            parts: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Add a part. Partnames must be unique.
    pub fn add_part(&mut self, part: Part) -> Result<()> {
        if self.index.contains_key(part.partname()) {
            return Err(OpcError::DuplicatePart(part.partname().to_string()));
        }
        self.index.insert(part.partname().clone(), self.parts.len());
        self.parts.push(part);
        Ok(())
    }

    /// Add a package-level relationship to `target` and return its rId.
    pub fn relate_to(&mut self, target: &PackURI, reltype: &str) -> String {
        let target_ref = target.relative_ref(PACKAGE_URI);
        self.rels.get_or_add(reltype, &target_ref)
    }

    pub fn part(&self, partname: &PackURI) -> Result<&Part> {
        self.index
            .get(partname)
            .map(|&i| &self.parts[i])
            .ok_or_else(|| OpcError::PartNotFound(partname.to_string()))
    }

    #[inline]
    pub fn iter_parts(&self) -> impl Iterator<Item = &Part> {
        self.parts.iter()
    }

    #[inline]
    pub fn rels(&self) -> &Relationships {
        &self.rels
    }

    #[inline]
    pub fn part_count(&self) -> usize {
        self.parts.len()
    }
}

impl Default for OpcPackage {
    fn default() -> Self {
        Self::new()
    }
}
