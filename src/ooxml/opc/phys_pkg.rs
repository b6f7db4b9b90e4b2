//! Physical (ZIP) layer of an OPC package.
//!
//! [`PhysPkgWriter`] streams parts into a ZIP archive in memory;
//! [`PhysPkgReader`] reads members back by partname.

use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::{CONTENT_TYPES_URI, PackURI};
use std::io::{Cursor, Read, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Physical package writer.
///
/// Every part is Deflate-compressed. Member timestamps are left at the ZIP
/// epoch so that identical packages produce identical archives.
pub struct PhysPkgWriter {
    archive: ZipWriter<Cursor<Vec<u8>>>,
    options: SimpleFileOptions,
}

impl PhysPkgWriter {
    /// Create a new package writer that writes to memory.
    pub fn new() -> Self {
        Self {
            archive: ZipWriter::new(Cursor::new(Vec::new())),
            options: SimpleFileOptions::default().compression_method(CompressionMethod::Deflated),
        }
    }

    /// Write a part to the package.
    pub fn write(&mut self, pack_uri: &PackURI, blob: &[u8]) -> Result<()> {
        self.archive.start_file(pack_uri.membername(), self.options)?;
        self.archive.write_all(blob)?;
        Ok(())
    }

    /// Finish writing and return the archive bytes.
    pub fn finish(self) -> Result<Vec<u8>> {
        Ok(self.archive.finish()?.into_inner())
    }
}

impl Default for PhysPkgWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Physical package reader over an in-memory archive.
pub struct PhysPkgReader<'data> {
    archive: ZipArchive<Cursor<&'data [u8]>>,
}

impl<'data> PhysPkgReader<'data> {
    /// Open the archive in `data`.
    pub fn new(data: &'data [u8]) -> Result<Self> {
        let archive = ZipArchive::new(Cursor::new(data))?;
        Ok(Self { archive })
    }

    /// Decompressed content of the part at `pack_uri`.
    pub fn blob_for(&mut self, pack_uri: &PackURI) -> Result<Vec<u8>> {
        let mut file = self
            .archive
            .by_name(pack_uri.membername())
            .map_err(|_| OpcError::PartNotFound(pack_uri.to_string()))?;
        let mut blob = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut blob)?;
        Ok(blob)
    }

    /// Relationships XML of `source_uri`, or `None` when it has none.
    pub fn rels_xml_for(&mut self, source_uri: &PackURI) -> Result<Option<Vec<u8>>> {
        let rels_uri = source_uri.rels_uri().map_err(OpcError::InvalidPackUri)?;
        match self.blob_for(&rels_uri) {
            Ok(blob) => Ok(Some(blob)),
            Err(OpcError::PartNotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// The `[Content_Types].xml` content.
    pub fn content_types_xml(&mut self) -> Result<Vec<u8>> {
        let uri = PackURI::new(CONTENT_TYPES_URI).map_err(OpcError::InvalidPackUri)?;
        self.blob_for(&uri)
    }

    /// All member names in archive order.
    pub fn member_names(&self) -> Vec<String> {
        self.archive.file_names().map(String::from).collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.archive.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.archive.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let mut writer = PhysPkgWriter::new();
        let pack_uri = PackURI::new("/ppt/slides/slide1.xml").unwrap();
        writer.write(&pack_uri, b"<p:sld/>").unwrap();
        let zip_data = writer.finish().unwrap();

        let mut reader = PhysPkgReader::new(&zip_data).unwrap();
        assert_eq!(reader.len(), 1);
        assert_eq!(reader.blob_for(&pack_uri).unwrap(), b"<p:sld/>");
        assert_eq!(reader.member_names(), vec!["ppt/slides/slide1.xml".to_string()]);
    }

    #[test]
    fn test_missing_part() {
        let mut writer = PhysPkgWriter::new();
        writer
            .write(&PackURI::new("/ppt/presentation.xml").unwrap(), b"<p:presentation/>")
            .unwrap();
        let zip_data = writer.finish().unwrap();

        let mut reader = PhysPkgReader::new(&zip_data).unwrap();
        let slide = PackURI::new("/ppt/slides/slide1.xml").unwrap();
        assert!(matches!(
            reader.blob_for(&slide),
            Err(OpcError::PartNotFound(_))
        ));
        assert!(reader.rels_xml_for(&slide).unwrap().is_none());
    }

    #[test]
    fn test_identical_input_gives_identical_archive() {
        let build = || {
            let mut writer = PhysPkgWriter::new();
            writer
                .write(&PackURI::new("/a.xml").unwrap(), b"<a/>")
                .unwrap();
            writer.finish().unwrap()
        };
        assert_eq!(build(), build());
    }
}
