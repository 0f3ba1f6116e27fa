//! OPC Package implementation
//!
//! Reads a DOCX file as a ZIP package

use crate::error::{Error, Result};
use crate::opc::{rel_types, ContentTypes, Part, PartUri, Relationships};
use log::debug;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;
use zip::read::ZipArchive;

const CONTENT_TYPES_ENTRY: &str = "[Content_Types].xml";
const PACKAGE_RELS_ENTRY: &str = "_rels/.rels";

/// An OPC package (ZIP-based container for DOCX, XLSX, PPTX, etc.)
#[derive(Debug)]
pub struct Package {
    /// All parts in the package
    parts: HashMap<PartUri, Part>,
    /// Package-level relationships (/_rels/.rels)
    relationships: Relationships,
    /// Content types ([Content_Types].xml)
    content_types: ContentTypes,
}

impl Package {
    /// Open a package from a file path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("opening package {}", path.display());
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Open a package from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_reader(Cursor::new(bytes))
    }

    /// Open a package from a reader
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)?;

        let content_types = ContentTypes::from_xml(
            &read_entry(&mut archive, CONTENT_TYPES_ENTRY)?
                .ok_or_else(|| Error::MissingPart(CONTENT_TYPES_ENTRY.into()))?,
        )?;

        let relationships = match read_entry(&mut archive, PACKAGE_RELS_ENTRY)? {
            Some(xml) => Relationships::from_xml(&xml)?,
            None => Relationships::default(),
        };

        let mut package = Self {
            parts: HashMap::new(),
            relationships,
            content_types,
        };
        package.read_parts(&mut archive)?;

        debug!(
            "package loaded: {} parts, {} package relationships",
            package.parts.len(),
            package.relationships.len()
        );
        Ok(package)
    }

    /// Get all parts
    pub fn parts(&self) -> impl Iterator<Item = (&PartUri, &Part)> {
        self.parts.iter()
    }

    /// Get package-level relationships
    pub fn relationships(&self) -> &Relationships {
        &self.relationships
    }

    /// Get the main document part
    pub fn main_document_part(&self) -> Option<&Part> {
        let rel = self.relationships.by_types(rel_types::MAIN_DOCUMENT)?;
        let uri = PartUri::from_package_target(&rel.target).ok()?;
        self.parts.get(&uri)
    }

    fn read_parts<R: Read + Seek>(&mut self, archive: &mut ZipArchive<R>) -> Result<()> {
        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            let name = file.name().to_string();

            if file.is_dir() || name == CONTENT_TYPES_ENTRY {
                continue;
            }
            // Relationship parts are not addressed as content
            if name.contains("_rels/") && name.ends_with(".rels") {
                continue;
            }

            let uri = PartUri::new(&name)?;
            let content_type = self
                .content_types
                .get(&uri)
                .unwrap_or("application/octet-stream")
                .to_string();

            let mut data = Vec::new();
            file.read_to_end(&mut data)?;

            self.parts.insert(uri.clone(), Part::new(uri, content_type, data));
        }

        Ok(())
    }
}

/// Read a whole entry as text, `None` when the archive has no such entry
fn read_entry<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<Option<String>> {
    let mut file = match archive.by_name(name) {
        Ok(file) => file,
        Err(zip::result::ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let mut content = String::new();
    file.read_to_string(&mut content)?;
    Ok(Some(content))
}
