//! Document model - read-only view of a DOCX body

mod body;
mod paragraph;
mod run;
mod table;

pub use body::{BlockContent, Body};
pub use paragraph::{Alignment, Hyperlink, Paragraph, ParagraphContent, ParagraphProperties};
pub use run::{BreakType, FontSize, Run, RunContent, RunFonts, RunProperties, Underline};
pub use table::{GridCell, GridColumn, Table, TableCell, TableCellProperties, TableRow, VMerge};

use crate::error::{Error, Result};
use crate::opc::{is_word_document, Package};
use crate::xml::skip_element;
use log::debug;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::path::Path;

/// A DOCX document
#[derive(Debug)]
pub struct Document {
    /// Underlying OPC package
    package: Package,
    /// Parsed document body
    body: Body,
}

impl Document {
    /// Open a document from a file path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let package = Package::open(path)?;
        Self::from_package(package)
    }

    /// Open a document from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let package = Package::from_bytes(bytes)?;
        Self::from_package(package)
    }

    /// Create document from an OPC package
    fn from_package(package: Package) -> Result<Self> {
        let doc_part = package
            .main_document_part()
            .ok_or_else(|| Error::MissingPart("main document part".into()))?;

        if !is_word_document(doc_part.content_type()) {
            return Err(Error::UnsupportedContentType(doc_part.content_type().to_string()));
        }

        let body = parse_document_xml(doc_part.data_as_str()?)?;
        debug!(
            "parsed {}: {} blocks",
            doc_part.uri(),
            body.content.len()
        );

        Ok(Self { package, body })
    }

    /// Get all top-level paragraphs
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.body.paragraphs()
    }

    /// Get top-level paragraph count (blank paragraphs included)
    pub fn paragraph_count(&self) -> usize {
        self.body.paragraphs().count()
    }

    /// Get paragraph by index
    pub fn paragraph(&self, index: usize) -> Option<&Paragraph> {
        self.body.paragraphs().nth(index)
    }

    /// Get all top-level tables
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.body.tables()
    }

    /// Get top-level table count
    pub fn table_count(&self) -> usize {
        self.body.tables().count()
    }

    /// Get table by index
    pub fn table(&self, index: usize) -> Option<&Table> {
        self.body.tables().nth(index)
    }

    /// Get all paragraph text, one paragraph per line
    pub fn text(&self) -> String {
        self.body
            .paragraphs()
            .map(|p| p.text())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Block content in document order
    pub fn blocks(&self) -> &[BlockContent] {
        &self.body.content
    }

    /// Get the underlying package
    pub fn package(&self) -> &Package {
        &self.package
    }
}

/// Parse document.xml content
fn parse_document_xml(xml: &str) -> Result<Body> {
    let mut reader = Reader::from_str(xml);
    let mut body = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().local_name().as_ref() {
                b"body" => body = Some(Body::from_reader(&mut reader)?),
                b"document" => {}
                _ => skip_element(&mut reader, &e)?,
            },
            Event::Empty(e) if e.name().local_name().as_ref() == b"body" => {
                body = Some(Body::default());
            }
            Event::Eof => break,
            _ => {}
        }
    }

    body.ok_or_else(|| Error::InvalidDocument("missing w:body element".into()))
}
