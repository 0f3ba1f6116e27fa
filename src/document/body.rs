//! Document body and block-level content

use crate::document::{Paragraph, Table};
use crate::error::Result;
use crate::xml::skip_element;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::BufRead;

/// Block-level content in a document body
#[derive(Clone, Debug)]
pub enum BlockContent {
    /// Paragraph
    Paragraph(Paragraph),
    /// Table
    Table(Table),
}

/// Document body (w:body)
#[derive(Clone, Debug, Default)]
pub struct Body {
    /// Block-level content in document order
    pub content: Vec<BlockContent>,
}

impl Body {
    /// Parse body from XML reader (after w:body start tag)
    pub fn from_reader<R: BufRead>(reader: &mut Reader<R>) -> Result<Self> {
        let mut body = Body::default();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => match e.name().local_name().as_ref() {
                    b"p" => {
                        let para = Paragraph::from_reader(reader)?;
                        body.content.push(BlockContent::Paragraph(para));
                    }
                    b"tbl" => {
                        let table = Table::from_reader(reader)?;
                        body.content.push(BlockContent::Table(table));
                    }
                    // sectPr, sdt, bookmarks, ...
                    _ => skip_element(reader, &e)?,
                },
                Event::Empty(e) => {
                    if e.name().local_name().as_ref() == b"p" {
                        body.content.push(BlockContent::Paragraph(Paragraph::default()));
                    }
                }
                Event::End(e) => {
                    if e.name().local_name().as_ref() == b"body" {
                        break;
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(body)
    }

    /// Get all top-level paragraphs
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.content.iter().filter_map(|c| match c {
            BlockContent::Paragraph(p) => Some(p),
            _ => None,
        })
    }

    /// Get all top-level tables
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.content.iter().filter_map(|c| match c {
            BlockContent::Table(t) => Some(t),
            _ => None,
        })
    }
}
