//! Table cell elements (w:tc, w:tcPr)

use crate::document::Paragraph;
use crate::error::Result;
use crate::xml::{get_w_val, skip_element};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::BufRead;

use super::grid_count;
use super::types::VMerge;

/// Table cell (w:tc)
#[derive(Clone, Debug, Default)]
pub struct TableCell {
    /// Cell properties
    pub properties: Option<TableCellProperties>,
    /// Cell paragraphs (nested tables are not kept)
    pub paragraphs: Vec<Paragraph>,
}

/// Table cell properties
#[derive(Clone, Debug, Default)]
pub struct TableCellProperties {
    /// Grid span (horizontal merge)
    pub grid_span: Option<usize>,
    /// Vertical merge
    pub v_merge: Option<VMerge>,
}

impl TableCell {
    /// Parse from reader (after w:tc start tag)
    pub fn from_reader<R: BufRead>(reader: &mut Reader<R>) -> Result<Self> {
        let mut cell = TableCell::default();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => match e.name().local_name().as_ref() {
                    b"tcPr" => {
                        cell.properties = Some(TableCellProperties::from_reader(reader)?);
                    }
                    b"p" => cell.paragraphs.push(Paragraph::from_reader(reader)?),
                    _ => skip_element(reader, &e)?,
                },
                Event::Empty(e) => {
                    if e.name().local_name().as_ref() == b"p" {
                        cell.paragraphs.push(Paragraph::default());
                    }
                }
                Event::End(e) => {
                    if e.name().local_name().as_ref() == b"tc" {
                        break;
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(cell)
    }

    /// Get cell text (all paragraphs joined by newlines)
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(|p| p.text())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Iterate over paragraphs
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.paragraphs.iter()
    }

    /// Number of grid columns the cell covers (at least one)
    pub fn grid_span(&self) -> usize {
        self.properties
            .as_ref()
            .and_then(|p| p.grid_span)
            .map_or(1, |span| span.max(1))
    }

    /// Get vertical merge status
    pub fn v_merge(&self) -> Option<VMerge> {
        self.properties.as_ref()?.v_merge
    }

    /// Check if this cell continues a vertical merge
    pub fn is_v_merge_continue(&self) -> bool {
        matches!(self.v_merge(), Some(VMerge::Continue))
    }
}

impl TableCellProperties {
    /// Parse from reader (after w:tcPr start tag)
    pub fn from_reader<R: BufRead>(reader: &mut Reader<R>) -> Result<Self> {
        let mut props = TableCellProperties::default();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => {
                    props.apply(&e)?;
                    skip_element(reader, &e)?;
                }
                Event::Empty(e) => props.apply(&e)?,
                Event::End(e) => {
                    if e.name().local_name().as_ref() == b"tcPr" {
                        break;
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(props)
    }

    fn apply(&mut self, e: &BytesStart) -> Result<()> {
        match e.name().local_name().as_ref() {
            b"gridSpan" => self.grid_span = grid_count(e)?,
            b"vMerge" => {
                self.v_merge = Some(match get_w_val(e).as_deref() {
                    Some("restart") => VMerge::Restart,
                    _ => VMerge::Continue,
                });
            }
            _ => {}
        }
        Ok(())
    }
}
