//! Table row elements (w:tr)

use crate::error::{Error, Result};
use crate::xml::skip_element;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::BufRead;

use super::cell::TableCell;
use super::grid_count;

/// Table row (w:tr)
#[derive(Clone, Debug, Default)]
pub struct TableRow {
    /// Grid columns skipped before the first cell (w:trPr/w:gridBefore)
    pub grid_before: usize,
    /// Cells
    pub cells: Vec<TableCell>,
}

impl TableRow {
    /// Parse from reader (after w:tr start tag)
    pub fn from_reader<R: BufRead>(reader: &mut Reader<R>) -> Result<Self> {
        let mut row = TableRow::default();
        let mut buf = Vec::new();
        let mut in_props = false;

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => match e.name().local_name().as_ref() {
                    b"trPr" => in_props = true,
                    b"tc" => row.cells.push(TableCell::from_reader(reader)?),
                    _ => skip_element(reader, &e)?,
                },
                Event::Empty(e) => {
                    if in_props && e.name().local_name().as_ref() == b"gridBefore" {
                        row.grid_before = grid_count(&e)?.unwrap_or(0);
                    }
                }
                Event::End(e) => match e.name().local_name().as_ref() {
                    b"trPr" => in_props = false,
                    b"tr" => break,
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        row.cells
            .iter()
            .try_fold(row.grid_before, |width, cell| width.checked_add(cell.grid_span()))
            .ok_or_else(|| Error::InvalidDocument("table row overflows the grid".into()))?;

        Ok(row)
    }

    /// Iterate over cells
    pub fn cells(&self) -> impl Iterator<Item = &TableCell> {
        self.cells.iter()
    }

    /// Grid columns covered by this row, gridBefore included
    pub fn grid_width(&self) -> usize {
        self.cells
            .iter()
            .fold(self.grid_before, |width, cell| width.saturating_add(cell.grid_span()))
    }
}
