//! Table elements (w:tbl, w:tr, w:tc)

mod cell;
mod row;
mod types;

pub use cell::{TableCell, TableCellProperties};
pub use row::TableRow;
pub use types::{GridCell, GridColumn, VMerge};

use crate::error::{Error, Result};
use crate::xml::{get_w_attr, get_w_val, skip_element};
use log::warn;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;
use std::io::BufRead;

/// Widest grid a row may address; Word caps tables at 63 columns
pub const MAX_GRID_COLUMNS: usize = 63;

/// Table element (w:tbl)
#[derive(Clone, Debug, Default)]
pub struct Table {
    /// Table grid
    pub grid: Vec<GridColumn>,
    /// Table rows
    pub rows: Vec<TableRow>,
}

impl Table {
    /// Parse from reader (after w:tbl start tag)
    pub fn from_reader<R: BufRead>(reader: &mut Reader<R>) -> Result<Self> {
        let mut table = Table::default();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => match e.name().local_name().as_ref() {
                    b"tblGrid" => table.grid = parse_table_grid(reader)?,
                    b"tr" => table.rows.push(TableRow::from_reader(reader)?),
                    _ => skip_element(reader, &e)?,
                },
                Event::End(e) => {
                    if e.name().local_name().as_ref() == b"tbl" {
                        break;
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(table)
    }

    /// Get row count
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get column count: the grid definition, or the widest row without one
    pub fn column_count(&self) -> usize {
        if !self.grid.is_empty() {
            return self.grid.len();
        }
        self.rows.iter().map(TableRow::grid_width).max().unwrap_or(0)
    }

    /// Cells laid out on the table grid, in row-major order.
    ///
    /// A cell spanning several grid columns is yielded once per column it
    /// covers. A vertically merged continuation cell yields the cell that
    /// started the merge.
    pub fn grid_cells(&self) -> Vec<GridCell<'_, TableCell>> {
        let mut out = Vec::new();
        let mut above: HashMap<usize, &TableCell> = HashMap::new();

        for (row_idx, row) in self.rows.iter().enumerate() {
            let mut current: HashMap<usize, &TableCell> = HashMap::new();
            let mut column = row.grid_before;

            for cell in row.cells() {
                let span = cell.grid_span();
                let origin = if cell.is_v_merge_continue() {
                    above.get(&column).copied().unwrap_or(cell)
                } else {
                    cell
                };

                for offset in 0..span {
                    current.insert(column + offset, origin);
                    out.push(GridCell {
                        row: row_idx,
                        column: column + offset,
                        cell: origin,
                    });
                }
                column += span;
            }

            above = current;
        }

        out
    }
}

/// Parse a grid column count (`w:gridSpan`, `w:gridBefore`).
///
/// Counts past [`MAX_GRID_COLUMNS`] are rejected; non-numeric values are ignored.
fn grid_count(e: &BytesStart) -> Result<Option<usize>> {
    let Some(val) = get_w_val(e) else {
        return Ok(None);
    };
    let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
    let val = val.trim();

    match val.parse::<u64>() {
        Ok(n) if n <= MAX_GRID_COLUMNS as u64 => Ok(Some(n as usize)),
        Err(_) if val.is_empty() || !val.bytes().all(|b| b.is_ascii_digit()) => {
            warn!("ignoring {name} value '{val}'");
            Ok(None)
        }
        _ => Err(Error::InvalidDocument(format!(
            "{name} of {val} exceeds the {MAX_GRID_COLUMNS}-column table grid"
        ))),
    }
}

/// Parse table grid
fn parse_table_grid<R: BufRead>(reader: &mut Reader<R>) -> Result<Vec<GridColumn>> {
    let mut columns = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Empty(e) | Event::Start(e) => {
                if e.name().local_name().as_ref() == b"gridCol" {
                    let width = get_w_attr(&e, "w").and_then(|v| v.parse().ok());
                    columns.push(GridColumn { width });
                }
            }
            Event::End(e) => {
                if e.name().local_name().as_ref() == b"tblGrid" {
                    break;
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(columns)
}
