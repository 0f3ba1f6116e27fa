//! Human-readable console narrative, written as the walk discovers things

use crate::analysis::report::{CellRecord, DocumentInfo, ParagraphRecord, RunRecord};
use std::collections::BTreeSet;
use std::fmt::Display;
use std::io::{self, Write};
use std::path::Path;

const RULE_WIDTH: usize = 50;

/// Writes the running trace to any `Write` sink (stdout in the binary)
pub struct Trace<W: Write> {
    out: W,
}

impl<W: Write> Trace<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn header(&mut self, source: &Path, info: &DocumentInfo) -> io::Result<()> {
        writeln!(self.out, "=== WORD DOCUMENT ANALYSIS ===")?;
        writeln!(self.out, "File: {}", source.display())?;
        writeln!(self.out, "Paragraphs: {}", info.total_paragraphs)?;
        writeln!(self.out, "Tables: {}", info.total_tables)?;
        writeln!(self.out, "\n{}", "=".repeat(RULE_WIDTH))
    }

    pub fn paragraph(&mut self, para: &ParagraphRecord) -> io::Result<()> {
        writeln!(self.out, "\nPARAGRAPH {}:", para.index + 1)?;
        writeln!(self.out, "Text: {}", para.text)?;
        writeln!(self.out, "Alignment: {}", or_none(para.alignment.as_ref()))?;

        if !para.runs.is_empty() {
            writeln!(self.out, "Text styles:")?;
            for (j, run) in para.runs.iter().enumerate() {
                self.run(j, run)?;
            }
        }
        Ok(())
    }

    fn run(&mut self, position: usize, run: &RunRecord) -> io::Result<()> {
        writeln!(self.out, "  Run {}: '{}'", position + 1, run.text)?;
        writeln!(self.out, "    Font: {}", or_none(run.font_name.as_ref()))?;
        writeln!(self.out, "    Size: {}", or_none(run.font_size.as_ref()))?;
        writeln!(self.out, "    Bold: {}", or_none(run.bold.as_ref()))?;
        writeln!(self.out, "    Italic: {}", or_none(run.italic.as_ref()))?;
        writeln!(self.out, "    Underline: {}", or_none(run.underline.as_ref()))?;
        writeln!(self.out, "    Color: {}", or_none(run.font_color.as_ref()))
    }

    pub fn table(&mut self, index: usize, rows: usize, columns: usize) -> io::Result<()> {
        writeln!(self.out, "\nTABLE {}:", index + 1)?;
        writeln!(self.out, "Rows: {rows}")?;
        writeln!(self.out, "Columns: {columns}")
    }

    pub fn cell(&mut self, cell: &CellRecord) -> io::Result<()> {
        writeln!(self.out, "  [{},{}]: {}", cell.row + 1, cell.column + 1, cell.text)
    }

    pub fn styles(&mut self, styles: &BTreeSet<String>) -> io::Result<()> {
        writeln!(self.out, "\nUNIQUE STYLES:")?;
        for style in styles {
            writeln!(self.out, "  {style}")?;
        }
        Ok(())
    }

    pub fn saved(&mut self, output: &Path) -> io::Result<()> {
        writeln!(self.out, "\nDetailed analysis saved to: {}", output.display())
    }

    pub fn line(&mut self, line: impl Display) -> io::Result<()> {
        writeln!(self.out, "{line}")
    }
}

fn or_none<T: Display>(value: Option<&T>) -> String {
    value.map_or_else(|| "None".to_string(), |v| v.to_string())
}
