//! Document walker: one pass over a document that builds an
//! [`AnalysisReport`] and narrates what it finds.

mod report;
mod trace;

pub use report::{
    AnalysisReport, CellParagraphRecord, CellRecord, DocumentInfo, ParagraphRecord, RunRecord,
    TableRecord,
};
pub use trace::Trace;

use crate::document::{Document, Paragraph, Run, Table, Underline};
use crate::error::{Error, Result};
use log::{debug, info};
use std::collections::BTreeSet;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Output file name used when none is configured
pub const DEFAULT_OUTPUT: &str = "word_analysis.json";

/// What to analyse and where to put the JSON dump
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzeOptions {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl AnalyzeOptions {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }
}

/// Accumulates records during the walk; consumed into the final report
struct ReportBuilder {
    info: DocumentInfo,
    paragraphs: Vec<ParagraphRecord>,
    tables: Vec<TableRecord>,
    styles: BTreeSet<String>,
}

/// Extract a run. Blank runs yield `None`.
fn run_record(run: &Run) -> Option<RunRecord> {
    let text = run.text();
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    Some(RunRecord {
        text: text.to_string(),
        bold: run.bold(),
        italic: run.italic(),
        underline: run.underline().map(Underline::is_underlined),
        font_name: run
            .font_name()
            .filter(|n| !n.trim().is_empty())
            .map(str::to_string),
        font_size: run.font_size(),
        font_color: run.color().map(str::to_string),
    })
}

impl ReportBuilder {
    fn new(info: DocumentInfo) -> Self {
        Self {
            info,
            paragraphs: Vec::new(),
            tables: Vec::new(),
            styles: BTreeSet::new(),
        }
    }

    /// Runs of a top-level paragraph; their fonts and sizes feed `styles_used`
    fn runs(&mut self, para: &Paragraph) -> Vec<RunRecord> {
        let runs: Vec<RunRecord> = para.runs().filter_map(run_record).collect();
        for run in &runs {
            if let Some(name) = &run.font_name {
                self.styles.insert(format!("Font: {name}"));
            }
            if let Some(size) = run.font_size {
                self.styles.insert(format!("Size: {size}"));
            }
        }
        runs
    }

    fn finish(self) -> AnalysisReport {
        AnalysisReport {
            document_info: self.info,
            paragraphs: self.paragraphs,
            tables: self.tables,
            styles_used: self.styles,
        }
    }
}

/// Walks a document and writes the running trace to `W`
pub struct Analyzer<W: Write> {
    trace: Trace<W>,
}

impl<W: Write> Analyzer<W> {
    pub fn new(out: W) -> Self {
        Self {
            trace: Trace::new(out),
        }
    }

    /// Give back the trace sink
    pub fn into_inner(self) -> W {
        self.trace.into_inner()
    }

    /// Locate, open and analyse the document at `path`
    pub fn analyze_path(&mut self, path: &Path) -> Result<AnalysisReport> {
        if !path.exists() {
            return Err(Error::NotFound(path.to_path_buf()));
        }

        let doc = Document::open(path)?;
        self.analyze(&doc, path)
    }

    /// Analyse an opened document; `source` names it in the metadata and trace
    pub fn analyze(&mut self, doc: &Document, source: &Path) -> Result<AnalysisReport> {
        let info = DocumentInfo {
            filename: source
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            total_paragraphs: doc.paragraph_count(),
            total_tables: doc.table_count(),
        };
        self.trace.header(source, &info)?;

        let mut builder = ReportBuilder::new(info);

        for (index, para) in doc.paragraphs().enumerate() {
            let text = para.text();
            let text = text.trim();
            if text.is_empty() {
                continue;
            }

            let record = ParagraphRecord {
                index,
                text: text.to_string(),
                alignment: para.alignment(),
                runs: builder.runs(para),
            };
            self.trace.paragraph(&record)?;
            builder.paragraphs.push(record);
        }

        for (index, table) in doc.tables().enumerate() {
            let record = self.table(index, table)?;
            builder.tables.push(record);
        }

        self.trace.styles(&builder.styles)?;

        let report = builder.finish();
        debug!(
            "analysed {}: {} paragraphs, {} tables, {} styles",
            report.document_info.filename,
            report.paragraphs.len(),
            report.tables.len(),
            report.styles_used.len()
        );
        Ok(report)
    }

    fn table(&mut self, index: usize, table: &Table) -> Result<TableRecord> {
        let rows = table.row_count();
        let columns = table.column_count();
        self.trace.table(index, rows, columns)?;

        let mut cells = Vec::new();
        for grid in table.grid_cells() {
            let text = grid.cell.text();
            let text = text.trim();
            if text.is_empty() {
                continue;
            }

            let paragraphs = grid
                .cell
                .paragraphs()
                .filter_map(|para| {
                    let para_text = para.text();
                    let para_text = para_text.trim();
                    (!para_text.is_empty()).then(|| CellParagraphRecord {
                        text: para_text.to_string(),
                        alignment: para.alignment(),
                        runs: para.runs().filter_map(run_record).collect(),
                    })
                })
                .collect();

            let record = CellRecord {
                row: grid.row,
                column: grid.column,
                text: text.to_string(),
                paragraphs,
            };
            self.trace.cell(&record)?;
            cells.push(record);
        }

        Ok(TableRecord {
            index,
            rows,
            columns,
            cells,
        })
    }

    /// Full run: analyse `options.input`, then write the JSON dump.
    ///
    /// Nothing is written unless the whole analysis succeeded.
    pub fn run(&mut self, options: &AnalyzeOptions) -> Result<AnalysisReport> {
        let report = self.analyze_path(&options.input)?;
        report.write_json(&options.output)?;
        info!("wrote {}", options.output.display());
        self.trace.saved(&options.output)?;
        Ok(report)
    }
}

/// Analyse `options.input` with the trace going to `out`
pub fn run<W: Write>(options: &AnalyzeOptions, out: W) -> Result<AnalysisReport> {
    Analyzer::new(out).run(options)
}

/// Print the closing banner for a run
pub fn report_outcome<W: Write>(result: &Result<AnalysisReport>, out: W) -> io::Result<()> {
    let mut trace = Trace::new(out);
    match result {
        Ok(_) => trace.line("\n✅ Analysis completed successfully!"),
        Err(e) => {
            match e {
                Error::NotFound(_) => trace.line(e)?,
                _ => trace.line(format_args!("Error analysing document: {e}"))?,
            }
            trace.line("❌ Document analysis failed")
        }
    }
}
