//! # docx-inspect
//!
//! Dump the text and formatting structure of a DOCX file.
//!
//! The walker visits every top-level paragraph and table, records run-level
//! formatting (bold, italic, underline, font, size, color), collects the
//! distinct fonts and sizes in use, narrates what it finds to a writer, and
//! produces an [`AnalysisReport`] that serializes to JSON.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use docx_inspect::{AnalyzeOptions, Analyzer};
//!
//! let options = AnalyzeOptions::new("report.docx").with_output("report.json");
//! let report = Analyzer::new(std::io::stdout()).run(&options)?;
//! println!("{} styles", report.styles_used.len());
//! ```

pub mod analysis;
pub mod document;
pub mod error;
pub mod opc;
pub mod xml;

pub use analysis::{report_outcome, run, AnalysisReport, AnalyzeOptions, Analyzer, DEFAULT_OUTPUT};
pub use document::{Document, Paragraph, Run, Table};
pub use error::{Error, Result};
pub use opc::{Package, Part, PartUri};
