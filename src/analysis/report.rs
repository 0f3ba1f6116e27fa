//! Serializable analysis result

use crate::document::{Alignment, FontSize};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// Everything extracted from one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub document_info: DocumentInfo,
    pub paragraphs: Vec<ParagraphRecord>,
    pub tables: Vec<TableRecord>,
    /// Distinct `Font: <name>` / `Size: <value>` descriptors, sorted
    pub styles_used: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentInfo {
    pub filename: String,
    pub total_paragraphs: usize,
    pub total_tables: usize,
}

/// A non-blank top-level paragraph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParagraphRecord {
    /// Position among all top-level paragraphs, blank ones included
    pub index: usize,
    pub text: String,
    #[serde(with = "none_marker")]
    pub alignment: Option<Alignment>,
    pub runs: Vec<RunRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub text: String,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    /// `true` for any drawn line style, `false` for an explicit `none`
    pub underline: Option<bool>,
    pub font_name: Option<String>,
    #[serde(with = "none_marker")]
    pub font_size: Option<FontSize>,
    #[serde(with = "none_marker")]
    pub font_color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRecord {
    pub index: usize,
    pub rows: usize,
    pub columns: usize,
    pub cells: Vec<CellRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellRecord {
    pub row: usize,
    pub column: usize,
    pub text: String,
    pub paragraphs: Vec<CellParagraphRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellParagraphRecord {
    pub text: String,
    #[serde(with = "none_marker")]
    pub alignment: Option<Alignment>,
    pub runs: Vec<RunRecord>,
}

impl AnalysisReport {
    /// Render as indented JSON; non-ASCII text is kept as is
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a report previously written by [`AnalysisReport::write_json`]
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write the JSON rendering to `path`.
    ///
    /// The document is rendered in memory first, so a serialization failure
    /// leaves any existing file untouched.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// `Option<T>` as its display string, or the literal `"None"` when absent
mod none_marker {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::fmt::Display;
    use std::str::FromStr;

    pub const NONE: &str = "None";

    pub fn serialize<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Display,
        S: Serializer,
    {
        match value {
            Some(v) => serializer.collect_str(v),
            None => serializer.serialize_str(NONE),
        }
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        T: FromStr,
        T::Err: Display,
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        if s == NONE {
            return Ok(None);
        }
        s.parse().map(Some).map_err(D::Error::custom)
    }
}
