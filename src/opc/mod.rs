//! Open Packaging Convention (OPC) reader
//!
//! A DOCX file is a ZIP container of parts tied together by content types
//! and relationships. This module loads those pieces so the document layer
//! can find `word/document.xml` (or wherever the package points).

mod content_types;
mod package;
mod part;
mod part_uri;
mod relationships;

pub use content_types::{is_word_document, ContentTypes, MAIN_DOCUMENT};
pub use package::Package;
pub use part::Part;
pub use part_uri::PartUri;
pub use relationships::{rel_types, Relationship, Relationships, TargetMode};
