//! In-memory DOCX fixtures

#![allow(dead_code)]

use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

pub const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
</Types>"#;

pub const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#;

/// Wrap body content in a w:document
pub fn document_xml(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
<w:body>{body}<w:sectPr/></w:body>
</w:document>"#
    )
}

/// Zip the given entries into a package
pub fn zip_entries(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in entries {
        zip.start_file(*name, SimpleFileOptions::default()).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

/// A minimal valid .docx whose body is `body`
pub fn docx_bytes(body: &str) -> Vec<u8> {
    let document = document_xml(body);
    zip_entries(&[
        ("[Content_Types].xml", CONTENT_TYPES),
        ("_rels/.rels", PACKAGE_RELS),
        ("word/document.xml", document.as_str()),
    ])
}

/// Write a .docx fixture into `dir`
pub fn write_docx(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, docx_bytes(body)).unwrap();
    path
}

/// `<w:p>` with one plain run
pub fn para(text: &str) -> String {
    format!(r#"<w:p><w:r><w:t xml:space="preserve">{text}</w:t></w:r></w:p>"#)
}

/// `<w:r>` with the given run properties
pub fn run(rpr: &str, text: &str) -> String {
    format!(r#"<w:r><w:rPr>{rpr}</w:rPr><w:t xml:space="preserve">{text}</w:t></w:r>"#)
}

/// Table from rows of cell texts (empty text gives an empty paragraph)
pub fn table(rows: &[&[&str]]) -> String {
    let columns = rows.first().map_or(0, |r| r.len());
    let grid = "<w:gridCol w:w=\"2000\"/>".repeat(columns);
    let body: String = rows
        .iter()
        .map(|cells| {
            let tcs: String = cells
                .iter()
                .map(|text| {
                    if text.is_empty() {
                        "<w:tc><w:p/></w:tc>".to_string()
                    } else {
                        format!("<w:tc>{}</w:tc>", para(text))
                    }
                })
                .collect();
            format!("<w:tr>{tcs}</w:tr>")
        })
        .collect();
    format!("<w:tbl><w:tblGrid>{grid}</w:tblGrid>{body}</w:tbl>")
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
