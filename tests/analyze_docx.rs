//! Integration test: full analysis runs against fixtures on disk

mod common;

use common::{para, run, table, write_docx};
use docx_inspect::{report_outcome, AnalysisReport, AnalyzeOptions, Analyzer, Error};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::path::Path;

/// Run a full analysis, returning the result and the captured trace
fn analyze(input: &Path, output: &Path) -> (docx_inspect::Result<AnalysisReport>, String) {
    common::init_logger();
    let mut analyzer = Analyzer::new(Vec::new());
    let result = analyzer.run(&AnalyzeOptions::new(input).with_output(output));
    let trace = String::from_utf8(analyzer.into_inner()).unwrap();
    (result, trace)
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_blank_paragraphs_are_skipped_but_counted() {
    let dir = tempfile::tempdir().unwrap();
    let body = format!(
        "{}<w:p/>{}{}",
        para("First"),
        para("   "),
        para("Second")
    );
    let input = write_docx(dir.path(), "report.docx", &body);
    let output = dir.path().join("word_analysis.json");

    let (result, trace) = analyze(&input, &output);
    let report = result.unwrap();

    assert_eq!(report.document_info.filename, "report.docx");
    assert_eq!(report.document_info.total_paragraphs, 4);
    assert_eq!(report.paragraphs.len(), 2);
    assert_eq!(report.paragraphs[0].index, 0);
    assert_eq!(report.paragraphs[1].index, 3);
    assert_eq!(report.paragraphs[1].text, "Second");

    assert!(trace.starts_with("=== WORD DOCUMENT ANALYSIS ===\n"));
    assert!(trace.contains("\nPARAGRAPH 1:\nText: First\n"));
    assert!(trace.contains("\nPARAGRAPH 4:\nText: Second\n"));
    assert!(!trace.contains("PARAGRAPH 2:"));
    assert!(trace.ends_with(&format!(
        "\nDetailed analysis saved to: {}\n",
        output.display()
    )));
}

#[test]
fn test_run_formatting_in_json() {
    let dir = tempfile::tempdir().unwrap();
    let body = format!(
        r#"<w:p><w:pPr><w:jc w:val="center"/></w:pPr>{}{}</w:p>"#,
        run(
            r#"<w:rFonts w:ascii="Arial"/><w:b/><w:i w:val="0"/><w:sz w:val="24"/>"#,
            "Title"
        ),
        run("", " plain")
    );
    let input = write_docx(dir.path(), "fmt.docx", &body);
    let output = dir.path().join("out.json");

    let (result, _) = analyze(&input, &output);
    result.unwrap();

    let value = read_json(&output);
    assert_eq!(
        value["paragraphs"][0],
        json!({
            "index": 0,
            "text": "Title plain",
            "alignment": "CENTER",
            "runs": [
                {
                    "text": "Title",
                    "bold": true,
                    "italic": false,
                    "underline": null,
                    "font_name": "Arial",
                    "font_size": "12pt",
                    "font_color": "None"
                },
                {
                    "text": "plain",
                    "bold": null,
                    "italic": null,
                    "underline": null,
                    "font_name": null,
                    "font_size": "None",
                    "font_color": "None"
                }
            ]
        })
    );
    assert_eq!(value["styles_used"], json!(["Font: Arial", "Size: 12pt"]));
}

#[test]
fn test_styles_sorted_and_unique() {
    let dir = tempfile::tempdir().unwrap();
    let times = r#"<w:rFonts w:ascii="Times New Roman"/><w:sz w:val="22"/>"#;
    let arial = r#"<w:rFonts w:ascii="Arial"/><w:sz w:val="22"/>"#;
    let body = format!(
        "<w:p>{}{}</w:p><w:p>{}</w:p>",
        run(times, "a"),
        run(arial, "b"),
        run(times, "c")
    );
    let input = write_docx(dir.path(), "styles.docx", &body);
    let output = dir.path().join("out.json");

    let (result, trace) = analyze(&input, &output);
    let report = result.unwrap();

    let styles: Vec<_> = report.styles_used.iter().map(String::as_str).collect();
    assert_eq!(styles, ["Font: Arial", "Font: Times New Roman", "Size: 11pt"]);
    assert!(trace.contains(
        "\nUNIQUE STYLES:\n  Font: Arial\n  Font: Times New Roman\n  Size: 11pt\n"
    ));
}

#[test]
fn test_tables_with_merged_cells() {
    let dir = tempfile::tempdir().unwrap();
    let merged = format!(
        r#"<w:tbl>
<w:tblGrid><w:gridCol/><w:gridCol/><w:gridCol/></w:tblGrid>
<w:tr><w:tc><w:tcPr><w:gridSpan w:val="2"/></w:tcPr>{}</w:tc><w:tc><w:tcPr><w:vMerge w:val="restart"/></w:tcPr>{}</w:tc></w:tr>
<w:tr><w:tc>{}</w:tc><w:tc><w:p/></w:tc><w:tc><w:tcPr><w:vMerge/></w:tcPr><w:p/></w:tc></w:tr>
</w:tbl>"#,
        para("Header"),
        para("Side"),
        para("x")
    );
    let body = format!("{}{}", table(&[&["a", ""], &["", "d"]]), merged);
    let input = write_docx(dir.path(), "tables.docx", &body);
    let output = dir.path().join("out.json");

    let (result, trace) = analyze(&input, &output);
    let report = result.unwrap();

    assert_eq!(report.document_info.total_tables, 2);
    assert_eq!(report.tables.len(), 2);

    let simple = &report.tables[0];
    assert_eq!((simple.rows, simple.columns), (2, 2));
    let positions: Vec<_> = simple.cells.iter().map(|c| (c.row, c.column)).collect();
    assert_eq!(positions, [(0, 0), (1, 1)]);

    let merged = &report.tables[1];
    assert_eq!(merged.index, 1);
    assert_eq!((merged.rows, merged.columns), (2, 3));
    let cells: Vec<_> = merged
        .cells
        .iter()
        .map(|c| (c.row, c.column, c.text.as_str()))
        .collect();
    assert_eq!(
        cells,
        [
            (0, 0, "Header"),
            (0, 1, "Header"),
            (0, 2, "Side"),
            (1, 0, "x"),
            (1, 2, "Side"),
        ]
    );
    assert_eq!(merged.cells[0].paragraphs[0].runs[0].text, "Header");

    assert!(trace.contains("\nTABLE 2:\nRows: 2\nColumns: 3\n"));
    assert!(trace.contains("  [2,3]: Side\n"));
}

#[test]
fn test_json_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let body = format!(
        "{}{}{}",
        para("Intro"),
        table(&[&["k", "v"]]),
        format!(
            "<w:p>{}</w:p>",
            run(r#"<w:u w:val="double"/><w:color w:val="ff0000"/>"#, "red")
        )
    );
    let input = write_docx(dir.path(), "trip.docx", &body);
    let output = dir.path().join("out.json");

    let (result, _) = analyze(&input, &output);
    let report = result.unwrap();

    let parsed = AnalysisReport::from_json(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(parsed.paragraphs.len(), report.paragraphs.len());
    assert_eq!(parsed.tables.len(), report.tables.len());
    assert_eq!(parsed.styles_used, report.styles_used);
    assert_eq!(parsed, report);

    let value = read_json(&output);
    assert_eq!(value["paragraphs"][1]["runs"][0]["underline"], json!(true));
    assert_eq!(value["paragraphs"][1]["runs"][0]["font_color"], json!("FF0000"));
}

#[test]
fn test_non_ascii_written_literally() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_docx(dir.path(), "i18n.docx", &para("Größe 東京"));
    let output = dir.path().join("out.json");

    let (result, trace) = analyze(&input, &output);
    result.unwrap();

    let raw = std::fs::read_to_string(&output).unwrap();
    assert!(raw.contains("\"text\": \"Größe 東京\""));
    assert!(raw.starts_with("{\n  \"document_info\""));
    assert!(trace.contains("Text: Größe 東京\n"));
}

#[test]
fn test_missing_file_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("absent.docx");
    let output = dir.path().join("word_analysis.json");

    let (result, trace) = analyze(&input, &output);
    assert!(matches!(result, Err(Error::NotFound(_))));
    assert!(trace.is_empty());
    assert!(!output.exists());

    let mut banner = Vec::new();
    report_outcome(&result, &mut banner).unwrap();
    let banner = String::from_utf8(banner).unwrap();
    assert!(banner.starts_with("File not found: "));
    assert!(banner.contains("absent.docx"));
}

#[test]
fn test_text_file_renamed_to_docx() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("fake.docx");
    std::fs::write(&input, "this is not a zip archive").unwrap();
    let output = dir.path().join("word_analysis.json");

    let (result, _) = analyze(&input, &output);
    let err = result.as_ref().unwrap_err();
    assert!(matches!(err, Error::Zip(_)));
    assert!(!output.exists());

    let mut banner = Vec::new();
    report_outcome(&result, &mut banner).unwrap();
    let banner = String::from_utf8(banner).unwrap();
    assert!(banner.starts_with(&format!("Error analysing document: {err}\n")));
    assert!(banner.ends_with("❌ Document analysis failed\n"));
}

#[test]
fn test_cell_runs_are_fully_extracted_without_styles() {
    let dir = tempfile::tempdir().unwrap();
    let cell_run = run(
        r#"<w:rFonts w:ascii="Courier"/><w:sz w:val="20"/><w:u w:val="wave"/><w:color w:val="00aa00"/>"#,
        "code",
    );
    let body = format!(
        "{}<w:tbl><w:tblGrid><w:gridCol/></w:tblGrid><w:tr><w:tc><w:p>{cell_run}</w:p></w:tc></w:tr></w:tbl>",
        para("Plain")
    );
    let input = write_docx(dir.path(), "cells.docx", &body);
    let output = dir.path().join("out.json");

    let (result, trace) = analyze(&input, &output);
    let report = result.unwrap();

    assert!(report.styles_used.is_empty());
    assert!(trace.ends_with(&format!(
        "\nUNIQUE STYLES:\n\nDetailed analysis saved to: {}\n",
        output.display()
    )));

    let value = read_json(&output);
    assert_eq!(
        value["tables"][0]["cells"][0]["paragraphs"][0]["runs"][0],
        json!({
            "text": "code",
            "bold": null,
            "italic": null,
            "underline": true,
            "font_name": "Courier",
            "font_size": "10pt",
            "font_color": "00AA00"
        })
    );
    assert_eq!(value["styles_used"], json!([]));
}

#[test]
fn test_failures_leave_existing_output_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("word_analysis.json");
    std::fs::write(&output, "previous run").unwrap();

    let (result, _) = analyze(&dir.path().join("absent.docx"), &output);
    assert!(matches!(result, Err(Error::NotFound(_))));
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "previous run");

    let fake = dir.path().join("fake.docx");
    std::fs::write(&fake, "plain text").unwrap();
    let (result, _) = analyze(&fake, &output);
    assert!(matches!(result, Err(Error::Zip(_))));
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "previous run");
}

#[test]
fn test_corrupt_table_grid_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let body = r#"<w:tbl><w:tr><w:trPr><w:gridBefore w:val="18446744073709551615"/></w:trPr><w:tc><w:p/></w:tc><w:tc><w:p/></w:tc></w:tr></w:tbl>"#;
    let input = write_docx(dir.path(), "corrupt.docx", body);
    let output = dir.path().join("word_analysis.json");

    let (result, trace) = analyze(&input, &output);
    let err = result.as_ref().unwrap_err();
    assert!(matches!(err, Error::InvalidDocument(_)));
    assert!(trace.is_empty());
    assert!(!output.exists());

    let mut banner = Vec::new();
    report_outcome(&result, &mut banner).unwrap();
    let banner = String::from_utf8(banner).unwrap();
    assert!(banner.starts_with("Error analysing document: Invalid document: gridBefore"));
    assert!(banner.ends_with("❌ Document analysis failed\n"));
}

#[test]
fn test_success_banner_after_run() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_docx(dir.path(), "ok.docx", &para("fine"));
    let output = dir.path().join("word_analysis.json");

    let (result, _) = analyze(&input, &output);
    assert!(result.is_ok());
    assert!(output.exists());

    let mut banner = Vec::new();
    report_outcome(&result, &mut banner).unwrap();
    assert_eq!(
        String::from_utf8(banner).unwrap(),
        "\n✅ Analysis completed successfully!\n"
    );
}
