//! Paragraph element (w:p)

use crate::document::Run;
use crate::error::Result;
use crate::xml::{get_attr, get_w_attr, get_w_val, skip_element};
use log::warn;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fmt;
use std::io::BufRead;
use std::str::FromStr;

/// Paragraph element (w:p)
#[derive(Clone, Debug, Default)]
pub struct Paragraph {
    /// Paragraph properties
    pub properties: Option<ParagraphProperties>,
    /// Paragraph content (runs, hyperlinks)
    pub content: Vec<ParagraphContent>,
}

/// Content within a paragraph
#[derive(Clone, Debug)]
pub enum ParagraphContent {
    /// Text run
    Run(Run),
    /// Hyperlink
    Hyperlink(Hyperlink),
}

/// Hyperlink element
#[derive(Clone, Debug, Default)]
pub struct Hyperlink {
    /// Relationship ID (for external links)
    pub r_id: Option<String>,
    /// Anchor (for internal links)
    pub anchor: Option<String>,
    /// Content runs
    pub runs: Vec<Run>,
}

/// Paragraph properties (w:pPr)
#[derive(Clone, Debug, Default)]
pub struct ParagraphProperties {
    /// Style ID
    pub style: Option<String>,
    /// Justification (w:jc)
    pub alignment: Option<Alignment>,
}

/// Paragraph justification, named the way Word's object model names it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
    Distribute,
    JustifyMed,
    JustifyHi,
    JustifyLow,
    ThaiJustify,
}

impl Alignment {
    /// Parse a `w:jc/@w:val` value
    pub fn from_ooxml(val: &str) -> Option<Self> {
        Some(match val {
            "left" | "start" => Alignment::Left,
            "center" => Alignment::Center,
            "right" | "end" => Alignment::Right,
            "both" => Alignment::Justify,
            "distribute" => Alignment::Distribute,
            "mediumKashida" => Alignment::JustifyMed,
            "highKashida" => Alignment::JustifyHi,
            "lowKashida" => Alignment::JustifyLow,
            "thaiDistribute" => Alignment::ThaiJustify,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Alignment::Left => "LEFT",
            Alignment::Center => "CENTER",
            Alignment::Right => "RIGHT",
            Alignment::Justify => "JUSTIFY",
            Alignment::Distribute => "DISTRIBUTE",
            Alignment::JustifyMed => "JUSTIFY_MED",
            Alignment::JustifyHi => "JUSTIFY_HI",
            Alignment::JustifyLow => "JUSTIFY_LOW",
            Alignment::ThaiJustify => "THAI_JUSTIFY",
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Alignment {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        [
            Alignment::Left,
            Alignment::Center,
            Alignment::Right,
            Alignment::Justify,
            Alignment::Distribute,
            Alignment::JustifyMed,
            Alignment::JustifyHi,
            Alignment::JustifyLow,
            Alignment::ThaiJustify,
        ]
        .into_iter()
        .find(|a| a.as_str() == s)
        .ok_or_else(|| format!("unknown alignment '{s}'"))
    }
}

impl Paragraph {
    /// Parse paragraph from reader (after w:p start tag)
    pub fn from_reader<R: BufRead>(reader: &mut Reader<R>) -> Result<Self> {
        let mut para = Paragraph::default();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => match e.name().local_name().as_ref() {
                    b"pPr" => {
                        para.properties = Some(ParagraphProperties::from_reader(reader)?);
                    }
                    b"r" => {
                        let run = Run::from_reader(reader)?;
                        para.content.push(ParagraphContent::Run(run));
                    }
                    b"hyperlink" => {
                        let link = Hyperlink::from_reader(reader, &e)?;
                        para.content.push(ParagraphContent::Hyperlink(link));
                    }
                    _ => skip_element(reader, &e)?,
                },
                Event::Empty(e) => {
                    if e.name().local_name().as_ref() == b"r" {
                        para.content.push(ParagraphContent::Run(Run::default()));
                    }
                }
                Event::End(e) => {
                    if e.name().local_name().as_ref() == b"p" {
                        break;
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(para)
    }

    /// Get all text in this paragraph, hyperlink text included
    pub fn text(&self) -> String {
        let mut result = String::new();
        for content in &self.content {
            match content {
                ParagraphContent::Run(run) => result.push_str(&run.text()),
                ParagraphContent::Hyperlink(link) => {
                    for run in &link.runs {
                        result.push_str(&run.text());
                    }
                }
            }
        }
        result
    }

    /// Get style ID
    pub fn style(&self) -> Option<&str> {
        self.properties.as_ref()?.style.as_deref()
    }

    /// Get directly applied justification
    pub fn alignment(&self) -> Option<Alignment> {
        self.properties.as_ref()?.alignment
    }

    /// Runs that are direct children of the paragraph (hyperlink runs excluded)
    pub fn runs(&self) -> impl Iterator<Item = &Run> {
        self.content.iter().filter_map(|c| match c {
            ParagraphContent::Run(r) => Some(r),
            _ => None,
        })
    }

    /// Get hyperlinks
    pub fn hyperlinks(&self) -> impl Iterator<Item = &Hyperlink> {
        self.content.iter().filter_map(|c| match c {
            ParagraphContent::Hyperlink(h) => Some(h),
            _ => None,
        })
    }
}

impl ParagraphProperties {
    /// Parse from reader (after w:pPr start tag)
    pub fn from_reader<R: BufRead>(reader: &mut Reader<R>) -> Result<Self> {
        let mut props = ParagraphProperties::default();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => {
                    props.apply(&e);
                    skip_element(reader, &e)?;
                }
                Event::Empty(e) => props.apply(&e),
                Event::End(e) => {
                    if e.name().local_name().as_ref() == b"pPr" {
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

    fn apply(&mut self, e: &BytesStart) {
        match e.name().local_name().as_ref() {
            b"pStyle" => self.style = get_w_val(e),
            b"jc" => {
                self.alignment = get_w_val(e).and_then(|v| {
                    let parsed = Alignment::from_ooxml(&v);
                    if parsed.is_none() {
                        warn!("ignoring unsupported paragraph justification '{v}'");
                    }
                    parsed
                });
            }
            _ => {}
        }
    }
}

impl Hyperlink {
    /// Parse from reader
    pub fn from_reader<R: BufRead>(reader: &mut Reader<R>, start: &BytesStart) -> Result<Self> {
        let mut link = Hyperlink {
            r_id: get_attr(start, "r:id"),
            anchor: get_w_attr(start, "anchor"),
            runs: Vec::new(),
        };

        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => {
                    if e.name().local_name().as_ref() == b"r" {
                        link.runs.push(Run::from_reader(reader)?);
                    } else {
                        skip_element(reader, &e)?;
                    }
                }
                Event::End(e) => {
                    if e.name().local_name().as_ref() == b"hyperlink" {
                        break;
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(link)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(xml: &str) -> Paragraph {
        let mut reader = Reader::from_str(xml);
        loop {
            if let Event::Start(e) = reader.read_event().unwrap() {
                if e.name().local_name().as_ref() == b"p" {
                    return Paragraph::from_reader(&mut reader).unwrap();
                }
            }
        }
    }

    #[test]
    fn test_text_includes_hyperlinks() {
        let para = parse(
            r#"<w:p><w:r><w:t xml:space="preserve">See </w:t></w:r><w:hyperlink r:id="rId4"><w:r><w:t>the docs</w:t></w:r></w:hyperlink><w:r><w:t>.</w:t></w:r></w:p>"#,
        );
        assert_eq!(para.text(), "See the docs.");
        assert_eq!(para.runs().count(), 2);
        assert_eq!(para.hyperlinks().next().unwrap().r_id.as_deref(), Some("rId4"));
    }

    #[test]
    fn test_properties() {
        let para = parse(
            r#"<w:p><w:pPr><w:pStyle w:val="Heading1"/><w:spacing w:after="0"/><w:jc w:val="both"/><w:rPr><w:b/></w:rPr></w:pPr><w:r><w:t>Title</w:t></w:r></w:p>"#,
        );
        assert_eq!(para.style(), Some("Heading1"));
        assert_eq!(para.alignment(), Some(Alignment::Justify));
        assert_eq!(para.text(), "Title");
    }

    #[test]
    fn test_unknown_justification_is_unset() {
        let para = parse(r#"<w:p><w:pPr><w:jc w:val="numTab"/></w:pPr></w:p>"#);
        assert_eq!(para.alignment(), None);
    }

    #[test]
    fn test_skips_unrelated_children() {
        let para = parse(
            r#"<w:p><w:bookmarkStart w:id="0" w:name="_GoBack"/><w:proofErr w:type="spellStart"/><w:ins w:id="1"><w:r><w:t>tracked</w:t></w:r></w:ins><w:r><w:t>kept</w:t></w:r><w:bookmarkEnd w:id="0"/></w:p>"#,
        );
        assert_eq!(para.text(), "kept");
    }

    #[test]
    fn test_alignment_names() {
        assert_eq!(Alignment::from_ooxml("start"), Some(Alignment::Left));
        assert_eq!(Alignment::from_ooxml("end"), Some(Alignment::Right));
        assert_eq!(Alignment::JustifyMed.to_string(), "JUSTIFY_MED");
        assert_eq!("THAI_JUSTIFY".parse::<Alignment>(), Ok(Alignment::ThaiJustify));
        assert!("SIDEWAYS".parse::<Alignment>().is_err());
    }
}
