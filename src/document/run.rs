//! Run element (w:r) - a contiguous run of text with uniform formatting

use crate::error::Result;
use crate::xml::{get_w_attr, get_w_val, parse_bool, skip_element};
use log::warn;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fmt;
use std::io::BufRead;
use std::str::FromStr;

/// Run element (w:r)
#[derive(Clone, Debug, Default)]
pub struct Run {
    /// Run properties
    pub properties: Option<RunProperties>,
    /// Run content
    pub content: Vec<RunContent>,
}

/// Content within a run
#[derive(Clone, Debug, PartialEq)]
pub enum RunContent {
    /// Text (w:t)
    Text(String),
    /// Tab (w:tab, w:ptab)
    Tab,
    /// Break (w:br)
    Break(BreakType),
    /// Carriage return (w:cr)
    CarriageReturn,
    /// Non-breaking hyphen
    NoBreakHyphen,
}

/// Break type
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BreakType {
    #[default]
    TextWrapping,
    Page,
    Column,
}

/// Run properties (w:rPr), direct formatting only
#[derive(Clone, Debug, Default)]
pub struct RunProperties {
    /// Character style ID
    pub style: Option<String>,
    /// Bold
    pub bold: Option<bool>,
    /// Italic
    pub italic: Option<bool>,
    /// Underline
    pub underline: Option<Underline>,
    /// Font size
    pub size: Option<FontSize>,
    /// Color (`w:color/@w:val`, may be `auto`)
    pub color: Option<String>,
    /// Fonts (w:rFonts)
    pub fonts: RunFonts,
}

/// Font slots of w:rFonts
#[derive(Clone, Debug, Default)]
pub struct RunFonts {
    pub ascii: Option<String>,
    pub h_ansi: Option<String>,
    pub east_asia: Option<String>,
    pub cs: Option<String>,
}

/// Underline setting of a run (`w:u`)
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Underline {
    None,
    Single,
    /// Any other OOXML line style (`double`, `wave`, ...)
    Style(String),
}

impl Underline {
    /// Parse from a `w:u/@w:val` value (absent value means single)
    pub fn from_ooxml(val: Option<&str>) -> Self {
        match val {
            None | Some("single") => Underline::Single,
            Some("none") => Underline::None,
            Some(other) => Underline::Style(other.to_string()),
        }
    }

    /// Whether any line is drawn
    pub fn is_underlined(&self) -> bool {
        !matches!(self, Underline::None)
    }
}

/// Font size, stored in half-points as OOXML does (`w:sz w:val="24"` is 12pt)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FontSize(u32);

impl FontSize {
    pub fn from_half_points(half_points: u32) -> Self {
        FontSize(half_points)
    }

    pub fn from_points(points: f32) -> Self {
        FontSize((points * 2.0).round() as u32)
    }

    /// Parse a `w:sz/@w:val`: half-points, or a universal measure such as `12pt`
    pub fn from_ooxml(val: &str) -> Option<Self> {
        if let Ok(half_points) = val.parse::<u32>() {
            return Some(FontSize(half_points));
        }
        val.strip_suffix("pt")
            .and_then(|pt| pt.parse::<f32>().ok())
            .filter(|pt| pt.is_finite() && *pt >= 0.0)
            .map(FontSize::from_points)
    }
}

impl fmt::Display for FontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % 2 == 0 {
            write!(f, "{}pt", self.0 / 2)
        } else {
            write!(f, "{}.5pt", self.0 / 2)
        }
    }
}

impl FromStr for FontSize {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.strip_suffix("pt")
            .and_then(|pt| pt.parse::<f32>().ok())
            .map(FontSize::from_points)
            .ok_or_else(|| format!("invalid font size '{s}'"))
    }
}

impl Run {
    /// Parse from reader (after w:r start tag)
    pub fn from_reader<R: BufRead>(reader: &mut Reader<R>) -> Result<Self> {
        let mut run = Run::default();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => match e.name().local_name().as_ref() {
                    b"rPr" => {
                        run.properties = Some(RunProperties::from_reader(reader)?);
                    }
                    b"t" => {
                        let text = read_text_content(reader)?;
                        run.content.push(RunContent::Text(text));
                    }
                    _ => {
                        if let Some(content) = RunContent::from_marker(&e) {
                            run.content.push(content);
                        }
                        skip_element(reader, &e)?;
                    }
                },
                Event::Empty(e) => {
                    if let Some(content) = RunContent::from_marker(&e) {
                        run.content.push(content);
                    }
                }
                Event::End(e) => {
                    if e.name().local_name().as_ref() == b"r" {
                        break;
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(run)
    }

    /// Get all text in this run
    pub fn text(&self) -> String {
        let mut result = String::new();
        for content in &self.content {
            match content {
                RunContent::Text(t) => result.push_str(t),
                RunContent::Tab => result.push('\t'),
                RunContent::Break(BreakType::TextWrapping) => result.push('\n'),
                RunContent::CarriageReturn => result.push('\n'),
                RunContent::NoBreakHyphen => result.push('-'),
                RunContent::Break(_) => {}
            }
        }
        result
    }

    /// Bold: `None` when the run does not set it directly
    pub fn bold(&self) -> Option<bool> {
        self.properties.as_ref()?.bold
    }

    /// Italic: `None` when the run does not set it directly
    pub fn italic(&self) -> Option<bool> {
        self.properties.as_ref()?.italic
    }

    /// Get underline setting
    pub fn underline(&self) -> Option<&Underline> {
        self.properties.as_ref()?.underline.as_ref()
    }

    /// Typeface for ASCII text, falling back to the high-ANSI slot
    pub fn font_name(&self) -> Option<&str> {
        let fonts = &self.properties.as_ref()?.fonts;
        fonts.ascii.as_deref().or(fonts.h_ansi.as_deref())
    }

    /// Get font size
    pub fn font_size(&self) -> Option<FontSize> {
        self.properties.as_ref()?.size
    }

    /// RGB hex color, `None` when unset or `auto`
    pub fn color(&self) -> Option<&str> {
        self.properties
            .as_ref()?
            .color
            .as_deref()
            .filter(|c| !c.eq_ignore_ascii_case("auto"))
    }

    /// Character style ID
    pub fn style(&self) -> Option<&str> {
        self.properties.as_ref()?.style.as_deref()
    }
}

impl RunContent {
    /// Map a non-text run child to content, `None` for drawings, fields and the like
    fn from_marker(e: &BytesStart) -> Option<Self> {
        match e.name().local_name().as_ref() {
            b"tab" | b"ptab" => Some(RunContent::Tab),
            b"br" => Some(RunContent::Break(match get_w_attr(e, "type").as_deref() {
                Some("page") => BreakType::Page,
                Some("column") => BreakType::Column,
                _ => BreakType::TextWrapping,
            })),
            b"cr" => Some(RunContent::CarriageReturn),
            b"noBreakHyphen" => Some(RunContent::NoBreakHyphen),
            b"t" => Some(RunContent::Text(String::new())),
            _ => None,
        }
    }
}

impl RunProperties {
    /// Parse from reader (after w:rPr start tag)
    pub fn from_reader<R: BufRead>(reader: &mut Reader<R>) -> Result<Self> {
        let mut props = RunProperties::default();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => {
                    props.apply(&e);
                    skip_element(reader, &e)?;
                }
                Event::Empty(e) => props.apply(&e),
                Event::End(e) => {
                    if e.name().local_name().as_ref() == b"rPr" {
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
            b"rStyle" => self.style = get_w_val(e),
            b"b" => self.bold = Some(parse_bool(e)),
            b"i" => self.italic = Some(parse_bool(e)),
            b"u" => self.underline = Some(Underline::from_ooxml(get_w_val(e).as_deref())),
            b"sz" => {
                self.size = get_w_val(e).and_then(|v| {
                    let size = FontSize::from_ooxml(&v);
                    if size.is_none() {
                        warn!("ignoring unparsable font size '{v}'");
                    }
                    size
                });
            }
            b"color" => self.color = get_w_val(e).map(|c| c.to_ascii_uppercase()),
            b"rFonts" => {
                self.fonts = RunFonts {
                    ascii: get_w_attr(e, "ascii"),
                    h_ansi: get_w_attr(e, "hAnsi"),
                    east_asia: get_w_attr(e, "eastAsia"),
                    cs: get_w_attr(e, "cs"),
                };
            }
            // bCs, iCs, szCs and friends apply to complex scripts only
            _ => {}
        }
    }
}

/// Read text content from w:t element
fn read_text_content<R: BufRead>(reader: &mut Reader<R>) -> Result<String> {
    let mut text = String::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Text(t) => text.push_str(&t.unescape()?),
            Event::CData(t) => text.push_str(&String::from_utf8_lossy(&t)),
            Event::End(e) => {
                if e.name().local_name().as_ref() == b"t" {
                    break;
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(text)
}
