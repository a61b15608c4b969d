//! XLSX styles (styles.xml) read/write helpers
//!
//! Every named style of the workbook becomes one `cellStyleXfs` entry and
//! one `cellXfs` entry at the same position, so `cellXfs[i].xfId == i`.

use std::collections::HashMap;
use std::io::{BufReader, Read};

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::{XlsxError, XlsxResult};
use sheetframe_core::style::{
    Alignment, BorderEdge, BorderLineStyle, BorderStyle, Color, FillStyle, FontStyle,
    HorizontalAlignment, NamedStyle, NumberFormat, PatternType, Protection, Style, Underline,
    VerticalAlignment,
};
use sheetframe_core::Workbook;

// === Writing ===

#[derive(Debug, Clone, Copy)]
struct ResolvedXfIds {
    font_id: u32,
    fill_id: u32,
    border_id: u32,
    num_fmt_id: u32,
}

#[derive(Debug)]
pub(crate) struct XlsxStyleTable {
    /// Named styles in `xfId` order
    named: Vec<NamedStyle>,
    /// Style name -> cellXfs index
    xf_by_name: HashMap<String, u32>,
}

impl XlsxStyleTable {
    pub(crate) fn build(workbook: &Workbook) -> Self {
        let named: Vec<NamedStyle> = workbook.named_styles().iter().cloned().collect();
        let xf_by_name = named
            .iter()
            .enumerate()
            .map(|(i, s)| (s.name.clone(), i as u32))
            .collect();
        Self { named, xf_by_name }
    }

    /// The `s` attribute for a cell; unknown names fall back to `Normal`
    pub(crate) fn xf_id_for(&self, style_name: Option<&str>) -> u32 {
        let Some(name) = style_name else {
            return 0;
        };
        match self.xf_by_name.get(name) {
            Some(&id) => id,
            None => {
                log::warn!("cell refers to unregistered style {name:?}; using Normal");
                0
            }
        }
    }

    pub(crate) fn to_styles_xml(&self) -> String {
        let mut font_ids: HashMap<FontStyle, u32> = HashMap::new();
        let mut fonts: Vec<FontStyle> = Vec::new();

        // Excel requires the first two fills to be none and gray125
        let mut fill_ids: HashMap<FillStyle, u32> = HashMap::new();
        let mut fills: Vec<FillStyle> = vec![
            FillStyle::None,
            FillStyle::pattern(PatternType::Gray125, Color::Auto, Color::Auto),
        ];
        fill_ids.insert(FillStyle::None, 0);

        let mut border_ids: HashMap<BorderStyle, u32> = HashMap::new();
        let mut borders: Vec<BorderStyle> = vec![BorderStyle::default()];
        border_ids.insert(BorderStyle::default(), 0);

        let mut numfmt_ids: HashMap<String, u32> = HashMap::new();
        let mut numfmts: Vec<(u32, String)> = Vec::new();
        let mut next_numfmt_id: u32 = 164;

        let mut resolved: Vec<ResolvedXfIds> = Vec::with_capacity(self.named.len());

        for named in &self.named {
            let style = &named.style;

            // Font 0 is Normal's font since Normal is always first
            let font_id = *font_ids.entry(style.font.clone()).or_insert_with(|| {
                fonts.push(style.font.clone());
                fonts.len() as u32 - 1
            });

            let fill_id = *fill_ids.entry(style.fill.clone()).or_insert_with(|| {
                fills.push(style.fill.clone());
                fills.len() as u32 - 1
            });

            let border_id = *border_ids.entry(style.border.clone()).or_insert_with(|| {
                borders.push(style.border.clone());
                borders.len() as u32 - 1
            });

            let num_fmt_id = match &style.number_format {
                NumberFormat::General => 0,
                NumberFormat::BuiltIn(id) => *id,
                NumberFormat::Custom(code) => *numfmt_ids.entry(code.clone()).or_insert_with(|| {
                    let id = next_numfmt_id;
                    next_numfmt_id += 1;
                    numfmts.push((id, code.clone()));
                    id
                }),
            };

            resolved.push(ResolvedXfIds {
                font_id,
                fill_id,
                border_id,
                num_fmt_id,
            });
        }

        let mut xml = String::new();
        xml.push_str(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
        );

        if !numfmts.is_empty() {
            xml.push_str(&format!("\n  <numFmts count=\"{}\">", numfmts.len()));
            for (id, code) in &numfmts {
                xml.push_str(&format!(
                    "\n    <numFmt numFmtId=\"{}\" formatCode=\"{}\"/>",
                    id,
                    escape_xml(code)
                ));
            }
            xml.push_str("\n  </numFmts>");
        }

        xml.push_str(&format!("\n  <fonts count=\"{}\">", fonts.len()));
        for font in &fonts {
            xml.push_str("\n    ");
            xml.push_str(&write_font(font));
        }
        xml.push_str("\n  </fonts>");

        xml.push_str(&format!("\n  <fills count=\"{}\">", fills.len()));
        for fill in &fills {
            xml.push_str("\n    ");
            xml.push_str(&write_fill(fill));
        }
        xml.push_str("\n  </fills>");

        xml.push_str(&format!("\n  <borders count=\"{}\">", borders.len()));
        for border in &borders {
            xml.push_str("\n    ");
            xml.push_str(&write_border(border));
        }
        xml.push_str("\n  </borders>");

        xml.push_str(&format!(
            "\n  <cellStyleXfs count=\"{}\">",
            self.named.len()
        ));
        for (named, ids) in self.named.iter().zip(&resolved) {
            xml.push_str("\n    ");
            xml.push_str(&write_xf(&named.style, *ids, None));
        }
        xml.push_str("\n  </cellStyleXfs>");

        xml.push_str(&format!("\n  <cellXfs count=\"{}\">", self.named.len()));
        for (i, (named, ids)) in self.named.iter().zip(&resolved).enumerate() {
            xml.push_str("\n    ");
            xml.push_str(&write_xf(&named.style, *ids, Some(i as u32)));
        }
        xml.push_str("\n  </cellXfs>");

        xml.push_str(&format!("\n  <cellStyles count=\"{}\">", self.named.len()));
        for (i, named) in self.named.iter().enumerate() {
            let builtin = named
                .builtin_id
                .map(|id| format!(" builtinId=\"{}\"", id))
                .unwrap_or_default();
            xml.push_str(&format!(
                "\n    <cellStyle name=\"{}\" xfId=\"{}\"{}/>",
                escape_xml(&named.name),
                i,
                builtin
            ));
        }
        xml.push_str("\n  </cellStyles>");

        xml.push_str(
            r#"
  <dxfs count="0"/>
  <tableStyles count="0" defaultTableStyle="TableStyleMedium9" defaultPivotStyle="PivotStyleLight16"/>
</styleSheet>"#,
        );
        xml
    }
}

pub(crate) fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

fn write_color(tag: &str, color: &Color) -> String {
    match color {
        Color::Auto => format!("<{tag} auto=\"1\"/>"),
        Color::Rgb { r, g, b } => format!("<{tag} rgb=\"FF{:02X}{:02X}{:02X}\"/>", r, g, b),
        Color::Argb { a, r, g, b } => {
            format!("<{tag} rgb=\"{:02X}{:02X}{:02X}{:02X}\"/>", a, r, g, b)
        }
        Color::Indexed(i) => format!("<{tag} indexed=\"{}\"/>", i),
        Color::Theme { index, tint: 0 } => format!("<{tag} theme=\"{}\"/>", index),
        Color::Theme { index, tint } => format!(
            "<{tag} theme=\"{}\" tint=\"{}\"/>",
            index,
            (*tint as f64) / 100.0
        ),
    }
}

fn write_font(font: &FontStyle) -> String {
    let mut s = String::from("<font>");
    if font.bold {
        s.push_str("<b/>");
    }
    if font.italic {
        s.push_str("<i/>");
    }
    if font.strikethrough {
        s.push_str("<strike/>");
    }
    match font.underline {
        Underline::None => {}
        Underline::Single => s.push_str("<u/>"),
        other => s.push_str(&format!("<u val=\"{}\"/>", other.as_str())),
    }
    s.push_str(&format!("<sz val=\"{}\"/>", font.size));
    if !font.color.is_auto() {
        s.push_str(&write_color("color", &font.color));
    }
    s.push_str(&format!("<name val=\"{}\"/>", escape_xml(&font.name)));
    s.push_str("</font>");
    s
}

fn write_fill(fill: &FillStyle) -> String {
    match fill {
        FillStyle::None => "<fill><patternFill patternType=\"none\"/></fill>".to_string(),
        FillStyle::Solid { color } => format!(
            "<fill><patternFill patternType=\"solid\">{}<bgColor indexed=\"64\"/></patternFill></fill>",
            write_color("fgColor", color)
        ),
        FillStyle::Pattern {
            pattern,
            foreground,
            background,
        } => format!(
            "<fill><patternFill patternType=\"{}\">{}{}</patternFill></fill>",
            pattern.as_str(),
            write_color("fgColor", foreground),
            write_color("bgColor", background)
        ),
    }
}

fn write_border_edge(tag: &str, edge: &Option<BorderEdge>) -> String {
    match edge {
        Some(e) if e.style != BorderLineStyle::None => format!(
            "<{tag} style=\"{}\">{}</{tag}>",
            e.style.as_str(),
            write_color("color", &e.color)
        ),
        _ => format!("<{tag}/>"),
    }
}

fn write_border(border: &BorderStyle) -> String {
    let mut s = String::from("<border>");
    s.push_str(&write_border_edge("left", &border.left));
    s.push_str(&write_border_edge("right", &border.right));
    s.push_str(&write_border_edge("top", &border.top));
    s.push_str(&write_border_edge("bottom", &border.bottom));
    s.push_str("<diagonal/></border>");
    s
}

fn write_alignment(al: &Alignment) -> String {
    if al.is_default() {
        return String::new();
    }

    let mut s = String::from("<alignment");
    if let Some(h) = al.horizontal {
        s.push_str(&format!(" horizontal=\"{}\"", h.as_str()));
    }
    if let Some(v) = al.vertical {
        s.push_str(&format!(" vertical=\"{}\"", v.as_str()));
    }
    if al.wrap_text {
        s.push_str(" wrapText=\"1\"");
    }
    if al.shrink_to_fit {
        s.push_str(" shrinkToFit=\"1\"");
    }
    if al.indent != 0 {
        s.push_str(&format!(" indent=\"{}\"", al.indent));
    }
    s.push_str("/>");
    s
}

fn write_protection(p: &Protection) -> String {
    if p.is_default() {
        return String::new();
    }
    format!(
        "<protection locked=\"{}\" hidden=\"{}\"/>",
        p.locked as u8, p.hidden as u8
    )
}

/// One `<xf>`; `xf_id` is set for `cellXfs` entries only
fn write_xf(style: &Style, ids: ResolvedXfIds, xf_id: Option<u32>) -> String {
    let mut attrs = String::new();
    if let Some(xf_id) = xf_id {
        attrs.push_str(&format!(" xfId=\"{}\"", xf_id));
    }
    if ids.num_fmt_id != 0 {
        attrs.push_str(" applyNumberFormat=\"1\"");
    }
    if ids.font_id != 0 {
        attrs.push_str(" applyFont=\"1\"");
    }
    if ids.fill_id != 0 {
        attrs.push_str(" applyFill=\"1\"");
    }
    if ids.border_id != 0 {
        attrs.push_str(" applyBorder=\"1\"");
    }
    if !style.alignment.is_default() {
        attrs.push_str(" applyAlignment=\"1\"");
    }
    if !style.protection.is_default() {
        attrs.push_str(" applyProtection=\"1\"");
    }

    let mut s = format!(
        "<xf numFmtId=\"{}\" fontId=\"{}\" fillId=\"{}\" borderId=\"{}\"{}",
        ids.num_fmt_id, ids.font_id, ids.fill_id, ids.border_id, attrs
    );

    let inner = write_alignment(&style.alignment) + &write_protection(&style.protection);
    if inner.is_empty() {
        s.push_str("/>");
    } else {
        s.push('>');
        s.push_str(&inner);
        s.push_str("</xf>");
    }
    s
}

// === Reading ===

/// Component ids of one `<xf>` plus its inline alignment/protection
#[derive(Debug, Clone, Default)]
struct RawXf {
    num_fmt_id: u32,
    font_id: u32,
    fill_id: u32,
    border_id: u32,
    xf_id: u32,
    alignment: Alignment,
    protection: Protection,
}

/// Result of reading styles.xml
#[derive(Debug, Default)]
pub(crate) struct ParsedStyles {
    /// Named styles in `cellStyles` order
    pub named_styles: Vec<NamedStyle>,
    /// cellXfs index -> named style name
    pub cell_xf_names: Vec<Option<String>>,
}

impl ParsedStyles {
    /// Style name for a cell's `s` attribute
    pub(crate) fn name_for_xf(&self, s: u32) -> Option<&str> {
        self.cell_xf_names.get(s as usize).and_then(|n| n.as_deref())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum XfSection {
    None,
    CellStyleXfs,
    CellXfs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

fn edge_slot(border: &mut BorderStyle, edge: Edge) -> &mut Option<BorderEdge> {
    match edge {
        Edge::Left => &mut border.left,
        Edge::Right => &mut border.right,
        Edge::Top => &mut border.top,
        Edge::Bottom => &mut border.bottom,
    }
}

pub(crate) fn attr_u32(e: &BytesStart<'_>, key: &[u8]) -> Option<u32> {
    e.attributes()
        .flatten()
        .find(|a| a.key.as_ref() == key)
        .and_then(|a| a.unescape_value().ok().and_then(|v| v.parse().ok()))
}

pub(crate) fn attr_string(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.as_ref() == key)
        .and_then(|a| a.unescape_value().ok().map(|v| v.to_string()))
}

pub(crate) fn attr_flag(e: &BytesStart<'_>, key: &[u8]) -> Option<bool> {
    attr_string(e, key).map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

pub(crate) fn read_styles_xml<R: Read>(reader: R) -> XlsxResult<ParsedStyles> {
    let mut xml_reader = Reader::from_reader(BufReader::new(reader));
    xml_reader.trim_text(true);

    let mut buf = Vec::new();

    let mut numfmts: HashMap<u32, String> = HashMap::new();
    let mut fonts: Vec<FontStyle> = Vec::new();
    let mut fills: Vec<FillStyle> = Vec::new();
    let mut borders: Vec<BorderStyle> = Vec::new();
    let mut style_xfs: Vec<RawXf> = Vec::new();
    let mut cell_xfs: Vec<RawXf> = Vec::new();
    let mut cell_styles: Vec<(String, u32, Option<u32>)> = Vec::new();

    let mut section = XfSection::None;
    let mut current_font: Option<FontStyle> = None;
    let mut current_fill: Option<(PatternType, Color, Color)> = None;
    let mut current_border: Option<BorderStyle> = None;
    let mut current_edge: Option<Edge> = None;
    let mut current_xf: Option<RawXf> = None;

    loop {
        buf.clear();
        let event = xml_reader.read_event_into(&mut buf);
        let (e, is_empty) = match event {
            Ok(Event::Start(e)) => (e, false),
            Ok(Event::Empty(e)) => (e, true),
            Ok(Event::End(e)) => {
                match e.name().as_ref() {
                    b"font" => {
                        if let Some(font) = current_font.take() {
                            fonts.push(font);
                        }
                    }
                    b"fill" => {
                        if let Some((p, fg, bg)) = current_fill.take() {
                            fills.push(finalize_fill(p, fg, bg));
                        }
                    }
                    b"border" => {
                        if let Some(border) = current_border.take() {
                            borders.push(border);
                        }
                    }
                    b"left" | b"right" | b"top" | b"bottom" => current_edge = None,
                    b"xf" => push_xf(&mut current_xf, section, &mut style_xfs, &mut cell_xfs),
                    b"cellStyleXfs" | b"cellXfs" => section = XfSection::None,
                    _ => {}
                }
                continue;
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(XlsxError::Xml(e)),
            _ => continue,
        };

        match e.name().as_ref() {
            b"numFmt" => {
                if let (Some(id), Some(code)) =
                    (attr_u32(&e, b"numFmtId"), attr_string(&e, b"formatCode"))
                {
                    numfmts.insert(id, code);
                }
            }

            b"font" => {
                if is_empty {
                    fonts.push(FontStyle::default());
                } else {
                    current_font = Some(FontStyle::default());
                }
            }
            b"b" | b"i" | b"strike" => {
                if let Some(font) = current_font.as_mut() {
                    let on = attr_flag(&e, b"val").unwrap_or(true);
                    match e.name().as_ref() {
                        b"b" => font.bold = on,
                        b"i" => font.italic = on,
                        _ => font.strikethrough = on,
                    }
                }
            }
            b"u" => {
                if let Some(font) = current_font.as_mut() {
                    font.underline = attr_string(&e, b"val")
                        .and_then(|v| Underline::parse(&v))
                        .unwrap_or(Underline::Single);
                }
            }
            b"sz" => {
                if let Some(font) = current_font.as_mut() {
                    if let Some(size) =
                        attr_string(&e, b"val").and_then(|v| v.parse::<f64>().ok())
                    {
                        font.size = size;
                    }
                }
            }
            b"name" => {
                if let Some(font) = current_font.as_mut() {
                    if let Some(name) = attr_string(&e, b"val") {
                        font.name = name;
                    }
                }
            }
            b"color" => {
                let color = parse_color_attrs(&e);
                if let Some(font) = current_font.as_mut() {
                    font.color = color;
                } else if let (Some(border), Some(edge)) = (current_border.as_mut(), current_edge)
                {
                    if let Some(slot) = edge_slot(border, edge).as_mut() {
                        slot.color = color;
                    }
                }
            }

            b"fill" => {
                if is_empty {
                    fills.push(FillStyle::None);
                } else {
                    current_fill = Some((PatternType::None, Color::Auto, Color::Auto));
                }
            }
            b"patternFill" => {
                if let Some(fill) = current_fill.as_mut() {
                    fill.0 = attr_string(&e, b"patternType")
                        .and_then(|v| PatternType::parse(&v))
                        .unwrap_or(PatternType::None);
                }
            }
            b"fgColor" => {
                if let Some(fill) = current_fill.as_mut() {
                    fill.1 = parse_color_attrs(&e);
                }
            }
            b"bgColor" => {
                if let Some(fill) = current_fill.as_mut() {
                    fill.2 = parse_color_attrs(&e);
                }
            }

            b"border" => {
                if is_empty {
                    borders.push(BorderStyle::default());
                } else {
                    current_border = Some(BorderStyle::default());
                }
            }
            b"left" | b"right" | b"top" | b"bottom" => {
                if let Some(border) = current_border.as_mut() {
                    let edge = match e.name().as_ref() {
                        b"left" => Edge::Left,
                        b"right" => Edge::Right,
                        b"top" => Edge::Top,
                        _ => Edge::Bottom,
                    };
                    let line = attr_string(&e, b"style")
                        .and_then(|v| BorderLineStyle::parse(&v))
                        .unwrap_or(BorderLineStyle::None);
                    if line != BorderLineStyle::None {
                        *edge_slot(border, edge) = Some(BorderEdge::new(line, Color::Auto));
                    }
                    if !is_empty {
                        current_edge = Some(edge);
                    }
                }
            }

            b"cellStyleXfs" if !is_empty => section = XfSection::CellStyleXfs,
            b"cellXfs" if !is_empty => section = XfSection::CellXfs,
            b"xf" if section != XfSection::None => {
                current_xf = Some(RawXf {
                    num_fmt_id: attr_u32(&e, b"numFmtId").unwrap_or(0),
                    font_id: attr_u32(&e, b"fontId").unwrap_or(0),
                    fill_id: attr_u32(&e, b"fillId").unwrap_or(0),
                    border_id: attr_u32(&e, b"borderId").unwrap_or(0),
                    xf_id: attr_u32(&e, b"xfId").unwrap_or(0),
                    ..RawXf::default()
                });
                if is_empty {
                    push_xf(&mut current_xf, section, &mut style_xfs, &mut cell_xfs);
                }
            }
            b"alignment" => {
                if let Some(xf) = current_xf.as_mut() {
                    xf.alignment = parse_alignment(&e);
                }
            }
            b"protection" => {
                if let Some(xf) = current_xf.as_mut() {
                    if let Some(locked) = attr_flag(&e, b"locked") {
                        xf.protection.locked = locked;
                    }
                    if let Some(hidden) = attr_flag(&e, b"hidden") {
                        xf.protection.hidden = hidden;
                    }
                }
            }

            b"cellStyle" => {
                if let Some(name) = attr_string(&e, b"name") {
                    let xf_id = attr_u32(&e, b"xfId").unwrap_or(0);
                    cell_styles.push((name, xf_id, attr_u32(&e, b"builtinId")));
                }
            }

            _ => {}
        }

    }

    let resolve = |xf: &RawXf| -> Style {
        Style {
            font: fonts.get(xf.font_id as usize).cloned().unwrap_or_default(),
            fill: fills.get(xf.fill_id as usize).cloned().unwrap_or_default(),
            border: borders.get(xf.border_id as usize).cloned().unwrap_or_default(),
            alignment: xf.alignment.clone(),
            number_format: resolve_number_format(xf.num_fmt_id, &numfmts),
            protection: xf.protection,
        }
    };

    let mut name_by_xf_id: HashMap<u32, String> = HashMap::new();
    let mut named_styles = Vec::with_capacity(cell_styles.len());
    for (name, xf_id, builtin_id) in cell_styles {
        let style = match style_xfs.get(xf_id as usize) {
            Some(xf) => resolve(xf),
            None => {
                log::warn!("cellStyle {name:?} points at missing xf {xf_id}; skipped");
                continue;
            }
        };
        name_by_xf_id.entry(xf_id).or_insert_with(|| name.clone());
        named_styles.push(NamedStyle {
            name,
            style,
            builtin_id,
        });
    }

    let cell_xf_names = cell_xfs
        .iter()
        .map(|xf| name_by_xf_id.get(&xf.xf_id).cloned())
        .collect();

    Ok(ParsedStyles {
        named_styles,
        cell_xf_names,
    })
}

fn push_xf(
    current: &mut Option<RawXf>,
    section: XfSection,
    style_xfs: &mut Vec<RawXf>,
    cell_xfs: &mut Vec<RawXf>,
) {
    if let Some(xf) = current.take() {
        match section {
            XfSection::CellStyleXfs => style_xfs.push(xf),
            XfSection::CellXfs => cell_xfs.push(xf),
            XfSection::None => {}
        }
    }
}

fn parse_alignment(e: &BytesStart<'_>) -> Alignment {
    let mut align = Alignment::default();
    for attr in e.attributes().flatten() {
        let val = match attr.unescape_value() {
            Ok(v) => v,
            Err(_) => continue,
        };
        match attr.key.as_ref() {
            b"horizontal" => align.horizontal = HorizontalAlignment::parse(&val),
            b"vertical" => align.vertical = VerticalAlignment::parse(&val),
            b"wrapText" => align.wrap_text = val.as_ref() == "1" || val.as_ref() == "true",
            b"shrinkToFit" => align.shrink_to_fit = val.as_ref() == "1" || val.as_ref() == "true",
            b"indent" => align.indent = val.parse::<u8>().unwrap_or(0),
            _ => {}
        }
    }
    align
}

fn resolve_number_format(id: u32, numfmts: &HashMap<u32, String>) -> NumberFormat {
    match numfmts.get(&id) {
        Some(code) => NumberFormat::from_code(code),
        None => NumberFormat::from_id(id),
    }
}

fn finalize_fill(pattern: PatternType, fg: Color, bg: Color) -> FillStyle {
    match pattern {
        PatternType::None | PatternType::Gray125 => FillStyle::None,
        PatternType::Solid => FillStyle::Solid { color: fg },
        p => FillStyle::Pattern {
            pattern: p,
            foreground: fg,
            background: bg,
        },
    }
}

/// Parse `rgb`/`theme`/`tint`/`indexed`/`auto` attributes
///
/// Opaque ARGB values come back as [`Color::Rgb`].
pub(crate) fn parse_color_attrs(e: &BytesStart<'_>) -> Color {
    if let Some(color) = attr_string(e, b"rgb").and_then(|v| Color::from_hex(&v)) {
        return match color {
            Color::Argb { a: 0xFF, r, g, b } => Color::Rgb { r, g, b },
            other => other,
        };
    }
    if let Some(index) = attr_u32(e, b"theme") {
        let tint = attr_string(e, b"tint")
            .and_then(|t| t.parse::<f64>().ok())
            .map(|t| (t * 100.0).round() as i8)
            .unwrap_or(0);
        return Color::Theme {
            index: index as u8,
            tint,
        };
    }
    if let Some(i) = attr_u32(e, b"indexed") {
        if i < 64 {
            return Color::Indexed(i as u8);
        }
    }
    Color::Auto
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetframe_core::style::builtins;

    fn roundtrip(workbook: &Workbook) -> ParsedStyles {
        let xml = XlsxStyleTable::build(workbook).to_styles_xml();
        read_styles_xml(xml.as_bytes()).unwrap()
    }

    #[test]
    fn test_named_styles_roundtrip() {
        let mut wb = Workbook::new();
        let mut header = Style::new()
            .bold(true)
            .number_format("@")
            .horizontal_alignment(HorizontalAlignment::Center)
            .border(BorderStyle::all(BorderLineStyle::Thin, Color::rgb(0, 0, 0)));
        header.protection.hidden = true;
        wb.add_named_style(NamedStyle::new("Default Header", header.clone()))
            .unwrap();
        wb.add_named_style(NamedStyle::new(
            "Date",
            Style::new().number_format("MM/DD/YYYY"),
        ))
        .unwrap();
        wb.named_styles_mut().add_builtin("Good").unwrap();

        let parsed = roundtrip(&wb);
        assert_eq!(parsed.named_styles.len(), 4);
        assert_eq!(parsed.named_styles[1].name, "Default Header");
        assert_eq!(parsed.named_styles[1].style, header);
        assert_eq!(
            parsed.named_styles[2].style.number_format,
            NumberFormat::Custom("MM/DD/YYYY".into())
        );
        assert_eq!(parsed.named_styles[3], builtins::get("Good").unwrap());
        assert_eq!(parsed.name_for_xf(1), Some("Default Header"));
        assert_eq!(parsed.name_for_xf(0), Some("Normal"));
    }

    #[test]
    fn test_xf_id_unknown_name() {
        let table = XlsxStyleTable::build(&Workbook::new());
        assert_eq!(table.xf_id_for(None), 0);
        assert_eq!(table.xf_id_for(Some("Missing")), 0);
        assert_eq!(table.xf_id_for(Some("Normal")), 0);
    }

    #[test]
    fn test_theme_color_tint() {
        let xml = r#"<fgColor theme="4" tint="-0.25"/>"#;
        let mut reader = Reader::from_str(xml);
        let mut buf = Vec::new();
        match reader.read_event_into(&mut buf).unwrap() {
            Event::Empty(e) => assert_eq!(parse_color_attrs(&e), Color::theme(4, -25)),
            other => panic!("unexpected event {other:?}"),
        }
    }
}
