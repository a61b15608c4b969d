//! Theme part (`xl/theme/theme1.xml`)
//!
//! Only the color scheme carries data for us. Fonts and effects are the
//! stock Office values so that spreadsheet applications accept the part.

use std::io::{BufReader, Read};

use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::error::{XlsxError, XlsxResult};

/// Scheme slot names in document order
const SCHEME_SLOTS: [&str; 12] = [
    "dk1", "lt1", "dk2", "lt2", "accent1", "accent2", "accent3", "accent4", "accent5", "accent6",
    "hlink", "folHlink",
];

const HLINK: (u8, u8, u8) = (0x05, 0x63, 0xC1);
const FOL_HLINK: (u8, u8, u8) = (0x95, 0x4F, 0x72);

/// Map a theme color index (lt1, dk1, lt2, dk2, accents) to its scheme slot
fn slot_for_index(index: usize) -> usize {
    match index {
        0 => 1,
        1 => 0,
        2 => 3,
        3 => 2,
        i => i,
    }
}

pub(crate) fn to_theme_xml(colors: &[(u8, u8, u8)]) -> String {
    let mut scheme = [(0u8, 0u8, 0u8); 12];
    for (i, slot) in scheme.iter_mut().enumerate().take(10) {
        let index = slot_for_index(i);
        *slot = colors
            .get(index)
            .copied()
            .or_else(|| sheetframe_core::style::DEFAULT_THEME.get(index).copied())
            .unwrap_or((0, 0, 0));
    }
    scheme[10] = HLINK;
    scheme[11] = FOL_HLINK;

    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Office Theme">
  <a:themeElements>
    <a:clrScheme name="Office">"#,
    );
    for (name, (r, g, b)) in SCHEME_SLOTS.iter().zip(scheme.iter()) {
        xml.push_str(&format!(
            "\n      <a:{name}><a:srgbClr val=\"{:02X}{:02X}{:02X}\"/></a:{name}>",
            r, g, b
        ));
    }
    xml.push_str(
        r#"
    </a:clrScheme>
    <a:fontScheme name="Office">
      <a:majorFont><a:latin typeface="Cambria"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont>
      <a:minorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont>
    </a:fontScheme>
    <a:fmtScheme name="Office">
      <a:fillStyleLst>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
        <a:solidFill><a:schemeClr val="phClr"><a:tint val="50000"/></a:schemeClr></a:solidFill>
        <a:solidFill><a:schemeClr val="phClr"><a:shade val="80000"/></a:schemeClr></a:solidFill>
      </a:fillStyleLst>
      <a:lnStyleLst>
        <a:ln w="9525"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>
        <a:ln w="25400"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>
        <a:ln w="38100"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>
      </a:lnStyleLst>
      <a:effectStyleLst>
        <a:effectStyle><a:effectLst/></a:effectStyle>
        <a:effectStyle><a:effectLst/></a:effectStyle>
        <a:effectStyle><a:effectLst/></a:effectStyle>
      </a:effectStyleLst>
      <a:bgFillStyleLst>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
        <a:solidFill><a:schemeClr val="phClr"><a:tint val="95000"/></a:schemeClr></a:solidFill>
        <a:solidFill><a:schemeClr val="phClr"><a:shade val="90000"/></a:schemeClr></a:solidFill>
      </a:bgFillStyleLst>
    </a:fmtScheme>
  </a:themeElements>
  <a:objectDefaults/>
  <a:extraClrSchemeLst/>
</a:theme>"#,
    );
    xml
}

fn parse_hex_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
    let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
    let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;
    Some((r, g, b))
}

/// Read the ten scheme colors in theme-index order
///
/// Returns `None` when the part has no complete color scheme.
pub(crate) fn read_theme_colors<R: Read>(reader: R) -> XlsxResult<Option<Vec<(u8, u8, u8)>>> {
    let mut xml_reader = Reader::from_reader(BufReader::new(reader));
    xml_reader.trim_text(true);

    let mut buf = Vec::new();
    let mut scheme: [Option<(u8, u8, u8)>; 12] = [None; 12];
    let mut in_scheme = false;
    let mut current_slot: Option<usize> = None;

    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let local = e.local_name();
                match local.as_ref() {
                    b"clrScheme" => in_scheme = true,
                    name if in_scheme => {
                        if let Some(pos) = SCHEME_SLOTS.iter().position(|s| s.as_bytes() == name) {
                            current_slot = Some(pos);
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::Empty(e)) => {
                if let Some(slot) = current_slot {
                    let key: &[u8] = match e.local_name().as_ref() {
                        b"srgbClr" => b"val",
                        b"sysClr" => b"lastClr",
                        _ => b"",
                    };
                    if !key.is_empty() {
                        for attr in e.attributes().flatten() {
                            if attr.key.as_ref() == key {
                                let value = attr.unescape_value().map_err(XlsxError::Xml)?;
                                scheme[slot] = parse_hex_rgb(&value);
                            }
                        }
                    }
                }
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"clrScheme" => break,
                name if current_slot
                    .map(|s| SCHEME_SLOTS[s].as_bytes() == name)
                    .unwrap_or(false) =>
                {
                    current_slot = None
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(XlsxError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    let mut colors = Vec::with_capacity(10);
    for index in 0..10 {
        match scheme[slot_for_index(index)] {
            Some(rgb) => colors.push(rgb),
            None => return Ok(None),
        }
    }
    Ok(Some(colors))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sheetframe_core::style::DEFAULT_THEME;

    #[test]
    fn test_theme_roundtrip() {
        let mut colors = DEFAULT_THEME.to_vec();
        colors[4] = (0x12, 0x34, 0x56);
        let xml = to_theme_xml(&colors);
        let parsed = read_theme_colors(xml.as_bytes()).unwrap();
        assert_eq!(parsed, Some(colors));
    }

    #[test]
    fn test_light_dark_swap() {
        let xml = to_theme_xml(&DEFAULT_THEME);
        // lt1 is index 0 but the second slot in the document
        let dk1 = xml.find("<a:dk1>").unwrap();
        let lt1 = xml.find("<a:lt1>").unwrap();
        assert!(dk1 < lt1);
        let (r, g, b) = DEFAULT_THEME[1];
        assert!(xml.contains(&format!("<a:dk1><a:srgbClr val=\"{:02X}{:02X}{:02X}\"/>", r, g, b)));
    }

    #[test]
    fn test_sys_colors() {
        let xml = r#"<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main"><a:themeElements><a:clrScheme name="x">
<a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1>
<a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1>
<a:dk2><a:srgbClr val="1F497D"/></a:dk2>
<a:lt2><a:srgbClr val="EEECE1"/></a:lt2>
<a:accent1><a:srgbClr val="4F81BD"/></a:accent1>
<a:accent2><a:srgbClr val="C0504D"/></a:accent2>
<a:accent3><a:srgbClr val="9BBB59"/></a:accent3>
<a:accent4><a:srgbClr val="8064A2"/></a:accent4>
<a:accent5><a:srgbClr val="4BACC6"/></a:accent5>
<a:accent6><a:srgbClr val="F79646"/></a:accent6>
</a:clrScheme></a:themeElements></a:theme>"#;
        let colors = read_theme_colors(xml.as_bytes()).unwrap().unwrap();
        assert_eq!(colors[0], (0xFF, 0xFF, 0xFF));
        assert_eq!(colors[1], (0, 0, 0));
        assert_eq!(colors[4], (0x4F, 0x81, 0xBD));
    }

    #[test]
    fn test_incomplete_scheme() {
        let xml = r#"<a:theme xmlns:a="x"><a:clrScheme><a:dk1><a:srgbClr val="000000"/></a:dk1></a:clrScheme></a:theme>"#;
        assert_eq!(read_theme_colors(xml.as_bytes()).unwrap(), None);
    }
}
