//! Named styles and cell style references survive a write/read cycle.

use crate::{read_part, roundtrip, write_bytes};
use pretty_assertions::assert_eq;
use sheetframe_core::style::builtins;
use sheetframe_core::{
    BorderLineStyle, BorderStyle, Color, FillStyle, HorizontalAlignment, NamedStyle,
    NumberFormat, PatternType, Style, Underline, VerticalAlignment, Workbook,
};
use sheetframe_xlsx::XlsxWriterOptions;

fn header_style() -> Style {
    let mut style = Style::new()
        .bold(true)
        .font_size(12.0)
        .font_name("Arial")
        .font_color(Color::rgb(0x1F, 0x49, 0x7D))
        .fill_color(Color::rgb(0xDD, 0xEB, 0xF7))
        .border(BorderStyle::all(BorderLineStyle::Thin, Color::BLACK))
        .horizontal_alignment(HorizontalAlignment::Center);
    style.alignment.vertical = Some(VerticalAlignment::Center);
    style.alignment.wrap_text = true;
    style.font.underline = Underline::Double;
    style
}

#[test]
fn test_named_style_definitions() {
    let mut wb = Workbook::new();
    wb.add_named_style(NamedStyle::new("Header", header_style()))
        .unwrap();
    wb.add_named_style(NamedStyle::new(
        "Money",
        Style::new().number_format("#,##0.00 [$EUR]"),
    ))
    .unwrap();
    wb.add_named_style(NamedStyle::new(
        "Hatched",
        Style {
            fill: FillStyle::pattern(PatternType::DarkGrid, Color::RED, Color::WHITE),
            ..Style::default()
        },
    ))
    .unwrap();

    let wb2 = roundtrip(&wb);
    let names: Vec<&str> = wb2.named_styles().names().collect();
    assert_eq!(names, vec!["Normal", "Header", "Money", "Hatched"]);
    assert_eq!(wb2.named_style("Header").unwrap().style, header_style());
    assert_eq!(
        wb2.named_style("Money").unwrap().style.number_format,
        NumberFormat::Custom("#,##0.00 [$EUR]".into())
    );
    assert_eq!(
        wb2.named_style("Hatched").unwrap().style,
        wb.named_style("Hatched").unwrap().style
    );
}

#[test]
fn test_cell_style_names() {
    let mut wb = Workbook::new();
    wb.add_named_style(NamedStyle::new("Header", header_style()))
        .unwrap();
    wb.named_styles_mut().add_builtin("Percent").unwrap();
    let sheet = wb.worksheet_mut(0).unwrap();
    sheet.set_cell_value("A1", "h").unwrap();
    sheet.set_cell_style("A1", "Header").unwrap();
    sheet.set_cell_value("A2", 0.5).unwrap();
    sheet.set_cell_style("A2", "Percent").unwrap();
    sheet.set_cell_value("A3", 1.0).unwrap();
    sheet.set_cell_style("B5", "Header").unwrap();

    let wb2 = roundtrip(&wb);
    let sheet2 = wb2.worksheet(0).unwrap();
    assert_eq!(sheet2.cell_style_at(0, 0), Some("Header"));
    assert_eq!(sheet2.cell_style_at(1, 0), Some("Percent"));
    assert_eq!(sheet2.cell_style_at(2, 0), None);
    // style-only cell
    assert_eq!(sheet2.cell_style_at(4, 1), Some("Header"));
    assert_eq!(
        wb2.named_style("Percent").unwrap(),
        &builtins::get("Percent").unwrap()
    );
}

#[test]
fn test_unregistered_style_falls_back_to_normal() {
    let mut wb = Workbook::new();
    let sheet = wb.worksheet_mut(0).unwrap();
    sheet.set_cell_value("A1", 1.0).unwrap();
    sheet.set_cell_style("A1", "Nowhere").unwrap();

    let wb2 = roundtrip(&wb);
    assert_eq!(wb2.worksheet(0).unwrap().cell_style_at(0, 0), None);
}

#[test]
fn test_builtin_ids_written() {
    let mut wb = Workbook::new();
    wb.named_styles_mut().add_builtin("Good").unwrap();
    wb.add_named_style(NamedStyle::new("Custom", Style::new().italic(true)))
        .unwrap();

    let bytes = write_bytes(&wb, &XlsxWriterOptions::default());
    let styles = read_part(&bytes, "xl/styles.xml");
    assert!(styles.contains(r#"<cellStyle name="Normal" xfId="0" builtinId="0"/>"#));
    assert!(styles.contains(r#"<cellStyle name="Good" xfId="1" builtinId="26"/>"#));
    assert!(styles.contains(r#"<cellStyle name="Custom" xfId="2"/>"#));
    assert!(styles.contains(r#"<cellXfs count="3">"#));
}

#[test]
fn test_normal_redefinition() {
    let mut wb = Workbook::new();
    wb.named_styles_mut()
        .set_normal(Style::new().font_name("Arial").font_size(10.0));

    let wb2 = roundtrip(&wb);
    let normal = wb2.named_style("Normal").unwrap();
    assert_eq!(normal.style.font.name, "Arial");
    assert_eq!(normal.style.font.size, 10.0);
    assert_eq!(wb2.named_styles().len(), 1);
}

#[test]
fn test_theme_colors() {
    let mut wb = Workbook::new();
    let mut colors = wb.theme_colors().to_vec();
    colors[5] = (0xAB, 0xCD, 0xEF);
    wb.set_theme_colors(colors.clone());
    wb.add_named_style(NamedStyle::new(
        "Accent",
        Style::new().font_color(Color::theme(5, -25)),
    ))
    .unwrap();

    let wb2 = roundtrip(&wb);
    assert_eq!(wb2.theme_colors(), colors.as_slice());
    assert_eq!(
        wb2.named_style("Accent").unwrap().style.font.color,
        Color::theme(5, -25)
    );
}
