//! Worksheet-level settings survive a write/read cycle.

use crate::{read_part, roundtrip, write_bytes};
use pretty_assertions::assert_eq;
use sheetframe_core::{
    AutoFilter, CellRange, Hyperlink, SheetProtection, Table, TableStyleInfo, Workbook,
};
use sheetframe_xlsx::XlsxWriterOptions;

#[test]
fn test_column_widths_and_hidden() {
    let mut wb = Workbook::new();
    let sheet = wb.worksheet_mut(0).unwrap();
    sheet.set_cell_value("A1", 1.0).unwrap();
    sheet.set_column_width(0, 20.5);
    sheet.set_column_width(3, 4.0);
    sheet.set_column_hidden(5, true);

    let wb2 = roundtrip(&wb);
    let sheet2 = wb2.worksheet(0).unwrap();
    assert_eq!(sheet2.column_width(0), 20.5);
    assert_eq!(sheet2.column_width(3), 4.0);
    assert!(sheet2.is_column_hidden(5));
    assert!(!sheet2.is_column_hidden(0));
    assert_eq!(sheet2.column_width(1), sheetframe_core::DEFAULT_COLUMN_WIDTH);
}

#[test]
fn test_row_heights() {
    let mut wb = Workbook::new();
    let sheet = wb.worksheet_mut(0).unwrap();
    sheet.set_cell_value("A1", 1.0).unwrap();
    sheet.set_row_height(0, 30.0);
    // a row with no cells still carries its height
    sheet.set_row_height(9, 5.25);

    let wb2 = roundtrip(&wb);
    let sheet2 = wb2.worksheet(0).unwrap();
    assert_eq!(sheet2.row_height(0), 30.0);
    assert_eq!(sheet2.row_height(9), 5.25);
    assert_eq!(sheet2.row_height(1), sheetframe_core::DEFAULT_ROW_HEIGHT);
}

#[test]
fn test_right_to_left_and_protection() {
    let mut wb = Workbook::new();
    let sheet = wb.worksheet_mut(0).unwrap();
    sheet.set_right_to_left(true);
    sheet.set_protection(Some(SheetProtection {
        sheet: true,
        allow_auto_filter: true,
    }));
    wb.add_worksheet_with_name("Plain").unwrap();

    let wb2 = roundtrip(&wb);
    let first = wb2.worksheet(0).unwrap();
    assert!(first.is_right_to_left());
    assert_eq!(
        first.protection(),
        Some(&SheetProtection {
            sheet: true,
            allow_auto_filter: true,
        })
    );
    let plain = wb2.worksheet(1).unwrap();
    assert!(!plain.is_right_to_left());
    assert_eq!(plain.protection(), None);
}

#[test]
fn test_auto_filter() {
    let mut wb = Workbook::new();
    let sheet = wb.worksheet_mut(0).unwrap();
    sheet.set_cell_value("A1", "h").unwrap();
    sheet.set_auto_filter(Some(AutoFilter::new(CellRange::parse("A1:C10").unwrap())));

    let bytes = write_bytes(&wb, &XlsxWriterOptions::default());
    let workbook_xml = read_part(&bytes, "xl/workbook.xml");
    assert!(workbook_xml.contains("_xlnm._FilterDatabase"));
    assert!(workbook_xml.contains("Sheet1!$A$1:$C$10"));

    let wb2 = roundtrip(&wb);
    assert_eq!(
        wb2.worksheet(0).unwrap().auto_filter().map(|f| f.range),
        Some(CellRange::parse("A1:C10").unwrap())
    );
}

#[test]
fn test_hyperlinks() {
    let mut wb = Workbook::new();
    let sheet = wb.worksheet_mut(0).unwrap();
    sheet.set_cell_value("A1", "site").unwrap();
    sheet
        .set_hyperlink_at(
            0,
            0,
            Hyperlink::external("https://example.com/?a=1&b=2").with_tooltip("go"),
        )
        .unwrap();
    sheet.set_cell_value("A2", "jump").unwrap();
    sheet
        .set_hyperlink_at(1, 0, Hyperlink::internal("'Other'!B2").with_display("jump"))
        .unwrap();

    let wb2 = roundtrip(&wb);
    let sheet2 = wb2.worksheet(0).unwrap();
    assert_eq!(
        sheet2.hyperlink_at(0, 0),
        Some(&Hyperlink::external("https://example.com/?a=1&b=2").with_tooltip("go"))
    );
    assert_eq!(
        sheet2.hyperlink_at(1, 0),
        Some(&Hyperlink::internal("'Other'!B2").with_display("jump"))
    );
    assert_eq!(sheet2.hyperlinks().count(), 2);
}

#[test]
fn test_tables_across_sheets() {
    let mut wb = Workbook::new();
    let sheet = wb.worksheet_mut(0).unwrap();
    sheet.set_cell_value("A1", "x").unwrap();
    sheet.set_cell_value("B1", "y").unwrap();
    let first = Table::new(
        "Frame1",
        CellRange::parse("A1:B4").unwrap(),
        vec!["x".into(), "y".into()],
    );
    wb.add_table(0, first.clone()).unwrap();

    let idx = wb.add_worksheet_with_name("More").unwrap();
    let second = Table::new("Frame2", CellRange::parse("C3:C5").unwrap(), vec!["z".into()])
        .with_style(TableStyleInfo {
            name: Some("TableStyleLight9".into()),
            show_first_column: true,
            show_last_column: false,
            show_row_stripes: false,
            show_column_stripes: true,
        });
    wb.add_table(idx, second.clone()).unwrap();

    let bytes = write_bytes(&wb, &XlsxWriterOptions::default());
    let types = read_part(&bytes, "[Content_Types].xml");
    assert!(types.contains("/xl/tables/table1.xml"));
    assert!(types.contains("/xl/tables/table2.xml"));

    let wb2 = roundtrip(&wb);
    assert_eq!(wb2.worksheet(0).unwrap().tables(), &[first][..]);
    assert_eq!(wb2.worksheet(1).unwrap().tables(), &[second][..]);
    assert!(wb2.has_table("frame2"));
}

#[test]
fn test_hyperlinks_and_tables_share_relationships() {
    let mut wb = Workbook::new();
    let sheet = wb.worksheet_mut(0).unwrap();
    sheet
        .set_hyperlink_at(5, 0, Hyperlink::external("https://example.org"))
        .unwrap();
    wb.add_table(
        0,
        Table::new("T", CellRange::parse("A1:A3").unwrap(), vec!["a".into()]),
    )
    .unwrap();

    let bytes = write_bytes(&wb, &XlsxWriterOptions::default());
    let rels = read_part(&bytes, "xl/worksheets/_rels/sheet1.xml.rels");
    assert!(rels.contains(r#"Id="rId1""#));
    assert!(rels.contains(r#"Id="rId2""#));
    assert!(rels.contains("TargetMode=\"External\""));

    let wb2 = roundtrip(&wb);
    let sheet2 = wb2.worksheet(0).unwrap();
    assert_eq!(sheet2.tables().len(), 1);
    assert_eq!(
        sheet2.hyperlink_at(5, 0).and_then(|l| l.target.as_deref()),
        Some("https://example.org")
    );
}
