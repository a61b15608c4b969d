//! Saving to disk and appending to an existing workbook

use pretty_assertions::assert_eq;
use sheetframe::prelude::*;
use sheetframe_core::{CellRange, CellValue};
use sheetframe_xlsx::XlsxReader;

fn sales() -> StyledFrame {
    let data = DataFrame::new(vec![
        ("region", vec![Value::from("north"), Value::from("south")]),
        ("units", vec![Value::Int(120), Value::Int(75)]),
    ])
    .unwrap()
    .with_index(Index::new(["a", "b"]).with_name("id"))
    .unwrap();
    let mut frame = StyledFrame::new(data, FrameOptions::default()).unwrap();
    frame
        .header_by_label("units")
        .unwrap()
        .edit(StyleChanges::new().with_fill_color("#DDEBF7"))
        .unwrap();
    frame
        .set_hyperlink("region", 0, Hyperlink::external("https://example.com/north"))
        .unwrap();
    frame
}

#[test]
fn test_path_export_saves() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sales.xlsx");

    let options = ExportOptions::new()
        .with_sheet_name("Sales")
        .with_filters(true)
        .with_columns_to_hide(["units"])
        .with_protect_sheet(true);
    sales().to_excel_path(&path, &options).unwrap();
    assert!(path.is_file());

    let book = XlsxReader::read_file(&path).unwrap();
    let sheet = book.worksheet_by_name("Sales").unwrap();
    assert_eq!(sheet.get_value_at(0, 0), CellValue::string("id"));
    assert_eq!(sheet.get_value_at(1, 0), CellValue::string("a"));
    assert_eq!(sheet.get_value_at(2, 2), CellValue::Number(75.0));
    assert_eq!(sheet.cell_style_at(0, 2), Some("Default Header[1]"));
    assert_eq!(sheet.cell_style_at(1, 1), Some("Default"));
    assert!(sheet.is_column_hidden(2));
    assert!(sheet.protection().is_some());
    assert_eq!(
        sheet.auto_filter().map(|f| f.range),
        Some(CellRange::from_indices(0, 0, 0, 2))
    );
    assert_eq!(
        sheet.hyperlink_at(1, 1).and_then(|l| l.target.as_deref()),
        Some("https://example.com/north")
    );
    assert!(book.named_style("Default Header[1]").is_some());
}

#[test]
fn test_save_flag_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("unsaved.xlsx");
    sales()
        .to_excel_path(&path, &ExportOptions::new().with_save(false))
        .unwrap();
    assert!(!path.exists());

    let mut writer = ExcelWriter::new(&path).unwrap();
    sales()
        .to_excel(&mut writer, &ExportOptions::new().with_save(true))
        .unwrap();
    assert!(path.is_file());
}

#[test]
fn test_append_to_existing_workbook() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.xlsm");

    let mut table = sales();
    table.format_as_table(TableOptions::new());
    let writer = table
        .to_excel_path(&path, &ExportOptions::new().with_sheet_name("First"))
        .unwrap();
    assert!(writer.is_macro_enabled());

    let mut writer = ExcelWriter::load_existing(&path).unwrap();
    assert_eq!(writer.book().sheet_count(), 1);
    table
        .to_excel(&mut writer, &ExportOptions::new().with_sheet_name("Second"))
        .unwrap();
    writer.save().unwrap();

    let book = XlsxReader::read_file(&path).unwrap();
    let names: Vec<&str> = book.worksheets().map(|ws| ws.name()).collect();
    assert_eq!(names, vec!["First", "Second"]);
    let tables: Vec<&str> = book.table_names().collect();
    assert_eq!(tables, vec!["Table1", "Table2"]);
    let second = book.worksheet_by_name("Second").unwrap();
    assert_eq!(second.get_value_at(2, 1), CellValue::string("south"));
    assert!(second
        .cell_style_at(2, 2)
        .map_or(false, |name| name.starts_with("Default Number")));
}
