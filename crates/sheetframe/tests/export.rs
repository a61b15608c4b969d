//! End-to-end export tests (style -> export -> inspect the workbook)

use pretty_assertions::assert_eq;
use sheetframe::prelude::*;
use sheetframe::{Hyperlinks, StyleOperand};
use sheetframe_core::{CellRange, CellValue};

fn numbers() -> DataFrame {
    DataFrame::new(vec![
        ("x", vec![Value::Int(1), Value::Int(2), Value::Int(3)]),
        ("y", vec![Value::Float(1.5), Value::Float(2.5), Value::Float(3.5)]),
    ])
    .unwrap()
}

/// 3x2 numeric table with defaults and auto-fit
#[test]
fn test_numeric_table_with_defaults() {
    let frame = StyledFrame::new(numbers(), FrameOptions::default()).unwrap();
    let mut writer = ExcelWriter::new("numbers.xlsx").unwrap();
    let options = ExportOptions::new().with_auto_fit(AutoFit::default());
    frame.to_excel(&mut writer, &options).unwrap();

    let book = writer.book();
    let sheet = book.worksheet_by_name("Sheet1").unwrap();

    assert_eq!(sheet.get_value_at(0, 1), CellValue::string("x"));
    assert_eq!(sheet.get_value_at(0, 2), CellValue::string("y"));
    assert_eq!(sheet.get_value_at(1, 0), CellValue::Number(0.0));
    assert_eq!(sheet.get_value_at(3, 0), CellValue::Number(2.0));
    assert_eq!(sheet.get_value_at(3, 2), CellValue::Number(3.5));

    assert_eq!(sheet.cell_style_at(0, 1), Some("Default Header"));
    assert_eq!(sheet.cell_style_at(1, 0), Some("Default Number Index"));
    for row in 1..4 {
        for col in 1..3 {
            assert_eq!(sheet.cell_style_at(row, col), Some("Default Number"));
        }
    }

    let number = &book.named_style("Default Number").unwrap().style;
    assert_eq!(number.alignment.horizontal, Some(HorizontalAlignment::Right));
    assert!(book.named_style("Default Header").unwrap().style.font.bold);

    for col in 1..3 {
        assert!(sheet.column_width(col) >= "x".len() as f64 + 2.0);
    }
    // export-time fitting leaves the frame alone
    assert_eq!(frame.column_widths(), &[8.43, 8.43]);
}

/// Column types come from the polars dtypes
#[test]
fn test_polars_frame_styled_by_dtype() {
    use sheetframe::polars::prelude::{DataType, NamedFrom, Series};

    let days = Series::new("day".into(), &[19_723i32, 19_724])
        .cast(&DataType::Date)
        .unwrap();
    let frame = sheetframe::polars::prelude::DataFrame::new(vec![
        Series::new("qty".into(), &[5u16, 7]).into(),
        Series::new("label".into(), &["a", "b"]).into(),
        days.into(),
    ])
    .unwrap();
    let styled = StyledFrame::new(DataFrame::from_polars(frame), FrameOptions::default()).unwrap();

    let mut writer = ExcelWriter::new("typed.xlsx").unwrap();
    styled.to_excel(&mut writer, &ExportOptions::new()).unwrap();
    let sheet = writer.book().worksheet(0).unwrap();

    assert_eq!(sheet.get_value_at(0, 3), CellValue::string("day"));
    assert_eq!(sheet.get_value_at(1, 1), CellValue::Number(5.0));
    assert_eq!(sheet.get_value_at(2, 2), CellValue::string("b"));
    // 2024-01-01
    assert_eq!(sheet.get_value_at(1, 3), CellValue::Number(45292.0));
    assert_eq!(sheet.cell_style_at(1, 1), Some("Default Number"));
    assert_eq!(sheet.cell_style_at(1, 2), Some("Default"));
    assert_eq!(sheet.cell_style_at(1, 3), Some("Default Date"));
}

/// Editing one of ten cells that share a style
#[test]
fn test_single_cell_edit() {
    let data = DataFrame::new(vec![("n", (0..10).map(Value::Int).collect::<Vec<_>>())]).unwrap();
    let mut frame = StyledFrame::new(data, FrameOptions::default()).unwrap();
    let before = frame.registry().len();

    let created = frame
        .by_position(4usize, 0usize)
        .unwrap()
        .edit(StyleChanges::new().with_bold(true).with_font_color("red"))
        .unwrap();

    assert_eq!(created, vec!["Default Number[1]".to_string()]);
    assert_eq!(frame.registry().len(), before + 1);
    let users: Vec<usize> = (0..10)
        .filter(|&r| frame.style_names_at(r, 0).unwrap() == "Default Number[1]")
        .collect();
    assert_eq!(users, vec![4]);

    let edited = frame.registry().style("Default Number[1]").unwrap();
    assert!(edited.bold);
    assert_eq!(edited.font_color.as_ref().map(HexColor::as_str), Some("FF0000"));
}

/// A second export with `replace_sheet` wins
#[test]
fn test_replace_sheet() {
    let first = StyledFrame::new(numbers(), FrameOptions::default()).unwrap();
    let mut second = first.clone();
    second.set_column("x", "Good").unwrap();

    let mut writer = ExcelWriter::new("replace.xlsx").unwrap();
    let options = ExportOptions::new().with_sheet_name("Data");
    first.to_excel(&mut writer, &options).unwrap();
    second
        .to_excel(&mut writer, &options.clone().with_replace_sheet(true))
        .unwrap();

    let book = writer.book();
    assert_eq!(book.sheet_count(), 1);
    let sheet = book.worksheet_by_name("Data").unwrap();
    assert_eq!(sheet.cell_style_at(1, 1), Some("Good"));
    assert_eq!(sheet.cell_style_at(1, 2), Some("Default Number"));
    assert!(book.named_styles().contains("Good"));
}

/// Table formatting needs a header row
#[test]
fn test_table_without_header() {
    let mut frame = StyledFrame::new(numbers(), FrameOptions::default()).unwrap();
    frame.format_as_table(TableOptions::new());

    let mut writer = ExcelWriter::new("table.xlsx").unwrap();
    let options =
        ExportOptions::new().with_write_options(WriteOptions::default().with_header(false));
    let result = frame.to_excel(&mut writer, &options);

    assert!(matches!(result, Err(FrameError::MissingHeaderForTable)));
    assert_eq!(writer.book().sheet_count(), 0);
    assert_eq!(writer.book().named_styles().len(), 1);
}

#[test]
fn test_export_without_index_or_header() {
    let frame = StyledFrame::new(numbers(), FrameOptions::default()).unwrap();
    let mut writer = ExcelWriter::new("plain.xlsx").unwrap();
    let options = ExportOptions::new().with_write_options(
        WriteOptions::default()
            .with_index(false)
            .with_header(false)
            .with_start(5, 3),
    );
    frame.to_excel(&mut writer, &options).unwrap();

    let sheet = writer.book().worksheet(0).unwrap();
    assert_eq!(sheet.get_value_at(5, 3), CellValue::Number(1.0));
    assert_eq!(sheet.get_value_at(7, 4), CellValue::Number(3.5));
    assert_eq!(sheet.get_value_at(4, 3), CellValue::Empty);
    assert_eq!(sheet.cell_style_at(5, 3), Some("Default Number"));
    assert_eq!(sheet.cell_style_at(5, 2), None);
}

#[test]
fn test_index_label_and_table_range() {
    let mut frame = StyledFrame::new(numbers(), FrameOptions::default()).unwrap();
    frame.format_as_table(
        TableOptions::new()
            .with_name("Prices")
            .with_style("TableStyleLight9")
            .with_row_stripes(false),
    );

    let mut writer = ExcelWriter::new("labels.xlsx").unwrap();
    let options = ExportOptions::new().with_write_options(
        WriteOptions::default()
            .with_index_label("row")
            .with_start(2, 1),
    );
    frame.to_excel(&mut writer, &options).unwrap();

    let sheet = writer.book().worksheet(0).unwrap();
    assert_eq!(sheet.get_value_at(2, 1), CellValue::string("row"));
    let table = &sheet.tables()[0];
    assert_eq!(table.name, "Prices");
    assert_eq!(table.range, CellRange::from_indices(2, 1, 5, 3));
    let headers: Vec<&str> = table.columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(headers, vec!["row", "x", "y"]);
    assert_eq!(table.style.name.as_deref(), Some("TableStyleLight9"));
    assert!(!table.style.show_row_stripes);
    // tables carry their own filter buttons
    assert!(sheet.auto_filter().is_none());
}

#[test]
fn test_hyperlinks_follow_layout() {
    let mut frame = StyledFrame::new(numbers(), FrameOptions::default()).unwrap();
    frame
        .set_hyperlink("y", 2, Hyperlink::external("https://example.com/y"))
        .unwrap();
    frame
        .set_hyperlink(LinkColumn::Index, 0, Hyperlink::internal("'Sheet1'!A1"))
        .unwrap();

    let mut writer = ExcelWriter::new("links.xlsx").unwrap();
    frame.to_excel(&mut writer, &ExportOptions::new()).unwrap();
    let sheet = writer.book().worksheet(0).unwrap();
    assert_eq!(
        sheet.hyperlink_at(3, 2).and_then(|l| l.target.as_deref()),
        Some("https://example.com/y")
    );
    assert!(sheet.hyperlink_at(1, 0).is_some());

    // without the index column the index link has nowhere to go
    let mut writer = ExcelWriter::new("links.xlsx").unwrap();
    let options =
        ExportOptions::new().with_write_options(WriteOptions::default().with_index(false));
    frame.to_excel(&mut writer, &options).unwrap();
    let sheet = writer.book().worksheet(0).unwrap();
    assert!(sheet.hyperlink_at(3, 1).is_some());
    assert!(sheet.hyperlink_at(1, 0).is_none());
}

#[test]
fn test_slice_carries_links_and_styles() {
    let mut frame = StyledFrame::new(numbers(), FrameOptions::default()).unwrap();
    frame.set_hyperlink("x", 1, Hyperlink::external("a")).unwrap();
    frame.set_hyperlink("y", 2, Hyperlink::external("b")).unwrap();
    frame
        .by_label(1i64, "y")
        .unwrap()
        .set(StyleOperand::from("Bad"))
        .unwrap();

    let sub = frame.iloc(1usize..3, 1usize).unwrap();
    assert_eq!(sub.shape(), (2, 1));
    assert_eq!(sub.style_names_at(0, 0).unwrap(), "Bad");
    let mut expected = Hyperlinks::default();
    expected.insert("y", 1, Hyperlink::external("b"));
    assert_eq!(sub.hyperlinks(), &expected);
}

#[test]
fn test_unsupported_destination() {
    let frame = StyledFrame::new(numbers(), FrameOptions::default()).unwrap();
    let result = frame.to_excel_path("out.ods", &ExportOptions::new());
    assert!(matches!(result, Err(FrameError::UnsupportedFileExtension(e)) if e == ".ods"));
}

#[test]
fn test_unknown_hidden_column() {
    let frame = StyledFrame::new(numbers(), FrameOptions::default()).unwrap();
    let mut writer = ExcelWriter::new("hidden.xlsx").unwrap();
    let options = ExportOptions::new().with_columns_to_hide(["nope"]);
    assert!(matches!(
        frame.to_excel(&mut writer, &options),
        Err(FrameError::OutOfRangeColumn(_))
    ));
    assert_eq!(writer.book().sheet_count(), 0);
}
