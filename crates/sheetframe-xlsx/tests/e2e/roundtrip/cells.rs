//! Cell values survive a write/read cycle.

use crate::roundtrip;
use pretty_assertions::assert_eq;
use sheetframe_core::{CellValue, Workbook};

#[test]
fn test_values() {
    let mut wb = Workbook::new();
    let sheet = wb.worksheet_mut(0).unwrap();
    sheet.set_cell_value("A1", "text").unwrap();
    sheet.set_cell_value("B1", 42.5).unwrap();
    sheet.set_cell_value("C1", true).unwrap();
    sheet.set_cell_value("D1", -0.001).unwrap();
    sheet.set_cell_value("A2", "text").unwrap();
    sheet.set_cell_value("B2", "a & <b> \"c\"").unwrap();
    sheet.set_cell_value("C2", "  padded  ").unwrap();
    sheet.set_cell_value("D2", "line\nbreak").unwrap();

    let wb2 = roundtrip(&wb);
    let sheet2 = wb2.worksheet(0).unwrap();

    assert_eq!(sheet2.get_value_at(0, 0), CellValue::string("text"));
    assert_eq!(sheet2.get_value_at(0, 1), CellValue::Number(42.5));
    assert_eq!(sheet2.get_value_at(0, 2), CellValue::Boolean(true));
    assert_eq!(sheet2.get_value_at(0, 3), CellValue::Number(-0.001));
    assert_eq!(sheet2.get_value_at(1, 0), CellValue::string("text"));
    assert_eq!(sheet2.get_value_at(1, 1), CellValue::string("a & <b> \"c\""));
    assert_eq!(sheet2.get_value_at(1, 2), CellValue::string("  padded  "));
    assert_eq!(sheet2.get_value_at(1, 3), CellValue::string("line\nbreak"));
    assert_eq!(sheet2.cell_count(), 8);
}

#[test]
fn test_dates_are_serial_numbers() {
    let date = chrono_date(2024, 2, 29);
    let mut wb = Workbook::new();
    wb.worksheet_mut(0)
        .unwrap()
        .set_cell_value_at(0, 0, CellValue::from_date(date))
        .unwrap();

    let wb2 = roundtrip(&wb);
    assert_eq!(
        wb2.worksheet(0).unwrap().get_value_at(0, 0),
        CellValue::Number(45351.0)
    );
}

fn chrono_date(y: i32, m: u32, d: u32) -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_sparse_cells_and_sheets() {
    let mut wb = Workbook::new();
    wb.worksheet_mut(0)
        .unwrap()
        .set_cell_value_at(999, 25, 1.0)
        .unwrap();
    let idx = wb.add_worksheet_with_name("Second Sheet").unwrap();
    wb.worksheet_mut(idx)
        .unwrap()
        .set_cell_value("C3", "x")
        .unwrap();

    let wb2 = roundtrip(&wb);
    assert_eq!(wb2.sheet_count(), 2);
    assert_eq!(wb2.worksheet(0).unwrap().get_value_at(999, 25), CellValue::Number(1.0));
    let second = wb2.worksheet_by_name("Second Sheet").unwrap();
    assert_eq!(second.get_value_at(2, 2), CellValue::string("x"));
    assert_eq!(second.cell_count(), 1);
}

#[test]
fn test_non_finite_numbers_become_empty() {
    let mut wb = Workbook::new();
    let sheet = wb.worksheet_mut(0).unwrap();
    sheet.set_cell_value("A1", f64::NAN).unwrap();
    sheet.set_cell_value("A2", 1.0).unwrap();

    let wb2 = roundtrip(&wb);
    let sheet2 = wb2.worksheet(0).unwrap();
    assert_eq!(sheet2.get_value_at(0, 0), CellValue::Empty);
    assert_eq!(sheet2.get_value_at(1, 0), CellValue::Number(1.0));
}
