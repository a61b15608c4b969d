//! Reading and writing through the file system.

use crate::{part_names, write_bytes};
use sheetframe_core::{CellValue, Workbook};
use sheetframe_xlsx::{XlsxReader, XlsxWriter, XlsxWriterOptions};

#[test]
fn test_write_and_read_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.xlsx");

    let mut wb = Workbook::new();
    wb.worksheet_mut(0)
        .unwrap()
        .set_cell_value("B2", "saved")
        .unwrap();
    XlsxWriter::write_file(&wb, &path).unwrap();

    let wb2 = XlsxReader::read_file(&path).unwrap();
    assert_eq!(
        wb2.worksheet(0).unwrap().get_value_at(1, 1),
        CellValue::string("saved")
    );
}

#[test]
fn test_xlsm_keeps_vba_project() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("macros.xlsm");

    let mut wb = Workbook::new();
    wb.set_vba_project(Some(b"fake vba".to_vec()));
    XlsxWriter::write_file(&wb, &path).unwrap();

    let wb2 = XlsxReader::read_file(&path).unwrap();
    assert_eq!(wb2.vba_project(), Some(&b"fake vba"[..]));
}

#[test]
fn test_xlsx_drops_vba_project() {
    let mut wb = Workbook::new();
    wb.set_vba_project(Some(vec![0, 1]));
    let bytes = write_bytes(&wb, &XlsxWriterOptions::default());
    assert!(!part_names(&bytes).iter().any(|n| n.ends_with("vbaProject.bin")));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    assert!(XlsxReader::read_file(dir.path().join("absent.xlsx")).is_err());
}
