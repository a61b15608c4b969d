//! Common utilities for E2E tests.

use std::io::{Cursor, Read};

use sheetframe_core::Workbook;
use sheetframe_xlsx::{XlsxReader, XlsxWriter, XlsxWriterOptions};

/// Write a workbook to memory and read it back
pub fn roundtrip(workbook: &Workbook) -> Workbook {
    let bytes = write_bytes(workbook, &XlsxWriterOptions::default());
    XlsxReader::read(Cursor::new(bytes)).expect("written workbook should read back")
}

/// Write a workbook to an in-memory archive
pub fn write_bytes(workbook: &Workbook, options: &XlsxWriterOptions) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    XlsxWriter::write_with_options(workbook, &mut buf, options).expect("write should succeed");
    buf.into_inner()
}

/// Contents of one part of a written archive
pub fn read_part(bytes: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).expect("valid zip");
    let mut file = archive.by_name(name).expect("part should exist");
    let mut content = String::new();
    file.read_to_string(&mut content).expect("utf-8 part");
    content
}

/// Names of every part in a written archive
pub fn part_names(bytes: &[u8]) -> Vec<String> {
    let archive = zip::ZipArchive::new(Cursor::new(bytes)).expect("valid zip");
    archive.file_names().map(str::to_string).collect()
}
