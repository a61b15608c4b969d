//! End-to-end tests for sheetframe-xlsx.
//!
//! Each test builds the workbook it needs in memory, writes it with
//! `XlsxWriter`, reads it back with `XlsxReader` and compares.

mod common;
mod roundtrip;

pub use common::*;
