//! # sheetframe-xlsx
//!
//! XLSX/XLSM (Office Open XML) reader and writer for the sheetframe
//! workbook model.
//!
//! The writer emits one `cellStyleXfs`/`cellXfs` pair per named style, so a
//! cell's `s` attribute always names exactly one named style and the reader
//! can map it back.

pub mod error;
pub mod reader;
pub mod writer;

mod styles;
mod theme;

pub use error::{XlsxError, XlsxResult};
pub use reader::XlsxReader;
pub use writer::{XlsxWriter, XlsxWriterOptions};
