//! Errors raised while reading or writing a workbook package

use thiserror::Error;

/// Result type for XLSX operations
pub type XlsxResult<T> = std::result::Result<T, XlsxError>;

#[derive(Debug, Error)]
pub enum XlsxError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The container is not a readable zip archive
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The package is not an OOXML spreadsheet
    #[error("Not an XLSX/XLSM package: {0}")]
    InvalidFormat(String),

    /// A part named by a relationship is absent
    #[error("Package part {0} is missing")]
    MissingPart(String),

    /// Part content that does not parse (cell references, indices, numbers)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Writing needs at least one worksheet
    #[error("Cannot write a workbook without worksheets")]
    EmptyWorkbook,

    /// Rebuilding the model failed (duplicate sheet, style or table name)
    #[error(transparent)]
    Core(#[from] sheetframe_core::Error),
}
