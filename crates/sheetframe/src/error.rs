//! Error types for sheetframe

use thiserror::Error;

/// Result type alias using [`FrameError`]
pub type Result<T> = std::result::Result<T, FrameError>;

/// Errors raised while styling or exporting a frame
#[derive(Debug, Error)]
pub enum FrameError {
    /// Input the styling layer cannot represent (multi-level labels,
    /// mismatched lengths, unknown row labels, ...)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A color that is neither hex, an RGB triple, a palette name nor a
    /// resolvable workbook color
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// A style name that is not registered
    #[error("Style by name {0} not found")]
    UnknownStyle(String),

    /// A different definition is already registered under this name
    #[error("Style by name \"{0}\" already exists with a different definition")]
    StyleNameConflict(String),

    /// Table formatting was requested for an export without a header row
    #[error("Cannot format as table without headers")]
    MissingHeaderForTable,

    /// Destination is not an `.xlsx`/`.xlsm` file
    #[error("Unsupported file extension {0}. Use .xlsx/.xlsm")]
    UnsupportedFileExtension(String),

    /// Column label or position outside the frame
    #[error("Column {0} is out of columns range")]
    OutOfRangeColumn(String),

    /// Workbook model error
    #[error(transparent)]
    Core(#[from] sheetframe_core::Error),

    /// XLSX read/write error
    #[error(transparent)]
    Xlsx(#[from] sheetframe_xlsx::XlsxError),

    /// Frame data error
    #[error(transparent)]
    Polars(#[from] polars::prelude::PolarsError),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl FrameError {
    pub(crate) fn invalid<S: Into<String>>(msg: S) -> Self {
        FrameError::InvalidInput(msg.into())
    }
}
