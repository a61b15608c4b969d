//! # sheetframe-core
//!
//! Destination workbook model for the sheetframe styling library.
//!
//! This crate provides the types an exported table lands in:
//! - [`Workbook`], [`Worksheet`] - The document structures
//! - [`CellValue`], [`CellAddress`] and [`CellRange`] - Cell contents and addressing
//! - [`NamedStyle`] and the style components it bundles (fonts, fills, borders, etc.)
//! - [`Table`], [`Hyperlink`] and sheet-level settings such as protection
//!
//! ## Example
//!
//! ```rust
//! use sheetframe_core::{CellValue, NamedStyle, Style, Workbook};
//!
//! let mut workbook = Workbook::new();
//! workbook
//!     .add_named_style(NamedStyle::new("Bold", Style::new().bold(true)))
//!     .unwrap();
//!
//! let sheet = workbook.worksheet_mut(0).unwrap();
//! sheet.set_cell_value("A1", "Hello").unwrap();
//! sheet.set_cell_value_at(1, 0, CellValue::Number(3.5)).unwrap();
//! sheet.set_cell_style_at(0, 0, "Bold").unwrap();
//! ```

pub mod cell;
pub mod column;
pub mod error;
pub mod hyperlink;
pub mod row;
pub mod style;
pub mod table;
pub mod workbook;
pub mod worksheet;

// Re-exports for convenience
pub use cell::{CellAddress, CellData, CellRange, CellValue};
pub use column::Column;
pub use error::{Error, Result};
pub use hyperlink::Hyperlink;
pub use row::Row;
pub use table::{AutoFilter, Table, TableColumn, TableStyleInfo};
pub use workbook::Workbook;
pub use worksheet::{SheetProtection, Worksheet};

// Re-export all style types for convenience
pub use style::{
    Alignment, BorderEdge, BorderLineStyle, BorderStyle, Color, FillStyle, FontStyle,
    HorizontalAlignment, NamedStyle, NamedStyleCollection, NumberFormat, PatternType, Protection,
    Style, Underline, VerticalAlignment,
};

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Default column width in character units
pub const DEFAULT_COLUMN_WIDTH: f64 = 8.43;

/// Default row height in points
pub const DEFAULT_ROW_HEIGHT: f64 = 15.0;
