//! # sheetframe
//!
//! Style tabular data cell by cell and export it to Excel workbooks.
//!
//! A [`StyledFrame`] wraps a [`DataFrame`] and keeps a named style for
//! every body cell, header cell and index cell. Styles are edited through
//! label or position selections, picked per column type, or applied as
//! row/column stripes. Exporting writes the values, merges the named styles
//! into the destination workbook and applies widths, heights, hyperlinks,
//! tables, filters and sheet protection.
//!
//! ## Features
//!
//! - Named styles shared through a per-frame registry, renamed on conflict
//! - Type-based defaults for numbers, dates, datetimes and durations
//! - Label and position selection over body, header and index
//! - Column width estimation
//! - Several frames per workbook, appended into existing `.xlsx`/`.xlsm` files
//!
//! ## Example
//!
//! ```rust
//! use sheetframe::prelude::*;
//!
//! let data = DataFrame::new(vec![
//!     ("item", vec![Value::from("pen"), Value::from("ink")]),
//!     ("price", vec![Value::Float(1.5), Value::Float(12.25)]),
//! ])
//! .unwrap();
//! let mut frame = StyledFrame::new(data, FrameOptions::default()).unwrap();
//!
//! frame
//!     .by_label(.., "price")
//!     .unwrap()
//!     .edit(StyleChanges::new().with_bold(true))
//!     .unwrap();
//! frame.row_stripes(None).unwrap();
//!
//! let mut writer = ExcelWriter::new("report.xlsx").unwrap();
//! frame
//!     .to_excel(&mut writer, &ExportOptions::new().with_sheet_name("Prices"))
//!     .unwrap();
//! assert_eq!(writer.book().sheet_count(), 1);
//! // writer.save().unwrap();
//! ```

pub mod access;
pub mod autofit;
pub mod color;
pub mod data;
pub mod error;
pub mod export;
pub mod frame;
pub mod grid;
pub mod options;
pub mod prelude;
pub mod registry;
pub mod style;
pub mod typed;
pub mod writer;

pub use access::{FrameRegion, LabelSel, PosSel, StyleOperand};
pub use autofit::estimate_width;
pub use color::{resolve_color, ColorInput, HexColor};
pub use data::{ColumnKey, ColumnKind, DataFrame, Index, Label, Value};
pub use error::{FrameError, Result};
pub use frame::{Hyperlinks, LinkColumn, StyledFrame};
pub use options::{
    AutoFit, ExportOptions, FrameOptions, NumberFormats, Options, StyleEdits, TableOptions,
    WriteOptions,
};
pub use registry::{StyleId, StyleRegistry};
pub use style::{Side, SideChange, Style, StyleChanges};
pub use typed::TypeStyles;
pub use writer::{ExcelWriter, SUPPORTED_EXTENSIONS};

// Re-export core types that appear in the styling API
pub use sheetframe_core::{
    BorderLineStyle, HorizontalAlignment, Hyperlink, PatternType, Underline, VerticalAlignment,
    Workbook, Worksheet,
};

// The frame data library, for building frames with `DataFrame::from_polars`
pub use polars;
