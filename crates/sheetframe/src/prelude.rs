//! Prelude module - common imports for sheetframe users
//!
//! ```rust
//! use sheetframe::prelude::*;
//! ```

pub use crate::{
    // Styling
    AutoFit,
    BorderLineStyle,
    ColorInput,
    // Data
    ColumnKey,
    DataFrame,
    // Export
    ExcelWriter,
    ExportOptions,
    FrameError,
    FrameOptions,
    HexColor,
    HorizontalAlignment,
    Hyperlink,
    Index,
    Label,
    LabelSel,
    LinkColumn,
    Options,
    PatternType,
    PosSel,
    Result,
    Style,
    StyleChanges,
    StyledFrame,
    TableOptions,
    Value,
    VerticalAlignment,
    WriteOptions,
};
