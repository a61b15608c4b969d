//! Worksheet tables and auto-filters

use crate::cell::CellRange;

/// A table (ListObject) on a worksheet
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Table name, unique within the workbook
    pub name: String,
    /// Display name (Excel keeps it equal to `name`)
    pub display_name: String,
    /// Covered range, header row included
    pub range: CellRange,
    /// Column headers, left to right
    pub columns: Vec<TableColumn>,
    /// Style information
    pub style: TableStyleInfo,
    /// Whether the header row shows filter buttons
    pub auto_filter: bool,
}

impl Table {
    /// Create a table over `range`, one column per header label
    pub fn new<S: Into<String>>(name: S, range: CellRange, headers: Vec<String>) -> Self {
        let name = name.into();
        Self {
            display_name: name.clone(),
            name,
            range,
            columns: headers.into_iter().map(TableColumn::new).collect(),
            style: TableStyleInfo::default(),
            auto_filter: true,
        }
    }

    /// Set style information
    pub fn with_style(mut self, style: TableStyleInfo) -> Self {
        self.style = style;
        self
    }
}

/// One column of a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableColumn {
    /// Header label
    pub name: String,
}

impl TableColumn {
    /// Create a table column
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self { name: name.into() }
    }
}

/// Visual style of a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableStyleInfo {
    /// Built-in table style name (e.g. "TableStyleMedium9"); None = no style
    pub name: Option<String>,
    /// Emphasize the first column
    pub show_first_column: bool,
    /// Emphasize the last column
    pub show_last_column: bool,
    /// Banded rows
    pub show_row_stripes: bool,
    /// Banded columns
    pub show_column_stripes: bool,
}

impl Default for TableStyleInfo {
    fn default() -> Self {
        Self {
            name: Some("TableStyleMedium9".to_string()),
            show_first_column: false,
            show_last_column: false,
            show_row_stripes: true,
            show_column_stripes: false,
        }
    }
}

/// Auto-filter over a worksheet range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoFilter {
    /// Filtered range (usually a header row)
    pub range: CellRange,
}

impl AutoFilter {
    /// Create an auto-filter
    pub fn new(range: CellRange) -> Self {
        Self { range }
    }
}
