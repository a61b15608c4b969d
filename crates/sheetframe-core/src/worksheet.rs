//! Worksheet type

use std::collections::BTreeMap;

use crate::cell::{CellAddress, CellData, CellRange, CellValue};
use crate::column::Column;
use crate::error::{Error, Result};
use crate::hyperlink::Hyperlink;
use crate::row::Row;
use crate::table::{AutoFilter, Table};
use crate::{DEFAULT_COLUMN_WIDTH, DEFAULT_ROW_HEIGHT, MAX_COLS, MAX_ROWS};

/// A worksheet (single sheet in a workbook)
#[derive(Debug, Clone, Default)]
pub struct Worksheet {
    /// Sheet name
    name: String,
    /// Sparse cells keyed by (row, col)
    cells: BTreeMap<(u32, u16), CellData>,
    /// Column dimensions
    columns: BTreeMap<u16, Column>,
    /// Row dimensions
    rows: BTreeMap<u32, Row>,
    /// Tables (ListObjects)
    tables: Vec<Table>,
    /// Sheet-level auto-filter
    auto_filter: Option<AutoFilter>,
    /// Sheet protection settings
    protection: Option<SheetProtection>,
    /// Columns run right to left
    right_to_left: bool,
}

impl Worksheet {
    /// Create a new worksheet with the given name
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Get the sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the sheet name (validated by the owning workbook)
    pub(crate) fn set_name<S: Into<String>>(&mut self, name: S) {
        self.name = name.into();
    }

    // === Cell Access ===

    /// Get a cell by address string (e.g., "A1")
    pub fn cell(&self, address: &str) -> Result<Option<&CellData>> {
        let addr = CellAddress::parse(address)?;
        Ok(self.cell_at(addr.row, addr.col))
    }

    /// Get a cell by row and column indices
    pub fn cell_at(&self, row: u32, col: u16) -> Option<&CellData> {
        self.cells.get(&(row, col))
    }

    /// Get cell value by indices
    pub fn get_value_at(&self, row: u32, col: u16) -> CellValue {
        self.cell_at(row, col)
            .map(|c| c.value.clone())
            .unwrap_or(CellValue::Empty)
    }

    /// Name of the style applied to a cell, if any
    pub fn cell_style_at(&self, row: u32, col: u16) -> Option<&str> {
        self.cell_at(row, col).and_then(|c| c.style.as_deref())
    }

    /// Hyperlink of a cell, if any
    pub fn hyperlink_at(&self, row: u32, col: u16) -> Option<&Hyperlink> {
        self.cell_at(row, col).and_then(|c| c.hyperlink.as_ref())
    }

    // === Cell Modification ===

    /// Set a cell value by address string
    pub fn set_cell_value<V: Into<CellValue>>(&mut self, address: &str, value: V) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_cell_value_at(addr.row, addr.col, value)
    }

    /// Set a cell value by row and column indices
    pub fn set_cell_value_at<V: Into<CellValue>>(
        &mut self,
        row: u32,
        col: u16,
        value: V,
    ) -> Result<()> {
        self.entry(row, col)?.value = value.into();
        Ok(())
    }

    /// Apply a named style to a cell by address string
    pub fn set_cell_style(&mut self, address: &str, style_name: &str) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_cell_style_at(addr.row, addr.col, style_name)
    }

    /// Apply a named style to a cell by row and column indices
    pub fn set_cell_style_at(&mut self, row: u32, col: u16, style_name: &str) -> Result<()> {
        self.entry(row, col)?.style = Some(style_name.to_string());
        Ok(())
    }

    /// Attach a hyperlink to a cell
    pub fn set_hyperlink_at(&mut self, row: u32, col: u16, link: Hyperlink) -> Result<()> {
        self.entry(row, col)?.hyperlink = Some(link);
        Ok(())
    }

    /// Clear a cell by indices
    pub fn clear_cell_at(&mut self, row: u32, col: u16) {
        self.cells.remove(&(row, col));
    }

    fn entry(&mut self, row: u32, col: u16) -> Result<&mut CellData> {
        if row >= MAX_ROWS {
            return Err(Error::RowOutOfBounds(row, MAX_ROWS - 1));
        }
        if col >= MAX_COLS {
            return Err(Error::ColumnOutOfBounds(col as u32, MAX_COLS - 1));
        }
        Ok(self.cells.entry((row, col)).or_default())
    }

    /// Bounds of every stored cell, styled-but-empty cells included
    pub fn dimension(&self) -> Option<CellRange> {
        let mut keys = self.cells.keys();
        let &(first_row, first_col) = keys.next()?;
        let (mut min_col, mut max_col) = (first_col, first_col);
        let mut max_row = first_row;
        for &(row, col) in self.cells.keys() {
            min_col = min_col.min(col);
            max_col = max_col.max(col);
            max_row = max_row.max(row);
        }
        Some(CellRange::from_indices(first_row, min_col, max_row, max_col))
    }

    /// Get the number of stored cells
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Check if the worksheet is empty
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate over stored cells in row-major order
    pub fn iter_cells(&self) -> impl Iterator<Item = (u32, u16, &CellData)> {
        self.cells.iter().map(|(&(row, col), data)| (row, col, data))
    }

    /// Iterate over cells carrying a hyperlink
    pub fn hyperlinks(&self) -> impl Iterator<Item = (u32, u16, &Hyperlink)> {
        self.iter_cells()
            .filter_map(|(row, col, data)| data.hyperlink.as_ref().map(|h| (row, col, h)))
    }

    // === Dimensions ===

    /// Get column width (default if not set)
    pub fn column_width(&self, col: u16) -> f64 {
        self.columns
            .get(&col)
            .and_then(|c| c.width)
            .unwrap_or(DEFAULT_COLUMN_WIDTH)
    }

    /// Set column width
    pub fn set_column_width(&mut self, col: u16, width: f64) {
        self.columns.entry(col).or_default().width = Some(width);
    }

    /// Check if column is hidden
    pub fn is_column_hidden(&self, col: u16) -> bool {
        self.columns.get(&col).map(|c| c.hidden).unwrap_or(false)
    }

    /// Set column hidden state
    pub fn set_column_hidden(&mut self, col: u16, hidden: bool) {
        self.columns.entry(col).or_default().hidden = hidden;
    }

    /// Columns with custom settings
    pub fn columns(&self) -> impl Iterator<Item = (u16, &Column)> {
        self.columns
            .iter()
            .filter(|(_, c)| c.has_custom_settings())
            .map(|(&i, c)| (i, c))
    }

    /// Get row height (default if not set)
    pub fn row_height(&self, row: u32) -> f64 {
        self.rows
            .get(&row)
            .and_then(|r| r.height)
            .unwrap_or(DEFAULT_ROW_HEIGHT)
    }

    /// Set row height in points
    pub fn set_row_height(&mut self, row: u32, height: f64) {
        self.rows.entry(row).or_default().height = Some(height);
    }

    /// Set row hidden state
    pub fn set_row_hidden(&mut self, row: u32, hidden: bool) {
        self.rows.entry(row).or_default().hidden = hidden;
    }

    /// Get row settings
    pub fn row(&self, row: u32) -> Option<&Row> {
        self.rows.get(&row)
    }

    /// Rows with custom settings
    pub fn rows(&self) -> impl Iterator<Item = (u32, &Row)> {
        self.rows
            .iter()
            .filter(|(_, r)| r.has_custom_settings())
            .map(|(&i, r)| (i, r))
    }

    // === Tables and filters ===

    /// Tables on this sheet
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Add a table (workbook-wide name checks live in [`crate::Workbook::add_table`])
    pub fn push_table(&mut self, table: Table) {
        self.tables.push(table);
    }

    /// Sheet-level auto-filter
    pub fn auto_filter(&self) -> Option<&AutoFilter> {
        self.auto_filter.as_ref()
    }

    /// Set or clear the auto-filter
    pub fn set_auto_filter(&mut self, filter: Option<AutoFilter>) {
        self.auto_filter = filter;
    }

    // === Sheet settings ===

    /// Protection settings
    pub fn protection(&self) -> Option<&SheetProtection> {
        self.protection.as_ref()
    }

    /// Set or clear protection
    pub fn set_protection(&mut self, protection: Option<SheetProtection>) {
        self.protection = protection;
    }

    /// Whether the sheet view runs right to left
    pub fn is_right_to_left(&self) -> bool {
        self.right_to_left
    }

    /// Set right-to-left view
    pub fn set_right_to_left(&mut self, rtl: bool) {
        self.right_to_left = rtl;
    }
}

/// Sheet protection settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetProtection {
    /// Sheet is protected
    pub sheet: bool,
    /// Filtering stays available while protected
    pub allow_auto_filter: bool,
}

impl Default for SheetProtection {
    fn default() -> Self {
        Self {
            sheet: true,
            allow_auto_filter: false,
        }
    }
}
