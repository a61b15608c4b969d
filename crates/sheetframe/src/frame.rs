//! The styled frame
//!
//! [`StyledFrame`] pairs a [`DataFrame`] with a style for every body cell,
//! header cell and index cell, plus the sheet geometry (column widths, row
//! heights) and export directives (table, hyperlinks) that go with it.

use ahash::AHashMap;
use sheetframe_core::{CellAddress, Hyperlink, PatternType};

use crate::access::{PosSel, StyleOperand};
use crate::color::{ColorInput, HexColor};
use crate::data::{ColumnKey, DataFrame, Label};
use crate::error::{FrameError, Result};
use crate::grid::{Axis, Region, StyleGrid, StyleVector};
use crate::options::{FrameOptions, Options, TableOptions};
use crate::registry::{EditCache, StyleId, StyleRegistry};
use crate::style::{
    default_date_style, default_datetime_style, default_header_style, default_index_style,
    default_number_style, default_timedelta_style, Style, StyleChanges,
};
use crate::typed::TypeStyles;

/// Column a hyperlink is attached to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LinkColumn {
    /// The index column (only placed when the index is written)
    Index,
    Label(Label),
}

impl From<Label> for LinkColumn {
    fn from(value: Label) -> Self {
        LinkColumn::Label(value)
    }
}

impl From<&str> for LinkColumn {
    fn from(value: &str) -> Self {
        LinkColumn::Label(value.into())
    }
}

impl From<String> for LinkColumn {
    fn from(value: String) -> Self {
        LinkColumn::Label(value.into())
    }
}

impl From<i64> for LinkColumn {
    fn from(value: i64) -> Self {
        LinkColumn::Label(value.into())
    }
}

/// Sparse hyperlink overlay keyed by column and 0-based row position
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hyperlinks {
    links: AHashMap<(LinkColumn, usize), Hyperlink>,
}

impl Hyperlinks {
    pub fn insert<C: Into<LinkColumn>>(
        &mut self,
        column: C,
        row: usize,
        link: Hyperlink,
    ) -> Option<Hyperlink> {
        self.links.insert((column.into(), row), link)
    }

    pub fn get(&self, column: &LinkColumn, row: usize) -> Option<&Hyperlink> {
        self.links.get(&(column.clone(), row))
    }

    pub fn remove(&mut self, column: &LinkColumn, row: usize) -> Option<Hyperlink> {
        self.links.remove(&(column.clone(), row))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&LinkColumn, usize, &Hyperlink)> {
        self.links.iter().map(|((c, r), l)| (c, *r, l))
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn clear(&mut self) {
        self.links.clear();
    }
}

/// A table with styling attached to every cell
#[derive(Debug, Clone)]
pub struct StyledFrame {
    pub(crate) data: DataFrame,
    pub(crate) registry: StyleRegistry,
    pub(crate) grid: StyleGrid,
    pub(crate) header: StyleVector,
    pub(crate) index: StyleVector,
    pub(crate) row_heights: Vec<f64>,
    pub(crate) column_widths: Vec<f64>,
    pub(crate) index_width: f64,
    pub(crate) header_height: f64,
    pub(crate) table: Option<TableOptions>,
    pub(crate) hyperlinks: Hyperlinks,
    pub(crate) defaults_used: bool,
    pub(crate) options: Options,
}

/// Register an optional operand, falling back to `fallback`
fn register(
    registry: &mut StyleRegistry,
    operand: Option<&StyleOperand>,
    fallback: &Style,
) -> Result<StyleId> {
    match operand {
        None => registry.add(fallback.clone()),
        Some(StyleOperand::Name(name)) => registry.resolve_name(name),
        Some(StyleOperand::Style(style)) => registry.add(style.clone()),
        Some(StyleOperand::Changes(changes)) => {
            let id = registry.add(fallback.clone())?;
            registry.edit(id, changes, &mut EditCache::default())
        }
    }
}

impl StyledFrame {
    /// Style `data` with the base style and type-based defaults
    pub fn new(data: DataFrame, options: FrameOptions) -> Result<Self> {
        if data.index().nlevels() > 1 || data.columns().nlevels() > 1 {
            return Err(FrameError::invalid(
                "multi-level index or columns are not supported",
            ));
        }
        let FrameOptions {
            style,
            header_style,
            index_style,
            number_style,
            date_style,
            datetime_style,
            timedelta_style,
            use_default_formats,
            options,
        } = options;

        let mut registry = StyleRegistry::new();
        let base = register(&mut registry, style.as_ref(), &options.default_style())?;
        let base_style = registry.get(base).clone();
        let derive_index = use_default_formats && index_style.is_none();

        let (header, index, by_type) = if use_default_formats {
            let header = register(
                &mut registry,
                header_style.as_ref(),
                &default_header_style(&base_style),
            )?;
            let index = register(
                &mut registry,
                index_style.as_ref(),
                &default_index_style(&base_style),
            )?;
            let styles = TypeStyles {
                default: base,
                number: register(
                    &mut registry,
                    number_style.as_ref(),
                    &default_number_style(&base_style),
                )?,
                date: register(
                    &mut registry,
                    date_style.as_ref(),
                    &default_date_style(&base_style, &options),
                )?,
                datetime: register(
                    &mut registry,
                    datetime_style.as_ref(),
                    &default_datetime_style(&base_style, &options),
                )?,
                duration: register(
                    &mut registry,
                    timedelta_style.as_ref(),
                    &default_timedelta_style(&base_style, &options),
                )?,
            };
            (header, index, Some(styles))
        } else {
            let header = register(&mut registry, header_style.as_ref(), &base_style)?;
            let index = register(&mut registry, index_style.as_ref(), &base_style)?;
            let overrides = [
                &number_style,
                &date_style,
                &datetime_style,
                &timedelta_style,
            ];
            let styles = if overrides.iter().any(|s| s.is_some()) {
                let mut pick = |operand: &Option<StyleOperand>| match operand {
                    Some(_) => register(&mut registry, operand.as_ref(), &base_style),
                    None => Ok(base),
                };
                Some(TypeStyles {
                    default: base,
                    number: pick(&number_style)?,
                    date: pick(&date_style)?,
                    datetime: pick(&datetime_style)?,
                    duration: pick(&timedelta_style)?,
                })
            } else {
                None
            };
            (header, index, styles)
        };

        let (rows, cols) = data.shape();
        let mut frame = Self {
            grid: StyleGrid::filled(rows, cols, base),
            header: StyleVector::filled(cols, header, Axis::Row),
            index: StyleVector::filled(rows, index, Axis::Column),
            row_heights: vec![options.row_height; rows],
            column_widths: vec![options.column_width; cols],
            index_width: options.column_width,
            header_height: options.row_height,
            table: None,
            hyperlinks: Hyperlinks::default(),
            defaults_used: use_default_formats,
            options,
            registry,
            data,
        };

        if let Some(styles) = by_type {
            frame.style_by_type(PosSel::All, PosSel::All, &styles, derive_index)?;
        }
        Ok(frame)
    }

    pub fn data(&self) -> &DataFrame {
        &self.data
    }

    pub fn registry(&self) -> &StyleRegistry {
        &self.registry
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Whether type-based default formats were applied at construction
    pub fn defaults_used(&self) -> bool {
        self.defaults_used
    }

    pub fn shape(&self) -> (usize, usize) {
        self.data.shape()
    }

    pub fn column_widths(&self) -> &[f64] {
        &self.column_widths
    }

    pub fn set_column_width<K: Into<ColumnKey>>(&mut self, column: K, width: f64) -> Result<()> {
        let col = self.column_position(&column.into())?;
        self.column_widths[col] = width;
        Ok(())
    }

    pub fn row_heights(&self) -> &[f64] {
        &self.row_heights
    }

    /// Height of the body row at 0-based position `row`
    pub fn set_row_height(&mut self, row: usize, height: f64) -> Result<()> {
        let slot = self
            .row_heights
            .get_mut(row)
            .ok_or_else(|| FrameError::invalid(format!("row {} is out of range", row)))?;
        *slot = height;
        Ok(())
    }

    pub fn index_width(&self) -> f64 {
        self.index_width
    }

    pub fn set_index_width(&mut self, width: f64) {
        self.index_width = width;
    }

    pub fn header_height(&self) -> f64 {
        self.header_height
    }

    pub fn set_header_height(&mut self, height: f64) {
        self.header_height = height;
    }

    pub fn hyperlinks(&self) -> &Hyperlinks {
        &self.hyperlinks
    }

    pub fn hyperlinks_mut(&mut self) -> &mut Hyperlinks {
        &mut self.hyperlinks
    }

    /// Attach a link to a body (or index) cell
    pub fn set_hyperlink<C: Into<LinkColumn>>(
        &mut self,
        column: C,
        row: usize,
        link: Hyperlink,
    ) -> Result<()> {
        let column = column.into();
        if let LinkColumn::Label(label) = &column {
            if self.data.columns().position(label).is_none() {
                return Err(FrameError::OutOfRangeColumn(label.to_string()));
            }
        }
        if row >= self.data.n_rows() {
            return Err(FrameError::invalid(format!("row {} is out of range", row)));
        }
        self.hyperlinks.insert(column, row, link);
        Ok(())
    }

    pub fn table(&self) -> Option<&TableOptions> {
        self.table.as_ref()
    }

    /// Format the exported range as a table; requires a header row
    pub fn format_as_table(&mut self, table: TableOptions) -> &mut Self {
        self.table = Some(table);
        self
    }

    pub fn clear_table_formatting(&mut self) -> &mut Self {
        self.table = None;
        self
    }

    /// Solid fill on rows 0, 2, 4, ...; `None` uses the configured stripe fill
    pub fn row_stripes(&mut self, color: Option<ColorInput>) -> Result<&mut Self> {
        let changes = self.stripe_changes(color);
        self.by_position(PosSel::every(2), PosSel::All)?.edit(changes)?;
        Ok(self)
    }

    /// Solid fill on columns 0, 2, 4, ...; `None` uses the configured stripe fill
    pub fn col_stripes(&mut self, color: Option<ColorInput>) -> Result<&mut Self> {
        let changes = self.stripe_changes(color);
        self.by_position(PosSel::All, PosSel::every(2))?.edit(changes)?;
        Ok(self)
    }

    fn stripe_changes(&self, color: Option<ColorInput>) -> StyleChanges {
        let color = color.unwrap_or_else(|| ColorInput::Hex(self.options.stripe_fill.clone()));
        StyleChanges::new()
            .with_fill_pattern(PatternType::Solid)
            .with_fill_color(color)
    }

    /// Frame position of a column key; labels missing from the frame that
    /// are non-negative integers are read as positions
    fn lookup_column(&self, key: &ColumnKey) -> Option<usize> {
        match key {
            ColumnKey::Label(label) => self.data.columns().position(label).or(match label {
                Label::Int(i) => usize::try_from(*i).ok(),
                _ => None,
            }),
            ColumnKey::Position(p) => Some(*p),
        }
    }

    /// Position of a frame column; positions must lie inside the frame
    pub(crate) fn column_position(&self, key: &ColumnKey) -> Result<usize> {
        self.lookup_column(key)
            .filter(|p| *p < self.data.n_cols())
            .ok_or_else(|| FrameError::OutOfRangeColumn(key.to_string()))
    }

    /// 0-based sheet column of a frame column shifted right by `startcol`
    pub(crate) fn sheet_column(&self, key: &ColumnKey, startcol: usize) -> Result<u16> {
        self.lookup_column(key)
            .and_then(|p| p.checked_add(startcol))
            .and_then(|c| CellAddress::check_column(c).ok())
            .ok_or_else(|| FrameError::OutOfRangeColumn(key.to_string()))
    }

    /// Sheet column letter of a frame column, shifted right by `startcol`
    ///
    /// Positions past the last frame column are allowed.
    pub fn get_column_letter<K: Into<ColumnKey>>(&self, column: K, startcol: usize) -> Result<String> {
        let col = self.sheet_column(&column.into(), startcol)?;
        Ok(CellAddress::column_to_letters(col))
    }

    /// Register a style so it can be assigned by name
    pub fn add_style(&mut self, style: Style) -> Result<String> {
        let id = self.registry.add(style)?;
        Ok(self.registry.name(id).to_string())
    }

    /// Style name of the body cell at `(row, col)`
    pub fn style_names_at(&self, row: usize, col: usize) -> Result<&str> {
        let (rows, cols) = self.grid.shape();
        if col >= cols {
            return Err(FrameError::OutOfRangeColumn(col.to_string()));
        }
        if row >= rows {
            return Err(FrameError::invalid(format!("row {} is out of range", row)));
        }
        Ok(self.registry.name(self.grid.get(row, col)))
    }

    /// Style name of the header cell above column `col`
    pub fn header_style_name(&self, col: usize) -> Result<&str> {
        self.header
            .ids()
            .get(col)
            .map(|id| self.registry.name(*id))
            .ok_or_else(|| FrameError::OutOfRangeColumn(col.to_string()))
    }

    /// Style name of the index cell of row `row`
    pub fn index_style_name(&self, row: usize) -> Result<&str> {
        self.index
            .ids()
            .get(row)
            .map(|id| self.registry.name(*id))
            .ok_or_else(|| FrameError::invalid(format!("row {} is out of range", row)))
    }

    /// Stripe fill currently configured
    pub fn stripe_fill(&self) -> &HexColor {
        &self.options.stripe_fill
    }
}

impl PartialEq for StyledFrame {
    fn eq(&self, other: &Self) -> bool {
        let same_styles = |a: &mut dyn Iterator<Item = StyleId>, b: &mut dyn Iterator<Item = StyleId>| {
            a.zip(b)
                .all(|(x, y)| self.registry.get(x) == other.registry.get(y))
        };

        self.data == other.data
            && self.grid.shape() == other.grid.shape()
            && same_styles(&mut self.grid.iter(), &mut other.grid.iter())
            && self.header.len() == other.header.len()
            && same_styles(
                &mut self.header.ids().iter().copied(),
                &mut other.header.ids().iter().copied(),
            )
            && self.index.len() == other.index.len()
            && same_styles(
                &mut self.index.ids().iter().copied(),
                &mut other.index.ids().iter().copied(),
            )
            && self.column_widths == other.column_widths
            && self.row_heights == other.row_heights
            && self.index_width == other.index_width
            && self.header_height == other.header_height
            && self.table == other.table
            && self.hyperlinks == other.hyperlinks
    }
}
