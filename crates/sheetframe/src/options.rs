//! Configuration
//!
//! Library-wide defaults live in [`Options`]; the per-call structs
//! ([`FrameOptions`], [`AutoFit`], [`TableOptions`], [`ExportOptions`],
//! [`WriteOptions`]) take their defaults from it.

use sheetframe_core::style::builtins;
use sheetframe_core::{FillStyle, PatternType};

use crate::access::StyleOperand;
use crate::color::{rgb_to_hex, ColorInput, HexColor};
use crate::data::{ColumnKey, Label};
use crate::style::{Style, StyleChanges};

/// Common number format codes
pub struct NumberFormats;

impl NumberFormats {
    pub const TEXT: &'static str = "@";
    pub const GENERAL: &'static str = "General";
    pub const GENERAL_INTEGER: &'static str = "0";
    pub const GENERAL_FLOAT: &'static str = "0.00";
    pub const PERCENT: &'static str = "0.0%";
    pub const THOUSANDS_COMMA_SEP: &'static str = "#,##0";

    pub const DATE_US: &'static str = "MM/DD/YYYY";
    pub const DATE_INTERNATIONAL: &'static str = "DD/MM/YYYY";
    pub const DATE_LONG: &'static str = "mmm dd, yyyy";

    pub const TIME_24_HOURS: &'static str = "HH:MM";
    pub const TIME_24_HOURS_WITH_SECONDS: &'static str = "HH:MM:SS";
    pub const TIME_12_HOURS: &'static str = "h:MM AM/PM";
    pub const TIME_12_HOURS_WITH_SECONDS: &'static str = "h:MM:SS AM/PM";

    pub const TIMEDELTA_FRACTIONAL_DAYS: &'static str = "0.00";
    pub const TIMEDELTA_DAYS: &'static str = "0.00 \"days\"";
    pub const TIMEDELTA_HOURS_MINUTES: &'static str = "[h]:mm";
    pub const TIMEDELTA_HOURS_MINUTES_SECONDS: &'static str = "[h]:mm:ss";
    pub const TIMEDELTA_DAYS_HOURS_MINUTES: &'static str = "d \"days\" h:mm";
    pub const TIMEDELTA_DAYS_HOURS_MINUTES_SECONDS: &'static str = "d \"days\" h:mm:ss";

    /// Date format for a locale such as `en_US`
    pub fn date_for_locale(locale: &str) -> &'static str {
        if locale == "en_US" {
            Self::DATE_US
        } else {
            Self::DATE_INTERNATIONAL
        }
    }

    /// A date format followed by a time format
    pub fn date_time(date: &str, time: &str) -> String {
        format!("{} {}", date, time)
    }
}

/// Ready-made change sets
pub struct StyleEdits;

impl StyleEdits {
    /// Font color, fill color and pattern of the builtin `Bad`
    pub fn bad() -> StyleChanges {
        Self::from_builtin("Bad")
    }

    /// Font color, fill color and pattern of the builtin `Good`
    pub fn good() -> StyleChanges {
        Self::from_builtin("Good")
    }

    /// Font color, fill color and pattern of the builtin `Neutral`
    pub fn neutral() -> StyleChanges {
        Self::from_builtin("Neutral")
    }

    /// Back to automatic font color and no fill
    pub fn normal() -> StyleChanges {
        Self::from_builtin("Normal")
    }

    /// Red text on a yellow fill
    pub fn highlight() -> StyleChanges {
        StyleChanges::new()
            .with_font_color("FF0000")
            .with_fill_color("FFFF00")
            .with_fill_pattern(PatternType::Solid)
    }

    fn from_builtin(name: &str) -> StyleChanges {
        let mut changes = StyleChanges::new();
        let Some(named) = builtins::get(name) else {
            return changes;
        };
        let font = named.style.font.color;
        changes.font_color = Some((!font.is_auto()).then_some(ColorInput::Workbook(font)));
        match named.style.fill {
            FillStyle::None => {
                changes.fill_color = Some(None);
                changes.fill_pattern = Some(PatternType::Solid);
            }
            FillStyle::Solid { color } => {
                changes.fill_color = Some(Some(ColorInput::Workbook(color)));
                changes.fill_pattern = Some(PatternType::Solid);
            }
            FillStyle::Pattern {
                pattern,
                foreground,
                ..
            } => {
                changes.fill_color = Some(Some(ColorInput::Workbook(foreground)));
                changes.fill_pattern = Some(pattern);
            }
        }
        changes
    }
}

/// Library defaults
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub date_format: String,
    pub time_format: String,
    pub datetime_format: String,
    pub timedelta_format: String,
    pub font_name: String,
    pub font_size: f64,
    pub autofit_scalar: f64,
    pub autofit_flat: f64,
    pub autofit_min: f64,
    pub autofit_max: f64,
    pub column_width: f64,
    pub row_height: f64,
    /// Fill used by row and column stripes
    pub stripe_fill: HexColor,
}

impl Default for Options {
    fn default() -> Self {
        Self::for_locale("en_US")
    }
}

impl Options {
    /// Defaults for a locale; only the date order depends on it
    pub fn for_locale(locale: &str) -> Self {
        let date = NumberFormats::date_for_locale(locale);
        Self {
            date_format: date.to_string(),
            time_format: NumberFormats::TIME_24_HOURS_WITH_SECONDS.to_string(),
            datetime_format: NumberFormats::date_time(
                date,
                NumberFormats::TIME_24_HOURS_WITH_SECONDS,
            ),
            timedelta_format: NumberFormats::TIMEDELTA_FRACTIONAL_DAYS.to_string(),
            font_name: "Calibri".to_string(),
            font_size: 11.0,
            autofit_scalar: 1.25,
            autofit_flat: 1.5,
            autofit_min: 6.86,
            autofit_max: 150.0,
            column_width: sheetframe_core::DEFAULT_COLUMN_WIDTH,
            row_height: sheetframe_core::DEFAULT_ROW_HEIGHT,
            stripe_fill: rgb_to_hex(0xD9, 0xD9, 0xD9),
        }
    }

    pub fn with_date_format<S: Into<String>>(mut self, format: S) -> Self {
        self.date_format = format.into();
        self
    }

    pub fn with_datetime_format<S: Into<String>>(mut self, format: S) -> Self {
        self.datetime_format = format.into();
        self
    }

    pub fn with_timedelta_format<S: Into<String>>(mut self, format: S) -> Self {
        self.timedelta_format = format.into();
        self
    }

    pub fn with_font<S: Into<String>>(mut self, name: S, size: f64) -> Self {
        self.font_name = name.into();
        self.font_size = size;
        self
    }

    pub fn with_stripe_fill(mut self, color: HexColor) -> Self {
        self.stripe_fill = color;
        self
    }

    /// `Normal` renamed `Default`, in the configured font
    pub fn default_style(&self) -> Style {
        Style::new("Default").with_font(self.font_name.clone(), self.font_size)
    }
}

/// Construction options for a styled frame
///
/// Unset styles are derived from the base style when
/// `use_default_formats` is on, and fall back to the base style otherwise.
#[derive(Debug, Clone)]
pub struct FrameOptions {
    pub style: Option<StyleOperand>,
    pub header_style: Option<StyleOperand>,
    pub index_style: Option<StyleOperand>,
    pub number_style: Option<StyleOperand>,
    pub date_style: Option<StyleOperand>,
    pub datetime_style: Option<StyleOperand>,
    pub timedelta_style: Option<StyleOperand>,
    pub use_default_formats: bool,
    pub options: Options,
}

impl Default for FrameOptions {
    fn default() -> Self {
        Self {
            style: None,
            header_style: None,
            index_style: None,
            number_style: None,
            date_style: None,
            datetime_style: None,
            timedelta_style: None,
            use_default_formats: true,
            options: Options::default(),
        }
    }
}

impl FrameOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style<S: Into<StyleOperand>>(mut self, style: S) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn with_header_style<S: Into<StyleOperand>>(mut self, style: S) -> Self {
        self.header_style = Some(style.into());
        self
    }

    pub fn with_index_style<S: Into<StyleOperand>>(mut self, style: S) -> Self {
        self.index_style = Some(style.into());
        self
    }

    pub fn with_number_style<S: Into<StyleOperand>>(mut self, style: S) -> Self {
        self.number_style = Some(style.into());
        self
    }

    pub fn with_date_style<S: Into<StyleOperand>>(mut self, style: S) -> Self {
        self.date_style = Some(style.into());
        self
    }

    pub fn with_datetime_style<S: Into<StyleOperand>>(mut self, style: S) -> Self {
        self.datetime_style = Some(style.into());
        self
    }

    pub fn with_timedelta_style<S: Into<StyleOperand>>(mut self, style: S) -> Self {
        self.timedelta_style = Some(style.into());
        self
    }

    pub fn with_default_formats(mut self, enabled: bool) -> Self {
        self.use_default_formats = enabled;
        self
    }

    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }
}

/// Column width estimation parameters
#[derive(Debug, Clone, PartialEq)]
pub struct AutoFit {
    /// Columns to fit; `None` fits every column
    pub columns: Option<Vec<Label>>,
    /// Width per character
    pub scalar: f64,
    /// Added after scaling
    pub flat: f64,
    pub min_width: f64,
    pub max_width: f64,
    /// Fit the index column too
    pub index: bool,
    /// Let the header label widen a column
    pub include_header: bool,
}

impl Default for AutoFit {
    fn default() -> Self {
        Self::from_options(&Options::default())
    }
}

impl AutoFit {
    pub fn from_options(options: &Options) -> Self {
        Self {
            columns: None,
            scalar: options.autofit_scalar,
            flat: options.autofit_flat,
            min_width: options.autofit_min,
            max_width: options.autofit_max,
            index: true,
            include_header: true,
        }
    }

    pub fn with_columns<L: Into<Label>>(mut self, columns: impl IntoIterator<Item = L>) -> Self {
        self.columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_scalar(mut self, scalar: f64) -> Self {
        self.scalar = scalar;
        self
    }

    pub fn with_flat(mut self, flat: f64) -> Self {
        self.flat = flat;
        self
    }

    pub fn with_bounds(mut self, min_width: f64, max_width: f64) -> Self {
        self.min_width = min_width;
        self.max_width = max_width;
        self
    }

    pub fn with_index(mut self, index: bool) -> Self {
        self.index = index;
        self
    }

    pub fn with_header(mut self, include_header: bool) -> Self {
        self.include_header = include_header;
        self
    }
}

/// Table formatting directive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOptions {
    /// Builtin table style such as `TableStyleLight1`; `None` leaves the
    /// table unstyled
    pub style: Option<String>,
    /// Unique table name; `None` picks the next free `TableN`
    pub name: Option<String>,
    pub row_stripes: bool,
    pub col_stripes: bool,
    pub first_column: bool,
    pub last_column: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            style: None,
            name: None,
            row_stripes: true,
            col_stripes: false,
            first_column: false,
            last_column: false,
        }
    }
}

impl TableOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style<S: Into<String>>(mut self, style: S) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_row_stripes(mut self, stripes: bool) -> Self {
        self.row_stripes = stripes;
        self
    }

    pub fn with_col_stripes(mut self, stripes: bool) -> Self {
        self.col_stripes = stripes;
        self
    }

    pub fn with_first_column(mut self, emphasize: bool) -> Self {
        self.first_column = emphasize;
        self
    }

    pub fn with_last_column(mut self, emphasize: bool) -> Self {
        self.last_column = emphasize;
        self
    }
}

/// How the table data is laid out on the sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOptions {
    /// Write the index as the first column
    pub index: bool,
    /// Write the column labels as the first row
    pub header: bool,
    /// Export only these columns, in this order
    pub columns: Option<Vec<Label>>,
    /// 0-based row of the header (or first data row)
    pub start_row: u32,
    /// 0-based column of the index (or first data column)
    pub start_col: u16,
    /// Header text above the index; defaults to the index name
    pub index_label: Option<String>,
    /// Text written for missing values; empty leaves the cell blank
    pub na_rep: String,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            index: true,
            header: true,
            columns: None,
            start_row: 0,
            start_col: 0,
            index_label: None,
            na_rep: String::new(),
        }
    }
}

impl WriteOptions {
    pub fn with_index(mut self, index: bool) -> Self {
        self.index = index;
        self
    }

    pub fn with_header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }

    pub fn with_columns<L: Into<Label>>(mut self, columns: impl IntoIterator<Item = L>) -> Self {
        self.columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_start(mut self, row: u32, col: u16) -> Self {
        self.start_row = row;
        self.start_col = col;
        self
    }

    pub fn with_index_label<S: Into<String>>(mut self, label: S) -> Self {
        self.index_label = Some(label.into());
        self
    }

    pub fn with_na_rep<S: Into<String>>(mut self, na_rep: S) -> Self {
        self.na_rep = na_rep.into();
        self
    }
}

/// Sheet-level export settings
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    pub sheet_name: String,
    /// Protect the sheet, leaving filtering available
    pub protect_sheet: bool,
    pub right_to_left: bool,
    /// Frame columns to hide, by label or 0-based position
    pub columns_to_hide: Vec<ColumnKey>,
    /// Auto-filter on the header row; ignored when a table is written
    pub add_filters: bool,
    /// Delete an existing sheet of the same name first
    pub replace_sheet: bool,
    /// Fit column widths before writing
    pub auto_fit: Option<AutoFit>,
    /// Save the destination afterwards; defaults to whether the
    /// destination was given as a path
    pub save: Option<bool>,
    pub write: WriteOptions,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            sheet_name: "Sheet1".to_string(),
            protect_sheet: false,
            right_to_left: false,
            columns_to_hide: Vec::new(),
            add_filters: false,
            replace_sheet: false,
            auto_fit: None,
            save: None,
            write: WriteOptions::default(),
        }
    }
}

impl ExportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sheet_name<S: Into<String>>(mut self, name: S) -> Self {
        self.sheet_name = name.into();
        self
    }

    pub fn with_protect_sheet(mut self, protect: bool) -> Self {
        self.protect_sheet = protect;
        self
    }

    pub fn with_right_to_left(mut self, rtl: bool) -> Self {
        self.right_to_left = rtl;
        self
    }

    pub fn with_columns_to_hide<K: Into<ColumnKey>>(
        mut self,
        columns: impl IntoIterator<Item = K>,
    ) -> Self {
        self.columns_to_hide = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_filters(mut self, add_filters: bool) -> Self {
        self.add_filters = add_filters;
        self
    }

    pub fn with_replace_sheet(mut self, replace: bool) -> Self {
        self.replace_sheet = replace;
        self
    }

    pub fn with_auto_fit(mut self, fit: AutoFit) -> Self {
        self.auto_fit = Some(fit);
        self
    }

    pub fn with_save(mut self, save: bool) -> Self {
        self.save = Some(save);
        self
    }

    pub fn with_write_options(mut self, write: WriteOptions) -> Self {
        self.write = write;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::resolve_color;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_locale_formats() {
        let us = Options::default();
        assert_eq!(us.date_format, "MM/DD/YYYY");
        assert_eq!(us.datetime_format, "MM/DD/YYYY HH:MM:SS");

        let gb = Options::for_locale("en_GB");
        assert_eq!(gb.date_format, "DD/MM/YYYY");
        assert_eq!(gb.datetime_format, "DD/MM/YYYY HH:MM:SS");
    }

    #[test]
    fn test_option_defaults() {
        let options = Options::default();
        assert_eq!(options.column_width, 8.43);
        assert_eq!(options.row_height, 15.0);
        assert_eq!(options.stripe_fill.as_str(), "D9D9D9");

        let fit = AutoFit::default();
        assert_eq!(fit.scalar, 1.25);
        assert_eq!(fit.flat, 1.5);
        assert_eq!(fit.min_width, 6.86);
        assert_eq!(fit.max_width, 150.0);
    }

    #[test]
    fn test_style_edits() {
        let bad = StyleEdits::bad();
        let color = resolve_color(bad.font_color.as_ref().and_then(Option::as_ref)).unwrap();
        assert_eq!(color.map(|c| c.to_string()), Some("9C0006".to_string()));
        assert_eq!(bad.fill_pattern, Some(PatternType::Solid));

        let normal = StyleEdits::normal();
        assert_eq!(normal.font_color, Some(None));
        assert_eq!(normal.fill_color, Some(None));
    }

    #[test]
    fn test_export_builder() {
        let options = ExportOptions::new()
            .with_sheet_name("Data")
            .with_columns_to_hide(["b"])
            .with_save(false);
        assert_eq!(options.sheet_name, "Data");
        assert_eq!(options.columns_to_hide.len(), 1);
        assert_eq!(options.save, Some(false));
        assert!(options.write.index);
    }
}
