//! Frame data
//!
//! A [`DataFrame`] wraps a polars frame with the row labels and column
//! labels polars does not keep. It carries no computation; it only holds
//! the values a styled frame writes. Cells are read back as [`Value`]s
//! through polars' `AnyValue`.

use std::fmt;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use polars::prelude::{self as pl, AnyValue, DataType, IdxCa, IdxSize, NamedFrom, Series, TimeUnit};
use sheetframe_core::{CellValue, Worksheet};

use crate::error::{FrameError, Result};
use crate::options::WriteOptions;
/// A single table entry
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Duration(Duration),
}

impl Value {
    /// Missing, including a NaN float
    pub fn is_null(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Float(f) => f.is_nan(),
            _ => false,
        }
    }

    /// Time of day for date-like values; plain dates are midnight
    pub fn time_of_day(&self) -> Option<NaiveTime> {
        match self {
            Value::Date(_) => NaiveTime::from_hms_opt(0, 0, 0),
            Value::DateTime(dt) => Some(dt.time()),
            _ => None,
        }
    }

    /// The cell value written for this entry
    ///
    /// Missing values become `na_rep`, or a blank cell when it is empty.
    pub fn to_cell_value(&self, na_rep: &str) -> CellValue {
        if self.is_null() {
            return if na_rep.is_empty() {
                CellValue::Empty
            } else {
                CellValue::string(na_rep)
            };
        }
        match self {
            Value::Null => CellValue::Empty,
            Value::Bool(b) => CellValue::Boolean(*b),
            Value::Int(i) => CellValue::Number(*i as f64),
            Value::Float(f) => CellValue::Number(*f),
            Value::Str(s) => CellValue::string(s.clone()),
            Value::Date(d) => CellValue::from_date(*d),
            Value::DateTime(dt) => CellValue::from_datetime(*dt),
            Value::Duration(d) => CellValue::from_duration(*d),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(true) => f.write_str("TRUE"),
            Value::Bool(false) => f.write_str("FALSE"),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(v) if v.is_nan() => f.write_str("nan"),
            Value::Float(v) => write!(f, "{:?}", v),
            Value::Str(s) => f.write_str(s),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Value::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            Value::Duration(d) => {
                let days = d.num_days();
                let rest = *d - Duration::days(days);
                let secs = rest.num_seconds();
                write!(
                    f,
                    "{} days {:02}:{:02}:{:02}",
                    days,
                    secs / 3600,
                    (secs % 3600) / 60,
                    secs % 60
                )
            }
        }
    }
}

macro_rules! value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(impl From<$ty> for Value {
            fn from(value: $ty) -> Self {
                Value::$variant(value.into())
            }
        })*
    };
}

value_from!(
    bool => Bool,
    i32 => Int,
    i64 => Int,
    f64 => Float,
    String => Str,
    NaiveDate => Date,
    NaiveDateTime => DateTime,
    Duration => Duration,
);

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

/// A row or column label
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Label {
    Int(i64),
    Str(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    /// One entry of a multi-level index
    Tuple(Vec<Label>),
}

impl Label {
    /// Number of index levels this label spans
    pub fn levels(&self) -> usize {
        match self {
            Label::Tuple(parts) => parts.len().max(1),
            _ => 1,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Label::Int(i) => Value::Int(*i),
            Label::Str(s) => Value::Str(s.clone()),
            Label::Date(d) => Value::Date(*d),
            Label::DateTime(dt) => Value::DateTime(*dt),
            Label::Tuple(_) => Value::Str(self.to_string()),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Int(i) => write!(f, "{}", i),
            Label::Str(s) => f.write_str(s),
            Label::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Label::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            Label::Tuple(parts) => {
                f.write_str("(")?;
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", part)?;
                }
                f.write_str(")")
            }
        }
    }
}

impl From<&str> for Label {
    fn from(value: &str) -> Self {
        Label::Str(value.to_string())
    }
}

impl From<String> for Label {
    fn from(value: String) -> Self {
        Label::Str(value)
    }
}

impl From<&String> for Label {
    fn from(value: &String) -> Self {
        Label::Str(value.clone())
    }
}

impl From<i64> for Label {
    fn from(value: i64) -> Self {
        Label::Int(value)
    }
}

impl From<i32> for Label {
    fn from(value: i32) -> Self {
        Label::Int(value as i64)
    }
}

impl From<NaiveDate> for Label {
    fn from(value: NaiveDate) -> Self {
        Label::Date(value)
    }
}

impl From<NaiveDateTime> for Label {
    fn from(value: NaiveDateTime) -> Self {
        Label::DateTime(value)
    }
}

/// A frame column addressed by label or by 0-based position
///
/// A label that is not in the frame but is a non-negative integer is read
/// as a position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnKey {
    Label(Label),
    Position(usize),
}

impl From<&str> for ColumnKey {
    fn from(value: &str) -> Self {
        ColumnKey::Label(value.into())
    }
}

impl From<String> for ColumnKey {
    fn from(value: String) -> Self {
        ColumnKey::Label(value.into())
    }
}

impl From<Label> for ColumnKey {
    fn from(value: Label) -> Self {
        ColumnKey::Label(value)
    }
}

impl From<usize> for ColumnKey {
    fn from(value: usize) -> Self {
        ColumnKey::Position(value)
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKey::Label(label) => write!(f, "{}", label),
            ColumnKey::Position(pos) => write!(f, "{}", pos),
        }
    }
}

/// Ordered labels along one axis, with an optional name
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Index {
    name: Option<String>,
    labels: Vec<Label>,
}

impl Index {
    pub fn new<L: Into<Label>>(labels: impl IntoIterator<Item = L>) -> Self {
        Self {
            name: None,
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    /// `0..len`
    pub fn range(len: usize) -> Self {
        Self::new((0..len).map(|i| Label::Int(i as i64)))
    }

    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Levels of the deepest label
    pub fn nlevels(&self) -> usize {
        self.labels.iter().map(Label::levels).max().unwrap_or(1)
    }

    /// Positions holding `label`
    pub fn positions(&self, label: &Label) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter(|(_, l)| *l == label)
            .map(|(i, _)| i)
            .collect()
    }

    /// First position holding `label`
    pub fn position(&self, label: &Label) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    pub(crate) fn take(&self, positions: &[usize]) -> Self {
        Self {
            name: self.name.clone(),
            labels: positions.iter().map(|&i| self.labels[i].clone()).collect(),
        }
    }

    /// Label values, for classification and width estimation
    pub fn values(&self) -> Vec<Value> {
        self.labels.iter().map(Label::to_value).collect()
    }

    /// Kind shared by every label, else `Object`
    pub fn kind(&self) -> ColumnKind {
        let mut kinds = self.labels.iter().map(|label| match label {
            Label::Int(_) => ColumnKind::Int,
            Label::Str(_) => ColumnKind::Str,
            Label::Date(_) | Label::DateTime(_) => ColumnKind::DateTime,
            Label::Tuple(_) => ColumnKind::Object,
        });
        match kinds.next() {
            Some(first) if kinds.all(|k| k == first) => first,
            _ => ColumnKind::Object,
        }
    }
}

/// Broad value type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    Int,
    Float,
    Bool,
    Str,
    DateTime,
    Duration,
    /// Nested, binary or all missing
    Object,
}

impl ColumnKind {
    /// Kind of a polars column type
    pub fn from_dtype(dtype: &DataType) -> Self {
        match dtype {
            DataType::Boolean => ColumnKind::Bool,
            DataType::String => ColumnKind::Str,
            DataType::Date | DataType::Datetime(..) => ColumnKind::DateTime,
            DataType::Duration(_) => ColumnKind::Duration,
            d if d.is_integer() => ColumnKind::Int,
            d if d.is_float() => ColumnKind::Float,
            _ => ColumnKind::Object,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnKind::Int | ColumnKind::Float)
    }
}

/// A polars frame with row and column labels
#[derive(Debug, Clone, PartialEq)]
pub struct DataFrame {
    index: Index,
    columns: Index,
    frame: pl::DataFrame,
}

impl DataFrame {
    /// Build from `(label, values)` pairs with a `0..n` index
    ///
    /// Every column must have the same length. A column mixing integers
    /// and floats is stored as floats; any other mix is stored as text.
    pub fn new<L, V>(columns: impl IntoIterator<Item = (L, Vec<V>)>) -> Result<Self>
    where
        L: Into<Label>,
        V: Into<Value>,
    {
        let mut labels = Vec::new();
        let mut data = Vec::new();
        for (label, values) in columns {
            labels.push(label.into());
            data.push(values.into_iter().map(Into::into).collect::<Vec<Value>>());
        }
        let rows = data.first().map(Vec::len).unwrap_or(0);
        if let Some((i, column)) = data.iter().enumerate().find(|(_, c)| c.len() != rows) {
            return Err(FrameError::invalid(format!(
                "column {} has {} values, expected {}",
                labels[i],
                column.len(),
                rows
            )));
        }

        let series = labels
            .iter()
            .zip(&data)
            .map(|(label, values)| to_series(&label.to_string(), values).map(pl::Column::from))
            .collect::<pl::PolarsResult<Vec<_>>>()?;
        Ok(Self {
            index: Index::range(rows),
            columns: Index {
                name: None,
                labels,
            },
            frame: pl::DataFrame::new(series)?,
        })
    }

    /// Wrap a polars frame; column names become labels, rows get `0..n`
    pub fn from_polars(frame: pl::DataFrame) -> Self {
        let labels = frame
            .get_column_names()
            .into_iter()
            .map(|name| Label::Str(name.to_string()))
            .collect();
        Self {
            index: Index::range(frame.height()),
            columns: Index { name: None, labels },
            frame,
        }
    }

    pub fn as_polars(&self) -> &pl::DataFrame {
        &self.frame
    }

    /// Replace the row index; its length must match the row count
    pub fn with_index(mut self, index: Index) -> Result<Self> {
        if index.len() != self.n_rows() {
            return Err(FrameError::invalid(format!(
                "index has {} labels, frame has {} rows",
                index.len(),
                self.n_rows()
            )));
        }
        self.index = index;
        Ok(self)
    }

    /// Replace the column labels; one per column
    pub fn with_columns(mut self, columns: Index) -> Result<Self> {
        if columns.len() != self.n_cols() {
            return Err(FrameError::invalid(format!(
                "{} column labels for {} columns",
                columns.len(),
                self.n_cols()
            )));
        }
        self.frame
            .set_column_names(columns.labels().iter().map(Label::to_string))?;
        self.columns = columns;
        Ok(self)
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn columns(&self) -> &Index {
        &self.columns
    }

    pub fn n_rows(&self) -> usize {
        self.index.len()
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// `(rows, columns)`
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows(), self.n_cols())
    }

    /// No rows or no columns
    pub fn is_empty(&self) -> bool {
        self.n_rows() == 0 || self.n_cols() == 0
    }

    fn polars_column(&self, col: usize) -> Result<&pl::Column> {
        self.frame
            .get_columns()
            .get(col)
            .ok_or_else(|| FrameError::OutOfRangeColumn(col.to_string()))
    }

    /// Values of the column at `col`
    pub fn column_values(&self, col: usize) -> Result<Vec<Value>> {
        let column = self.polars_column(col)?;
        (0..column.len())
            .map(|row| Ok(Value::from(column.get(row)?)))
            .collect()
    }

    /// Kind of the column at `col`, from its polars type
    pub fn column_kind(&self, col: usize) -> Option<ColumnKind> {
        self.frame
            .get_columns()
            .get(col)
            .map(|c| ColumnKind::from_dtype(c.dtype()))
    }

    pub fn index_kind(&self) -> ColumnKind {
        self.index.kind()
    }

    pub fn value(&self, row: usize, col: usize) -> Result<Value> {
        Ok(Value::from(self.polars_column(col)?.get(row)?))
    }

    /// Sub-table at the given positions
    ///
    /// Columns are picked by name, so a column can be selected once only.
    pub(crate) fn take(&self, rows: &[usize], cols: &[usize]) -> Result<Self> {
        if let Some((i, &c)) = cols.iter().enumerate().find(|(i, c)| cols[..*i].contains(c)) {
            return Err(FrameError::invalid(format!(
                "column {} selected twice (at {})",
                self.columns.labels().get(c).map(Label::to_string).unwrap_or_default(),
                i
            )));
        }
        let names: Vec<pl::PlSmallStr> = cols
            .iter()
            .map(|&c| self.polars_column(c).map(|column| column.name().clone()))
            .collect::<Result<_>>()?;
        let positions = IdxCa::from_vec(
            "".into(),
            rows.iter().map(|&r| r as IdxSize).collect(),
        );
        let frame = self.frame.select(names)?.take(&positions)?;
        Ok(Self {
            index: self.index.take(rows),
            columns: self.columns.take(cols),
            frame,
        })
    }

    /// Write labels and values onto `sheet`
    ///
    /// The header row (when enabled) holds `index_label` above the index
    /// column followed by the column labels.
    pub(crate) fn write_to(
        &self,
        sheet: &mut Worksheet,
        options: &WriteOptions,
        index_label: Option<&str>,
    ) -> Result<()> {
        let mut row = options.start_row;
        let index_col = options.start_col;
        let first_col = column_offset(index_col, usize::from(options.index))?;

        if options.header {
            if options.index {
                if let Some(label) = index_label {
                    sheet.set_cell_value_at(row, index_col, label)?;
                }
            }
            for (i, label) in self.columns.labels().iter().enumerate() {
                let col = column_offset(first_col, i)?;
                sheet.set_cell_value_at(row, col, label.to_string())?;
            }
            row += 1;
        }

        let columns = self.frame.get_columns();
        for r in 0..self.n_rows() {
            let sheet_row = row_offset(row, r)?;
            if options.index {
                let label = self.index.labels()[r].to_value();
                sheet.set_cell_value_at(sheet_row, index_col, label.to_cell_value(&options.na_rep))?;
            }
            for (c, column) in columns.iter().enumerate() {
                let value = Value::from(column.get(r)?).to_cell_value(&options.na_rep);
                if !value.is_empty() {
                    sheet.set_cell_value_at(sheet_row, column_offset(first_col, c)?, value)?;
                }
            }
        }
        Ok(())
    }
}

/// Shared type of the present values; `None` when every entry is `Null`
///
/// Integers mixed with floats widen to `Float`, dates mixed with
/// datetimes to `DateTime`, anything else mixed to `Object`.
fn common_kind(values: &[Value]) -> Option<ColumnKind> {
    let mut kind: Option<ColumnKind> = None;
    for value in values {
        let this = match value {
            Value::Null => continue,
            Value::Bool(_) => ColumnKind::Bool,
            Value::Int(_) => ColumnKind::Int,
            Value::Float(_) => ColumnKind::Float,
            Value::Str(_) => ColumnKind::Str,
            Value::Date(_) | Value::DateTime(_) => ColumnKind::DateTime,
            Value::Duration(_) => ColumnKind::Duration,
        };
        kind = Some(match (kind, this) {
            (None, k) => k,
            (Some(a), b) if a == b => a,
            (Some(ColumnKind::Int), ColumnKind::Float)
            | (Some(ColumnKind::Float), ColumnKind::Int) => ColumnKind::Float,
            _ => return Some(ColumnKind::Object),
        });
    }
    kind
}

/// 1970-01-01
fn epoch() -> NaiveDateTime {
    NaiveDate::default().and_time(NaiveTime::MIN)
}

fn to_series(name: &str, values: &[Value]) -> pl::PolarsResult<Series> {
    let name: pl::PlSmallStr = name.into();
    let series = match common_kind(values) {
        None => Series::full_null(name, values.len(), &DataType::Null),
        Some(ColumnKind::Bool) => Series::new(
            name,
            values
                .iter()
                .map(|v| match v {
                    Value::Bool(b) => Some(*b),
                    _ => None,
                })
                .collect::<Vec<_>>(),
        ),
        Some(ColumnKind::Int) => Series::new(
            name,
            values
                .iter()
                .map(|v| match v {
                    Value::Int(i) => Some(*i),
                    _ => None,
                })
                .collect::<Vec<_>>(),
        ),
        Some(ColumnKind::Float) => Series::new(
            name,
            values
                .iter()
                .map(|v| match v {
                    Value::Int(i) => Some(*i as f64),
                    Value::Float(f) => Some(*f),
                    _ => None,
                })
                .collect::<Vec<_>>(),
        ),
        Some(ColumnKind::DateTime) if values.iter().all(|v| !matches!(v, Value::DateTime(_))) => {
            Series::new(
                name,
                values
                    .iter()
                    .map(|v| match v {
                        Value::Date(d) => i32::try_from((*d - NaiveDate::default()).num_days()).ok(),
                        _ => None,
                    })
                    .collect::<Vec<_>>(),
            )
            .cast(&DataType::Date)?
        }
        Some(ColumnKind::DateTime) => Series::new(
            name,
            values
                .iter()
                .map(|v| match v {
                    Value::Date(d) => (d.and_time(NaiveTime::MIN) - epoch()).num_microseconds(),
                    Value::DateTime(dt) => (*dt - epoch()).num_microseconds(),
                    _ => None,
                })
                .collect::<Vec<_>>(),
        )
        .cast(&DataType::Datetime(TimeUnit::Microseconds, None))?,
        Some(ColumnKind::Duration) => Series::new(
            name,
            values
                .iter()
                .map(|v| match v {
                    Value::Duration(d) => d.num_microseconds(),
                    _ => None,
                })
                .collect::<Vec<_>>(),
        )
        .cast(&DataType::Duration(TimeUnit::Microseconds))?,
        Some(ColumnKind::Str) | Some(ColumnKind::Object) => Series::new(
            name,
            values
                .iter()
                .map(|v| (!matches!(v, Value::Null)).then(|| v.to_string()))
                .collect::<Vec<Option<String>>>(),
        ),
    };
    Ok(series)
}

fn since_epoch(value: i64, unit: TimeUnit) -> Duration {
    match unit {
        TimeUnit::Nanoseconds => Duration::nanoseconds(value),
        TimeUnit::Microseconds => Duration::microseconds(value),
        TimeUnit::Milliseconds => Duration::milliseconds(value),
    }
}

impl From<AnyValue<'_>> for Value {
    fn from(value: AnyValue<'_>) -> Self {
        match value {
            AnyValue::Null => Value::Null,
            AnyValue::Boolean(b) => Value::Bool(b),
            AnyValue::Int8(v) => Value::Int(v.into()),
            AnyValue::Int16(v) => Value::Int(v.into()),
            AnyValue::Int32(v) => Value::Int(v.into()),
            AnyValue::Int64(v) => Value::Int(v),
            AnyValue::UInt8(v) => Value::Int(v.into()),
            AnyValue::UInt16(v) => Value::Int(v.into()),
            AnyValue::UInt32(v) => Value::Int(v.into()),
            AnyValue::UInt64(v) => i64::try_from(v).map_or(Value::Float(v as f64), Value::Int),
            AnyValue::Float32(v) => Value::Float(v.into()),
            AnyValue::Float64(v) => Value::Float(v),
            AnyValue::String(s) => Value::Str(s.to_string()),
            AnyValue::StringOwned(s) => Value::Str(s.to_string()),
            AnyValue::Date(days) => NaiveDate::default()
                .checked_add_signed(Duration::days(days.into()))
                .map_or(Value::Null, Value::Date),
            AnyValue::Datetime(v, unit, ..) => epoch()
                .checked_add_signed(since_epoch(v, unit))
                .map_or(Value::Null, Value::DateTime),
            AnyValue::Duration(v, unit) => Value::Duration(since_epoch(v, unit)),
            other => Value::Str(other.to_string()),
        }
    }
}

pub(crate) fn column_offset(start: u16, offset: usize) -> Result<u16> {
    usize::from(start)
        .checked_add(offset)
        .and_then(|c| u16::try_from(c).ok())
        .filter(|c| *c < sheetframe_core::MAX_COLS)
        .ok_or_else(|| FrameError::OutOfRangeColumn(format!("{}", usize::from(start) + offset)))
}

pub(crate) fn row_offset(start: u32, offset: usize) -> Result<u32> {
    u32::try_from(offset)
        .ok()
        .and_then(|o| start.checked_add(o))
        .filter(|r| *r < sheetframe_core::MAX_ROWS)
        .ok_or_else(|| FrameError::invalid(format!("row {} past the sheet end", offset)))
}
