//! Cell value types

use std::fmt;

use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};

use crate::hyperlink::Hyperlink;

/// Represents the value stored in a cell
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellValue {
    /// Empty cell (no value)
    #[default]
    Empty,

    /// Boolean value (TRUE/FALSE)
    Boolean(bool),

    /// Numeric value (dates and durations are stored as serial numbers)
    Number(f64),

    /// String value
    String(String),
}

impl CellValue {
    /// Create a new string value
    pub fn string<S: Into<String>>(s: S) -> Self {
        CellValue::String(s.into())
    }

    /// Serial number for a date in the 1900 date system
    pub fn from_date(date: NaiveDate) -> Self {
        CellValue::Number(Self::serial_days(date) as f64)
    }

    /// Serial number for a date and time in the 1900 date system
    pub fn from_datetime(datetime: NaiveDateTime) -> Self {
        let days = Self::serial_days(datetime.date()) as f64;
        let time = datetime.time();
        let seconds = time.num_seconds_from_midnight() as f64 + time.nanosecond() as f64 / 1e9;
        CellValue::Number(days + seconds / 86_400.0)
    }

    /// A duration as fractional days
    pub fn from_duration(duration: Duration) -> Self {
        CellValue::Number(duration.num_milliseconds() as f64 / 86_400_000.0)
    }

    fn serial_days(date: NaiveDate) -> i64 {
        // 1899-12-30 absorbs the phantom 1900-02-29 for every date after February 1900.
        let epoch = NaiveDate::from_ymd_opt(1899, 12, 30).unwrap_or(NaiveDate::MIN);
        date.signed_duration_since(epoch).num_days()
    }

    /// Check if the cell is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Get as a number, if this is a numeric value
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as a string slice, if this is a string value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Boolean(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Boolean(b)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

/// Everything stored for one cell
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CellData {
    /// Cell value
    pub value: CellValue,
    /// Name of the workbook named style applied to the cell (None = "Normal")
    pub style: Option<String>,
    /// Hyperlink attached to the cell
    pub hyperlink: Option<Hyperlink>,
}

impl CellData {
    /// Cell holding only a value
    pub fn new(value: CellValue) -> Self {
        Self {
            value,
            ..Default::default()
        }
    }

    /// True when the cell carries nothing worth writing
    pub fn is_blank(&self) -> bool {
        self.value.is_empty() && self.style.is_none() && self.hyperlink.is_none()
    }
}
