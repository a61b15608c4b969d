//! Column width estimation
//!
//! Widths are character counts of the widest rendering of a column,
//! scaled and padded, then clamped. Formats that fix the rendered width
//! (dates, durations, fixed decimals) are measured from the format itself.

use crate::data::{ColumnKind, Label, Value};
use crate::error::{FrameError, Result};
use crate::frame::StyledFrame;
use crate::options::{AutoFit, NumberFormats};

/// Estimated width of one column, clamped to the fit bounds
///
/// `formats` are the number formats of the column's cells; `header` is the
/// label that may widen the column.
pub fn estimate_width(
    values: &[Value],
    kind: ColumnKind,
    formats: &[&str],
    header: Option<&str>,
    fit: &AutoFit,
) -> f64 {
    let mut width = raw_width(values, kind, formats);
    if fit.include_header {
        if let Some(header) = header.filter(|h| !h.is_empty()) {
            width = width.max(header.chars().count() as f64 + 2.0);
        }
    }
    (width * fit.scalar + fit.flat)
        .min(fit.max_width)
        .max(fit.min_width)
}

fn raw_width(values: &[Value], kind: ColumnKind, formats: &[&str]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let mut unique: Vec<&str> = Vec::new();
    for &format in formats {
        if !unique.contains(&format) {
            unique.push(format);
        }
    }
    let format_len = unique
        .iter()
        .map(|f| f.chars().count())
        .max()
        .unwrap_or(0) as f64;
    let general = unique.contains(&NumberFormats::GENERAL);

    match kind {
        ColumnKind::DateTime if !general => format_len,
        ColumnKind::Duration if !general => {
            let days = values
                .iter()
                .filter_map(|v| match v {
                    Value::Duration(d) => Some(d.num_days()),
                    _ => None,
                })
                .max()
                .unwrap_or(0);
            format_len + days.to_string().len() as f64
        }
        ColumnKind::Float => {
            let fixed = unique.iter().all(|f| f.contains("0.0") || *f == "0");
            if fixed {
                let longest = longest(values.iter().map(|v| match v {
                    Value::Float(f) => format!("{:?}", f.round()),
                    other => other.to_string(),
                }));
                format_len + longest - 2.0
            } else {
                longest(values.iter().map(|v| match v {
                    Value::Float(f) => grouped(*f),
                    other => other.to_string(),
                }))
            }
        }
        _ => longest(values.iter().map(Value::to_string)),
    }
}

fn longest(rendered: impl Iterator<Item = String>) -> f64 {
    rendered.map(|s| s.chars().count()).max().unwrap_or(0) as f64
}

/// Thousands-grouped, ten decimals, trailing zeros stripped
fn grouped(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let fixed = format!("{:.10}", value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let mut out = String::with_capacity(fixed.len() + whole.len() / 3 + 1);
    if value.is_sign_negative() {
        out.push('-');
    }
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    out.push('.');
    out.push_str(fraction);
    out.trim_end_matches('0').to_string()
}

/// Widths computed for a frame without applying them
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FittedWidths {
    pub columns: Vec<(usize, f64)>,
    pub index: Option<f64>,
}

impl StyledFrame {
    /// Fit column widths (and the index width when asked) to the content
    pub fn auto_fit(&mut self, fit: &AutoFit) -> Result<&mut Self> {
        let fitted = self.fit_widths(fit)?;
        for (col, width) in fitted.columns {
            self.column_widths[col] = width;
        }
        if let Some(width) = fitted.index {
            self.index_width = width;
        }
        Ok(self)
    }

    pub(crate) fn fit_widths(&self, fit: &AutoFit) -> Result<FittedWidths> {
        let positions: Vec<usize> = match &fit.columns {
            None => (0..self.data.n_cols()).collect(),
            Some(labels) => labels
                .iter()
                .map(|label| {
                    self.data
                        .columns()
                        .position(label)
                        .ok_or_else(|| FrameError::OutOfRangeColumn(label.to_string()))
                })
                .collect::<Result<_>>()?,
        };

        let empty = self.data.is_empty();
        let labels = self.data.columns().labels();
        let mut columns = Vec::with_capacity(positions.len());
        for col in positions {
            let formats: Vec<&str> = self
                .grid
                .column(col)
                .map(|id| self.registry.get(id).number_format.as_str())
                .collect();
            let values = if empty {
                Vec::new()
            } else {
                self.data.column_values(col)?
            };
            let kind = self.data.column_kind(col).unwrap_or(ColumnKind::Object);
            let header = labels.get(col).map(Label::to_string);
            let width = estimate_width(&values, kind, &formats, header.as_deref(), fit);
            columns.push((col, width));
        }

        let index = if fit.index {
            let formats: Vec<&str> = self
                .index
                .ids()
                .iter()
                .map(|id| self.registry.get(*id).number_format.as_str())
                .collect();
            let values = if empty { Vec::new() } else { self.data.index().values() };
            let kind = self.data.index_kind();
            Some(estimate_width(
                &values,
                kind,
                &formats,
                self.data.index().name(),
                fit,
            ))
        } else {
            None
        };

        Ok(FittedWidths { columns, index })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataFrame;
    use crate::options::FrameOptions;
    use chrono::{Duration, NaiveDate};
    use pretty_assertions::assert_eq;

    fn unit() -> AutoFit {
        AutoFit::default()
            .with_scalar(1.0)
            .with_flat(0.0)
            .with_bounds(0.0, 1000.0)
    }

    #[test]
    fn test_grouped() {
        assert_eq!(grouped(1234567.5), "1,234,567.5");
        assert_eq!(grouped(3.0), "3.");
        assert_eq!(grouped(-0.25), "-0.25");
        assert_eq!(grouped(999.0), "999.");
        assert_eq!(grouped(f64::NAN), "nan");
    }

    #[test]
    fn test_text_width() {
        let values = [Value::from("abc"), Value::from("abcdef")];
        let width = estimate_width(&values, ColumnKind::Str, &["General"], None, &unit());
        assert_eq!(width, 6.0);
    }

    #[test]
    fn test_header_floor() {
        let values = [Value::Int(1)];
        let width = estimate_width(&values, ColumnKind::Int, &["General"], Some("long name"), &unit());
        assert_eq!(width, 11.0);
        let ignored = estimate_width(
            &values,
            ColumnKind::Int,
            &["General"],
            Some("long name"),
            &unit().with_header(false),
        );
        assert_eq!(ignored, 1.0);
    }

    #[test]
    fn test_date_width_from_format() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let values = [Value::Date(d)];
        let width = estimate_width(&values, ColumnKind::DateTime, &["MM/DD/YYYY"], None, &unit());
        assert_eq!(width, 10.0);

        let general = estimate_width(&values, ColumnKind::DateTime, &["General"], None, &unit());
        assert_eq!(general, "2024-01-02".len() as f64);
    }

    #[test]
    fn test_duration_width() {
        let values = [Value::Duration(Duration::days(120)), Value::Null];
        let width = estimate_width(&values, ColumnKind::Duration, &["0.00"], None, &unit());
        assert_eq!(width, 4.0 + 3.0);
    }

    #[test]
    fn test_float_widths() {
        let values = [Value::Float(12.345), Value::Float(1.5)];
        // "0.00" + "12.0" - 2
        let fixed = estimate_width(&values, ColumnKind::Float, &["0.00"], None, &unit());
        assert_eq!(fixed, 6.0);

        let free = estimate_width(&values, ColumnKind::Float, &["General"], None, &unit());
        assert_eq!(free, "12.345".len() as f64);
    }

    #[test]
    fn test_repeated_formats_measure_the_widest() {
        let values = [Value::Float(12.345), Value::Float(1.5)];
        let formats = ["0.00", "0.00", "0.000", "0.00"];
        let width = estimate_width(&values, ColumnKind::Float, &formats, None, &unit());
        assert_eq!(width, 7.0);
    }

    #[test]
    fn test_bounds_and_empty() {
        let fit = AutoFit::default();
        assert_eq!(
            estimate_width(&[], ColumnKind::Str, &[], None, &fit),
            fit.min_width
        );
        let long = [Value::from("x".repeat(500).as_str())];
        assert_eq!(
            estimate_width(&long, ColumnKind::Str, &["General"], None, &fit),
            fit.max_width
        );
    }

    #[test]
    fn test_frame_auto_fit() {
        let df = DataFrame::new(vec![
            ("name", vec![Value::from("a"), Value::from("abcdefghijkl")]),
            ("n", vec![Value::Int(1), Value::Int(22)]),
        ])
        .unwrap();
        let mut frame = StyledFrame::new(df, FrameOptions::default()).unwrap();
        frame.auto_fit(&AutoFit::default()).unwrap();

        assert_eq!(frame.column_widths()[0], 12.0 * 1.25 + 1.5);
        assert_eq!(frame.column_widths()[1], 6.86);
        assert_eq!(frame.index_width(), 6.86);

        frame.set_column_width("n", 40.0).unwrap();
        frame
            .auto_fit(&AutoFit::default().with_columns(["name"]).with_index(false))
            .unwrap();
        assert_eq!(frame.column_widths()[1], 40.0);

        assert!(matches!(
            frame.auto_fit(&AutoFit::default().with_columns(["missing"])),
            Err(FrameError::OutOfRangeColumn(_))
        ));
    }
}
