//! Styles chosen by column type

use chrono::NaiveTime;

use crate::access::{Dim, PosSel};
use crate::data::{ColumnKind, Value};
use crate::error::Result;
use crate::frame::StyledFrame;
use crate::grid::Region;
use crate::registry::StyleId;
use crate::style::default_index_style;

/// One registered style per column kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeStyles {
    /// Text, booleans and mixed columns
    pub default: StyleId,
    pub number: StyleId,
    /// Date-like columns without a time of day
    pub date: StyleId,
    pub datetime: StyleId,
    pub duration: StyleId,
}

impl TypeStyles {
    /// Style for a column of `kind` holding `values`
    pub fn pick<'v>(&self, kind: ColumnKind, values: impl IntoIterator<Item = &'v Value>) -> StyleId {
        match kind {
            ColumnKind::Int | ColumnKind::Float => self.number,
            ColumnKind::DateTime if dates_only(values) => self.date,
            ColumnKind::DateTime => self.datetime,
            ColumnKind::Duration => self.duration,
            ColumnKind::Bool | ColumnKind::Str | ColumnKind::Object => self.default,
        }
    }
}

/// Every present value falls on midnight
fn dates_only<'v>(values: impl IntoIterator<Item = &'v Value>) -> bool {
    values
        .into_iter()
        .filter(|v| !v.is_null())
        .filter_map(Value::time_of_day)
        .all(|t| t == NaiveTime::MIN)
}

impl StyledFrame {
    /// Style the selected body cells by the type of their column
    ///
    /// With `style_index`, the index column is classified the same way and
    /// its cells get the index variant of the chosen style.
    pub fn style_by_type<R, C>(
        &mut self,
        rows: R,
        cols: C,
        styles: &TypeStyles,
        style_index: bool,
    ) -> Result<()>
    where
        R: Into<PosSel>,
        C: Into<PosSel>,
    {
        let rows = rows.into().resolve(self.data.n_rows(), Dim::Row)?;
        let cols = cols.into().resolve(self.data.n_cols(), Dim::Column)?;
        if rows.is_empty() || cols.is_empty() {
            return Ok(());
        }

        for &c in &cols {
            let kind = self.data.column_kind(c).unwrap_or(ColumnKind::Object);
            let values = self.data.column_values(c)?;
            let id = styles.pick(kind, rows.iter().filter_map(|&r| values.get(r)));
            for &r in &rows {
                self.grid.set(r, c, id);
            }
        }

        if style_index {
            let labels = self.data.index().values();
            let kind = self.data.index_kind();
            let picked = styles.pick(kind, rows.iter().map(|&r| &labels[r]));
            let id = self
                .registry
                .add(default_index_style(self.registry.get(picked)))?;
            for &r in &rows {
                self.index.set(r, 0, id);
            }
        }

        log::trace!(
            "styled {} column(s) by type, index: {}",
            cols.len(),
            style_index
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DataFrame, Index, Label};
    use crate::options::{FrameOptions, Options};
    use chrono::{Duration, NaiveDate};
    use pretty_assertions::assert_eq;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn mixed() -> DataFrame {
        DataFrame::new(vec![
            ("int", vec![Value::Int(1), Value::Int(2)]),
            ("float", vec![Value::Float(0.5), Value::Float(f64::NAN)]),
            ("text", vec![Value::from("a"), Value::from("b")]),
            ("flag", vec![Value::Bool(true), Value::Bool(false)]),
            (
                "date",
                vec![
                    Value::DateTime(day(1).and_hms_opt(0, 0, 0).unwrap()),
                    Value::Null,
                ],
            ),
            (
                "stamp",
                vec![
                    Value::DateTime(day(1).and_hms_opt(9, 30, 0).unwrap()),
                    Value::Date(day(2)),
                ],
            ),
            (
                "span",
                vec![Value::Duration(Duration::hours(3)), Value::Null],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_defaults_by_kind() {
        let frame = StyledFrame::new(mixed(), FrameOptions::default()).unwrap();
        let names: Vec<&str> = (0..7).map(|c| frame.style_names_at(0, c).unwrap()).collect();
        assert_eq!(
            names,
            vec![
                "Default Number",
                "Default Number",
                "Default",
                "Default",
                "Default Date",
                "Default Datetime",
                "Default Timedelta",
            ]
        );
    }

    #[test]
    fn test_date_index() {
        let df = DataFrame::new(vec![("v", vec![1i64, 2])])
            .unwrap()
            .with_index(Index::new([Label::Date(day(1)), Label::Date(day(2))]))
            .unwrap();
        let frame = StyledFrame::new(df, FrameOptions::default()).unwrap();
        assert_eq!(frame.index_style_name(0).unwrap(), "Default Date Index");
        let style = frame.registry().style("Default Date Index").unwrap();
        assert!(style.bold);
        assert_eq!(style.number_format, Options::default().date_format);
    }

    #[test]
    fn test_type_overrides_without_defaults() {
        let options = FrameOptions::default()
            .with_default_formats(false)
            .with_number_style("Good");
        let frame = StyledFrame::new(mixed(), options).unwrap();
        assert_eq!(frame.style_names_at(1, 0).unwrap(), "Good");
        assert_eq!(frame.style_names_at(0, 4).unwrap(), "Default");
        assert_eq!(frame.index_style_name(0).unwrap(), "Default");
    }

    #[test]
    fn test_partial_selection() {
        let mut frame = StyledFrame::new(mixed(), FrameOptions::default()).unwrap();
        frame.set_column("int", "Bad").unwrap();
        let styles = TypeStyles {
            default: frame.registry().resolve_name("Default").unwrap(),
            number: frame.registry().resolve_name("Neutral").unwrap(),
            date: frame.registry().resolve_name("Default").unwrap(),
            datetime: frame.registry().resolve_name("Default").unwrap(),
            duration: frame.registry().resolve_name("Default").unwrap(),
        };
        frame.style_by_type(1usize, 0usize, &styles, false).unwrap();
        assert_eq!(frame.style_names_at(0, 0).unwrap(), "Bad");
        assert_eq!(frame.style_names_at(1, 0).unwrap(), "Neutral");
    }
}
