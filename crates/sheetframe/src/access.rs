//! Label and position based access to cell styles
//!
//! Selections resolve to row and column positions up front; a
//! [`FrameRegion`] then reads or assigns styles over the body grid, the
//! header row or the index column through the [`Region`] trait.

use std::fmt;
use std::ops::{Range, RangeFrom, RangeFull, RangeInclusive};

use crate::data::{Index, Label};
use crate::error::{FrameError, Result};
use crate::frame::{Hyperlinks, LinkColumn, StyledFrame};
use crate::grid::Region;
use crate::registry::{EditCache, StyleId};
use crate::style::{Style, StyleChanges};

/// Selection by label
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelSel {
    All,
    /// Every position holding the label
    One(Label),
    Many(Vec<Label>),
    /// From the first `start` through the last `stop`, both included
    Range { start: Label, stop: Label },
}

impl LabelSel {
    pub fn range<A: Into<Label>, B: Into<Label>>(start: A, stop: B) -> Self {
        LabelSel::Range {
            start: start.into(),
            stop: stop.into(),
        }
    }

    pub fn many<L: Into<Label>>(labels: impl IntoIterator<Item = L>) -> Self {
        LabelSel::Many(labels.into_iter().map(Into::into).collect())
    }

    pub(crate) fn resolve(&self, index: &Index, dim: Dim) -> Result<Vec<usize>> {
        let lookup = |label: &Label| {
            let found = index.positions(label);
            if found.is_empty() {
                Err(dim.missing(label))
            } else {
                Ok(found)
            }
        };
        match self {
            LabelSel::All => Ok((0..index.len()).collect()),
            LabelSel::One(label) => lookup(label),
            LabelSel::Many(labels) => {
                let mut positions = Vec::with_capacity(labels.len());
                for label in labels {
                    positions.extend(lookup(label)?);
                }
                Ok(positions)
            }
            LabelSel::Range { start, stop } => {
                let first = index.position(start).ok_or_else(|| dim.missing(start))?;
                let last = index
                    .positions(stop)
                    .last()
                    .copied()
                    .ok_or_else(|| dim.missing(stop))?;
                Ok((first..=last).collect())
            }
        }
    }
}

impl From<RangeFull> for LabelSel {
    fn from(_: RangeFull) -> Self {
        LabelSel::All
    }
}

impl From<Label> for LabelSel {
    fn from(value: Label) -> Self {
        LabelSel::One(value)
    }
}

impl From<&str> for LabelSel {
    fn from(value: &str) -> Self {
        LabelSel::One(value.into())
    }
}

impl From<String> for LabelSel {
    fn from(value: String) -> Self {
        LabelSel::One(value.into())
    }
}

impl From<i64> for LabelSel {
    fn from(value: i64) -> Self {
        LabelSel::One(value.into())
    }
}

impl From<Vec<Label>> for LabelSel {
    fn from(value: Vec<Label>) -> Self {
        LabelSel::Many(value)
    }
}

impl From<Vec<&str>> for LabelSel {
    fn from(value: Vec<&str>) -> Self {
        LabelSel::many(value)
    }
}

/// Selection by 0-based position
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PosSel {
    All,
    One(usize),
    Many(Vec<usize>),
    /// `start..stop` stepping by `step`; `stop` is clamped to the length
    Range { start: usize, stop: usize, step: usize },
}

impl PosSel {
    /// Positions 0, `step`, 2 × `step`, ...
    pub fn every(step: usize) -> Self {
        PosSel::Range {
            start: 0,
            stop: usize::MAX,
            step,
        }
    }

    pub(crate) fn resolve(&self, len: usize, dim: Dim) -> Result<Vec<usize>> {
        let check = |p: usize| if p < len { Ok(p) } else { Err(dim.missing(p)) };
        match self {
            PosSel::All => Ok((0..len).collect()),
            PosSel::One(p) => Ok(vec![check(*p)?]),
            PosSel::Many(ps) => ps.iter().map(|p| check(*p)).collect(),
            PosSel::Range { step: 0, .. } => Err(FrameError::invalid("slice step cannot be zero")),
            PosSel::Range { start, stop, step } => {
                Ok((*start..(*stop).min(len)).step_by(*step).collect())
            }
        }
    }
}

impl From<RangeFull> for PosSel {
    fn from(_: RangeFull) -> Self {
        PosSel::All
    }
}

impl From<usize> for PosSel {
    fn from(value: usize) -> Self {
        PosSel::One(value)
    }
}

impl From<Vec<usize>> for PosSel {
    fn from(value: Vec<usize>) -> Self {
        PosSel::Many(value)
    }
}

impl From<&[usize]> for PosSel {
    fn from(value: &[usize]) -> Self {
        PosSel::Many(value.to_vec())
    }
}

impl From<Range<usize>> for PosSel {
    fn from(value: Range<usize>) -> Self {
        PosSel::Range {
            start: value.start,
            stop: value.end,
            step: 1,
        }
    }
}

impl From<RangeInclusive<usize>> for PosSel {
    fn from(value: RangeInclusive<usize>) -> Self {
        PosSel::Range {
            start: *value.start(),
            stop: value.end().saturating_add(1),
            step: 1,
        }
    }
}

impl From<RangeFrom<usize>> for PosSel {
    fn from(value: RangeFrom<usize>) -> Self {
        PosSel::Range {
            start: value.start,
            stop: usize::MAX,
            step: 1,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum Dim {
    Row,
    Column,
}

impl Dim {
    fn missing(self, what: impl fmt::Display) -> FrameError {
        match self {
            Dim::Row => FrameError::invalid(format!("row {} is not in the frame", what)),
            Dim::Column => FrameError::OutOfRangeColumn(what.to_string()),
        }
    }
}

/// What gets assigned to a selection
#[derive(Debug, Clone)]
pub enum StyleOperand {
    /// A registered style
    Name(String),
    /// A style definition, registered before use
    Style(Style),
    /// Edits applied to each cell's current style
    Changes(StyleChanges),
}

impl From<&str> for StyleOperand {
    fn from(value: &str) -> Self {
        StyleOperand::Name(value.to_string())
    }
}

impl From<String> for StyleOperand {
    fn from(value: String) -> Self {
        StyleOperand::Name(value)
    }
}

impl From<&String> for StyleOperand {
    fn from(value: &String) -> Self {
        StyleOperand::Name(value.clone())
    }
}

impl From<Style> for StyleOperand {
    fn from(value: Style) -> Self {
        StyleOperand::Style(value)
    }
}

impl From<StyleChanges> for StyleOperand {
    fn from(value: StyleChanges) -> Self {
        StyleOperand::Changes(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Target {
    Body,
    Header,
    Index,
}

/// A rectangular selection of cells on one styled frame
#[derive(Debug)]
pub struct FrameRegion<'a> {
    frame: &'a mut StyledFrame,
    target: Target,
    rows: Vec<usize>,
    cols: Vec<usize>,
}

impl FrameRegion<'_> {
    /// `(rows, columns)` selected
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.cols.len())
    }

    /// Style names, row by row
    pub fn get(&self) -> Vec<Vec<String>> {
        let region = self.frame.region(self.target);
        let registry = &self.frame.registry;
        self.rows
            .iter()
            .map(|&r| {
                self.cols
                    .iter()
                    .map(|&c| registry.name(region.get(r, c)).to_string())
                    .collect()
            })
            .collect()
    }

    /// Assign a style to every selected cell
    pub fn set<S: Into<StyleOperand>>(&mut self, operand: S) -> Result<()> {
        match operand.into() {
            StyleOperand::Name(name) => {
                let id = self.frame.registry.resolve_name(&name)?;
                self.fill(id);
            }
            StyleOperand::Style(style) => {
                let id = self.frame.registry.add(style)?;
                self.fill(id);
            }
            StyleOperand::Changes(changes) => {
                self.edit(changes)?;
            }
        }
        Ok(())
    }

    /// Apply `changes` to each selected cell's style
    ///
    /// Cells sharing a style end up sharing the edited style. Returns the
    /// resulting style names in first-seen order.
    pub fn edit(&mut self, changes: StyleChanges) -> Result<Vec<String>> {
        let StyledFrame {
            registry,
            grid,
            header,
            index,
            ..
        } = &mut *self.frame;
        let region: &mut dyn Region = match self.target {
            Target::Body => grid,
            Target::Header => header,
            Target::Index => index,
        };

        // nothing is written back until every cell has been edited
        let snapshot = registry.clone();
        let mut cache = EditCache::default();
        let mut edits = Vec::with_capacity(self.rows.len() * self.cols.len());
        for &r in &self.rows {
            for &c in &self.cols {
                match registry.edit(region.get(r, c), &changes, &mut cache) {
                    Ok(edited) => edits.push((r, c, edited)),
                    Err(err) => {
                        *registry = snapshot;
                        return Err(err);
                    }
                }
            }
        }

        let mut names: Vec<String> = Vec::new();
        for (r, c, edited) in edits {
            region.set(r, c, edited);
            let name = registry.name(edited);
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
        log::debug!(
            "edited {}x{} cells into {} style(s)",
            self.rows.len(),
            self.cols.len(),
            names.len()
        );
        Ok(names)
    }

    fn fill(&mut self, id: StyleId) {
        let region = self.frame.region_mut(self.target);
        for &r in &self.rows {
            for &c in &self.cols {
                region.set(r, c, id);
            }
        }
    }
}

impl StyledFrame {
    pub(crate) fn region(&self, target: Target) -> &dyn Region {
        match target {
            Target::Body => &self.grid,
            Target::Header => &self.header,
            Target::Index => &self.index,
        }
    }

    pub(crate) fn region_mut(&mut self, target: Target) -> &mut dyn Region {
        match target {
            Target::Body => &mut self.grid,
            Target::Header => &mut self.header,
            Target::Index => &mut self.index,
        }
    }

    fn select(&mut self, target: Target, rows: Vec<usize>, cols: Vec<usize>) -> FrameRegion<'_> {
        FrameRegion {
            frame: self,
            target,
            rows,
            cols,
        }
    }

    /// Body cells by row and column label
    pub fn by_label<R, C>(&mut self, rows: R, cols: C) -> Result<FrameRegion<'_>>
    where
        R: Into<LabelSel>,
        C: Into<LabelSel>,
    {
        let rows = rows.into().resolve(self.data.index(), Dim::Row)?;
        let cols = cols.into().resolve(self.data.columns(), Dim::Column)?;
        Ok(self.select(Target::Body, rows, cols))
    }

    /// Body cells by row and column position
    pub fn by_position<R, C>(&mut self, rows: R, cols: C) -> Result<FrameRegion<'_>>
    where
        R: Into<PosSel>,
        C: Into<PosSel>,
    {
        let (n_rows, n_cols) = self.data.shape();
        let rows = rows.into().resolve(n_rows, Dim::Row)?;
        let cols = cols.into().resolve(n_cols, Dim::Column)?;
        Ok(self.select(Target::Body, rows, cols))
    }

    /// Header cells by column label
    pub fn header_by_label<C: Into<LabelSel>>(&mut self, cols: C) -> Result<FrameRegion<'_>> {
        let cols = cols.into().resolve(self.data.columns(), Dim::Column)?;
        Ok(self.select(Target::Header, vec![0], cols))
    }

    pub fn header_by_position<C: Into<PosSel>>(&mut self, cols: C) -> Result<FrameRegion<'_>> {
        let cols = cols.into().resolve(self.data.n_cols(), Dim::Column)?;
        Ok(self.select(Target::Header, vec![0], cols))
    }

    /// Index cells by row label
    pub fn index_by_label<R: Into<LabelSel>>(&mut self, rows: R) -> Result<FrameRegion<'_>> {
        let rows = rows.into().resolve(self.data.index(), Dim::Row)?;
        Ok(self.select(Target::Index, rows, vec![0]))
    }

    pub fn index_by_position<R: Into<PosSel>>(&mut self, rows: R) -> Result<FrameRegion<'_>> {
        let rows = rows.into().resolve(self.data.n_rows(), Dim::Row)?;
        Ok(self.select(Target::Index, rows, vec![0]))
    }

    /// Style every body cell of one column
    pub fn set_column<C, S>(&mut self, column: C, style: S) -> Result<()>
    where
        C: Into<Label>,
        S: Into<StyleOperand>,
    {
        self.by_label(LabelSel::All, LabelSel::One(column.into()))?
            .set(style)
    }

    /// Sub-frame by row and column label
    pub fn loc<R, C>(&self, rows: R, cols: C) -> Result<StyledFrame>
    where
        R: Into<LabelSel>,
        C: Into<LabelSel>,
    {
        let rows = rows.into().resolve(self.data.index(), Dim::Row)?;
        let cols = cols.into().resolve(self.data.columns(), Dim::Column)?;
        self.take(&rows, &cols)
    }

    /// Sub-frame by row and column position
    pub fn iloc<R, C>(&self, rows: R, cols: C) -> Result<StyledFrame>
    where
        R: Into<PosSel>,
        C: Into<PosSel>,
    {
        let (n_rows, n_cols) = self.data.shape();
        let rows = rows.into().resolve(n_rows, Dim::Row)?;
        let cols = cols.into().resolve(n_cols, Dim::Column)?;
        self.take(&rows, &cols)
    }

    /// Slice everything positional; the registry is shared whole
    pub(crate) fn take(&self, rows: &[usize], cols: &[usize]) -> Result<StyledFrame> {
        let labels = self.data.columns().labels();
        let kept: Vec<&Label> = cols.iter().map(|&c| &labels[c]).collect();

        let mut hyperlinks = Hyperlinks::default();
        for (column, row, link) in self.hyperlinks.iter() {
            if let LinkColumn::Label(label) = column {
                if !kept.contains(&label) {
                    continue;
                }
            }
            for (i, _) in rows.iter().enumerate().filter(|(_, r)| **r == row) {
                hyperlinks.insert(column.clone(), i, link.clone());
            }
        }

        Ok(StyledFrame {
            data: self.data.take(rows, cols)?,
            registry: self.registry.clone(),
            grid: self.grid.take(rows, cols),
            header: self.header.take(cols),
            index: self.index.take(rows),
            row_heights: rows.iter().map(|&r| self.row_heights[r]).collect(),
            column_widths: cols.iter().map(|&c| self.column_widths[c]).collect(),
            index_width: self.index_width,
            header_height: self.header_height,
            table: self.table.clone(),
            hyperlinks,
            defaults_used: self.defaults_used,
            options: self.options.clone(),
        })
    }
}
