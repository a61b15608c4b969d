//! Style assignments
//!
//! The body of a frame is a [`StyleGrid`]; the header row and the index
//! column are [`StyleVector`]s. All three are [`Region`]s so the accessors
//! can address them the same way.

use crate::registry::StyleId;

/// A rectangle of style handles
pub trait Region {
    /// `(rows, columns)`
    fn shape(&self) -> (usize, usize);

    fn get(&self, row: usize, col: usize) -> StyleId;

    fn set(&mut self, row: usize, col: usize, id: StyleId);
}

/// Row-major matrix of style handles, one per body cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleGrid {
    rows: usize,
    cols: usize,
    cells: Vec<StyleId>,
}

impl StyleGrid {
    pub fn filled(rows: usize, cols: usize, id: StyleId) -> Self {
        Self {
            rows,
            cols,
            cells: vec![id; rows * cols],
        }
    }

    /// Handles of one column, top to bottom
    pub fn column(&self, col: usize) -> impl Iterator<Item = StyleId> + '_ {
        (0..self.rows).map(move |r| self.cells[r * self.cols + col])
    }

    /// Every handle in row-major order
    pub fn iter(&self) -> impl Iterator<Item = StyleId> + '_ {
        self.cells.iter().copied()
    }

    pub(crate) fn take(&self, rows: &[usize], cols: &[usize]) -> Self {
        let cells = rows
            .iter()
            .flat_map(|&r| cols.iter().map(move |&c| self.cells[r * self.cols + c]))
            .collect();
        Self {
            rows: rows.len(),
            cols: cols.len(),
            cells,
        }
    }
}

impl Region for StyleGrid {
    fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    fn get(&self, row: usize, col: usize) -> StyleId {
        self.cells[row * self.cols + col]
    }

    fn set(&mut self, row: usize, col: usize, id: StyleId) {
        self.cells[row * self.cols + col] = id;
    }
}

/// Which way a vector runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// One row (the header)
    Row,
    /// One column (the index)
    Column,
}

/// Style handles along the header row or the index column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleVector {
    ids: Vec<StyleId>,
    axis: Axis,
}

impl StyleVector {
    pub fn filled(len: usize, id: StyleId, axis: Axis) -> Self {
        Self {
            ids: vec![id; len],
            axis,
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[StyleId] {
        &self.ids
    }

    pub(crate) fn take(&self, positions: &[usize]) -> Self {
        Self {
            ids: positions.iter().map(|&i| self.ids[i]).collect(),
            axis: self.axis,
        }
    }

    fn position(&self, row: usize, col: usize) -> usize {
        match self.axis {
            Axis::Row => col,
            Axis::Column => row,
        }
    }
}

impl Region for StyleVector {
    fn shape(&self) -> (usize, usize) {
        match self.axis {
            Axis::Row => (1, self.ids.len()),
            Axis::Column => (self.ids.len(), 1),
        }
    }

    fn get(&self, row: usize, col: usize) -> StyleId {
        self.ids[self.position(row, col)]
    }

    fn set(&mut self, row: usize, col: usize, id: StyleId) {
        let pos = self.position(row, col);
        self.ids[pos] = id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::StyleRegistry;
    use pretty_assertions::assert_eq;

    fn ids() -> (StyleId, StyleId) {
        let registry = StyleRegistry::new();
        (
            registry.resolve_name("Normal").unwrap(),
            registry.resolve_name("Good").unwrap(),
        )
    }

    #[test]
    fn test_grid_set_get() {
        let (normal, good) = ids();
        let mut grid = StyleGrid::filled(3, 2, normal);
        grid.set(2, 1, good);
        assert_eq!(grid.shape(), (3, 2));
        assert_eq!(grid.get(2, 1), good);
        assert_eq!(grid.column(1).collect::<Vec<_>>(), vec![normal, normal, good]);

        let sub = grid.take(&[2, 0], &[1]);
        assert_eq!(sub.shape(), (2, 1));
        assert_eq!(sub.iter().collect::<Vec<_>>(), vec![good, normal]);
    }

    #[test]
    fn test_vector_orientation() {
        let (normal, good) = ids();
        let mut header = StyleVector::filled(4, normal, Axis::Row);
        assert_eq!(header.shape(), (1, 4));
        header.set(0, 2, good);
        assert_eq!(header.ids()[2], good);

        let mut index = StyleVector::filled(3, normal, Axis::Column);
        assert_eq!(index.shape(), (3, 1));
        index.set(1, 0, good);
        assert_eq!(index.get(1, 0), good);
        assert_eq!(index.take(&[1]).ids(), &[good]);
    }
}
