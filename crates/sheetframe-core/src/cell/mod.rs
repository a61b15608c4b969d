//! Cell-related types and utilities
//!
//! - [`CellValue`] - The value stored in a cell
//! - [`CellAddress`] - A cell's location (e.g., "A1")
//! - [`CellRange`] - A rectangular block of cells (e.g., "A1:B10")
//! - [`CellData`] - Value plus named style and hyperlink

mod address;
mod value;

pub use address::{CellAddress, CellRange};
pub use value::{CellData, CellValue};
