use std::fmt::Display;

use petgraph::graph::DefaultIx;

use crate::lattice::{CellRef, IndexType};

/// Renders one cell of a grid as text. Rows are rendered by concatenating the text of
/// each cell, so single glyph output keeps columns aligned.
pub trait GridDisplay<T, Ix: IndexType = DefaultIx> {
    fn render_cell(&self, cell: CellRef<T, Ix>) -> String;
}

/// The cell's value as displayed text. The default for rendering a grid.
#[derive(Debug, Copy, Clone, Default)]
pub struct ValueDisplay;

impl<T: Display, Ix: IndexType> GridDisplay<T, Ix> for ValueDisplay {
    fn render_cell(&self, cell: CellRef<T, Ix>) -> String {
        cell.value().to_string()
    }
}

/// Every cell shows how many neighbours it has, which picks out the edges and corners.
#[derive(Debug, Copy, Clone, Default)]
pub struct NeighbourCountDisplay;

impl<T, Ix: IndexType> GridDisplay<T, Ix> for NeighbourCountDisplay {
    fn render_cell(&self, cell: CellRef<T, Ix>) -> String {
        cell.neighbours().len().to_string()
    }
}
