//! Minesweeper hints: how many of a square's neighbours hold a mine.

use crate::compass::ALL;
use crate::grid::Grid;
use crate::grid_displays::GridDisplay;
use crate::lattice::{CellRef, IndexType};
use crate::squares::Square;

/// Cell values that may be a mine.
pub trait MineSquare {
    fn is_mine(&self) -> bool;
}

impl MineSquare for Square {
    #[inline]
    fn is_mine(&self) -> bool {
        *self == Square::Mine
    }
}

impl MineSquare for bool {
    #[inline]
    fn is_mine(&self) -> bool {
        *self
    }
}

#[inline]
pub fn is_mine<T: MineSquare, Ix: IndexType>(cell: CellRef<T, Ix>) -> bool {
    cell.value().is_mine()
}

/// Mines among the immediate neighbours. Cells on the edge of the lattice simply have
/// fewer neighbours, so nothing beyond the edge is counted.
pub fn mine_count<T: MineSquare, Ix: IndexType>(cell: CellRef<T, Ix>) -> usize {
    cell.neighbours()
        .iter()
        .filter(|&&(_, neighbour)| is_mine(neighbour))
        .count()
}

/// `*` for a mine, otherwise the single digit count of neighbouring mines.
pub fn count_output<T: MineSquare, Ix: IndexType>(cell: CellRef<T, Ix>) -> String {
    if is_mine(cell) {
        String::from("*")
    } else {
        mine_count(cell).to_string()
    }
}

#[derive(Debug, Copy, Clone, Default)]
pub struct MineCountDisplay;

impl<T: MineSquare, Ix: IndexType> GridDisplay<T, Ix> for MineCountDisplay {
    fn render_cell(&self, cell: CellRef<T, Ix>) -> String {
        count_output(cell)
    }
}

/// The hint picture for a whole minefield.
pub fn hints<T: MineSquare, Ix: IndexType>(grid: &Grid<T, Ix>) -> String {
    grid.render(&MineCountDisplay)
}

/// Neighbouring mine counts computed without a lattice: the field is padded with a
/// border of empty squares, shifted one step towards each compass point and the eight
/// shifted copies summed. Rows are assumed to be the length of the first row.
pub fn shifted_mine_counts(mines: &[Vec<bool>]) -> Vec<Vec<u8>> {
    let height = mines.len();
    let width = mines.first().map_or(0, |row| row.len());

    let mut padded = vec![vec![0u8; width + 2]; height + 2];
    for (y, row) in mines.iter().enumerate() {
        for (x, &mine) in row.iter().take(width).enumerate() {
            padded[y + 1][x + 1] = mine as u8;
        }
    }

    let mut counts = vec![vec![0u8; width]; height];
    for &point in &ALL {
        let (dy, dx) = point.offset();
        for (y, counts_row) in counts.iter_mut().enumerate() {
            let source_row = &padded[(y as isize + 1 + dy) as usize];
            for (x, count) in counts_row.iter_mut().enumerate() {
                *count += source_row[(x as isize + 1 + dx) as usize];
            }
        }
    }

    counts
}
