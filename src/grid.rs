use std::fmt;
use std::ops::{Index, IndexMut};

use error_chain::bail;
use itertools::Itertools;
use petgraph::graph::DefaultIx;

use crate::compass::CompassPoint;
use crate::coordinates::Cartesian2DCoordinate;
use crate::errors::*;
use crate::grid_displays::{GridDisplay, ValueDisplay};
use crate::lattice::{CellIndex, CellRef, IndexType, Lattice, Traverse};
use crate::units::{ColumnsCount, RowsCount};

/// A rectangular lattice addressed from its northwest corner.
///
/// Rows are read by walking South from the corner and each row by walking East, so the
/// grid keeps no coordinate table of its own.
pub struct Grid<T, Ix: IndexType = DefaultIx> {
    lattice: Lattice<T, Ix>,
    corner: CellIndex<Ix>,
}

impl<T, Ix: IndexType> fmt::Debug for Grid<T, Ix> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "Grid :: lattice: {:?}, rows: {:?}, columns: {:?}",
               self.lattice,
               self.rows(),
               self.columns())
    }
}

impl<T: Clone, Ix: IndexType> Grid<T, Ix> {
    pub fn new(rows: RowsCount, columns: ColumnsCount, value: T) -> Result<Grid<T, Ix>> {
        let (RowsCount(size_y), ColumnsCount(size_x)) = (rows, columns);
        let (lattice, corner) = Lattice::rectangle(size_y, size_x, value)?;
        Ok(Grid { lattice, corner })
    }

    /// Build a grid holding `rows` in row major order.
    ///
    /// There must be at least one row, no empty rows and every row the same length.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Grid<T, Ix>> {
        let width = match rows.first() {
            None => bail!(ErrorKind::MalformedGrid("no rows".to_string())),
            Some(first) => first.len(),
        };
        for (row_number, row) in rows.iter().enumerate() {
            if row.is_empty() {
                bail!(ErrorKind::MalformedGrid(format!("row {} is empty", row_number)));
            }
            if row.len() != width {
                bail!(ErrorKind::MalformedGrid(format!("row {} has {} squares, expected {}",
                                                       row_number,
                                                       row.len(),
                                                       width)));
            }
        }

        let fill = rows[0][0].clone();
        let mut grid = Grid::new(RowsCount(rows.len()), ColumnsCount(width), fill)?;
        let cells: Vec<CellIndex<Ix>> = grid.iter().collect();
        for (cell, value) in cells.into_iter().zip(rows.into_iter().flatten()) {
            grid.lattice.set_value(cell, value);
        }

        Ok(grid)
    }
}

impl<T, Ix: IndexType> Grid<T, Ix> {
    #[inline]
    pub fn lattice(&self) -> &Lattice<T, Ix> {
        &self.lattice
    }

    /// The northwest corner, origin of all addressing.
    #[inline]
    pub fn corner(&self) -> CellIndex<Ix> {
        self.corner
    }

    pub fn rows(&self) -> RowsCount {
        RowsCount(self.lattice.traverse(self.corner, CompassPoint::South).count())
    }

    pub fn columns(&self) -> ColumnsCount {
        ColumnsCount(self.lattice.traverse(self.corner, CompassPoint::East).count())
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.lattice.cells_count()
    }

    /// The cell `coord.x` steps East and `coord.y` steps South of the corner.
    pub fn cell_at(&self, coord: Cartesian2DCoordinate) -> Option<CellIndex<Ix>> {
        self.lattice
            .traverse(self.corner, CompassPoint::East)
            .nth(coord.x)
            .and_then(|column_top| {
                self.lattice.traverse(column_top, CompassPoint::South).nth(coord.y)
            })
    }

    pub fn cell(&self, coord: Cartesian2DCoordinate) -> Option<CellRef<T, Ix>> {
        self.cell_at(coord).and_then(|cell| self.lattice.cell(cell))
    }

    pub fn get(&self, coord: Cartesian2DCoordinate) -> Option<&T> {
        self.cell_at(coord).and_then(|cell| self.lattice.value(cell))
    }

    pub fn get_mut(&mut self, coord: Cartesian2DCoordinate) -> Option<&mut T> {
        match self.cell_at(coord) {
            Some(cell) => self.lattice.value_mut(cell),
            None => None,
        }
    }

    /// Store `value` at `coord`, returning the value it replaced.
    /// Returns None, dropping `value`, if the coordinate is outside the grid.
    pub fn set(&mut self, coord: Cartesian2DCoordinate, value: T) -> Option<T> {
        match self.cell_at(coord) {
            Some(cell) => self.lattice.set_value(cell, value),
            None => None,
        }
    }

    /// Each row, North to South, as a lazy walk East from its first cell.
    pub fn iter_row(&self) -> impl Iterator<Item = Traverse<T, Ix>> {
        let lattice = &self.lattice;
        lattice.traverse(self.corner, CompassPoint::South)
            .map(move |first| lattice.traverse(first, CompassPoint::East))
    }

    /// Each column, West to East, as a lazy walk South from its first cell.
    pub fn iter_column(&self) -> impl Iterator<Item = Traverse<T, Ix>> {
        let lattice = &self.lattice;
        lattice.traverse(self.corner, CompassPoint::East)
            .map(move |first| lattice.traverse(first, CompassPoint::South))
    }

    /// Every cell in row major order.
    pub fn iter(&self) -> impl Iterator<Item = CellIndex<Ix>> + '_ {
        self.iter_row().flatten()
    }

    /// One line of text per row, each the concatenated rendering of the row's cells.
    pub fn render(&self, display: &dyn GridDisplay<T, Ix>) -> String {
        self.render_with(|cell| display.render_cell(cell))
    }

    pub fn render_with<F>(&self, formatter: F) -> String
        where F: Fn(CellRef<T, Ix>) -> String
    {
        self.iter_row()
            .map(|row| {
                row.filter_map(|cell| self.lattice.cell(cell))
                    .map(|cell| formatter(cell))
                    .collect::<String>()
            })
            .join("\n")
    }
}

impl<T: fmt::Display, Ix: IndexType> fmt::Display for Grid<T, Ix> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.render(&ValueDisplay))
    }
}

impl<T, Ix: IndexType> Index<Cartesian2DCoordinate> for Grid<T, Ix> {
    type Output = T;

    fn index(&self, coord: Cartesian2DCoordinate) -> &T {
        self.get(coord)
            .unwrap_or_else(|| panic!("{:?} is outside the grid", coord))
    }
}

impl<T, Ix: IndexType> IndexMut<Cartesian2DCoordinate> for Grid<T, Ix> {
    fn index_mut(&mut self, coord: Cartesian2DCoordinate) -> &mut T {
        self.get_mut(coord)
            .unwrap_or_else(|| panic!("{:?} is outside the grid", coord))
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::compass::CompassPoint::*;
    use crate::grid_displays::NeighbourCountDisplay;
    use crate::squares::Square;
    use quickcheck::{quickcheck, TestResult};

    type SmallGrid<T> = Grid<T, u32>;

    fn gc(x: usize, y: usize) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x, y)
    }

    fn numbered_grid(rows: usize, columns: usize) -> SmallGrid<usize> {
        let values: Vec<Vec<usize>> = (0..rows)
            .map(|y| (0..columns).map(|x| y * columns + x).collect())
            .collect();
        SmallGrid::from_rows(values).unwrap()
    }

    #[test]
    fn grid_dimensions() {
        let g = SmallGrid::new(RowsCount(3), ColumnsCount(5), 0u8).unwrap();
        assert_eq!(g.rows(), RowsCount(3));
        assert_eq!(g.columns(), ColumnsCount(5));
        assert_eq!(g.size(), 15);
        assert!(g.lattice().is_consistent());
    }

    #[test]
    fn blank_grid_renders_dots() {
        let g = SmallGrid::new(RowsCount(3), ColumnsCount(5), Square::Empty).unwrap();
        assert_eq!(g.to_string(), ".....\n.....\n.....");
    }

    #[test]
    fn indexing_is_row_major() {
        let g = numbered_grid(3, 4);
        assert_eq!(g.get(gc(0, 0)), Some(&0));
        assert_eq!(g.get(gc(3, 0)), Some(&3));
        assert_eq!(g.get(gc(0, 1)), Some(&4));
        assert_eq!(g.get(gc(2, 2)), Some(&10));
        assert_eq!(g[gc(3, 2)], 11);
        assert_eq!(g.get((1, 2).into()), Some(&9));
        assert_eq!(g.get(gc(4, 0)), None);
        assert_eq!(g.get(gc(0, 3)), None);
        assert_eq!(g.cell_at(gc(0, 0)), Some(g.corner()));
    }

    #[test]
    fn cells_are_reached_either_way_round() {
        let g = numbered_grid(4, 4);
        let corner = g.lattice().cell(g.corner()).unwrap();
        for y in 0..4 {
            for x in 0..4 {
                let mut south_then_east = vec![South; y];
                south_then_east.extend(vec![East; x]);
                let reached = corner.walk(&south_then_east).unwrap();
                assert_eq!(Some(reached.index()), g.cell_at(gc(x, y)));
            }
        }
    }

    #[test]
    fn set_then_get() {
        let mut g = numbered_grid(2, 3);
        assert_eq!(g.set(gc(1, 1), 100), Some(4));
        assert_eq!(g.get(gc(1, 1)), Some(&100));
        g[gc(2, 0)] = 42;
        assert_eq!(g[gc(2, 0)], 42);
        assert_eq!(g.set(gc(9, 9), 1), None);
        if let Some(v) = g.get_mut(gc(0, 1)) {
            *v += 1;
        }
        assert_eq!(g.get(gc(0, 1)), Some(&4));
    }

    #[test]
    #[should_panic]
    fn index_outside_grid_panics() {
        let g = numbered_grid(2, 2);
        let _ = g[gc(2, 0)];
    }

    #[test]
    fn row_and_column_iteration() {
        let g = numbered_grid(2, 3);
        let value_of = |cell: CellIndex| *g.lattice().value(cell).unwrap();
        let rows: Vec<Vec<usize>> = g.iter_row().map(|row| row.map(value_of).collect()).collect();
        assert_eq!(rows, vec![vec![0, 1, 2], vec![3, 4, 5]]);
        let columns: Vec<Vec<usize>> =
            g.iter_column().map(|column| column.map(value_of).collect()).collect();
        assert_eq!(columns, vec![vec![0, 3], vec![1, 4], vec![2, 5]]);
        assert_eq!(g.iter().map(value_of).collect::<Vec<_>>(), vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn render_with_formatters() {
        let g = numbered_grid(2, 3);
        assert_eq!(g.to_string(), "012\n345");
        assert_eq!(g.render(&NeighbourCountDisplay), "353\n353");
        assert_eq!(g.render_with(|cell| format!("[{}]", cell.value() * 2)),
                   "[0][2][4]\n[6][8][10]");
    }

    #[test]
    fn from_rows_rejects_bad_shapes() {
        let is_malformed = |rows: Vec<Vec<u8>>| {
            matches!(SmallGrid::from_rows(rows).unwrap_err().kind(), ErrorKind::MalformedGrid(_))
        };
        assert!(is_malformed(vec![]));
        assert!(is_malformed(vec![vec![]]));
        assert!(is_malformed(vec![vec![1, 2], vec![3]]));
        assert!(is_malformed(vec![vec![1], vec![]]));
    }

    quickcheck! {
        fn set_is_idempotent_read(y: u8, x: u8, value: i32) -> TestResult {
            let mut g = SmallGrid::new(RowsCount(4), ColumnsCount(6), 0i32).unwrap();
            let coord = gc(x as usize % 6, y as usize % 4);
            g.set(coord, value);
            TestResult::from_bool(g.get(coord) == Some(&value))
        }
    }
}
