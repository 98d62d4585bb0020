use std::fmt;

use error_chain::bail;
use petgraph::{Directed, Graph};
use petgraph::graph::{DefaultIx, NodeIndex};
pub use petgraph::graph::IndexType;
use petgraph::visit::EdgeRef;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::compass::{CompassPoint, CARDINALS};
use crate::errors::*;

/// Stable handle to a cell. Cells are never removed so a handle stays valid for the
/// lifetime of the lattice that allocated it.
pub type CellIndex<Ix = DefaultIx> = NodeIndex<Ix>;

pub type NeighbourSmallVec<Ix> = SmallVec<[(CompassPoint, CellIndex<Ix>); 8]>;

/// An arena of cells, each linked to at most one neighbour in each of the eight compass
/// directions.
///
/// The arena is a directed petgraph graph. The node weight is the cell's value and every
/// link between two cells is stored as a pair of edges `a -point-> b` and
/// `b -opposite(point)-> a`, so the lattice holds cycles without any shared ownership.
pub struct Lattice<T, Ix: IndexType = DefaultIx> {
    graph: Graph<T, CompassPoint, Directed, Ix>,
}

impl<T, Ix: IndexType> fmt::Debug for Lattice<T, Ix> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "Lattice :: cells: {:?}, links: {:?}",
               self.cells_count(),
               self.links_count())
    }
}

impl<T, Ix: IndexType> Default for Lattice<T, Ix> {
    fn default() -> Self {
        Lattice::new()
    }
}

impl<T, Ix: IndexType> Lattice<T, Ix> {
    pub fn new() -> Lattice<T, Ix> {
        Lattice { graph: Graph::default() }
    }

    /// Preallocate for `cells` cells, each with up to 8 neighbours.
    pub fn with_capacity(cells: usize) -> Lattice<T, Ix> {
        Lattice { graph: Graph::with_capacity(cells, 8 * cells) }
    }

    #[inline]
    pub fn cells_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of bidirectional links.
    #[inline]
    pub fn links_count(&self) -> usize {
        self.graph.edge_count() / 2
    }

    #[inline]
    pub fn contains(&self, cell: CellIndex<Ix>) -> bool {
        cell.index() < self.graph.node_count()
    }

    pub fn iter_cells(&self) -> impl Iterator<Item = CellIndex<Ix>> {
        self.graph.node_indices()
    }

    /// Add an isolated cell with no neighbours.
    pub fn new_cell(&mut self, value: T) -> Result<CellIndex<Ix>> {
        // petgraph panics rather than wrapping the index type
        if self.graph.node_count() >= <Ix as IndexType>::max().index() {
            bail!("lattice index type cannot address more than {} cells",
                  self.graph.node_count());
        }
        Ok(self.graph.add_node(value))
    }

    #[inline]
    pub fn value(&self, cell: CellIndex<Ix>) -> Option<&T> {
        self.graph.node_weight(cell)
    }

    #[inline]
    pub fn value_mut(&mut self, cell: CellIndex<Ix>) -> Option<&mut T> {
        self.graph.node_weight_mut(cell)
    }

    /// Replace the value of a cell, returning the previous value.
    /// Returns None, leaving the lattice untouched, if the cell does not exist.
    pub fn set_value(&mut self, cell: CellIndex<Ix>, value: T) -> Option<T> {
        self.value_mut(cell).map(|current| std::mem::replace(current, value))
    }

    /// A borrowed view of a cell for navigating the lattice.
    pub fn cell(&self, cell: CellIndex<Ix>) -> Option<CellRef<T, Ix>> {
        if self.contains(cell) {
            Some(CellRef {
                lattice: self,
                index: cell,
            })
        } else {
            None
        }
    }

    /// The neighbour of `cell` in direction `point`.
    /// None means the edge of the lattice has been reached in that direction.
    pub fn neighbour(&self, cell: CellIndex<Ix>, point: CompassPoint) -> Option<CellIndex<Ix>> {
        self.graph
            .edges(cell)
            .find(|edge| *edge.weight() == point)
            .map(|edge| edge.target())
    }

    /// All neighbours of a cell, clockwise from North.
    pub fn neighbours(&self, cell: CellIndex<Ix>) -> NeighbourSmallVec<Ix> {
        let mut neighbours: NeighbourSmallVec<Ix> = self.graph
            .edges(cell)
            .map(|edge| (*edge.weight(), edge.target()))
            .collect();
        neighbours.sort_by_key(|&(point, _)| point);
        neighbours
    }

    /// Follow the `points` one step at a time from `cell`.
    pub fn walk(&self, cell: CellIndex<Ix>, points: &[CompassPoint]) -> Option<CellIndex<Ix>> {
        if !self.contains(cell) {
            return None;
        }
        points.iter().try_fold(cell, |current, &point| self.neighbour(current, point))
    }

    /// Lazily visit `cell` and then each successive neighbour in direction `point` until
    /// the edge of the lattice.
    pub fn traverse(&self, cell: CellIndex<Ix>, point: CompassPoint) -> Traverse<T, Ix> {
        Traverse {
            lattice: self,
            next: if self.contains(cell) { Some(cell) } else { None },
            point: point,
        }
    }

    /// Link `a` to `b` so that `b` is the neighbour of `a` in direction `point` and `a`
    /// is the neighbour of `b` in the opposite direction.
    ///
    /// Occupied slots are never overwritten: that would leave a one way link behind.
    pub fn connect(&mut self, a: CellIndex<Ix>, point: CompassPoint, b: CellIndex<Ix>) -> Result<()> {
        for &cell in &[a, b] {
            if !self.contains(cell) {
                bail!(ErrorKind::UnknownCell(cell.index()));
            }
        }
        if a == b {
            bail!(ErrorKind::SelfConnection);
        }
        if self.neighbour(a, point).is_some() {
            bail!(ErrorKind::DuplicateConnection(point));
        }
        let back = point.opposite();
        if self.neighbour(b, back).is_some() {
            bail!(ErrorKind::DuplicateConnection(back));
        }
        if self.graph.edge_count() + 2 >= <Ix as IndexType>::max().index() {
            bail!("lattice index type cannot address more than {} links",
                  self.links_count());
        }

        self.graph.add_edge(a, b, point);
        self.graph.add_edge(b, a, back);
        Ok(())
    }

    /// Checks every link has a matching link back and that wherever two adjacent cardinal
    /// neighbours exist, the diagonal between them is the single cell neighbouring both.
    pub fn is_consistent(&self) -> bool {
        self.iter_cells().all(|cell| {
            let symmetric = self.neighbours(cell)
                .iter()
                .all(|&(point, other)| self.neighbour(other, point.opposite()) == Some(cell));

            let rectilinear = CARDINALS.iter().all(|&point| {
                let clockwise = point.rotate(2);
                let diagonal = point.rotate(1);
                match (self.neighbour(cell, point), self.neighbour(cell, clockwise)) {
                    (Some(b), Some(c)) => {
                        let via_b = self.neighbour(b, clockwise);
                        via_b.is_some() && via_b == self.neighbour(c, point) &&
                        via_b == self.neighbour(cell, diagonal)
                    }
                    _ => self.neighbour(cell, diagonal).is_none(),
                }
            });

            symmetric && rectilinear
        })
    }
}

impl<T: Clone, Ix: IndexType> Lattice<T, Ix> {
    /// Build a `size_y` by `size_x` lattice with every cell holding a copy of `value`.
    ///
    /// Grows North from a seed cell then West, so the returned handle is the northwest
    /// corner.
    pub fn rectangle(size_y: usize, size_x: usize, value: T) -> Result<(Lattice<T, Ix>, CellIndex<Ix>)> {
        if size_y == 0 || size_x == 0 {
            bail!(ErrorKind::MalformedGrid(format!("cannot build a {} by {} lattice", size_y, size_x)));
        }

        let mut lattice = Lattice::with_capacity(size_y * size_x);
        let mut corner = lattice.new_cell(value)?;
        for _ in 1..size_y {
            corner = lattice.grow(corner, CompassPoint::North)?;
        }
        for _ in 1..size_x {
            corner = lattice.grow(corner, CompassPoint::West)?;
        }
        debug!(size_y, size_x, cells = lattice.cells_count(), "built rectangular lattice");

        Ok((lattice, corner))
    }

    /// Extend the lattice by one full row or column on the `point` side of `cell`.
    ///
    /// `cell` gets a new neighbour in direction `point`, then every cell in line with `cell`
    /// along the two perpendicular directions gets one too, with all the new cells joined to
    /// each other and to the existing lattice both cardinally and diagonally. New cells hold a
    /// copy of `cell`'s value. Returns the new neighbour of `cell`.
    ///
    /// `point` must be cardinal and that side of the line must not be occupied yet.
    pub fn grow(&mut self, cell: CellIndex<Ix>, point: CompassPoint) -> Result<CellIndex<Ix>> {
        point.assert_cardinal()?;
        let value = self.value(cell)
            .cloned()
            .ok_or_else(|| Error::from(ErrorKind::UnknownCell(cell.index())))?;
        if self.neighbour(cell, point).is_some() {
            bail!(ErrorKind::DuplicateConnection(point));
        }

        let before = self.cells_count();
        let leading = self.new_cell(value.clone())?;
        self.connect(cell, point, leading)?;

        for &perpendicular in &point.perpendiculars() {
            self.stitch(cell, point, perpendicular, &value)?;
        }
        debug!(cell = cell.index(), ?point, created = self.cells_count() - before, "grew lattice");

        Ok(leading)
    }

    /// Walk away from `cell` along `perpendicular`, giving each cell in the line a new
    /// neighbour in direction `point`. Every step completes one 2x2 block: the current cell
    /// and its new neighbour, plus the next cell along the line and its new neighbour.
    fn stitch(&mut self,
              cell: CellIndex<Ix>,
              point: CompassPoint,
              perpendicular: CompassPoint,
              value: &T)
              -> Result<()> {

        let forward_diagonal = point.mid(perpendicular)
            .ok_or_else(|| Error::from(ErrorKind::InvalidDirection(perpendicular)))?;
        let backward_diagonal = point.mid(perpendicular.opposite())
            .ok_or_else(|| Error::from(ErrorKind::InvalidDirection(perpendicular)))?;

        let mut current = cell;
        while let Some(next) = self.neighbour(current, perpendicular) {
            let new_next = self.new_cell(value.clone())?;
            self.connect(next, point, new_next)?;

            let new_current = self.neighbour(current, point)
                .ok_or_else(|| Error::from(format!("cell {} lost its new {:?} neighbour",
                                                   current.index(),
                                                   point)))?;
            self.connect(current, forward_diagonal, new_next)?;
            self.connect(next, backward_diagonal, new_current)?;
            self.connect(new_current, perpendicular, new_next)?;
            trace!(from = current.index(), to = next.index(), ?perpendicular, "stitched block");

            current = next;
        }

        Ok(())
    }
}

/// Lazy walk in one direction. See `Lattice::traverse`.
pub struct Traverse<'a, T: 'a, Ix: IndexType + 'a> {
    lattice: &'a Lattice<T, Ix>,
    next: Option<CellIndex<Ix>>,
    point: CompassPoint,
}

impl<'a, T, Ix: IndexType> Iterator for Traverse<'a, T, Ix> {
    type Item = CellIndex<Ix>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.lattice.neighbour(current, self.point);
        Some(current)
    }
}

impl<'a, T, Ix: IndexType> fmt::Debug for Traverse<'a, T, Ix> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Traverse :: next: {:?}, point: {:?}", self.next, self.point)
    }
}

/// A cell of a lattice, borrowed for reading. Navigates like the cell itself,
/// e.g. `corner.neighbour(South)?.neighbour(East)`.
pub struct CellRef<'a, T: 'a, Ix: IndexType + 'a = DefaultIx> {
    lattice: &'a Lattice<T, Ix>,
    index: CellIndex<Ix>,
}

// Manual impls: deriving would demand T: Clone
impl<'a, T, Ix: IndexType> Clone for CellRef<'a, T, Ix> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<'a, T, Ix: IndexType> Copy for CellRef<'a, T, Ix> {}

impl<'a, T, Ix: IndexType> PartialEq for CellRef<'a, T, Ix> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && std::ptr::eq(self.lattice, other.lattice)
    }
}
impl<'a, T, Ix: IndexType> Eq for CellRef<'a, T, Ix> {}

impl<'a, T: fmt::Debug, Ix: IndexType> fmt::Debug for CellRef<'a, T, Ix> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "CellRef :: index: {:?}, value: {:?}", self.index.index(), self.value())
    }
}

impl<'a, T, Ix: IndexType> CellRef<'a, T, Ix> {
    #[inline]
    pub fn index(&self) -> CellIndex<Ix> {
        self.index
    }

    #[inline]
    pub fn lattice(&self) -> &'a Lattice<T, Ix> {
        self.lattice
    }

    #[inline]
    pub fn value(&self) -> &'a T {
        &self.lattice.graph[self.index]
    }

    pub fn neighbour(&self, point: CompassPoint) -> Option<CellRef<'a, T, Ix>> {
        let lattice = self.lattice;
        lattice.neighbour(self.index, point)
            .map(|index| CellRef { lattice, index })
    }

    pub fn neighbours(&self) -> SmallVec<[(CompassPoint, CellRef<'a, T, Ix>); 8]> {
        let lattice = self.lattice;
        lattice.neighbours(self.index)
            .into_iter()
            .map(|(point, index)| (point, CellRef { lattice, index }))
            .collect()
    }

    pub fn walk(&self, points: &[CompassPoint]) -> Option<CellRef<'a, T, Ix>> {
        let lattice = self.lattice;
        lattice.walk(self.index, points)
            .map(|index| CellRef { lattice, index })
    }

    pub fn traverse(&self, point: CompassPoint) -> impl Iterator<Item = CellRef<'a, T, Ix>> {
        let lattice = self.lattice;
        lattice.traverse(self.index, point)
            .map(move |index| CellRef { lattice, index })
    }
}
