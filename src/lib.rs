//! **minefield** builds rectangular lattices of cells linked to their eight compass
//! neighbours, grows them a row or column at a time, and renders them as minesweeper
//! style pictures.

pub mod adjacency;
pub mod compass;
pub mod coordinates;
pub mod errors;
pub mod grid;
pub mod grid_displays;
pub mod lattice;
pub mod pictures;
pub mod squares;
pub mod units;
