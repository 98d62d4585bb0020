use std::convert::From;

/// A position on a grid, `x` columns East and `y` rows South of the northwest corner.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Cartesian2DCoordinate {
    pub x: usize,
    pub y: usize,
}

impl Cartesian2DCoordinate {
    pub fn new(x: usize, y: usize) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate { x: x, y: y }
    }
}

impl From<(usize, usize)> for Cartesian2DCoordinate {
    fn from(x_y_pair: (usize, usize)) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x_y_pair.0, x_y_pair.1)
    }
}
