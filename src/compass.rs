use crate::errors::*;

/// The eight points of the compass rose, in clockwise order starting at North.
///
/// The discriminant doubles as the 1/8th turn count from North, so rotation is
/// arithmetic modulo 8. Cardinal points have even discriminants.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub enum CompassPoint {
    North = 0,
    NorthEast = 1,
    East = 2,
    SouthEast = 3,
    South = 4,
    SouthWest = 5,
    West = 6,
    NorthWest = 7,
}

const POINTS_COUNT: i32 = 8;

pub const ALL: [CompassPoint; 8] = [CompassPoint::North,
                                    CompassPoint::NorthEast,
                                    CompassPoint::East,
                                    CompassPoint::SouthEast,
                                    CompassPoint::South,
                                    CompassPoint::SouthWest,
                                    CompassPoint::West,
                                    CompassPoint::NorthWest];

pub const CARDINALS: [CompassPoint; 4] = [CompassPoint::North,
                                          CompassPoint::East,
                                          CompassPoint::South,
                                          CompassPoint::West];

impl CompassPoint {
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The point `turns` 1/8th turns from index zero, wrapping either way.
    #[inline]
    pub fn from_turns(turns: i32) -> CompassPoint {
        // rem_euclid is the mathematical modulus, never negative
        ALL[turns.rem_euclid(POINTS_COUNT) as usize]
    }

    /// Rotate clockwise by `steps` 1/8th turns. Negative steps rotate counter clockwise.
    #[inline]
    pub fn rotate(self, steps: i32) -> CompassPoint {
        CompassPoint::from_turns(self as i32 + steps)
    }

    #[inline]
    pub fn opposite(self) -> CompassPoint {
        self.rotate(4)
    }

    #[inline]
    pub fn is_cardinal(self) -> bool {
        self.index() % 2 == 0
    }

    #[inline]
    pub fn is_diagonal(self) -> bool {
        !self.is_cardinal()
    }

    /// The point halfway between two points that are a quarter turn apart,
    /// e.g. `North.mid(East) == Some(NorthEast)`.
    ///
    /// The mean is taken around the circle so the pairs either side of North work too:
    /// `West.mid(North) == Some(NorthWest)`. Any other pairing has no single midpoint.
    pub fn mid(self, other: CompassPoint) -> Option<CompassPoint> {
        match (other as i32 - self as i32).rem_euclid(POINTS_COUNT) {
            2 => Some(self.rotate(1)),
            6 => Some(self.rotate(-1)),
            _ => None,
        }
    }

    /// The two points a quarter turn either side of this one, clockwise first.
    #[inline]
    pub fn perpendiculars(self) -> [CompassPoint; 2] {
        [self.rotate(2), self.rotate(-2)]
    }

    /// Unit step as `(rows, columns)`, North being towards row zero and West towards column zero.
    pub fn offset(self) -> (isize, isize) {
        match self {
            CompassPoint::North => (-1, 0),
            CompassPoint::NorthEast => (-1, 1),
            CompassPoint::East => (0, 1),
            CompassPoint::SouthEast => (1, 1),
            CompassPoint::South => (1, 0),
            CompassPoint::SouthWest => (1, -1),
            CompassPoint::West => (0, -1),
            CompassPoint::NorthWest => (-1, -1),
        }
    }

    pub fn assert_cardinal(self) -> Result<CompassPoint> {
        if self.is_cardinal() {
            Ok(self)
        } else {
            Err(ErrorKind::InvalidDirection(self).into())
        }
    }
}
