use std::convert::TryFrom;
use std::fmt;

use crate::errors::*;

/// The contents of one square of a minefield.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub enum Square {
    Empty,
    Mine,
}

impl Default for Square {
    fn default() -> Square {
        Square::Empty
    }
}

impl Square {
    pub fn as_char(self) -> char {
        match self {
            Square::Empty => '.',
            Square::Mine => '*',
        }
    }
}

impl TryFrom<char> for Square {
    type Error = Error;

    fn try_from(c: char) -> Result<Square> {
        match c {
            '.' => Ok(Square::Empty),
            '*' => Ok(Square::Mine),
            other => Err(ErrorKind::MalformedGrid(format!("unexpected character {:?}", other)).into()),
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn text_forms() {
        assert_eq!(Square::try_from('*').unwrap(), Square::Mine);
        assert_eq!(Square::try_from('.').unwrap(), Square::Empty);
        assert_eq!(Square::Mine.to_string(), "*");
        assert_eq!(Square::default().to_string(), ".");

        let err = Square::try_from('x').unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::MalformedGrid(_)));
    }
}
