//! Text pictures of a minefield, one line per row with `.` for empty and `*` for a mine.
//!
//! Two forms are accepted. Bare rows:
//!
//! ```text
//! *...
//! ..*.
//! ```
//!
//! or a sized form whose first line gives the row and column counts:
//!
//! ```text
//! 2 4
//! *...
//! ..*.
//! ```

use std::convert::TryFrom;

use error_chain::bail;
use tracing::debug;

use crate::errors::*;
use crate::grid::Grid;
use crate::lattice::IndexType;
use crate::squares::Square;

/// Parse a picture into validated, equal length rows of squares.
pub fn parse_picture(text: &str) -> Result<Vec<Vec<Square>>> {
    let lines = picture_lines(text);
    if lines.is_empty() {
        bail!(malformed("empty picture"));
    }

    if let Some((rows, columns)) = parse_header(lines[0]) {
        if rows == 0 || columns == 0 {
            bail!(malformed(format!("header declares a {} by {} grid", rows, columns)));
        }
        let body = &lines[1..];
        if body.len() != rows {
            bail!(malformed(format!("header declares {} rows but {} follow", rows, body.len())));
        }
        debug!(rows, columns, "parsing sized picture");
        parse_rows(body, columns)
    } else {
        let columns = lines[0].chars().count();
        debug!(rows = lines.len(), columns, "parsing bare picture");
        parse_rows(&lines, columns)
    }
}

fn malformed<S: Into<String>>(reason: S) -> ErrorKind {
    ErrorKind::MalformedGrid(reason.into())
}

/// Lines of the picture, ignoring one trailing newline and any carriage returns.
fn picture_lines(text: &str) -> Vec<&str> {
    if text.is_empty() {
        return vec![];
    }
    let text = text.strip_suffix('\n').unwrap_or(text);
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

fn parse_header(line: &str) -> Option<(usize, usize)> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    match fields.as_slice() {
        [rows, columns] => Some((rows.parse().ok()?, columns.parse().ok()?)),
        _ => None,
    }
}

fn parse_rows(lines: &[&str], columns: usize) -> Result<Vec<Vec<Square>>> {
    lines.iter()
        .enumerate()
        .map(|(row_number, line)| -> Result<Vec<Square>> {
            if line.is_empty() {
                bail!(malformed(format!("row {} is empty", row_number)));
            }
            let row = line.chars()
                .map(|c| Square::try_from(c))
                .collect::<Result<Vec<Square>>>()
                .chain_err(|| malformed(format!("bad square in row {}", row_number)))?;
            if row.len() != columns {
                bail!(malformed(format!("row {} has {} squares, expected {}",
                                        row_number,
                                        row.len(),
                                        columns)));
            }
            Ok(row)
        })
        .collect()
}

impl<Ix: IndexType> Grid<Square, Ix> {
    pub fn from_picture(text: &str) -> Result<Grid<Square, Ix>> {
        Grid::from_rows(parse_picture(text)?)
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::coordinates::Cartesian2DCoordinate;
    use crate::squares::Square::{Empty, Mine};

    fn is_malformed(text: &str) -> bool {
        match parse_picture(text) {
            Err(e) => matches!(e.kind(), ErrorKind::MalformedGrid(_)),
            Ok(_) => false,
        }
    }

    #[test]
    fn bare_rows() {
        let rows = parse_picture("*...\n....\n.*..\n....").unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0], vec![Mine, Empty, Empty, Empty]);
        assert_eq!(rows[2], vec![Empty, Mine, Empty, Empty]);
    }

    #[test]
    fn trailing_newline_and_crlf() {
        assert_eq!(parse_picture("*.\n.*\n").unwrap(), parse_picture("*.\r\n.*\r\n").unwrap());
        assert_eq!(parse_picture("*.\n.*\n").unwrap(),
                   vec![vec![Mine, Empty], vec![Empty, Mine]]);
    }

    #[test]
    fn sized_rows() {
        let rows = parse_picture("2 3\n*..\n..*\n").unwrap();
        assert_eq!(rows, vec![vec![Mine, Empty, Empty], vec![Empty, Empty, Mine]]);
    }

    #[test]
    fn rejects_malformed_pictures() {
        assert!(is_malformed(""));
        assert!(is_malformed("\n"));
        assert!(is_malformed("*..\n.."));
        assert!(is_malformed("*..\n\n..."));
        assert!(is_malformed("*x.\n..."));
        assert!(is_malformed("2 3\n*..\n"));
        assert!(is_malformed("1 3\n*..\n..."));
        assert!(is_malformed("2 2\n*..\n..."));
        assert!(is_malformed("0 3\n"));
    }

    #[test]
    fn picture_to_grid_and_back() {
        let picture = "*...\n....\n.*..\n....";
        let g: Grid<Square> = Grid::from_picture(picture).unwrap();
        assert_eq!(g.to_string(), picture);
        assert_eq!(g[Cartesian2DCoordinate::new(1, 2)], Mine);
    }
}
