//! Create the Error, ErrorKind, ResultExt, and Result types.
//!
//! Other modules `use crate::errors::*;` to get access to everything `error_chain!` creates.
use crate::compass::CompassPoint;
use error_chain::*;

error_chain! {

    foreign_links {
        Io(::std::io::Error);
    }

    errors {
        InvalidDirection(point: CompassPoint) {
            description("direction is not cardinal")
            display("{:?} is not a cardinal direction", point)
        }
        DuplicateConnection(point: CompassPoint) {
            description("neighbour slot already occupied")
            display("a neighbour is already connected to the {:?}", point)
        }
        SelfConnection {
            description("cell connected to itself")
            display("a cell cannot be its own neighbour")
        }
        UnknownCell(index: usize) {
            description("cell index not in lattice")
            display("no cell with index {} in this lattice", index)
        }
        MalformedGrid(reason: String) {
            description("malformed grid")
            display("malformed grid: {}", reason)
        }
    }
}
