use docopt::Docopt;
use minefield::{
    adjacency,
    grid::Grid,
    squares::Square,
    units::{ColumnsCount, RowsCount},
};
use serde_derive::Deserialize;
use std::{
    io,
    io::prelude::*,
    fs::File,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Minefield

Usage:
    minefield_driver -h | --help
    minefield_driver [--picture=<path>] [--text-out=<path>] [--show-mines]
    minefield_driver blank <rows> <columns> [--text-out=<path>]

Options:
    -h --help              Show this screen.
    --picture=<path>       Read the minefield picture from a file instead of stdin. Either rows of '.' and '*' or a first line '<rows> <columns>' followed by the rows.
    --text-out=<path>      Output file path for the rendering instead of stdout.
    --show-mines           Render the parsed minefield itself rather than the neighbouring mine counts.
";
#[derive(Debug, Deserialize)]
struct MinefieldArgs {
    cmd_blank: bool,
    arg_rows: Option<usize>,
    arg_columns: Option<usize>,
    flag_picture: String,
    flag_text_out: String,
    flag_show_mines: bool,
}

// Errors for the driver, wrapping the library's own error chain.
mod errors {
    use error_chain::*;
    error_chain! {

        links {
            Minefield(::minefield::errors::Error, ::minefield::errors::ErrorKind);
        }

        foreign_links {
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args: MinefieldArgs = Docopt::new(USAGE)
        .and_then(|d| d.deserialize())
        .unwrap_or_else(|e| e.exit());
    debug!(?args, "parsed arguments");

    let rendering = if args.cmd_blank {
        render_blank(&args)?
    } else {
        render_picture(&args)?
    };

    if args.flag_text_out.is_empty() {
        println!("{}", rendering);
    } else {
        write_text_to_file(&rendering, &args.flag_text_out)
            .chain_err(|| format!("Failed to write minefield to text file {}", args.flag_text_out))?;
    }

    Ok(())
}

fn render_blank(args: &MinefieldArgs) -> Result<String> {
    let rows = args.arg_rows.ok_or("Missing row count")?;
    let columns = args.arg_columns.ok_or("Missing column count")?;
    info!(rows, columns, "rendering blank minefield");

    let grid = Grid::<Square>::new(RowsCount(rows), ColumnsCount(columns), Square::Empty)?;
    Ok(grid.to_string())
}

fn render_picture(args: &MinefieldArgs) -> Result<String> {
    let picture = read_picture(&args.flag_picture)?;
    let grid = Grid::<Square>::from_picture(&picture)
        .chain_err(|| "Invalid minefield picture")?;
    info!(rows = grid.rows().0, columns = grid.columns().0, "loaded minefield");

    if args.flag_show_mines {
        Ok(grid.to_string())
    } else {
        Ok(adjacency::hints(&grid))
    }
}

/// The picture from `file_name`, or from stdin if no file is given.
fn read_picture(file_name: &str) -> Result<String> {
    let mut picture = String::new();
    if file_name.is_empty() {
        io::stdin().read_to_string(&mut picture)
            .chain_err(|| "Failed to read minefield picture from stdin")?;
    } else {
        File::open(file_name)
            .and_then(|mut f| f.read_to_string(&mut picture))
            .chain_err(|| format!("Failed to read minefield picture file {}", file_name))?;
    }
    Ok(picture)
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    f.write_all(b"\n")?;
    Ok(())
}
