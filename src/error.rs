use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while loading or decoding an RLE pattern.
///
/// Structural format errors and I/O errors are kept as distinct variants so
/// callers can tell a broken file apart from a broken path.
#[derive(Debug, Error)]
pub enum Error {
    #[error("pattern data encountered before the header line")]
    MissingHeader,
    #[error("got {0} header parameters, expected 2")]
    HeaderParams(usize),
    #[error("grid dimensions must be nonzero, got {0}x{1}")]
    Dimensions(usize, usize),
    #[error("alternative rules are not supported: {0}")]
    Rule(String),
    #[error("invalid number in pattern: {0}")]
    Number(#[from] ParseIntError),
    #[error("run count with no following tag")]
    DanglingRunCount,
    #[error("invalid tag {0:?} in pattern data")]
    Tag(char),
    #[error("pattern data is never terminated by '!'")]
    Unterminated,
    #[error("row {row} encodes {cells} cells, but the grid is only {width} wide")]
    RowOverflow {
        row: usize,
        cells: usize,
        width: usize,
    },
    #[error("pattern encodes {0} rows, but the grid is only {1} tall")]
    RowCount(usize, usize),
    #[error("{} is a directory", .0.display())]
    NotAFile(PathBuf),
    #[error("{} is not an .rle file, only RLE files are supported", .0.display())]
    Extension(PathBuf),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
