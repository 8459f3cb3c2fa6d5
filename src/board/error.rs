use thiserror::Error;

use super::Coord;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// `col`/`row` are 1-indexed, as the caller would have spoken them
    #[error("coordinate ({col},{row}) is outside the board")]
    OutOfBounds { col: i32, row: i32 },
    #[error("cell {coord} is already occupied")]
    CellOccupied { coord: Coord },
    #[error("cannot undo {requested} move(s), only {available} in history")]
    InsufficientHistory { requested: usize, available: usize },
    #[error("stone counts out of balance: {black} black vs {white} white")]
    ParityViolation { black: usize, white: usize },
}
