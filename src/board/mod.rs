//! Board representation for Gomoku

pub mod board;
pub mod error;


use std::fmt;
use std::str::FromStr;

// Re-exports
pub use board::{Board, Occupied};
pub use error::BoardError;

/// Board size (15x15)
pub const BOARD_SIZE: usize = 15;
pub const TOTAL_CELLS: usize = BOARD_SIZE * BOARD_SIZE; // 225

/// Stone colors. Empty cells are `None` on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stone {
    Black,
    White,
}

impl Stone {
    /// Get opponent color
    #[inline]
    pub fn opponent(self) -> Stone {
        match self {
            Stone::Black => Stone::White,
            Stone::White => Stone::Black,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Stone::Black => "black",
            Stone::White => "white",
        }
    }
}

impl fmt::Display for Stone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Stone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "black" | "b" => Ok(Stone::Black),
            "white" | "w" => Ok(Stone::White),
            other => Err(format!("unknown stone color `{other}`")),
        }
    }
}

/// Position on the board, 0-indexed.
///
/// The outside world speaks 1-indexed `(col, row)`; use
/// [`Coord::from_one_based`] and [`Coord::one_based`] at that boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    pub col: u8,
    pub row: u8,
}

impl Coord {
    #[inline]
    pub fn new(col: u8, row: u8) -> Self {
        debug_assert!(col < BOARD_SIZE as u8 && row < BOARD_SIZE as u8);
        Self { col, row }
    }

    /// Board center, `(N/2, N/2)`.
    #[inline]
    pub const fn center() -> Self {
        Self {
            col: (BOARD_SIZE / 2) as u8,
            row: (BOARD_SIZE / 2) as u8,
        }
    }

    /// Build a coordinate from signed components, `None` when off the board.
    #[inline]
    pub fn checked(col: i32, row: i32) -> Option<Self> {
        if Self::is_valid(col, row) {
            Some(Self {
                col: col as u8,
                row: row as u8,
            })
        } else {
            None
        }
    }

    /// Convert a 1-indexed boundary coordinate.
    pub fn from_one_based(col: i32, row: i32) -> Result<Self, BoardError> {
        Self::checked(col.saturating_sub(1), row.saturating_sub(1)).ok_or(BoardError::OutOfBounds { col, row })
    }

    /// 1-indexed `(col, row)` for display and recommendations.
    #[inline]
    pub fn one_based(self) -> (u8, u8) {
        (self.col + 1, self.row + 1)
    }

    #[inline]
    pub fn to_index(self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    #[inline]
    pub fn from_index(idx: usize) -> Self {
        Self {
            col: (idx % BOARD_SIZE) as u8,
            row: (idx / BOARD_SIZE) as u8,
        }
    }

    #[inline]
    pub fn is_valid(col: i32, row: i32) -> bool {
        col >= 0 && col < BOARD_SIZE as i32 && row >= 0 && row < BOARD_SIZE as i32
    }

    /// Step `n` cells along `(dc, dr)`, `None` when the result leaves the board.
    #[inline]
    pub fn offset(self, dc: i32, dr: i32, n: i32) -> Option<Self> {
        Self::checked(i32::from(self.col) + dc * n, i32::from(self.row) + dr * n)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (col, row) = self.one_based();
        write!(f, "({col},{row})")
    }
}

impl PartialOrd for Coord {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Coord {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.to_index().cmp(&other.to_index())
    }
}
