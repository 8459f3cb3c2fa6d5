//! Board structure with move history

use std::fmt;

use super::error::BoardError;
use super::{Coord, Stone, BOARD_SIZE, TOTAL_CELLS};

/// Game board: one cell per intersection plus the order stones were placed in.
///
/// The cell array and the history are kept in lockstep: replaying
/// `history` onto an empty board reproduces `cells` exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [Option<Stone>; TOTAL_CELLS],
    history: Vec<Coord>,
    black_count: usize,
    white_count: usize,
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [None; TOTAL_CELLS],
            history: Vec::with_capacity(TOTAL_CELLS),
            black_count: 0,
            white_count: 0,
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        BOARD_SIZE
    }

    /// Get stone at position (`None` for an empty or off-board cell)
    #[inline]
    pub fn get(&self, coord: Coord) -> Option<Stone> {
        if Coord::is_valid(i32::from(coord.col), i32::from(coord.row)) {
            self.cells[coord.to_index()]
        } else {
            None
        }
    }

    /// Check if position is empty
    #[inline]
    pub fn is_empty_at(&self, coord: Coord) -> bool {
        self.get(coord).is_none()
    }

    /// Place a stone and record it in the history.
    ///
    /// No turn-order check happens here; the game controller owns that rule.
    pub fn place(&mut self, coord: Coord, stone: Stone) -> Result<(), BoardError> {
        if !Coord::is_valid(i32::from(coord.col), i32::from(coord.row)) {
            return Err(BoardError::OutOfBounds {
                col: i32::from(coord.col) + 1,
                row: i32::from(coord.row) + 1,
            });
        }
        let idx = coord.to_index();
        if self.cells[idx].is_some() {
            return Err(BoardError::CellOccupied { coord });
        }
        self.cells[idx] = Some(stone);
        self.history.push(coord);
        match stone {
            Stone::Black => self.black_count += 1,
            Stone::White => self.white_count += 1,
        }
        Ok(())
    }

    /// Remove the last `count` stones. Nothing is removed when history is too short.
    pub fn undo(&mut self, count: usize) -> Result<(), BoardError> {
        if count > self.history.len() {
            return Err(BoardError::InsufficientHistory {
                requested: count,
                available: self.history.len(),
            });
        }
        for _ in 0..count {
            self.pop();
        }
        Ok(())
    }

    /// Take back the most recent stone.
    pub(crate) fn pop(&mut self) -> Option<(Coord, Stone)> {
        let coord = self.history.pop()?;
        let stone = self.cells[coord.to_index()].take()?;
        match stone {
            Stone::Black => self.black_count -= 1,
            Stone::White => self.white_count -= 1,
        }
        Some((coord, stone))
    }

    /// Occupied cells in placement order. Call again to restart.
    pub fn occupied(&self) -> Occupied<'_> {
        Occupied {
            cells: &self.cells,
            history: self.history.iter(),
        }
    }

    /// Placement order, oldest first
    #[inline]
    pub fn history(&self) -> &[Coord] {
        &self.history
    }

    #[inline]
    pub fn last_move(&self) -> Option<Coord> {
        self.history.last().copied()
    }

    /// Number of stones of one color
    #[inline]
    pub fn count(&self, stone: Stone) -> usize {
        match stone {
            Stone::Black => self.black_count,
            Stone::White => self.white_count,
        }
    }

    /// Total stones on board
    #[inline]
    pub fn len(&self) -> usize {
        self.history.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.history.len() == TOTAL_CELLS
    }

    /// Whose turn it is, from stone-count parity.
    ///
    /// Equal counts mean Black to move, Black ahead by one means White.
    /// Anything else cannot come from alternating play.
    pub fn side_to_move(&self) -> Result<Stone, BoardError> {
        match self.black_count.checked_sub(self.white_count) {
            Some(0) => Ok(Stone::Black),
            Some(1) => Ok(Stone::White),
            _ => Err(BoardError::ParityViolation {
                black: self.black_count,
                white: self.white_count,
            }),
        }
    }

    /// Remove every stone and forget the history
    pub fn clear(&mut self) {
        self.cells = [None; TOTAL_CELLS];
        self.history.clear();
        self.black_count = 0;
        self.white_count = 0;
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over occupied cells, see [`Board::occupied`].
#[derive(Clone)]
pub struct Occupied<'a> {
    cells: &'a [Option<Stone>; TOTAL_CELLS],
    history: std::slice::Iter<'a, Coord>,
}

impl Iterator for Occupied<'_> {
    type Item = (Coord, Stone);

    fn next(&mut self) -> Option<Self::Item> {
        let coord = *self.history.next()?;
        self.cells[coord.to_index()].map(|stone| (coord, stone))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.history.size_hint()
    }
}

/// ASCII board with 1-indexed axes: `X` black, `O` white, `.` empty.
/// Columns run left to right, rows top to bottom.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for col in 1..=BOARD_SIZE {
            write!(f, "{col:>3}")?;
        }
        writeln!(f)?;
        for row in 0..BOARD_SIZE {
            write!(f, "{:>3}", row + 1)?;
            for col in 0..BOARD_SIZE {
                let symbol = match self.cells[Coord::new(col as u8, row as u8).to_index()] {
                    Some(Stone::Black) => 'X',
                    Some(Stone::White) => 'O',
                    None => '.',
                };
                write!(f, "{symbol:>3}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
