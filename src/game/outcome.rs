//! Results reported back to the host after a move or a control command.

use std::fmt;

use crate::board::{Coord, Stone};
use crate::search::SearchResult;

/// How a finished game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinType {
    FiveInRow,
    Resignation,
    /// Every cell filled with no five anywhere: a draw
    BoardFull,
}

/// Terminal state of a game. `winner` is `None` only for a draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameResult {
    pub winner: Option<Stone>,
    pub win_type: WinType,
    /// The full run that won, from one end to the other. Empty unless `FiveInRow`.
    pub winning_line: Vec<Coord>,
    pub last_move: Option<Coord>,
}

impl GameResult {
    pub(crate) fn five(winner: Stone, line: Vec<Coord>, last_move: Coord) -> Self {
        Self {
            winner: Some(winner),
            win_type: WinType::FiveInRow,
            winning_line: line,
            last_move: Some(last_move),
        }
    }

    pub(crate) fn resignation(loser: Stone, last_move: Option<Coord>) -> Self {
        Self {
            winner: Some(loser.opponent()),
            win_type: WinType::Resignation,
            winning_line: Vec::new(),
            last_move,
        }
    }

    pub(crate) fn draw(last_move: Coord) -> Self {
        Self {
            winner: None,
            win_type: WinType::BoardFull,
            winning_line: Vec::new(),
            last_move: Some(last_move),
        }
    }

    #[inline]
    pub fn is_draw(&self) -> bool {
        self.winner.is_none()
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.winner, self.win_type) {
            (Some(winner), WinType::FiveInRow) => write!(f, "{winner} wins with five in a row"),
            (Some(winner), WinType::Resignation) => {
                write!(f, "{winner} wins, {} resigned", winner.opponent())
            }
            _ => write!(f, "draw, the board is full"),
        }
    }
}

/// What happened after a stone was accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub coord: Coord,
    pub color: Stone,
    /// `Some` when this move ended the game
    pub result: Option<GameResult>,
}

impl MoveOutcome {
    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.result.is_some()
    }
}

/// A suggested move. Reported in the 1-indexed boundary form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecommendation {
    pub color: Stone,
    coord: Coord,
}

impl MoveRecommendation {
    pub fn new(color: Stone, coord: Coord) -> Self {
        Self { color, coord }
    }

    /// 1-indexed column
    #[inline]
    pub fn col(&self) -> u8 {
        self.coord.one_based().0
    }

    /// 1-indexed row
    #[inline]
    pub fn row(&self) -> u8 {
        self.coord.one_based().1
    }

    #[inline]
    pub fn coord(&self) -> Coord {
        self.coord
    }
}

impl fmt::Display for MoveRecommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.color.name(), self.col(), self.row())
    }
}

/// The AI's applied reply: what it played, as a recommendation, and how it searched.
#[derive(Debug, Clone)]
pub struct AiMove {
    pub outcome: MoveOutcome,
    pub recommendation: MoveRecommendation,
    pub search: SearchResult,
}
