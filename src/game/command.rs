//! Commands arriving from outside the core
//!
//! The voice layer's intent classifier emits two shapes: a move
//! (`color` plus a 1-indexed coordinate) and a game-control word. Both
//! also have a one-line text form so the console host and tests can
//! drive the controller the same way:
//!
//! ```text
//! black 8 8        white 9,8        b 3 12
//! restart  undo  undo1  resign  terminate
//! ai  hint  board  history  help
//! ```

use std::str::FromStr;

use thiserror::Error;

use crate::board::{BoardError, Coord, Stone};

/// A move in boundary form: 1-indexed `(col, row)`, not yet bounds-checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveCommand {
    pub color: Stone,
    pub col: i32,
    pub row: i32,
}

impl MoveCommand {
    pub fn new(color: Stone, col: i32, row: i32) -> Self {
        Self { color, col, row }
    }

    /// Convert to an internal coordinate, rejecting anything off the board.
    pub fn to_coord(&self) -> Result<Coord, BoardError> {
        Coord::from_one_based(self.col, self.row)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCommand {
    Restart,
    /// Take back the last two moves (one per side)
    Undo,
    UndoOne,
    Resign,
    Terminate,
}

/// Every line the text form understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(MoveCommand),
    Control(ControlCommand),
    /// Let the configured AI play its turn
    Ai,
    Hint,
    Board,
    History,
    Help,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
    #[error("expected a column and a row after '{0}'")]
    MissingCoordinate(String),
    #[error("'{0}' is not a number")]
    BadNumber(String),
    #[error("unexpected trailing input '{0}'")]
    TrailingInput(String),
}

fn parse_number(token: &str) -> Result<i32, ParseError> {
    token
        .parse::<i32>()
        .map_err(|_| ParseError::BadNumber(token.to_string()))
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        let mut tokens = lowered
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty());

        let head = tokens.next().ok_or(ParseError::Empty)?;

        let command = match head {
            "restart" | "reset" | "new" => Command::Control(ControlCommand::Restart),
            "undo" => Command::Control(ControlCommand::Undo),
            "undo1" | "undo-one" => Command::Control(ControlCommand::UndoOne),
            "resign" | "surrender" => Command::Control(ControlCommand::Resign),
            "terminate" | "quit" | "exit" => Command::Control(ControlCommand::Terminate),
            "ai" | "genmove" => Command::Ai,
            "hint" => Command::Hint,
            "board" | "show" => Command::Board,
            "history" | "log" => Command::History,
            "help" | "?" => Command::Help,
            other => {
                let color: Stone = other
                    .parse()
                    .map_err(|_| ParseError::UnknownCommand(other.to_string()))?;
                let col = tokens
                    .next()
                    .ok_or_else(|| ParseError::MissingCoordinate(other.to_string()))?;
                let row = tokens
                    .next()
                    .ok_or_else(|| ParseError::MissingCoordinate(other.to_string()))?;
                Command::Move(MoveCommand::new(color, parse_number(col)?, parse_number(row)?))
            }
        };

        match tokens.next() {
            Some(extra) => Err(ParseError::TrailingInput(extra.to_string())),
            None => Ok(command),
        }
    }
}
