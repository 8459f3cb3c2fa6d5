use thiserror::Error;

use crate::board::{BoardError, Stone};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error("it is {expected}'s turn, not {got}'s")]
    WrongTurn { expected: Stone, got: Stone },
    #[error("the game is over, restart to play again")]
    GameOver,
    #[error("no AI player is configured")]
    NoAiPlayer,
    #[error("it is not the AI's turn")]
    NotAiTurn,
    #[error("undo takes back 1 or 2 moves, not {0}")]
    InvalidUndoCount(usize),
    #[error("AI reply was computed for a position that has since changed")]
    StaleReply,
    #[error("no legal move available")]
    NoLegalMove,
}
