//! Gomoku decision core
//!
//! Freestyle Gomoku on a fixed 15x15 board: five or more in a row wins,
//! Black moves first, no capture or forbidden-move rules. The core turns
//! move and control commands (color plus 1-indexed coordinate, restart,
//! undo, terminate) into board updates, and answers with the AI's move
//! from a depth-limited minimax search.
//!
//! # Architecture
//!
//! - [`board`]: 15x15 board, stones, coordinates and move history
//! - [`rules`]: five-in-a-row detection from the last stone
//! - [`eval`]: line pattern catalogue and the zero-sum evaluator
//! - [`search`]: candidate generation and alpha-beta minimax
//! - [`game`]: the controller state machine and its commands
//! - [`console`] / [`ui`]: text and egui hosts
//!
//! # Quick Start
//!
//! ```
//! use gomoku::game::{GameConfig, GameController, MoveCommand};
//! use gomoku::Stone;
//!
//! let mut game = GameController::new(GameConfig::against_ai(Stone::White));
//! game.apply_command(&MoveCommand::new(Stone::Black, 8, 8)).unwrap();
//!
//! let reply = game.request_ai_move().unwrap();
//! println!("AI plays {}", reply.recommendation);
//! assert_eq!(game.board().len(), 2);
//! ```

pub mod board;
pub mod console;
pub mod eval;
pub mod game;
pub mod rules;
pub mod search;
pub mod ui;

pub use board::{Board, Coord, Stone, BOARD_SIZE};
pub use game::{GameConfig, GameController, GameError};
