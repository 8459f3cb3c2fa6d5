//! Game control: turn order, game phases, commands and AI turns.

pub mod command;
pub mod controller;
pub mod error;
pub mod job;
pub mod outcome;

pub use command::{Command, ControlCommand, MoveCommand, ParseError};
pub use controller::{ControlResponse, GameConfig, GameController, LoggedMove, Phase};
pub use error::GameError;
pub use job::{AiJob, AiReply};
pub use outcome::{AiMove, GameResult, MoveOutcome, MoveRecommendation, WinType};
