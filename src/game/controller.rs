//! Game controller
//!
//! Owns the one authoritative board and decides what is allowed: whose
//! turn it is, whether the game is over, when the AI may move. Hosts
//! (the GUI, the console loop, the voice pipeline) hold a controller
//! value and feed it commands; nothing here is global.

use log::{error, info, warn};

use crate::board::{Board, Coord, Stone};
use crate::rules::five_line_at;
use crate::search::{SearchConfig, SearchEngine, SearchResult};

use super::command::{ControlCommand, MoveCommand};
use super::error::GameError;
use super::job::{AiJob, AiReply};
use super::outcome::{AiMove, GameResult, MoveOutcome, MoveRecommendation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No stones on the board
    Empty,
    InProgress,
    /// A five, a resignation or a full board. Only undo/restart leave it.
    Terminal,
}

/// Who plays and how hard the AI thinks.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// `None` means two humans share the board
    pub ai_color: Option<Stone>,
    pub search: SearchConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::against_ai(Stone::White)
    }
}

impl GameConfig {
    pub fn against_ai(ai_color: Stone) -> Self {
        Self {
            ai_color: Some(ai_color),
            search: SearchConfig::default().with_ai_color(ai_color),
        }
    }

    pub fn two_player() -> Self {
        Self {
            ai_color: None,
            search: SearchConfig::default(),
        }
    }

    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }
}

/// What a control command did, for the host to react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlResponse {
    Reset,
    Undone { count: usize },
    Resigned(GameResult),
    /// The host should end the session
    Terminate,
}

/// One row of the numbered move log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoggedMove {
    /// 1-based move number
    pub number: usize,
    pub coord: Coord,
    pub color: Stone,
}

#[derive(Debug, Clone)]
pub struct GameController {
    board: Board,
    config: GameConfig,
    result: Option<GameResult>,
    /// Bumped on every state change so stale AI replies can be detected
    generation: u64,
    last_search: Option<SearchResult>,
}

impl Default for GameController {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl GameController {
    pub fn new(config: GameConfig) -> Self {
        Self {
            board: Board::new(),
            config,
            result: None,
            generation: 0,
            last_search: None,
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[inline]
    pub fn ai_color(&self) -> Option<Stone> {
        self.config.ai_color
    }

    #[inline]
    pub fn result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Stats of the most recent AI search that was applied.
    #[inline]
    pub fn last_search(&self) -> Option<&SearchResult> {
        self.last_search.as_ref()
    }

    pub fn phase(&self) -> Phase {
        if self.result.is_some() {
            Phase::Terminal
        } else if self.board.is_empty() {
            Phase::Empty
        } else {
            Phase::InProgress
        }
    }

    pub fn side_to_move(&self) -> Result<Stone, GameError> {
        self.board.side_to_move().map_err(|e| {
            error!("board invariant broken: {e}");
            GameError::from(e)
        })
    }

    /// Is the configured AI due to move right now?
    pub fn is_ai_turn(&self) -> bool {
        self.result.is_none()
            && self.config.ai_color.is_some()
            && self.side_to_move().ok() == self.config.ai_color
    }

    /// Numbered moves in play order.
    pub fn move_log(&self) -> Vec<LoggedMove> {
        self.board
            .occupied()
            .enumerate()
            .map(|(i, (coord, color))| LoggedMove { number: i + 1, coord, color })
            .collect()
    }

    /// Place `color` at `coord`.
    ///
    /// On any error the board, phase and result are exactly as before.
    pub fn submit_move(&mut self, coord: Coord, color: Stone) -> Result<MoveOutcome, GameError> {
        let outcome = self.try_submit(coord, color);
        if let Err(e) = &outcome {
            warn!("rejected {color} at {coord}: {e}");
        }
        outcome
    }

    fn try_submit(&mut self, coord: Coord, color: Stone) -> Result<MoveOutcome, GameError> {
        if self.result.is_some() {
            return Err(GameError::GameOver);
        }
        let expected = self.side_to_move()?;
        if color != expected {
            return Err(GameError::WrongTurn { expected, got: color });
        }
        self.board.place(coord, color)?;
        self.generation += 1;
        info!("move {}: {color} at {coord}", self.board.len());

        let result = self.check_result(coord, color);
        if let Some(result) = &result {
            info!("game over: {result}");
        }
        Ok(MoveOutcome { coord, color, result })
    }

    fn check_result(&mut self, coord: Coord, color: Stone) -> Option<GameResult> {
        let result = if let Some(line) = five_line_at(&self.board, coord) {
            Some(GameResult::five(color, line, coord))
        } else if self.board.is_full() {
            Some(GameResult::draw(coord))
        } else {
            None
        };
        self.result.clone_from(&result);
        result
    }

    /// Apply a move given in the 1-indexed boundary form.
    pub fn apply_command(&mut self, command: &MoveCommand) -> Result<MoveOutcome, GameError> {
        let coord = command.to_coord().map_err(|e| {
            warn!("rejected {} {} {}: {e}", command.color, command.col, command.row);
            GameError::from(e)
        })?;
        self.submit_move(coord, command.color)
    }

    /// Snapshot the position into a job the host can run on another thread.
    pub fn begin_ai_move(&self) -> Result<AiJob, GameError> {
        let ai = self.config.ai_color.ok_or(GameError::NoAiPlayer)?;
        if self.result.is_some() {
            return Err(GameError::GameOver);
        }
        if self.side_to_move()? != ai {
            return Err(GameError::NotAiTurn);
        }
        let engine = SearchEngine::new(self.config.search.clone().with_ai_color(ai));
        Ok(AiJob::new(self.board.clone(), ai, engine, self.generation))
    }

    /// Apply a finished job. Replies for an older position are refused.
    pub fn finish_ai_move(&mut self, reply: AiReply) -> Result<AiMove, GameError> {
        if reply.generation != self.generation {
            warn!(
                "discarding AI reply for generation {} (now {})",
                reply.generation, self.generation
            );
            return Err(GameError::StaleReply);
        }
        let coord = reply.result.best_move.unwrap_or_else(|| {
            warn!("search found no candidate, falling back to center");
            Coord::center()
        });
        if !self.board.is_empty_at(coord) {
            return Err(GameError::NoLegalMove);
        }

        let outcome = self.submit_move(coord, reply.side)?;
        self.last_search = Some(reply.result.clone());
        Ok(AiMove {
            outcome,
            recommendation: MoveRecommendation::new(reply.side, coord),
            search: reply.result,
        })
    }

    /// Let the AI play its turn on the calling thread.
    pub fn request_ai_move(&mut self) -> Result<AiMove, GameError> {
        let job = self.begin_ai_move()?;
        let reply = job.run();
        self.finish_ai_move(reply)
    }

    /// Best move for whoever is to move. Nothing is changed.
    pub fn recommend_move(&self) -> Result<MoveRecommendation, GameError> {
        if self.result.is_some() {
            return Err(GameError::GameOver);
        }
        let side = self.side_to_move()?;
        let engine = SearchEngine::new(self.config.search.clone().with_ai_color(side));
        let coord = engine.best_move(&self.board, side);
        Ok(MoveRecommendation::new(side, coord))
    }

    /// Take back one or two moves. Any game result is cleared.
    pub fn undo_moves(&mut self, count: usize) -> Result<(), GameError> {
        if !(1..=2).contains(&count) {
            return Err(GameError::InvalidUndoCount(count));
        }
        self.board.undo(count).map_err(|e| {
            warn!("undo refused: {e}");
            GameError::from(e)
        })?;
        self.result = None;
        self.generation += 1;
        info!("undid {count} move(s), {} on the board", self.board.len());
        Ok(())
    }

    pub fn reset(&mut self) {
        self.board.clear();
        self.result = None;
        self.last_search = None;
        self.generation += 1;
        info!("game reset");
    }

    /// The side to move gives up; the other side wins.
    pub fn resign(&mut self) -> Result<GameResult, GameError> {
        if self.result.is_some() {
            return Err(GameError::GameOver);
        }
        let loser = self.side_to_move()?;
        let result = GameResult::resignation(loser, self.board.last_move());
        self.result = Some(result.clone());
        self.generation += 1;
        info!("game over: {result}");
        Ok(result)
    }

    pub fn handle_control(&mut self, command: ControlCommand) -> Result<ControlResponse, GameError> {
        match command {
            ControlCommand::Restart => {
                self.reset();
                Ok(ControlResponse::Reset)
            }
            ControlCommand::Undo => self.undo_moves(2).map(|()| ControlResponse::Undone { count: 2 }),
            ControlCommand::UndoOne => {
                self.undo_moves(1).map(|()| ControlResponse::Undone { count: 1 })
            }
            ControlCommand::Resign => self.resign().map(ControlResponse::Resigned),
            ControlCommand::Terminate => {
                info!("terminate requested");
                Ok(ControlResponse::Terminate)
            }
        }
    }
}
