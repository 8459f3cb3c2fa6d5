//! Session state for the Gomoku GUI
//!
//! Wraps a [`GameController`] with the things only an interactive host
//! needs: a background AI thread, a move timer, a pending hint and a
//! status message.

use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use crate::board::{Coord, Stone};
use crate::game::{
    AiReply, ControlCommand, ControlResponse, GameConfig, GameController, GameError,
};
use crate::search::{CancelHandle, SearchConfig};

/// Game mode selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Player vs AI
    PvE { human_color: Stone },
    /// Player vs Player (hotseat)
    PvP,
}

impl Default for GameMode {
    fn default() -> Self {
        GameMode::PvE { human_color: Stone::Black }
    }
}

impl GameMode {
    pub fn from_config(config: &GameConfig) -> Self {
        match config.ai_color {
            Some(ai) => GameMode::PvE { human_color: ai.opponent() },
            None => GameMode::PvP,
        }
    }

    pub fn config(self, search: SearchConfig) -> GameConfig {
        match self {
            GameMode::PvE { human_color } => {
                GameConfig::against_ai(human_color.opponent()).with_search(search)
            }
            GameMode::PvP => GameConfig::two_player().with_search(search),
        }
    }
}

/// AI computation state
pub enum AiState {
    Idle,
    Thinking {
        receiver: Receiver<AiReply>,
        start_time: Instant,
        cancel: CancelHandle,
    },
}

/// Move timer for tracking thinking time
pub struct MoveTimer {
    pub start_time: Option<Instant>,
    pub ai_thinking_time: Option<Duration>,
}

impl Default for MoveTimer {
    fn default() -> Self {
        Self {
            start_time: Some(Instant::now()),
            ai_thinking_time: None,
        }
    }
}

impl MoveTimer {
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.map_or(Duration::ZERO, |t| t.elapsed())
    }

    pub fn set_ai_time(&mut self, duration: Duration) {
        self.ai_thinking_time = Some(duration);
    }
}

pub struct GameState {
    pub game: GameController,
    pub mode: GameMode,
    pub ai_state: AiState,
    pub move_timer: MoveTimer,
    pub suggested_move: Option<Coord>,
    pub message: Option<String>,
    pub quit_requested: bool,
    search: SearchConfig,
}

impl GameState {
    pub fn new(config: GameConfig) -> Self {
        Self {
            mode: GameMode::from_config(&config),
            search: config.search.clone(),
            game: GameController::new(config),
            ai_state: AiState::Idle,
            move_timer: MoveTimer::default(),
            suggested_move: None,
            message: None,
            quit_requested: false,
        }
    }

    /// Start over in a different mode, keeping the search settings.
    pub fn switch_mode(&mut self, mode: GameMode) {
        self.cancel_thinking();
        *self = Self::new(mode.config(self.search.clone()));
    }

    pub fn reset(&mut self) {
        self.apply_control(ControlCommand::Restart);
    }

    /// Whose stone goes down next, `None` once the game is over.
    pub fn current_turn(&self) -> Option<Stone> {
        if self.game.result().is_some() {
            return None;
        }
        self.game.side_to_move().ok()
    }

    pub fn is_human_turn(&self) -> bool {
        self.current_turn().is_some() && !self.game.is_ai_turn()
    }

    pub fn is_ai_thinking(&self) -> bool {
        matches!(self.ai_state, AiState::Thinking { .. })
    }

    pub fn try_place_stone(&mut self, coord: Coord) -> Result<(), String> {
        if self.is_ai_thinking() {
            return Err("AI is thinking".to_string());
        }
        let Some(color) = self.current_turn() else {
            return Err(GameError::GameOver.to_string());
        };
        if !self.is_human_turn() {
            return Err("Not your turn".to_string());
        }

        self.game
            .submit_move(coord, color)
            .map_err(|e| e.to_string())?;
        self.after_move();
        Ok(())
    }

    fn after_move(&mut self) {
        self.suggested_move = None;
        self.message = None;
        self.move_timer.start();
    }

    /// Hand the AI's turn to a worker thread.
    pub fn start_ai_thinking(&mut self) {
        if self.is_ai_thinking() || !self.game.is_ai_turn() {
            return;
        }
        let job = match self.game.begin_ai_move() {
            Ok(job) => job,
            Err(e) => {
                self.message = Some(e.to_string());
                return;
            }
        };
        let cancel = job.cancel_handle();
        let (tx, rx) = channel();

        thread::spawn(move || {
            // The receiver is gone when the session was reset meanwhile
            let _ = tx.send(job.run());
        });

        self.ai_state = AiState::Thinking {
            receiver: rx,
            start_time: Instant::now(),
            cancel,
        };
    }

    /// Apply the AI's reply if the worker is done.
    pub fn check_ai_result(&mut self) {
        let (reply, elapsed) = match &self.ai_state {
            AiState::Thinking { receiver, start_time, .. } => match receiver.try_recv() {
                Ok(reply) => (reply, start_time.elapsed()),
                Err(TryRecvError::Empty) => return,
                Err(TryRecvError::Disconnected) => {
                    self.ai_state = AiState::Idle;
                    self.message = Some("AI error".to_string());
                    return;
                }
            },
            AiState::Idle => return,
        };

        self.ai_state = AiState::Idle;
        self.move_timer.set_ai_time(elapsed);
        match self.game.finish_ai_move(reply) {
            Ok(_) => self.after_move(),
            Err(GameError::StaleReply) => log::debug!("dropped a stale AI reply"),
            Err(e) => self.message = Some(e.to_string()),
        }
    }

    fn cancel_thinking(&mut self) -> bool {
        match std::mem::replace(&mut self.ai_state, AiState::Idle) {
            AiState::Thinking { cancel, .. } => {
                cancel.cancel();
                true
            }
            AiState::Idle => false,
        }
    }

    pub fn ai_thinking_elapsed(&self) -> Option<Duration> {
        match &self.ai_state {
            AiState::Thinking { start_time, .. } => Some(start_time.elapsed()),
            AiState::Idle => None,
        }
    }

    pub fn request_suggestion(&mut self) {
        if self.is_ai_thinking() {
            return;
        }
        match self.game.recommend_move() {
            Ok(hint) => {
                self.suggested_move = Some(hint.coord());
                self.message = Some(format!("Hint: {hint}"));
            }
            Err(e) => self.message = Some(e.to_string()),
        }
    }

    /// Take back the last exchange. Against the AI that is two moves,
    /// unless the AI was still thinking about its reply.
    pub fn undo(&mut self) {
        let was_thinking = self.cancel_thinking();
        let command = match self.mode {
            GameMode::PvE { .. } if !was_thinking && self.game.board().len() >= 2 => {
                ControlCommand::Undo
            }
            _ => ControlCommand::UndoOne,
        };
        self.apply_control(command);
    }

    pub fn undo_one(&mut self) {
        self.cancel_thinking();
        self.apply_control(ControlCommand::UndoOne);
    }

    pub fn resign(&mut self) {
        self.cancel_thinking();
        self.apply_control(ControlCommand::Resign);
    }

    pub fn quit(&mut self) {
        self.apply_control(ControlCommand::Terminate);
    }

    fn apply_control(&mut self, command: ControlCommand) {
        if matches!(command, ControlCommand::Restart) {
            self.cancel_thinking();
        }
        match self.game.handle_control(command) {
            Ok(ControlResponse::Reset) => {
                self.move_timer = MoveTimer::default();
                self.suggested_move = None;
                self.message = None;
            }
            Ok(ControlResponse::Undone { .. }) => self.after_move(),
            Ok(ControlResponse::Resigned(result)) => self.message = Some(result.to_string()),
            Ok(ControlResponse::Terminate) => {
                self.cancel_thinking();
                self.quit_requested = true;
            }
            Err(e) => self.message = Some(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Phase;

    fn wait_for_ai(state: &mut GameState) {
        let deadline = Instant::now() + Duration::from_secs(30);
        while state.is_ai_thinking() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
            state.check_ai_result();
        }
    }

    #[test]
    fn test_mode_round_trip() {
        let config = GameMode::PvE { human_color: Stone::White }.config(SearchConfig::default());
        assert_eq!(config.ai_color, Some(Stone::Black));
        assert_eq!(GameMode::from_config(&config), GameMode::PvE { human_color: Stone::White });
        assert_eq!(GameMode::from_config(&GameConfig::two_player()), GameMode::PvP);
    }

    #[test]
    fn test_human_then_ai_on_worker() {
        let mut state = GameState::new(GameConfig::default());
        state.try_place_stone(Coord::new(7, 7)).unwrap();
        assert!(state.try_place_stone(Coord::new(0, 0)).is_err());

        state.start_ai_thinking();
        assert!(state.is_ai_thinking());
        wait_for_ai(&mut state);

        assert!(!state.is_ai_thinking());
        assert_eq!(state.game.board().len(), 2);
        assert_eq!(state.current_turn(), Some(Stone::Black));
    }

    #[test]
    fn test_undo_while_thinking_takes_back_one() {
        let mut state = GameState::new(GameConfig::default());
        state.try_place_stone(Coord::new(7, 7)).unwrap();
        state.start_ai_thinking();
        state.undo();

        assert!(!state.is_ai_thinking());
        assert_eq!(state.game.phase(), Phase::Empty);
        assert!(state.message.is_none());
    }

    #[test]
    fn test_pvp_hint_resign_quit() {
        let mut state = GameState::new(GameConfig::two_player());
        state.try_place_stone(Coord::new(7, 7)).unwrap();
        state.request_suggestion();
        let hint = state.suggested_move.expect("hint");
        assert!(state.game.board().is_empty_at(hint));

        state.resign();
        assert_eq!(state.game.phase(), Phase::Terminal);
        assert_eq!(state.current_turn(), None);

        state.quit();
        assert!(state.quit_requested);
    }
}
