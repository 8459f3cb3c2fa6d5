//! Off-thread AI search
//!
//! A job owns its own board copy and engine, so it can be moved to a
//! worker thread while the host keeps drawing. The generation tag lets
//! the controller throw away replies for positions that no longer exist.

use std::time::Instant;

use crate::board::{Board, Stone};
use crate::search::{CancelHandle, SearchEngine, SearchResult};

#[derive(Debug)]
pub struct AiJob {
    board: Board,
    side: Stone,
    engine: SearchEngine,
    generation: u64,
}

impl AiJob {
    pub(crate) fn new(board: Board, side: Stone, engine: SearchEngine, generation: u64) -> Self {
        Self { board, side, engine, generation }
    }

    /// Handle the host keeps to abort the search early.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.engine.cancel_handle()
    }

    #[inline]
    pub fn side(&self) -> Stone {
        self.side
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Run the search to completion (or until cancelled).
    pub fn run(self) -> AiReply {
        let start = Instant::now();
        let result = self.engine.search(&self.board, self.side);
        log::debug!(
            "AI job gen {} for {} finished in {:?} (aborted: {})",
            self.generation,
            self.side,
            start.elapsed(),
            result.aborted
        );
        AiReply {
            generation: self.generation,
            side: self.side,
            result,
        }
    }
}

/// A finished job, handed back to [`GameController::finish_ai_move`](super::GameController::finish_ai_move).
#[derive(Debug, Clone)]
pub struct AiReply {
    pub generation: u64,
    pub side: Stone,
    pub result: SearchResult,
}
