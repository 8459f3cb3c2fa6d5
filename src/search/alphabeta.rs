//! Minimax search with alpha-beta pruning
//!
//! The AI color is always the maximizing side and the evaluator scores
//! every leaf from its perspective, so the other color simply minimizes
//! the same number.
//!
//! # Features
//!
//! - Fixed, configurable depth (clamped to [`MAX_SEARCH_DEPTH`])
//! - Incremental win detection on the move just made at each node
//! - Deterministic: candidates in board order, ties keep the first move
//! - Optional time limit and external cancellation
//!
//! # Example
//!
//! ```
//! use gomoku::board::{Board, Coord, Stone};
//! use gomoku::search::{SearchConfig, SearchEngine};
//!
//! let engine = SearchEngine::new(SearchConfig::default());
//! let mut board = Board::new();
//! board.place(Coord::new(7, 7), Stone::Black).unwrap();
//!
//! let result = engine.search(&board, Stone::White);
//! if let Some(best_move) = result.best_move {
//!     println!("White plays {best_move}");
//! }
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::board::{Board, Coord, Stone};
use crate::eval::{evaluate, CatalogueError, PatternCatalogue, PatternScore};
use crate::rules::has_five_in_line;

use super::movegen::candidates;

/// Score for a completed five, from the AI's point of view
pub const WIN_SCORE: i64 = PatternScore::FIVE;

/// Alpha-beta bounds. Far outside any reachable score, with headroom so
/// negation and small offsets can never overflow.
pub const SCORE_INF: i64 = i64::MAX / 4;

/// Hard cap on search depth
pub const MAX_SEARCH_DEPTH: u8 = 6;

pub const DEFAULT_DEPTH: u8 = 2;

/// Search configuration.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Plies to search, clamped to `1..=MAX_SEARCH_DEPTH`
    pub depth: u8,
    /// The maximizing side; leaves are scored from its perspective
    pub ai_color: Stone,
    /// Wall-clock budget; `None` searches to full depth
    pub time_limit: Option<Duration>,
    /// Only set through [`SearchConfig::with_catalogue`], which checks its ordering
    catalogue: PatternCatalogue,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            ai_color: Stone::White,
            time_limit: None,
            catalogue: PatternCatalogue::default(),
        }
    }
}

impl SearchConfig {
    #[must_use]
    pub fn with_depth(mut self, depth: u8) -> Self {
        self.depth = depth;
        self
    }

    #[must_use]
    pub fn with_ai_color(mut self, color: Stone) -> Self {
        self.ai_color = color;
        self
    }

    #[must_use]
    pub fn with_time_limit(mut self, limit: Option<Duration>) -> Self {
        self.time_limit = limit;
        self
    }

    /// Swap in another pattern table. Tables where a weaker shape outscores
    /// a stronger one are refused.
    pub fn with_catalogue(mut self, catalogue: PatternCatalogue) -> Result<Self, CatalogueError> {
        catalogue.validate()?;
        self.catalogue = catalogue;
        Ok(self)
    }

    #[inline]
    pub fn catalogue(&self) -> &PatternCatalogue {
        &self.catalogue
    }

    /// Depth actually searched
    #[inline]
    pub fn effective_depth(&self) -> u8 {
        self.depth.clamp(1, MAX_SEARCH_DEPTH)
    }
}

/// Shared stop flag. Clones observe the same flag, so a handle can be
/// given to another thread while the search runs.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Search statistics for diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes visited below the root
    pub nodes: u64,
    /// Leaves scored by the evaluator
    pub leaves: u64,
    /// Alpha-beta cutoffs
    pub cutoffs: u64,
}

/// Search result containing the best move found and associated statistics.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best move found; `None` only when there was no candidate at all
    pub best_move: Option<Coord>,
    /// Score of the best move from the AI's perspective
    pub score: i64,
    /// Depth searched
    pub depth: u8,
    pub stats: SearchStats,
    pub elapsed: Duration,
    /// The time limit or a cancel cut the search short
    pub aborted: bool,
}

/// Minimax/alpha-beta searcher.
#[derive(Debug, Clone, Default)]
pub struct SearchEngine {
    config: SearchConfig,
    cancel: CancelHandle,
}

impl SearchEngine {
    #[must_use]
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            cancel: CancelHandle::new(),
        }
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Handle that stops a running [`SearchEngine::search`] from another thread.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Search for the best move for `side_to_move`.
    ///
    /// The caller's board is never touched; the walk happens on a private copy.
    #[must_use]
    pub fn search(&self, board: &Board, side_to_move: Stone) -> SearchResult {
        let start = Instant::now();
        let depth = self.config.effective_depth();
        let mut walker = Walker {
            config: &self.config,
            cancel: &self.cancel,
            deadline: self.config.time_limit.map(|limit| start + limit),
            stats: SearchStats::default(),
            stopped: false,
        };

        let mut work_board = board.clone();
        let (best_move, score) = walker.search_root(&mut work_board, side_to_move, depth);

        let result = SearchResult {
            best_move,
            score,
            depth,
            stats: walker.stats,
            elapsed: start.elapsed(),
            aborted: walker.stopped,
        };
        debug!(
            "search {} depth {}: best {:?} score {} nodes {} cutoffs {} in {:?}{}",
            side_to_move,
            depth,
            result.best_move,
            result.score,
            result.stats.nodes,
            result.stats.cutoffs,
            result.elapsed,
            if result.aborted { " (aborted)" } else { "" }
        );
        result
    }

    /// Best move with the center fallback applied.
    #[must_use]
    pub fn best_move(&self, board: &Board, side_to_move: Stone) -> Coord {
        self.search(board, side_to_move).best_move.unwrap_or_else(|| {
            warn!("no candidate moves, falling back to center");
            Coord::center()
        })
    }
}

/// Per-search state
struct Walker<'a> {
    config: &'a SearchConfig,
    cancel: &'a CancelHandle,
    deadline: Option<Instant>,
    stats: SearchStats,
    stopped: bool,
}

impl Walker<'_> {
    /// Check the cancel flag and the deadline; latches once tripped.
    fn should_stop(&mut self) -> bool {
        if self.stopped {
            return true;
        }
        let timed_out = self.deadline.is_some_and(|d| Instant::now() >= d);
        if timed_out || self.cancel.is_cancelled() {
            self.stopped = true;
        }
        self.stopped
    }

    #[inline]
    fn leaf(&mut self, board: &Board) -> i64 {
        self.stats.leaves += 1;
        evaluate(board, self.config.ai_color, &self.config.catalogue)
    }

    fn search_root(&mut self, board: &mut Board, side: Stone, depth: u8) -> (Option<Coord>, i64) {
        let moves = candidates(board);
        if moves.is_empty() {
            return (None, self.leaf(board));
        }

        let maximizing = side == self.config.ai_color;
        let mut alpha = -SCORE_INF;
        let mut beta = SCORE_INF;
        let mut best_score = if maximizing { -SCORE_INF } else { SCORE_INF };
        let mut best_move = None;

        for mov in moves {
            if best_move.is_some() && self.should_stop() {
                break;
            }
            if board.place(mov, side).is_err() {
                continue;
            }
            let score = self.minimax(board, side.opponent(), depth - 1, alpha, beta, mov);
            board.pop();

            if self.stopped {
                // A cut-off subtree is only trusted when nothing else finished
                if best_move.is_none() {
                    best_move = Some(mov);
                    best_score = score;
                }
                break;
            }

            if maximizing {
                if score > best_score {
                    best_score = score;
                    best_move = Some(mov);
                }
                alpha = alpha.max(best_score);
            } else {
                if score < best_score {
                    best_score = score;
                    best_move = Some(mov);
                }
                beta = beta.min(best_score);
            }
        }

        (best_move, best_score)
    }

    fn minimax(
        &mut self,
        board: &mut Board,
        to_move: Stone,
        depth: u8,
        mut alpha: i64,
        mut beta: i64,
        last_move: Coord,
    ) -> i64 {
        self.stats.nodes += 1;

        // Terminal: only the stone just placed can have completed a five
        if has_five_in_line(board, last_move) {
            return if board.get(last_move) == Some(self.config.ai_color) {
                WIN_SCORE
            } else {
                -WIN_SCORE
            };
        }

        if depth == 0 || self.should_stop() {
            return self.leaf(board);
        }

        let moves = candidates(board);
        if moves.is_empty() {
            return self.leaf(board);
        }

        let maximizing = to_move == self.config.ai_color;
        let mut best = if maximizing { -SCORE_INF } else { SCORE_INF };

        for mov in moves {
            if board.place(mov, to_move).is_err() {
                continue;
            }
            let score = self.minimax(board, to_move.opponent(), depth - 1, alpha, beta, mov);
            board.pop();

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }

            if beta <= alpha {
                self.stats.cutoffs += 1;
                break;
            }
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::{Pattern, PatternKind};

    fn board_with(black: &[(u8, u8)], white: &[(u8, u8)]) -> Board {
        let mut board = Board::new();
        for &(col, row) in black {
            board.place(Coord::new(col, row), Stone::Black).unwrap();
        }
        for &(col, row) in white {
            board.place(Coord::new(col, row), Stone::White).unwrap();
        }
        board
    }

    #[test]
    fn test_search_empty_board() {
        let engine = SearchEngine::new(SearchConfig::default());
        let result = engine.search(&Board::new(), Stone::Black);
        assert_eq!(result.best_move, Some(Coord::new(7, 7)));
        assert!(!result.aborted);
    }

    #[test]
    fn test_search_finds_winning_move() {
        let engine = SearchEngine::new(SearchConfig::default());
        let board = board_with(
            &[(0, 0), (14, 0), (7, 0), (0, 14), (14, 14)],
            &[(3, 7), (4, 7), (5, 7), (6, 7)],
        );

        let result = engine.search(&board, Stone::White);
        // Both ends win; the lower board index comes first
        assert_eq!(result.best_move, Some(Coord::new(2, 7)));
        assert_eq!(result.score, WIN_SCORE);
    }

    #[test]
    fn test_search_blocks_opponent_win() {
        let engine = SearchEngine::new(SearchConfig::default());
        let board = board_with(
            &[(3, 7), (4, 7), (5, 7), (6, 7)],
            &[(2, 7), (0, 14), (14, 14)],
        );

        let result = engine.search(&board, Stone::White);
        assert_eq!(result.best_move, Some(Coord::new(7, 7)));
        assert!(result.score > -WIN_SCORE);
    }

    #[test]
    fn test_minimizing_side_takes_its_win() {
        let engine = SearchEngine::new(SearchConfig::default());
        let board = board_with(
            &[(3, 7), (4, 7), (5, 7), (6, 7)],
            &[(2, 7), (0, 14), (14, 14), (14, 0)],
        );

        let result = engine.search(&board, Stone::Black);
        assert_eq!(result.best_move, Some(Coord::new(7, 7)));
        assert_eq!(result.score, -WIN_SCORE);
    }

    #[test]
    fn test_ai_color_is_configurable() {
        let engine = SearchEngine::new(SearchConfig::default().with_ai_color(Stone::Black));
        let board = board_with(
            &[(3, 7), (4, 7), (5, 7), (6, 7)],
            &[(2, 7), (0, 14), (14, 14), (14, 0)],
        );

        let result = engine.search(&board, Stone::Black);
        assert_eq!(result.best_move, Some(Coord::new(7, 7)));
        assert_eq!(result.score, WIN_SCORE);
    }

    #[test]
    fn test_search_is_deterministic() {
        let engine = SearchEngine::new(SearchConfig::default());
        let board = board_with(&[(7, 7), (8, 8)], &[(7, 8)]);

        let a = engine.search(&board, Stone::White);
        let b = engine.search(&board, Stone::White);
        assert_eq!(a.best_move, b.best_move);
        assert_eq!(a.score, b.score);
        assert_eq!(a.stats, b.stats);
    }

    #[test]
    fn test_search_does_not_touch_board() {
        let engine = SearchEngine::new(SearchConfig::default());
        let board = board_with(&[(7, 7), (8, 8)], &[(7, 8)]);
        let before = board.clone();
        let _ = engine.search(&board, Stone::White);
        assert_eq!(board, before);
    }

    #[test]
    fn test_depth_is_clamped() {
        assert_eq!(SearchConfig::default().with_depth(0).effective_depth(), 1);
        assert_eq!(SearchConfig::default().with_depth(40).effective_depth(), MAX_SEARCH_DEPTH);

        let engine = SearchEngine::new(SearchConfig::default().with_depth(0));
        let board = board_with(&[(7, 7)], &[]);
        let result = engine.search(&board, Stone::White);
        assert_eq!(result.depth, 1);
        assert!(result.best_move.is_some());
    }

    /// Plain minimax over the same candidates, no pruning.
    fn full_minimax(board: &mut Board, to_move: Stone, depth: u8, last: Coord, config: &SearchConfig) -> i64 {
        if has_five_in_line(board, last) {
            return if board.get(last) == Some(config.ai_color) { WIN_SCORE } else { -WIN_SCORE };
        }
        let moves = candidates(board);
        if depth == 0 || moves.is_empty() {
            return evaluate(board, config.ai_color, config.catalogue());
        }
        let maximizing = to_move == config.ai_color;
        let scores = moves.into_iter().map(|mov| {
            board.place(mov, to_move).unwrap();
            let score = full_minimax(board, to_move.opponent(), depth - 1, mov, config);
            board.pop();
            score
        });
        if maximizing {
            scores.max().unwrap()
        } else {
            scores.min().unwrap()
        }
    }

    /// Root of [`full_minimax`]; strict improvement keeps the first best move.
    fn full_minimax_root(board: &Board, side: Stone, config: &SearchConfig) -> (Option<Coord>, i64) {
        let mut board = board.clone();
        let maximizing = side == config.ai_color;
        let mut best: Option<(Coord, i64)> = None;
        for mov in candidates(&board) {
            board.place(mov, side).unwrap();
            let score = full_minimax(&mut board, side.opponent(), config.effective_depth() - 1, mov, config);
            board.pop();
            let better = match best {
                None => true,
                Some((_, b)) if maximizing => score > b,
                Some((_, b)) => score < b,
            };
            if better {
                best = Some((mov, score));
            }
        }
        (best.map(|(m, _)| m), best.map_or(0, |(_, s)| s))
    }

    #[test]
    fn test_pruning_matches_full_minimax() {
        let positions: [(&[(u8, u8)], &[(u8, u8)], Stone, u8); 9] = [
            (&[(7, 7)], &[], Stone::White, 2),
            (&[(7, 7)], &[(8, 8)], Stone::Black, 2),
            (&[(7, 7), (8, 8)], &[(7, 8)], Stone::White, 2),
            (&[(5, 7), (6, 7), (7, 7)], &[(0, 0), (14, 14)], Stone::White, 2),
            (&[(3, 3), (4, 4), (5, 5)], &[(4, 3), (5, 4)], Stone::Black, 2),
            (&[(10, 2), (11, 3), (9, 3)], &[(10, 3), (12, 4), (8, 2)], Stone::Black, 2),
            (&[(0, 0), (1, 1)], &[(0, 1)], Stone::White, 2),
            (&[(14, 14)], &[], Stone::White, 3),
            (&[(0, 0)], &[(1, 0)], Stone::Black, 3),
        ];

        for (black, white, side, depth) in positions {
            let board = board_with(black, white);
            for ai in [Stone::Black, Stone::White] {
                let config = SearchConfig::default().with_depth(depth).with_ai_color(ai);
                let pruned = SearchEngine::new(config.clone()).search(&board, side);
                let (best_move, score) = full_minimax_root(&board, side, &config);
                assert_eq!(
                    (pruned.best_move, pruned.score),
                    (best_move, score),
                    "depth {depth}, ai {ai}, {side} to move on\n{board}"
                );
            }
        }
    }

    #[test]
    fn test_inverted_catalogue_is_refused() {
        let inverted = PatternCatalogue::new(vec![
            Pattern::parse("011110", PatternKind::OpenFour, 10).unwrap(),
            Pattern::parse("0011100", PatternKind::OpenThree, 500_000).unwrap(),
        ]);
        let err = SearchConfig::default().with_catalogue(inverted).unwrap_err();
        assert!(matches!(err, CatalogueError::OutOfOrder { .. }));
    }

    #[test]
    fn test_custom_catalogue_drives_search() {
        // Only fives score, so every quiet line is worth the same and the
        // first candidate in board order is kept
        let fives_only = PatternCatalogue::new(vec![
            Pattern::parse("11111", PatternKind::Five, WIN_SCORE).unwrap(),
        ]);
        let config = SearchConfig::default().with_catalogue(fives_only).unwrap();
        let engine = SearchEngine::new(config);
        let board = board_with(&[(7, 7)], &[]);

        let result = engine.search(&board, Stone::White);
        assert_eq!(result.best_move, Some(Coord::new(5, 5)));
        assert_eq!(result.score, 0);
        assert_eq!(engine.config().catalogue().patterns().len(), 1);
    }

    #[test]
    fn test_pruning_cuts_nodes() {
        let engine = SearchEngine::new(SearchConfig::default());
        let board = board_with(&[(7, 7), (8, 8)], &[(7, 8)]);
        let result = engine.search(&board, Stone::White);
        assert!(result.stats.cutoffs > 0);
    }

    #[test]
    fn test_cancelled_search_still_returns_a_move() {
        let engine = SearchEngine::new(SearchConfig::default());
        engine.cancel_handle().cancel();
        let board = board_with(&[(7, 7), (8, 8)], &[(7, 8)]);

        let result = engine.search(&board, Stone::White);
        assert!(result.aborted);
        assert!(result.best_move.is_some());
    }

    #[test]
    fn test_zero_time_limit_aborts() {
        let config = SearchConfig::default().with_time_limit(Some(Duration::ZERO));
        let engine = SearchEngine::new(config);
        let board = board_with(&[(7, 7), (8, 8)], &[(7, 8)]);

        let result = engine.search(&board, Stone::White);
        assert!(result.aborted);
        assert!(result.best_move.is_some());
    }

    #[test]
    fn test_full_board_has_no_move() {
        let mut board = Board::new();
        for idx in 0..crate::board::TOTAL_CELLS {
            let stone = if idx % 2 == 0 { Stone::Black } else { Stone::White };
            board.place(Coord::from_index(idx), stone).unwrap();
        }
        let engine = SearchEngine::new(SearchConfig::default());
        assert_eq!(engine.search(&board, Stone::White).best_move, None);
        assert_eq!(engine.best_move(&board, Stone::White), Coord::center());
    }
}
