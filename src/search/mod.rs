//! Search module for Gomoku AI
//!
//! Contains:
//! - Candidate move generation near existing stones
//! - Minimax search with alpha-beta pruning

pub mod alphabeta;
pub mod movegen;

pub use alphabeta::{
    CancelHandle, SearchConfig, SearchEngine, SearchResult, SearchStats, DEFAULT_DEPTH,
    MAX_SEARCH_DEPTH, SCORE_INF, WIN_SCORE,
};
pub use movegen::{candidates, CANDIDATE_RADIUS};
