//! Position evaluation
//!
//! - [`patterns`]: the configurable pattern catalogue and its default values
//! - [`heuristic`]: line materialization and the zero-sum board score

pub mod heuristic;
pub mod patterns;

pub use heuristic::{board_lines, evaluate};
pub use patterns::{CatalogueError, Cell, Pattern, PatternCatalogue, PatternKind, PatternScore};
