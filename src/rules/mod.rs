//! Game rules for standard Gomoku
//!
//! Five or more stones of one color in an unbroken line wins. Only the
//! stone that was just placed is ever checked.

pub mod win;

pub use win::{five_line_at, has_five_in_line, DIRECTIONS};
