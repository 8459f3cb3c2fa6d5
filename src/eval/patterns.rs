//! Pattern catalogue for line evaluation
//!
//! Each pattern is a short run of cells read along a line, written with
//! `1` for the perspective color, `0` for empty and `2` for the opponent.
//! Only the relative order of the values matters to the search:
//! five > open four > blocked four > open three > two.

use std::fmt;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogueError {
    #[error("pattern '{0}' may only contain 0, 1 and 2")]
    BadSymbol(String),
    #[error("empty pattern")]
    EmptyPattern,
    #[error("pattern {stronger} ({stronger_value}) must outscore {weaker} ({weaker_value})")]
    OutOfOrder {
        stronger: String,
        stronger_value: i64,
        weaker: String,
        weaker_value: i64,
    },
}

/// Pattern scores for the default catalogue
pub struct PatternScore;

impl PatternScore {
    /// Five in a row - immediate win
    pub const FIVE: i64 = 1_000_000;
    /// Open four: `011110`
    pub const OPEN_FOUR: i64 = 300_000;
    /// Four blocked on one side: `011112` / `211110`
    pub const BLOCKED_FOUR: i64 = 10_000;
    /// Open three: `0011100`
    pub const OPEN_THREE: i64 = 8_000;
    /// Broken two: `01100` / `00110`
    pub const TWO: i64 = 1_000;
    /// Split four with a gap: `11011`
    pub const SPLIT_FOUR: i64 = 1_000;
}

/// One cell of a line as seen from the perspective color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Own,
    Empty,
    Opponent,
}

impl Cell {
    fn from_symbol(symbol: char) -> Option<Cell> {
        match symbol {
            '1' => Some(Cell::Own),
            '0' => Some(Cell::Empty),
            '2' => Some(Cell::Opponent),
            _ => None,
        }
    }

    fn symbol(self) -> char {
        match self {
            Cell::Own => '1',
            Cell::Empty => '0',
            Cell::Opponent => '2',
        }
    }
}

/// What a pattern means, used for ordering checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    Two,
    SplitFour,
    OpenThree,
    BlockedFour,
    OpenFour,
    Five,
}

impl PatternKind {
    /// Strength tier. A split four is scored like a two.
    pub fn rank(self) -> u8 {
        match self {
            PatternKind::Two | PatternKind::SplitFour => 0,
            PatternKind::OpenThree => 1,
            PatternKind::BlockedFour => 2,
            PatternKind::OpenFour => 3,
            PatternKind::Five => 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    cells: Vec<Cell>,
    pub kind: PatternKind,
    pub value: i64,
}

impl Pattern {
    /// Build from a `0`/`1`/`2` string.
    pub fn parse(symbols: &str, kind: PatternKind, value: i64) -> Result<Self, CatalogueError> {
        let cells = symbols
            .chars()
            .map(Cell::from_symbol)
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| CatalogueError::BadSymbol(symbols.to_string()))?;
        if cells.is_empty() {
            return Err(CatalogueError::EmptyPattern);
        }
        Ok(Self { cells, kind, value })
    }

    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Non-overlapping occurrences scanning left to right, like a substring count.
    pub fn count_in(&self, line: &[Cell]) -> usize {
        let width = self.cells.len();
        let mut count = 0;
        let mut i = 0;
        while i + width <= line.len() {
            if line[i..i + width] == self.cells[..] {
                count += 1;
                i += width;
            } else {
                i += 1;
            }
        }
        count
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cell in &self.cells {
            write!(f, "{}", cell.symbol())?;
        }
        Ok(())
    }
}

/// The set of patterns the evaluator searches for on every line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternCatalogue {
    patterns: Vec<Pattern>,
}

impl PatternCatalogue {
    pub fn new(patterns: Vec<Pattern>) -> Self {
        Self { patterns }
    }

    #[inline]
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// Sum of `count × value` over every pattern for one line.
    pub fn score_line(&self, line: &[Cell]) -> i64 {
        self.patterns
            .iter()
            .map(|p| p.count_in(line) as i64 * p.value)
            .sum()
    }

    /// Check that a stronger kind is always worth strictly more than a weaker kind.
    pub fn validate(&self) -> Result<(), CatalogueError> {
        for a in &self.patterns {
            for b in &self.patterns {
                if a.kind.rank() > b.kind.rank() && a.value <= b.value {
                    return Err(CatalogueError::OutOfOrder {
                        stronger: a.to_string(),
                        stronger_value: a.value,
                        weaker: b.to_string(),
                        weaker_value: b.value,
                    });
                }
            }
        }
        Ok(())
    }
}

impl Default for PatternCatalogue {
    fn default() -> Self {
        use Cell::{Empty as E, Opponent as O, Own as X};

        let table: [(&[Cell], PatternKind, i64); 8] = [
            (&[X, X, X, X, X], PatternKind::Five, PatternScore::FIVE),
            (&[E, X, X, X, X, E], PatternKind::OpenFour, PatternScore::OPEN_FOUR),
            (&[E, X, X, X, X, O], PatternKind::BlockedFour, PatternScore::BLOCKED_FOUR),
            (&[O, X, X, X, X, E], PatternKind::BlockedFour, PatternScore::BLOCKED_FOUR),
            (&[E, E, X, X, X, E, E], PatternKind::OpenThree, PatternScore::OPEN_THREE),
            (&[E, X, X, E, E], PatternKind::Two, PatternScore::TWO),
            (&[E, E, X, X, E], PatternKind::Two, PatternScore::TWO),
            (&[X, X, E, X, X], PatternKind::SplitFour, PatternScore::SPLIT_FOUR),
        ];
        let patterns = table
            .iter()
            .map(|&(cells, kind, value)| Pattern { cells: cells.to_vec(), kind, value })
            .collect();
        Self { patterns }
    }
}
