//! Heuristic evaluation function for Gomoku board positions
//!
//! Every row, column and diagonal of the board is read as a line of
//! [`Cell`]s and matched against the [`PatternCatalogue`]. The score is
//! zero-sum: a position is good for one color exactly as much as it is
//! bad for the other.

use std::sync::OnceLock;

use crate::board::{Board, Coord, Stone, BOARD_SIZE};

use super::patterns::{Cell, PatternCatalogue};

/// Lines shorter than this can never hold a five-cell pattern
const MIN_LINE_LEN: usize = 5;

/// Every line of the board: rows, columns, ↘ diagonals and ↗ diagonals.
pub fn board_lines() -> &'static [Vec<Coord>] {
    static LINES: OnceLock<Vec<Vec<Coord>>> = OnceLock::new();
    LINES.get_or_init(build_lines)
}

fn build_lines() -> Vec<Vec<Coord>> {
    let n = BOARD_SIZE as i32;
    let mut lines = Vec::new();

    for row in 0..n {
        lines.push((0..n).filter_map(|col| Coord::checked(col, row)).collect());
    }
    for col in 0..n {
        lines.push((0..n).filter_map(|row| Coord::checked(col, row)).collect());
    }
    // ↘ diagonals, keyed by col - row
    for diff in -(n - 1)..n {
        let line: Vec<Coord> = (0..n).filter_map(|row| Coord::checked(row + diff, row)).collect();
        lines.push(line);
    }
    // ↗ diagonals, keyed by col + row
    for sum in 0..(2 * n - 1) {
        let line: Vec<Coord> = (0..n).filter_map(|row| Coord::checked(sum - row, row)).collect();
        lines.push(line);
    }

    lines.retain(|line| line.len() >= MIN_LINE_LEN);
    lines
}

/// Evaluate the board from the perspective of the given color.
///
/// Positive values favour `color`, negative values favour its opponent,
/// and `evaluate(b, Black, c) == -evaluate(b, White, c)` always holds.
#[must_use]
pub fn evaluate(board: &Board, color: Stone, catalogue: &PatternCatalogue) -> i64 {
    let mut own = Vec::with_capacity(BOARD_SIZE);
    let mut theirs = Vec::with_capacity(BOARD_SIZE);
    let mut score = 0i64;

    for line in board_lines() {
        own.clear();
        theirs.clear();
        for &coord in line {
            let (mine, other) = match board.get(coord) {
                None => (Cell::Empty, Cell::Empty),
                Some(s) if s == color => (Cell::Own, Cell::Opponent),
                Some(_) => (Cell::Opponent, Cell::Own),
            };
            own.push(mine);
            theirs.push(other);
        }
        score += catalogue.score_line(&own) - catalogue.score_line(&theirs);
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::PatternScore;

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
    fn test_line_families() {
        let lines = board_lines();
        // 15 rows + 15 cols + 2 * 21 diagonals of length >= 5
        assert_eq!(lines.len(), 15 + 15 + 21 + 21);
        assert!(lines.iter().all(|l| l.len() >= 5 && l.len() <= 15));
    }

    #[test]
    fn test_evaluate_empty_board() {
        let board = Board::new();
        let catalogue = PatternCatalogue::default();
        assert_eq!(evaluate(&board, Stone::Black, &catalogue), 0);
        assert_eq!(evaluate(&board, Stone::White, &catalogue), 0);
    }

    #[test]
    fn test_evaluate_is_zero_sum() {
        let board = board_with(&[(7, 7), (8, 7), (9, 7), (6, 6)], &[(7, 8), (8, 8), (2, 2)]);
        let catalogue = PatternCatalogue::default();
        let black = evaluate(&board, Stone::Black, &catalogue);
        let white = evaluate(&board, Stone::White, &catalogue);
        assert_eq!(black, -white);
        assert!(black > 0, "black's open three should outweigh, got {black}");
    }

    #[test]
    fn test_open_four_beats_open_three() {
        let catalogue = PatternCatalogue::default();
        let three = board_with(&[(5, 7), (6, 7), (7, 7)], &[]);
        let four = board_with(&[(5, 7), (6, 7), (7, 7), (8, 7)], &[]);

        let three_score = evaluate(&three, Stone::Black, &catalogue);
        let four_score = evaluate(&four, Stone::Black, &catalogue);
        assert!(three_score >= PatternScore::OPEN_THREE);
        assert!(four_score >= PatternScore::OPEN_FOUR);
        assert!(four_score > three_score);
    }

    #[test]
    fn test_blocked_four_below_open_four() {
        let catalogue = PatternCatalogue::default();
        let open = board_with(&[(5, 7), (6, 7), (7, 7), (8, 7)], &[]);
        let blocked = board_with(&[(5, 7), (6, 7), (7, 7), (8, 7)], &[(4, 7)]);

        let open_score = evaluate(&open, Stone::Black, &catalogue);
        let blocked_score = evaluate(&blocked, Stone::Black, &catalogue);
        assert!(open_score > blocked_score);
    }

    #[test]
    fn test_five_scores_as_win() {
        let catalogue = PatternCatalogue::default();
        let board = board_with(&[], &[(0, 3), (1, 3), (2, 3), (3, 3), (4, 3)]);
        assert!(evaluate(&board, Stone::White, &catalogue) >= PatternScore::FIVE);
        assert!(evaluate(&board, Stone::Black, &catalogue) <= -PatternScore::FIVE);
    }

    #[test]
    fn test_diagonal_patterns_count() {
        let catalogue = PatternCatalogue::default();
        let board = board_with(&[(5, 5), (6, 6), (7, 7), (8, 8)], &[]);
        assert!(evaluate(&board, Stone::Black, &catalogue) >= PatternScore::OPEN_FOUR);
    }
}
