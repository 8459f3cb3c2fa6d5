//! Win condition checking
//!
//! A line of five or more same-colored stones wins (overlines count).
//! Checks start from the last placed stone and walk outward, so the cost
//! is constant per move instead of a scan over the whole board.

use crate::board::{Board, Coord, Stone};

/// Direction vectors `(dcol, drow)` for line checking (4 directions)
pub const DIRECTIONS: [(i32, i32); 4] = [
    (1, 0),  // Horizontal
    (0, 1),  // Vertical
    (1, -1), // Diagonal ↗
    (1, 1),  // Diagonal ↘
];

/// Count consecutive `color` stones from `coord` (exclusive) along one sign of a direction.
#[inline]
fn run_length(board: &Board, coord: Coord, dc: i32, dr: i32, color: Stone) -> i32 {
    let mut count = 0;
    let mut step = 1;
    while let Some(next) = coord.offset(dc, dr, step) {
        if board.get(next) != Some(color) {
            break;
        }
        count += 1;
        step += 1;
    }
    count
}

/// Does the stone at `coord` complete five (or more) in a row?
///
/// An empty `coord` never wins.
#[inline]
pub fn has_five_in_line(board: &Board, coord: Coord) -> bool {
    let Some(color) = board.get(coord) else {
        return false;
    };
    DIRECTIONS.iter().any(|&(dc, dr)| {
        1 + run_length(board, coord, dc, dr, color) + run_length(board, coord, -dc, -dr, color) >= 5
    })
}

/// The full winning run through `coord`, ordered from one end to the other.
///
/// Returns `None` when the stone at `coord` does not complete five.
pub fn five_line_at(board: &Board, coord: Coord) -> Option<Vec<Coord>> {
    let color = board.get(coord)?;

    for &(dc, dr) in &DIRECTIONS {
        let back = run_length(board, coord, -dc, -dr, color);
        let forward = run_length(board, coord, dc, dr, color);
        if 1 + back + forward >= 5 {
            let line = (-back..=forward)
                .filter_map(|step| coord.offset(dc, dr, step))
                .collect();
            return Some(line);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place_all(board: &mut Board, coords: &[(u8, u8)], stone: Stone) {
        for &(col, row) in coords {
            board.place(Coord::new(col, row), stone).unwrap();
        }
    }

    #[test]
    fn test_five_in_row_horizontal() {
        let mut board = Board::new();
        for i in 0..5 {
            board.place(Coord::new(i, 9), Stone::Black).unwrap();
        }
        for i in 0..5 {
            assert!(has_five_in_line(&board, Coord::new(i, 9)));
        }
    }

    #[test]
    fn test_five_in_row_vertical() {
        let mut board = Board::new();
        for i in 0..5 {
            board.place(Coord::new(9, i), Stone::White).unwrap();
        }
        assert!(has_five_in_line(&board, Coord::new(9, 4)));
        assert!(has_five_in_line(&board, Coord::new(9, 2)));
    }

    #[test]
    fn test_five_in_row_diagonals() {
        let mut board = Board::new();
        for i in 0..5 {
            board.place(Coord::new(i, i), Stone::White).unwrap();
        }
        assert!(has_five_in_line(&board, Coord::new(2, 2)));

        let mut board = Board::new();
        // Anti-diagonal from (4, 8) to (8, 4)
        for i in 0..5 {
            board.place(Coord::new(4 + i, 8 - i), Stone::Black).unwrap();
        }
        assert!(has_five_in_line(&board, Coord::new(8, 4)));
    }

    #[test]
    fn test_six_in_row_also_wins() {
        let mut board = Board::new();
        for i in 0..6 {
            board.place(Coord::new(i, 9), Stone::Black).unwrap();
        }
        assert!(has_five_in_line(&board, Coord::new(5, 9)));
        assert_eq!(five_line_at(&board, Coord::new(5, 9)).map(|l| l.len()), Some(6));
    }

    #[test]
    fn test_four_in_row_not_win() {
        let mut board = Board::new();
        for i in 0..4 {
            board.place(Coord::new(i, 9), Stone::Black).unwrap();
        }
        assert!(!has_five_in_line(&board, Coord::new(3, 9)));
    }

    #[test]
    fn test_blocked_four_not_win() {
        let mut board = Board::new();
        place_all(&mut board, &[(3, 7), (4, 7), (5, 7), (6, 7)], Stone::Black);
        place_all(&mut board, &[(2, 7), (7, 7)], Stone::White);
        assert!(!has_five_in_line(&board, Coord::new(6, 7)));
        assert!(!has_five_in_line(&board, Coord::new(7, 7)));
    }

    #[test]
    fn test_gap_is_not_five() {
        let mut board = Board::new();
        place_all(&mut board, &[(0, 0), (1, 0), (3, 0), (4, 0), (5, 0)], Stone::Black);
        assert!(!has_five_in_line(&board, Coord::new(5, 0)));
    }

    #[test]
    fn test_mixed_colors_not_five() {
        let mut board = Board::new();
        place_all(&mut board, &[(0, 3), (1, 3), (2, 3), (3, 3)], Stone::Black);
        place_all(&mut board, &[(4, 3)], Stone::White);
        assert!(!has_five_in_line(&board, Coord::new(4, 3)));
        assert!(!has_five_in_line(&board, Coord::new(3, 3)));
    }

    #[test]
    fn test_five_at_corner() {
        let mut board = Board::new();
        for i in 0..5 {
            board.place(Coord::new(10 + i, 10 + i), Stone::White).unwrap();
        }
        assert!(has_five_in_line(&board, Coord::new(14, 14)));
    }

    #[test]
    fn test_empty_cell_never_wins() {
        let board = Board::new();
        assert!(!has_five_in_line(&board, Coord::new(7, 7)));
        assert!(five_line_at(&board, Coord::new(7, 7)).is_none());
    }

    #[test]
    fn test_five_line_is_ordered() {
        let mut board = Board::new();
        place_all(&mut board, &[(4, 7), (5, 7), (6, 7), (7, 7), (3, 7)], Stone::Black);

        let line = five_line_at(&board, Coord::new(3, 7)).unwrap();
        let expected: Vec<Coord> = (3..8).map(|c| Coord::new(c, 7)).collect();
        assert_eq!(line, expected);
    }
}
