//! Candidate move generation
//!
//! Only cells close to existing stones are worth searching. Restricting
//! the branching factor to the active region is what makes even a
//! two-ply search affordable.

use crate::board::{Board, Coord, TOTAL_CELLS};

/// Chebyshev radius around each stone
pub const CANDIDATE_RADIUS: i32 = 2;

/// Empty cells within [`CANDIDATE_RADIUS`] of any stone, in ascending board index order.
///
/// An empty board yields just the center. A full board yields nothing.
#[must_use]
pub fn candidates(board: &Board) -> Vec<Coord> {
    if board.is_empty() {
        return vec![Coord::center()];
    }

    let mut seen = [false; TOTAL_CELLS];
    for (coord, _) in board.occupied() {
        for dr in -CANDIDATE_RADIUS..=CANDIDATE_RADIUS {
            for dc in -CANDIDATE_RADIUS..=CANDIDATE_RADIUS {
                if let Some(near) = coord.offset(dc, dr, 1) {
                    if board.is_empty_at(near) {
                        seen[near.to_index()] = true;
                    }
                }
            }
        }
    }

    let moves: Vec<Coord> = seen
        .iter()
        .enumerate()
        .filter(|&(_, &hit)| hit)
        .map(|(idx, _)| Coord::from_index(idx))
        .collect();
    log::trace!("generated {} candidates around {} stones", moves.len(), board.len());
    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Stone;

    fn chebyshev(a: Coord, b: Coord) -> i32 {
        let dc = (i32::from(a.col) - i32::from(b.col)).abs();
        let dr = (i32::from(a.row) - i32::from(b.row)).abs();
        dc.max(dr)
    }

    #[test]
    fn test_empty_board_center() {
        let board = Board::new();
        assert_eq!(candidates(&board), vec![Coord::new(7, 7)]);
    }

    #[test]
    fn test_single_stone_neighbourhood() {
        let mut board = Board::new();
        board.place(Coord::new(7, 7), Stone::Black).unwrap();

        let moves = candidates(&board);
        assert_eq!(moves.len(), 24);
        assert!(!moves.contains(&Coord::new(7, 7)));
        assert!(moves.contains(&Coord::new(5, 5)));
        assert!(moves.contains(&Coord::new(9, 9)));
        assert!(!moves.contains(&Coord::new(10, 7)));
    }

    #[test]
    fn test_corner_stone_clipped() {
        let mut board = Board::new();
        board.place(Coord::new(0, 0), Stone::Black).unwrap();

        // 3x3 in-bounds block minus the stone itself
        assert_eq!(candidates(&board).len(), 8);
    }

    #[test]
    fn test_overlap_collapses_and_order_is_row_major() {
        let mut board = Board::new();
        board.place(Coord::new(7, 7), Stone::Black).unwrap();
        board.place(Coord::new(8, 7), Stone::White).unwrap();

        let moves = candidates(&board);
        // 6 columns x 5 rows minus the two stones
        assert_eq!(moves.len(), 28);
        assert!(moves.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(moves[0], Coord::new(5, 5));
    }

    #[test]
    fn test_candidates_are_empty_and_near_stones() {
        let mut board = Board::new();
        let stones = [(3, 3), (4, 4), (12, 1), (10, 13), (0, 14)];
        for (i, &(col, row)) in stones.iter().enumerate() {
            let stone = if i % 2 == 0 { Stone::Black } else { Stone::White };
            board.place(Coord::new(col, row), stone).unwrap();
        }

        for mov in candidates(&board) {
            assert!(board.is_empty_at(mov));
            assert!(board.occupied().any(|(c, _)| chebyshev(c, mov) <= 2));
        }
    }

    #[test]
    fn test_full_board_has_no_candidates() {
        let mut board = Board::new();
        for idx in 0..TOTAL_CELLS {
            let stone = if idx % 2 == 0 { Stone::Black } else { Stone::White };
            board.place(Coord::from_index(idx), stone).unwrap();
        }
        assert!(candidates(&board).is_empty());
    }
}
