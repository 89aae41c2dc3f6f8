//! Merge module - land a piece and remove completed rows
//!
//! The falling piece's transient footprint is erased first, so only landed
//! geometry plus the newly merged piece count toward full rows.

use crate::board::{Board, ClearedRows};
use crate::player::Player;

/// What one merge did to the board
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MergeOutcome {
    /// Removed row indices as they were before the shift, bottom to top
    pub cleared_rows: ClearedRows,
}

impl MergeOutcome {
    /// Number of rows cleared by this merge
    pub fn cleared_count(&self) -> u32 {
        self.cleared_rows.len() as u32
    }
}

/// Merge `player`'s piece into the board, then clear every full row.
///
/// 1. transient cells are erased and the piece is written as `Merged`;
/// 2. rows are scanned bottom to top, a row being full when every cell is
///    occupied;
/// 3. all full rows are removed in this one call, the rows above shift down
///    and empty rows fill in from the top.
pub fn merge_and_clear(board: &mut Board, player: &Player) -> MergeOutcome {
    board.clear_piece_cells();
    board.merge_player(player);
    MergeOutcome {
        cleared_rows: board.clear_full_rows(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::Piece;
    use crate::player::Position;
    use crate::types::{Cell, CellState, ShapeKind};

    #[test]
    fn test_merge_without_clear() {
        let mut board = Board::new();
        let p = Player::at(Piece::new(ShapeKind::O), Position::new(0, 18));
        let outcome = merge_and_clear(&mut board, &p);

        assert_eq!(outcome.cleared_count(), 0);
        assert_eq!(board.merged_cells().count(), 4);
        assert_eq!(board.get(1, 19), Some(Cell::new(ShapeKind::O, CellState::Merged)));
    }

    #[test]
    fn test_merge_erases_transient_cells() {
        let mut board = Board::new();
        let p = Player::at(Piece::new(ShapeKind::O), Position::new(0, 18));
        board.paint_player(&p.shifted(Position::new(5, -10)), CellState::Colliding);
        board.paint_player(&p.shifted(Position::new(8, 0)), CellState::Clear);

        merge_and_clear(&mut board, &p);

        assert!(board
            .cells()
            .iter()
            .all(|c| !c.state.is_transient()));
        assert_eq!(board.merged_cells().count(), 4);
    }

    #[test]
    fn test_single_row_clear_shifts_rows_above() {
        // Bottom row misses columns 10 and 11; an O at x = 10 fills them.
        let mut board = Board::from_ascii(&[
            "...T........",
            "JJJJJJJJJJ..",
        ])
        .unwrap();
        let occupied_before = board.occupied_row_count();
        let p = Player::at(Piece::new(ShapeKind::O), Position::new(10, 18));

        let outcome = merge_and_clear(&mut board, &p);

        assert_eq!(outcome.cleared_count(), 1);
        assert_eq!(outcome.cleared_rows.as_slice(), &[19]);
        // Row 18 (T at 3, O at 10..=11) slid down to the bottom.
        assert!(board.get(3, 19).unwrap().is_merged());
        assert!(board.get(10, 19).unwrap().is_merged());
        assert!(board.get(0, 19).unwrap().is_empty());
        assert!(board.row(0).unwrap().iter().all(|c| c.is_empty()));
        assert_eq!(board.occupied_row_count(), occupied_before - 1);
    }

    #[test]
    fn test_multiple_rows_cleared_in_one_call() {
        let mut board = Board::from_ascii(&[
            "S...........",
            "ZZZZZZZZZZZ.",
            "ZZZZZZZZZZZ.",
            "ZZZZZZZZZZZ.",
            "ZZZZZZZZZZZ.",
        ])
        .unwrap();
        // Vertical I: bar in box column 1, so box x = 10 drops it into column 11.
        let p = Player::at(Piece::new(ShapeKind::I), Position::new(10, 16));

        let outcome = merge_and_clear(&mut board, &p);

        assert_eq!(outcome.cleared_count(), 4);
        assert_eq!(board.merged_cells().count(), 1);
        assert!(board.get(0, 19).unwrap().is_merged());
    }
}
