//! Rotation module - clockwise matrix rotation with horizontal wall kicks
//!
//! `rotate` is pure geometry. `player_rotate` adds board awareness: after
//! turning the matrix it looks for the nearest horizontal offset that fits,
//! alternating right and left (`0, +1, -1, +2, -2, ...`) up to the piece's
//! own width. When nothing fits the rotation is rejected.

use crate::board::Board;
use crate::collision::is_colliding;
use crate::pieces::ShapeMatrix;
use crate::player::{Player, Position};

/// Rotate a square matrix 90° clockwise: transpose, then reverse each row.
pub fn rotate(matrix: &ShapeMatrix) -> ShapeMatrix {
    let n = matrix.size() as usize;
    let mut out = ShapeMatrix::empty(matrix.size());
    for row in 0..n {
        for col in 0..n {
            // transpose gives t[row][col] = m[col][row];
            // reversing the row reads t[row][n - 1 - col].
            out.set(row, col, matrix.get(n - 1 - col, row));
        }
    }
    out
}

/// Horizontal kick offsets tried after a rotation, nearest first.
pub fn kick_offsets(width: u8) -> impl Iterator<Item = i8> {
    std::iter::once(0).chain((1..=width as i8).flat_map(|d| [d, -d]))
}

/// Rotate the player's piece in place on the board, kicking sideways if needed.
///
/// Returns the rotated player, or `player` unchanged when no kick fits.
pub fn player_rotate(board: &Board, player: &Player) -> Player {
    let rotated = Player {
        piece: player.piece.rotated(),
        ..*player
    };

    for dx in kick_offsets(rotated.piece.width()) {
        let candidate = rotated.shifted(Position::new(dx, 0));
        if !is_colliding(&candidate, board, Position::ZERO) {
            return candidate;
        }
    }

    *player
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::{shape_matrix, Piece};
    use crate::types::{Cell, CellState, ShapeKind, BOARD_WIDTH};

    #[test]
    fn test_rotate_t_clockwise() {
        let t = shape_matrix(ShapeKind::T);
        // 000      010
        // 111  ->  110
        // 010      010
        assert_eq!(rotate(&t).to_rows(), vec!["010", "110", "010"]);
    }

    #[test]
    fn test_rotate_i_vertical_to_horizontal() {
        let i = shape_matrix(ShapeKind::I);
        assert_eq!(rotate(&i).to_rows(), vec!["0000", "1111", "0000", "0000"]);
    }

    #[test]
    fn test_rotate_four_times_is_identity() {
        for kind in ShapeKind::ALL {
            let m = shape_matrix(kind);
            let r = rotate(&rotate(&rotate(&rotate(&m))));
            assert_eq!(r, m, "{:?}", kind);
        }
    }

    #[test]
    fn test_o_rotation_is_noop() {
        let o = shape_matrix(ShapeKind::O);
        assert_eq!(rotate(&o), o);
    }

    #[test]
    fn test_kick_offsets_order() {
        let offsets: Vec<i8> = kick_offsets(3).collect();
        assert_eq!(offsets, vec![0, 1, -1, 2, -2, 3, -3]);
    }

    #[test]
    fn test_player_rotate_in_open_space() {
        let board = Board::new();
        let p = Player::spawn(Piece::new(ShapeKind::T));
        let r = player_rotate(&board, &p);
        assert_eq!(r.position, p.position);
        assert_eq!(r.piece.matrix, rotate(&p.piece.matrix));
    }

    #[test]
    fn test_player_rotate_kicks_off_left_wall() {
        let board = Board::new();
        // Vertical I at column 0 of its box: box x = -1 puts the bar at board x = 0.
        let p = Player::at(Piece::new(ShapeKind::I), Position::new(-1, 5));
        assert!(!is_colliding(&p, &board, Position::ZERO));

        let r = player_rotate(&board, &p);
        assert_ne!(r.piece.matrix, p.piece.matrix);
        assert!(r.cells().all(|(x, _)| x >= 0 && x < BOARD_WIDTH as i8));
        assert_eq!(r.position.x, 0);
    }

    #[test]
    fn test_player_rotate_rejected_when_boxed_in() {
        let mut board = Board::new();
        // A one-wide shaft for a vertical I piece.
        for y in 0..20 {
            for x in 0..BOARD_WIDTH as i8 {
                if x != 5 {
                    board.set(x, y, Cell::new(ShapeKind::Z, CellState::Merged));
                }
            }
        }
        let p = Player::at(Piece::new(ShapeKind::I), Position::new(4, 10));
        assert!(!is_colliding(&p, &board, Position::ZERO));

        let r = player_rotate(&board, &p);
        assert_eq!(r, p);
    }
}
