//! Collision module - is a proposed placement legal?
//!
//! Only three things block a piece: the floor, the two side walls, and
//! `Merged` cells. The piece's own `Colliding` footprint and its `Clear`
//! landing preview are painted on the same board but are never obstacles.

use crate::board::Board;
use crate::player::{Player, Position};
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

/// Would moving `player` by `delta` hit the floor, a wall, or landed geometry?
///
/// Padding cells in the piece's bounding box are skipped. Cells above the top
/// edge (`y < 0`) are only checked against the walls.
pub fn is_colliding(player: &Player, board: &Board, delta: Position) -> bool {
    let origin = player.position + delta;

    player.piece.matrix.occupied().any(|(dx, dy, _)| {
        let x = origin.x + dx;
        let y = origin.y + dy;

        if y >= BOARD_HEIGHT as i8 {
            return true;
        }
        if x < 0 || x >= BOARD_WIDTH as i8 {
            return true;
        }
        y >= 0 && board.is_merged(x, y)
    })
}

/// Landing row of the player's box if dropped straight down from where it is.
pub fn drop_position(player: &Player, board: &Board) -> Position {
    let mut resting = *player;
    while !is_colliding(&resting, board, Position::DOWN) {
        resting = resting.shifted(Position::DOWN);
    }
    resting.position
}
