//! Board module - manages the game grid
//!
//! The board is a 12x20 grid of cells. Each cell carries an occupancy (the
//! shape whose color it shows) and a state tag telling landed geometry
//! (`Merged`) apart from the falling piece (`Colliding`) and its landing
//! preview (`Clear`).
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..11 (left to right), y ranges 0..19 (top to bottom)

use arrayvec::ArrayVec;

use crate::player::Player;
use crate::types::{Cell, CellState, ShapeKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Row indices removed by one clear, bottom to top
pub type ClearedRows = ArrayVec<usize, { BOARD_HEIGHT as usize }>;

/// The game board - 12 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board: every cell `{None, Empty}`
    pub fn new() -> Self {
        Self {
            cells: [Cell::EMPTY; BOARD_SIZE],
        }
    }

    /// Build a board of merged cells from text rows, top row first.
    ///
    /// `.` is empty; a shape letter (`I J L O S T Z`, any case) is a merged
    /// cell of that shape. Missing rows are padded on top so the given rows
    /// sit at the bottom of the board. Returns `None` on a bad row length,
    /// too many rows, or an unknown character.
    ///
    /// ```
    /// use blockfall_core::Board;
    ///
    /// let board = Board::from_ascii(&["IIIIIIIIIII."]).unwrap();
    /// assert!(board.get(0, 19).unwrap().is_merged());
    /// assert!(board.get(11, 19).unwrap().is_empty());
    /// ```
    pub fn from_ascii(rows: &[&str]) -> Option<Self> {
        let height = BOARD_HEIGHT as usize;
        if rows.len() > height {
            return None;
        }
        let mut board = Self::new();
        let top = height - rows.len();
        for (i, row) in rows.iter().enumerate() {
            if row.chars().count() != BOARD_WIDTH as usize {
                return None;
            }
            for (x, ch) in row.chars().enumerate() {
                let cell = match ch {
                    '.' => Cell::EMPTY,
                    c => Cell::new(ShapeKind::from_str(&c.to_string())?, CellState::Merged),
                };
                board.cells[(top + i) * BOARD_WIDTH as usize + x] = cell;
            }
        }
        Some(board)
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    /// Get height of the board
    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position holds landed geometry
    pub fn is_merged(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(cell) if cell.is_merged())
    }

    /// Check if position is out of bounds
    pub fn is_out_of_bounds(&self, x: i8, y: i8) -> bool {
        Self::index(x, y).is_none()
    }

    /// Check if every cell of a row is occupied
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .map(|row| row.iter().all(|cell| !cell.is_empty()))
            .unwrap_or(false)
    }

    /// Cells of row `y`, left to right
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= BOARD_HEIGHT as usize {
            return None;
        }
        let start = y * BOARD_WIDTH as usize;
        Some(&self.cells[start..start + BOARD_WIDTH as usize])
    }

    /// Rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(BOARD_WIDTH as usize)
    }

    /// Erase the falling piece's footprint.
    ///
    /// Every transient cell (`Colliding`, and the `Clear` landing preview)
    /// goes back to `{None, Empty}`. `Merged` cells are untouched.
    pub fn clear_piece_cells(&mut self) {
        for cell in self.cells.iter_mut().filter(|c| c.state.is_transient()) {
            *cell = Cell::EMPTY;
        }
    }

    /// Paint the player's cells with a transient `state`.
    ///
    /// Out-of-bounds cells and cells already `Merged` are skipped, so painting
    /// never alters landed geometry.
    pub fn paint_player(&mut self, player: &Player, state: CellState) {
        let kind = player.piece.kind;
        for (x, y) in player.cells() {
            if let Some(idx) = Self::index(x, y) {
                if !self.cells[idx].is_merged() {
                    self.cells[idx] = Cell::new(kind, state);
                }
            }
        }
    }

    /// Write the player's cells as permanent `Merged` geometry.
    ///
    /// Cells outside the board are dropped.
    pub fn merge_player(&mut self, player: &Player) {
        let kind = player.piece.kind;
        for (x, y) in player.cells() {
            self.set(x, y, Cell::new(kind, CellState::Merged));
        }
    }

    /// Clear all full rows and return the row indices that were cleared (sorted bottom to top)
    /// Uses a two-pointer algorithm with zero-allocation
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared_rows = ClearedRows::new();
        let width = BOARD_WIDTH as usize;
        let mut write_y = BOARD_HEIGHT as usize;

        // Scan from bottom to top
        for read_y in (0..BOARD_HEIGHT as usize).rev() {
            if self.is_row_full(read_y) {
                cleared_rows.push(read_y);
            } else {
                // Keep this row: move it down to the write position
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    let dst_start = write_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, dst_start);
                }
            }
        }

        // Fresh empty rows on top
        for cell in &mut self.cells[..write_y * width] {
            *cell = Cell::EMPTY;
        }

        cleared_rows
    }

    /// Iterate over landed cells as `(x, y, kind)`
    pub fn merged_cells(&self) -> impl Iterator<Item = (i8, i8, ShapeKind)> + '_ {
        let width = BOARD_WIDTH as usize;
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            match (cell.state, cell.occupancy) {
                (CellState::Merged, Some(kind)) => Some(((i % width) as i8, (i / width) as i8, kind)),
                _ => None,
            }
        })
    }

    /// Number of rows holding at least one landed cell
    pub fn occupied_row_count(&self) -> usize {
        self.rows()
            .filter(|row| row.iter().any(|cell| cell.is_merged()))
            .count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::Piece;
    use crate::player::Position;

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(11, 0), Some(11));
        assert_eq!(Board::index(0, 1), Some(12));
        assert_eq!(Board::index(11, 19), Some(239));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(12, 0), None);
        assert_eq!(Board::index(0, 20), None);
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert!(board.cells().iter().all(|c| *c == Cell::EMPTY));
        assert_eq!(board.rows().count(), 20);
    }

    #[test]
    fn test_clear_piece_cells_keeps_merged() {
        let mut board = Board::new();
        board.set(0, 19, Cell::new(ShapeKind::I, CellState::Merged));
        board.set(1, 19, Cell::new(ShapeKind::T, CellState::Colliding));
        board.set(2, 19, Cell::new(ShapeKind::T, CellState::Clear));

        board.clear_piece_cells();

        assert_eq!(board.get(0, 19), Some(Cell::new(ShapeKind::I, CellState::Merged)));
        assert_eq!(board.get(1, 19), Some(Cell::EMPTY));
        assert_eq!(board.get(2, 19), Some(Cell::EMPTY));
    }

    #[test]
    fn test_paint_player_skips_merged_cells() {
        let mut board = Board::new();
        board.set(4, 0, Cell::new(ShapeKind::Z, CellState::Merged));
        let player = Player::at(Piece::new(ShapeKind::O), Position::new(4, 0));

        board.paint_player(&player, CellState::Colliding);

        assert_eq!(board.get(4, 0), Some(Cell::new(ShapeKind::Z, CellState::Merged)));
        assert_eq!(board.get(5, 0), Some(Cell::new(ShapeKind::O, CellState::Colliding)));
        assert_eq!(board.get(4, 1), Some(Cell::new(ShapeKind::O, CellState::Colliding)));
    }

    #[test]
    fn test_clear_full_rows_two_pointer() {
        let mut board = Board::from_ascii(&[
            "T...........",
            "IIIIIIIIIIII",
            ".J..........",
            "OOOOOOOOOOOO",
        ])
        .unwrap();

        let cleared = board.clear_full_rows();
        assert_eq!(cleared.as_slice(), &[19, 17]);
        assert!(board.get(0, 18).unwrap().is_merged());
        assert!(board.get(1, 19).unwrap().is_merged());
        assert!(board.row(17).unwrap().iter().all(|c| c.is_empty()));
    }

    #[test]
    fn test_from_ascii_rejects_bad_input() {
        assert!(Board::from_ascii(&["...."]).is_none());
        assert!(Board::from_ascii(&["...........X"]).is_none());
        let too_many = vec!["............"; 21];
        assert!(Board::from_ascii(&too_many).is_none());
    }
}
