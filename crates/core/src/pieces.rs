//! Pieces module - the piece catalog
//!
//! Each of the seven shapes is a small square occupancy matrix (4x4 for I,
//! 2x2 for O, 3x3 for the rest). Empty slots inside the bounding box are
//! padding and never collide.
//!
//! Matrices are `Copy` values: rotating produces a new matrix and leaves the
//! old one untouched.

use crate::rng::{random_kind, SimpleRng};
use crate::types::ShapeKind;

/// Side length of the largest bounding box (the I piece).
pub const MAX_PIECE_SIZE: usize = 4;

/// Square occupancy matrix of a piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeMatrix {
    size: u8,
    cells: [[Option<ShapeKind>; MAX_PIECE_SIZE]; MAX_PIECE_SIZE],
}

impl ShapeMatrix {
    /// An all-empty matrix of the given side length (clamped to 1..=4).
    pub fn empty(size: u8) -> Self {
        Self {
            size: size.clamp(1, MAX_PIECE_SIZE as u8),
            cells: [[None; MAX_PIECE_SIZE]; MAX_PIECE_SIZE],
        }
    }

    /// Build a matrix from a 0/1 pattern, filling every 1 with `kind`.
    ///
    /// Only the top-left `size` x `size` corner of the pattern is read.
    pub fn from_pattern(kind: ShapeKind, size: u8, pattern: [[u8; MAX_PIECE_SIZE]; MAX_PIECE_SIZE]) -> Self {
        let mut m = Self::empty(size);
        let n = m.size as usize;
        for (row, bits) in pattern.iter().enumerate().take(n) {
            for (col, &bit) in bits.iter().enumerate().take(n) {
                if bit != 0 {
                    m.cells[row][col] = Some(kind);
                }
            }
        }
        m
    }

    /// Side length of the bounding box
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Cell at (row, col); `None` for padding or out-of-box coordinates
    pub fn get(&self, row: usize, col: usize) -> Option<ShapeKind> {
        let n = self.size as usize;
        if row >= n || col >= n {
            return None;
        }
        self.cells[row][col]
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, value: Option<ShapeKind>) {
        let n = self.size as usize;
        if row < n && col < n {
            self.cells[row][col] = value;
        }
    }

    /// Occupied cells as `(dx, dy, kind)` offsets from the box's top-left corner.
    pub fn occupied(&self) -> impl Iterator<Item = (i8, i8, ShapeKind)> + '_ {
        let n = self.size as usize;
        (0..n).flat_map(move |row| {
            (0..n).filter_map(move |col| {
                self.cells[row][col].map(|kind| (col as i8, row as i8, kind))
            })
        })
    }

    /// Number of occupied cells
    pub fn count(&self) -> usize {
        self.occupied().count()
    }

    /// Rows as 0/1 text, top to bottom (handy in test failure messages).
    pub fn to_rows(&self) -> Vec<String> {
        let n = self.size as usize;
        (0..n)
            .map(|row| {
                (0..n)
                    .map(|col| if self.cells[row][col].is_some() { '1' } else { '0' })
                    .collect()
            })
            .collect()
    }
}

/// Canonical spawn matrix for a shape.
pub fn shape_matrix(kind: ShapeKind) -> ShapeMatrix {
    match kind {
        ShapeKind::I => ShapeMatrix::from_pattern(
            kind,
            4,
            [[0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0]],
        ),
        ShapeKind::J => ShapeMatrix::from_pattern(
            kind,
            3,
            [[0, 1, 0, 0], [0, 1, 0, 0], [1, 1, 0, 0], [0, 0, 0, 0]],
        ),
        ShapeKind::L => ShapeMatrix::from_pattern(
            kind,
            3,
            [[0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0]],
        ),
        ShapeKind::O => ShapeMatrix::from_pattern(
            kind,
            2,
            [[1, 1, 0, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
        ),
        ShapeKind::S => ShapeMatrix::from_pattern(
            kind,
            3,
            [[0, 1, 1, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
        ),
        ShapeKind::T => ShapeMatrix::from_pattern(
            kind,
            3,
            [[0, 0, 0, 0], [1, 1, 1, 0], [0, 1, 0, 0], [0, 0, 0, 0]],
        ),
        ShapeKind::Z => ShapeMatrix::from_pattern(
            kind,
            3,
            [[1, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
        ),
    }
}

/// A tetromino: its shape kind and current (possibly rotated) matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: ShapeKind,
    pub matrix: ShapeMatrix,
}

impl Piece {
    /// Create a piece in its catalog orientation
    pub fn new(kind: ShapeKind) -> Self {
        Self {
            kind,
            matrix: shape_matrix(kind),
        }
    }

    /// Draw a piece whose shape is chosen uniformly at random.
    pub fn random(rng: &mut SimpleRng) -> Self {
        Self::new(random_kind(rng))
    }

    /// Bounding box side length
    pub fn width(&self) -> u8 {
        self.matrix.size()
    }

    /// This piece with its matrix turned 90° clockwise.
    pub fn rotated(&self) -> Self {
        Self {
            kind: self.kind,
            matrix: crate::rotation::rotate(&self.matrix),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_shape_has_four_cells() {
        for kind in ShapeKind::ALL {
            assert_eq!(shape_matrix(kind).count(), 4, "{:?}", kind);
        }
    }

    #[test]
    fn test_bounding_box_sizes() {
        assert_eq!(shape_matrix(ShapeKind::I).size(), 4);
        assert_eq!(shape_matrix(ShapeKind::O).size(), 2);
        for kind in [ShapeKind::J, ShapeKind::L, ShapeKind::S, ShapeKind::T, ShapeKind::Z] {
            assert_eq!(shape_matrix(kind).size(), 3);
        }
    }

    #[test]
    fn test_cells_carry_their_kind() {
        for kind in ShapeKind::ALL {
            assert!(shape_matrix(kind).occupied().all(|(_, _, k)| k == kind));
        }
    }

    #[test]
    fn test_t_piece_layout() {
        let m = shape_matrix(ShapeKind::T);
        assert_eq!(m.to_rows(), vec!["000", "111", "010"]);
        let cells: Vec<(i8, i8)> = m.occupied().map(|(x, y, _)| (x, y)).collect();
        assert_eq!(cells, vec![(0, 1), (1, 1), (2, 1), (1, 2)]);
    }

    #[test]
    fn test_get_outside_box_is_none() {
        let m = shape_matrix(ShapeKind::O);
        assert_eq!(m.get(0, 0), Some(ShapeKind::O));
        assert_eq!(m.get(2, 0), None);
        assert_eq!(m.get(0, 3), None);
    }

    #[test]
    fn test_random_piece_is_catalog_piece() {
        let mut rng = SimpleRng::new(5);
        for _ in 0..50 {
            let p = Piece::random(&mut rng);
            assert_eq!(p.matrix, shape_matrix(p.kind));
        }
    }

    #[test]
    fn test_rotated_leaves_original_intact() {
        let p = Piece::new(ShapeKind::L);
        let r = p.rotated();
        assert_eq!(p.matrix, shape_matrix(ShapeKind::L));
        assert_ne!(r.matrix, p.matrix);
        assert_eq!(r.kind, ShapeKind::L);
    }
}
