//! Tetromino - a single falling piece
//!
//! A tetromino is a transient proposal: it never owns board cells and every
//! transform always succeeds. Whether the result fits is the board's call.

use crate::pieces::{get_shape, shape_offsets, ShapeMask};
use crate::types::{PieceKind, Rotation, SPAWN_X, SPAWN_Y};

/// Falling piece: kind, anchor (top-left of the 4x4 box) and rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// Create a new tetromino at the spawn position
    pub fn new(kind: PieceKind) -> Self {
        Self::at(kind, SPAWN_X, SPAWN_Y)
    }

    /// Create a tetromino in spawn orientation at an explicit anchor
    pub fn at(kind: PieceKind, x: i8, y: i8) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            x,
            y,
        }
    }

    /// Same kind, back at spawn position and orientation
    pub fn respawned(&self) -> Self {
        Self::new(self.kind)
    }

    /// Occupancy mask for the current rotation
    pub fn mask(&self) -> &'static ShapeMask {
        get_shape(self.kind, self.rotation)
    }

    /// Absolute `(column, row)` of every occupied cell.
    ///
    /// The iterator is lazy and `Clone`, so callers can walk it more than once.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + Clone {
        let (x, y) = (self.x, self.y);
        shape_offsets(self.kind, self.rotation).map(move |(dx, dy)| (x + dx, y + dy))
    }

    /// Translate the anchor
    pub fn shift(&mut self, dx: i8, dy: i8) {
        self.x += dx;
        self.y += dy;
    }

    pub fn rotate_cw(&mut self) {
        self.rotation = self.rotation.rotate_cw();
    }

    pub fn rotate_ccw(&mut self) {
        self.rotation = self.rotation.rotate_ccw();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tetromino_new() {
        let piece = Tetromino::new(PieceKind::T);

        assert_eq!(piece.kind, PieceKind::T);
        assert_eq!(piece.rotation, Rotation::North);
        assert_eq!(piece.x, 3);
        assert_eq!(piece.y, 0);
    }

    #[test]
    fn test_cells_follow_anchor() {
        let mut piece = Tetromino::new(PieceKind::I);
        let cells: Vec<_> = piece.cells().collect();
        assert_eq!(cells, vec![(3, 1), (4, 1), (5, 1), (6, 1)]);

        piece.shift(-3, 17);
        let cells: Vec<_> = piece.cells().collect();
        assert_eq!(cells, vec![(0, 18), (1, 18), (2, 18), (3, 18)]);
    }

    #[test]
    fn test_cells_iterator_is_restartable() {
        let piece = Tetromino::new(PieceKind::S);
        let cells = piece.cells();
        let first: Vec<_> = cells.clone().collect();
        let second: Vec<_> = cells.collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 4);
    }

    #[test]
    fn test_rotation_wraps_modulo_four() {
        let mut piece = Tetromino::new(PieceKind::L);
        for _ in 0..4 {
            piece.rotate_cw();
        }
        assert_eq!(piece.rotation, Rotation::North);

        piece.rotate_ccw();
        assert_eq!(piece.rotation, Rotation::West);
        piece.rotate_cw();
        assert_eq!(piece.rotation, Rotation::North);
    }

    #[test]
    fn test_shift_can_leave_the_board() {
        // Bounds are the board's concern.
        let mut piece = Tetromino::new(PieceKind::O);
        piece.shift(-10, -10);
        assert_eq!((piece.x, piece.y), (-7, -10));
    }

    #[test]
    fn test_respawned_resets_orientation() {
        let mut piece = Tetromino::new(PieceKind::J);
        piece.rotate_cw();
        piece.shift(2, 7);

        let fresh = piece.respawned();
        assert_eq!(fresh, Tetromino::new(PieceKind::J));
    }
}
