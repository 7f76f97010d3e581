//! Pieces module - static tetromino shape table
//!
//! Every (kind, rotation) pair maps to a fixed 4x4 occupancy mask. Masks are
//! indexed `[row][column]` with row 0 at the top of the piece's bounding box.
//! The table is built at compile time and never mutated.
//!
//! There are no wall kicks: a rotation that does not fit is rejected as a whole
//! by the caller.

use crate::types::{PieceKind, Rotation};

/// 4x4 occupancy mask, `[row][column]`
pub type ShapeMask = [[bool; 4]; 4];

/// Build a mask from four row nibbles; bit 3 is column 0.
const fn mask(rows: [u8; 4]) -> ShapeMask {
    let mut out = [[false; 4]; 4];
    let mut row = 0;
    while row < 4 {
        let mut col = 0;
        while col < 4 {
            out[row][col] = rows[row] & (0b1000 >> col) != 0;
            col += 1;
        }
        row += 1;
    }
    out
}

/// Shape table indexed by [`PieceKind::index`] then [`Rotation::index`].
static SHAPES: [[ShapeMask; 4]; 7] = [
    // I: horizontal in row 1, vertical in column 2
    [
        mask([0b0000, 0b1111, 0b0000, 0b0000]),
        mask([0b0010, 0b0010, 0b0010, 0b0010]),
        mask([0b0000, 0b1111, 0b0000, 0b0000]),
        mask([0b0010, 0b0010, 0b0010, 0b0010]),
    ],
    // O: identical in every rotation
    [
        mask([0b0110, 0b0110, 0b0000, 0b0000]),
        mask([0b0110, 0b0110, 0b0000, 0b0000]),
        mask([0b0110, 0b0110, 0b0000, 0b0000]),
        mask([0b0110, 0b0110, 0b0000, 0b0000]),
    ],
    // T
    [
        mask([0b0100, 0b1110, 0b0000, 0b0000]),
        mask([0b0100, 0b0110, 0b0100, 0b0000]),
        mask([0b0000, 0b1110, 0b0100, 0b0000]),
        mask([0b0100, 0b1100, 0b0100, 0b0000]),
    ],
    // S
    [
        mask([0b0110, 0b1100, 0b0000, 0b0000]),
        mask([0b0100, 0b0110, 0b0010, 0b0000]),
        mask([0b0110, 0b1100, 0b0000, 0b0000]),
        mask([0b0100, 0b0110, 0b0010, 0b0000]),
    ],
    // Z
    [
        mask([0b1100, 0b0110, 0b0000, 0b0000]),
        mask([0b0010, 0b0110, 0b0100, 0b0000]),
        mask([0b1100, 0b0110, 0b0000, 0b0000]),
        mask([0b0010, 0b0110, 0b0100, 0b0000]),
    ],
    // J
    [
        mask([0b0100, 0b0100, 0b1100, 0b0000]),
        mask([0b1000, 0b1110, 0b0000, 0b0000]),
        mask([0b1100, 0b1000, 0b1000, 0b0000]),
        mask([0b1110, 0b0010, 0b0000, 0b0000]),
    ],
    // L
    [
        mask([0b1000, 0b1000, 0b1100, 0b0000]),
        mask([0b1110, 0b1000, 0b0000, 0b0000]),
        mask([0b1100, 0b0100, 0b0100, 0b0000]),
        mask([0b0010, 0b1110, 0b0000, 0b0000]),
    ],
];

/// Get the occupancy mask for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> &'static ShapeMask {
    &SHAPES[kind.index()][rotation.index()]
}

/// Offsets of the occupied mask cells, `(column, row)`, in row-major order
pub fn shape_offsets(kind: PieceKind, rotation: Rotation) -> impl Iterator<Item = (i8, i8)> + Clone {
    let shape = get_shape(kind, rotation);
    (0..16usize).filter_map(move |i| {
        let (row, col) = (i / 4, i % 4);
        shape[row][col].then_some((col as i8, row as i8))
    })
}
