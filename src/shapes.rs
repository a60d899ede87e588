//! Fixed shape table: 7 kinds × 4 orientations × 4 cell offsets.
//!
//! Offsets are `(dx, dy)` from the piece anchor, with y growing downward.
//! Orientations are indexed 0 = spawn, 1 = 90° CW, 2 = 180°, 3 = 270°.
//! The layouts are written out by hand; rotating odd-sized pieces about a
//! cell-centred pivot with a plain matrix gives the wrong boxes.

use crate::cell::PieceKind;

/// Offset of one cell relative to the piece anchor.
pub type Offset = (i32, i32);

/// The four offsets of one orientation.
pub type Shape = [Offset; 4];

pub const ORIENTATIONS: usize = 4;

// Indexed by `PieceKind::index()`, then orientation.
static SHAPES: [[Shape; ORIENTATIONS]; 7] = [
    // I
    [
        [(0, 1), (1, 1), (2, 1), (3, 1)],
        [(2, 0), (2, 1), (2, 2), (2, 3)],
        [(0, 2), (1, 2), (2, 2), (3, 2)],
        [(1, 0), (1, 1), (1, 2), (1, 3)],
    ],
    // O
    [
        [(1, 0), (2, 0), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (2, 1)],
    ],
    // T
    [
        [(1, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (1, 1), (2, 1), (1, 2)],
        [(0, 1), (1, 1), (2, 1), (1, 2)],
        [(1, 0), (0, 1), (1, 1), (1, 2)],
    ],
    // S
    [
        [(1, 0), (2, 0), (0, 1), (1, 1)],
        [(1, 0), (1, 1), (2, 1), (2, 2)],
        [(1, 1), (2, 1), (0, 2), (1, 2)],
        [(0, 0), (0, 1), (1, 1), (1, 2)],
    ],
    // Z
    [
        [(0, 0), (1, 0), (1, 1), (2, 1)],
        [(2, 0), (1, 1), (2, 1), (1, 2)],
        [(0, 1), (1, 1), (1, 2), (2, 2)],
        [(1, 0), (0, 1), (1, 1), (0, 2)],
    ],
    // J
    [
        [(0, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (1, 2)],
        [(0, 1), (1, 1), (2, 1), (2, 2)],
        [(1, 0), (1, 1), (0, 2), (1, 2)],
    ],
    // L
    [
        [(2, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (1, 1), (1, 2), (2, 2)],
        [(0, 1), (1, 1), (2, 1), (0, 2)],
        [(0, 0), (1, 0), (1, 1), (1, 2)],
    ],
];

/// Offsets for `kind` in `orientation`. The orientation is taken mod 4.
pub fn shape_offsets(kind: PieceKind, orientation: usize) -> &'static Shape {
    &SHAPES[kind.index()][orientation % ORIENTATIONS]
}
