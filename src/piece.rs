use crate::cell::PieceKind;
use crate::shapes::{shape_offsets, ORIENTATIONS};

/// Spawn anchor for every new piece.
pub const SPAWN_X: i32 = 3;
pub const SPAWN_Y: i32 = 0;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Absolute cells of a piece. Always exactly four, possibly out of bounds.
pub type Blocks = [Position; 4];

/// The falling piece: identity, anchor and orientation.
///
/// Movement and rotation are total; whether the result is legal is decided by
/// the grid, never by the piece itself.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Tetromino {
    kind: PieceKind,
    position: Position,
    rotation: usize,
}

impl Tetromino {
    pub fn new(kind: PieceKind) -> Self {
        Self::new_at(kind, SPAWN_X, SPAWN_Y)
    }

    pub fn new_at(kind: PieceKind, x: i32, y: i32) -> Self {
        Self {
            kind,
            position: Position::new(x, y),
            rotation: 0,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn rotation(&self) -> usize {
        self.rotation
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Back to the spawn anchor and orientation, keeping the identity.
    pub fn reset(&mut self) {
        self.position = Position::new(SPAWN_X, SPAWN_Y);
        self.rotation = 0;
    }

    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.position.x += dx;
        self.position.y += dy;
    }

    pub fn rotate_cw(&mut self) {
        self.rotation = (self.rotation + 1) % ORIENTATIONS;
    }

    pub fn rotate_ccw(&mut self) {
        // +3 rather than -1 keeps the index unsigned.
        self.rotation = (self.rotation + ORIENTATIONS - 1) % ORIENTATIONS;
    }

    pub fn blocks(&self) -> Blocks {
        let offsets = *shape_offsets(self.kind, self.rotation);
        offsets.map(|(dx, dy)| Position {
            x: self.position.x + dx,
            y: self.position.y + dy,
        })
    }
}
