use rand::distributions::{Distribution, Standard};
use rand::Rng;

/// The seven piece identities.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Row of this kind in the shape table.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl Distribution<PieceKind> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.gen_range(0..PieceKind::ALL.len())]
    }
}

/// One grid position. Stored as a single byte: 0 is empty, 1..=7 a locked kind.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
#[repr(u8)]
pub enum Cell {
    #[default]
    Empty = 0,
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    pub fn is_filled(self) -> bool {
        !self.is_empty()
    }
}

impl From<PieceKind> for Cell {
    fn from(kind: PieceKind) -> Self {
        match kind {
            PieceKind::I => Cell::I,
            PieceKind::O => Cell::O,
            PieceKind::T => Cell::T,
            PieceKind::S => Cell::S,
            PieceKind::Z => Cell::Z,
            PieceKind::J => Cell::J,
            PieceKind::L => Cell::L,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone, Copy)]
#[error("empty cell carries no piece identity")]
pub struct EmptyCellError;

impl TryFrom<Cell> for PieceKind {
    type Error = EmptyCellError;

    fn try_from(cell: Cell) -> Result<Self, Self::Error> {
        match cell {
            Cell::Empty => Err(EmptyCellError),
            Cell::I => Ok(PieceKind::I),
            Cell::O => Ok(PieceKind::O),
            Cell::T => Ok(PieceKind::T),
            Cell::S => Ok(PieceKind::S),
            Cell::Z => Ok(PieceKind::Z),
            Cell::J => Ok(PieceKind::J),
            Cell::L => Ok(PieceKind::L),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone, Copy)]
#[error("byte {0} does not encode a cell (expected 0..=7)")]
pub struct InvalidCellByte(pub u8);

impl TryFrom<u8> for Cell {
    type Error = InvalidCellByte;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        match byte {
            0 => Ok(Cell::Empty),
            1..=7 => Ok(Cell::from(PieceKind::ALL[byte as usize - 1])),
            other => Err(InvalidCellByte(other)),
        }
    }
}

impl From<Cell> for u8 {
    fn from(cell: Cell) -> Self {
        cell as u8
    }
}
