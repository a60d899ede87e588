pub mod cell;
pub mod game;
pub mod grid;
pub mod piece;
pub mod shapes;

pub use cell::{Cell, EmptyCellError, InvalidCellByte, PieceKind};
pub use game::{Action, Game, GameEvent, PieceProvider, RandomPieceProvider, SequencePieceProvider};
pub use grid::{Grid, GRID_HEIGHT, GRID_WIDTH};
pub use piece::{Blocks, Position, Tetromino, SPAWN_X, SPAWN_Y};
pub use shapes::shape_offsets;
