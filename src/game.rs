use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::cell::{Cell, PieceKind};
use crate::grid::{Grid, GRID_HEIGHT};
use crate::piece::{Blocks, Tetromino};

// ============================================================================
// Events
// ============================================================================

/// A player command that can be refused on collision.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Action {
    MoveLeft,
    MoveRight,
    SoftDrop,
    RotateCw,
    RotateCcw,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self {
            Action::MoveLeft => "move left",
            Action::MoveRight => "move right",
            Action::SoftDrop => "move down",
            Action::RotateCw => "rotate clockwise",
            Action::RotateCcw => "rotate counter-clockwise",
        };
        f.write_str(what)
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum GameEvent {
    PieceSpawned(PieceKind),
    PieceMoved,
    PieceRotated,
    Rejected(Action),
    PieceLocked(PieceKind),
    LinesCleared(usize),
    GameOver,
    GameRestarted,
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::PieceSpawned(kind) => write!(f, "spawned {kind:?}"),
            GameEvent::PieceMoved => f.write_str("piece moved"),
            GameEvent::PieceRotated => f.write_str("piece rotated"),
            GameEvent::Rejected(action) => {
                write!(f, "collision detected whilst attempting to {action}")
            }
            GameEvent::PieceLocked(kind) => write!(f, "locked {kind:?}"),
            GameEvent::LinesCleared(n) => write!(f, "cleared {n} line(s)"),
            GameEvent::GameOver => f.write_str("game over"),
            GameEvent::GameRestarted => f.write_str("game restarted"),
        }
    }
}

// ============================================================================
// Piece Provider Trait
// ============================================================================

/// Source of spawn identities, injected so sequences can be reproduced.
pub trait PieceProvider {
    fn next_piece(&mut self) -> PieceKind;
}

/// Uniform choice over the seven kinds from a held, seedable generator.
pub struct RandomPieceProvider {
    rng: StdRng,
}

impl RandomPieceProvider {
    pub fn new(rng: StdRng) -> Self {
        Self { rng }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl PieceProvider for RandomPieceProvider {
    fn next_piece(&mut self) -> PieceKind {
        self.rng.gen()
    }
}

pub struct SequencePieceProvider {
    pieces: Vec<PieceKind>,
    index: usize,
}

impl SequencePieceProvider {
    /// Cycles through `pieces` forever. Panics if `pieces` is empty.
    pub fn new(pieces: Vec<PieceKind>) -> Self {
        assert!(!pieces.is_empty(), "SequencePieceProvider needs at least one piece");
        Self { pieces, index: 0 }
    }
}

impl PieceProvider for SequencePieceProvider {
    fn next_piece(&mut self) -> PieceKind {
        let piece = self.pieces[self.index % self.pieces.len()];
        self.index += 1;
        piece
    }
}

// ============================================================================
// Game
// ============================================================================

/// Owns the grid and the falling piece and sequences
/// spawn, fall, lock, sweep and respawn.
///
/// Every piece action follows the same pattern: mutate the piece, ask the
/// grid about the new cells, and undo the mutation if they collide. Once the
/// game is over nothing mutates until [`Game::restart`].
pub struct Game {
    grid: Grid,
    current: Tetromino,
    game_over: bool,
    total_lines_cleared: usize,
    piece_provider: Box<dyn PieceProvider>,
    events: Vec<GameEvent>,
}

impl Game {
    pub fn new() -> Self {
        Self::with_provider(Box::new(RandomPieceProvider::from_entropy()))
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_provider(Box::new(RandomPieceProvider::with_seed(seed)))
    }

    /// Empty grid; the first piece is drawn from `provider`.
    pub fn with_provider(provider: Box<dyn PieceProvider>) -> Self {
        let mut game = Self {
            grid: Grid::new(),
            current: Tetromino::new(PieceKind::I),
            game_over: false,
            total_lines_cleared: 0,
            piece_provider: provider,
            events: Vec::new(),
        };
        game.spawn_new_piece();
        game
    }

    /// Starts from a prepared grid and piece. Later spawns come from `provider`.
    pub fn with_grid(grid: Grid, current: Tetromino, provider: Box<dyn PieceProvider>) -> Self {
        Self {
            grid,
            current,
            game_over: false,
            total_lines_cleared: 0,
            piece_provider: provider,
            events: Vec::new(),
        }
    }

    fn spawn_new_piece(&mut self) {
        let kind = self.piece_provider.next_piece();
        self.current = Tetromino::new(kind);
        self.events.push(GameEvent::PieceSpawned(kind));

        if self.grid.test_collision(&self.current.blocks()) {
            self.game_over = true;
            self.events.push(GameEvent::GameOver);
        }
    }

    fn lock_current_piece(&mut self) {
        let kind = self.current.kind();
        self.grid.lock_piece(&self.current.blocks(), kind);
        self.events.push(GameEvent::PieceLocked(kind));

        let lines = self.grid.sweep_lines();
        if lines > 0 {
            self.total_lines_cleared += lines;
            self.events.push(GameEvent::LinesCleared(lines));
        }

        self.spawn_new_piece();
    }

    fn collides(&self) -> bool {
        self.grid.test_collision(&self.current.blocks())
    }

    /// One gravity tick. A blocked fall locks the piece.
    pub fn update(&mut self) {
        if self.game_over {
            return;
        }
        self.current.move_by(0, 1);
        if self.collides() {
            self.current.move_by(0, -1);
            self.lock_current_piece();
        }
    }

    fn try_shift(&mut self, dx: i32, dy: i32, action: Action) -> bool {
        if self.game_over {
            return false;
        }
        self.current.move_by(dx, dy);
        if self.collides() {
            self.current.move_by(-dx, -dy);
            self.events.push(GameEvent::Rejected(action));
            return false;
        }
        self.events.push(GameEvent::PieceMoved);
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.try_shift(-1, 0, Action::MoveLeft)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_shift(1, 0, Action::MoveRight)
    }

    /// One step down. Unlike [`Game::update`], a blocked soft drop never locks.
    pub fn soft_drop(&mut self) -> bool {
        self.try_shift(0, 1, Action::SoftDrop)
    }

    /// Drops the piece as far as it goes and locks it.
    pub fn hard_drop(&mut self) {
        if self.game_over {
            return;
        }
        // A piece can fall at most GRID_HEIGHT rows before leaving the grid.
        for _ in 0..=GRID_HEIGHT {
            self.current.move_by(0, 1);
            if self.collides() {
                self.current.move_by(0, -1);
                break;
            }
        }
        self.lock_current_piece();
    }

    pub fn rotate_cw(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        self.current.rotate_cw();
        if self.collides() {
            self.current.rotate_ccw();
            self.events.push(GameEvent::Rejected(Action::RotateCw));
            return false;
        }
        self.events.push(GameEvent::PieceRotated);
        true
    }

    pub fn rotate_ccw(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        self.current.rotate_ccw();
        if self.collides() {
            self.current.rotate_cw();
            self.events.push(GameEvent::Rejected(Action::RotateCcw));
            return false;
        }
        self.events.push(GameEvent::PieceRotated);
        true
    }

    /// Dispatches a player command by name.
    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::MoveLeft => self.move_left(),
            Action::MoveRight => self.move_right(),
            Action::SoftDrop => self.soft_drop(),
            Action::RotateCw => self.rotate_cw(),
            Action::RotateCcw => self.rotate_ccw(),
        }
    }

    pub fn restart(&mut self) {
        self.grid.clear();
        self.game_over = false;
        self.total_lines_cleared = 0;
        self.events.clear();
        self.events.push(GameEvent::GameRestarted);
        self.spawn_new_piece();
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn current_piece(&self) -> &Tetromino {
        &self.current
    }

    pub fn current_blocks(&self) -> Blocks {
        self.current.blocks()
    }

    pub fn current_kind(&self) -> PieceKind {
        self.current.kind()
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn total_lines_cleared(&self) -> usize {
        self.total_lines_cleared
    }

    /// Returns the visual grid state with the current piece overlaid
    pub fn render_grid(&self) -> Vec<Vec<Cell>> {
        let mut visual: Vec<Vec<Cell>> = self.grid.rows().map(|row| row.to_vec()).collect();
        let cell = Cell::from(self.current.kind());

        for block in self.current.blocks() {
            if self.grid.is_inside(block.x, block.y) {
                visual[block.y as usize][block.x as usize] = cell;
            }
        }

        visual
    }

    /// Takes and clears all pending events
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Test Helpers
// ============================================================================

pub mod test_helpers {
    use super::*;
    use crate::grid::GRID_WIDTH;

    pub fn empty_grid() -> Grid {
        Grid::new()
    }

    pub fn fill_row(grid: &mut Grid, y: usize) {
        for x in 0..GRID_WIDTH {
            grid.set(x as i32, y as i32, Cell::T);
        }
    }

    pub fn fill_row_with_gap(grid: &mut Grid, y: usize, gap_x: usize) {
        for x in 0..GRID_WIDTH {
            if x != gap_x {
                grid.set(x as i32, y as i32, Cell::T);
            }
        }
    }

    /// A provider that always yields `kind`.
    pub fn only(kind: PieceKind) -> Box<dyn PieceProvider> {
        Box::new(SequencePieceProvider::new(vec![kind]))
    }
}
