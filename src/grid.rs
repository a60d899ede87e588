use crate::cell::{Cell, PieceKind};
use crate::piece::Position;

pub const GRID_WIDTH: usize = 10;
/// Taller than the visible field; the extra rows are spawn headroom.
pub const GRID_HEIGHT: usize = 28;

pub type Row = [Cell; GRID_WIDTH];

/// Locked cells of the playfield, row 0 at the top.
///
/// Direct cell access outside the grid is a bug in the caller and panics.
/// Placement legality goes through [`Grid::test_collision`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Grid {
    rows: [Row; GRID_HEIGHT],
}

impl Grid {
    pub fn new() -> Self {
        Self {
            rows: [[Cell::Empty; GRID_WIDTH]; GRID_HEIGHT],
        }
    }

    pub fn width(&self) -> usize {
        GRID_WIDTH
    }

    pub fn height(&self) -> usize {
        GRID_HEIGHT
    }

    pub fn clear(&mut self) {
        for row in &mut self.rows {
            row.fill(Cell::Empty);
        }
    }

    pub fn is_inside(&self, x: i32, y: i32) -> bool {
        (0..GRID_WIDTH as i32).contains(&x) && (0..GRID_HEIGHT as i32).contains(&y)
    }

    pub fn at(&self, x: i32, y: i32) -> Cell {
        assert!(
            self.is_inside(x, y),
            "Grid::at: ({x}, {y}) is outside the {GRID_WIDTH}x{GRID_HEIGHT} grid"
        );
        self.rows[y as usize][x as usize]
    }

    pub fn set(&mut self, x: i32, y: i32, cell: Cell) {
        assert!(
            self.is_inside(x, y),
            "Grid::set: ({x}, {y}) is outside the {GRID_WIDTH}x{GRID_HEIGHT} grid"
        );
        self.rows[y as usize][x as usize] = cell;
    }

    /// True if any block lies outside the grid or on a filled cell.
    pub fn test_collision(&self, blocks: &[Position]) -> bool {
        blocks
            .iter()
            .any(|p| !self.is_inside(p.x, p.y) || self.at(p.x, p.y).is_filled())
    }

    /// Writes `kind` into every block. The caller has already checked
    /// `test_collision`; an out-of-bounds block still panics before any write.
    pub fn lock_piece(&mut self, blocks: &[Position], kind: PieceKind) {
        for p in blocks {
            assert!(
                self.is_inside(p.x, p.y),
                "Grid::lock_piece: ({}, {}) is outside the grid",
                p.x,
                p.y
            );
        }
        let cell = Cell::from(kind);
        for p in blocks {
            self.rows[p.y as usize][p.x as usize] = cell;
        }
    }

    /// Removes every full row, compacting the rows above downward, and
    /// returns how many were removed.
    pub fn sweep_lines(&mut self) -> usize {
        let mut cleared = 0;
        let mut y = GRID_HEIGHT;

        while y > 0 {
            let row = y - 1;
            if self.is_row_full(row) {
                self.rows.copy_within(0..row, 1);
                self.rows[0] = [Cell::Empty; GRID_WIDTH];
                cleared += 1;
                // Re-check the same index: the row above has moved into it.
            } else {
                y -= 1;
            }
        }

        cleared
    }

    pub fn is_row_full(&self, y: usize) -> bool {
        self.rows[y].iter().all(|cell| cell.is_filled())
    }

    pub fn filled_count_in_row(&self, y: usize) -> usize {
        self.rows[y].iter().filter(|cell| cell.is_filled()).count()
    }

    pub fn total_filled_cells(&self) -> usize {
        self.rows.iter().flatten().filter(|cell| cell.is_filled()).count()
    }

    pub fn row(&self, y: usize) -> &Row {
        &self.rows[y]
    }

    /// Rows top to bottom, for rendering.
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}
