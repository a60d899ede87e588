//! Property tests over generated action sequences.
//!
//! Invariants covered:
//! - A rejected action leaves the piece exactly as it was.
//! - The falling piece never overlaps locked cells or leaves the grid while playing.
//! - No full row survives a lock.
//! - Once the game is over, nothing changes.
//! - Sweeping removes exactly the full rows and keeps the others in order.

use proptest::prelude::*;

use blockfall::game::test_helpers::*;
use blockfall::{Action, Cell, Game, Grid, PieceKind, GRID_HEIGHT, GRID_WIDTH};

#[derive(Clone, Copy, Debug)]
enum Step {
    Act(Action),
    Tick,
    HardDrop,
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        Just(Step::Act(Action::MoveLeft)),
        Just(Step::Act(Action::MoveRight)),
        Just(Step::Act(Action::SoftDrop)),
        Just(Step::Act(Action::RotateCw)),
        Just(Step::Act(Action::RotateCcw)),
        Just(Step::Tick),
        Just(Step::HardDrop),
    ]
}

fn no_full_rows(grid: &Grid) -> bool {
    (0..GRID_HEIGHT).all(|y| !grid.is_row_full(y))
}

proptest! {
    #[test]
    fn generated_play_respects_invariants(
        seed in any::<u64>(),
        steps in prop::collection::vec(step_strategy(), 1..300),
    ) {
        let mut game = Game::with_seed(seed);

        for step in steps {
            let was_over = game.is_game_over();
            let grid_before = game.grid().clone();
            let piece_before = *game.current_piece();

            match step {
                Step::Act(action) => {
                    let applied = game.apply(action);
                    if !applied {
                        prop_assert_eq!(*game.current_piece(), piece_before);
                    }
                    prop_assert_eq!(game.grid(), &grid_before);
                }
                Step::Tick => game.update(),
                Step::HardDrop => game.hard_drop(),
            }

            if was_over {
                prop_assert!(game.is_game_over());
                prop_assert_eq!(game.grid(), &grid_before);
                prop_assert_eq!(*game.current_piece(), piece_before);
            } else if !game.is_game_over() {
                prop_assert!(!game.grid().test_collision(&game.current_blocks()));
            }
            prop_assert!(no_full_rows(game.grid()));
        }
    }

    #[test]
    fn sweep_keeps_partial_rows_in_order(
        full in prop::collection::vec(any::<bool>(), GRID_HEIGHT),
        gaps in prop::collection::vec(0..GRID_WIDTH, GRID_HEIGHT),
    ) {
        let mut grid = empty_grid();
        for y in 0..GRID_HEIGHT {
            if full[y] {
                fill_row(&mut grid, y);
            } else {
                fill_row_with_gap(&mut grid, y, gaps[y]);
            }
        }
        let survivors: Vec<_> = (0..GRID_HEIGHT)
            .filter(|&y| !full[y])
            .map(|y| *grid.row(y))
            .collect();
        let expected_cleared = full.iter().filter(|f| **f).count();

        prop_assert_eq!(grid.sweep_lines(), expected_cleared);

        let top = GRID_HEIGHT - survivors.len();
        for y in 0..top {
            prop_assert_eq!(grid.filled_count_in_row(y), 0);
        }
        for (i, row) in survivors.iter().enumerate() {
            prop_assert_eq!(grid.row(top + i), row);
        }
    }

    #[test]
    fn hard_drop_lands_on_floor_from_any_column(kind_ix in 0..7usize, shift in -5i32..6) {
        let kind = PieceKind::ALL[kind_ix];
        let mut game = Game::with_provider(only(kind));
        for _ in 0..shift.abs() {
            if shift < 0 { game.move_left(); } else { game.move_right(); }
        }

        game.hard_drop();

        let lowest = (0..GRID_HEIGHT)
            .filter(|&y| game.grid().row(y).iter().any(|c| *c != Cell::Empty))
            .max();
        prop_assert_eq!(lowest, Some(GRID_HEIGHT - 1));
        prop_assert_eq!(game.grid().total_filled_cells(), 4);
    }
}
