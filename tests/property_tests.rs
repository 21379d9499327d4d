//! Property tests over random boards and random play.

use proptest::prelude::*;

use match3_core::board::Grid;
use match3_core::core::{BoardConfig, Color, Pos};
use match3_core::matching::scan;
use match3_core::session::{ActionOutcome, BoardPhase, NoHooks, RejectReason, Session};

fn grid_from_colors(width: usize, height: usize, colors: &[u8]) -> Grid {
    let mut grid = Grid::new(width, height);
    let positions: Vec<Pos> = grid.positions().collect();
    for (pos, &color) in positions.into_iter().zip(colors) {
        grid.spawn(pos, Color::new(color));
    }
    grid
}

/// A swap between a cell and its right or upper neighbor.
fn swap_strategy() -> impl Strategy<Value = (Pos, Pos)> {
    (0..8i32, 0..8i32, any::<bool>()).prop_map(|(x, y, right)| {
        let a = Pos::new(x, y);
        let b = if right { a.offset(1, 0) } else { a.offset(0, 1) };
        (a, b)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Scanning twice yields the same marks.
    #[test]
    fn prop_scan_idempotent(colors in prop::collection::vec(0u8..4, 36)) {
        let mut grid = grid_from_colors(6, 6, &colors);
        let first = scan(&mut grid);
        let second = scan(&mut grid);
        prop_assert_eq!(first, second);
    }

    /// Fresh boards are full and match-free.
    #[test]
    fn prop_initial_board_settled(seed in any::<u64>()) {
        let session = Session::new(BoardConfig::default(), seed, NoHooks).unwrap();
        let mut grid = session.grid().clone();
        prop_assert_eq!(grid.occupied_count(), 64);
        prop_assert!(scan(&mut grid).is_empty());
    }

    /// Random play always settles into a full, match-free board, and a
    /// rejected swap never touches the board.
    #[test]
    fn prop_play_settles(seed in any::<u64>(), swaps in prop::collection::vec(swap_strategy(), 1..12)) {
        let mut session = Session::new(BoardConfig::default(), seed, NoHooks).unwrap();

        for (a, b) in swaps {
            let before = session.grid().clone();
            match session.request_swap(a, b) {
                ActionOutcome::Accepted => {
                    let reports = session.run_until_idle();
                    prop_assert!(reports.last().is_some_and(|r| r.settled));
                }
                ActionOutcome::Rejected(reason) => {
                    prop_assert_ne!(reason, RejectReason::Busy);
                    prop_assert_eq!(session.grid(), &before);
                }
            }

            prop_assert_eq!(session.phase(), BoardPhase::Idle);
            let mut grid = session.grid().clone();
            prop_assert_eq!(grid.occupied_count(), 64);
            prop_assert!(scan(&mut grid).is_empty());
        }
    }
}
