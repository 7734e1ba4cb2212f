//! Property-based tests for the board engine.
//!
//! Run with: cargo test --release prop_game

use proptest::prelude::*;

use tui_2048::core::{compact, slide, Game, Grid};
use tui_2048::types::{Direction, GameEvent, EMPTY};

fn directions() -> impl Strategy<Value = Vec<Direction>> {
    prop::collection::vec(0usize..4, 1..120)
        .prop_map(|idx| idx.into_iter().map(|i| Direction::ALL[i]).collect())
}

fn tile_line() -> impl Strategy<Value = Vec<u32>> {
    // 0 (empty) or 2^1..2^11.
    prop::collection::vec(0u32..12, 2..8)
        .prop_map(|exps| exps.into_iter().map(|e| if e == 0 { 0 } else { 1 << e }).collect())
}

fn valid_cells(grid: &Grid) -> bool {
    grid.cells()
        .iter()
        .all(|&v| v == EMPTY || v.is_power_of_two())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Sliding conserves the tile sum; a spawn adds exactly its own value.
    #[test]
    fn prop_sum_conserved_across_swipes(seed in any::<u32>(), dirs in directions()) {
        let mut game = Game::new(seed);

        for dir in dirs {
            let before = game.board().clone();
            let preview = slide(&before, dir);
            prop_assert_eq!(preview.grid.sum(), before.sum());

            let score_before = game.score();
            let events = game.swipe(dir);
            let spawned: u64 = events
                .iter()
                .map(|e| match e {
                    GameEvent::Spawned { value, .. } => u64::from(*value),
                    _ => 0,
                })
                .sum();

            prop_assert_eq!(game.board().sum(), before.sum() + spawned);
            prop_assert_eq!(game.score() - score_before, preview.score);
            prop_assert!(valid_cells(game.board()));

            if !preview.changed {
                prop_assert_eq!(game.board(), &before);
                prop_assert_eq!(events, vec![GameEvent::MoveCompleted { changed: false }]);
            }
        }
    }

    /// The score equals the total of every merge result ever reported.
    #[test]
    fn prop_score_is_sum_of_merges(seed in any::<u32>(), dirs in directions()) {
        let mut game = Game::new(seed);
        let mut merged = 0u64;
        let mut accepted = 0u32;

        for dir in dirs {
            let events = game.swipe(dir);
            for event in &events {
                match event {
                    GameEvent::Merged { value, .. } => merged += u64::from(*value),
                    GameEvent::MoveCompleted { changed: true } => accepted += 1,
                    _ => {}
                }
            }
        }

        prop_assert_eq!(game.score(), merged);
        prop_assert_eq!(game.moves(), accepted);
        prop_assert_eq!(game.game_over(), game.legal_moves().is_empty());
    }

    /// Compaction packs tiles toward index 0 and each merge removes one tile.
    #[test]
    fn prop_compact_packs_line(line in tile_line()) {
        let (out, _steps, summary) = compact(&line);

        let count = |l: &[u32]| l.iter().filter(|&&v| v != EMPTY).count();
        prop_assert_eq!(count(&line) - summary.merges as usize, count(&out));

        let filled = count(&out);
        prop_assert!(out[..filled].iter().all(|&v| v != EMPTY));
        prop_assert!(out[filled..].iter().all(|&v| v == EMPTY));

        let sum = |l: &[u32]| l.iter().map(|&v| u64::from(v)).sum::<u64>();
        prop_assert_eq!(sum(&line), sum(&out));
        prop_assert_eq!(summary.changed, line != out);
    }
}
