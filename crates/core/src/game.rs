//! Game module - the board engine
//!
//! This module ties together the grid, line compaction, spawning, and terminal
//! detection. Every command runs to completion and returns the ordered list of
//! events describing exactly how the board changed.

use arrayvec::ArrayVec;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::error::ValidationError;
use crate::grid::Grid;
use crate::moves::{is_stuck, slide, would_change};
use crate::rng::{spawn_position, spawn_value, SimpleRng};
use crate::snapshot::{GameSnapshot, SavedGame};
use crate::types::{Direction, GameAction, GameEvent, Position};

/// Complete game state
///
/// Generic over the randomness source so tests and simulations can inject a
/// seeded generator. The grid is private; callers only ever see copies.
#[derive(Debug, Clone)]
pub struct Game<R = SimpleRng> {
    config: EngineConfig,
    grid: Grid,
    rng: R,
    score: u64,
    /// Accepted (board-changing) swipes this session.
    moves: u32,
    /// Set the first time the win tile appears; never fires twice per session.
    reached_target: bool,
    game_over: bool,
    /// Monotonic session id (increments on reset and restore).
    episode_id: u32,
}

impl Game<SimpleRng> {
    /// Create a new game on the default 4x4 board with the given RNG seed.
    pub fn new(seed: u32) -> Self {
        let mut game = Self::blank(EngineConfig::default(), SimpleRng::new(seed));
        game.reset();
        game
    }

    /// Create a new game with custom rules.
    pub fn with_config(config: EngineConfig, seed: u32) -> Result<Self, ValidationError> {
        Self::with_rng(config, SimpleRng::new(seed))
    }
}

impl<R: Rng> Game<R> {
    /// Create a new game with custom rules and an injected RNG, then reset it.
    pub fn with_rng(config: EngineConfig, rng: R) -> Result<Self, ValidationError> {
        config.validate()?;
        let mut game = Self::blank(config, rng);
        game.reset();
        Ok(game)
    }

    /// Create a game directly from a saved grid and score.
    ///
    /// No tiles are spawned; the board is exactly what was saved.
    pub fn restored<T>(
        config: EngineConfig,
        rng: R,
        rows: &[Vec<T>],
        score: u64,
    ) -> Result<Self, ValidationError>
    where
        T: Copy + Into<i64>,
    {
        config.validate()?;
        let mut game = Self::blank(config, rng);
        game.restore(rows, score)?;
        Ok(game)
    }

    fn blank(config: EngineConfig, rng: R) -> Self {
        Self {
            grid: Grid::new(config.size),
            config,
            rng,
            score: 0,
            moves: 0,
            reached_target: false,
            game_over: false,
            episode_id: 0,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn size(&self) -> usize {
        self.grid.size()
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn empty_count(&self) -> usize {
        self.grid.empty_count()
    }

    pub fn reached_target(&self) -> bool {
        self.reached_target
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    /// Read-only view of the board.
    pub fn board(&self) -> &Grid {
        &self.grid
    }

    /// Owned row-major copy of the board.
    pub fn grid(&self) -> Vec<Vec<u32>> {
        self.grid.rows()
    }

    pub fn tile(&self, pos: Position) -> Option<u32> {
        self.grid.get(pos)
    }

    /// True if swiping in `direction` would change the board.
    pub fn can_move(&self, direction: Direction) -> bool {
        would_change(&self.grid, direction)
    }

    /// Directions that would change the board, in [`Direction::ALL`] order.
    pub fn legal_moves(&self) -> ArrayVec<Direction, 4> {
        Direction::ALL
            .into_iter()
            .filter(|&d| self.can_move(d))
            .collect()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        let size = self.grid.size();
        out.grid.resize_with(size, Vec::new);
        for (dst, src) in out.grid.iter_mut().zip(self.grid.cells().chunks(size)) {
            dst.clear();
            dst.extend_from_slice(src);
        }
        out.size = size;
        out.score = self.score;
        out.moves = self.moves;
        out.empty = self.grid.empty_count();
        out.max_tile = self.grid.max_tile();
        out.win_tile = self.config.win_tile;
        out.reached_target = self.reached_target;
        out.game_over = self.game_over;
        out.episode_id = self.episode_id;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Serializable copy of the session for a persistence layer.
    pub fn saved(&self) -> SavedGame {
        SavedGame::from_rows(&self.grid.rows(), self.score, self.moves)
    }

    /// Clear the board, score, move counter and flags, then spawn the
    /// configured number of starting tiles.
    pub fn reset(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::with_capacity(self.config.initial_tiles + 1);

        let old_score = self.score;
        self.grid.clear();
        self.score = 0;
        self.moves = 0;
        self.reached_target = false;
        self.game_over = false;
        self.episode_id = self.episode_id.wrapping_add(1);

        if old_score != 0 {
            events.push(GameEvent::ScoreChanged {
                score: 0,
                delta: i64::try_from(old_score).map_or(i64::MIN, |score| -score),
            });
        }
        for _ in 0..self.config.initial_tiles {
            self.spawn(&mut events);
        }
        self.check_terminal(&mut events);

        info!(
            episode = self.episode_id,
            size = self.grid.size(),
            "new game"
        );
        events
    }

    /// Load a saved grid and score. All-or-nothing: on error the current
    /// session is left exactly as it was.
    ///
    /// The move counter restarts at zero. A board that already holds the win
    /// tile (or anything larger) counts as having reached the target.
    pub fn restore<T>(&mut self, rows: &[Vec<T>], score: u64) -> Result<(), ValidationError>
    where
        T: Copy + Into<i64>,
    {
        let grid = Grid::from_rows(rows)
            .and_then(|grid| {
                if grid.size() == self.config.size {
                    Ok(grid)
                } else {
                    Err(ValidationError::SizeMismatch {
                        expected: self.config.size,
                        actual: grid.size(),
                    })
                }
            })
            .map_err(|err| {
                warn!(%err, "rejected restore payload");
                err
            })?;

        self.reached_target = grid.max_tile() >= self.config.win_tile;
        self.game_over = is_stuck(&grid);
        self.grid = grid;
        self.score = score;
        self.moves = 0;
        self.episode_id = self.episode_id.wrapping_add(1);

        info!(
            episode = self.episode_id,
            score,
            game_over = self.game_over,
            "restored game"
        );
        Ok(())
    }

    /// Restore a [`SavedGame`], including its move count.
    pub fn restore_saved(&mut self, saved: &SavedGame) -> Result<(), ValidationError> {
        self.restore(&saved.grid, saved.score)?;
        self.moves = saved.moves;
        Ok(())
    }

    /// Apply a front-end action.
    pub fn apply_action(&mut self, action: GameAction) -> Vec<GameEvent> {
        match action {
            GameAction::Swipe(direction) => self.swipe(direction),
            GameAction::Restart => self.reset(),
        }
    }

    pub fn swipe_left(&mut self) -> Vec<GameEvent> {
        self.swipe(Direction::Left)
    }

    pub fn swipe_right(&mut self) -> Vec<GameEvent> {
        self.swipe(Direction::Right)
    }

    pub fn swipe_up(&mut self) -> Vec<GameEvent> {
        self.swipe(Direction::Up)
    }

    pub fn swipe_down(&mut self) -> Vec<GameEvent> {
        self.swipe(Direction::Down)
    }

    /// Run one swipe end to end and return its events.
    pub fn swipe(&mut self, direction: Direction) -> Vec<GameEvent> {
        let mut events = Vec::new();
        self.swipe_into(direction, &mut events);
        events
    }

    /// Run one swipe, handing each event to `on_event` in order.
    ///
    /// Returns true if the board changed.
    pub fn swipe_with(
        &mut self,
        direction: Direction,
        mut on_event: impl FnMut(&GameEvent),
    ) -> bool {
        let events = self.swipe(direction);
        events.iter().for_each(&mut on_event);
        matches!(
            events.last(),
            Some(GameEvent::MoveCompleted { changed: true })
        )
    }

    /// Run one swipe, appending its events to `events`.
    ///
    /// Order: moves and merges (line by line), score change, spawn, target
    /// reached, game over, move completed.
    pub fn swipe_into(&mut self, direction: Direction, events: &mut Vec<GameEvent>) {
        let result = slide(&self.grid, direction);

        if !result.changed {
            debug!(direction = direction.as_str(), "no-op swipe");
            events.push(GameEvent::MoveCompleted { changed: false });
            return;
        }

        self.grid = result.grid;
        events.extend(result.events);

        // Restored sessions can carry any score or move count; both saturate.
        let score = self.score.saturating_add(result.score);
        if score > self.score {
            let delta = i64::try_from(score - self.score).unwrap_or(i64::MAX);
            self.score = score;
            events.push(GameEvent::ScoreChanged { score, delta });
        }
        self.moves = self.moves.saturating_add(1);

        self.spawn(events);
        self.check_terminal(events);

        debug!(
            direction = direction.as_str(),
            merges = result.merges,
            gained = result.score,
            score = self.score,
            moves = self.moves,
            empty = self.grid.empty_count(),
            "swipe"
        );
        events.push(GameEvent::MoveCompleted { changed: true });
    }

    /// Place a 2 or 4 on a random empty cell. Does nothing on a full board.
    fn spawn(&mut self, events: &mut Vec<GameEvent>) -> Option<Position> {
        let empty = self.grid.empty_positions();
        let at = spawn_position(&mut self.rng, &empty)?;
        let value = spawn_value(&mut self.rng, self.config.four_chance_percent);
        self.grid.set(at, value);
        events.push(GameEvent::Spawned { at, value });
        Some(at)
    }

    fn check_terminal(&mut self, events: &mut Vec<GameEvent>) {
        let win_tile = self.config.win_tile;
        if !self.reached_target && self.grid.contains(win_tile) {
            self.reached_target = true;
            info!(
                value = win_tile,
                score = self.score,
                moves = self.moves,
                "target reached"
            );
            events.push(GameEvent::ReachedTarget { value: win_tile });
        }

        if !self.game_over && is_stuck(&self.grid) {
            self.game_over = true;
            info!(score = self.score, moves = self.moves, "game over");
            events.push(GameEvent::GameOver);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DEFAULT_BOARD_SIZE;

    fn restored(rows: &[Vec<u32>], score: u64) -> Game {
        Game::restored(
            EngineConfig::with_size(rows.len()),
            SimpleRng::new(42),
            rows,
            score,
        )
        .unwrap()
    }

    #[test]
    fn new_game_has_two_tiles() {
        let game = Game::new(12345);
        assert_eq!(game.size(), DEFAULT_BOARD_SIZE);
        assert_eq!(game.empty_count(), 14);
        assert_eq!(game.score(), 0);
        assert_eq!(game.moves(), 0);
        assert!(!game.game_over());
        assert_eq!(game.episode_id(), 1);
    }

    #[test]
    fn same_seed_same_game() {
        let mut a = Game::new(7);
        let mut b = Game::new(7);
        for dir in [Direction::Left, Direction::Up, Direction::Right, Direction::Down] {
            assert_eq!(a.swipe(dir), b.swipe(dir));
        }
        assert_eq!(a.grid(), b.grid());
    }

    #[test]
    fn noop_swipe_only_reports_completion() {
        let mut game = restored(&[vec![2, 4], vec![0, 0]], 0);
        let events = game.swipe_up();
        assert_eq!(events, vec![GameEvent::MoveCompleted { changed: false }]);
        assert_eq!(game.moves(), 0);
        assert_eq!(game.grid(), vec![vec![2, 4], vec![0, 0]]);
    }

    #[test]
    fn event_order_for_merging_swipe() {
        let mut game = restored(
            &[
                vec![2, 2, 0, 0],
                vec![0, 0, 0, 0],
                vec![0, 0, 0, 0],
                vec![0, 0, 0, 0],
            ],
            0,
        );
        let events = game.swipe_left();

        assert_eq!(
            events[0],
            GameEvent::Merged {
                from: Position::new(0, 1),
                to: Position::new(0, 0),
                value: 4
            }
        );
        assert_eq!(events[1], GameEvent::ScoreChanged { score: 4, delta: 4 });
        assert!(matches!(events[2], GameEvent::Spawned { .. }));
        assert_eq!(events[3], GameEvent::MoveCompleted { changed: true });
        assert_eq!(events.len(), 4);
        assert_eq!(game.moves(), 1);
        assert_eq!(game.score(), 4);
    }

    #[test]
    fn swipe_with_forwards_every_event() {
        let mut game = restored(&[vec![0, 2], vec![0, 0]], 0);
        let mut seen = Vec::new();
        let changed = game.swipe_with(Direction::Left, |e| seen.push(*e));
        assert!(changed);
        assert_eq!(
            seen.first(),
            Some(&GameEvent::Moved {
                from: Position::new(0, 1),
                to: Position::new(0, 0)
            })
        );
        assert_eq!(seen.last(), Some(&GameEvent::MoveCompleted { changed: true }));
    }

    #[test]
    fn restore_rejects_size_mismatch() {
        let mut game = Game::new(1);
        let before = game.grid();
        let err = game.restore(&[vec![2u32, 0], vec![0, 0]], 10).unwrap_err();
        assert_eq!(
            err,
            ValidationError::SizeMismatch {
                expected: 4,
                actual: 2
            }
        );
        assert_eq!(game.grid(), before);
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn restore_with_target_already_on_board_does_not_refire() {
        let mut game = restored(
            &[
                vec![2048, 1024, 0, 0],
                vec![0, 0, 0, 0],
                vec![0, 0, 0, 0],
                vec![0, 1024, 0, 0],
            ],
            20000,
        );
        assert!(game.reached_target());

        // A second 2048 appears; the target was already reached.
        let events = game.swipe_up();
        assert!(events.contains(&GameEvent::Merged {
            from: Position::new(3, 1),
            to: Position::new(0, 1),
            value: 2048,
        }));
        assert!(!events
            .iter()
            .any(|e| matches!(e, GameEvent::ReachedTarget { .. })));
    }

    #[test]
    fn reset_reports_score_drop() {
        let mut game = restored(&[vec![2, 2], vec![0, 0]], 100);
        let events = game.reset();
        assert_eq!(events[0], GameEvent::ScoreChanged { score: 0, delta: -100 });
        let spawned = events
            .iter()
            .filter(|e| matches!(e, GameEvent::Spawned { .. }))
            .count();
        assert_eq!(spawned, 2);
        assert_eq!(game.score(), 0);
        assert_eq!(game.empty_count(), 2);
    }

    #[test]
    fn score_saturates_instead_of_overflowing() {
        let mut game = restored(&[vec![2, 2], vec![0, 0]], u64::MAX - 1);
        let events = game.swipe_left();
        assert_eq!(game.score(), u64::MAX);
        assert!(events.contains(&GameEvent::ScoreChanged {
            score: u64::MAX,
            delta: 1
        }));

        // Already at the ceiling: the merge still happens, the score stays put.
        game.restore(&[vec![4, 4], vec![0, 0]], u64::MAX).unwrap();
        let events = game.swipe_left();
        assert_eq!(game.grid()[0][0], 8);
        assert_eq!(game.score(), u64::MAX);
        assert!(!events
            .iter()
            .any(|e| matches!(e, GameEvent::ScoreChanged { .. })));

        let events = game.reset();
        assert_eq!(
            events[0],
            GameEvent::ScoreChanged {
                score: 0,
                delta: i64::MIN
            }
        );
    }

    #[test]
    fn move_counter_saturates() {
        let mut game = restored(&[vec![0, 2], vec![0, 0]], 0);
        let saved = SavedGame {
            moves: u32::MAX,
            ..game.saved()
        };
        game.restore_saved(&saved).unwrap();
        assert!(game.swipe_left().contains(&GameEvent::MoveCompleted { changed: true }));
        assert_eq!(game.moves(), u32::MAX);
    }

    #[test]
    fn legal_moves_on_corner_tile() {
        let game = restored(&[vec![2, 0], vec![0, 0]], 0);
        assert_eq!(
            game.legal_moves().as_slice(),
            &[Direction::Down, Direction::Right]
        );
    }

    #[test]
    fn snapshot_mirrors_state() {
        let game = restored(&[vec![2, 4], vec![8, 0]], 30);
        let snap = game.snapshot();
        assert_eq!(snap.grid, vec![vec![2, 4], vec![8, 0]]);
        assert_eq!(snap.size, 2);
        assert_eq!(snap.score, 30);
        assert_eq!(snap.empty, 1);
        assert_eq!(snap.max_tile, 8);
        assert_eq!(snap.win_tile, 2048);

        // Reusing a larger snapshot shrinks it.
        let mut big = Game::new(3).snapshot();
        game.snapshot_into(&mut big);
        assert_eq!(big, snap);
    }

    #[test]
    fn with_rng_rejects_invalid_config() {
        let err = Game::with_config(EngineConfig::with_size(1), 1).unwrap_err();
        assert!(matches!(err, ValidationError::TooSmall { .. }));
    }
}
