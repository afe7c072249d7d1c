//! Game state module - the complete rule engine
//!
//! Ties together board, shape catalog, RNG, and scoring into one state
//! machine. Every external driver (terminal loop, remote adapter, tests)
//! mutates the game exclusively through the operations here; each operation
//! either fully applies or leaves the state untouched.

use crate::core::catalog::ShapeCatalog;
use crate::core::scoring::{clear_score, level_for_lines, GravityCurve};
use crate::core::snapshot::{GameSnapshot, PieceSnapshot};
use crate::core::{Board, ShapeDef, SimpleRng};
use crate::types::{ColorId, Direction, GRID_HEIGHT, GRID_WIDTH, SPAWN_X};

/// Engine configuration: everything the original variants disagreed on,
/// folded into data instead of separate engines.
#[derive(Debug, Clone, Copy)]
pub struct GameConfig {
    pub catalog: ShapeCatalog,
    pub gravity: GravityCurve,
    /// Difficulty multiplier for clear points, in percent (100 = none).
    pub score_multiplier_pct: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            catalog: ShapeCatalog::extended(),
            gravity: GravityCurve::default_linear(),
            score_multiplier_pct: 100,
        }
    }
}

impl GameConfig {
    pub fn easy() -> Self {
        Self {
            gravity: GravityCurve::Exponential {
                base_ms: 1000,
                decay_pct: 90,
                floor_ms: 50,
            },
            score_multiplier_pct: 100,
            ..Self::default()
        }
    }

    pub fn medium() -> Self {
        Self {
            gravity: GravityCurve::Exponential {
                base_ms: 800,
                decay_pct: 80,
                floor_ms: 50,
            },
            score_multiplier_pct: 150,
            ..Self::default()
        }
    }

    pub fn hard() -> Self {
        Self {
            gravity: GravityCurve::Exponential {
                base_ms: 500,
                decay_pct: 70,
                floor_ms: 50,
            },
            score_multiplier_pct: 200,
            ..Self::default()
        }
    }
}

/// Active falling piece: one catalog shape at a rotation and board position.
///
/// `y` is the mask origin row and may conceptually reach above the board;
/// cells with y < 0 are exempt from occupancy checks but stay bound
/// horizontally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallingPiece {
    pub shape: &'static ShapeDef,
    pub rotation: usize,
    pub x: i8,
    pub y: i8,
}

impl FallingPiece {
    /// Place a shape at the spawn origin with rotation 0.
    pub fn spawn(shape: &'static ShapeDef) -> Self {
        Self {
            shape,
            rotation: 0,
            x: SPAWN_X,
            y: 0,
        }
    }

    pub fn color(&self) -> ColorId {
        self.shape.color
    }

    /// Absolute board cells occupied at the current position and rotation.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> {
        let (x, y) = (self.x, self.y);
        self.shape.rotations[self.rotation]
            .cells()
            .map(move |(cx, cy)| (x + cx, y + cy))
    }

    /// The single collision predicate all movement decisions funnel through.
    ///
    /// True iff every occupied cell, shifted by (dx, dy) at `rotation`, has
    /// x within the grid, y above the bottom, and (for y >= 0) lands on an
    /// empty board cell.
    pub fn fits(&self, board: &Board, dx: i8, dy: i8, rotation: usize) -> bool {
        self.shape.rotations[rotation].cells().all(|(cx, cy)| {
            let x = self.x + cx + dx;
            let y = self.y + cy + dy;
            if x < 0 || x >= GRID_WIDTH as i8 || y >= GRID_HEIGHT as i8 {
                return false;
            }
            y < 0 || !board.is_occupied(x, y)
        })
    }
}

/// Result of a translation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The piece moved to the new position.
    Moved,
    /// The move was rejected; nothing changed.
    Blocked,
    /// A blocked downward step landed the piece and ran the lock sequence.
    Locked(LockOutcome),
}

/// What a lock did, for drivers that play cues or inspect progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockOutcome {
    pub rows_cleared: u32,
    /// Clear points awarded by this lock (excludes hard-drop points).
    pub points_awarded: u32,
    /// Whether the follow-up spawn collided and ended the game.
    pub game_over: bool,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    active: FallingPiece,
    next: FallingPiece,
    score: u32,
    level: u32,
    lines_cleared: u32,
    fall_interval_ms: u32,
    game_over: bool,
    config: GameConfig,
    rng: SimpleRng,
}

impl GameState {
    /// Create a game with the default configuration and the given RNG seed.
    pub fn new(seed: u32) -> Self {
        Self::with_config(GameConfig::default(), seed)
    }

    pub fn with_config(config: GameConfig, seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let active = Self::draw(&mut rng, &config);
        let next = Self::draw(&mut rng, &config);
        Self {
            board: Board::new(),
            active,
            next,
            score: 0,
            level: 1,
            lines_cleared: 0,
            fall_interval_ms: config.gravity.interval_ms(1),
            game_over: false,
            config,
            rng,
        }
    }

    /// Reinitialize to a fresh game: empty board, two fresh draws, zeroed
    /// counters. Idempotent; the only operation that leaves the game-over
    /// state.
    pub fn reset(&mut self) {
        self.board.clear();
        self.active = Self::draw(&mut self.rng, &self.config);
        self.next = Self::draw(&mut self.rng, &self.config);
        self.score = 0;
        self.level = 1;
        self.lines_cleared = 0;
        self.fall_interval_ms = self.config.gravity.interval_ms(1);
        self.game_over = false;
    }

    /// Independent uniform draw over the configured catalog.
    fn draw(rng: &mut SimpleRng, config: &GameConfig) -> FallingPiece {
        let idx = rng.next_range(config.catalog.len() as u32) as usize;
        FallingPiece::spawn(&config.catalog.shapes[idx])
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> FallingPiece {
        self.active
    }

    pub fn next_piece(&self) -> FallingPiece {
        self.next
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    /// Current gravity interval. Drivers must re-read this after every lock
    /// since it shrinks with level.
    pub fn fall_interval_ms(&self) -> u32 {
        self.fall_interval_ms
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Attempt a translation by (dx, dy).
    ///
    /// A blocked downward move means the piece landed: the lock sequence
    /// runs and the outcome reports `Locked` (distinct from a plain
    /// `Blocked` sideways rejection). Horizontal moves never lock. After
    /// game over every move reports `Blocked` without touching state.
    pub(crate) fn try_move(&mut self, dx: i8, dy: i8) -> MoveOutcome {
        if self.game_over {
            return MoveOutcome::Blocked;
        }
        if self.active.fits(&self.board, dx, dy, self.active.rotation) {
            self.active.x += dx;
            self.active.y += dy;
            MoveOutcome::Moved
        } else if dy > 0 {
            MoveOutcome::Locked(self.lock_active())
        } else {
            MoveOutcome::Blocked
        }
    }

    /// Move the active piece one column left or right. Returns success.
    pub fn shift(&mut self, direction: Direction) -> bool {
        matches!(self.try_move(direction.dx(), 0), MoveOutcome::Moved)
    }

    /// Advance to the next rotation state if it fits; no wall kicks.
    pub fn rotate(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        let next_rotation = (self.active.rotation + 1) % self.active.shape.rotation_count();
        if self.active.fits(&self.board, 0, 0, next_rotation) {
            self.active.rotation = next_rotation;
            true
        } else {
            false
        }
    }

    /// One downward step on behalf of the player.
    pub fn soft_drop_step(&mut self) -> MoveOutcome {
        self.try_move(0, 1)
    }

    /// One downward step on behalf of the gravity timer. Explicit no-op
    /// after game over.
    pub fn tick(&mut self) -> MoveOutcome {
        self.try_move(0, 1)
    }

    /// Drop straight down until the piece locks, awarding one point per
    /// descended row before the lock's clear scoring. Returns `None` only
    /// after game over.
    pub fn hard_drop(&mut self) -> Option<LockOutcome> {
        if self.game_over {
            return None;
        }
        loop {
            match self.try_move(0, 1) {
                MoveOutcome::Moved => self.score = self.score.saturating_add(1),
                MoveOutcome::Locked(outcome) => break Some(outcome),
                // A live downward step can only move or lock.
                MoveOutcome::Blocked => break None,
            }
        }
    }

    /// Lock sequence: write cells, clear rows, score, promote the preview,
    /// and re-check spawn validity for game over.
    fn lock_active(&mut self) -> LockOutcome {
        let piece = self.active;
        let color = piece.color();
        for (x, y) in piece.cells() {
            if y >= 0 {
                self.board.set(x, y, Some(color));
            }
        }

        let cleared = self.board.clear_full_rows();
        let rows = cleared.len();
        let mut points = 0;
        if rows > 0 {
            self.lines_cleared += rows as u32;
            // Score with the level in effect before this clear's level
            // recomputation.
            points = clear_score(rows, self.level, self.config.score_multiplier_pct);
            self.score = self.score.saturating_add(points);
            self.level = level_for_lines(self.lines_cleared);
            self.fall_interval_ms = self.config.gravity.interval_ms(self.level);
        }

        self.active = self.next;
        self.next = Self::draw(&mut self.rng, &self.config);

        // The promoted piece stays stored as active even when its spawn
        // position collides; no further mutation is permitted then.
        if !self.active.fits(&self.board, 0, 0, self.active.rotation) {
            self.game_over = true;
        }

        LockOutcome {
            rows_cleared: rows as u32,
            points_awarded: points,
            game_over: self.game_over,
        }
    }

    /// Write the read-only projection into a reusable buffer.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_color_grid(&mut out.board);
        out.active = PieceSnapshot::from(self.active);
        out.next = PieceSnapshot::from(self.next);
        out.score = self.score;
        out.level = self.level;
        out.lines_cleared = self.lines_cleared;
        out.fall_interval_ms = self.fall_interval_ms;
        out.game_over = self.game_over;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut snapshot = GameSnapshot::default();
        self.snapshot_into(&mut snapshot);
        snapshot
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GRID_WIDTH;

    fn shape(id: usize) -> &'static ShapeDef {
        &ShapeCatalog::extended().shapes[id]
    }

    /// O piece at the spawn column: cells at columns 4..=5, rows y+2..=y+3.
    fn place_o(state: &mut GameState) {
        state.active = FallingPiece::spawn(shape(1));
    }

    #[test]
    fn test_fresh_state() {
        let state = GameState::new(12345);

        assert_eq!(state.score(), 0);
        assert_eq!(state.level(), 1);
        assert_eq!(state.lines_cleared(), 0);
        assert_eq!(state.fall_interval_ms(), 500);
        assert!(!state.game_over());
        assert_eq!(state.board().occupied_count(), 0);

        let active = state.active();
        assert_eq!(active.x, 3);
        assert_eq!(active.y, 0);
        assert_eq!(active.rotation, 0);
    }

    #[test]
    fn test_same_seed_same_draws() {
        let a = GameState::new(777);
        let b = GameState::new(777);
        assert_eq!(a.active().shape.id, b.active().shape.id);
        assert_eq!(a.next_piece().shape.id, b.next_piece().shape.id);
    }

    #[test]
    fn test_shift_moves_and_wall_blocks() {
        let mut state = GameState::new(12345);
        place_o(&mut state);

        assert!(state.shift(Direction::Right));
        assert_eq!(state.active().x, 4);
        assert!(state.shift(Direction::Left));
        assert_eq!(state.active().x, 3);

        // Walk into the left wall; O's leftmost cell is mask column 1.
        let mut moved = 0;
        while state.shift(Direction::Left) {
            moved += 1;
            assert!(moved <= GRID_WIDTH, "piece escaped the grid");
        }
        let x = state.active().x;
        assert!(!state.shift(Direction::Left));
        // A blocked sideways move changes nothing and never locks.
        assert_eq!(state.active().x, x);
        assert_eq!(state.board().occupied_count(), 0);
    }

    #[test]
    fn test_descend_until_lock_writes_bottom_row() {
        let mut state = GameState::new(12345);
        place_o(&mut state);

        // O spawns with its lowest cells on row 3, so 16 downward steps
        // reach the floor and the 17th locks.
        for step in 0..16 {
            assert_eq!(state.soft_drop_step(), MoveOutcome::Moved, "step {step}");
        }
        match state.soft_drop_step() {
            MoveOutcome::Locked(outcome) => {
                assert_eq!(outcome.rows_cleared, 0);
                assert_eq!(outcome.points_awarded, 0);
                assert!(!outcome.game_over);
            }
            other => panic!("expected lock, got {other:?}"),
        }

        // Bottom two rows now hold the O's color at columns 4 and 5.
        for y in [18, 19] {
            assert_eq!(state.board().get(4, y), Some(Some(2)));
            assert_eq!(state.board().get(5, y), Some(Some(2)));
        }
        // A fresh piece was promoted to active.
        assert_eq!(state.active().y, 0);
        assert_eq!(state.active().rotation, 0);
    }

    #[test]
    fn test_single_line_clear_scores_and_shifts_rows() {
        let mut state = GameState::new(12345);
        place_o(&mut state);

        // Fill the bottom row except the two columns the O will land in.
        for x in 0..GRID_WIDTH as i8 {
            if x != 4 && x != 5 {
                state.board.set(x, 19, Some(1));
            }
        }

        let outcome = state.hard_drop().expect("game is live");
        assert_eq!(outcome.rows_cleared, 1);
        assert_eq!(outcome.points_awarded, 100);
        assert!(!outcome.game_over);

        assert_eq!(state.lines_cleared(), 1);
        assert_eq!(state.level(), 1);
        // 16 descended rows + 100 * level 1.
        assert_eq!(state.score(), 116);

        // The O's upper row fell into the bottom row; everything else is
        // gone. 8 (filler) + 4 (piece) - 10 (cleared) = 2 cells remain.
        assert_eq!(state.board().occupied_count(), 2);
        assert_eq!(state.board().get(4, 19), Some(Some(2)));
        assert_eq!(state.board().get(5, 19), Some(Some(2)));
        assert!(!state.board().is_row_full(19));
    }

    #[test]
    fn test_clear_scores_with_level_before_recompute() {
        let mut state = GameState::new(12345);
        place_o(&mut state);
        state.lines_cleared = 8;

        // Two nearly-full rows; the O completes both at once.
        for x in 0..GRID_WIDTH as i8 {
            if x != 4 && x != 5 {
                state.board.set(x, 18, Some(3));
                state.board.set(x, 19, Some(3));
            }
        }

        let outcome = state.hard_drop().expect("game is live");
        assert_eq!(outcome.rows_cleared, 2);
        // Scored at the pre-clear level 1, not the recomputed level 2.
        assert_eq!(outcome.points_awarded, 300);

        assert_eq!(state.lines_cleared(), 10);
        assert_eq!(state.level(), 2);
        assert_eq!(state.fall_interval_ms(), 475);
        // 16 drop points + 300 clear points.
        assert_eq!(state.score(), 316);
    }

    #[test]
    fn test_five_row_clear_counts_five_pays_four() {
        let mut state = GameState::new(12345);
        // Vertical 5-block line, shifted so its column (mask column 2) is
        // the only gap.
        state.active = FallingPiece::spawn(shape(11));

        for y in 15..20 {
            for x in 0..GRID_WIDTH as i8 {
                if x != 5 {
                    state.board.set(x, y, Some(4));
                }
            }
        }

        let outcome = state.hard_drop().expect("game is live");
        assert_eq!(outcome.rows_cleared, 5);
        // Payout capped at the 4-row table entry.
        assert_eq!(outcome.points_awarded, 800);
        assert_eq!(state.lines_cleared(), 5);
        assert_eq!(state.board().occupied_count(), 0);
    }

    #[test]
    fn test_rotation_against_wall_fails_without_kick() {
        let mut state = GameState::new(12345);
        // T in its second rotation hugs the left wall at x = -1 (mask
        // columns 1..=2 map to board columns 0..=1).
        state.active = FallingPiece {
            shape: shape(2),
            rotation: 1,
            x: -1,
            y: 10,
        };
        assert!(state.active.fits(&state.board, 0, 0, 1));

        // The next rotation state reaches mask column 0 = board column -1.
        assert!(!state.rotate());
        assert_eq!(state.active().rotation, 1);
        assert_eq!(state.active().x, -1);
        assert_eq!(state.active().y, 10);
    }

    #[test]
    fn test_rotation_cycles_through_all_states() {
        let mut state = GameState::new(12345);
        state.active = FallingPiece {
            shape: shape(2),
            rotation: 0,
            x: 3,
            y: 5,
        };

        for expected in [1, 2, 3, 0] {
            assert!(state.rotate());
            assert_eq!(state.active().rotation, expected);
        }
    }

    #[test]
    fn test_hard_drop_awards_descent_points() {
        let mut state = GameState::new(12345);
        // Vertical I: lowest cell on row 4, so it descends 15 rows.
        state.active = FallingPiece::spawn(shape(0));

        let outcome = state.hard_drop().expect("game is live");
        assert_eq!(outcome.rows_cleared, 0);
        assert_eq!(state.score(), 15);
    }

    #[test]
    fn test_game_over_on_blocked_spawn_freezes_everything() {
        let mut state = GameState::new(12345);
        place_o(&mut state);

        // Blanket the spawn area (rows 0..=4, columns 0..=8) so any
        // promoted shape collides; column 9 stays empty so no row is full.
        for y in 0..5 {
            for x in 0..9 {
                state.board.set(x, y, Some(6));
            }
        }
        state.active.y = 16;

        match state.soft_drop_step() {
            MoveOutcome::Locked(outcome) => assert!(outcome.game_over),
            other => panic!("expected lock, got {other:?}"),
        }
        assert!(state.game_over());

        // The blocked piece remains stored as active for presentation.
        assert_eq!(state.active().y, 0);

        let before = state.snapshot();
        assert_eq!(state.tick(), MoveOutcome::Blocked);
        assert_eq!(state.soft_drop_step(), MoveOutcome::Blocked);
        assert!(!state.shift(Direction::Left));
        assert!(!state.rotate());
        assert_eq!(state.hard_drop(), None);
        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn test_reset_restores_fresh_state_from_game_over() {
        let mut state = GameState::new(12345);
        // Force a game over through normal play: center drops stack up
        // without ever completing a row.
        for _ in 0..200 {
            if state.game_over() {
                break;
            }
            state.hard_drop();
        }
        assert!(state.game_over());

        state.reset();
        assert!(!state.game_over());
        assert_eq!(state.score(), 0);
        assert_eq!(state.level(), 1);
        assert_eq!(state.lines_cleared(), 0);
        assert_eq!(state.fall_interval_ms(), 500);
        assert_eq!(state.board().occupied_count(), 0);
        assert_eq!(state.active().y, 0);
    }

    #[test]
    fn test_no_full_rows_survive_any_lock() {
        let mut state = GameState::new(555);
        for _ in 0..300 {
            if state.game_over() {
                break;
            }
            // Mix in some movement to spread pieces around.
            state.shift(Direction::Left);
            state.rotate();
            state.hard_drop();
            for y in 0..GRID_HEIGHT as usize {
                assert!(!state.board.is_row_full(y), "full row survived a lock");
            }
            assert_eq!(state.level(), state.lines_cleared() / 10 + 1);
        }
    }

    #[test]
    fn test_level_tracks_lines_after_every_lock() {
        let mut state = GameState::with_config(
            GameConfig {
                catalog: ShapeCatalog::standard(),
                ..GameConfig::default()
            },
            42,
        );
        for _ in 0..100 {
            if state.game_over() {
                break;
            }
            state.hard_drop();
            assert_eq!(state.level(), level_for_lines(state.lines_cleared()));
        }
    }

    #[test]
    fn test_difficulty_presets() {
        let easy = GameState::with_config(GameConfig::easy(), 1);
        assert_eq!(easy.fall_interval_ms(), 1000);

        let medium = GameState::with_config(GameConfig::medium(), 1);
        assert_eq!(medium.fall_interval_ms(), 800);
        assert_eq!(medium.config().score_multiplier_pct, 150);

        let hard = GameState::with_config(GameConfig::hard(), 1);
        assert_eq!(hard.fall_interval_ms(), 500);
        assert_eq!(hard.config().score_multiplier_pct, 200);
    }

    #[test]
    fn test_snapshot_mirrors_state() {
        let mut state = GameState::new(12345);
        place_o(&mut state);
        state.shift(Direction::Right);

        let snapshot = state.snapshot();
        assert_eq!(snapshot.active.shape, 1);
        assert_eq!(snapshot.active.color, 2);
        assert_eq!(snapshot.active.x, 4);
        assert_eq!(snapshot.score, state.score());
        assert_eq!(snapshot.level, state.level());
        assert_eq!(snapshot.fall_interval_ms, 500);
        assert!(!snapshot.game_over);
        assert_eq!(snapshot.board[0][0], 0);
    }
}
