//! Host-facing session.
//!
//! A [`Session`] owns one game: its configuration, the mutable
//! [`GameState`] and the [`AnimationSequencer`] driving it. Hosts feed it
//! commands and ticks and read back cells to draw and a summary to show.
//!
//! ## Usage
//!
//! ```
//! use rust_2048::anim::Tick;
//! use rust_2048::core::{Direction, GameConfig};
//! use rust_2048::session::Session;
//!
//! let mut session = Session::new(GameConfig::seeded(7)).unwrap();
//! session.settle();
//! assert_eq!(session.grid().len(), 2);
//!
//! if session.command(Direction::Left).is_accepted() {
//!     session.advance(Tick::Instant);
//! }
//! assert!(session.phase().is_idle());
//! ```

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::anim::{AnimationSequencer, Phase, Tick, TurnStats};
use crate::core::{
    CellId, Command, CommandOutcome, ConfigError, GameConfig, GameRngState, GameState, MoveSymbol,
};
use crate::grid::Grid;
use crate::rules::can_move;
use crate::spawn::{SpawnRecord, Spawner};

/// One cell as the host should draw it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CellView {
    pub id: CellId,
    pub value: u32,
    pub x: f32,
    pub y: f32,
    pub scale: f32,

    /// Being absorbed by a merge; drawn underneath everything else.
    pub merging: bool,
}

/// Snapshot of the session's scoreboard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub score: u64,
    pub best_score: u64,
    pub goal: u32,
    pub won: bool,
    pub game_over: bool,
    pub phase: Phase,
    pub seed: u64,

    /// Move log rendered as glyphs, oldest first.
    pub moves: String,
}

/// A single game.
#[derive(Clone, Debug)]
pub struct Session {
    config: GameConfig,
    state: GameState,
    sequencer: AnimationSequencer,
}

impl Session {
    /// Start a new game and place the opening tiles.
    ///
    /// The opening tiles start small and grow in; call [`Session::settle`]
    /// or keep ticking before the first command.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = Grid::new(config.size);

        let mut session = Self::build(config, grid);
        let initial = session.config.initial_spawns;
        session.sequencer.spawn_initial(&mut session.state, initial);
        Ok(session)
    }

    /// Start a game from an existing grid, without opening spawns.
    ///
    /// Used for puzzles and replays from a known position.
    pub fn with_grid(config: GameConfig, grid: Grid) -> Result<Self, ConfigError> {
        config.validate()?;
        if grid.size() != config.size {
            return Err(ConfigError::GridSizeMismatch {
                expected: config.size,
                actual: grid.size(),
            });
        }
        Ok(Self::build(config, grid))
    }

    fn build(config: GameConfig, grid: Grid) -> Self {
        let seed = config.seed.resolve();
        let state = GameState::with_grid(grid, config.goal, config.best_score, seed);
        let spawner = Spawner::new(config.spawn_count, config.animation.spawn_scale);
        let sequencer = AnimationSequencer::new(spawner, config.animation.clone());

        log::info!(
            "new {}x{} session, goal {}, seed {}",
            config.size,
            config.size,
            config.goal,
            seed
        );

        Self {
            config,
            state,
            sequencer,
        }
    }

    // === Input ===

    /// Submit a move or undo.
    pub fn command(&mut self, command: impl Into<Command>) -> CommandOutcome {
        self.sequencer.submit(&mut self.state, command.into())
    }

    /// Advance animations and phases by one host tick.
    pub fn advance(&mut self, tick: Tick) -> Phase {
        self.sequencer.advance(&mut self.state, tick)
    }

    /// Finish everything in flight at once.
    pub fn settle(&mut self) -> Phase {
        self.advance(Tick::Instant)
    }

    // === Views ===

    /// Cells in draw order: cells being absorbed first, then live cells by
    /// ascending value so larger tiles are drawn on top.
    #[must_use]
    pub fn cells(&self) -> Vec<CellView> {
        let mut absorbed: Vec<CellView> = self
            .state
            .pending
            .absorbed()
            .map(|cell| CellView {
                id: cell.id,
                value: cell.value,
                x: cell.x,
                y: cell.y,
                scale: cell.scale,
                merging: true,
            })
            .collect();
        absorbed.sort_by_key(|view| view.id);

        let mut live: Vec<CellView> = self
            .state
            .grid
            .cells()
            .map(|cell| CellView {
                id: cell.id,
                value: cell.value,
                x: cell.x,
                y: cell.y,
                scale: cell.scale,
                merging: false,
            })
            .collect();
        live.sort_by_key(|view| (view.value, view.id));

        absorbed.extend(live);
        absorbed
    }

    #[must_use]
    pub fn summary(&self) -> SessionSummary {
        let status = &self.state.status;
        SessionSummary {
            score: status.score(),
            best_score: status.best_score(),
            goal: status.goal(),
            won: status.is_won(),
            game_over: status.is_game_over(),
            phase: self.sequencer.phase(),
            seed: self.seed(),
            moves: self.move_log_glyphs(),
        }
    }

    /// Every accepted command, oldest first.
    #[must_use]
    pub fn move_log(&self) -> &Vector<MoveSymbol> {
        self.state.move_log()
    }

    /// The move log as a glyph string, e.g. `"<<^B"`.
    #[must_use]
    pub fn move_log_glyphs(&self) -> String {
        self.state.move_log().iter().map(|symbol| symbol.glyph()).collect()
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.state.grid
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.sequencer.phase()
    }

    /// Idle with nothing animating.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.sequencer.is_ready(&self.state)
    }

    #[must_use]
    pub fn score(&self) -> u64 {
        self.state.status.score()
    }

    /// `max(configured best, score)`; the host persists this.
    #[must_use]
    pub fn best_score_candidate(&self) -> u64 {
        self.state.status.best_score()
    }

    #[must_use]
    pub fn is_won(&self) -> bool {
        self.state.status.is_won()
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.state.status.is_game_over()
    }

    /// Whether any move could still change the board.
    #[must_use]
    pub fn can_move(&self) -> bool {
        can_move(&self.state.grid)
    }

    /// Seed in use, resolved once at creation.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.state.rng.seed()
    }

    /// RNG position, for replay capture.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.state.rng.state()
    }

    /// Undo snapshots available.
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.state.history.len()
    }

    /// Stats of the last move that returned to idle.
    #[must_use]
    pub fn last_turn(&self) -> Option<&TurnStats> {
        self.sequencer.last_turn()
    }

    /// Tiles placed by the most recent spawn.
    #[must_use]
    pub fn last_spawns(&self) -> &[SpawnRecord] {
        self.sequencer.last_spawns()
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Full state, for inspection.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Cell, Direction, Rejection, Slot};

    fn grid_from(rows: &[&[u32]]) -> Grid {
        let mut grid = Grid::new(rows.len());
        let mut next = 0;
        for (y, row) in rows.iter().enumerate() {
            for (x, &v) in row.iter().enumerate() {
                if v > 0 {
                    grid.place(Cell::new(CellId(next), v, Slot::new(x, y)));
                    next += 1;
                }
            }
        }
        grid
    }

    #[test]
    fn test_new_places_initial_spawns() {
        let mut session = Session::new(GameConfig::seeded(1)).unwrap();

        assert_eq!(session.grid().len(), 2);
        assert_eq!(session.last_spawns().len(), 2);
        assert!(!session.is_ready());

        session.settle();
        assert!(session.is_ready());
        assert_eq!(session.seed(), 1);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let err = Session::new(GameConfig::seeded(1).with_size(1)).unwrap_err();
        assert_eq!(err, ConfigError::BoardTooSmall(1));
    }

    #[test]
    fn test_with_grid_checks_size() {
        let err = Session::with_grid(GameConfig::seeded(1), Grid::new(3)).unwrap_err();
        assert_eq!(err, ConfigError::GridSizeMismatch { expected: 4, actual: 3 });
    }

    #[test]
    fn test_with_grid_starts_ready() {
        let grid = grid_from(&[&[2, 2, 0, 0], &[0; 4], &[0; 4], &[0; 4]]);
        let session = Session::with_grid(GameConfig::seeded(1), grid.clone()).unwrap();

        assert!(session.is_ready());
        assert_eq!(session.grid(), &grid);
    }

    #[test]
    fn test_command_accepts_direction() {
        let grid = grid_from(&[&[0, 0, 0, 2], &[0; 4], &[0; 4], &[0; 4]]);
        let mut session = Session::with_grid(GameConfig::seeded(1), grid).unwrap();

        assert!(session.command(Direction::Left).is_accepted());
        assert_eq!(
            session.command(Direction::Right),
            CommandOutcome::Rejected(Rejection::Busy)
        );

        session.settle();
        assert_eq!(session.grid().get(0, 0), 2);
        assert_eq!(session.history_len(), 1);
    }

    #[test]
    fn test_cells_draw_order() {
        let grid = grid_from(&[&[2, 2, 8, 0], &[4, 0, 0, 0], &[0; 4], &[0; 4]]);
        let mut session = Session::with_grid(GameConfig::seeded(1), grid).unwrap();

        // 2s merge at once (no space to slide first); the absorbed 2 is pending.
        session.command(Direction::Left);
        let views = session.cells();

        assert!(views[0].merging);
        assert_eq!(views[0].value, 2);
        let live: Vec<u32> = views[1..].iter().map(|v| v.value).collect();
        assert_eq!(live, vec![2, 4, 8]);
        assert!(views[1..].iter().all(|v| !v.merging));
    }

    #[test]
    fn test_summary_and_glyphs() {
        let grid = grid_from(&[&[2, 2, 0, 0], &[0; 4], &[0; 4], &[0; 4]]);
        let mut session =
            Session::with_grid(GameConfig::seeded(5).with_best_score(2), grid).unwrap();

        session.command(Direction::Left);
        session.settle();
        session.command(Direction::Up);
        session.settle();
        session.command(Command::Undo);

        // Undo leaves the score alone, and the spawned tile may have merged on Up.
        let summary = session.summary();
        assert!(summary.score >= 4);
        assert_eq!(summary.best_score, summary.score);
        assert_eq!(summary.goal, 2048);
        assert_eq!(summary.phase, Phase::Idle);
        assert_eq!(summary.seed, 5);
        assert_eq!(summary.moves, "<^B");
        assert!(!summary.won && !summary.game_over);
    }

    #[test]
    fn test_summary_serializes() {
        let session = Session::with_grid(GameConfig::seeded(3), Grid::new(4)).unwrap();
        let json = serde_json::to_string(&session.summary()).unwrap();
        let back: SessionSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(back, session.summary());
    }
}
