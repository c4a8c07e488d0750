//! Session configuration.
//!
//! Hosts configure a session at startup by providing a `GameConfig`:
//! board size, goal tile, spawn cadence, seed policy, the persisted best
//! score and animation tuning. Nothing here is read from global state; the
//! host owns persistence of every value.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// How the spawn RNG is seeded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeedPolicy {
    /// Use this exact seed (replays, tests).
    Fixed(u64),
    /// Draw a seed from OS entropy once, at session creation.
    #[default]
    Randomize,
}

impl SeedPolicy {
    /// Resolve the policy to a concrete seed.
    #[must_use]
    pub fn resolve(self) -> u64 {
        match self {
            SeedPolicy::Fixed(seed) => seed,
            SeedPolicy::Randomize => rand::random(),
        }
    }
}

/// Tween tuning for cell animation.
///
/// Speeds are per second of elapsed time passed to `advance`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Slide speed in slots per second.
    pub move_speed: f32,

    /// Scale change per second while returning to 1.0.
    pub scale_speed: f32,

    /// Positions closer than this to their target snap onto it.
    pub snap_epsilon: f32,

    /// Scale a freshly spawned cell starts at (< 1).
    pub spawn_scale: f32,

    /// Scale a cell pops to when it absorbs a merge (> 1).
    pub merge_scale: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            move_speed: 50.0,
            scale_speed: 25.0,
            snap_epsilon: 0.1,
            spawn_scale: 0.1,
            merge_scale: 1.2,
        }
    }
}

impl AnimationConfig {
    /// Set the slide speed.
    #[must_use]
    pub fn with_move_speed(mut self, speed: f32) -> Self {
        self.move_speed = speed;
        self
    }

    /// Set the scale speed.
    #[must_use]
    pub fn with_scale_speed(mut self, speed: f32) -> Self {
        self.scale_speed = speed;
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let finite_positive = |v: f32| v.is_finite() && v > 0.0;

        if !finite_positive(self.move_speed) || !finite_positive(self.scale_speed) {
            return Err(ConfigError::InvalidAnimation("speeds must be finite and > 0".into()));
        }
        if !(self.snap_epsilon.is_finite() && self.snap_epsilon >= 0.0) {
            return Err(ConfigError::InvalidAnimation("snap_epsilon must be >= 0".into()));
        }
        if !(finite_positive(self.spawn_scale) && self.spawn_scale <= 1.0) {
            return Err(ConfigError::InvalidAnimation("spawn_scale must be in (0, 1]".into()));
        }
        if !(self.merge_scale.is_finite() && self.merge_scale >= 1.0) {
            return Err(ConfigError::InvalidAnimation("merge_scale must be >= 1".into()));
        }
        Ok(())
    }
}

/// Complete session configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameConfig {
    /// Board edge length N (N x N slots, N >= 2).
    pub size: usize,

    /// Tile value that wins the game.
    pub goal: u32,

    /// Spawn attempts after every settled move.
    pub spawn_count: usize,

    /// Spawn attempts when the session starts.
    pub initial_spawns: usize,

    /// Seed source for the spawn RNG.
    pub seed: SeedPolicy,

    /// Best score persisted by the host from earlier sessions.
    pub best_score: u64,

    /// Cell tween tuning.
    pub animation: AnimationConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: 4,
            goal: 2048,
            spawn_count: 1,
            initial_spawns: 2,
            seed: SeedPolicy::Randomize,
            best_score: 0,
            animation: AnimationConfig::default(),
        }
    }
}

impl GameConfig {
    /// Default configuration with a fixed seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::default().with_seed(seed)
    }

    /// Set the board size.
    #[must_use]
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Set the goal tile.
    #[must_use]
    pub fn with_goal(mut self, goal: u32) -> Self {
        self.goal = goal;
        self
    }

    /// Set spawns per settled move.
    #[must_use]
    pub fn with_spawn_count(mut self, count: usize) -> Self {
        self.spawn_count = count;
        self
    }

    /// Set spawns at session start.
    #[must_use]
    pub fn with_initial_spawns(mut self, count: usize) -> Self {
        self.initial_spawns = count;
        self
    }

    /// Use a fixed seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = SeedPolicy::Fixed(seed);
        self
    }

    /// Seed from OS entropy once at session creation.
    #[must_use]
    pub fn with_random_seed(mut self) -> Self {
        self.seed = SeedPolicy::Randomize;
        self
    }

    /// Carry in a best score from an earlier session.
    #[must_use]
    pub fn with_best_score(mut self, best: u64) -> Self {
        self.best_score = best;
        self
    }

    /// Replace animation tuning.
    #[must_use]
    pub fn with_animation(mut self, animation: AnimationConfig) -> Self {
        self.animation = animation;
        self
    }

    /// Check the configuration before a session is built from it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size < 2 {
            return Err(ConfigError::BoardTooSmall(self.size));
        }
        if self.goal < 4 {
            return Err(ConfigError::GoalTooSmall(self.goal));
        }
        if self.spawn_count == 0 {
            return Err(ConfigError::NoSpawns);
        }
        self.animation.validate()
    }
}
