//! Configuration errors.
//!
//! Play never fails: rejected commands and out-of-range reads degrade to
//! values. The only fallible step is building a session from a config.

/// Errors raised when validating a `GameConfig`.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("board size must be at least 2, got {0}")]
    BoardTooSmall(usize),

    #[error("goal tile must be at least 4, got {0}")]
    GoalTooSmall(u32),

    #[error("spawn count per move must be at least 1")]
    NoSpawns,

    #[error("invalid animation config: {0}")]
    InvalidAnimation(String),

    #[error("grid is {actual}x{actual} but config expects {expected}x{expected}")]
    GridSizeMismatch { expected: usize, actual: usize },
}
