//! # rust-2048
//!
//! A deterministic sliding-tile merge engine for N x N boards.
//!
//! ## Design Principles
//!
//! 1. **Phased Moves**: A move is not resolved in one shot. Slide and merge
//!    passes alternate, each waiting for the previous pass's animation to
//!    settle, so a line like `[2, 2, 2, 2]` becomes `[4, 4]` and then `[8]`
//!    across phases.
//!
//! 2. **Deterministic**: Spawns draw from a seeded ChaCha8 stream. The same
//!    seed and the same commands always give the same boards.
//!
//! 3. **Host Driven**: The engine never sleeps or spawns threads. Hosts call
//!    `advance` once per frame, or pass `Tick::Instant` to resolve at once.
//!
//! ## Architecture
//!
//! - **Stable Ids**: Cells live in an id-keyed arena; pending merges and
//!   animation bookkeeping refer to them by `CellId`.
//!
//! - **Persistent Data Structures**: Undo snapshots and the move log use
//!   `im-rs`, so cloning a session is cheap.
//!
//! - **Sentinels**: Grid reads return `-1` off the board and `0` for empty
//!   slots, which keeps neighbour comparisons free of edge cases.
//!
//! ## Modules
//!
//! - `core`: Cell ids, cells, commands, RNG, configuration, state
//! - `grid`: The board and its line accessors
//! - `spawn`: Seeded tile spawning
//! - `moves`: Slide and merge passes, pending merges
//! - `anim`: Tweening and the phase sequencer
//! - `history`: Undo snapshots
//! - `rules`: Score, won and game-over detection
//! - `session`: Host-facing facade
//!
//! ## Example
//!
//! ```
//! use rust_2048::{Direction, GameConfig, Session, Tick};
//!
//! let mut session = Session::new(GameConfig::seeded(2048)).unwrap();
//! session.settle();
//!
//! for direction in [Direction::Left, Direction::Up, Direction::Right, Direction::Down] {
//!     if session.command(direction).is_accepted() {
//!         session.advance(Tick::Instant);
//!     }
//! }
//!
//! assert!(session.grid().len() >= 2);
//! assert_eq!(session.move_log_glyphs().len(), session.move_log().len());
//! ```

pub mod core;
pub mod grid;
pub mod spawn;
pub mod moves;
pub mod anim;
pub mod history;
pub mod rules;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    CellId, CellIdAllocator, Cell, Slot,
    GameRng, GameRngState,
    GameConfig, AnimationConfig, SeedPolicy, ConfigError,
    Axis, Direction, Command, CommandOutcome, MoveSymbol, Rejection,
    GameState,
};

pub use crate::grid::{Grid, Line, EMPTY, OUT_OF_RANGE};

pub use crate::spawn::{Spawner, SpawnRecord, Spawned, SPAWN_VALUES};

pub use crate::moves::{MoveEngine, Pass, PassResult, PendingMerges};

pub use crate::anim::{AnimationSequencer, Phase, Tick, TurnStats};

pub use crate::history::HistoryStack;

pub use crate::rules::{can_move, GameStatus};

pub use crate::session::{CellView, Session, SessionSummary};
