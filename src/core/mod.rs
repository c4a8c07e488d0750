//! Core engine types: cell ids, cells, commands, RNG, configuration, state.
//!
//! This module holds the vocabulary every other module speaks. It has no
//! knowledge of how moves are resolved or animated.

pub mod entity;
pub mod cell;
pub mod rng;
pub mod config;
pub mod error;
pub mod action;
pub mod state;

pub use entity::{CellId, CellIdAllocator};
pub use cell::{Cell, Slot};
pub use rng::{GameRng, GameRngState};
pub use config::{AnimationConfig, GameConfig, SeedPolicy};
pub use error::ConfigError;
pub use action::{Axis, Command, CommandOutcome, Direction, MoveSymbol, Rejection};
pub use state::GameState;
