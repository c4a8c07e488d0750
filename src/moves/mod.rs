//! Move resolution: per-line slide and merge passes.
//!
//! A move is not resolved in one sweep. The sequencer alternates passes:
//!
//! - **Slide pass**: every cell slides as far as the empty run ahead of it
//!   allows.
//! - **Merge pass**: only tried once sliding stalls. A cell next to an equal
//!   cell moves onto it; the stationary cell is lifted into
//!   [`PendingMerges`] and its value is handed over once the arriving cell's
//!   animation completes.
//!
//! Passes repeat until neither changes anything, so newly vacated space is
//! filled and merged tiles can merge again in a later phase, but never twice
//! within the same phase.

mod engine;
mod pending;

pub use engine::{MoveEngine, Pass, PassResult};
pub use pending::PendingMerges;
