//! Move sequencing and cell animation.
//!
//! A move runs as a series of phases driven by the host's per-tick
//! [`AnimationSequencer::advance`] call:
//!
//! ```text
//! Idle -> Sliding -> (Sliding | Merging)* -> Spawning -> StatusCheck -> Idle
//! ```
//!
//! A phase that moved cells suspends the sequencer until every animating
//! cell is back at rest. Merges complete inside that wait: when an arriving
//! cell comes to rest on its slot it absorbs the pending cell's value and
//! pops to the merge scale.
//!
//! Hosts without real animation (tests, replays, bots) pass
//! [`Tick::Instant`], which settles every tween at once and runs phases
//! until the sequencer is idle again.

mod sequencer;
mod tween;

pub use sequencer::{AnimationSequencer, Phase, TurnStats, SETTLE_IDLE_PASSES};
pub use tween::{move_towards, step_cell, Tick};
