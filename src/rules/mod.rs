//! Win/loss evaluation and score bookkeeping.
//!
//! `GameStatus` owns the sticky terminal flags and the score. The
//! sequencer raises the flags; hosts read them.
//!
//! Both flags are terminal for the session: once either is set, moves and
//! undo are rejected until the host starts a new session.

pub mod status;

pub use status::{can_move, GameStatus};
