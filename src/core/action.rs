//! Commands, directions and the move log vocabulary.
//!
//! A host sends one `Command` per settled cycle: a slide in one of four
//! directions, or an undo. Every accepted command leaves a `MoveSymbol` in
//! the session's move log.

use serde::{Deserialize, Serialize};

/// Which family of lines a move walks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Lines are rows; index is `y`, position along the line is `x`.
    Row,
    /// Lines are columns; index is `x`, position along the line is `y`.
    Column,
}

/// Slide direction. `Up` is towards increasing `y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions.
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// The axis whose lines this move resolves.
    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            Direction::Left | Direction::Right => Axis::Row,
            Direction::Up | Direction::Down => Axis::Column,
        }
    }

    /// Signed step along a line towards the leading edge.
    #[must_use]
    pub const fn step(self) -> isize {
        match self {
            Direction::Left | Direction::Down => -1,
            Direction::Right | Direction::Up => 1,
        }
    }

    /// Log symbol for this direction.
    #[must_use]
    pub const fn symbol(self) -> MoveSymbol {
        match self {
            Direction::Up => MoveSymbol::Up,
            Direction::Down => MoveSymbol::Down,
            Direction::Left => MoveSymbol::Left,
            Direction::Right => MoveSymbol::Right,
        }
    }
}

/// A host command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    Move(Direction),
    Undo,
}

impl From<Direction> for Command {
    fn from(direction: Direction) -> Self {
        Command::Move(direction)
    }
}

/// One entry of the move log.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveSymbol {
    Up,
    Down,
    Left,
    Right,
    Undo,
}

impl MoveSymbol {
    /// Single-glyph label for a history panel.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            MoveSymbol::Up => '^',
            MoveSymbol::Down => 'v',
            MoveSymbol::Left => '<',
            MoveSymbol::Right => '>',
            MoveSymbol::Undo => 'B',
        }
    }
}

impl std::fmt::Display for MoveSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

/// Why a command was ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rejection {
    /// A move is still resolving or a cell is still animating.
    Busy,
    /// The game is won or over.
    Finished,
    /// Undo with an empty history.
    NothingToUndo,
}

/// Result of submitting a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandOutcome {
    Accepted,
    Rejected(Rejection),
}

impl CommandOutcome {
    #[must_use]
    pub fn is_accepted(self) -> bool {
        matches!(self, CommandOutcome::Accepted)
    }
}
