//! Phase state machine that carries a move from command to settle.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{AnimationConfig, CellId, Command, CommandOutcome, Direction, GameState, MoveSymbol, Rejection};
use crate::moves::MoveEngine;
use crate::spawn::{Spawned, SpawnRecord, Spawner};

use super::tween::{step_cell, Tick};

/// Consecutive phases without any slide or merge before the move counts as
/// settled.
pub const SETTLE_IDLE_PASSES: u8 = 2;

/// Sequencer phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for a command.
    Idle,

    /// Next step runs a slide pass.
    Sliding { direction: Direction, idle_passes: u8 },

    /// Next step runs a merge pass (the last slide pass moved nothing).
    Merging { direction: Direction, idle_passes: u8 },

    /// Next step spawns new tiles.
    Spawning,

    /// Next step evaluates game over, once spawns have settled.
    StatusCheck,
}

impl Phase {
    #[must_use]
    pub fn is_idle(self) -> bool {
        matches!(self, Phase::Idle)
    }
}

/// What happened during one move.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnStats {
    /// Slide passes that moved at least one cell.
    pub slide_phases: u32,

    /// Merge passes that started at least one merge.
    pub merge_phases: u32,

    /// Merges started.
    pub merges_started: u32,

    /// Merges whose values were combined.
    pub merges_completed: u32,

    /// Score added by this move.
    pub score_gained: u64,

    /// Tiles placed by the spawner.
    pub spawned: u32,
}

/// Drives moves through their phases.
///
/// ## Usage
///
/// ```
/// use rust_2048::anim::{AnimationSequencer, Phase, Tick};
/// use rust_2048::core::{AnimationConfig, Cell, CellId, Command, Direction, GameState, Slot};
/// use rust_2048::spawn::Spawner;
///
/// let mut state = GameState::new(4, 2048, 0, 42);
/// state.grid.place(Cell::new(CellId(0), 2, Slot::new(0, 0)));
/// state.grid.place(Cell::new(CellId(1), 2, Slot::new(1, 0)));
///
/// let mut sequencer = AnimationSequencer::new(Spawner::new(1, 0.1), AnimationConfig::default());
/// assert!(sequencer.submit(&mut state, Command::Move(Direction::Left)).is_accepted());
///
/// assert_eq!(sequencer.advance(&mut state, Tick::Instant), Phase::Idle);
/// assert_eq!(state.grid.get(0, 0), 4);
/// assert_eq!(state.status.score(), 4);
/// ```
#[derive(Clone, Debug)]
pub struct AnimationSequencer {
    phase: Phase,
    spawner: Spawner,
    animation: AnimationConfig,

    /// Stats of the move in flight.
    current: TurnStats,

    /// Stats of the last move that reached idle.
    last_turn: Option<TurnStats>,

    /// Tiles placed by the most recent spawn call.
    last_spawns: Spawned,
}

impl AnimationSequencer {
    /// Create an idle sequencer.
    #[must_use]
    pub fn new(spawner: Spawner, animation: AnimationConfig) -> Self {
        Self {
            phase: Phase::Idle,
            spawner,
            animation,
            current: TurnStats::default(),
            last_turn: None,
            last_spawns: Spawned::new(),
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Idle with nothing animating: the state a command needs.
    #[must_use]
    pub fn is_ready(&self, state: &GameState) -> bool {
        self.phase.is_idle() && !state.is_animating()
    }

    /// Stats of the last move that reached idle.
    #[must_use]
    pub fn last_turn(&self) -> Option<&TurnStats> {
        self.last_turn.as_ref()
    }

    /// Tiles placed by the most recent spawn call.
    #[must_use]
    pub fn last_spawns(&self) -> &[SpawnRecord] {
        &self.last_spawns
    }

    // === Commands ===

    /// Submit a host command.
    ///
    /// Moves and undo are only accepted while idle, with nothing animating
    /// and neither terminal flag set. An accepted move snapshots the grid,
    /// logs its symbol and runs its first slide pass immediately; an
    /// accepted undo swaps the previous grid back in.
    pub fn submit(&mut self, state: &mut GameState, command: Command) -> CommandOutcome {
        if state.status.is_finished() {
            log::debug!("{:?} rejected: game finished", command);
            return CommandOutcome::Rejected(Rejection::Finished);
        }
        if !self.is_ready(state) {
            log::debug!("{:?} rejected: busy in {:?}", command, self.phase);
            return CommandOutcome::Rejected(Rejection::Busy);
        }

        match command {
            Command::Undo => {
                let Some(previous) = state.history.pop() else {
                    log::debug!("undo rejected: history empty");
                    return CommandOutcome::Rejected(Rejection::NothingToUndo);
                };
                state.restore(previous);
                state.record_move(MoveSymbol::Undo);
                log::debug!("undo accepted, {} snapshots left", state.history.len());
            }
            Command::Move(direction) => {
                state.history.push(&state.grid);
                state.record_move(direction.symbol());
                self.current = TurnStats::default();
                self.last_spawns.clear();
                self.phase = Phase::Sliding { direction, idle_passes: 0 };
                log::debug!("move {:?} accepted", direction);
                self.run_ready_phases(state);
            }
        }

        CommandOutcome::Accepted
    }

    /// Spawn the opening tiles of a session.
    pub fn spawn_initial(&mut self, state: &mut GameState, count: usize) -> &[SpawnRecord] {
        state.sync_ids();
        self.last_spawns = self.spawner.spawn_n(count, &mut state.grid, &mut state.rng, &mut state.ids);
        let ids: SmallVec<[CellId; 4]> = self.last_spawns.iter().map(|s| s.id).collect();
        state.mark_animating(&ids);
        &self.last_spawns
    }

    // === Ticking ===

    /// Advance animations and run every phase that is ready.
    ///
    /// An elapsed time that is negative or not finite is ignored.
    ///
    /// Returns the phase the sequencer is left in.
    pub fn advance(&mut self, state: &mut GameState, tick: Tick) -> Phase {
        match tick {
            Tick::Elapsed(dt) if !dt.is_finite() || dt < 0.0 => {
                log::debug!("ignoring tick with invalid dt {}", dt);
            }
            Tick::Elapsed(dt) => {
                self.animate(state, Some(dt));
                self.run_ready_phases(state);
            }
            Tick::Instant => loop {
                while state.is_animating() {
                    self.animate(state, None);
                }
                self.run_ready_phases(state);
                if self.is_ready(state) {
                    break;
                }
            },
        }
        self.phase
    }

    /// Step every animating cell; `None` snaps straight to rest.
    ///
    /// A cell coming to rest with a pending merge absorbs the lifted cell
    /// and keeps animating through its scale pop.
    fn animate(&mut self, state: &mut GameState, dt: Option<f32>) {
        let ids: SmallVec<[CellId; 16]> = state.animating().iter().copied().collect();
        let mut finished: SmallVec<[CellId; 16]> = SmallVec::new();

        for id in ids {
            let Some(cell) = state.grid.cell_mut(id) else {
                finished.push(id);
                continue;
            };

            let at_rest = match dt {
                Some(dt) => step_cell(cell, &self.animation, dt),
                None => {
                    cell.snap();
                    true
                }
            };
            if !at_rest {
                continue;
            }

            match state.pending.take(id) {
                Some(absorbed) => {
                    cell.value = cell.value.saturating_add(absorbed.value);
                    cell.scale = self.animation.merge_scale;
                    let value = cell.value;

                    state.status.record_merge(value);
                    self.current.merges_completed += 1;
                    self.current.score_gained += u64::from(value);
                    log::trace!("{} absorbed {} -> {}", id, absorbed.id, value);
                }
                None => finished.push(id),
            }
        }

        state.finish_animating(&finished);
    }

    /// Run phases until one suspends on animation or the sequencer idles.
    fn run_ready_phases(&mut self, state: &mut GameState) {
        while !state.is_animating() {
            let next = match self.phase {
                Phase::Idle => break,

                Phase::Sliding { direction, idle_passes } => {
                    let result = MoveEngine::slide(&mut state.grid, &state.pending, direction);
                    if result.changed() {
                        self.current.slide_phases += 1;
                        state.mark_animating(&result.moved);
                        Phase::Sliding { direction, idle_passes: 0 }
                    } else {
                        Phase::Merging { direction, idle_passes }
                    }
                }

                Phase::Merging { direction, idle_passes } => {
                    let result = MoveEngine::merge(&mut state.grid, &mut state.pending, direction);
                    if result.changed() {
                        self.current.merge_phases += 1;
                        self.current.merges_started += result.merges as u32;
                        state.mark_animating(&result.moved);
                        Phase::Sliding { direction, idle_passes: 0 }
                    } else if idle_passes + 1 >= SETTLE_IDLE_PASSES {
                        Phase::Spawning
                    } else {
                        Phase::Sliding { direction, idle_passes: idle_passes + 1 }
                    }
                }

                Phase::Spawning => {
                    state.sync_ids();
                    self.last_spawns = self.spawner.spawn(&mut state.grid, &mut state.rng, &mut state.ids);
                    let ids: SmallVec<[CellId; 4]> = self.last_spawns.iter().map(|s| s.id).collect();
                    state.mark_animating(&ids);
                    self.current.spawned = self.last_spawns.len() as u32;
                    Phase::StatusCheck
                }

                Phase::StatusCheck => {
                    state.status.check_moves(&state.grid);
                    self.last_turn = Some(std::mem::take(&mut self.current));
                    Phase::Idle
                }
            };

            log::trace!("phase {:?} -> {:?}", self.phase, next);
            self.phase = next;
        }
    }
}
