//! Clock collaborator - turns elapsed time into timed commands.
//!
//! The engine holds no timer. The clock accumulates milliseconds and emits
//! `IncrementTime` once per tick interval and `Descend` once per descend
//! interval, in the order they come due. It never looks at the game: while
//! paused the engine simply ignores the `Descend`s.

use arrayvec::ArrayVec;
use tracing::warn;

use crate::config::HostConfig;
use crate::core::GameState;
use crate::types::Command;

/// Fixed frame length used when driving a game without a real clock (~60 FPS)
pub const FRAME_MS: u32 = 16;

/// Most commands a single `advance` call can emit
pub const MAX_CLOCK_EVENTS: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clock {
    tick_interval_ms: u32,
    descend_interval_ms: u32,
    tick_acc: u32,
    descend_acc: u32,
    /// Time not yet processed because the last `advance` filled its buffer
    backlog_ms: u32,
}

impl Clock {
    pub fn new(tick_interval_ms: u32, descend_interval_ms: u32) -> Self {
        debug_assert!(tick_interval_ms > 0 && descend_interval_ms > 0);
        Self {
            tick_interval_ms: tick_interval_ms.max(1),
            descend_interval_ms: descend_interval_ms.max(1),
            tick_acc: 0,
            descend_acc: 0,
            backlog_ms: 0,
        }
    }

    pub fn from_config(config: &HostConfig) -> Self {
        Self::new(config.tick_interval_ms, config.descend_interval_ms)
    }

    /// Advance by `elapsed_ms` and return the commands that came due
    ///
    /// At most [`MAX_CLOCK_EVENTS`] commands are returned. Time past that point
    /// is kept as backlog and processed by the next call.
    pub fn advance(&mut self, elapsed_ms: u32) -> ArrayVec<Command, MAX_CLOCK_EVENTS> {
        let mut due = ArrayVec::new();
        let mut remaining = elapsed_ms.saturating_add(self.backlog_ms);
        self.backlog_ms = 0;

        loop {
            let to_tick = self.tick_interval_ms - self.tick_acc;
            let to_descend = self.descend_interval_ms - self.descend_acc;
            let step = to_tick.min(to_descend);

            if step > remaining {
                self.tick_acc += remaining;
                self.descend_acc += remaining;
                break;
            }
            // A step emits up to two commands.
            if due.remaining_capacity() < 2 {
                warn!(backlog_ms = remaining, "clock buffer full, deferring");
                self.backlog_ms = remaining;
                break;
            }

            remaining -= step;
            self.tick_acc += step;
            self.descend_acc += step;

            if self.tick_acc >= self.tick_interval_ms {
                self.tick_acc = 0;
                due.push(Command::IncrementTime);
            }
            if self.descend_acc >= self.descend_interval_ms {
                self.descend_acc = 0;
                due.push(Command::Descend);
            }
        }

        due
    }
}

/// Run `state` under `clock` for `total_ms` of simulated time, frame by frame
pub fn drive(mut state: GameState, clock: &mut Clock, total_ms: u32) -> GameState {
    let mut elapsed = 0;
    while elapsed < total_ms {
        let frame = FRAME_MS.min(total_ms - elapsed);
        for command in clock.advance(frame) {
            state = state.apply(&command);
        }
        elapsed += frame;
    }
    state
}
