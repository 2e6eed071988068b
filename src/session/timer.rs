//! Reveal pacing on a logical clock.
//!
//! A terminal outcome can be shown for a moment before the result screen
//! appears. The controller schedules that transition here instead of
//! spawning a timer: the host advances the clock (from its frame loop or a
//! real timer) and due transitions fire synchronously.
//!
//! At most one transition is pending. Each is tagged with the round it
//! belongs to, so a transition scheduled for a round the player has since
//! left never fires.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::state::Screen;

/// A screen change waiting for its reveal delay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingTransition {
    /// Clock time at which the transition fires.
    pub fire_at: Duration,
    /// Screen to move to.
    pub target: Screen,
    /// Round the transition belongs to.
    pub round_id: u64,
}

/// Logical clock with a single pending transition slot.
#[derive(Clone, Debug, Default)]
pub struct RevealTimer {
    now: Duration,
    pending: Option<PendingTransition>,
}

impl RevealTimer {
    /// Create a timer at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current clock time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Pending transition, if any.
    #[must_use]
    pub fn pending(&self) -> Option<PendingTransition> {
        self.pending
    }

    /// Schedule `target` after `delay`, replacing any pending transition.
    pub fn schedule(&mut self, target: Screen, delay: Duration, round_id: u64) {
        self.pending = Some(PendingTransition {
            fire_at: self.now + delay,
            target,
            round_id,
        });
    }

    /// Drop the pending transition.
    pub fn cancel(&mut self) -> Option<PendingTransition> {
        self.pending.take()
    }

    /// Advance the clock and return the transition that came due, if it
    /// belongs to `current_round`.
    pub fn advance(&mut self, elapsed: Duration, current_round: u64) -> Option<PendingTransition> {
        self.now += elapsed;

        let due = self.pending.filter(|p| p.fire_at <= self.now)?;
        self.pending = None;
        (due.round_id == current_round).then_some(due)
    }
}
