use std::time::Duration;

use crate::round::TimerId;

/// Single-slot countdown driven by elapsed time instead of the wall clock.
///
/// Scheduling replaces whatever was armed, so at most one timer is ever live.
#[derive(Debug, Clone, Default)]
pub struct PhaseTimer {
    slot: Option<(TimerId, Duration)>,
}

impl PhaseTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, id: TimerId, delay: Duration) {
        if let Some((old, _)) = self.slot {
            tracing::debug!("timer {old:?} replaced by {id:?}");
        }
        self.slot = Some((id, delay));
    }

    /// Disarm `id`; a different armed timer is left alone.
    pub fn cancel(&mut self, id: TimerId) {
        if matches!(self.slot, Some((armed, _)) if armed == id) {
            self.slot = None;
        }
    }

    pub fn clear(&mut self) {
        self.slot = None;
    }

    /// Let `elapsed` pass. Returns the id that fired together with the
    /// part of `elapsed` left over after it fired.
    pub fn advance(&mut self, elapsed: Duration) -> Option<(TimerId, Duration)> {
        let (id, remaining) = self.slot.as_mut()?;
        if elapsed < *remaining {
            *remaining -= elapsed;
            return None;
        }
        let fired = (*id, elapsed - *remaining);
        self.slot = None;
        Some(fired)
    }

    pub fn armed(&self) -> Option<TimerId> {
        self.slot.map(|(id, _)| id)
    }

    pub fn remaining(&self) -> Option<Duration> {
        self.slot.map(|(_, remaining)| remaining)
    }
}
