//! Cancelable deferred work for presentation pacing.
//!
//! Nothing here affects game correctness. Timers exist only so the host
//! can hide a message after a while and hold the game-over screen back a
//! moment after the final placement.
//!
//! Every timer records the [`Generation`] that was current when it was
//! scheduled. The owner bumps the generation on every new game and drops
//! any fired timer whose generation no longer matches, so a timer that
//! escapes cancellation still cannot act on a newer game.

use std::time::Duration;

/// Identity of one dealt game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(pub u64);

impl Generation {
    /// The generation after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Handle for cancelling a timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// What to do when a timer fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeferredAction {
    /// Hide the message with this id.
    DismissMessage(u64),
    /// Show the game-over screen.
    RevealGameOver,
}

/// A timer that came due.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FiredTimer {
    /// Generation captured at schedule time.
    pub generation: Generation,
    /// The deferred action.
    pub action: DeferredAction,
}

#[derive(Clone, Debug)]
struct Pending {
    id: TimerId,
    due: Duration,
    generation: Generation,
    action: DeferredAction,
}

/// Timers driven by an externally supplied clock.
///
/// The host reports elapsed time through [`TimerQueue::advance_to`]; the
/// queue never reads a clock itself, which keeps the engine synchronous
/// and deterministic under test.
#[derive(Clone, Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    next_id: u64,
    pending: Vec<Pending>,
}

impl TimerQueue {
    /// Create an empty queue at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last time reported by the host.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of timers waiting to fire.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Check if nothing is scheduled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Schedule `action` to fire `delay` after the current time.
    pub fn schedule(
        &mut self,
        delay: Duration,
        generation: Generation,
        action: DeferredAction,
    ) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending {
            id,
            due: self.now.saturating_add(delay),
            generation,
            action,
        });
        id
    }

    /// Cancel one timer. Returns whether it was still pending.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.id != id);
        self.pending.len() != before
    }

    /// Cancel timers matching a predicate on their action.
    pub fn cancel_where(&mut self, mut predicate: impl FnMut(&DeferredAction) -> bool) {
        self.pending.retain(|p| !predicate(&p.action));
    }

    /// Cancel everything.
    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    /// Move the clock forward and return timers that came due, earliest
    /// first (ties in scheduling order).
    ///
    /// Time never runs backwards; an earlier `now` is ignored.
    pub fn advance_to(&mut self, now: Duration) -> Vec<FiredTimer> {
        self.now = self.now.max(now);

        let mut due: Vec<Pending> = Vec::new();
        let mut index = 0;
        while index < self.pending.len() {
            if self.pending[index].due <= self.now {
                due.push(self.pending.remove(index));
            } else {
                index += 1;
            }
        }
        due.sort_by_key(|p| (p.due, p.id.0));

        due.into_iter()
            .map(|p| FiredTimer {
                generation: p.generation,
                action: p.action,
            })
            .collect()
    }
}
