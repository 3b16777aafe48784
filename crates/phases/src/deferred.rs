use std::fmt;
use std::time::Duration;

/// Identifies one scheduled effect. Tokens are never reused by the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(pub u64);

#[derive(Debug, Clone)]
struct Pending<E> {
    token: TimerToken,
    due: Duration,
    effect: E,
}

/// A single-slot timed event on the mission clock.
///
/// Scheduling replaces whatever was pending, so at most one effect is ever
/// outstanding. Time is the caller's logical clock, not wall time.
#[derive(Debug, Clone)]
pub struct Deferred<E> {
    pending: Option<Pending<E>>,
    next_token: u64,
}

impl<E> Default for Deferred<E> {
    fn default() -> Self {
        Self {
            pending: None,
            next_token: 1,
        }
    }
}

impl<E: fmt::Debug> Deferred<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `effect` to fire `delay` after `now`, cancelling any pending effect.
    pub fn schedule(&mut self, now: Duration, delay: Duration, effect: E) -> TimerToken {
        if let Some(old) = self.pending.take() {
            tracing::trace!(token = old.token.0, effect = ?old.effect, "superseded deferred effect");
        }
        let token = TimerToken(self.next_token);
        self.next_token += 1;
        let due = now + delay;
        tracing::trace!(token = token.0, ?due, ?effect, "scheduled deferred effect");
        self.pending = Some(Pending { token, due, effect });
        token
    }

    /// Cancel the pending effect, returning it without applying it.
    pub fn cancel(&mut self) -> Option<E> {
        self.pending.take().map(|p| {
            tracing::trace!(token = p.token.0, effect = ?p.effect, "cancelled deferred effect");
            p.effect
        })
    }

    /// Take the pending effect regardless of its due time.
    pub fn flush(&mut self) -> Option<E> {
        self.pending.take().map(|p| p.effect)
    }

    /// Take the pending effect if the clock has reached its due time.
    pub fn fire(&mut self, now: Duration) -> Option<E> {
        if self.pending.as_ref().is_some_and(|p| now >= p.due) {
            self.pending.take().map(|p| {
                tracing::trace!(token = p.token.0, effect = ?p.effect, "deferred effect fired");
                p.effect
            })
        } else {
            None
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn effect(&self) -> Option<&E> {
        self.pending.as_ref().map(|p| &p.effect)
    }
}
