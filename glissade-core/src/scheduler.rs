//! Cancellable delayed tasks, one slot per kind.
//!
//! Nothing here runs on its own: the owner polls [`TimerQueue::take_due`]
//! from its frame tick, so a cancelled or replaced timer can never fire into
//! torn-down state.

use std::time::Instant;

/// When a scheduled task becomes due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deadline {
    /// Due on the next poll, whatever its timestamp.
    NextPoll,
    At(Instant),
}

impl Deadline {
    fn is_due(&self, now: Instant) -> bool {
        match self {
            Deadline::NextPoll => true,
            Deadline::At(at) => *at <= now,
        }
    }
}

#[derive(Debug)]
pub struct TimerQueue<K> {
    slots: Vec<(K, Deadline)>,
}

impl<K> Default for TimerQueue<K> {
    fn default() -> Self {
        Self { slots: Vec::new() }
    }
}

impl<K: Copy + PartialEq> TimerQueue<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `kind`, replacing any pending timer of the same kind.
    pub fn schedule(&mut self, kind: K, deadline: Deadline) {
        self.cancel(kind);
        self.slots.push((kind, deadline));
    }

    pub fn schedule_at(&mut self, kind: K, at: Instant) {
        self.schedule(kind, Deadline::At(at));
    }

    /// Returns whether a timer of this kind was pending.
    pub fn cancel(&mut self, kind: K) -> bool {
        let before = self.slots.len();
        self.slots.retain(|(k, _)| *k != kind);
        before != self.slots.len()
    }

    pub fn cancel_all(&mut self) {
        self.slots.clear();
    }

    /// Remove and return every timer due at `now`, earliest first.
    pub fn take_due(&mut self, now: Instant) -> Vec<K> {
        let mut due: Vec<(K, Deadline)> = Vec::new();
        self.slots.retain(|(kind, deadline)| {
            if deadline.is_due(now) {
                due.push((*kind, *deadline));
                false
            } else {
                true
            }
        });
        due.sort_by_key(|(_, deadline)| match deadline {
            Deadline::NextPoll => None,
            Deadline::At(at) => Some(*at),
        });
        due.into_iter().map(|(kind, _)| kind).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
