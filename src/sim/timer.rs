//! Deterministic one-shot timer queue
//!
//! Stands in for the table's timer scheduler. Timers fire only when the
//! owner pumps [`TimerQueue::pop_due`] between ticks, earliest due first and
//! by id on ties.

use serde::{Deserialize, Serialize};

/// Handle of a scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerId(pub u32);

#[derive(Debug, Clone)]
struct TimerEntry<T> {
    id: TimerId,
    due: f64,
    target: T,
}

#[derive(Debug, Clone)]
pub struct TimerQueue<T> {
    /// Seconds since the queue was created. Kept in f64 so that many small
    /// steps add up without drift.
    now: f64,
    next_id: u32,
    entries: Vec<TimerEntry<T>>,
}

impl<T: Copy> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            now: 0.0,
            next_id: 1,
            entries: Vec::new(),
        }
    }

    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Schedule `target` to fire `delay` seconds from now
    pub fn set(&mut self, delay: f32, target: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push(TimerEntry {
            id,
            due: self.now + f64::from(delay),
            target,
        });
        id
    }

    /// Cancel a pending timer. Returns false if it already fired or was killed.
    pub fn kill(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Move the clock forward without firing anything
    pub fn advance_clock(&mut self, dt: f32) {
        self.now += f64::from(dt);
    }

    /// Remove and return the earliest timer that is due
    pub fn pop_due(&mut self) -> Option<(TimerId, T)> {
        let index = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due <= self.now)
            .min_by(|(_, a), (_, b)| a.due.total_cmp(&b.due).then(a.id.cmp(&b.id)))
            .map(|(i, _)| i)?;
        let entry = self.entries.remove(index);
        Some((entry.id, entry.target))
    }
}
