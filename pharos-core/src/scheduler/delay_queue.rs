//! One-shot delayed continuations
//!
//! A [`Deferred`] is the inert result of scheduling: it records how long to
//! wait and what to run, but does nothing until it is armed in a
//! [`DelayQueue`]. Once armed, the entry fires exactly once, when the owner
//! polls the queue at or after its due time.

use heapless::Vec;

/// Maximum number of armed continuations
///
/// One shift step plus one release per relay line covers normal operation;
/// the rest absorbs repeated pulse commands inside a single hold window.
pub const MAX_ARMED: usize = 32;

/// Scheduling errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScheduleError {
    /// Every slot holds an armed continuation
    QueueFull,
}

/// A continuation waiting to be armed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Deferred<J> {
    /// Delay from the arming instant
    pub delay_ms: u32,
    /// Work to run once the delay has elapsed
    pub job: J,
}

impl<J> Deferred<J> {
    /// Wrap `job` to run `delay_ms` after it is armed
    pub const fn new(delay_ms: u32, job: J) -> Self {
        Self { delay_ms, job }
    }
}

#[derive(Debug, Clone, Copy)]
struct Armed<J> {
    due_ms: u64,
    seq: u32,
    job: J,
}

/// Bounded set of armed one-shot continuations
///
/// Entries fire earliest deadline first; entries sharing a deadline fire in
/// the order they were armed.
#[derive(Debug)]
pub struct DelayQueue<J, const N: usize = MAX_ARMED> {
    entries: Vec<Armed<J>, N>,
    next_seq: u32,
}

impl<J, const N: usize> Default for DelayQueue<J, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<J, const N: usize> DelayQueue<J, N> {
    /// Create an empty queue
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_seq: 0,
        }
    }

    /// Arm `deferred` relative to `now_ms`
    ///
    /// Returns the absolute deadline of the new entry.
    pub fn arm(&mut self, now_ms: u64, deferred: Deferred<J>) -> Result<u64, ScheduleError> {
        let due_ms = now_ms + u64::from(deferred.delay_ms);
        let seq = self.next_seq;

        self.entries
            .push(Armed {
                due_ms,
                seq,
                job: deferred.job,
            })
            .map_err(|_| ScheduleError::QueueFull)?;

        self.next_seq = self.next_seq.wrapping_add(1);
        Ok(due_ms)
    }

    /// Remove and return the earliest entry due at `now_ms`
    ///
    /// Returns the entry's own deadline alongside the job so a continuation
    /// can re-arm relative to when it was due rather than when it was polled.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<(u64, J)> {
        let position = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.due_ms <= now_ms)
            .min_by_key(|(_, entry)| (entry.due_ms, self.age(entry.seq)))
            .map(|(index, _)| index)?;

        let entry = self.entries.swap_remove(position);
        Some((entry.due_ms, entry.job))
    }

    /// Earliest armed deadline
    pub fn next_due(&self) -> Option<u64> {
        self.entries.iter().map(|entry| entry.due_ms).min()
    }

    /// Number of armed entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is armed
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Slots not yet holding an armed entry
    pub fn free(&self) -> usize {
        N - self.entries.len()
    }

    /// Iterate over the armed jobs in no particular order
    pub fn jobs(&self) -> impl Iterator<Item = &J> {
        self.entries.iter().map(|entry| &entry.job)
    }

    // Arming order survives sequence wrap-around
    fn age(&self, seq: u32) -> u32 {
        seq.wrapping_sub(self.next_seq)
    }
}
