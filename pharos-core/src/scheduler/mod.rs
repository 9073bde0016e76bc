//! Delayed-continuation scheduler
//!
//! The panel never blocks. Work that has to happen later (the next bit of a
//! display frame, the release of a relay pulse) is expressed as a job value,
//! wrapped in a [`Deferred`] and armed in a [`DelayQueue`]. The owning loop
//! sleeps until [`DelayQueue::next_due`] and then drains everything due.

pub mod clock;
pub mod delay_queue;

pub use clock::{Clock, ManualClock};
pub use delay_queue::{Deferred, DelayQueue, ScheduleError, MAX_ARMED};
