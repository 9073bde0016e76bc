//! Time sources for the cooperative loop

use core::cell::Cell;

/// Monotonic millisecond clock driving the panel
///
/// The board implements this on its uptime timer; tests use [`ManualClock`].
pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin
    fn now_ms(&self) -> u64;

    /// Seconds-of-minute value shown on the display (0-59)
    fn second_of_minute(&self) -> u8 {
        ((self.now_ms() / 1000) % 60) as u8
    }
}

/// Manually advanced virtual clock
///
/// Time only moves when the owner calls [`ManualClock::advance`] or
/// [`ManualClock::set`], which makes every delayed continuation deterministic.
#[derive(Debug, Default)]
pub struct ManualClock {
    now_ms: Cell<u64>,
}

impl ManualClock {
    /// Create a clock reading `start_ms`
    pub const fn new(start_ms: u64) -> Self {
        Self {
            now_ms: Cell::new(start_ms),
        }
    }

    /// Move time forward by `delta_ms`
    pub fn advance(&self, delta_ms: u64) {
        self.now_ms.set(self.now_ms.get() + delta_ms);
    }

    /// Jump to an absolute time
    ///
    /// Moving backwards is ignored; the clock is monotonic.
    pub fn set(&self, now_ms: u64) {
        if now_ms > self.now_ms.get() {
            self.now_ms.set(now_ms);
        }
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now_ms.get()
    }
}
