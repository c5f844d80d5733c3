//! Wall-clock abstraction for time-based routing.

use chrono::Timelike;

/// Supplies the current local hour (0..=23) to time-based routing.
///
/// A trait so tests can pin the hour and exercise the window
/// boundaries deterministically.
pub trait Clock: Send + Sync {
    fn local_hour(&self) -> u32;
}

/// The system wall clock, local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn local_hour(&self) -> u32 {
        chrono::Local::now().hour()
    }
}

/// A clock pinned to a fixed hour.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub u32);

impl Clock for FixedClock {
    fn local_hour(&self) -> u32 {
        self.0
    }
}
