//! Elapsed-time clock
//!
//! The host's monotonic counter is only trusted on the main thread, and only
//! once: at startup the offset between wall clock and host time is captured as
//! the epoch. Every later reading is `wall clock - epoch`, which any thread may
//! compute.

use chrono::{DateTime, Utc};
use std::time::{Duration, Instant};

/// Host-provided monotonic time since startup
///
/// Only called from `Clock::start`, on the thread that owns the host.
pub trait HostClock {
    fn since_startup(&self) -> Duration;
}

/// `HostClock` backed by `Instant`, for hosts without their own counter
#[derive(Debug, Clone, Copy)]
pub struct ProcessClock {
    started: Instant,
}

impl ProcessClock {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }
}

impl Default for ProcessClock {
    fn default() -> Self {
        Self::new()
    }
}

impl HostClock for ProcessClock {
    fn since_startup(&self) -> Duration {
        self.started.elapsed()
    }
}

/// Epoch-relative clock safe to read from any thread
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    epoch: DateTime<Utc>,
}

impl Clock {
    /// Capture the epoch as `now - host.since_startup()`
    pub fn start(host: &dyn HostClock) -> Self {
        Self::start_at(Utc::now(), host.since_startup())
    }

    /// Capture the epoch from explicit readings
    pub fn start_at(wall: DateTime<Utc>, since_startup: Duration) -> Self {
        let offset = chrono::Duration::from_std(since_startup).unwrap_or(chrono::Duration::zero());
        Self {
            epoch: wall - offset,
        }
    }

    pub fn epoch(&self) -> DateTime<Utc> {
        self.epoch
    }

    /// Seconds elapsed since the epoch
    pub fn now(&self) -> f64 {
        self.elapsed_at(Utc::now())
    }

    /// Seconds between the epoch and `wall`
    pub fn elapsed_at(&self, wall: DateTime<Utc>) -> f64 {
        let delta = wall - self.epoch;
        match delta.num_microseconds() {
            Some(us) => us as f64 / 1_000_000.0,
            None => delta.num_milliseconds() as f64 / 1_000.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    struct FixedHost(Duration);

    impl HostClock for FixedHost {
        fn since_startup(&self) -> Duration {
            self.0
        }
    }

    fn wall(secs: i64, millis: u32) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, millis * 1_000_000).unwrap()
    }

    #[test]
    fn test_epoch_subtracts_host_time() {
        let clock = Clock::start_at(wall(1_000, 0), Duration::from_secs(12));
        assert_eq!(clock.epoch(), wall(988, 0));
        assert!((clock.elapsed_at(wall(1_000, 0)) - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_elapsed_has_sub_second_precision() {
        let clock = Clock::start_at(wall(50, 0), Duration::ZERO);
        assert!((clock.elapsed_at(wall(51, 250)) - 1.25).abs() < 1e-9);
    }

    #[test]
    fn test_elapsed_does_not_depend_on_host_after_start() {
        let host = FixedHost(Duration::from_millis(1_500));
        let clock = Clock::start(&host);
        let first = clock.now();
        assert!(first >= 1.5);
        // Host counter resets have no effect; the host is never read again.
        let second = clock.now();
        assert!(second >= first);
    }

    #[test]
    fn test_process_clock_is_monotonic() {
        let host = ProcessClock::new();
        let a = host.since_startup();
        let b = host.since_startup();
        assert!(b >= a);
    }
}
