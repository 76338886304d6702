//! General time utility functions
//!
//! The arm software never reads wall-clock time inside the control cycle. All timing is derived
//! from a [`Clock`] counting fixed-period cycles, so a run is reproducible whether it is driven
//! in real time or as fast as possible in a test.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::time::Duration;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Number of nanoseconds in a second
pub const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// Longest duration a timer can be asked to wait for.
const MAX_WAIT_S: f64 = 1.0e9;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Cycle clock, advanced once at the start of every control cycle.
#[derive(Debug, Clone)]
pub struct Clock {
    period: Duration,
    num_cycles: u64,
}

/// Measures time elapsed on a [`Clock`] since the timer was started.
#[derive(Debug, Clone, Copy, Default)]
pub struct Timer {
    start: Option<Duration>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Clock {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            num_cycles: 0,
        }
    }

    /// Advance the clock by one cycle.
    pub fn advance(&mut self) {
        self.num_cycles += 1;
    }

    /// Time since the clock was created.
    pub fn now(&self) -> Duration {
        let nanos = self
            .period
            .as_nanos()
            .saturating_mul(u128::from(self.num_cycles));
        let nanos_per_sec = NANOS_PER_SECOND as u128;

        Duration::new(
            (nanos / nanos_per_sec) as u64,
            (nanos % nanos_per_sec) as u32,
        )
    }

    /// Time since the clock was created, in seconds.
    pub fn elapsed_s(&self) -> f64 {
        self.now().as_secs_f64()
    }

    /// Number of cycles counted so far.
    pub fn num_cycles(&self) -> u64 {
        self.num_cycles
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl Timer {
    /// (Re)start the timer at the clock's current time.
    pub fn start(&mut self, clock: &Clock) {
        self.start = Some(clock.now());
    }

    /// Stop the timer.
    pub fn stop(&mut self) {
        self.start = None;
    }

    /// Time elapsed since the timer was started, or zero if it is not running.
    pub fn elapsed(&self, clock: &Clock) -> Duration {
        match self.start {
            Some(s) => clock.now().checked_sub(s).unwrap_or_default(),
            None => Duration::default(),
        }
    }

    /// True if the timer is running and at least `secs` seconds have elapsed.
    pub fn has_elapsed(&self, clock: &Clock, secs: f64) -> bool {
        self.start.is_some() && self.elapsed(clock) >= seconds_to_duration(secs)
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Convert a duration into a number of seconds, or `None` if overflow
pub fn duration_to_seconds(duration: chrono::Duration) -> Option<f64> {
    duration
        .num_nanoseconds()
        .map(|ns| ns as f64 / NANOS_PER_SECOND as f64)
}

/// Convert a number of seconds into a duration.
///
/// Negative and NaN values give zero, very large values saturate.
pub fn seconds_to_duration(secs: f64) -> Duration {
    if secs > MAX_WAIT_S {
        Duration::from_secs_f64(MAX_WAIT_S)
    } else if secs > 0.0 {
        Duration::from_secs_f64(secs)
    } else {
        Duration::default()
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
