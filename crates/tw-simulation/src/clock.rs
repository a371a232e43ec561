use std::time::{Duration, Instant};

use crate::config::SimConfig;

/// A monotonic source of time, read once per loop iteration.
pub trait TimeSource {
    /// Time elapsed since an arbitrary, fixed origin. Must never decrease.
    fn now(&mut self) -> Duration;
}

/// Wall-clock time backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct MonotonicTime {
    origin: Instant,
}

impl MonotonicTime {
    /// Start measuring from the current instant.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicTime {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicTime {
    fn now(&mut self) -> Duration {
        self.origin.elapsed()
    }
}

/// Deterministic time that moves forward by a fixed step on every read.
///
/// The first read returns zero. Useful for offline stepping and tests.
#[derive(Debug, Clone)]
pub struct SteppedTime {
    now: Duration,
    step: Duration,
}

impl SteppedTime {
    /// Create a source that advances by `step` per read.
    pub fn new(step: Duration) -> Self {
        Self {
            now: Duration::ZERO,
            step,
        }
    }

    /// A source that advances by exactly one tick of `config` per read.
    ///
    /// The step is rounded up to the next nanosecond so that every read makes
    /// at least one tick due.
    pub fn per_tick(config: &SimConfig) -> Self {
        let nanos = 1_000_000_000u64.div_ceil(u64::from(config.ticks_per_second.max(1)));
        Self::new(Duration::from_nanos(nanos))
    }
}

impl TimeSource for SteppedTime {
    fn now(&mut self) -> Duration {
        let now = self.now;
        self.now += self.step;
        now
    }
}

/// Fixed-timestep accumulator and tick counters.
///
/// The accumulator measures elapsed time in units of whole ticks: each call
/// to [`TickClock::accumulate`] adds `elapsed / seconds_per_tick`, and a tick
/// is due while it holds at least `1.0`.
#[derive(Debug, Clone)]
pub struct TickClock {
    seconds_per_tick: f64,
    ticks_per_second: u32,
    accumulator: f64,
    ticks_since_second: u32,
    tick: u64,
    seconds: u64,
}

impl TickClock {
    /// Create a clock at tick 0 with an empty accumulator.
    pub fn new(config: &SimConfig) -> Self {
        Self {
            seconds_per_tick: config.seconds_per_tick(),
            ticks_per_second: config.ticks_per_second,
            accumulator: 0.0,
            ticks_since_second: 0,
            tick: 0,
            seconds: 0,
        }
    }

    /// Add elapsed wall time to the accumulator.
    pub fn accumulate(&mut self, elapsed: Duration) {
        self.accumulator += elapsed.as_secs_f64() / self.seconds_per_tick;
    }

    /// Returns true if at least one whole tick has accumulated.
    pub fn tick_due(&self) -> bool {
        self.accumulator >= 1.0
    }

    /// Remove one tick's worth of time from the accumulator.
    pub fn consume_tick(&mut self) {
        self.accumulator -= 1.0;
    }

    /// Count one completed tick. Returns `true` when this tick completes a
    /// simulated second, in which case the per-second counter is reset.
    pub fn advance(&mut self) -> bool {
        self.tick += 1;
        self.ticks_since_second += 1;
        if self.ticks_since_second >= self.ticks_per_second {
            self.ticks_since_second = 0;
            self.seconds += 1;
            return true;
        }
        false
    }

    /// Number of ticks run so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Ticks run since the last completed second.
    pub fn ticks_since_second(&self) -> u32 {
        self.ticks_since_second
    }

    /// Number of completed simulated seconds.
    pub fn seconds(&self) -> u64 {
        self.seconds
    }

    /// Pending time in units of ticks.
    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    /// Duration of one tick in seconds.
    pub fn seconds_per_tick(&self) -> f64 {
        self.seconds_per_tick
    }

    /// Configured ticks per simulated second.
    pub fn ticks_per_second(&self) -> u32 {
        self.ticks_per_second
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_initial_state() {
        let clock = TickClock::new(&SimConfig::default());
        assert_eq!(clock.tick(), 0);
        assert_eq!(clock.ticks_since_second(), 0);
        assert_eq!(clock.seconds(), 0);
        assert!(!clock.tick_due());
    }

    #[test]
    fn accumulator_counts_in_ticks() {
        let mut clock = TickClock::new(&SimConfig::default());
        // Two and a half ticks at 60 Hz
        clock.accumulate(Duration::from_secs_f64(2.5 / 60.0));
        // from_secs_f64 truncates to whole nanoseconds
        assert!((clock.accumulator() - 2.5).abs() < 1e-6);

        let mut due = 0;
        while clock.tick_due() {
            clock.consume_tick();
            due += 1;
        }
        assert_eq!(due, 2);
        assert!((clock.accumulator() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn partial_ticks_carry_over() {
        let mut clock = TickClock::new(&SimConfig::default());
        let third = Duration::from_secs_f64(1.0 / 180.0);
        clock.accumulate(third);
        clock.accumulate(third);
        assert!(!clock.tick_due());
        clock.accumulate(third + Duration::from_nanos(10));
        assert!(clock.tick_due());
    }

    #[test]
    fn advance_reports_second_boundary() {
        let mut clock = TickClock::new(&SimConfig::default().with_ticks_per_second(4));
        assert!(!clock.advance());
        assert!(!clock.advance());
        assert!(!clock.advance());
        assert!(clock.advance());
        assert_eq!(clock.tick(), 4);
        assert_eq!(clock.ticks_since_second(), 0);
        assert_eq!(clock.seconds(), 1);
        assert!(!clock.advance());
        assert_eq!(clock.ticks_since_second(), 1);
    }

    #[test]
    fn stepped_time_starts_at_zero() {
        let mut time = SteppedTime::new(Duration::from_millis(5));
        assert_eq!(time.now(), Duration::ZERO);
        assert_eq!(time.now(), Duration::from_millis(5));
        assert_eq!(time.now(), Duration::from_millis(10));
    }

    #[test]
    fn per_tick_step_makes_exactly_one_tick_due() {
        let config = SimConfig::default();
        let mut time = SteppedTime::per_tick(&config);
        let mut clock = TickClock::new(&config);
        let mut previous = time.now();
        for _ in 0..120 {
            let now = time.now();
            clock.accumulate(now - previous);
            previous = now;
            assert!(clock.tick_due());
            clock.consume_tick();
            assert!(!clock.tick_due());
        }
    }

    #[test]
    fn monotonic_time_never_decreases() {
        let mut time = MonotonicTime::new();
        let a = time.now();
        let b = time.now();
        assert!(b >= a);
    }
}
