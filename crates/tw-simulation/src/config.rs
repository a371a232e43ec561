use std::time::Duration;

use tw_core::Tolerance;

use crate::error::{SimError, SimResult};

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Simulation ticks per simulated second.
    pub ticks_per_second: u32,
    /// Tolerance handed to hooks through [`TickContext::tolerance`](crate::context::TickContext::tolerance).
    ///
    /// The scheduler itself compares nothing, and `Vector`'s `==` always uses
    /// [`Tolerance::DEFAULT`]; hooks pass this value to `approx_eq`,
    /// `normalized_within` or `is_parallel_within` instead.
    pub tolerance: Tolerance,
    /// How long the run loop waits when no tick was due (zero = spin).
    pub idle_wait: Duration,
    /// Maximum event log size (oldest events dropped when exceeded). 0 = unlimited.
    pub max_events: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            ticks_per_second: 60,
            tolerance: Tolerance::DEFAULT,
            idle_wait: Duration::from_millis(1),
            max_events: 0,
        }
    }
}

impl SimConfig {
    /// Set the number of ticks per simulated second.
    pub fn with_ticks_per_second(mut self, ticks: u32) -> Self {
        self.ticks_per_second = ticks;
        self
    }

    /// Set the comparison tolerance.
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the idle wait between polls of the time source.
    pub fn with_idle_wait(mut self, wait: Duration) -> Self {
        self.idle_wait = wait;
        self
    }

    /// Set the maximum event log size (0 = unlimited).
    pub fn with_max_events(mut self, max: usize) -> Self {
        self.max_events = max;
        self
    }

    /// Duration of one tick in seconds.
    pub fn seconds_per_tick(&self) -> f64 {
        1.0 / f64::from(self.ticks_per_second)
    }

    /// Check that the configuration can drive a simulation.
    pub fn validate(&self) -> SimResult<()> {
        if self.ticks_per_second == 0 {
            return Err(SimError::InvalidConfiguration(
                "ticks_per_second must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default_values() {
        let config = SimConfig::default();
        assert_eq!(config.ticks_per_second, 60);
        assert_eq!(config.tolerance, Tolerance::DEFAULT);
        assert_eq!(config.idle_wait, Duration::from_millis(1));
        assert_eq!(config.max_events, 0);
        assert!((config.seconds_per_tick() - 1.0 / 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn config_builder_chain() {
        let config = SimConfig::default()
            .with_ticks_per_second(30)
            .with_tolerance(Tolerance::new(1e-6).unwrap())
            .with_idle_wait(Duration::ZERO)
            .with_max_events(500);
        assert_eq!(config.ticks_per_second, 30);
        assert!((config.tolerance.epsilon() - 1e-6).abs() < f64::EPSILON);
        assert!(config.idle_wait.is_zero());
        assert_eq!(config.max_events, 500);
        assert!((config.seconds_per_tick() - 1.0 / 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_ticks_per_second_is_invalid() {
        let err = SimConfig::default()
            .with_ticks_per_second(0)
            .validate()
            .unwrap_err();
        assert!(matches!(err, SimError::InvalidConfiguration(_)));
        assert!(SimConfig::default().validate().is_ok());
    }
}
