use tw_core::Tolerance;

use crate::clock::TickClock;
use crate::config::SimConfig;
use crate::event::{EventLog, SimEvent, SimEventKind};
use crate::scheduler::RunHandle;

/// Mutable context passed to object and effect hooks during a tick.
pub struct TickContext<'a> {
    /// The configuration of the running simulation.
    pub config: &'a SimConfig,
    /// The tick clock, already advanced to the tick being run.
    pub clock: &'a TickClock,
    /// Telemetry sink for snapshots and reports.
    pub events: &'a mut EventLog,
    run: &'a RunHandle,
}

impl<'a> TickContext<'a> {
    /// Assemble a context. The scheduler does this for every dispatch; build
    /// one yourself to step an unregistered object by hand.
    pub fn new(
        config: &'a SimConfig,
        clock: &'a TickClock,
        events: &'a mut EventLog,
        run: &'a RunHandle,
    ) -> Self {
        Self {
            config,
            clock,
            events,
            run,
        }
    }

    /// Emit a telemetry event at the current tick.
    pub fn emit(&mut self, kind: SimEventKind, description: impl Into<String>) {
        self.events
            .push(SimEvent::new(self.clock.tick(), kind, description));
    }

    /// The current tick number.
    pub fn tick(&self) -> u64 {
        self.clock.tick()
    }

    /// Duration of one tick in seconds.
    pub fn seconds_per_tick(&self) -> f64 {
        self.clock.seconds_per_tick()
    }

    /// The configured comparison tolerance.
    pub fn tolerance(&self) -> Tolerance {
        self.config.tolerance
    }

    /// Ask the run loop to stop once the current iteration finishes.
    pub fn request_stop(&self) {
        self.run.stop();
    }
}
