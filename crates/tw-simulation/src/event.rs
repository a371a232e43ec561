use tw_core::Vector;

/// What kind of telemetry event occurred.
#[derive(Debug, Clone, PartialEq)]
pub enum SimEventKind {
    /// The run loop started.
    Started,
    /// The run loop stopped.
    Stopped {
        /// Total ticks run by the scheduler at the time it stopped.
        ticks: u64,
    },
    /// Kinematic state of an object, typically recorded once per second.
    ObjectSnapshot {
        /// Name of the object.
        object: String,
        /// Position at the time of the snapshot.
        position: Vector,
        /// Velocity at the time of the snapshot.
        velocity: Vector,
        /// Sum of all forces acting on the object.
        total_force: Vector,
    },
    /// Summary of an effect, typically recorded once per second.
    EffectReport {
        /// Name of the effect.
        effect: String,
        /// Number of objects the effect acts on.
        attached: usize,
    },
    /// A user-defined event.
    Custom {
        /// A label identifying the custom event type.
        label: String,
        /// Names of the objects or effects involved.
        entities: Vec<String>,
    },
}

impl SimEventKind {
    /// Check whether the named object or effect is involved in this event.
    pub fn involves(&self, name: &str) -> bool {
        match self {
            Self::Started | Self::Stopped { .. } => false,
            Self::ObjectSnapshot { object, .. } => object == name,
            Self::EffectReport { effect, .. } => effect == name,
            Self::Custom { entities, .. } => entities.iter().any(|e| e == name),
        }
    }
}

/// A record of something that happened during simulation.
#[derive(Debug, Clone)]
pub struct SimEvent {
    /// The simulation tick when this event occurred.
    pub tick: u64,
    /// The specific kind of event that occurred.
    pub kind: SimEventKind,
    /// A human-readable description of the event.
    pub description: String,
}

impl SimEvent {
    /// Create a new event with the given tick, kind, and description.
    pub fn new(tick: u64, kind: SimEventKind, description: impl Into<String>) -> Self {
        Self {
            tick,
            kind,
            description: description.into(),
        }
    }
}

/// Accumulates telemetry during a simulation run.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<SimEvent>,
    max_events: usize,
}

impl EventLog {
    /// Create a new event log with the given maximum capacity (0 = unlimited).
    pub fn new(max_events: usize) -> Self {
        Self {
            events: Vec::new(),
            max_events,
        }
    }

    /// Append an event, dropping the oldest events if the log exceeds its capacity.
    pub fn push(&mut self, event: SimEvent) {
        self.events.push(event);
        if self.max_events > 0 && self.events.len() > self.max_events {
            let drain_count = self.events.len() - self.max_events;
            self.events.drain(..drain_count);
        }
    }

    /// Return a slice of all recorded events.
    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    /// Return all events that occurred at the given tick.
    pub fn events_at_tick(&self, tick: u64) -> Vec<&SimEvent> {
        self.events.iter().filter(|e| e.tick == tick).collect()
    }

    /// Return all events involving the named object or effect.
    pub fn events_for(&self, name: &str) -> Vec<&SimEvent> {
        self.events.iter().filter(|e| e.kind.involves(name)).collect()
    }

    /// Return the number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Return `true` if no events have been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Remove all recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(object: &str) -> SimEventKind {
        SimEventKind::ObjectSnapshot {
            object: object.into(),
            position: Vector::ZERO,
            velocity: Vector::UNIT_X,
            total_force: Vector::ZERO,
        }
    }

    #[test]
    fn event_log_push_and_query() {
        let mut log = EventLog::new(0);
        log.push(SimEvent::new(1, snapshot("probe"), "test"));
        assert_eq!(log.len(), 1);
        assert_eq!(log.events_at_tick(1).len(), 1);
        assert_eq!(log.events_for("probe").len(), 1);
        assert!(log.events_for("moon").is_empty());
    }

    #[test]
    fn event_log_max_events_trims() {
        let mut log = EventLog::new(2);
        for i in 0..5 {
            log.push(SimEvent::new(i, snapshot("probe"), "test"));
        }
        assert_eq!(log.len(), 2);
        // Oldest events were dropped, newest remain
        assert_eq!(log.events()[0].tick, 3);
        assert_eq!(log.events()[1].tick, 4);
    }

    #[test]
    fn event_kind_involves_entity() {
        assert!(snapshot("probe").involves("probe"));
        assert!(!snapshot("probe").involves("moon"));

        let report = SimEventKind::EffectReport {
            effect: "Gravitation".into(),
            attached: 2,
        };
        assert!(report.involves("Gravitation"));
        assert!(!report.involves("probe"));

        let custom = SimEventKind::Custom {
            label: "conjunction".into(),
            entities: vec!["earth".into(), "moon".into()],
        };
        assert!(custom.involves("earth"));
        assert!(custom.involves("moon"));
        assert!(!custom.involves("sun"));

        assert!(!SimEventKind::Started.involves("probe"));
        assert!(!SimEventKind::Stopped { ticks: 3 }.involves("probe"));
    }

    #[test]
    fn event_log_clear() {
        let mut log = EventLog::new(0);
        log.push(SimEvent::new(1, SimEventKind::Started, "started"));
        assert!(!log.is_empty());
        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.len(), 0);
    }

    #[test]
    fn event_log_multi_tick_filtering() {
        let mut log = EventLog::new(0);
        log.push(SimEvent::new(60, snapshot("earth"), "earth"));
        log.push(SimEvent::new(60, snapshot("moon"), "moon"));
        log.push(SimEvent::new(120, snapshot("earth"), "earth"));

        assert_eq!(log.events_at_tick(60).len(), 2);
        assert_eq!(log.events_at_tick(120).len(), 1);
        assert_eq!(log.events_at_tick(180).len(), 0);
        assert_eq!(log.events_for("earth").len(), 2);
        assert_eq!(log.events_for("moon").len(), 1);
    }
}
