use tracing::{debug, trace};
use tw_core::{Activatable, NamedVector, Vector};

use crate::body::Body;
use crate::context::TickContext;
use crate::error::SimResult;
use crate::event::SimEventKind;
use crate::object::{ObjectState, PhysicalObject};

/// A plain point mass. Its hooks only report; all motion comes from forces.
#[derive(Debug, Clone)]
pub struct MassPoint {
    state: ObjectState,
}

impl MassPoint {
    /// Create an active mass point with no forces.
    pub fn new(
        name: impl Into<String>,
        mass: f64,
        position: Vector,
        velocity: Vector,
    ) -> SimResult<Self> {
        let body = Body::new(mass, position, velocity)?;
        Ok(Self {
            state: ObjectState::new(name, body)?,
        })
    }

    /// Start with the given forces already applied.
    pub fn with_forces(mut self, forces: impl IntoIterator<Item = NamedVector>) -> Self {
        for force in forces {
            self.set_force(force);
        }
        self
    }

    /// Start active or inactive.
    pub fn with_active(mut self, active: bool) -> Self {
        self.set_active(active);
        self
    }
}

impl Activatable for MassPoint {
    fn is_active(&self) -> bool {
        self.state.is_active()
    }

    fn set_active(&mut self, active: bool) {
        self.state.set_active(active);
    }
}

impl PhysicalObject for MassPoint {
    fn state(&self) -> &ObjectState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ObjectState {
        &mut self.state
    }

    fn tick(&mut self, ctx: &mut TickContext<'_>) -> SimResult<()> {
        trace!(object = self.name(), tick = ctx.tick(), "mass point tick");
        Ok(())
    }

    fn tick_second(&mut self, ctx: &mut TickContext<'_>) -> SimResult<()> {
        let position = self.position();
        let velocity = self.velocity();
        let total_force = self.total_force();
        debug!(
            object = self.name(),
            %position,
            %velocity,
            %total_force,
            "mass point state"
        );
        ctx.emit(
            SimEventKind::ObjectSnapshot {
                object: self.name().to_owned(),
                position,
                velocity,
                total_force,
            },
            format!(
                "{}: position={position} velocity={velocity} total force={total_force}",
                self.name()
            ),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::TickClock;
    use crate::config::SimConfig;
    use crate::event::EventLog;
    use crate::scheduler::RunHandle;

    fn force(name: &str, v: Vector) -> NamedVector {
        NamedVector::new(name, v).unwrap()
    }

    #[test]
    fn construction_validates() {
        assert!(MassPoint::new("", 1.0, Vector::ZERO, Vector::ZERO).is_err());
        assert!(MassPoint::new("rock", 0.0, Vector::ZERO, Vector::ZERO).is_err());
        let rock = MassPoint::new("rock", 3.0, Vector::UNIT_Y, Vector::UNIT_Z).unwrap();
        assert_eq!(rock.name(), "rock");
        assert!(rock.is_active());
        assert!(rock.state().owner().is_none());
        assert!(!rock.with_active(false).is_active());
    }

    #[test]
    fn integration_law_after_one_update() {
        let config = SimConfig::default();
        let mut clock = TickClock::new(&config);
        clock.advance();
        let mut events = EventLog::default();
        let run = RunHandle::new();
        let mut ctx = TickContext::new(&config, &clock, &mut events, &run);

        let v0 = Vector::new(1.0, -2.0, 0.5);
        let x0 = Vector::new(10.0, 0.0, 0.0);
        let mut rock = MassPoint::new("rock", 4.0, x0, v0)
            .unwrap()
            .with_forces([
                force("Thrust", Vector::new(8.0, 0.0, 0.0)),
                force("Wind", Vector::new(0.0, 4.0, -4.0)),
            ]);
        rock.update(&mut ctx).unwrap();

        let dt = 1.0 / 60.0;
        let expected_v = v0 + Vector::new(8.0, 4.0, -4.0) * (dt / 4.0);
        assert_eq!(rock.velocity(), expected_v);
        assert_eq!(rock.position(), x0 + expected_v * dt);
    }

    #[test]
    fn inactive_mass_point_is_not_moved() {
        let config = SimConfig::default();
        let clock = TickClock::new(&config);
        let mut events = EventLog::default();
        let run = RunHandle::new();
        let mut ctx = TickContext::new(&config, &clock, &mut events, &run);

        let mut rock = MassPoint::new("rock", 1.0, Vector::ZERO, Vector::UNIT_X)
            .unwrap()
            .with_forces([force("Thrust", Vector::UNIT_Y)]);
        rock.deactivate();
        rock.update(&mut ctx).unwrap();
        rock.update_second(&mut ctx).unwrap();

        assert_eq!(rock.position().to_array(), [0.0, 0.0, 0.0]);
        assert_eq!(rock.velocity().to_array(), [1.0, 0.0, 0.0]);
        assert!(events.is_empty());
    }

    #[test]
    fn tick_second_records_snapshot() {
        let config = SimConfig::default();
        let clock = TickClock::new(&config);
        let mut events = EventLog::default();
        let run = RunHandle::new();
        let mut ctx = TickContext::new(&config, &clock, &mut events, &run);

        let mut rock = MassPoint::new("rock", 1.0, Vector::UNIT_X, Vector::ZERO)
            .unwrap()
            .with_forces([force("Thrust", Vector::new(0.0, 2.0, 0.0))]);
        rock.update_second(&mut ctx).unwrap();

        assert_eq!(events.len(), 1);
        let event = &events.events()[0];
        assert_eq!(
            event.kind,
            SimEventKind::ObjectSnapshot {
                object: "rock".into(),
                position: Vector::UNIT_X,
                velocity: Vector::ZERO,
                total_force: Vector::new(0.0, 2.0, 0.0),
            }
        );
        insta::assert_snapshot!(
            event.description,
            @"rock: position=(1.00, 0.00, 0.00) velocity=(0.00, 0.00, 0.00) total force=(0.00, 2.00, 0.00)"
        );
    }
}
