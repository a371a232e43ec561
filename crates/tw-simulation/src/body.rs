use std::collections::HashMap;

use tw_core::{NamedVector, Vector};

use crate::error::{SimError, SimResult};

/// Kinematic state of a point mass and the named forces acting on it.
#[derive(Debug, Clone)]
pub struct Body {
    mass: f64,
    position: Vector,
    velocity: Vector,
    forces: HashMap<String, NamedVector>,
}

impl Body {
    /// Create a body with no forces. The mass must be finite and positive.
    pub fn new(mass: f64, position: Vector, velocity: Vector) -> SimResult<Self> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(SimError::InvalidConfiguration(format!(
                "mass must be finite and positive, got {mass}"
            )));
        }
        Ok(Self {
            mass,
            position,
            velocity,
            forces: HashMap::new(),
        })
    }

    /// Add initial forces, replacing any with the same name.
    pub fn with_forces(mut self, forces: impl IntoIterator<Item = NamedVector>) -> Self {
        for force in forces {
            self.set_force(force);
        }
        self
    }

    /// Mass in kilograms.
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Current position.
    pub fn position(&self) -> Vector {
        self.position
    }

    /// Current velocity.
    pub fn velocity(&self) -> Vector {
        self.velocity
    }

    /// Look up a force by name.
    pub fn force(&self, name: &str) -> Option<&NamedVector> {
        self.forces.get(name)
    }

    /// Iterate over all stored forces in no particular order.
    pub fn forces(&self) -> impl Iterator<Item = &NamedVector> {
        self.forces.values()
    }

    /// Number of distinct named forces.
    pub fn force_count(&self) -> usize {
        self.forces.len()
    }

    /// Superposition of all stored forces.
    pub fn total_force(&self) -> Vector {
        self.forces
            .values()
            .fold(Vector::ZERO, |total, force| total.sum(force.vector()))
    }

    /// Insert a force, returning the one it replaced under the same name.
    pub fn set_force(&mut self, force: NamedVector) -> Option<NamedVector> {
        self.forces.insert(force.name().to_owned(), force)
    }

    /// Remove a force by name. Unknown names are ignored.
    pub fn remove_force(&mut self, name: &str) -> Option<NamedVector> {
        self.forces.remove(name)
    }

    /// Advance by `dt` seconds with semi-implicit Euler: the velocity is
    /// updated first and the new velocity moves the position.
    pub fn integrate(&mut self, dt: f64) {
        let acceleration = self.total_force().scale(1.0 / self.mass);
        let delta_velocity = acceleration.scale(dt);
        self.velocity = self.velocity.sum(delta_velocity);
        let delta_position = self.velocity.scale(dt);
        self.position = self.position.sum(delta_position);
    }
}
