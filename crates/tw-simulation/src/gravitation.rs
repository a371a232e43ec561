use std::any::Any;

use tracing::debug;
use tw_core::{Activatable, NamedVector, Vector};

use crate::context::TickContext;
use crate::effect::{Effect, EffectState};
use crate::error::SimResult;
use crate::event::SimEventKind;
use crate::object::ObjectHandle;
use crate::registry::{borrow_object, borrow_object_mut};

/// Newton's gravitational constant in m³ kg⁻¹ s⁻².
pub const GRAVITATIONAL_CONSTANT: f64 = 6.674e-11;

/// Name of the force this effect writes into each object.
pub const GRAVITATION_FORCE: &str = "GravitationForce";

/// Pairwise Newtonian gravitation between all attached objects.
///
/// Each tick every attached object `a` receives
/// `G * m_a * Σ m_b (x_b - x_a) / |x_b - x_a|³` over all other attached
/// objects `b`, written as the single force [`GRAVITATION_FORCE`]. Runs in
/// O(n²). Two objects at the same position produce non-finite forces.
#[derive(Debug)]
pub struct GravitationEffect {
    state: EffectState,
    constant: f64,
}

impl GravitationEffect {
    /// Name of the effect.
    pub const NAME: &'static str = "Gravitation";

    /// Create the effect with the given objects in its private view.
    pub fn new(objects: impl IntoIterator<Item = ObjectHandle>) -> SimResult<Self> {
        Ok(Self {
            state: EffectState::new(Self::NAME)?.with_objects(objects)?,
            constant: GRAVITATIONAL_CONSTANT,
        })
    }

    /// Override the gravitational constant.
    pub fn with_constant(mut self, constant: f64) -> Self {
        self.constant = constant;
        self
    }

    /// Start active or inactive.
    pub fn with_active(mut self, active: bool) -> Self {
        self.set_active(active);
        self
    }

    /// The gravitational constant in use.
    pub fn constant(&self) -> f64 {
        self.constant
    }
}

impl Activatable for GravitationEffect {
    fn is_active(&self) -> bool {
        self.state.is_active()
    }

    fn set_active(&mut self, active: bool) {
        self.state.set_active(active);
    }
}

struct Sample {
    name: String,
    handle: ObjectHandle,
    mass: f64,
    position: Vector,
}

impl Effect for GravitationEffect {
    fn state(&self) -> &EffectState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut EffectState {
        &mut self.state
    }

    fn update(&mut self, _ctx: &mut TickContext<'_>) -> SimResult<()> {
        // Sample every object first so all forces are computed from one state.
        let mut samples = Vec::new();
        for (name, handle) in self.objects().registry().entries() {
            let (mass, position) = {
                let object = borrow_object(&name, &handle)?;
                (object.mass(), object.position())
            };
            samples.push(Sample {
                name,
                handle,
                mass,
                position,
            });
        }

        for main in &samples {
            let mut pull = Vector::ZERO;
            for other in &samples {
                if other.name == main.name {
                    continue;
                }
                let line = other.position.subtract(main.position);
                let norm = line.norm();
                pull = pull.sum(line.scale(other.mass / norm.powi(3)));
            }
            let force = NamedVector::new(GRAVITATION_FORCE, pull.scale(self.constant * main.mass))?;
            borrow_object_mut(&main.name, &main.handle)?.set_force(force);
        }
        Ok(())
    }

    fn update_second(&mut self, ctx: &mut TickContext<'_>) -> SimResult<()> {
        let attached = self.objects().len();
        debug!(effect = self.name(), attached, "gravitation report");
        ctx.emit(
            SimEventKind::EffectReport {
                effect: self.name().to_owned(),
                attached,
            },
            format!("[{}] attached objects: {attached}", self.name()),
        );
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
