use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tw_core::{Activatable, Activation, NamedVector, TwError, Vector};

use crate::body::Body;
use crate::context::TickContext;
use crate::error::SimResult;
use crate::scheduler::SchedulerId;

/// Single-threaded shared ownership with interior mutability.
pub type Shared<T> = Rc<RefCell<T>>;

/// A physical object shared between the caller, the scheduler, and effects.
pub type ObjectHandle = Shared<dyn PhysicalObject>;

/// Wrap a value for sharing. A `Shared<MassPoint>` coerces to an [`ObjectHandle`].
pub fn share<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}

/// State common to every physical object: identity, activation, kinematics,
/// and the scheduler it is registered with.
#[derive(Debug, Clone)]
pub struct ObjectState {
    name: String,
    activation: Activation,
    body: Body,
    owner: Option<SchedulerId>,
}

impl ObjectState {
    /// Create an active, unregistered object state.
    pub fn new(name: impl Into<String>, body: Body) -> SimResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(TwError::EmptyName.into());
        }
        Ok(Self {
            name,
            activation: Activation::default(),
            body,
            owner: None,
        })
    }

    /// Start active or inactive.
    pub fn with_active(mut self, active: bool) -> Self {
        self.activation.set_active(active);
        self
    }

    /// The unique object name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Kinematic state and forces.
    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Mutable kinematic state and forces.
    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    /// The scheduler this object is registered with, if any.
    pub fn owner(&self) -> Option<SchedulerId> {
        self.owner
    }

    pub(crate) fn set_owner(&mut self, owner: Option<SchedulerId>) {
        self.owner = owner;
    }
}

impl Activatable for ObjectState {
    fn is_active(&self) -> bool {
        self.activation.is_active()
    }

    fn set_active(&mut self, active: bool) {
        self.activation.set_active(active);
    }
}

/// A simulated point mass.
///
/// Implementors embed an [`ObjectState`] and supply the two hooks. The
/// integration step in [`PhysicalObject::update`] is shared by every object
/// and should not be overridden.
pub trait PhysicalObject: Activatable + fmt::Debug {
    /// Shared object state.
    fn state(&self) -> &ObjectState;

    /// Mutable shared object state.
    fn state_mut(&mut self) -> &mut ObjectState;

    /// Called at the start of every update, before forces are integrated.
    fn tick(&mut self, ctx: &mut TickContext<'_>) -> SimResult<()>;

    /// Called once per simulated second.
    fn tick_second(&mut self, ctx: &mut TickContext<'_>) -> SimResult<()>;

    /// The unique object name.
    fn name(&self) -> &str {
        self.state().name()
    }

    /// Mass in kilograms.
    fn mass(&self) -> f64 {
        self.state().body().mass()
    }

    /// Current position.
    fn position(&self) -> Vector {
        self.state().body().position()
    }

    /// Current velocity.
    fn velocity(&self) -> Vector {
        self.state().body().velocity()
    }

    /// Superposition of all forces currently acting on the object.
    fn total_force(&self) -> Vector {
        self.state().body().total_force()
    }

    /// Insert or replace a force by its name.
    fn set_force(&mut self, force: NamedVector) -> Option<NamedVector> {
        self.state_mut().body_mut().set_force(force)
    }

    /// Remove a force by name; a no-op for unknown names.
    fn remove_force(&mut self, name: &str) -> Option<NamedVector> {
        self.state_mut().body_mut().remove_force(name)
    }

    /// Run one tick: the per-tick hook, then semi-implicit Euler integration
    /// over one tick duration. Inactive objects are left untouched.
    fn update(&mut self, ctx: &mut TickContext<'_>) -> SimResult<()> {
        if !self.is_active() {
            return Ok(());
        }
        self.tick(ctx)?;
        let dt = ctx.seconds_per_tick();
        self.state_mut().body_mut().integrate(dt);
        Ok(())
    }

    /// Run the per-second hook. Inactive objects are skipped.
    fn update_second(&mut self, ctx: &mut TickContext<'_>) -> SimResult<()> {
        if !self.is_active() {
            return Ok(());
        }
        self.tick_second(ctx)
    }
}
