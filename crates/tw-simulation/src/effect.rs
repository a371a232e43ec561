use std::any::Any;
use std::fmt;

use tw_core::{Activatable, Activation, TwError};

use crate::context::TickContext;
use crate::error::{SimError, SimResult};
use crate::object::ObjectHandle;
use crate::registry::{ObjectRegistry, ObjectViewMode};
use crate::scheduler::SchedulerId;

/// The objects an effect acts on.
///
/// A private view is a set owned by the effect. A shared view aliases the
/// scheduler's registry; its membership follows the scheduler and cannot be
/// edited through the effect.
#[derive(Debug, Default)]
pub struct AttachedObjects {
    registry: ObjectRegistry,
    mode: ObjectViewMode,
}

impl AttachedObjects {
    /// Which kind of view this is.
    pub fn mode(&self) -> ObjectViewMode {
        self.mode
    }

    /// The underlying registry.
    pub fn registry(&self) -> &ObjectRegistry {
        &self.registry
    }

    /// Number of attached objects.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Returns `true` if no objects are attached.
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Returns `true` if an object with this name is attached.
    pub fn contains(&self, name: &str) -> bool {
        self.registry.contains(name)
    }

    pub(crate) fn share(&mut self, registry: ObjectRegistry) {
        self.registry = registry;
        self.mode = ObjectViewMode::SharedWithScheduler;
    }

    /// Drop a shared alias in favour of a fresh, empty private set. A private
    /// view is kept as is.
    pub(crate) fn make_private(&mut self) {
        if self.mode == ObjectViewMode::SharedWithScheduler {
            *self = Self::default();
        }
    }
}

/// State common to every effect: identity, activation, attached objects, and
/// the scheduler it is registered with.
#[derive(Debug)]
pub struct EffectState {
    name: String,
    activation: Activation,
    objects: AttachedObjects,
    owner: Option<SchedulerId>,
}

impl EffectState {
    /// Create an active effect state with no attached objects.
    pub fn new(name: impl Into<String>) -> SimResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(TwError::EmptyName.into());
        }
        Ok(Self {
            name,
            activation: Activation::default(),
            objects: AttachedObjects::default(),
            owner: None,
        })
    }

    /// Start active or inactive.
    pub fn with_active(mut self, active: bool) -> Self {
        self.activation.set_active(active);
        self
    }

    /// Attach initial objects to the private view.
    pub fn with_objects(self, objects: impl IntoIterator<Item = ObjectHandle>) -> SimResult<Self> {
        for object in objects {
            self.objects.registry.insert(object)?;
        }
        Ok(self)
    }

    /// The unique effect name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The objects this effect acts on.
    pub fn objects(&self) -> &AttachedObjects {
        &self.objects
    }

    /// The scheduler this effect is registered with, if any.
    pub fn owner(&self) -> Option<SchedulerId> {
        self.owner
    }

    pub(crate) fn register(&mut self, owner: SchedulerId, shared: Option<ObjectRegistry>) {
        self.owner = Some(owner);
        match shared {
            Some(registry) => self.objects.share(registry),
            None => self.objects.make_private(),
        }
    }

    /// Forget the owner. A shared view is released along with it.
    pub(crate) fn unregister(&mut self) {
        self.owner = None;
        self.objects.make_private();
    }
}

impl Activatable for EffectState {
    fn is_active(&self) -> bool {
        self.activation.is_active()
    }

    fn set_active(&mut self, active: bool) {
        self.activation.set_active(active);
    }
}

/// A force generator over a set of attached objects.
///
/// During a tick the scheduler calls [`Effect::update`] on every active
/// effect before any object integrates, so effects always see the state of
/// the previous tick. Effects deliver forces with
/// [`PhysicalObject::set_force`](crate::object::PhysicalObject::set_force).
pub trait Effect: Activatable + fmt::Debug {
    /// Shared effect state.
    fn state(&self) -> &EffectState;

    /// Mutable shared effect state.
    fn state_mut(&mut self) -> &mut EffectState;

    /// Compute forces and push them into the attached objects.
    fn update(&mut self, ctx: &mut TickContext<'_>) -> SimResult<()>;

    /// Called once per simulated second, typically for telemetry.
    fn update_second(&mut self, ctx: &mut TickContext<'_>) -> SimResult<()>;

    /// Support downcasting to concrete types.
    fn as_any(&self) -> &dyn Any;

    /// Support downcasting to concrete types.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// The unique effect name.
    fn name(&self) -> &str {
        self.state().name()
    }

    /// The objects this effect acts on.
    fn objects(&self) -> &AttachedObjects {
        self.state().objects()
    }

    /// Attach an object, replacing any attached object with the same name.
    ///
    /// Fails with [`SimError::SharedView`] when the effect aliases the
    /// scheduler's registry.
    fn set_object(&mut self, object: ObjectHandle) -> SimResult<()> {
        let state = self.state();
        if state.objects.mode == ObjectViewMode::SharedWithScheduler {
            return Err(SimError::SharedView(state.name.clone()));
        }
        state.objects.registry.insert(object)?;
        Ok(())
    }

    /// Detach an object by name; a no-op for unknown names.
    ///
    /// Fails with [`SimError::SharedView`] when the effect aliases the
    /// scheduler's registry.
    fn remove_object(&mut self, name: &str) -> SimResult<Option<ObjectHandle>> {
        let state = self.state();
        if state.objects.mode == ObjectViewMode::SharedWithScheduler {
            return Err(SimError::SharedView(state.name.clone()));
        }
        Ok(state.objects.registry.remove(name))
    }
}
