use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use tracing::{debug, trace};
use uuid::Uuid;

use crate::clock::{MonotonicTime, TickClock, TimeSource};
use crate::config::SimConfig;
use crate::context::TickContext;
use crate::effect::Effect;
use crate::error::{SimError, SimResult};
use crate::event::{EventLog, SimEvent, SimEventKind};
use crate::object::ObjectHandle;
use crate::registry::{ObjectRegistry, ObjectViewMode, borrow_object, borrow_object_mut};

/// Identifies one scheduler instance. Recorded on registered objects and effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SchedulerId(Uuid);

impl SchedulerId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SchedulerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// Thread-safe running flag of a scheduler.
///
/// Clone it to stop a blocking [`Scheduler::start`] from another thread.
#[derive(Debug, Clone, Default)]
pub struct RunHandle(Arc<AtomicBool>);

impl RunHandle {
    /// Create a handle in the stopped state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` while the run loop is active.
    pub fn is_running(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Ask the loop to stop. The current iteration finishes first. Stopping a
    /// stopped scheduler does nothing.
    pub fn stop(&self) {
        self.0.store(false, Ordering::Release);
    }

    /// Flip to running. Returns `false` if already running.
    fn begin(&self) -> bool {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

/// Owns the object and effect registries and drives the fixed-timestep loop.
///
/// Every tick runs in two phases: all active effects compute and push forces,
/// then all objects integrate. Every `ticks_per_second` ticks the per-second
/// hooks run in the same order. Registries iterate in name order.
pub struct Scheduler {
    id: SchedulerId,
    config: SimConfig,
    clock: TickClock,
    objects: ObjectRegistry,
    effects: BTreeMap<String, Box<dyn Effect>>,
    events: EventLog,
    run: RunHandle,
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("id", &self.id)
            .field("tick", &self.clock.tick())
            .field("objects", &self.objects.len())
            .field("effects", &self.effects.len())
            .field("running", &self.run.is_running())
            .finish()
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::build(SimConfig::default())
    }
}

impl Scheduler {
    /// Create a stopped scheduler with empty registries.
    pub fn new(config: SimConfig) -> SimResult<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: SimConfig) -> Self {
        Self {
            id: SchedulerId::new(),
            clock: TickClock::new(&config),
            events: EventLog::new(config.max_events),
            config,
            objects: ObjectRegistry::new(),
            effects: BTreeMap::new(),
            run: RunHandle::new(),
        }
    }

    /// This scheduler's identity.
    pub fn id(&self) -> SchedulerId {
        self.id
    }

    /// Register an object under its name, replacing any previous object with
    /// that name. Fails if the object is registered with another scheduler.
    pub fn add_object(&mut self, object: ObjectHandle) -> SimResult<()> {
        let name = {
            let mut guard = object
                .try_borrow_mut()
                .map_err(|_| SimError::ObjectBusy(String::from("<unnamed>")))?;
            let name = guard.name().to_owned();
            match guard.state().owner() {
                Some(owner) if owner != self.id => {
                    return Err(SimError::ForeignObject {
                        object: name,
                        owner,
                    });
                }
                _ => {}
            }
            guard.state_mut().set_owner(Some(self.id));
            name
        };
        let replaced = self
            .objects
            .insert(Rc::clone(&object))?
            .filter(|previous| !Rc::ptr_eq(previous, &object));
        if let Some(previous) = replaced {
            release(&name, &previous)?;
        }
        debug!(scheduler = %self.id, object = %name, "object registered");
        Ok(())
    }

    /// Register several objects.
    pub fn add_objects(&mut self, objects: impl IntoIterator<Item = ObjectHandle>) -> SimResult<()> {
        for object in objects {
            self.add_object(object)?;
        }
        Ok(())
    }

    /// Deregister an object by name. Unknown names are ignored.
    ///
    /// Effects holding the object in a private view keep acting on it.
    pub fn remove_object(&mut self, name: &str) -> SimResult<Option<ObjectHandle>> {
        let Some(object) = self.objects.remove(name) else {
            return Ok(None);
        };
        release(name, &object)?;
        debug!(scheduler = %self.id, object = %name, "object removed");
        Ok(Some(object))
    }

    /// Register an effect, replacing any previous effect with that name.
    ///
    /// With [`ObjectViewMode::SharedWithScheduler`] the effect's objects are
    /// replaced by this scheduler's registry; with
    /// [`ObjectViewMode::Private`] the effect keeps its own set, or starts
    /// with an empty one if it last aliased a scheduler's registry.
    pub fn add_effect<E: Effect + 'static>(&mut self, effect: E, mode: ObjectViewMode) {
        self.add_boxed_effect(Box::new(effect), mode);
    }

    /// Register an already boxed effect.
    pub fn add_boxed_effect(&mut self, mut effect: Box<dyn Effect>, mode: ObjectViewMode) {
        let shared = match mode {
            ObjectViewMode::Private => None,
            ObjectViewMode::SharedWithScheduler => Some(self.objects.clone()),
        };
        effect.state_mut().register(self.id, shared);
        let name = effect.name().to_owned();
        debug!(scheduler = %self.id, effect = %name, ?mode, "effect registered");
        if let Some(mut previous) = self.effects.insert(name, effect) {
            previous.state_mut().unregister();
        }
    }

    /// Register several boxed effects with the same view mode.
    pub fn add_effects(
        &mut self,
        mode: ObjectViewMode,
        effects: impl IntoIterator<Item = Box<dyn Effect>>,
    ) {
        for effect in effects {
            self.add_boxed_effect(effect, mode);
        }
    }

    /// Deregister an effect by name. Unknown names are ignored.
    pub fn remove_effect(&mut self, name: &str) -> Option<Box<dyn Effect>> {
        let mut effect = self.effects.remove(name)?;
        effect.state_mut().unregister();
        debug!(scheduler = %self.id, effect = %name, "effect removed");
        Some(effect)
    }

    /// Look up a registered object by name.
    pub fn object(&self, name: &str) -> Option<ObjectHandle> {
        self.objects.get(name)
    }

    /// The object registry. Effects in shared mode alias this registry.
    pub fn objects(&self) -> &ObjectRegistry {
        &self.objects
    }

    /// Names of all registered objects in sorted order.
    pub fn object_names(&self) -> Vec<String> {
        self.objects.names()
    }

    /// Number of registered objects.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Look up a registered effect by name and concrete type.
    pub fn effect<T: Effect + 'static>(&self, name: &str) -> Option<&T> {
        self.effects
            .get(name)
            .and_then(|e| e.as_any().downcast_ref::<T>())
    }

    /// Look up a registered effect mutably by name and concrete type.
    pub fn effect_mut<T: Effect + 'static>(&mut self, name: &str) -> Option<&mut T> {
        self.effects
            .get_mut(name)
            .and_then(|e| e.as_any_mut().downcast_mut::<T>())
    }

    /// Names of all registered effects in sorted order.
    pub fn effect_names(&self) -> Vec<String> {
        self.effects.keys().cloned().collect()
    }

    /// Number of registered effects.
    pub fn effect_count(&self) -> usize {
        self.effects.len()
    }

    /// The configuration this scheduler was built with.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Tick and second counters.
    pub fn clock(&self) -> &TickClock {
        &self.clock
    }

    /// Telemetry recorded so far.
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Mutable access to the telemetry log, e.g. to clear it.
    pub fn events_mut(&mut self) -> &mut EventLog {
        &mut self.events
    }

    /// A handle that can stop the run loop, also from another thread.
    pub fn run_handle(&self) -> RunHandle {
        self.run.clone()
    }

    /// Returns `true` while the run loop is active.
    pub fn is_running(&self) -> bool {
        self.run.is_running()
    }

    /// Run the fixed-timestep loop against the wall clock.
    ///
    /// Blocks until [`Scheduler::stop`] (through a [`RunHandle`] or a hook's
    /// [`TickContext::request_stop`]) is observed. Calling this while the
    /// loop is already running does nothing.
    pub fn start(&mut self) -> SimResult<()> {
        self.start_with(MonotonicTime::new())
    }

    /// Run the fixed-timestep loop against any time source.
    ///
    /// If a hook fails the loop ends, the scheduler returns to the stopped
    /// state, and the error is returned. The failing tick is already counted
    /// by the clock; hooks after the failing one did not run for it, including
    /// the per-second hooks when it was the last tick of a second.
    pub fn start_with<T: TimeSource>(&mut self, mut time: T) -> SimResult<()> {
        if !self.run.begin() {
            debug!(scheduler = %self.id, "start ignored, already running");
            return Ok(());
        }
        debug!(scheduler = %self.id, tick = self.clock.tick(), "scheduler started");
        self.events
            .push(SimEvent::new(self.clock.tick(), SimEventKind::Started, "scheduler started"));

        let result = self.run_loop(&mut time);

        self.run.stop();
        let ticks = self.clock.tick();
        debug!(scheduler = %self.id, ticks, ok = result.is_ok(), "scheduler stopped");
        self.events.push(SimEvent::new(
            ticks,
            SimEventKind::Stopped { ticks },
            format!("scheduler stopped after {ticks} ticks"),
        ));
        result
    }

    fn run_loop<T: TimeSource>(&mut self, time: &mut T) -> SimResult<()> {
        let mut previous = time.now();
        while self.run.is_running() {
            let now = time.now();
            let elapsed = now.saturating_sub(previous);
            previous = now;
            let ran = self.advance(elapsed)?;
            if ran == 0 && self.config.idle_wait > Duration::ZERO {
                thread::sleep(self.config.idle_wait);
            }
        }
        Ok(())
    }

    /// Request the run loop to stop. A no-op when already stopped.
    pub fn stop(&self) {
        self.run.stop();
    }

    /// Feed elapsed time into the accumulator and run every tick now due.
    /// Returns the number of ticks run.
    ///
    /// The accumulator measures whole nanoseconds against an exact tick
    /// length, so a duration built with `Duration::from_secs_f64(1.0 / 60.0)`
    /// lands just short of one tick and runs nothing. Use [`Scheduler::step`]
    /// to run a fixed number of ticks.
    pub fn advance(&mut self, elapsed: Duration) -> SimResult<u64> {
        self.clock.accumulate(elapsed);
        let mut ran = 0;
        while self.clock.tick_due() {
            self.clock.consume_tick();
            self.run_tick()?;
            ran += 1;
        }
        Ok(ran)
    }

    /// Run exactly one tick regardless of elapsed time, including the
    /// per-second hooks if this tick completes a second.
    ///
    /// On a hook error the tick still counts and the remaining hooks of that
    /// tick are skipped.
    pub fn step(&mut self) -> SimResult<()> {
        self.run_tick()
    }

    /// Run one `update` of a registered object outside the tick cadence.
    ///
    /// The clock is not advanced and no effect runs.
    pub fn trigger_object(&mut self, name: &str) -> SimResult<()> {
        let object = self
            .objects
            .get(name)
            .ok_or_else(|| SimError::ObjectNotFound(name.to_owned()))?;
        let mut guard = borrow_object_mut(name, &object)?;
        match guard.state().owner() {
            Some(owner) if owner == self.id => {}
            Some(owner) => {
                return Err(SimError::ForeignObject {
                    object: name.to_owned(),
                    owner,
                });
            }
            None => return Err(SimError::ObjectNotFound(name.to_owned())),
        }
        let mut ctx = TickContext::new(&self.config, &self.clock, &mut self.events, &self.run);
        guard.update(&mut ctx)
    }

    fn run_tick(&mut self) -> SimResult<()> {
        let completes_second = self.clock.advance();
        let objects = self.objects.entries();
        trace!(scheduler = %self.id, tick = self.clock.tick(), "tick");

        let mut ctx = TickContext::new(&self.config, &self.clock, &mut self.events, &self.run);
        for effect in self.effects.values_mut() {
            if effect.is_active() {
                effect.update(&mut ctx)?;
            }
        }
        for (name, object) in &objects {
            borrow_object_mut(name, object)?.update(&mut ctx)?;
        }

        if completes_second {
            trace!(scheduler = %self.id, second = self.clock.seconds(), "second");
            for effect in self.effects.values_mut() {
                if effect.is_active() {
                    effect.update_second(&mut ctx)?;
                }
            }
            for (name, object) in &objects {
                borrow_object_mut(name, object)?.update_second(&mut ctx)?;
            }
        }
        Ok(())
    }
}

/// Clear the owner of an object leaving the registry.
fn release(name: &str, object: &ObjectHandle) -> SimResult<()> {
    let owner = borrow_object(name, object)?.state().owner();
    if owner.is_some() {
        borrow_object_mut(name, object)?.state_mut().set_owner(None);
    }
    Ok(())
}
