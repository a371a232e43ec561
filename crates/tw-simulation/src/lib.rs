//! Fixed-timestep point-mass simulation for Tickwork.
//!
//! A [`Scheduler`] owns a registry of [`PhysicalObject`]s and a registry of
//! [`Effect`]s. Each tick every active effect computes forces and writes them
//! into its attached objects, then every active object integrates its motion
//! with semi-implicit Euler. Once per simulated second both run their
//! per-second hooks, which the provided types use to record telemetry in the
//! scheduler's [`EventLog`].

/// Mass, kinematic state, and named forces of a point mass.
pub mod body;
/// Time sources and the tick accumulator.
pub mod clock;
/// Configuration types for simulation runs.
pub mod config;
/// Context passed to object and effect hooks.
pub mod context;
/// The effect trait and its shared state.
pub mod effect;
/// Error types for the simulation crate.
pub mod error;
/// Simulation event types and the event log.
pub mod event;
/// Pairwise Newtonian gravitation.
pub mod gravitation;
/// The plain point-mass object.
pub mod mass_point;
/// The physical object trait and its shared state.
pub mod object;
/// Name-keyed object registries and view modes.
pub mod registry;
/// The scheduler that drives the tick loop.
pub mod scheduler;

/// Re-export of [`body::Body`].
pub use body::Body;
/// Re-exports of the time types.
pub use clock::{MonotonicTime, SteppedTime, TickClock, TimeSource};
/// Re-export of [`config::SimConfig`].
pub use config::SimConfig;
/// Re-export of [`context::TickContext`].
pub use context::TickContext;
/// Re-exports of [`effect::Effect`], [`effect::EffectState`], and [`effect::AttachedObjects`].
pub use effect::{AttachedObjects, Effect, EffectState};
/// Re-exports of [`error::SimError`] and [`error::SimResult`].
pub use error::{SimError, SimResult};
/// Re-exports of [`event::EventLog`], [`event::SimEvent`], and [`event::SimEventKind`].
pub use event::{EventLog, SimEvent, SimEventKind};
/// Re-exports of the gravitation effect and its constants.
pub use gravitation::{GRAVITATION_FORCE, GRAVITATIONAL_CONSTANT, GravitationEffect};
/// Re-export of [`mass_point::MassPoint`].
pub use mass_point::MassPoint;
/// Re-exports of the object trait, its state, and handle helpers.
pub use object::{ObjectHandle, ObjectState, PhysicalObject, Shared, share};
/// Re-exports of [`registry::ObjectRegistry`] and [`registry::ObjectViewMode`].
pub use registry::{ObjectRegistry, ObjectViewMode};
/// Re-exports of the scheduler and its handles.
pub use scheduler::{RunHandle, Scheduler, SchedulerId};
