//! Core types for Tickwork: vectors, named force contributions, and activation.
//!
//! This crate has no notion of time or scheduling. It provides the value types
//! the simulation crate integrates with: an immutable three-component
//! [`Vector`], a [`NamedVector`] used as a single named force, the
//! [`Tolerance`] that approximate comparisons are made under, and the
//! [`Activatable`] capability shared by objects and effects.

/// The active/inactive capability composed into objects and effects.
pub mod activatable;
/// Error types used throughout the crate.
pub mod error;
/// Vectors tagged with a name, used as individual force contributions.
pub mod named;
/// Floating-point comparison tolerance.
pub mod tolerance;
/// Immutable three-component vectors and their algebra.
pub mod vector;

/// Re-export activation types.
pub use activatable::{Activatable, Activation};
/// Re-export error types.
pub use error::{TwError, TwResult};
/// Re-export the named vector type.
pub use named::NamedVector;
/// Re-export the tolerance type.
pub use tolerance::Tolerance;
/// Re-export the vector type.
pub use vector::Vector;
