use tw_core::TwError;

use crate::scheduler::SchedulerId;

/// Alias for `Result<T, SimError>`.
pub type SimResult<T> = Result<T, SimError>;

/// Errors raised while building or running a simulation.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// A constructor or configuration value violated its precondition.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// No object with this name is registered.
    #[error("object not found: \"{0}\"")]
    ObjectNotFound(String),

    /// The object is registered with a different scheduler.
    #[error("object \"{object}\" belongs to scheduler {owner}")]
    ForeignObject {
        /// Name of the object.
        object: String,
        /// The scheduler that currently owns it.
        owner: SchedulerId,
    },

    /// The object is already borrowed elsewhere and cannot be accessed.
    #[error("object \"{0}\" is already borrowed")]
    ObjectBusy(String),

    /// Membership of a shared object view is managed by the scheduler.
    #[error("effect \"{0}\" uses the scheduler's objects; register objects with the scheduler instead")]
    SharedView(String),

    /// An object or effect hook failed.
    #[error("hook failed in \"{entity}\": {message}")]
    Hook {
        /// Name of the object or effect whose hook failed.
        entity: String,
        /// What went wrong.
        message: String,
    },

    /// A core value could not be constructed.
    #[error(transparent)]
    Core(#[from] TwError),
}
