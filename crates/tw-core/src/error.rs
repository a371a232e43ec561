/// Alias for `Result<T, TwError>`.
pub type TwResult<T> = Result<T, TwError>;

/// Errors raised when constructing core values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TwError {
    /// A named value was given an empty name.
    #[error("name must not be empty")]
    EmptyName,

    /// A comparison tolerance was zero, negative, or not finite.
    #[error("invalid tolerance: {0} (must be finite and greater than zero)")]
    InvalidTolerance(f64),
}
