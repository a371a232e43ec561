use serde::{Deserialize, Serialize};

use crate::error::{TwError, TwResult};

/// Absolute tolerance under which two floating-point values count as equal.
///
/// Comparisons use a strict `|a - b| < epsilon`, so any comparison involving
/// NaN is false.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Tolerance(f64);

impl Tolerance {
    /// The tolerance used when none is configured: `1e-4`.
    pub const DEFAULT: Self = Self(1e-4);

    /// Create a tolerance, rejecting zero, negative, or non-finite values.
    pub fn new(epsilon: f64) -> TwResult<Self> {
        if epsilon.is_finite() && epsilon > 0.0 {
            Ok(Self(epsilon))
        } else {
            Err(TwError::InvalidTolerance(epsilon))
        }
    }

    /// The raw epsilon value.
    pub fn epsilon(self) -> f64 {
        self.0
    }

    /// Compare two scalars under this tolerance.
    pub fn approx_eq(self, a: f64, b: f64) -> bool {
        (a - b).abs() < self.0
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<f64> for Tolerance {
    type Error = TwError;

    fn try_from(epsilon: f64) -> TwResult<Self> {
        Self::new(epsilon)
    }
}

impl From<Tolerance> for f64 {
    fn from(tolerance: Tolerance) -> Self {
        tolerance.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_one_ten_thousandth() {
        assert_eq!(Tolerance::default().epsilon(), 1e-4);
    }

    #[test]
    fn rejects_non_positive_and_non_finite() {
        assert_eq!(Tolerance::new(0.0), Err(TwError::InvalidTolerance(0.0)));
        assert!(Tolerance::new(-1e-3).is_err());
        assert!(Tolerance::new(f64::NAN).is_err());
        assert!(Tolerance::new(f64::INFINITY).is_err());
        assert!(Tolerance::new(1e-9).is_ok());
    }

    #[test]
    fn approx_eq_is_strict() {
        let tol = Tolerance::new(0.5).unwrap();
        assert!(tol.approx_eq(1.0, 1.25));
        assert!(!tol.approx_eq(1.0, 1.5));
        assert!(!tol.approx_eq(f64::NAN, f64::NAN));
    }

    #[test]
    fn deserialize_validates() {
        let tol: Tolerance = serde_json::from_str("0.01").unwrap();
        assert_eq!(tol.epsilon(), 0.01);
        assert!(serde_json::from_str::<Tolerance>("-1.0").is_err());
    }
}
