use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{TwError, TwResult};
use crate::tolerance::Tolerance;
use crate::vector::Vector;

/// A vector tagged with a non-empty name, used as one named force contribution.
///
/// Two named vectors are equal when their names match and their components
/// are equal under the default tolerance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawNamedVector")]
pub struct NamedVector {
    name: String,
    vector: Vector,
}

/// Unvalidated wire form of [`NamedVector`].
#[derive(Deserialize)]
struct RawNamedVector {
    name: String,
    vector: Vector,
}

impl TryFrom<RawNamedVector> for NamedVector {
    type Error = TwError;

    fn try_from(raw: RawNamedVector) -> TwResult<Self> {
        Self::new(raw.name, raw.vector)
    }
}

impl NamedVector {
    /// Tag `vector` with `name`. Fails with [`TwError::EmptyName`] on an empty name.
    pub fn new(name: impl Into<String>, vector: Vector) -> TwResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(TwError::EmptyName);
        }
        Ok(Self { name, vector })
    }

    /// A named zero vector.
    pub fn zero(name: impl Into<String>) -> TwResult<Self> {
        Self::new(name, Vector::ZERO)
    }

    /// The identifying name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The untagged vector value.
    pub fn vector(&self) -> Vector {
        self.vector
    }

    /// Compare name and components, the latter under `tolerance`.
    pub fn approx_eq(&self, other: &Self, tolerance: Tolerance) -> bool {
        self.name == other.name && self.vector.approx_eq(other.vector, tolerance)
    }
}

impl PartialEq for NamedVector {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq(other, Tolerance::DEFAULT)
    }
}

impl From<NamedVector> for Vector {
    fn from(named: NamedVector) -> Self {
        named.vector
    }
}

impl fmt::Display for NamedVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.vector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_name_rejected() {
        assert_eq!(
            NamedVector::new("", Vector::UNIT_X).unwrap_err(),
            TwError::EmptyName
        );
        assert!(NamedVector::zero("").is_err());
    }

    #[test]
    fn equality_requires_matching_name() {
        let a = NamedVector::new("Thrust", Vector::UNIT_X).unwrap();
        let b = NamedVector::new("Thrust", Vector::new(1.00001, 0.0, 0.0)).unwrap();
        let c = NamedVector::new("Drag", Vector::UNIT_X).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn zero_has_zero_vector() {
        let z = NamedVector::zero("Rest").unwrap();
        assert_eq!(z.name(), "Rest");
        assert_eq!(z.vector(), Vector::ZERO);
    }

    #[test]
    fn deserialize_validates_name() {
        let thrust: NamedVector =
            serde_json::from_str(r#"{"name":"Thrust","vector":{"x":1.0,"y":0.0,"z":0.0}}"#)
                .unwrap();
        assert_eq!(thrust, NamedVector::new("Thrust", Vector::UNIT_X).unwrap());

        let unnamed = serde_json::from_str::<NamedVector>(r#"{"name":"","vector":{"x":1.0,"y":0.0,"z":0.0}}"#);
        assert!(unnamed.is_err());
    }

    #[test]
    fn display_prefixes_name() {
        let f = NamedVector::new("GravitationForce", Vector::new(667.4, 0.0, 0.0)).unwrap();
        insta::assert_snapshot!(f.to_string(), @"GravitationForce:(667.40, 0.00, 0.00)");
    }
}
