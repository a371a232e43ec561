use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

use crate::tolerance::Tolerance;

/// An immutable three-component vector.
///
/// Every operation returns a new value. Equality (`==`) compares each
/// component under [`Tolerance::DEFAULT`]; use [`Vector::approx_eq`] to pick
/// another tolerance. Because of that approximate equality the type
/// implements neither `Eq` nor `Hash` and cannot be used as a map key.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Vector {
    /// The X component.
    pub x: f64,
    /// The Y component.
    pub y: f64,
    /// The Z component.
    pub z: f64,
}

impl Vector {
    /// The vector `(0, 0, 0)`.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    /// The vector `(1, 1, 1)`.
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);
    /// The vector `(1, 0, 0)`.
    pub const UNIT_X: Self = Self::new(1.0, 0.0, 0.0);
    /// The vector `(0, 1, 0)`.
    pub const UNIT_Y: Self = Self::new(0.0, 1.0, 0.0);
    /// The vector `(0, 0, 1)`.
    pub const UNIT_Z: Self = Self::new(0.0, 0.0, 1.0);

    /// Create a vector from its three components.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Return the components as an array.
    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Component-wise sum `self + v`.
    pub fn sum(self, v: Self) -> Self {
        Self::new(self.x + v.x, self.y + v.y, self.z + v.z)
    }

    /// Component-wise difference `self - v`.
    pub fn subtract(self, v: Self) -> Self {
        Self::new(self.x - v.x, self.y - v.y, self.z - v.z)
    }

    /// Scalar (dot) product `self · v`.
    pub fn dot(self, v: Self) -> f64 {
        self.x * v.x + self.y * v.y + self.z * v.z
    }

    /// Vector (cross) product `self × v`, right-hand rule.
    pub fn cross(self, v: Self) -> Self {
        Self::new(
            self.y * v.z - self.z * v.y,
            self.z * v.x - self.x * v.z,
            self.x * v.y - self.y * v.x,
        )
    }

    /// Scalar triple product `(self × v1) · v2`.
    pub fn triple(self, v1: Self, v2: Self) -> f64 {
        self.cross(v1).dot(v2)
    }

    /// Multiply every component by `s`.
    pub fn scale(self, s: f64) -> Self {
        Self::new(s * self.x, s * self.y, s * self.z)
    }

    /// Euclidean length.
    pub fn norm(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction.
    ///
    /// Returns the zero vector when `self` equals zero under the default
    /// tolerance instead of dividing by zero.
    pub fn normalized(self) -> Self {
        self.normalized_within(Tolerance::DEFAULT)
    }

    /// Like [`Vector::normalized`], with an explicit zero test tolerance.
    pub fn normalized_within(self, tolerance: Tolerance) -> Self {
        if self.approx_eq(Self::ZERO, tolerance) {
            return Self::ZERO;
        }
        self.scale(1.0 / self.norm())
    }

    /// Distance between the points `self` and `v`.
    pub fn distance(self, v: Self) -> f64 {
        self.subtract(v).norm()
    }

    /// Whether `self` and `v` are parallel under the default tolerance.
    ///
    /// Divides each component of `self` by the matching component of `v` and
    /// compares the three ratios. If any component of `v` is zero the ratios
    /// are NaN or infinite and the result is meaningless; callers must ensure
    /// `v` has no zero component.
    pub fn is_parallel(self, v: Self) -> bool {
        self.is_parallel_within(v, Tolerance::DEFAULT)
    }

    /// Like [`Vector::is_parallel`], with an explicit tolerance.
    pub fn is_parallel_within(self, v: Self, tolerance: Tolerance) -> bool {
        let sx = self.x / v.x;
        let sy = self.y / v.y;
        let sz = self.z / v.z;
        tolerance.approx_eq(sx, sy) && tolerance.approx_eq(sx, sz) && tolerance.approx_eq(sy, sz)
    }

    /// Component-wise comparison under `tolerance`.
    pub fn approx_eq(self, other: Self, tolerance: Tolerance) -> bool {
        tolerance.approx_eq(self.x, other.x)
            && tolerance.approx_eq(self.y, other.y)
            && tolerance.approx_eq(self.z, other.z)
    }
}

impl PartialEq for Vector {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq(*other, Tolerance::DEFAULT)
    }
}

impl From<[f64; 3]> for Vector {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.x, self.y, self.z)
    }
}

impl Add for Vector {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        self.sum(other)
    }
}

impl Sub for Vector {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        self.subtract(other)
    }
}

impl Mul<f64> for Vector {
    type Output = Self;
    fn mul(self, scalar: f64) -> Self {
        self.scale(scalar)
    }
}

impl Neg for Vector {
    type Output = Self;
    fn neg(self) -> Self {
        self.scale(-1.0)
    }
}
