//! 2D vector type for offsets, scale pairs and shear pairs.

use num_traits::Float;
use std::ops::{Add, Neg, Sub};

/// A 2D vector.
///
/// Used for translations and for the per-axis scale and shear factors of a
/// decomposition. Generic over floating-point types (`f32` or `f64`).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2<F> {
    pub x: F,
    pub y: F,
}

impl<F: Float> Vec2<F> {
    /// Creates a new vector.
    #[inline]
    pub fn new(x: F, y: F) -> Self {
        Self { x, y }
    }

    /// Creates a zero vector.
    #[inline]
    pub fn zero() -> Self {
        Self {
            x: F::zero(),
            y: F::zero(),
        }
    }

    /// Creates the vector `(1, 1)`, the neutral per-axis scale.
    #[inline]
    pub fn one() -> Self {
        Self {
            x: F::one(),
            y: F::one(),
        }
    }

    /// Returns true if both components are exactly zero.
    ///
    /// `-0.0` counts as zero.
    #[inline]
    pub fn is_zero(self) -> bool {
        self.x == F::zero() && self.y == F::zero()
    }

    /// Returns true if neither component is NaN or infinite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Counts how many components are exactly equal to `value`.
    pub(crate) fn count_eq(self, value: F) -> usize {
        usize::from(self.x == value) + usize::from(self.y == value)
    }
}

impl<F: Float> Add for Vec2<F> {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl<F: Float> Sub for Vec2<F> {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl<F: Float> Neg for Vec2<F> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl<F: Float> Default for Vec2<F> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<F: Float> From<(F, F)> for Vec2<F> {
    fn from((x, y): (F, F)) -> Self {
        Self::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let v: Vec2<f64> = Vec2::new(3.0, 4.0);
        assert_eq!(v.x, 3.0);
        assert_eq!(v.y, 4.0);
    }

    #[test]
    fn test_is_zero() {
        assert!(Vec2::<f64>::zero().is_zero());
        assert!(Vec2::new(-0.0_f64, 0.0).is_zero());
        assert!(!Vec2::new(0.0_f64, 1e-300).is_zero());
    }

    #[test]
    fn test_is_finite() {
        assert!(Vec2::new(1.0_f64, -2.0).is_finite());
        assert!(!Vec2::new(f64::NAN, 0.0).is_finite());
        assert!(!Vec2::new(0.0, f64::INFINITY).is_finite());
    }

    #[test]
    fn test_count_eq() {
        assert_eq!(Vec2::<f64>::one().count_eq(1.0), 2);
        assert_eq!(Vec2::new(1.0_f64, 2.0).count_eq(1.0), 1);
        assert_eq!(Vec2::new(0.5_f64, 2.0).count_eq(0.0), 0);
    }

    #[test]
    fn test_arithmetic() {
        let a: Vec2<f64> = Vec2::new(1.0, 2.0);
        let b = Vec2::new(3.0, 5.0);
        assert_eq!(a + b, Vec2::new(4.0, 7.0));
        assert_eq!(b - a, Vec2::new(2.0, 3.0));
        assert_eq!(-a, Vec2::new(-1.0, -2.0));
    }
}
