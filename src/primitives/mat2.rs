//! 2x2 linear block of an affine transform.

use super::{Point2, Vec2};
use num_traits::Float;
use std::ops::Mul;

/// The 2x2 linear part of an affine transform (rotation, scale and shear combined).
///
/// Elements are indexed `(row, column)`:
/// ```text
/// | a11  a12 |
/// | a21  a22 |
/// ```
///
/// Coordinates are row vectors multiplied on the left:
/// `(x, y) · A = (x*a11 + y*a21, x*a12 + y*a22)`.
/// A product `A * B` therefore applies `A` first, then `B`.
///
/// # Example
///
/// ```
/// use affinum::primitives::{Mat2, Point2};
///
/// let m: Mat2<f64> = Mat2::scale(2.0, 3.0) * Mat2::shear_x(1.0);
/// let p = m.apply_point(Point2::new(1.0, 1.0));
/// // (1, 1) scaled to (2, 3), then x += 1 * y
/// assert_eq!(p, Point2::new(5.0, 3.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mat2<F> {
    pub a11: F,
    pub a12: F,
    pub a21: F,
    pub a22: F,
}

impl<F: Float> Mat2<F> {
    /// Creates a matrix from its elements in row-major order.
    #[inline]
    pub fn new(a11: F, a12: F, a21: F, a22: F) -> Self {
        Self { a11, a12, a21, a22 }
    }

    /// Creates the identity block.
    #[inline]
    pub fn identity() -> Self {
        Self::new(F::one(), F::zero(), F::zero(), F::one())
    }

    /// Creates the rotation block `[[cos, -sin], [sin, cos]]`.
    ///
    /// This is the rotation factor produced by decomposition. Under the
    /// row-vector convention it turns coordinates clockwise by `angle` radians.
    #[inline]
    pub fn rotation(angle: F) -> Self {
        let (sin_a, cos_a) = angle.sin_cos();
        Self::new(cos_a, -sin_a, sin_a, cos_a)
    }

    /// Creates a non-uniform scaling block.
    #[inline]
    pub fn scale(sx: F, sy: F) -> Self {
        Self::new(sx, F::zero(), F::zero(), sy)
    }

    /// Creates a horizontal shear: `x` is shifted by `factor * y`.
    #[inline]
    pub fn shear_x(factor: F) -> Self {
        Self::new(F::one(), F::zero(), factor, F::one())
    }

    /// Creates a vertical shear: `y` is shifted by `factor * x`.
    #[inline]
    pub fn shear_y(factor: F) -> Self {
        Self::new(F::one(), factor, F::zero(), F::one())
    }

    /// Creates a combined shear block from an `(x, y)` shear pair.
    ///
    /// The x-shear is applied before the y-shear; decomposition only ever
    /// produces one nonzero component.
    #[inline]
    pub fn shear(factors: Vec2<F>) -> Self {
        Self::shear_x(factors.x) * Self::shear_y(factors.y)
    }

    /// Applies this block to a single coordinate row.
    #[inline]
    pub fn apply(&self, x: F, y: F) -> (F, F) {
        (x * self.a11 + y * self.a21, x * self.a12 + y * self.a22)
    }

    /// Applies this block to a point.
    #[inline]
    pub fn apply_point(&self, p: Point2<F>) -> Point2<F> {
        let (x, y) = self.apply(p.x, p.y);
        Point2::new(x, y)
    }

    /// Returns the determinant.
    ///
    /// Negative for reflections, zero for singular blocks.
    #[inline]
    pub fn determinant(&self) -> F {
        self.a11 * self.a22 - self.a12 * self.a21
    }

    /// Returns true if this block can be inverted.
    ///
    /// The determinant is compared against `F::epsilon()` times the square of
    /// the largest element, so uniformly tiny or huge blocks are judged by
    /// their shape alone. A determinant whose reciprocal overflows is also
    /// rejected.
    pub fn is_invertible(&self) -> bool {
        let det = self.determinant();
        let size = self
            .a11
            .abs()
            .max(self.a12.abs())
            .max(self.a21.abs())
            .max(self.a22.abs());
        det.is_finite()
            && det != F::zero()
            && det.abs() > F::epsilon() * size * size
            && det.recip().is_finite()
    }

    /// Returns the inverse block, or `None` if the block is singular relative
    /// to its size.
    pub fn inverse(&self) -> Option<Self> {
        if !self.is_invertible() {
            return None;
        }

        let inv_det = F::one() / self.determinant();
        Some(Self::new(
            self.a22 * inv_det,
            -self.a12 * inv_det,
            -self.a21 * inv_det,
            self.a11 * inv_det,
        ))
    }

    /// Returns the matrix product `self * other`.
    pub fn compose(&self, other: &Self) -> Self {
        Self::new(
            self.a11 * other.a11 + self.a12 * other.a21,
            self.a11 * other.a12 + self.a12 * other.a22,
            self.a21 * other.a11 + self.a22 * other.a21,
            self.a21 * other.a12 + self.a22 * other.a22,
        )
    }

    /// Returns true if every element is within `epsilon` of the identity.
    pub fn is_identity(&self, epsilon: F) -> bool {
        self.approx_eq(&Self::identity(), epsilon)
    }

    /// Returns true if every element is within `epsilon` of `other`.
    pub fn approx_eq(&self, other: &Self, epsilon: F) -> bool {
        (self.a11 - other.a11).abs() <= epsilon
            && (self.a12 - other.a12).abs() <= epsilon
            && (self.a21 - other.a21).abs() <= epsilon
            && (self.a22 - other.a22).abs() <= epsilon
    }

    /// Returns the elements as `[[a11, a12], [a21, a22]]`.
    pub fn to_rows(&self) -> [[F; 2]; 2] {
        [[self.a11, self.a12], [self.a21, self.a22]]
    }
}

impl<F: Float> Default for Mat2<F> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<F: Float> Mul for Mat2<F> {
    type Output = Self;

    /// Multiplies two blocks; the result applies `self` first, then `rhs`.
    fn mul(self, rhs: Self) -> Self {
        self.compose(&rhs)
    }
}

impl<F: Float> From<[[F; 2]; 2]> for Mat2<F> {
    fn from(rows: [[F; 2]; 2]) -> Self {
        Self::new(rows[0][0], rows[0][1], rows[1][0], rows[1][1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_identity() {
        let m: Mat2<f64> = Mat2::identity();
        assert_eq!(m.apply(3.0, 4.0), (3.0, 4.0));
        assert!(m.is_identity(0.0));
    }

    #[test]
    fn test_row_vector_convention() {
        let m: Mat2<f64> = Mat2::new(1.0, 2.0, 3.0, 4.0);
        // (1, 0) picks the first row, (0, 1) the second
        assert_eq!(m.apply(1.0, 0.0), (1.0, 2.0));
        assert_eq!(m.apply(0.0, 1.0), (3.0, 4.0));
    }

    #[test]
    fn test_rotation_90() {
        let m: Mat2<f64> = Mat2::rotation(FRAC_PI_2);
        let (x, y) = m.apply(1.0, 0.0);

        assert_relative_eq!(x, 0.0, epsilon = 1e-10);
        assert_relative_eq!(y, -1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_shear_x() {
        let m: Mat2<f64> = Mat2::shear_x(1.0);
        assert_eq!(m.apply(0.0, 2.0), (2.0, 2.0)); // x += 1.0 * y
    }

    #[test]
    fn test_shear_y() {
        let m: Mat2<f64> = Mat2::shear_y(1.0);
        assert_eq!(m.apply(2.0, 0.0), (2.0, 2.0)); // y += 1.0 * x
    }

    #[test]
    fn test_shear_pair() {
        let m: Mat2<f64> = Mat2::shear(Vec2::new(0.5, 0.0));
        assert_eq!(m, Mat2::shear_x(0.5));

        let m: Mat2<f64> = Mat2::shear(Vec2::new(0.0, 0.25));
        assert_eq!(m, Mat2::shear_y(0.25));
    }

    #[test]
    fn test_product_order() {
        // Scale first, then shear
        let m: Mat2<f64> = Mat2::scale(2.0, 1.0) * Mat2::shear_y(1.0);
        assert_eq!(m.apply(1.0, 0.0), (2.0, 2.0));

        // Shear first, then scale
        let m: Mat2<f64> = Mat2::shear_y(1.0) * Mat2::scale(2.0, 1.0);
        assert_eq!(m.apply(1.0, 0.0), (2.0, 1.0));
    }

    #[test]
    fn test_determinant() {
        assert_relative_eq!(Mat2::<f64>::identity().determinant(), 1.0);
        assert_relative_eq!(Mat2::<f64>::scale(2.0, 3.0).determinant(), 6.0);
        assert_relative_eq!(Mat2::<f64>::scale(1.0, -1.0).determinant(), -1.0);
        assert_relative_eq!(Mat2::<f64>::shear_x(5.0).determinant(), 1.0);
    }

    #[test]
    fn test_inverse() {
        let m: Mat2<f64> = Mat2::rotation(0.7) * Mat2::shear_x(0.3) * Mat2::scale(2.0, 0.5);
        let inv = m.inverse().unwrap();

        assert!((m * inv).is_identity(1e-12));
        assert!((inv * m).is_identity(1e-12));
    }

    #[test]
    fn test_singular_no_inverse() {
        let m: Mat2<f64> = Mat2::scale(1.0, 0.0);
        assert!(!m.is_invertible());
        assert!(m.inverse().is_none());

        let nan: Mat2<f64> = Mat2::new(f64::NAN, 0.0, 0.0, 1.0);
        assert!(nan.inverse().is_none());

        // rank one up to rounding
        let m: Mat2<f64> = Mat2::new(1.0, 1.0 / 3.0, 3.0, 1.0);
        assert!(!m.is_invertible());
    }

    #[test]
    fn test_tiny_uniform_scale_is_invertible() {
        let m: Mat2<f64> = Mat2::scale(1e-9, 1e-9);
        let inv = m.inverse().unwrap();
        assert_relative_eq!(inv.a11, 1e9, max_relative = 1e-12);
        assert!((m * inv).is_identity(1e-12));

        let m: Mat2<f32> = Mat2::scale(1e-4, 1e-4);
        assert!(m.is_invertible());

        let m: Mat2<f64> = Mat2::scale(1e9, 1e9);
        assert!((m * m.inverse().unwrap()).is_identity(1e-12));
    }

    #[test]
    fn test_overflowing_inverse_rejected() {
        let m: Mat2<f64> = Mat2::scale(1e-160, 1e-160);
        assert!(m.inverse().is_none());
    }

    #[test]
    fn test_from_rows() {
        let m: Mat2<f64> = [[1.0, 2.0], [3.0, 4.0]].into();
        assert_eq!(m, Mat2::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(m.to_rows(), [[1.0, 2.0], [3.0, 4.0]]);
    }

    #[test]
    fn test_f32_support() {
        let m: Mat2<f32> = Mat2::rotation(0.5);
        let (x, _) = m.apply(1.0, 0.0);
        assert!((x - 0.5_f32.cos()).abs() < 1e-6);
    }
}
