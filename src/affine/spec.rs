//! The affine transform value type.

use super::decompose::{decompose_linear, Decomposition};
use crate::error::AffineError;
use crate::matrix::Matrix;
use crate::primitives::{Mat2, Point2, Vec2};
use num_traits::Float;

/// A 2D affine transform: a 2x2 linear block plus an optional translation.
///
/// Coordinates are row vectors, so the forward map is `y = x·A + t`.
/// In homogeneous form:
/// ```text
/// | a11  a12  tx |
/// | a21  a22  ty |
/// |  0    0    1 |
/// ```
///
/// `AffineSpec` is an immutable value. The `with_*` methods return a new
/// transform and leave `self` untouched.
///
/// # Example
///
/// ```
/// use affinum::{AffineSpec, Mat2, Point2, Vec2};
///
/// let spec: AffineSpec<f64> =
///     AffineSpec::new(Mat2::scale(2.0, 2.0), Some(Vec2::new(10.0, 0.0)));
///
/// let p = spec.apply_point(Point2::new(1.0, 1.0));
/// assert_eq!(p, Point2::new(12.0, 2.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AffineSpec<F> {
    linear: Mat2<F>,
    translation: Option<Vec2<F>>,
}

impl<F: Float> AffineSpec<F> {
    /// Creates a transform from a linear block and an optional translation.
    #[inline]
    pub fn new(linear: Mat2<F>, translation: Option<Vec2<F>>) -> Self {
        Self {
            linear,
            translation,
        }
    }

    /// Creates a purely linear transform.
    #[inline]
    pub fn from_linear(linear: Mat2<F>) -> Self {
        Self::new(linear, None)
    }

    /// Creates a pure translation.
    #[inline]
    pub fn translation_only(offset: Vec2<F>) -> Self {
        Self::new(Mat2::identity(), Some(offset))
    }

    /// Creates the identity transform.
    #[inline]
    pub fn identity() -> Self {
        Self::from_linear(Mat2::identity())
    }

    /// Reads a transform from a raw 2x2, 2x3 or 3x3 matrix.
    ///
    /// The linear block is the top-left 2x2. Column 3 rows 1-2, when
    /// present, is the translation. Anything beyond that is ignored.
    pub fn from_matrix(m: &Matrix<F>) -> Result<Self, AffineError> {
        Ok(Self::new(m.linear_block()?, m.translation()))
    }

    /// The linear block.
    #[inline]
    pub fn linear(&self) -> Mat2<F> {
        self.linear
    }

    /// The translation, if one was supplied.
    #[inline]
    pub fn translation(&self) -> Option<Vec2<F>> {
        self.translation
    }

    /// The translation, with an absent one read as zero.
    #[inline]
    pub fn translation_or_zero(&self) -> Vec2<F> {
        self.translation.unwrap_or_else(Vec2::zero)
    }

    /// The translation, unless it is absent or exactly zero.
    ///
    /// The applier skips the translation step when this is `None`.
    #[inline]
    pub fn effective_translation(&self) -> Option<Vec2<F>> {
        self.translation.filter(|t| !t.is_zero())
    }

    /// Returns a copy with a different linear block.
    #[inline]
    pub fn with_linear(&self, linear: Mat2<F>) -> Self {
        Self::new(linear, self.translation)
    }

    /// Returns a copy with a different translation.
    #[inline]
    pub fn with_translation(&self, translation: Vec2<F>) -> Self {
        Self::new(self.linear, Some(translation))
    }

    /// Returns a copy with the translation removed.
    #[inline]
    pub fn without_translation(&self) -> Self {
        Self::new(self.linear, None)
    }

    /// Returns a copy whose linear block is read from a 2x2 matrix.
    ///
    /// Fails with [`AffineError::ShapeMismatch`] for any other shape.
    pub fn with_linear_block(&self, block: &Matrix<F>) -> Result<Self, AffineError> {
        if block.shape() != (2, 2) {
            return Err(AffineError::shape("2x2", block.rows(), block.cols()));
        }
        Ok(self.with_linear(block.linear_block()?))
    }

    /// Returns a copy whose translation is read from a length-2 slice.
    ///
    /// Fails with [`AffineError::ShapeMismatch`] for any other length.
    pub fn with_translation_slice(&self, translation: &[F]) -> Result<Self, AffineError> {
        match *translation {
            [x, y] => Ok(self.with_translation(Vec2::new(x, y))),
            _ => Err(AffineError::ShapeMismatch {
                expected: "length 2".to_string(),
                found: format!("length {}", translation.len()),
            }),
        }
    }

    /// Returns the 3x3 homogeneous matrix.
    pub fn to_matrix(&self) -> Matrix<F> {
        Matrix::homogeneous(&self.linear, self.translation_or_zero())
    }

    /// Applies the forward transform to one point.
    #[inline]
    pub fn apply_point(&self, p: Point2<F>) -> Point2<F> {
        self.linear.apply_point(p) + self.translation_or_zero()
    }

    /// Returns a transform that applies `self` first, then `other`.
    pub fn then(&self, other: &Self) -> Self {
        let linear = self.linear * other.linear;
        let translation = match (self.translation, other.translation) {
            (None, None) => None,
            (first, second) => {
                let moved = first.map_or_else(Vec2::zero, |t| {
                    let (x, y) = other.linear.apply(t.x, t.y);
                    Vec2::new(x, y)
                });
                Some(moved + second.unwrap_or_else(Vec2::zero))
            }
        };
        Self::new(linear, translation)
    }

    /// Returns the exact inverse `x = (y - t)·A⁻¹`.
    ///
    /// Fails with [`AffineError::SingularMatrix`] if the linear block cannot
    /// be inverted.
    pub fn inverse(&self) -> Result<Self, AffineError> {
        let inv = self.inverse_linear()?;
        let translation = self.translation.map(|t| {
            let (x, y) = inv.apply(-t.x, -t.y);
            Vec2::new(x, y)
        });
        Ok(Self::new(inv, translation))
    }

    /// Splits this transform into rotation, shear, scale and translation.
    ///
    /// Equivalent to [`decompose`](crate::decompose) on [`to_matrix`](Self::to_matrix).
    pub fn decompose(&self) -> Decomposition<F> {
        decompose_linear(&self.linear, self.translation, self.to_matrix())
    }

    /// Returns true if both transforms agree within `epsilon`, reading an
    /// absent translation as zero.
    pub fn approx_eq(&self, other: &Self, epsilon: F) -> bool {
        let dt = self.translation_or_zero() - other.translation_or_zero();
        self.linear.approx_eq(&other.linear, epsilon)
            && dt.x.abs() <= epsilon
            && dt.y.abs() <= epsilon
    }

    pub(crate) fn inverse_linear(&self) -> Result<Mat2<F>, AffineError> {
        self.linear
            .inverse()
            .ok_or_else(|| AffineError::SingularMatrix {
                determinant: self.linear.determinant().to_f64().unwrap_or(f64::NAN),
            })
    }
}

impl<F: Float> Default for AffineSpec<F> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<F: Float> From<Mat2<F>> for AffineSpec<F> {
    fn from(linear: Mat2<F>) -> Self {
        Self::from_linear(linear)
    }
}

impl<F: Float> TryFrom<&Matrix<F>> for AffineSpec<F> {
    type Error = AffineError;

    fn try_from(m: &Matrix<F>) -> Result<Self, AffineError> {
        Self::from_matrix(m)
    }
}
