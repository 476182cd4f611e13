//! Applying an affine transform to coordinate arrays.
//!
//! The forward transform of a coordinate row `x` is `y = x·A + t`. The
//! inverse is its exact algebraic inverse `x = (y - t)·A⁻¹`, so the
//! translation is removed *before* the inverted linear block is applied.
//!
//! A translation that is absent or exactly `(0, 0)` is skipped.

use super::spec::AffineSpec;
use crate::error::AffineError;
use crate::matrix::Matrix;
use crate::primitives::{Mat2, Point2, Vec2};
use num_traits::Float;

/// Applies `spec` (or its inverse) to an Nx2 coordinate array.
///
/// Returns a new array; `coords` is not modified.
///
/// # Errors
///
/// - [`AffineError::ShapeMismatch`] if `coords` does not have exactly two columns.
/// - [`AffineError::SingularMatrix`] if `inverse` is set and the linear block
///   cannot be inverted.
///
/// # Example
///
/// ```
/// use affinum::{apply, AffineSpec, Mat2, Matrix, Vec2};
///
/// let spec: AffineSpec<f64> =
///     AffineSpec::new(Mat2::scale(2.0, 4.0), Some(Vec2::new(1.0, 1.0)));
/// let coords = Matrix::from_rows(&[[1.0, 1.0], [0.5, 0.25]]);
///
/// let moved = apply(&coords, &spec, false).unwrap();
/// assert_eq!(moved, Matrix::from_rows(&[[3.0, 5.0], [2.0, 2.0]]));
///
/// let back = apply(&moved, &spec, true).unwrap();
/// assert_eq!(back, coords);
/// ```
pub fn apply<F: Float>(
    coords: &Matrix<F>,
    spec: &AffineSpec<F>,
    inverse: bool,
) -> Result<Matrix<F>, AffineError> {
    let mut out = coords.clone();
    apply_in_place(&mut out, spec, inverse)?;
    Ok(out)
}

/// Applies a raw affine matrix (or its inverse) to an Nx2 coordinate array.
///
/// `m` may be 2x2, 2x3 or 3x3: its top-left 2x2 is the linear block and
/// column 3 rows 1-2, when present, is the translation.
///
/// # Errors
///
/// As [`apply`], plus [`AffineError::ShapeMismatch`] if `m` has fewer than
/// two rows or columns.
pub fn apply_matrix<F: Float>(
    coords: &Matrix<F>,
    m: &Matrix<F>,
    inverse: bool,
) -> Result<Matrix<F>, AffineError> {
    apply(coords, &AffineSpec::from_matrix(m)?, inverse)
}

/// Applies `spec` (or its inverse) to an Nx2 coordinate array in place.
///
/// All validation happens before the first write, so on error `coords` is
/// left unchanged.
pub fn apply_in_place<F: Float>(
    coords: &mut Matrix<F>,
    spec: &AffineSpec<F>,
    inverse: bool,
) -> Result<(), AffineError> {
    coords.ensure_coordinates()?;
    let mapping = Mapping::new(spec, inverse)?;

    tracing::trace!(
        rows = coords.rows(),
        inverse,
        translate = mapping.offset.is_some(),
        "applying affine transform"
    );

    for xy in coords.as_mut_slice().chunks_exact_mut(2) {
        let (x, y) = mapping.map(xy[0], xy[1]);
        xy[0] = x;
        xy[1] = y;
    }
    Ok(())
}

/// Applies `spec` (or its inverse) to a slice of points.
///
/// Fails with [`AffineError::SingularMatrix`] under the same condition as
/// [`apply`].
pub fn apply_points<F: Float>(
    points: &[Point2<F>],
    spec: &AffineSpec<F>,
    inverse: bool,
) -> Result<Vec<Point2<F>>, AffineError> {
    let mapping = Mapping::new(spec, inverse)?;
    Ok(points
        .iter()
        .map(|p| {
            let (x, y) = mapping.map(p.x, p.y);
            Point2::new(x, y)
        })
        .collect())
}

/// The linear block and translation to use for one direction.
struct Mapping<F> {
    linear: Mat2<F>,
    offset: Option<Vec2<F>>,
    inverse: bool,
}

impl<F: Float> Mapping<F> {
    fn new(spec: &AffineSpec<F>, inverse: bool) -> Result<Self, AffineError> {
        let offset = spec.effective_translation();
        if inverse {
            Ok(Self {
                linear: spec.inverse_linear()?,
                offset: offset.map(|t| -t),
                inverse,
            })
        } else {
            Ok(Self {
                linear: spec.linear(),
                offset,
                inverse,
            })
        }
    }

    #[inline]
    fn map(&self, x: F, y: F) -> (F, F) {
        match self.offset {
            None => self.linear.apply(x, y),
            // translate first, then undo the linear block
            Some(t) if self.inverse => self.linear.apply(x + t.x, y + t.y),
            Some(t) => {
                let (x, y) = self.linear.apply(x, y);
                (x + t.x, y + t.y)
            }
        }
    }
}
