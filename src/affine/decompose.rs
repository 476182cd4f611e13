//! Decomposition of an affine matrix into rotation, shear, scale and translation.
//!
//! An affine linear block `A` factors as `A = R · H · S` where `R` is a
//! rotation, `H` a shear along a single axis and `S` a per-axis scale. With
//! row-vector coordinates this means: rotate, then shear, then scale, then
//! translate.
//!
//! The factorization is not unique. Two closed-form candidates are derived,
//! one carrying the shear on the x axis and one on the y axis, and the one
//! with more identity-valued components wins. Ties keep the x-shear
//! candidate.
//!
//! # Boundary conditions
//!
//! - A derived scale of zero divides the shear by zero. The resulting NaN or
//!   infinity is kept as is; see [`Decomposition::ensure_representable`].
//! - The algebraically derived scale (`sy` for the y-shear candidate, `sx`
//!   for the x-shear candidate) is negative for reflections and is not
//!   clamped.
//! - The rotation comes from `atan` of a ratio, so it lies in `(-π/2, π/2)`.
//!   When the pivot entry (`a11` for the y-shear candidate, `a22` for the
//!   x-shear candidate) is negative, the components no longer recompose
//!   the input.

use super::spec::AffineSpec;
use crate::error::AffineError;
use crate::matrix::Matrix;
use crate::primitives::{Mat2, Vec2};
use num_traits::Float;
use std::fmt;

/// A primitive operation in a decomposed transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Operation {
    Rotate,
    Shear,
    Scale,
    Translate,
}

impl Operation {
    /// The order in which decomposed components are applied.
    pub const CANONICAL_ORDER: [Operation; 4] = [
        Operation::Rotate,
        Operation::Shear,
        Operation::Scale,
        Operation::Translate,
    ];

    /// Lowercase name of the operation.
    pub fn name(self) -> &'static str {
        match self {
            Operation::Rotate => "rotate",
            Operation::Shear => "shear",
            Operation::Scale => "scale",
            Operation::Translate => "translate",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One operation together with its parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step<F> {
    /// Rotation angle in radians.
    Rotate(F),
    /// Shear factors `(x, y)`.
    Shear(Vec2<F>),
    /// Scale factors `(x, y)`.
    Scale(Vec2<F>),
    /// Translation offset.
    Translate(Vec2<F>),
}

impl<F> Step<F> {
    /// The operation kind of this step.
    pub fn operation(&self) -> Operation {
        match self {
            Step::Rotate(_) => Operation::Rotate,
            Step::Shear(_) => Operation::Shear,
            Step::Scale(_) => Operation::Scale,
            Step::Translate(_) => Operation::Translate,
        }
    }
}

impl<F: fmt::Display> fmt::Display for Step<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Rotate(angle) => write!(f, "rotate({angle} rad)"),
            Step::Shear(v) | Step::Scale(v) | Step::Translate(v) => {
                write!(f, "{}(x={}, y={})", self.operation(), v.x, v.y)
            }
        }
    }
}

/// The result of [`decompose`].
///
/// Applying `rotate`, `shear`, `scale` and `translate` in [`order`](Self::order)
/// reproduces [`affine`](Self::affine), up to floating-point error and the
/// boundary conditions listed in the module docs.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(deserialize = "F: Float + serde::Deserialize<'de>"))
)]
pub struct Decomposition<F> {
    /// Per-axis scale factors.
    pub scale: Vec2<F>,
    /// Rotation angle in radians.
    pub rotate: F,
    /// Shear factors; at most one component is nonzero.
    pub shear: Vec2<F>,
    /// Translation, copied from the input's translation column.
    pub translate: Vec2<F>,
    /// Application order, always [`Operation::CANONICAL_ORDER`].
    pub order: [Operation; 4],
    /// The decomposed matrix in 3x3 homogeneous form.
    pub affine: Matrix<F>,
}

impl<F: Float> Decomposition<F> {
    /// Returns the operations with their parameters, in application order.
    pub fn steps(&self) -> [Step<F>; 4] {
        self.order.map(|op| match op {
            Operation::Rotate => Step::Rotate(self.rotate),
            Operation::Shear => Step::Shear(self.shear),
            Operation::Scale => Step::Scale(self.scale),
            Operation::Translate => Step::Translate(self.translate),
        })
    }

    /// Recomposes the linear block from rotation, shear and scale.
    pub fn linear(&self) -> Mat2<F> {
        Mat2::rotation(self.rotate)
            * Mat2::shear(self.shear)
            * Mat2::scale(self.scale.x, self.scale.y)
    }

    /// Recomposes the full transform, translation included.
    pub fn to_spec(&self) -> AffineSpec<F> {
        AffineSpec::new(self.linear(), Some(self.translate))
    }

    /// Number of components equal to their identity value.
    ///
    /// Counts scale components equal to 1, shear components equal to 0 and
    /// a rotation of 0. The maximum is 5.
    pub fn simplicity(&self) -> usize {
        simplicity(self.scale, self.shear, self.rotate)
    }

    /// Returns true if every component is finite and neither scale is zero.
    pub fn is_representable(&self) -> bool {
        self.scale.is_finite()
            && self.scale.x != F::zero()
            && self.scale.y != F::zero()
            && self.shear.is_finite()
            && self.rotate.is_finite()
    }

    /// Fails with [`AffineError::DegenerateScale`] unless the decomposition
    /// is representable.
    ///
    /// [`decompose`] itself never fails on degenerate input, since callers
    /// that only need [`affine`](Self::affine) can still use the result.
    pub fn ensure_representable(&self) -> Result<(), AffineError> {
        if self.is_representable() {
            return Ok(());
        }
        Err(AffineError::DegenerateScale {
            sx: self.scale.x.to_f64().unwrap_or(f64::NAN),
            sy: self.scale.y.to_f64().unwrap_or(f64::NAN),
        })
    }
}

/// Decomposes a 2x2, 2x3 or 3x3 affine matrix.
///
/// Larger inputs contribute only their top-left 2x2 and the first two rows
/// of column 3; [`Decomposition::affine`] is then rebuilt as a homogeneous
/// 3x3. A 3x3 input is kept as given.
///
/// Fails with [`AffineError::InvalidDimensions`] if the matrix has fewer than
/// two rows or two columns.
///
/// # Example
///
/// ```
/// use affinum::{decompose, Matrix};
///
/// let m: Matrix<f64> = Matrix::from_rows(&[
///     [2.0, 0.0, 200.0],
///     [0.0, 3.0, 300.0],
/// ]);
/// let d = decompose(&m).unwrap();
///
/// assert_eq!((d.scale.x, d.scale.y), (2.0, 3.0));
/// assert_eq!(d.rotate, 0.0);
/// assert_eq!((d.shear.x, d.shear.y), (0.0, 0.0));
/// assert_eq!((d.translate.x, d.translate.y), (200.0, 300.0));
/// assert_eq!(d.affine.shape(), (3, 3));
/// ```
pub fn decompose<F: Float>(m: &Matrix<F>) -> Result<Decomposition<F>, AffineError> {
    let (rows, cols) = m.shape();
    if rows < 2 || cols < 2 {
        return Err(AffineError::InvalidDimensions { rows, cols });
    }
    let linear = m.linear_block()?;
    let affine = m.to_homogeneous()?;
    Ok(decompose_linear(&linear, m.translation(), affine))
}

pub(crate) fn decompose_linear<F: Float>(
    linear: &Mat2<F>,
    translation: Option<Vec2<F>>,
    affine: Matrix<F>,
) -> Decomposition<F> {
    let x = shear_x_candidate(linear);
    let y = shear_y_candidate(linear);
    let (score_x, score_y) = (x.score(), y.score());

    let (winner, axis) = if score_y > score_x { (y, "y") } else { (x, "x") };
    tracing::debug!(score_x, score_y, shear_axis = axis, "decomposed affine matrix");

    let decomposition = Decomposition {
        scale: winner.scale,
        rotate: winner.rotate,
        shear: winner.shear,
        translate: translation.unwrap_or_else(Vec2::zero),
        order: Operation::CANONICAL_ORDER,
        affine,
    };
    if !decomposition.is_representable() {
        tracing::warn!(
            shear_axis = axis,
            "affine decomposition has a zero or non-finite component"
        );
    }
    decomposition
}

/// Rotation, shear and scale of one candidate factorization.
#[derive(Debug, Clone, Copy)]
struct Candidate<F> {
    scale: Vec2<F>,
    rotate: F,
    shear: Vec2<F>,
}

impl<F: Float> Candidate<F> {
    fn score(&self) -> usize {
        simplicity(self.scale, self.shear, self.rotate)
    }
}

fn simplicity<F: Float>(scale: Vec2<F>, shear: Vec2<F>, rotate: F) -> usize {
    scale.count_eq(F::one()) + shear.count_eq(F::zero()) + usize::from(rotate == F::zero())
}

/// Factorization with the shear carried on the y axis.
///
/// `sx` is the norm of the first column and the rotation aligns that column
/// with the x axis.
fn shear_y_candidate<F: Float>(m: &Mat2<F>) -> Candidate<F> {
    let sx = (m.a11 * m.a11 + m.a21 * m.a21).sqrt();
    let r = (m.a21 / m.a11).atan();
    let (sin_r, cos_r) = r.sin_cos();

    let msy = m.a12 * cos_r + m.a22 * sin_r;
    let sy = if sin_r != F::zero() {
        (msy * cos_r - m.a12) / sin_r
    } else {
        (m.a22 - msy * sin_r) / cos_r
    };

    Candidate {
        scale: Vec2::new(sx, sy),
        rotate: r,
        shear: Vec2::new(F::zero(), msy / sy),
    }
}

/// Factorization with the shear carried on the x axis.
///
/// `sy` is the norm of the second column and the rotation aligns that column
/// with the y axis.
fn shear_x_candidate<F: Float>(m: &Mat2<F>) -> Candidate<F> {
    let sy = (m.a12 * m.a12 + m.a22 * m.a22).sqrt();
    let r = (-m.a12 / m.a22).atan();
    let (sin_r, cos_r) = r.sin_cos();

    let msx = m.a21 * cos_r - m.a11 * sin_r;
    let sx = if sin_r != F::zero() {
        (m.a21 - msx * cos_r) / sin_r
    } else {
        (m.a11 + msx * sin_r) / cos_r
    };

    Candidate {
        scale: Vec2::new(sx, sy),
        rotate: r,
        shear: Vec2::new(msx / sx, F::zero()),
    }
}
