//! Small dense matrices with a runtime shape.
//!
//! [`Matrix`] holds both kinds of raw input the crate accepts:
//! - Nx2 coordinate arrays, one point per row.
//! - Affine matrices of shape 2x2, 2x3 or 3x3, with the linear block in the
//!   top-left corner and the translation in column 3.
//!
//! The accessors here read and replace those sub-blocks with shape checks.
//! They never mutate in place; every write returns a new matrix.

use crate::error::AffineError;
use crate::primitives::{Mat2, Point2, Vec2};
use num_traits::Float;

/// A row-major matrix of floating-point values.
///
/// # Example
///
/// ```
/// use affinum::Matrix;
///
/// let m: Matrix<f64> = Matrix::from_rows(&[
///     [2.0, 0.0, 200.0],
///     [0.0, 3.0, 300.0],
/// ]);
/// assert_eq!(m.shape(), (2, 3));
/// assert_eq!(m.linear_block().unwrap().a22, 3.0);
/// assert_eq!(m.translation().unwrap().x, 200.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "RawMatrix<F>",
        bound(deserialize = "F: Float + serde::Deserialize<'de>")
    )
)]
pub struct Matrix<F> {
    rows: usize,
    cols: usize,
    data: Vec<F>,
}

/// Serialized form of [`Matrix`], checked by [`Matrix::new`] on the way in.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawMatrix<F> {
    rows: usize,
    cols: usize,
    data: Vec<F>,
}

#[cfg(feature = "serde")]
impl<F: Float> TryFrom<RawMatrix<F>> for Matrix<F> {
    type Error = AffineError;

    fn try_from(raw: RawMatrix<F>) -> Result<Self, AffineError> {
        Self::new(raw.rows, raw.cols, raw.data)
    }
}

impl<F: Float> Matrix<F> {
    /// Creates a matrix from row-major data.
    ///
    /// Fails with [`AffineError::ShapeMismatch`] if `data` does not hold
    /// exactly `rows * cols` values.
    pub fn new(rows: usize, cols: usize, data: Vec<F>) -> Result<Self, AffineError> {
        if rows.checked_mul(cols) != Some(data.len()) {
            return Err(AffineError::ShapeMismatch {
                expected: format!("{rows}x{cols} ({} values)", rows.saturating_mul(cols)),
                found: format!("{} values", data.len()),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Creates a matrix from fixed-width rows.
    pub fn from_rows<const C: usize>(rows: &[[F; C]]) -> Self {
        Self {
            rows: rows.len(),
            cols: C,
            data: rows.iter().flatten().copied().collect(),
        }
    }

    /// Creates an all-zero matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![F::zero(); rows * cols],
        }
    }

    /// Creates an `n x n` identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.data[i * n + i] = F::one();
        }
        m
    }

    /// Creates an Nx2 coordinate array from points.
    pub fn from_points(points: &[Point2<F>]) -> Self {
        Self {
            rows: points.len(),
            cols: 2,
            data: points.iter().flat_map(|p| [p.x, p.y]).collect(),
        }
    }

    /// Creates the 3x3 homogeneous matrix for a linear block and translation.
    pub fn homogeneous(linear: &Mat2<F>, translation: Vec2<F>) -> Self {
        let (zero, one) = (F::zero(), F::one());
        Self::from_rows(&[
            [linear.a11, linear.a12, translation.x],
            [linear.a21, linear.a22, translation.y],
            [zero, zero, one],
        ])
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns true if the matrix has no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the element at `(row, col)`, or `None` when out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<F> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    /// Returns one row as a slice.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds.
    #[inline]
    pub fn row(&self, row: usize) -> &[F] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// Iterates over the rows.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[F]> + '_ {
        // chunks_exact(0) panics, and a zero-width matrix has no row data anyway
        self.data.chunks_exact(self.cols.max(1))
    }

    /// Returns the row-major element storage.
    #[inline]
    pub fn as_slice(&self) -> &[F] {
        &self.data
    }

    /// Converts an Nx2 coordinate array into points.
    pub fn to_points(&self) -> Result<Vec<Point2<F>>, AffineError> {
        self.ensure_coordinates()?;
        Ok(self
            .data
            .chunks_exact(2)
            .map(|xy| Point2::new(xy[0], xy[1]))
            .collect())
    }

    /// Fails with [`AffineError::ShapeMismatch`] unless this is an Nx2 array.
    pub fn ensure_coordinates(&self) -> Result<(), AffineError> {
        if self.cols != 2 {
            return Err(AffineError::shape("Nx2", self.rows, self.cols));
        }
        Ok(())
    }

    /// Reads the top-left 2x2 linear block.
    ///
    /// Fails with [`AffineError::ShapeMismatch`] when the matrix has fewer
    /// than two rows or columns.
    pub fn linear_block(&self) -> Result<Mat2<F>, AffineError> {
        if self.rows < 2 || self.cols < 2 {
            return Err(AffineError::shape("at least 2x2", self.rows, self.cols));
        }
        let c = self.cols;
        Ok(Mat2::new(
            self.data[0],
            self.data[1],
            self.data[c],
            self.data[c + 1],
        ))
    }

    /// Reads the translation from column 3, rows 1-2, when present.
    pub fn translation(&self) -> Option<Vec2<F>> {
        if self.rows < 2 || self.cols < 3 {
            return None;
        }
        Some(Vec2::new(self.data[2], self.data[self.cols + 2]))
    }

    /// Returns a copy with the top-left 2x2 block replaced.
    ///
    /// `block` must be exactly 2x2 and `self` at least 2x2.
    pub fn with_linear_block(&self, block: &Matrix<F>) -> Result<Self, AffineError> {
        if block.shape() != (2, 2) {
            return Err(AffineError::shape("2x2", block.rows, block.cols));
        }
        // validates the target shape
        self.linear_block()?;

        let mut out = self.clone();
        let c = out.cols;
        out.data[0] = block.data[0];
        out.data[1] = block.data[1];
        out.data[c] = block.data[2];
        out.data[c + 1] = block.data[3];
        Ok(out)
    }

    /// Returns a copy with the translation sub-vector replaced.
    ///
    /// `translation` must hold exactly two values and `self` must have at
    /// least two rows and three columns.
    pub fn with_translation(&self, translation: &[F]) -> Result<Self, AffineError> {
        if translation.len() != 2 {
            return Err(AffineError::ShapeMismatch {
                expected: "length 2".to_string(),
                found: format!("length {}", translation.len()),
            });
        }
        if self.rows < 2 || self.cols < 3 {
            return Err(AffineError::shape("at least 2x3", self.rows, self.cols));
        }

        let mut out = self.clone();
        let c = out.cols;
        out.data[2] = translation[0];
        out.data[c + 2] = translation[1];
        Ok(out)
    }

    /// Returns the 3x3 homogeneous form of an affine matrix.
    ///
    /// A 3x3 input is returned unchanged. Otherwise the first two rows
    /// (up to three columns) are kept, a missing translation column is
    /// filled with zeros and the `[0, 0, 1]` row is appended.
    pub fn to_homogeneous(&self) -> Result<Self, AffineError> {
        if self.rows < 2 || self.cols < 2 {
            return Err(AffineError::InvalidDimensions {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.shape() == (3, 3) {
            return Ok(self.clone());
        }
        let linear = self.linear_block()?;
        Ok(Self::homogeneous(
            &linear,
            self.translation().unwrap_or_else(Vec2::zero),
        ))
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [F] {
        &mut self.data
    }
}

impl<F: Float> From<Mat2<F>> for Matrix<F> {
    fn from(m: Mat2<F>) -> Self {
        Self::from_rows(&m.to_rows())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn affine_2x3() -> Matrix<f64> {
        Matrix::from_rows(&[[1.0, 2.0, 10.0], [3.0, 4.0, 20.0]])
    }

    #[test]
    fn test_new_checks_length() {
        assert!(Matrix::new(2, 2, vec![1.0_f64, 0.0, 0.0, 1.0]).is_ok());

        let err = Matrix::new(2, 2, vec![1.0_f64, 0.0, 0.0]).unwrap_err();
        assert!(matches!(err, AffineError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_identity() {
        let m: Matrix<f64> = Matrix::identity(3);
        assert_eq!(
            m,
            Matrix::from_rows(&[[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]])
        );
    }

    #[test]
    fn test_get_and_row() {
        let m = affine_2x3();
        assert_eq!(m.get(1, 2), Some(20.0));
        assert_eq!(m.get(2, 0), None);
        assert_eq!(m.row(0), &[1.0, 2.0, 10.0]);
        assert_eq!(m.iter_rows().count(), 2);
    }

    #[test]
    fn test_points_round_trip() {
        let points = vec![Point2::new(1.0_f64, 2.0), Point2::new(3.0, 4.0)];
        let m = Matrix::from_points(&points);

        assert_eq!(m.shape(), (2, 2));
        assert_eq!(m.to_points().unwrap(), points);
    }

    #[test]
    fn test_empty_points() {
        let m: Matrix<f64> = Matrix::from_points(&[]);
        assert_eq!(m.shape(), (0, 2));
        assert!(m.is_empty());
        assert!(m.to_points().unwrap().is_empty());
        assert_eq!(m.iter_rows().count(), 0);
    }

    #[test]
    fn test_to_points_rejects_wrong_width() {
        let m: Matrix<f64> = Matrix::zeros(4, 3);
        let err = m.to_points().unwrap_err();
        assert_eq!(
            err,
            AffineError::ShapeMismatch {
                expected: "Nx2".to_string(),
                found: "4x3".to_string(),
            }
        );
    }

    #[test]
    fn test_linear_block() {
        let m = affine_2x3();
        assert_eq!(m.linear_block().unwrap(), Mat2::new(1.0, 2.0, 3.0, 4.0));

        let narrow: Matrix<f64> = Matrix::zeros(2, 1);
        assert!(narrow.linear_block().is_err());
    }

    #[test]
    fn test_translation() {
        assert_eq!(affine_2x3().translation(), Some(Vec2::new(10.0, 20.0)));
        assert_eq!(Matrix::<f64>::identity(2).translation(), None);
    }

    #[test]
    fn test_with_linear_block() {
        let block = Matrix::from_rows(&[[5.0, 6.0], [7.0, 8.0]]);
        let m = affine_2x3().with_linear_block(&block).unwrap();

        assert_eq!(m, Matrix::from_rows(&[[5.0, 6.0, 10.0], [7.0, 8.0, 20.0]]));
        // the source is untouched
        assert_eq!(affine_2x3().get(0, 0), Some(1.0));
    }

    #[test]
    fn test_with_linear_block_rejects_bad_shape() {
        let block: Matrix<f64> = Matrix::zeros(2, 3);
        let err = affine_2x3().with_linear_block(&block).unwrap_err();
        assert!(matches!(err, AffineError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_with_translation() {
        let m = affine_2x3().with_translation(&[-1.0, -2.0]).unwrap();
        assert_eq!(m.translation(), Some(Vec2::new(-1.0, -2.0)));
        assert_eq!(m.linear_block().unwrap(), Mat2::new(1.0, 2.0, 3.0, 4.0));
    }

    #[test]
    fn test_with_translation_rejects_bad_length() {
        let err = affine_2x3().with_translation(&[1.0, 2.0, 3.0]).unwrap_err();
        assert_eq!(
            err,
            AffineError::ShapeMismatch {
                expected: "length 2".to_string(),
                found: "length 3".to_string(),
            }
        );

        let square: Matrix<f64> = Matrix::identity(2);
        assert!(square.with_translation(&[1.0, 2.0]).is_err());
    }

    #[test]
    fn test_to_homogeneous() {
        let h = affine_2x3().to_homogeneous().unwrap();
        assert_eq!(
            h,
            Matrix::from_rows(&[[1.0, 2.0, 10.0], [3.0, 4.0, 20.0], [0.0, 0.0, 1.0]])
        );

        let h = Matrix::from_rows(&[[2.0_f64, 0.0], [0.0, 3.0]])
            .to_homogeneous()
            .unwrap();
        assert_eq!(
            h,
            Matrix::from_rows(&[[2.0, 0.0, 0.0], [0.0, 3.0, 0.0], [0.0, 0.0, 1.0]])
        );

        let err = Matrix::<f64>::zeros(1, 3).to_homogeneous().unwrap_err();
        assert_eq!(err, AffineError::InvalidDimensions { rows: 1, cols: 3 });
    }

    #[test]
    fn test_from_mat2() {
        let m: Matrix<f64> = Mat2::new(1.0, 2.0, 3.0, 4.0).into();
        assert_eq!(m, Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_checks_length() {
        let m: Matrix<f64> =
            serde_json::from_str(r#"{"rows":2,"cols":2,"data":[1.0,0.0,0.0,1.0]}"#).unwrap();
        assert_eq!(m, Matrix::identity(2));

        let short = serde_json::from_str::<Matrix<f64>>(r#"{"rows":2,"cols":2,"data":[1.0]}"#);
        let err = short.unwrap_err();
        assert!(err.to_string().contains("shape mismatch"), "{err}");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serialize_round_trip() {
        let m = affine_2x3();
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(serde_json::from_str::<Matrix<f64>>(&json).unwrap(), m);
    }
}
