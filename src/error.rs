//! Error types for affinum operations.

use thiserror::Error;

/// Errors that can occur while applying or decomposing affine transforms.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AffineError {
    /// A coordinate array or matrix block has the wrong shape.
    #[error("shape mismatch: expected {expected}, found {found}")]
    ShapeMismatch {
        /// The shape the operation requires, e.g. `"Nx2"` or `"2x2"`.
        expected: String,
        /// The shape that was supplied.
        found: String,
    },

    /// The inverse was requested for a linear block that cannot be inverted.
    #[error("singular matrix: linear block has determinant {determinant}")]
    SingularMatrix {
        /// Determinant of the offending linear block.
        determinant: f64,
    },

    /// The input cannot be read as an affine matrix with a 2x2 linear block.
    #[error("invalid dimensions: {rows}x{cols} matrix has no 2x2 linear block")]
    InvalidDimensions {
        /// Row count of the supplied matrix.
        rows: usize,
        /// Column count of the supplied matrix.
        cols: usize,
    },

    /// A derived scale factor is zero or non-finite, so the shear is unrepresentable.
    #[error("degenerate scale ({sx}, {sy}): decomposition is not representable")]
    DegenerateScale {
        /// Derived x scale factor.
        sx: f64,
        /// Derived y scale factor.
        sy: f64,
    },
}

impl AffineError {
    pub(crate) fn shape(expected: impl Into<String>, rows: usize, cols: usize) -> Self {
        Self::ShapeMismatch {
            expected: expected.into(),
            found: format!("{rows}x{cols}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_message() {
        let err = AffineError::shape("Nx2", 4, 3);
        assert_eq!(err.to_string(), "shape mismatch: expected Nx2, found 4x3");
    }

    #[test]
    fn test_singular_message() {
        let err = AffineError::SingularMatrix { determinant: 0.0 };
        assert_eq!(
            err.to_string(),
            "singular matrix: linear block has determinant 0"
        );
    }

    #[test]
    fn test_invalid_dimensions_message() {
        let err = AffineError::InvalidDimensions { rows: 1, cols: 3 };
        assert_eq!(
            err.to_string(),
            "invalid dimensions: 1x3 matrix has no 2x2 linear block"
        );
    }
}
