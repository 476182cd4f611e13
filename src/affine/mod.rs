//! Affine transform application and decomposition.
//!
//! - [`AffineSpec`] is the transform value: a 2x2 linear block plus an
//!   optional translation.
//! - [`apply`] and friends map Nx2 coordinate arrays forward or inverse.
//! - [`decompose`] splits a matrix into rotation, shear, scale and
//!   translation.
//!
//! # Example
//!
//! ```
//! use affinum::affine::{apply, decompose, AffineSpec};
//! use affinum::Matrix;
//!
//! let m: Matrix<f64> = Matrix::from_rows(&[
//!     [1.0, 0.5, 10.0],
//!     [0.0, 1.0, 20.0],
//! ]);
//!
//! let d = decompose(&m).unwrap();
//! assert_eq!((d.shear.x, d.shear.y), (0.0, 0.5));
//!
//! let spec = AffineSpec::from_matrix(&m).unwrap();
//! let out = apply(&Matrix::from_rows(&[[2.0, 0.0]]), &spec, false).unwrap();
//! assert_eq!(out, Matrix::from_rows(&[[12.0, 21.0]]));
//! ```

mod apply;
mod decompose;
mod spec;

pub use apply::{apply, apply_in_place, apply_matrix, apply_points};
pub use decompose::{decompose, Decomposition, Operation, Step};
pub use spec::AffineSpec;
