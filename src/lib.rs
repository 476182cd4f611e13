//! affinum - 2D affine transforms for planar coordinate arrays
//!
//! Apply a linear block plus translation (or its exact inverse) to Nx2
//! coordinate arrays, and split any 2x3 or 3x3 affine matrix into a readable
//! chain of rotate, shear, scale and translate.
//!
//! # Example
//!
//! ```
//! use affinum::{apply, decompose, AffineSpec, Matrix};
//!
//! let m: Matrix<f64> = Matrix::from_rows(&[
//!     [2.0, 0.0, 200.0],
//!     [0.0, 3.0, 300.0],
//!     [0.0, 0.0, 1.0],
//! ]);
//!
//! let spec = AffineSpec::from_matrix(&m).unwrap();
//! let coords = Matrix::from_rows(&[[1.0, 1.0], [0.0, 2.0]]);
//! let moved = apply(&coords, &spec, false).unwrap();
//! assert_eq!(moved, Matrix::from_rows(&[[202.0, 303.0], [200.0, 306.0]]));
//!
//! let steps: Vec<String> = decompose(&m)
//!     .unwrap()
//!     .steps()
//!     .iter()
//!     .map(|s| s.to_string())
//!     .collect();
//! assert_eq!(steps[2], "scale(x=2, y=3)");
//! assert_eq!(steps[3], "translate(x=200, y=300)");
//! ```

pub mod affine;
pub mod error;
pub mod geometry;
pub mod matrix;
pub mod primitives;

pub use affine::{
    apply, apply_in_place, apply_matrix, apply_points, decompose, AffineSpec, Decomposition,
    Operation, Step,
};
pub use error::AffineError;
pub use geometry::{transform_object, GeometryKind, Polygon, SpatialObject};
pub use matrix::Matrix;
pub use primitives::{Mat2, Point2, Vec2};
