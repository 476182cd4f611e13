//! Glue between spatial objects and the coordinate-array transforms.
//!
//! A spatial object hands out its coordinates as one flat Nx2 array tagged
//! with its [`GeometryKind`], the array is transformed, and the object is
//! rebuilt from the result by the routine for that kind.

use super::polygon::Polygon;
use crate::affine::{apply, AffineSpec};
use crate::error::AffineError;
use crate::matrix::Matrix;
use crate::primitives::Point2;
use num_traits::Float;
use std::fmt;

/// The kind of spatial object a coordinate array came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GeometryKind {
    /// A set of independent points.
    Points,
    /// A set of polygon rings.
    Polygons,
    /// A plain coordinate table.
    Table,
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GeometryKind::Points => "points",
            GeometryKind::Polygons => "polygons",
            GeometryKind::Table => "table",
        })
    }
}

/// Coordinates pulled out of a spatial object.
#[derive(Debug, Clone, PartialEq)]
pub struct Extracted<F> {
    /// Which rebuild routine the coordinates belong to.
    pub kind: GeometryKind,
    /// All coordinates, one point per row.
    pub coords: Matrix<F>,
    /// Vertex count of each part, in row order. Empty for kinds without parts.
    pub parts: Vec<usize>,
}

/// A spatial object whose coordinates can be transformed as an Nx2 array.
pub trait SpatialObject<F: Float>: Sized {
    /// The tag this type extracts to and rebuilds from.
    const KIND: GeometryKind;

    /// Extracts all coordinates as one Nx2 array.
    fn extract(&self) -> Extracted<F>;

    /// Rebuilds an object from (transformed) extracted coordinates.
    fn rebuild(extracted: Extracted<F>) -> Result<Self, AffineError>;
}

/// Transforms a spatial object by extracting, transforming and rebuilding it.
///
/// # Example
///
/// ```
/// use affinum::geometry::transform_object;
/// use affinum::{AffineSpec, Point2, Vec2};
///
/// let points = vec![Point2::new(1.0_f64, 2.0), Point2::new(3.0, 4.0)];
/// let spec = AffineSpec::translation_only(Vec2::new(10.0, 10.0));
///
/// let moved = transform_object(&points, &spec, false).unwrap();
/// assert_eq!(moved[1], Point2::new(13.0, 14.0));
/// ```
pub fn transform_object<F, S>(
    obj: &S,
    spec: &AffineSpec<F>,
    inverse: bool,
) -> Result<S, AffineError>
where
    F: Float,
    S: SpatialObject<F>,
{
    let extracted = obj.extract();
    let coords = apply(&extracted.coords, spec, inverse)?;
    S::rebuild(Extracted { coords, ..extracted })
}

fn ensure_kind(extracted: &Extracted<impl Float>, kind: GeometryKind) -> Result<(), AffineError> {
    if extracted.kind != kind {
        return Err(AffineError::ShapeMismatch {
            expected: format!("{kind} geometry"),
            found: format!("{} geometry", extracted.kind),
        });
    }
    Ok(())
}

impl<F: Float> SpatialObject<F> for Vec<Point2<F>> {
    const KIND: GeometryKind = GeometryKind::Points;

    fn extract(&self) -> Extracted<F> {
        Extracted {
            kind: Self::KIND,
            coords: Matrix::from_points(self),
            parts: Vec::new(),
        }
    }

    fn rebuild(extracted: Extracted<F>) -> Result<Self, AffineError> {
        ensure_kind(&extracted, Self::KIND)?;
        extracted.coords.to_points()
    }
}

impl<F: Float> SpatialObject<F> for Vec<Polygon<F>> {
    const KIND: GeometryKind = GeometryKind::Polygons;

    fn extract(&self) -> Extracted<F> {
        let vertices: Vec<Point2<F>> = self
            .iter()
            .flat_map(|poly| poly.vertices.iter().copied())
            .collect();
        Extracted {
            kind: Self::KIND,
            coords: Matrix::from_points(&vertices),
            parts: self.iter().map(Polygon::len).collect(),
        }
    }

    fn rebuild(extracted: Extracted<F>) -> Result<Self, AffineError> {
        ensure_kind(&extracted, Self::KIND)?;
        let total: usize = extracted.parts.iter().sum();
        if total != extracted.coords.rows() {
            return Err(AffineError::ShapeMismatch {
                expected: format!("{total} vertices"),
                found: format!("{} rows", extracted.coords.rows()),
            });
        }

        let mut points = extracted.coords.to_points()?.into_iter();
        Ok(extracted
            .parts
            .iter()
            .map(|&n| Polygon::new(points.by_ref().take(n).collect()))
            .collect())
    }
}

impl<F: Float> SpatialObject<F> for Matrix<F> {
    const KIND: GeometryKind = GeometryKind::Table;

    fn extract(&self) -> Extracted<F> {
        Extracted {
            kind: Self::KIND,
            coords: self.clone(),
            parts: Vec::new(),
        }
    }

    fn rebuild(extracted: Extracted<F>) -> Result<Self, AffineError> {
        ensure_kind(&extracted, Self::KIND)?;
        Ok(extracted.coords)
    }
}
