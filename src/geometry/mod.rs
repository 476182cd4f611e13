//! Spatial objects that can be moved by affine transforms.
//!
//! The transforms in [`crate::affine`] only see Nx2 coordinate arrays. This
//! module tags where those coordinates came from ([`GeometryKind`]) and
//! rebuilds typed objects from the transformed array.

mod adapter;
mod polygon;

pub use adapter::{transform_object, Extracted, GeometryKind, SpatialObject};
pub use polygon::{polygon_signed_area, Polygon};
