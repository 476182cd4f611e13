//! Floating-point geometric primitives.

mod mat2;
mod point2;
mod vec2;

pub use mat2::Mat2;
pub use point2::Point2;
pub use vec2::Vec2;
