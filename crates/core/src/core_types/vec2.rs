//! Vector and point aliases for grid-space positions and directions.

use nalgebra::{Point2, Vector2};

/// 2D vector type for particle positions and velocities.
///
/// This is a simple alias for `nalgebra::Vector2<f32>`, measured in grid cells
/// (x grows to the right, y grows downward).
pub type Vec2 = Vector2<f32>;

/// Integer grid coordinate, used for precomputed paths such as lightning bolts.
pub type GridPoint = Point2<i32>;
