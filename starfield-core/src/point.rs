//! Point types and related functionality

use nalgebra::{Point3, Vector3};

/// A 3D point with floating point coordinates
pub type Point3f = Point3<f32>;

/// A 3D vector with floating point components
pub type Vector3f = Vector3<f32>;

/// Pack a point into the `[x, y, z]` layout used by vertex buffers
pub fn to_array(point: &Point3f) -> [f32; 3] {
    [point.x, point.y, point.z]
}
