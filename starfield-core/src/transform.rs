//! 3D transformation utilities

use nalgebra::{Matrix4, Rotation3, Vector3};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Euler angles in radians, applied in X, then Y, then Z order.
///
/// The composed rotation matrix is `Rx * Ry * Rz`, the convention used by
/// scene-graph libraries for an object's `rotation` property.
///
/// Angles accumulate in `f64` and are never wrapped, so a small per-frame
/// increment keeps its full size after days of animation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EulerRotation {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl EulerRotation {
    /// Create a rotation from its three angles
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Add increments to the x and y angles
    pub fn rotate_by(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }

    /// Rotation matrix for these angles.
    ///
    /// Each angle is reduced to [0, 2π) before narrowing to `f32`.
    pub fn to_rotation(&self) -> Rotation3<f32> {
        let angle = |a: f64| a.rem_euclid(TAU) as f32;
        let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), angle(self.x));
        let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), angle(self.y));
        let rz = Rotation3::from_axis_angle(&Vector3::z_axis(), angle(self.z));
        rx * ry * rz
    }
}

/// A 3D transformation that can be applied to points and point clouds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform3D {
    pub matrix: Matrix4<f32>,
}

impl Transform3D {
    /// Create a rotation transformation from Euler angles
    pub fn from_euler(rotation: &EulerRotation) -> Self {
        Self {
            matrix: rotation.to_rotation().to_homogeneous(),
        }
    }
}
