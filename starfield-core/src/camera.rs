//! Camera utilities for 3D visualization

use nalgebra::{Matrix4, Perspective3, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Converts an OpenGL-style clip volume (z in [-1, 1]) to the wgpu one (z in [0, 1])
#[rustfmt::skip]
pub fn opengl_to_wgpu_matrix() -> Matrix4<f32> {
    Matrix4::new(
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 0.5, 0.5,
        0.0, 0.0, 0.0, 1.0,
    )
}

/// A perspective camera.
///
/// The projection matrix is cached: after changing `fov`, `aspect_ratio`,
/// `near` or `far`, call [`Camera::update_projection_matrix`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    /// Vertical field of view in degrees
    pub fov: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
    projection: Matrix4<f32>,
}

impl Camera {
    /// Create a new camera
    pub fn new(
        position: Point3<f32>,
        target: Point3<f32>,
        up: Vector3<f32>,
        fov: f32,
        aspect_ratio: f32,
        near: f32,
        far: f32,
    ) -> Self {
        let mut camera = Self {
            position,
            target,
            up,
            fov,
            aspect_ratio,
            near,
            far,
            projection: Matrix4::identity(),
        };
        camera.update_projection_matrix();
        camera
    }

    /// Camera on the +z axis looking at the origin
    pub fn looking_at_origin(distance: f32, fov: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        Self::new(
            Point3::new(0.0, 0.0, distance),
            Point3::origin(),
            Vector3::y(),
            fov,
            aspect_ratio,
            near,
            far,
        )
    }

    /// Get the view matrix
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Get the cached projection matrix, in wgpu clip space
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection
    }

    /// Recompute the projection matrix from the current parameters
    pub fn update_projection_matrix(&mut self) {
        let perspective = Perspective3::new(self.aspect_ratio, self.fov.to_radians(), self.near, self.far);
        self.projection = opengl_to_wgpu_matrix() * perspective.into_inner();
    }

    /// Set the aspect ratio from a viewport size and refresh the projection
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect_ratio = width as f32 / height as f32;
        self.update_projection_matrix();
    }

    /// Projection times view
    pub fn view_projection(&self) -> Matrix4<f32> {
        self.projection * self.view_matrix()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::looking_at_origin(2.0, 75.0, 16.0 / 9.0, 0.1, 1000.0)
    }
}
