//! Backdrop configuration

use crate::material::PointMaterial;
use crate::starfield::{STAR_COUNT, STAR_SPREAD};
use serde::{Deserialize, Serialize};

/// Parameters of the backdrop scene and its animation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackdropConfig {
    pub point_count: usize,
    /// Side of the cube the points are scattered in
    pub spread: f32,
    pub material: PointMaterial,
    /// Vertical field of view in degrees
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    /// Camera distance from the origin along +z
    pub camera_distance: f32,
    /// Rotation added to the x and y angles every frame, in radians
    pub spin_per_frame: f64,
    /// Radians of extra rotation per unit of normalized pointer offset
    pub parallax_factor: f64,
    /// Fixed RNG seed for a reproducible cloud
    pub seed: Option<u64>,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            point_count: STAR_COUNT,
            spread: STAR_SPREAD,
            material: PointMaterial::NEON,
            fov: 75.0,
            near: 0.1,
            far: 1000.0,
            camera_distance: 2.0,
            spin_per_frame: 0.002,
            parallax_factor: 0.05,
            seed: None,
        }
    }
}
