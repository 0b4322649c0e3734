//! Point sprite material

use serde::{Deserialize, Serialize};

/// Appearance of every point in the cloud
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointMaterial {
    /// Point size in world units
    pub size: f32,
    /// RGB color, 0xRRGGBB
    pub color: u32,
    pub opacity: f32,
    pub transparent: bool,
    /// Shrink points with distance from the camera
    pub size_attenuation: bool,
}

impl PointMaterial {
    /// Neon green, semi-transparent dots
    pub const NEON: Self = Self {
        size: 0.005,
        color: 0x00ff41,
        opacity: 0.8,
        transparent: true,
        size_attenuation: true,
    };

    /// Color as normalized RGBA; opacity only applies when transparent
    pub fn rgba(&self) -> [f32; 4] {
        let channel = |shift: u32| ((self.color >> shift) & 0xff) as f32 / 255.0;
        let alpha = if self.transparent { self.opacity } else { 1.0 };
        [channel(16), channel(8), channel(0), alpha]
    }
}

impl Default for PointMaterial {
    fn default() -> Self {
        Self::NEON
    }
}
