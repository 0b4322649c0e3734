//! Core traits for starfield

use crate::{material::PointMaterial, point::*, point_cloud::*, Result};
use nalgebra::Matrix4;

/// Trait for drawable/renderable objects
pub trait Drawable {
    /// Get the bounding box of the object
    fn bounding_box(&self) -> (Point3f, Point3f);
}

impl Drawable for PointCloud<Point3f> {
    fn bounding_box(&self) -> (Point3f, Point3f) {
        if self.is_empty() {
            return (Point3f::origin(), Point3f::origin());
        }

        let mut min = self.points[0];
        let mut max = self.points[0];

        for p in &self.points {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            min.z = min.z.min(p.z);

            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            max.z = max.z.max(p.z);
        }

        (min, max)
    }
}

/// Everything a render target needs to draw one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameState {
    /// Object rotation of the point cloud
    pub model: Matrix4<f32>,
    /// Camera projection times view
    pub view_proj: Matrix4<f32>,
    pub material: PointMaterial,
    /// Surface size in physical pixels
    pub viewport: (u32, u32),
}

/// A surface the animation driver draws into
pub trait RenderTarget {
    /// Match the surface to a new viewport size
    fn resize(&mut self, width: u32, height: u32);

    /// Draw the point cloud once
    fn draw(&mut self, frame: &FrameState) -> Result<()>;
}

impl<T: RenderTarget + ?Sized> RenderTarget for Box<T> {
    fn resize(&mut self, width: u32, height: u32) {
        (**self).resize(width, height)
    }

    fn draw(&mut self, frame: &FrameState) -> Result<()> {
        (**self).draw(frame)
    }
}
