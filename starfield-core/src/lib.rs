//! Core data structures and animation logic for starfield
//!
//! This crate provides the scene side of the particle backdrop: the point
//! cloud and its material, the perspective camera, pointer tracking and the
//! per-frame animation driver. Drawing is delegated to a [`RenderTarget`].

pub mod camera;
pub mod config;
pub mod driver;
pub mod error;
pub mod material;
pub mod point;
pub mod point_cloud;
pub mod pointer;
pub mod starfield;
pub mod traits;
pub mod transform;

pub use camera::*;
pub use config::*;
pub use driver::*;
pub use error::*;
pub use material::*;
pub use point::*;
pub use point_cloud::*;
pub use pointer::*;
pub use starfield::*;
pub use traits::*;
pub use transform::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Matrix4, Point3, Vector3};
