//! # Starfield GPU
//!
//! wgpu rendering for the starfield backdrop.
//!
//! Each point of the cloud is uploaded once as an instance and expanded into a
//! screen-facing sprite in the vertex shader. The renderer implements
//! [`starfield_core::RenderTarget`], so an [`starfield_core::AnimationDriver`]
//! can draw straight into a window surface.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use starfield_core::{AnimationDriver, Backdrop, BackdropConfig};
//! use starfield_gpu::{PointCloudRenderer, RenderConfig};
//!
//! async fn example(window: Arc<winit::window::Window>) -> starfield_core::Result<()> {
//!     let size = window.inner_size();
//!     let backdrop = Backdrop::new(&BackdropConfig::default(), size.width, size.height);
//!
//!     let mut renderer = PointCloudRenderer::new(window, RenderConfig::default()).await?;
//!     renderer.set_point_cloud(backdrop.cloud());
//!
//!     let _driver = AnimationDriver::new(backdrop, renderer);
//!     Ok(())
//! }
//! ```

pub mod device;
pub mod renderer;

// Re-export commonly used items
pub use device::GpuContext;
pub use renderer::{point_cloud_to_vertices, FrameUniform, PointCloudRenderer, PointVertex, RenderConfig};
