//! # Starfield
//!
//! An animated particle backdrop: a cloud of points that slowly rotates and
//! tilts toward the pointer, drawn in a transparent window behind everything
//! else.
//!
//! This is the umbrella crate that provides convenient access to all starfield
//! functionality. You can use this crate to get everything in one place, or use
//! individual crates for more granular control over dependencies.
//!
//! ## Crates
//!
//! - **Core**: point cloud, camera, pointer state and the animation driver
//! - **GPU**: wgpu point sprite renderer
//! - **Visualization**: winit window and event loop
//!
//! ## Quick Start
//!
//! ```rust
//! use ::starfield::prelude::*;
//!
//! struct Headless;
//!
//! impl RenderTarget for Headless {
//!     fn resize(&mut self, _width: u32, _height: u32) {}
//!     fn draw(&mut self, _frame: &FrameState) -> Result<()> {
//!         Ok(())
//!     }
//! }
//!
//! let backdrop = Backdrop::new(&BackdropConfig::default(), 1920, 1080);
//! let mut driver = AnimationDriver::new(backdrop, Headless).with_frame_limit(60);
//! let frames = driver.run(std::iter::repeat(PointerState::new(0.1, -0.2))).unwrap();
//! assert_eq!(frames, 60);
//! ```
//!
//! ## Feature Flags
//!
//! - `default`: Enables gpu and visualization
//! - `gpu`: wgpu renderer
//! - `visualization`: window and event loop (implies `gpu`)

// Re-export core functionality
pub use starfield_core::*;

// Re-export sub-crates
#[cfg(feature = "gpu")]
pub use starfield_gpu as gpu;

#[cfg(feature = "visualization")]
pub use starfield_visualization as visualization;

/// Convenient imports for common use cases
pub mod prelude {
    pub use starfield_core::*;

    #[cfg(feature = "gpu")]
    pub use starfield_gpu::*;

    #[cfg(feature = "visualization")]
    pub use starfield_visualization::*;
}
