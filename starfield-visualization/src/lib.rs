//! Visualization for the starfield backdrop
//!
//! Opens a borderless, transparent window kept beneath other windows and
//! runs the animation driver from the winit event loop:
//! - pointer movement feeds the parallax
//! - resizes update the camera and the surface
//! - every redraw renders one frame and schedules the next

pub mod viewer;

pub use viewer::*;

use starfield_core::Result;

/// Show the backdrop with default settings until its window is closed
pub fn show_backdrop() -> Result<()> {
    BackdropViewer::new(ViewerConfig::default()).run()
}
