//! Passive pointer tracking

use serde::{Deserialize, Serialize};

/// Most recent pointer offset from the viewport center, normalized to [-0.5, 0.5].
///
/// `x` grows to the right and `y` grows downward, following window
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
}

impl PointerState {
    /// Create a state from already normalized offsets
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Normalize a pointer position in window coordinates against the viewport size.
    ///
    /// A zero-sized viewport yields the centered state.
    pub fn from_window_position(x: f64, y: f64, width: u32, height: u32) -> Self {
        if width == 0 || height == 0 {
            return Self::default();
        }
        Self {
            x: (x / width as f64 - 0.5) as f32,
            y: (y / height as f64 - 0.5) as f32,
        }
    }

    /// Replace the state with a new pointer position
    pub fn track(&mut self, x: f64, y: f64, width: u32, height: u32) {
        *self = Self::from_window_position(x, y, width, height);
    }
}
