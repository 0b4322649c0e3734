//! Scene state and the per-frame animation driver

use crate::camera::Camera;
use crate::config::BackdropConfig;
use crate::material::PointMaterial;
use crate::point_cloud::PointCloud3f;
use crate::pointer::PointerState;
use crate::starfield::generate_seeded;
use crate::traits::{Drawable, FrameState, RenderTarget};
use crate::transform::{EulerRotation, Transform3D};
use crate::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// The point cloud, its rotation and the camera looking at it
#[derive(Debug, Clone)]
pub struct Backdrop {
    cloud: PointCloud3f,
    material: PointMaterial,
    camera: Camera,
    rotation: EulerRotation,
    viewport: (u32, u32),
    spin_per_frame: f64,
    parallax_factor: f64,
}

impl Backdrop {
    /// Build the scene for a viewport of `width` x `height` pixels.
    ///
    /// A zero dimension is treated as 1 so the camera aspect stays finite.
    pub fn new(config: &BackdropConfig, width: u32, height: u32) -> Self {
        let cloud = generate_seeded(config.seed, config.point_count, config.spread);
        Self::with_cloud(config, cloud, width, height)
    }

    /// Build the scene around an existing cloud
    pub fn with_cloud(config: &BackdropConfig, cloud: PointCloud3f, width: u32, height: u32) -> Self {
        let viewport = (width.max(1), height.max(1));
        let camera = Camera::looking_at_origin(
            config.camera_distance,
            config.fov,
            viewport.0 as f32 / viewport.1 as f32,
            config.near,
            config.far,
        );
        let (min, max) = cloud.bounding_box();
        log::debug!(
            "Created backdrop with {} points in [{:?}, {:?}] for a {}x{} viewport",
            cloud.len(),
            min.coords.as_slice(),
            max.coords.as_slice(),
            viewport.0,
            viewport.1
        );

        Self {
            cloud,
            material: config.material,
            camera,
            rotation: EulerRotation::default(),
            viewport,
            spin_per_frame: config.spin_per_frame,
            parallax_factor: config.parallax_factor,
        }
    }

    /// Advance the rotation by one frame: constant spin, then pointer parallax.
    ///
    /// Horizontal pointer offset turns the cloud about y, vertical about x.
    pub fn advance(&mut self, pointer: PointerState) {
        self.rotation.rotate_by(self.spin_per_frame, self.spin_per_frame);
        self.rotation.rotate_by(
            f64::from(pointer.y) * self.parallax_factor,
            f64::from(pointer.x) * self.parallax_factor,
        );
    }

    /// Update camera aspect and viewport. Returns false for a zero-sized viewport.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        self.viewport = (width, height);
        self.camera.set_viewport(width, height);
        true
    }

    /// Snapshot of what to draw this frame
    pub fn frame_state(&self) -> FrameState {
        FrameState {
            model: Transform3D::from_euler(&self.rotation).matrix,
            view_proj: self.camera.view_projection(),
            material: self.material,
            viewport: self.viewport,
        }
    }

    pub fn cloud(&self) -> &PointCloud3f {
        &self.cloud
    }

    pub fn material(&self) -> &PointMaterial {
        &self.material
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn rotation(&self) -> EulerRotation {
        self.rotation
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }
}

/// Shareable running flag for an [`AnimationDriver`]
#[derive(Debug, Clone)]
pub struct StopHandle {
    running: Arc<AtomicBool>,
}

impl StopHandle {
    /// A handle in the running state
    pub fn new() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Ask the driver to stop; it draws nothing afterwards
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

impl Default for StopHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Drives a [`Backdrop`] into a [`RenderTarget`], one call per display frame
pub struct AnimationDriver<T: RenderTarget> {
    backdrop: Backdrop,
    target: T,
    handle: StopHandle,
    frames: u64,
    frame_limit: Option<u64>,
}

impl<T: RenderTarget> AnimationDriver<T> {
    /// Create a running driver
    pub fn new(backdrop: Backdrop, target: T) -> Self {
        Self {
            backdrop,
            target,
            handle: StopHandle::new(),
            frames: 0,
            frame_limit: None,
        }
    }

    /// Share an existing running flag instead of the driver's own
    pub fn with_stop_handle(mut self, handle: StopHandle) -> Self {
        self.handle = handle;
        self
    }

    /// Stop automatically once `limit` frames have been drawn
    pub fn with_frame_limit(mut self, limit: u64) -> Self {
        self.frame_limit = Some(limit);
        self
    }

    /// Render one frame with the latest pointer state.
    ///
    /// Returns `Ok(false)` without touching the scene when the driver is stopped.
    pub fn frame(&mut self, pointer: PointerState) -> Result<bool> {
        if !self.handle.is_running() {
            return Ok(false);
        }
        if self.limit_reached() {
            self.handle.stop();
            return Ok(false);
        }

        self.backdrop.advance(pointer);
        self.target.draw(&self.backdrop.frame_state())?;
        self.frames += 1;

        if self.limit_reached() {
            log::info!("Reached frame limit of {}, stopping", self.frames);
            self.handle.stop();
        }

        Ok(true)
    }

    fn limit_reached(&self) -> bool {
        self.frame_limit.is_some_and(|limit| self.frames >= limit)
    }

    /// Feed pointer states frame by frame until the inputs run out or the driver stops.
    ///
    /// Returns the number of frames drawn.
    pub fn run<I>(&mut self, inputs: I) -> Result<u64>
    where
        I: IntoIterator<Item = PointerState>,
    {
        let mut drawn = 0;
        for pointer in inputs {
            if !self.frame(pointer)? {
                break;
            }
            drawn += 1;
        }
        Ok(drawn)
    }

    /// Follow a viewport change: camera aspect, projection and surface size.
    ///
    /// Zero-sized viewports (minimized windows) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if !self.backdrop.resize(width, height) {
            log::debug!("Ignoring resize to {}x{}", width, height);
            return false;
        }
        self.target.resize(width, height);
        log::debug!("Resized to {}x{}", width, height);
        true
    }

    pub fn stop(&self) {
        self.handle.stop();
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_running()
    }

    /// A handle that can stop this driver from elsewhere
    pub fn stop_handle(&self) -> StopHandle {
        self.handle.clone()
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    pub fn rotation(&self) -> EulerRotation {
        self.backdrop.rotation()
    }

    pub fn camera(&self) -> &Camera {
        self.backdrop.camera()
    }

    pub fn cloud(&self) -> &PointCloud3f {
        self.backdrop.cloud()
    }

    pub fn backdrop(&self) -> &Backdrop {
        &self.backdrop
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use approx::assert_relative_eq;

    #[derive(Default)]
    struct RecordingTarget {
        sizes: Vec<(u32, u32)>,
        frames: Vec<FrameState>,
        fail: bool,
    }

    impl RenderTarget for RecordingTarget {
        fn resize(&mut self, width: u32, height: u32) {
            self.sizes.push((width, height));
        }

        fn draw(&mut self, frame: &FrameState) -> Result<()> {
            if self.fail {
                return Err(Error::Gpu("device lost".to_string()));
            }
            self.frames.push(*frame);
            Ok(())
        }
    }

    fn driver() -> AnimationDriver<RecordingTarget> {
        let config = BackdropConfig {
            seed: Some(11),
            ..Default::default()
        };
        AnimationDriver::new(Backdrop::new(&config, 800, 600), RecordingTarget::default())
    }

    #[test]
    fn test_one_draw_per_frame() {
        let mut driver = driver();
        assert!(driver.frame(PointerState::default()).unwrap());
        assert!(driver.frame(PointerState::default()).unwrap());
        assert_eq!(driver.target().frames.len(), 2);
        assert_eq!(driver.frames_rendered(), 2);
    }

    #[test]
    fn test_parallax_on_single_frame() {
        let mut driver = driver();
        driver.frame(PointerState::new(0.4, -0.2)).unwrap();
        let rotation = driver.rotation();
        assert_relative_eq!(rotation.y, 0.002 + 0.05 * 0.4, epsilon = 1e-7);
        assert_relative_eq!(rotation.x, 0.002 + 0.05 * -0.2, epsilon = 1e-7);
        assert_eq!(rotation.z, 0.0);
    }

    #[test]
    fn test_stopped_driver_is_inert() {
        let mut driver = driver();
        driver.stop();
        assert!(!driver.frame(PointerState::new(0.5, 0.5)).unwrap());
        assert_eq!(driver.rotation(), EulerRotation::default());
        assert!(driver.target().frames.is_empty());
    }

    #[test]
    fn test_stop_handle_is_shared() {
        let mut driver = driver();
        let handle = driver.stop_handle();
        driver.frame(PointerState::default()).unwrap();
        handle.stop();
        assert!(!driver.is_running());
        assert!(!driver.frame(PointerState::default()).unwrap());
        assert_eq!(driver.frames_rendered(), 1);
    }

    #[test]
    fn test_external_stop_handle() {
        let handle = StopHandle::new();
        let mut driver = driver().with_stop_handle(handle.clone());
        handle.stop();
        assert!(!driver.frame(PointerState::default()).unwrap());
    }

    #[test]
    fn test_frame_limit_stops_driver() {
        let mut driver = driver().with_frame_limit(3);
        let drawn = driver.run(std::iter::repeat(PointerState::default()).take(10)).unwrap();
        assert_eq!(drawn, 3);
        assert!(!driver.is_running());
    }

    #[test]
    fn test_zero_frame_limit_never_draws() {
        let mut driver = driver().with_frame_limit(0);
        assert!(!driver.frame(PointerState::default()).unwrap());
    }

    #[test]
    fn test_zero_frame_limit_survives_handle_swap() {
        let handle = StopHandle::new();
        let mut driver = driver().with_frame_limit(0).with_stop_handle(handle.clone());
        assert!(!driver.frame(PointerState::default()).unwrap());
        assert!(driver.target().frames.is_empty());
        assert_eq!(driver.rotation(), EulerRotation::default());
        assert!(!handle.is_running());
    }

    #[test]
    fn test_draw_error_propagates() {
        let mut driver = driver();
        driver.target_mut().fail = true;
        assert!(driver.frame(PointerState::default()).is_err());
        assert_eq!(driver.frames_rendered(), 0);
    }

    #[test]
    fn test_zero_resize_is_ignored() {
        let mut driver = driver();
        let aspect = driver.camera().aspect_ratio;
        assert!(!driver.resize(0, 600));
        assert_eq!(driver.camera().aspect_ratio, aspect);
        assert!(driver.target().sizes.is_empty());
    }

    #[test]
    fn test_frame_state_carries_viewport_and_material() {
        let mut driver = driver();
        driver.resize(1024, 512);
        driver.frame(PointerState::default()).unwrap();
        let frame = driver.target().frames[0];
        assert_eq!(frame.viewport, (1024, 512));
        assert_eq!(frame.material, PointMaterial::NEON);
        assert_eq!(frame.view_proj, driver.camera().view_projection());
    }

    #[test]
    fn test_zero_sized_initial_viewport() {
        let backdrop = Backdrop::new(&BackdropConfig::default(), 0, 0);
        assert_eq!(backdrop.viewport(), (1, 1));
        assert!(backdrop.camera().aspect_ratio.is_finite());
    }
}
