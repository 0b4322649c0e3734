//! Integration tests for the starfield animation driver
//!
//! These tests drive a full backdrop through a recording render target and
//! check the observable behavior of the animation: cloud shape, rotation
//! accumulation, pointer parallax and resize handling.

use approx::assert_relative_eq;
use starfield_core::*;

/// Render target that remembers every call it receives
#[derive(Default)]
struct RecordingSurface {
    size: Option<(u32, u32)>,
    draws: usize,
    last_model: Option<Matrix4<f32>>,
}

impl RenderTarget for RecordingSurface {
    fn resize(&mut self, width: u32, height: u32) {
        self.size = Some((width, height));
    }

    fn draw(&mut self, frame: &FrameState) -> Result<()> {
        self.draws += 1;
        self.last_model = Some(frame.model);
        Ok(())
    }
}

fn create_driver(seed: u64) -> AnimationDriver<RecordingSurface> {
    let config = BackdropConfig {
        seed: Some(seed),
        ..Default::default()
    };
    AnimationDriver::new(Backdrop::new(&config, 1280, 720), RecordingSurface::default())
}

#[test]
fn test_cloud_has_2000_points_inside_cube() {
    for seed in [0, 1, 99, 12345] {
        let driver = create_driver(seed);
        let cloud = driver.cloud();
        assert_eq!(cloud.len(), 2000);

        let (min, max) = cloud.bounding_box();
        for c in [min.x, min.y, min.z] {
            assert!(c >= -7.5);
        }
        for c in [max.x, max.y, max.z] {
            assert!(c <= 7.5);
        }
    }
}

#[test]
fn test_spin_without_pointer_accumulates_linearly() {
    let mut driver = create_driver(5);
    let frames = 500;
    let drawn = driver.run(std::iter::repeat(PointerState::default()).take(frames)).unwrap();
    assert_eq!(drawn, frames as u64);

    let rotation = driver.rotation();
    let expected = 0.002 * frames as f64;
    assert_relative_eq!(rotation.x, expected, epsilon = 1e-4);
    assert_relative_eq!(rotation.y, expected, epsilon = 1e-4);
    assert_eq!(rotation.z, 0.0);
    assert_eq!(driver.target().draws, frames);
}

#[test]
fn test_pointer_offset_adds_parallax_for_that_frame() {
    let mut driver = create_driver(5);
    driver.frame(PointerState::default()).unwrap();
    let before = driver.rotation();

    let (mx, my): (f32, f32) = (0.3, -0.45);
    driver.frame(PointerState::new(mx, my)).unwrap();
    let after = driver.rotation();

    assert_relative_eq!(after.y - before.y, 0.002 + 0.05 * f64::from(mx), epsilon = 1e-6);
    assert_relative_eq!(after.x - before.x, 0.002 + 0.05 * f64::from(my), epsilon = 1e-6);
}

#[test]
fn test_resize_updates_aspect_and_surface() {
    let mut driver = create_driver(5);
    assert_relative_eq!(driver.camera().aspect_ratio, 1280.0 / 720.0);

    assert!(driver.resize(1000, 250));
    assert_relative_eq!(driver.camera().aspect_ratio, 4.0);
    assert_eq!(driver.target().size, Some((1000, 250)));
    assert_eq!(driver.backdrop().viewport(), (1000, 250));

    let mut fresh = Camera::default();
    fresh.set_viewport(1000, 250);
    assert_relative_eq!(driver.camera().projection_matrix(), fresh.projection_matrix());
}

#[test]
fn test_rotation_never_resets() {
    let mut driver = create_driver(8);
    let mut previous = driver.rotation();
    for i in 0..4000 {
        driver.frame(PointerState::default()).unwrap();
        let current = driver.rotation();
        assert!(current.x > previous.x, "x rotation went backwards at frame {}", i);
        assert!(current.y > previous.y, "y rotation went backwards at frame {}", i);
        previous = current;
    }
    // Well past a full turn, the angles are not wrapped
    assert!(previous.x > std::f64::consts::TAU);
}

#[test]
fn test_spin_keeps_pace_for_a_day() {
    let config = BackdropConfig {
        seed: Some(4),
        point_count: 10,
        ..Default::default()
    };
    let mut backdrop = Backdrop::new(&config, 1920, 1080);

    // One day at 60 frames per second
    let frames: u32 = 60 * 60 * 60 * 24;
    for _ in 0..frames {
        backdrop.advance(PointerState::default());
    }
    let expected = 0.002 * f64::from(frames);
    assert_relative_eq!(backdrop.rotation().x, expected, epsilon = 1e-3);
    assert_relative_eq!(backdrop.rotation().y, expected, epsilon = 1e-3);

    // Still moving by a full step per frame at this magnitude
    let before = backdrop.rotation();
    for _ in 0..1000 {
        backdrop.advance(PointerState::default());
    }
    assert_relative_eq!(backdrop.rotation().x - before.x, 2.0, epsilon = 1e-6);
}

#[test]
fn test_model_matrix_follows_rotation() {
    let mut driver = create_driver(2);
    driver.frame(PointerState::new(0.5, 0.25)).unwrap();

    let expected = Transform3D::from_euler(&driver.rotation()).matrix;
    assert_eq!(driver.target().last_model, Some(expected));
}

#[test]
fn test_cloud_is_never_mutated() {
    let mut driver = create_driver(21);
    let original = driver.cloud().points.clone();
    driver.run(std::iter::repeat(PointerState::new(0.5, -0.5)).take(100)).unwrap();
    assert_eq!(driver.cloud().points, original);
}

#[test]
fn test_stop_from_another_thread() {
    let mut driver = create_driver(3);
    let handle = driver.stop_handle();
    std::thread::spawn(move || handle.stop()).join().unwrap();

    assert!(!driver.frame(PointerState::default()).unwrap());
    assert_eq!(driver.target().draws, 0);
}
