//! Backdrop window and event loop

use std::sync::Arc;
use winit::{
    dpi::LogicalSize,
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::{Fullscreen, WindowBuilder, WindowLevel},
};

use starfield_core::{AnimationDriver, Backdrop, BackdropConfig, Error, PointerState, Result, StopHandle};
use starfield_gpu::{PointCloudRenderer, RenderConfig};

/// Window options for the backdrop
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub title: String,
    /// Borderless fullscreen on the current monitor
    pub fullscreen: bool,
    /// Logical size used when not fullscreen
    pub width: f64,
    pub height: f64,
    /// Keep the window beneath all other windows
    pub always_on_bottom: bool,
    pub transparent: bool,
    /// Stop after this many frames
    pub frame_limit: Option<u64>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "Starfield".to_string(),
            fullscreen: true,
            width: 1280.0,
            height: 720.0,
            always_on_bottom: true,
            transparent: true,
            frame_limit: None,
        }
    }
}

impl ViewerConfig {
    fn window_builder(&self) -> WindowBuilder {
        let mut builder = WindowBuilder::new()
            .with_title(self.title.clone())
            .with_transparent(self.transparent)
            .with_inner_size(LogicalSize::new(self.width, self.height));

        if self.fullscreen {
            builder = builder
                .with_decorations(false)
                .with_fullscreen(Some(Fullscreen::Borderless(None)));
        }
        if self.always_on_bottom {
            builder = builder.with_window_level(WindowLevel::AlwaysOnBottom);
        }
        builder
    }
}

/// Full-viewport animated point cloud layered behind other windows
pub struct BackdropViewer {
    viewer: ViewerConfig,
    backdrop: BackdropConfig,
    render: RenderConfig,
    stop: StopHandle,
}

impl BackdropViewer {
    /// Create a viewer with default scene and rendering settings
    pub fn new(viewer: ViewerConfig) -> Self {
        Self::with_configs(viewer, BackdropConfig::default(), RenderConfig::default())
    }

    /// Create a viewer with explicit settings
    pub fn with_configs(viewer: ViewerConfig, backdrop: BackdropConfig, render: RenderConfig) -> Self {
        Self {
            viewer,
            backdrop,
            render,
            stop: StopHandle::new(),
        }
    }

    /// Handle that ends the event loop when stopped
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Open the window and animate until it is closed or the driver stops
    pub fn run(self) -> Result<()> {
        let event_loop = EventLoop::new()
            .map_err(|e| Error::Visualization(format!("Failed to create event loop: {}", e)))?;
        let window = Arc::new(
            self.viewer
                .window_builder()
                .build(&event_loop)
                .map_err(|e| Error::Visualization(format!("Failed to create window: {}", e)))?,
        );

        let size = window.inner_size();
        let backdrop = Backdrop::new(&self.backdrop, size.width, size.height);

        let mut renderer = pollster::block_on(PointCloudRenderer::new(window.clone(), self.render))?;
        renderer.set_point_cloud(backdrop.cloud());

        let mut driver = AnimationDriver::new(backdrop, renderer).with_stop_handle(self.stop);
        if let Some(limit) = self.viewer.frame_limit {
            driver = driver.with_frame_limit(limit);
        }

        log::info!(
            "Starting backdrop: {} points, {}x{} viewport",
            driver.cloud().len(),
            size.width,
            size.height
        );

        let mut pointer = PointerState::default();
        window.request_redraw();

        event_loop
            .run(move |event, target| {
                target.set_control_flow(ControlFlow::Wait);

                match event {
                    Event::WindowEvent { event, window_id } if window_id == window.id() => match event {
                        WindowEvent::CloseRequested => {
                            driver.stop();
                        }
                        WindowEvent::Resized(new_size) => {
                            driver.resize(new_size.width, new_size.height);
                        }
                        WindowEvent::CursorMoved { position, .. } => {
                            let size = window.inner_size();
                            pointer.track(position.x, position.y, size.width, size.height);
                        }
                        WindowEvent::RedrawRequested => {
                            if let Err(e) = driver.frame(pointer) {
                                log::error!("Render error: {}", e);
                            }
                            // Presentation is vsynced, so this paces the loop at the display rate
                            window.request_redraw();
                        }
                        _ => {}
                    },
                    Event::AboutToWait => {
                        if !driver.is_running() {
                            target.exit();
                        }
                    }
                    Event::LoopExiting => {
                        log::info!("Backdrop stopped after {} frames", driver.frames_rendered());
                    }
                    _ => {}
                }
            })
            .map_err(|e| Error::Visualization(format!("Event loop error: {}", e)))?;

        Ok(())
    }
}
