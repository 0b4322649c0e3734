use crate::device::GpuContext;
use bytemuck::{Pod, Zeroable};
use starfield_core::{Error, FrameState, PointCloud3f, RenderTarget, Result};
use std::sync::Arc;
use winit::window::Window;

/// Per-instance vertex data: one point of the cloud
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct PointVertex {
    pub position: [f32; 3],
}

impl PointVertex {
    /// Vertex buffer layout descriptor
    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PointVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &ATTRIBUTES,
        }
    }
}

/// Uniform data for one frame, laid out to match `FrameUniform` in the shader
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct FrameUniform {
    pub view_proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
    pub viewport: [f32; 2],
    pub point_size: f32,
    pub size_attenuation: f32,
}

impl FrameUniform {
    pub fn from_frame(frame: &FrameState) -> Self {
        Self {
            view_proj: frame.view_proj.into(),
            model: frame.model.into(),
            color: frame.material.rgba(),
            viewport: [frame.viewport.0 as f32, frame.viewport.1 as f32],
            point_size: frame.material.size,
            size_attenuation: if frame.material.size_attenuation { 1.0 } else { 0.0 },
        }
    }
}

/// Vertices drawn per point: two triangles
const VERTICES_PER_POINT: u32 = 6;

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Clear color; a zero alpha lets the desktop show through
    pub background_color: [f64; 4],
    pub enable_depth_test: bool,
    pub enable_alpha_blending: bool,
    /// Requested MSAA sample count, lowered to what the adapter supports
    pub sample_count: u32,
    pub present_mode: wgpu::PresentMode,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background_color: [0.0, 0.0, 0.0, 0.0],
            enable_depth_test: false,
            enable_alpha_blending: true,
            sample_count: 4,
            present_mode: wgpu::PresentMode::Fifo,
        }
    }
}

/// GPU point cloud renderer presenting to a window surface
pub struct PointCloudRenderer {
    pub gpu_context: GpuContext,
    pub surface: wgpu::Surface<'static>,
    pub surface_config: wgpu::SurfaceConfiguration,
    pub render_pipeline: wgpu::RenderPipeline,
    pub frame_buffer: wgpu::Buffer,
    pub frame_bind_group: wgpu::BindGroup,
    pub config: RenderConfig,
    sample_count: u32,
    vertex_buffer: Option<wgpu::Buffer>,
    point_count: u32,
    msaa_view: Option<wgpu::TextureView>,
    depth_view: Option<wgpu::TextureView>,
}

impl PointCloudRenderer {
    /// Create a renderer for `window`
    pub async fn new(window: Arc<Window>, config: RenderConfig) -> Result<Self> {
        let size = window.inner_size();
        let (gpu_context, surface) = GpuContext::for_window(window).await?;

        let surface_caps = surface.get_capabilities(&gpu_context.adapter);
        // Colors are authored in display space, so write them without sRGB encoding
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| Error::Gpu("Surface reports no supported formats".to_string()))?;

        let alpha_mode = [
            wgpu::CompositeAlphaMode::PreMultiplied,
            wgpu::CompositeAlphaMode::PostMultiplied,
        ]
        .into_iter()
        .find(|mode| surface_caps.alpha_modes.contains(mode))
        .or_else(|| surface_caps.alpha_modes.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        if alpha_mode == wgpu::CompositeAlphaMode::Opaque {
            log::warn!("Surface does not support transparency, backdrop will be opaque");
        }

        let present_mode = if surface_caps.present_modes.contains(&config.present_mode) {
            config.present_mode
        } else {
            wgpu::PresentMode::Fifo
        };

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&gpu_context.device, &surface_config);

        let sample_count = gpu_context.supported_sample_count(surface_format, config.sample_count);
        if sample_count != config.sample_count {
            log::warn!("MSAA x{} not supported, using x{}", config.sample_count, sample_count);
        }

        let frame_uniform = FrameUniform::zeroed();
        let frame_buffer = gpu_context.create_buffer_init(
            "Frame Uniform Buffer",
            &[frame_uniform],
            wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        );

        let frame_bind_group_layout = gpu_context.create_bind_group_layout(
            "frame_bind_group_layout",
            &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        );

        let frame_bind_group = gpu_context.create_bind_group(
            "frame_bind_group",
            &frame_bind_group_layout,
            &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            }],
        );

        let shader = gpu_context.create_shader_module("Point Sprite Shader", include_str!("shaders/point_sprite.wgsl"));

        let render_pipeline_layout = gpu_context.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Point Sprite Render Pipeline Layout"),
            bind_group_layouts: &[&frame_bind_group_layout],
            push_constant_ranges: &[],
        });

        let render_pipeline = gpu_context.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Point Sprite Render Pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[PointVertex::desc()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_config.format,
                    blend: if config.enable_alpha_blending {
                        Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING)
                    } else {
                        Some(wgpu::BlendState::REPLACE)
                    },
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: if config.enable_depth_test {
                Some(wgpu::DepthStencilState {
                    format: wgpu::TextureFormat::Depth32Float,
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                })
            } else {
                None
            },
            multisample: wgpu::MultisampleState {
                count: sample_count,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
        });

        let mut renderer = Self {
            gpu_context,
            surface,
            surface_config,
            render_pipeline,
            frame_buffer,
            frame_bind_group,
            config,
            sample_count,
            vertex_buffer: None,
            point_count: 0,
            msaa_view: None,
            depth_view: None,
        };
        renderer.create_attachments();
        Ok(renderer)
    }

    /// Upload the point cloud once; it is drawn from this buffer every frame
    pub fn set_point_cloud(&mut self, cloud: &PointCloud3f) {
        let vertices = point_cloud_to_vertices(cloud);
        self.point_count = vertices.len() as u32;
        self.vertex_buffer = if vertices.is_empty() {
            None
        } else {
            Some(self.gpu_context.create_buffer_init(
                "Point Cloud Instance Buffer",
                &vertices,
                wgpu::BufferUsages::VERTEX,
            ))
        };
        log::debug!("Uploaded {} points", self.point_count);
    }

    /// Current surface size
    pub fn size(&self) -> (u32, u32) {
        (self.surface_config.width, self.surface_config.height)
    }

    fn reconfigure(&mut self) {
        self.surface.configure(&self.gpu_context.device, &self.surface_config);
    }

    fn create_attachments(&mut self) {
        self.msaa_view = (self.sample_count > 1)
            .then(|| self.create_attachment("MSAA Color Texture", self.surface_config.format));
        self.depth_view = self
            .config
            .enable_depth_test
            .then(|| self.create_attachment("Depth Texture", wgpu::TextureFormat::Depth32Float));
    }

    fn create_attachment(&self, label: &str, format: wgpu::TextureFormat) -> wgpu::TextureView {
        let size = wgpu::Extent3d {
            width: self.surface_config.width,
            height: self.surface_config.height,
            depth_or_array_layers: 1,
        };

        self.gpu_context
            .device
            .create_texture(&wgpu::TextureDescriptor {
                label: Some(label),
                size,
                mip_level_count: 1,
                sample_count: self.sample_count,
                dimension: wgpu::TextureDimension::D2,
                format,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                view_formats: &[],
            })
            .create_view(&wgpu::TextureViewDescriptor::default())
    }
}

impl RenderTarget for PointCloudRenderer {
    /// Resize renderer surface
    fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.surface_config.width = width;
            self.surface_config.height = height;
            self.reconfigure();
            self.create_attachments();
        }
    }

    /// Render point cloud
    fn draw(&mut self, frame: &FrameState) -> Result<()> {
        self.gpu_context.queue.write_buffer(
            &self.frame_buffer,
            0,
            bytemuck::bytes_of(&FrameUniform::from_frame(frame)),
        );

        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost or outdated, reconfiguring");
                self.reconfigure();
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Timed out waiting for surface texture, skipping frame");
                return Ok(());
            }
            Err(e) => return Err(Error::Gpu(format!("Failed to get surface texture: {:?}", e))),
        };

        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());

        let (color_view, resolve_target, store) = match &self.msaa_view {
            Some(msaa_view) => (msaa_view, Some(&view), wgpu::StoreOp::Discard),
            None => (&view, None, wgpu::StoreOp::Store),
        };

        let mut encoder = self.gpu_context.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Point Sprite Render Encoder"),
        });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Point Sprite Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: color_view,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: self.config.background_color[0],
                            g: self.config.background_color[1],
                            b: self.config.background_color[2],
                            a: self.config.background_color[3],
                        }),
                        store,
                    },
                })],
                depth_stencil_attachment: self.depth_view.as_ref().map(|depth_view| {
                    wgpu::RenderPassDepthStencilAttachment {
                        view: depth_view,
                        depth_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Clear(1.0),
                            store: wgpu::StoreOp::Store,
                        }),
                        stencil_ops: None,
                    }
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if let Some(vertex_buffer) = &self.vertex_buffer {
                render_pass.set_pipeline(&self.render_pipeline);
                render_pass.set_bind_group(0, &self.frame_bind_group, &[]);
                render_pass.set_vertex_buffer(0, vertex_buffer.slice(..));
                render_pass.draw(0..VERTICES_PER_POINT, 0..self.point_count);
            }
        }

        self.gpu_context.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

/// Convert a point cloud to instance vertices
pub fn point_cloud_to_vertices(point_cloud: &PointCloud3f) -> Vec<PointVertex> {
    point_cloud
        .positions()
        .into_iter()
        .map(|position| PointVertex { position })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use starfield_core::{Camera, Matrix4, Point3f, PointCloud, PointMaterial, Vector3};

    #[test]
    fn test_uniform_matches_shader_layout() {
        // 2 x mat4x4 + vec4 + vec2 + 2 x f32, no padding
        assert_eq!(std::mem::size_of::<FrameUniform>(), 160);
        assert_eq!(std::mem::size_of::<FrameUniform>() % 16, 0);
        assert_eq!(std::mem::size_of::<PointVertex>(), 12);
    }

    #[test]
    fn test_uniform_from_frame() {
        let camera = Camera::default();
        let frame = FrameState {
            model: Matrix4::new_rotation(Vector3::new(0.0, 0.5, 0.0)),
            view_proj: camera.view_projection(),
            material: PointMaterial::NEON,
            viewport: (1920, 1080),
        };

        let uniform = FrameUniform::from_frame(&frame);
        assert_eq!(uniform.viewport, [1920.0, 1080.0]);
        assert_relative_eq!(uniform.point_size, 0.005);
        assert_eq!(uniform.size_attenuation, 1.0);
        assert_eq!(uniform.color, PointMaterial::NEON.rgba());
        // Column-major, as WGSL expects: the translation lives in the last column
        let view_proj: [[f32; 4]; 4] = frame.view_proj.into();
        assert_eq!(uniform.view_proj, view_proj);
        assert_eq!(uniform.model[0][0], frame.model[(0, 0)]);
        assert_eq!(uniform.model[0][2], frame.model[(2, 0)]);
    }

    #[test]
    fn test_point_cloud_to_vertices() {
        let cloud = PointCloud::from_points(vec![Point3f::new(1.0, 2.0, 3.0), Point3f::new(-1.0, 0.0, 0.5)]);
        let vertices = point_cloud_to_vertices(&cloud);
        assert_eq!(
            vertices,
            vec![
                PointVertex { position: [1.0, 2.0, 3.0] },
                PointVertex { position: [-1.0, 0.0, 0.5] },
            ]
        );
    }

    #[test]
    fn test_default_config_is_transparent_backdrop() {
        let config = RenderConfig::default();
        assert_eq!(config.background_color[3], 0.0);
        assert!(config.enable_alpha_blending);
        assert!(!config.enable_depth_test);
        assert_eq!(config.present_mode, wgpu::PresentMode::Fifo);
    }
}
