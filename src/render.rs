mod points;

use crate::constants::*;
use glam::{EulerRot, Mat4, Vec3};
use particles_core::{Camera, ParticleSet};
use points::{InstanceBuffers, PointsResources, PointsUniforms};
use web_sys as web;
use wgpu;

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    points: PointsResources,
    instances: InstanceBuffers,
    // Generation of the particle set currently in `instances`
    uploaded_generation: Option<u64>,
    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width();
        let height = canvas.height();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        // Colours are authored as display values; write them unconverted.
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Rgba8Unorm
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let points = points::create_points_resources(&device, format);
        let instances = InstanceBuffers::new(&device, 0);

        log::info!("[render] WebGPU ready: {}x{} {:?}", width, height, format);
        Ok(Self {
            surface,
            device,
            queue,
            config,
            points,
            instances,
            uploaded_generation: None,
            width,
            height,
            clear_color: wgpu::Color {
                r: FOG_COLOR[0] as f64,
                g: FOG_COLOR[1] as f64,
                b: FOG_COLOR[2] as f64,
                a: 1.0,
            },
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width.max(1) as f32 / self.height.max(1) as f32
    }

    /// Push particle state to the GPU.
    ///
    /// Positions go up every frame. Colours go up when they changed or when a
    /// new particle set replaced the old one, in which case the instance
    /// buffers are reallocated if the count differs.
    pub fn upload(&mut self, set: &ParticleSet, generation: u64, colors_dirty: bool) {
        let fresh = self.uploaded_generation != Some(generation);
        if fresh && self.instances.count as usize != set.len() {
            self.instances = InstanceBuffers::new(&self.device, set.len());
        }
        if set.is_empty() {
            self.uploaded_generation = Some(generation);
            return;
        }
        self.queue.write_buffer(
            &self.instances.positions,
            0,
            bytemuck::cast_slice(set.positions()),
        );
        if fresh || colors_dirty {
            self.queue
                .write_buffer(&self.instances.colors, 0, bytemuck::cast_slice(set.colors()));
        }
        self.uploaded_generation = Some(generation);
    }

    pub fn render(
        &mut self,
        camera: &Camera,
        rotation: Vec3,
        point_size: f32,
    ) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let uniforms = PointsUniforms {
            view: camera.view_matrix().to_cols_array_2d(),
            proj: camera.projection_matrix().to_cols_array_2d(),
            model: Mat4::from_euler(EulerRot::XYZ, rotation.x, rotation.y, rotation.z)
                .to_cols_array_2d(),
            fog: [FOG_COLOR[0], FOG_COLOR[1], FOG_COLOR[2], FOG_DENSITY],
            look: [
                point_size,
                (camera.fovy_radians * 0.5).tan(),
                PARTICLE_OPACITY,
                0.0,
            ],
        };
        self.queue
            .write_buffer(&self.points.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("particles_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            if self.instances.count > 0 {
                rpass.set_pipeline(&self.points.pipeline);
                rpass.set_bind_group(0, &self.points.bind_group, &[]);
                rpass.set_vertex_buffer(0, self.instances.positions.slice(..));
                rpass.set_vertex_buffer(1, self.instances.colors.slice(..));
                rpass.draw(0..6, 0..self.instances.count);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    /// Reconfigure after the surface was lost or went out of date.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }
}
