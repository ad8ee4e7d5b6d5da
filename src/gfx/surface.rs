//! WGPU render surface for the demo scenes.
//!
//! Owns the surface, device, queue, depth and MSAA targets, the scene
//! pipelines and the global uniform buffer. Per-mesh GPU resources are
//! created lazily the first time a mesh is drawn, so meshes added by async
//! content loaders work without extra wiring.

use std::sync::Arc;

use wgpu::util::DeviceExt;
use wgpu::{Device, TextureFormat};

use crate::gfx::camera::CameraUniform;
use crate::gfx::light::LightsUniform;
use crate::gfx::material::MaterialUniform;
use crate::gfx::pipeline::PipelineManager;
use crate::scene::{Mesh, Scene};
use crate::wgpu_utils::{
    binding, BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc, UniformBuffer,
};

/// MSAA sample count; anti-aliasing is always on for the demos.
pub const MSAA_SAMPLES: u32 = 4;

/// Per-frame global data shared by every draw; must match the shader's
/// `Globals` struct exactly.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUniforms {
    pub view_position: [f32; 4],
    pub view_proj: [[f32; 4]; 4],
    pub lights: LightsUniform,
}

/// Per-mesh model matrix; must match the shader's `ModelUniform`.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelUniform {
    pub model: [[f32; 4]; 4],
}

/// GPU resources backing one mesh.
pub struct MeshGpu {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    model_ubo: UniformBuffer<ModelUniform>,
    material_ubo: UniformBuffer<MaterialUniform>,
    bind_group: wgpu::BindGroup,
}

impl MeshGpu {
    fn new(device: &Device, layout: &BindGroupLayoutWithDesc, mesh: &Mesh) -> Self {
        let vertices = mesh.geometry.to_vertex_buffer();
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("Vertex Buffer: {}", mesh.name)),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("Index Buffer: {}", mesh.name)),
            contents: bytemuck::cast_slice(&mesh.geometry.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let model_ubo = UniformBuffer::new(device);
        let material_ubo = UniformBuffer::new_with_data(device, &mesh.material.to_uniform());

        let bind_group = BindGroupBuilder::new(layout)
            .resource(model_ubo.binding_resource())
            .resource(material_ubo.binding_resource())
            .create(device, &format!("Mesh Bind Group: {}", mesh.name));

        Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.geometry.indices.len() as u32,
            model_ubo,
            material_ubo,
            bind_group,
        }
    }
}

/// Render surface plus the GPU state needed to draw a scene/camera pair.
pub struct RenderSurface {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    format: TextureFormat,
    depth_view: wgpu::TextureView,
    msaa_view: wgpu::TextureView,
    pipelines: PipelineManager,
    global_ubo: UniformBuffer<GlobalUniforms>,
    global_bind_group: wgpu::BindGroup,
    mesh_layout: BindGroupLayoutWithDesc,
    wireframe_warned: bool,
}

impl RenderSurface {
    /// Creates the surface and GPU context for the given window.
    ///
    /// # Panics
    /// Panics if no suitable adapter or device is available.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
    ) -> RenderSurface {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance
            .create_surface(window)
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to request adapter!");

        // Wireframe needs the line polygon mode; take it only if present.
        let optional_features = wgpu::Features::POLYGON_MODE_LINE;
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: adapter.features().intersection(optional_features),
                required_limits: wgpu::Limits::downlevel_defaults(),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await
            .expect("Failed to request a device!");

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .unwrap_or(surface_capabilities.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            // Frame cadence follows the display refresh.
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_capabilities.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_view = create_depth_view(&device, &config);
        let msaa_view = create_msaa_view(&device, &config);

        let global_layout = BindGroupLayoutBuilder::new()
            .next_binding_rendering(binding::uniform())
            .create(&device, "Globals Bind Group Layout");
        let mesh_layout = BindGroupLayoutBuilder::new()
            .next_binding_rendering(binding::uniform()) // model matrix
            .next_binding_fragment(binding::uniform()) // material
            .create(&device, "Mesh Bind Group Layout");

        let global_ubo = UniformBuffer::new(&device);
        let global_bind_group = BindGroupBuilder::new(&global_layout)
            .resource(global_ubo.binding_resource())
            .create(&device, "Globals Bind Group");

        let pipelines = PipelineManager::new(
            &device,
            format,
            MSAA_SAMPLES,
            &global_layout.layout,
            &mesh_layout.layout,
        );

        RenderSurface {
            surface,
            device: Arc::new(device),
            queue: Arc::new(queue),
            config,
            format,
            depth_view,
            msaa_view,
            pipelines,
            global_ubo,
            global_bind_group,
            mesh_layout,
            wireframe_warned: false,
        }
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn surface_format(&self) -> TextureFormat {
        self.format
    }

    /// Resizes the surface and its depth/MSAA attachments.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width == self.config.width && height == self.config.height {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_view = create_depth_view(&self.device, &self.config);
        self.msaa_view = create_msaa_view(&self.device, &self.config);
    }

    /// Draws the scene from the camera, then the UI overlay on top.
    pub fn render_frame<F>(&mut self, scene: &mut Scene, camera: CameraUniform, ui_overlay: F)
    where
        F: FnOnce(&wgpu::Device, &wgpu::Queue, &mut wgpu::CommandEncoder, &wgpu::TextureView),
    {
        let lights = LightsUniform::pack(&scene.lights());
        self.global_ubo.update_content(
            &self.queue,
            GlobalUniforms {
                view_position: camera.view_position,
                view_proj: camera.view_proj,
                lights,
            },
        );

        let [r, g, b] = scene.background;
        let mut meshes = scene.meshes_mut();

        // Upload pass: create missing GPU resources, sync transforms and
        // materials edited through the panel this frame.
        for (world, mesh) in meshes.iter_mut() {
            if mesh.gpu.is_none() {
                mesh.gpu = Some(MeshGpu::new(&self.device, &self.mesh_layout, mesh));
            }
            if let Some(gpu) = mesh.gpu.as_mut() {
                gpu.model_ubo
                    .update_content(&self.queue, ModelUniform {
                        model: (*world).into(),
                    });
                gpu.material_ubo
                    .update_content(&self.queue, mesh.material.to_uniform());
            }

            if mesh.material.wireframe
                && !self.pipelines.supports_wireframe()
                && !self.wireframe_warned
            {
                log::warn!("adapter lacks line polygon mode; wireframe renders filled");
                self.wireframe_warned = true;
            }
        }

        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return;
            }
            Err(err) => {
                log::error!("failed to acquire surface frame: {err}");
                return;
            }
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Scene Encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.msaa_view,
                    resolve_target: Some(&view),
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            pass.set_bind_group(0, &self.global_bind_group, &[]);
            for (_, mesh) in meshes.iter() {
                let Some(gpu) = mesh.gpu.as_ref() else {
                    continue;
                };
                pass.set_pipeline(self.pipelines.pipeline_for(mesh.material.wireframe));
                pass.set_bind_group(1, &gpu.bind_group, &[]);
                pass.set_vertex_buffer(0, gpu.vertex_buffer.slice(..));
                pass.set_index_buffer(gpu.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..gpu.index_count, 0, 0..1);
            }
        }

        ui_overlay(&self.device, &self.queue, &mut encoder, &view);

        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
    }
}

fn create_depth_view(device: &Device, config: &wgpu::SurfaceConfiguration) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width: config.width,
            height: config.height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: MSAA_SAMPLES,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Depth32Float,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

fn create_msaa_view(device: &Device, config: &wgpu::SurfaceConfiguration) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("MSAA Color Texture"),
        size: wgpu::Extent3d {
            width: config.width,
            height: config.height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: MSAA_SAMPLES,
        dimension: wgpu::TextureDimension::D2,
        format: config.format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}
