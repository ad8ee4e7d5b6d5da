//! Render pipeline construction: one fill pipeline, plus a line-polygon
//! variant for the wireframe toggle when the adapter supports it.

use wgpu::{Device, TextureFormat};

use crate::gfx::vertex::Vertex3D;

pub struct PipelineManager {
    fill: wgpu::RenderPipeline,
    wireframe: Option<wgpu::RenderPipeline>,
}

impl PipelineManager {
    pub fn new(
        device: &Device,
        format: TextureFormat,
        sample_count: u32,
        global_layout: &wgpu::BindGroupLayout,
        mesh_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::include_wgsl!("shader.wgsl"));

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Scene Pipeline Layout"),
            bind_group_layouts: &[global_layout, mesh_layout],
            push_constant_ranges: &[],
        });

        let build = |label: &str, polygon_mode: wgpu::PolygonMode| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[Vertex3D::desc()],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format,
                        // Materials carry opacity in their alpha channel.
                        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    polygon_mode,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: wgpu::TextureFormat::Depth32Float,
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState {
                    count: sample_count,
                    mask: !0,
                    alpha_to_coverage_enabled: false,
                },
                multiview: None,
                cache: None,
            })
        };

        let fill = build("Scene Pipeline (fill)", wgpu::PolygonMode::Fill);
        let wireframe = device
            .features()
            .contains(wgpu::Features::POLYGON_MODE_LINE)
            .then(|| build("Scene Pipeline (wireframe)", wgpu::PolygonMode::Line));

        Self { fill, wireframe }
    }

    pub fn supports_wireframe(&self) -> bool {
        self.wireframe.is_some()
    }

    /// Pipeline for a material; falls back to fill when wireframe isn't
    /// available on this adapter.
    pub fn pipeline_for(&self, wireframe: bool) -> &wgpu::RenderPipeline {
        if wireframe {
            self.wireframe.as_ref().unwrap_or(&self.fill)
        } else {
            &self.fill
        }
    }
}
