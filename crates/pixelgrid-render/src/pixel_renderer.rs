//! Instanced cell-quad pipeline.
//!
//! Each visible pixel cell becomes one instance carrying its world min/max
//! corners and color; the GPU interpolates the unit quad between the corners
//! in triangle-strip order (bottom-left, bottom-right, top-left, top-right).

use crate::context::GraphicsContext;
use crate::transform::ViewTransform;
use bytemuck::{Pod, Zeroable};
use pixelgrid_core::geometry::CellQuad;
use std::sync::Arc;
use wgpu::util::DeviceExt;

/// GPU instance data for one cell quad.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct QuadInstance {
    min: [f32; 2],
    max: [f32; 2],
    color: [f32; 4],
}

impl QuadInstance {
    fn new(quad: &CellQuad) -> Self {
        Self {
            min: [quad.min.x, quad.min.y],
            max: [quad.max.x, quad.max.y],
            color: quad.color.to_array(),
        }
    }
}

/// Pixel cell renderer.
///
/// The pipeline is compiled once at surface initialization; the instance
/// buffer is rebuilt from the visible cells every frame.
pub struct PixelRenderer {
    context: Arc<GraphicsContext>,
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    transform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    instance_buffer: Option<wgpu::Buffer>,
    instance_count: u32,
}

impl PixelRenderer {
    /// Create the pipeline for the given render target format.
    pub fn new(context: Arc<GraphicsContext>, target_format: wgpu::TextureFormat) -> Self {
        let transform_buffer = context.device().create_buffer(&wgpu::BufferDescriptor {
            label: Some("Pixel Transform Buffer"),
            size: std::mem::size_of::<ViewTransform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout =
            context
                .device()
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("Pixel Bind Group Layout"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    }],
                });

        let bind_group = context.device().create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Pixel Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: transform_buffer.as_entire_binding(),
            }],
        });

        let shader = context
            .device()
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("Pixel Shader"),
                source: wgpu::ShaderSource::Wgsl(PIXEL_SHADER.into()),
            });

        let pipeline_layout =
            context
                .device()
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("Pixel Pipeline Layout"),
                    bind_group_layouts: &[&bind_group_layout],
                    push_constant_ranges: &[],
                });

        let pipeline = context
            .device()
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("Pixel Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[
                        // Unit quad vertices
                        wgpu::VertexBufferLayout {
                            array_stride: 8,
                            step_mode: wgpu::VertexStepMode::Vertex,
                            attributes: &[wgpu::VertexAttribute {
                                format: wgpu::VertexFormat::Float32x2,
                                offset: 0,
                                shader_location: 0,
                            }],
                        },
                        // Cell instances
                        wgpu::VertexBufferLayout {
                            array_stride: std::mem::size_of::<QuadInstance>() as u64,
                            step_mode: wgpu::VertexStepMode::Instance,
                            attributes: &[
                                wgpu::VertexAttribute {
                                    format: wgpu::VertexFormat::Float32x2,
                                    offset: 0,
                                    shader_location: 1,
                                },
                                wgpu::VertexAttribute {
                                    format: wgpu::VertexFormat::Float32x2,
                                    offset: 8,
                                    shader_location: 2,
                                },
                                wgpu::VertexAttribute {
                                    format: wgpu::VertexFormat::Float32x4,
                                    offset: 16,
                                    shader_location: 3,
                                },
                            ],
                        },
                    ],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: target_format,
                        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleStrip,
                    cull_mode: None,
                    ..Default::default()
                },
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            });

        // Strip order: bottom-left, bottom-right, top-left, top-right.
        let quad_vertices: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]];
        let vertex_buffer = context
            .device()
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Pixel Quad Vertex Buffer"),
                contents: bytemuck::cast_slice(&quad_vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });

        Self {
            context,
            pipeline,
            vertex_buffer,
            transform_buffer,
            bind_group,
            instance_buffer: None,
            instance_count: 0,
        }
    }

    /// Rebuild the instance buffer from this frame's visible cell quads.
    pub fn upload(&mut self, quads: &[CellQuad]) {
        if quads.is_empty() {
            self.instance_buffer = None;
            self.instance_count = 0;
            return;
        }

        tracing::trace!(count = quads.len(), "uploading cell quads");
        let instances: Vec<QuadInstance> = quads.iter().map(QuadInstance::new).collect();
        self.instance_buffer = Some(self.context.device().create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Pixel Instance Buffer"),
                contents: bytemuck::cast_slice(&instances),
                usage: wgpu::BufferUsages::VERTEX,
            },
        ));
        self.instance_count = quads.len() as u32;
    }

    /// Draw the uploaded cells with the given transform.
    pub fn render(&self, pass: &mut wgpu::RenderPass, transform: &ViewTransform) {
        if self.instance_count == 0 {
            return;
        }
        let Some(instance_buffer) = &self.instance_buffer else {
            return;
        };

        self.context
            .queue()
            .write_buffer(&self.transform_buffer, 0, bytemuck::cast_slice(&[*transform]));

        pass.push_debug_group("PixelRenderer::render");
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_vertex_buffer(1, instance_buffer.slice(..));
        pass.draw(0..4, 0..self.instance_count);
        pass.pop_debug_group();
    }
}

/// WGSL shader: interpolates the unit quad between the cell's corners, then
/// applies the camera transform.
const PIXEL_SHADER: &str = r#"
struct Transform {
    projection: mat4x4<f32>,
    scale: vec2<f32>,
    offset: vec2<f32>,
}

@group(0) @binding(0)
var<uniform> transform: Transform;

struct VertexInput {
    @location(0) quad_pos: vec2<f32>,
    @location(1) cell_min: vec2<f32>,
    @location(2) cell_max: vec2<f32>,
    @location(3) color: vec4<f32>,
}

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) color: vec4<f32>,
}

@vertex
fn vs_main(input: VertexInput) -> VertexOutput {
    var output: VertexOutput;

    let world_pos = mix(input.cell_min, input.cell_max, input.quad_pos);
    let screen_pos = world_pos * transform.scale + transform.offset;

    output.position = transform.projection * vec4<f32>(screen_pos, 0.0, 1.0);
    output.color = input.color;
    return output;
}

@fragment
fn fs_main(input: VertexOutput) -> @location(0) vec4<f32> {
    return input.color;
}
"#;
