//! Instanced grid-line pipeline.
//!
//! Line segments are stored in world coordinates; each instance is expanded
//! on the GPU into a screen-space quad of the requested line width. Width
//! and color are per-draw uniforms, so the whole grid is one instanced draw.

use crate::context::GraphicsContext;
use crate::transform::ViewTransform;
use bytemuck::{Pod, Zeroable};
use pixelgrid_core::Color;
use pixelgrid_core::geometry::LineSegment;
use std::sync::Arc;
use wgpu::util::DeviceExt;

/// GPU instance data for one line segment.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct LineInstance {
    start: [f32; 2],
    end: [f32; 2],
}

impl LineInstance {
    fn new(segment: &LineSegment) -> Self {
        Self {
            start: [segment.start.x, segment.start.y],
            end: [segment.end.x, segment.end.y],
        }
    }
}

/// Per-draw uniform: camera transform plus line color and width.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct GridUniform {
    transform: ViewTransform,
    color: [f32; 4],
    line_width: f32,
    _padding: [f32; 3],
}

/// Grid line renderer.
///
/// The pipeline and shader are compiled once; the instance buffer is rebuilt
/// from the visible region every frame via [`GridRenderer::upload`].
pub struct GridRenderer {
    context: Arc<GraphicsContext>,
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    instance_buffer: Option<wgpu::Buffer>,
    instance_count: u32,
}

impl GridRenderer {
    /// Create the pipeline for the given render target format.
    pub fn new(context: Arc<GraphicsContext>, target_format: wgpu::TextureFormat) -> Self {
        let uniform_buffer = context.device().create_buffer(&wgpu::BufferDescriptor {
            label: Some("Grid Uniform Buffer"),
            size: std::mem::size_of::<GridUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout =
            context
                .device()
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("Grid Bind Group Layout"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    }],
                });

        let bind_group = context.device().create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Grid Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let shader = context
            .device()
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("Grid Shader"),
                source: wgpu::ShaderSource::Wgsl(GRID_SHADER.into()),
            });

        let pipeline_layout =
            context
                .device()
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("Grid Pipeline Layout"),
                    bind_group_layouts: &[&bind_group_layout],
                    push_constant_ranges: &[],
                });

        let pipeline = context
            .device()
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("Grid Pipeline"),
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
                        // Line instances
                        wgpu::VertexBufferLayout {
                            array_stride: std::mem::size_of::<LineInstance>() as u64,
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

        let quad_vertices: [[f32; 2]; 4] = [[-0.5, -0.5], [0.5, -0.5], [-0.5, 0.5], [0.5, 0.5]];
        let vertex_buffer = context
            .device()
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Grid Quad Vertex Buffer"),
                contents: bytemuck::cast_slice(&quad_vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });

        Self {
            context,
            pipeline,
            vertex_buffer,
            uniform_buffer,
            bind_group,
            instance_buffer: None,
            instance_count: 0,
        }
    }

    /// Rebuild the instance buffer from this frame's grid lines.
    pub fn upload(&mut self, lines: &[LineSegment]) {
        if lines.is_empty() {
            self.instance_buffer = None;
            self.instance_count = 0;
            return;
        }

        let instances: Vec<LineInstance> = lines.iter().map(LineInstance::new).collect();
        self.instance_buffer = Some(self.context.device().create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Grid Instance Buffer"),
                contents: bytemuck::cast_slice(&instances),
                usage: wgpu::BufferUsages::VERTEX,
            },
        ));
        self.instance_count = lines.len() as u32;
    }

    /// Draw the uploaded lines with the given transform, width and color.
    pub fn render(
        &self,
        pass: &mut wgpu::RenderPass,
        transform: &ViewTransform,
        line_width: f32,
        color: Color,
    ) {
        if self.instance_count == 0 {
            return;
        }
        let Some(instance_buffer) = &self.instance_buffer else {
            return;
        };

        let uniform = GridUniform {
            transform: *transform,
            color: color.to_array(),
            line_width,
            _padding: [0.0; 3],
        };
        self.context
            .queue()
            .write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[uniform]));

        pass.push_debug_group("GridRenderer::render");
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_vertex_buffer(1, instance_buffer.slice(..));
        pass.draw(0..4, 0..self.instance_count);
        pass.pop_debug_group();
    }
}

/// WGSL shader: expands each segment instance into a width-correct quad in
/// screen space, then projects to clip space.
const GRID_SHADER: &str = r#"
struct GridUniform {
    projection: mat4x4<f32>,
    scale: vec2<f32>,
    offset: vec2<f32>,
    color: vec4<f32>,
    line_width: f32,
}

@group(0) @binding(0)
var<uniform> grid: GridUniform;

struct VertexInput {
    @location(0) quad_pos: vec2<f32>,
    @location(1) line_start: vec2<f32>,
    @location(2) line_end: vec2<f32>,
}

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
}

@vertex
fn vs_main(input: VertexInput) -> VertexOutput {
    var output: VertexOutput;

    // World to screen
    let screen_start = input.line_start * grid.scale + grid.offset;
    let screen_end = input.line_end * grid.scale + grid.offset;

    let delta = screen_end - screen_start;
    let len = length(delta);

    var dir: vec2<f32>;
    var perp: vec2<f32>;
    if len < 0.0001 {
        dir = vec2<f32>(1.0, 0.0);
        perp = vec2<f32>(0.0, 1.0);
    } else {
        dir = delta / len;
        perp = vec2<f32>(-dir.y, dir.x);
    }

    let center = (screen_start + screen_end) * 0.5;
    let local_x = input.quad_pos.x * len;
    let local_y = input.quad_pos.y * grid.line_width;
    let screen_pos = center + dir * local_x + perp * local_y;

    output.position = grid.projection * vec4<f32>(screen_pos, 0.0, 1.0);
    return output;
}

@fragment
fn fs_main(input: VertexOutput) -> @location(0) vec4<f32> {
    return grid.color;
}
"#;
