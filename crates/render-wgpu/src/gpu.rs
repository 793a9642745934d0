use crate::shaders;
use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use shipdemo_assets::{Attribute, Model, VertexLayout};
use shipdemo_render::{DrawCommand, Scene, TransformStack};
use std::collections::BTreeMap;
use wgpu::util::DeviceExt;

/// Mesh and line draws a single frame may issue.
const MAX_DRAWS: u64 = 64;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Globals {
    view_proj: [[f32; 4]; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct PerDraw {
    model: [[f32; 4]; 4],
    color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct GroundVertex {
    position: [f32; 3],
}

/// Ship mesh resident on the GPU.
struct GpuMesh {
    layout: VertexLayout,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

/// A draw resolved from the command list, waiting for the render pass.
enum PendingDraw {
    Mesh { mesh: usize, slot: u64 },
    Lines { count: u32, slot: u64 },
}

/// wgpu-based demo renderer.
pub struct WgpuRenderer {
    mesh_pipelines: BTreeMap<VertexLayout, wgpu::RenderPipeline>,
    ground_pipeline: wgpu::RenderPipeline,
    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    draw_buffer: wgpu::Buffer,
    draw_bind_group: wgpu::BindGroup,
    draw_stride: u64,
    ground_vertex_buffer: wgpu::Buffer,
    ground_capacity: usize,
    ground_staging: Vec<GroundVertex>,
    meshes: Vec<GpuMesh>,
    depth_texture: wgpu::TextureView,
}

impl WgpuRenderer {
    /// Build pipelines for every vertex layout and a ground buffer able to
    /// hold `max_ground_vertices`.
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        max_ground_vertices: usize,
    ) -> Self {
        let globals_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("globals_buffer"),
            contents: bytemuck::bytes_of(&Globals {
                view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let globals_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bind_group_layout"),
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

        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bind_group"),
            layout: &globals_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        // Per-draw uniforms live in one buffer addressed by dynamic offset.
        let per_draw_size = std::mem::size_of::<PerDraw>() as u64;
        let align = device.limits().min_uniform_buffer_offset_alignment as u64;
        let draw_stride = per_draw_size.div_ceil(align) * align;

        let draw_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("per_draw_buffer"),
            size: draw_stride * MAX_DRAWS,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let draw_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("per_draw_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: wgpu::BufferSize::new(per_draw_size),
                },
                count: None,
            }],
        });

        let draw_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("per_draw_bind_group"),
            layout: &draw_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &draw_buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(per_draw_size),
                }),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[&globals_layout, &draw_layout],
            push_constant_ranges: &[],
        });

        let lit_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("lit_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::LIT_SHADER.into()),
        });
        let flat_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("flat_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::FLAT_SHADER.into()),
        });

        let mut mesh_pipelines = BTreeMap::new();
        for layout in VertexLayout::ALL {
            let (shader, vs, fs) = if layout.has_normals() {
                (&lit_shader, "vs_main", "fs_main")
            } else {
                (&flat_shader, "vs_flat", "fs_flat")
            };
            let attributes = mesh_attributes(layout);
            let pipeline = create_pipeline(
                device,
                &pipeline_layout,
                surface_format,
                PipelineDesc {
                    label: layout.name(),
                    shader,
                    vs_entry: vs,
                    fs_entry: fs,
                    stride: layout.stride(),
                    attributes: &attributes,
                    topology: wgpu::PrimitiveTopology::TriangleList,
                },
            );
            mesh_pipelines.insert(layout, pipeline);
        }

        let ground_attributes = [wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x3,
            offset: 0,
            shader_location: 0,
        }];
        let ground_pipeline = create_pipeline(
            device,
            &pipeline_layout,
            surface_format,
            PipelineDesc {
                label: "ground",
                shader: &flat_shader,
                vs_entry: "vs_flat",
                fs_entry: "fs_flat",
                stride: std::mem::size_of::<GroundVertex>() as u64,
                attributes: &ground_attributes,
                topology: wgpu::PrimitiveTopology::LineList,
            },
        );

        let ground_vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("ground_vertex_buffer"),
            size: (max_ground_vertices.max(1) * std::mem::size_of::<GroundVertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let depth_texture = Self::create_depth_texture(device, width, height);

        Self {
            mesh_pipelines,
            ground_pipeline,
            globals_buffer,
            globals_bind_group,
            draw_buffer,
            draw_bind_group,
            draw_stride,
            ground_vertex_buffer,
            ground_capacity: max_ground_vertices,
            ground_staging: Vec::with_capacity(max_ground_vertices),
            meshes: Vec::new(),
            depth_texture,
        }
    }

    /// Upload the ship model. Replaces any previously uploaded model.
    pub fn upload_model(&mut self, device: &wgpu::Device, model: &Model) {
        self.meshes = model
            .meshes()
            .iter()
            .map(|mesh| GpuMesh {
                layout: mesh.layout(),
                vertex_buffer: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("mesh_vertex_buffer"),
                    contents: bytemuck::cast_slice(&mesh.vertices.data),
                    usage: wgpu::BufferUsages::VERTEX,
                }),
                index_buffer: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("mesh_index_buffer"),
                    contents: bytemuck::cast_slice(&mesh.faces.indices),
                    usage: wgpu::BufferUsages::INDEX,
                }),
                index_count: mesh.faces.indices.len() as u32,
            })
            .collect();
        tracing::info!(
            model = %model.name,
            meshes = self.meshes.len(),
            "model uploaded"
        );
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = Self::create_depth_texture(device, width, height);
    }

    /// Render one frame by replaying the scene's draw commands.
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        scene: &Scene<'_>,
        model: &Model,
    ) {
        queue.write_buffer(
            &self.globals_buffer,
            0,
            bytemuck::bytes_of(&Globals {
                view_proj: scene.view_projection().to_cols_array_2d(),
            }),
        );

        let line_count = scene.ground_lines.len().min(self.ground_capacity);
        if line_count < scene.ground_lines.len() {
            tracing::warn!(
                lines = scene.ground_lines.len(),
                capacity = self.ground_capacity,
                "ground lines truncated"
            );
        }
        self.ground_staging.clear();
        self.ground_staging.extend(
            scene.ground_lines[..line_count]
                .iter()
                .map(|v| GroundVertex { position: v.position }),
        );
        if !self.ground_staging.is_empty() {
            queue.write_buffer(
                &self.ground_vertex_buffer,
                0,
                bytemuck::cast_slice(&self.ground_staging),
            );
        }

        // Resolve commands into per-draw uniform slots.
        let mut stack = TransformStack::new();
        let mut uniforms = vec![0u8; (self.draw_stride * MAX_DRAWS) as usize];
        let mut pending = Vec::new();
        let mut slot = 0u64;
        for cmd in scene.commands(model) {
            if slot >= MAX_DRAWS {
                tracing::warn!("draw limit reached; remaining commands skipped");
                break;
            }
            let (model_matrix, color) = match cmd {
                DrawCommand::PushTransform(m) => {
                    stack.push(m);
                    continue;
                }
                DrawCommand::PopTransform => {
                    stack.pop();
                    continue;
                }
                // Pipeline selection follows the mesh's own layout.
                DrawCommand::BindLayout(_) => continue,
                DrawCommand::DrawMesh { mesh, color } => {
                    if mesh >= self.meshes.len() {
                        tracing::warn!(mesh, "draw for mesh that was never uploaded");
                        continue;
                    }
                    pending.push(PendingDraw::Mesh { mesh, slot });
                    (stack.current(), color)
                }
                DrawCommand::DrawLines { count, color } => {
                    pending.push(PendingDraw::Lines {
                        count: count.min(line_count as u32),
                        slot,
                    });
                    (Mat4::IDENTITY, color)
                }
            };
            let offset = (slot * self.draw_stride) as usize;
            let data = PerDraw {
                model: model_matrix.to_cols_array_2d(),
                color,
            };
            uniforms[offset..offset + std::mem::size_of::<PerDraw>()]
                .copy_from_slice(bytemuck::bytes_of(&data));
            slot += 1;
        }
        if slot > 0 {
            queue.write_buffer(
                &self.draw_buffer,
                0,
                &uniforms[..(slot * self.draw_stride) as usize],
            );
        }

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("render_encoder"),
        });

        {
            let [r, g, b, a] = scene.clear_color;
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("main_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: a as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            pass.set_bind_group(0, &self.globals_bind_group, &[]);

            for draw in &pending {
                match *draw {
                    PendingDraw::Mesh { mesh, slot } => {
                        let gpu = &self.meshes[mesh];
                        let Some(pipeline) = self.mesh_pipelines.get(&gpu.layout) else {
                            continue;
                        };
                        pass.set_pipeline(pipeline);
                        pass.set_bind_group(
                            1,
                            &self.draw_bind_group,
                            &[(slot * self.draw_stride) as u32],
                        );
                        pass.set_vertex_buffer(0, gpu.vertex_buffer.slice(..));
                        pass.set_index_buffer(gpu.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                        pass.draw_indexed(0..gpu.index_count, 0, 0..1);
                    }
                    PendingDraw::Lines { count, slot } => {
                        if count == 0 {
                            continue;
                        }
                        pass.set_pipeline(&self.ground_pipeline);
                        pass.set_bind_group(
                            1,
                            &self.draw_bind_group,
                            &[(slot * self.draw_stride) as u32],
                        );
                        pass.set_vertex_buffer(0, self.ground_vertex_buffer.slice(..));
                        pass.draw(0..count, 0..1);
                    }
                }
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}

/// Vertex attributes bound for `layout`: position always, normal when present.
/// Other channels stay in the buffer and are skipped by the stride.
fn mesh_attributes(layout: VertexLayout) -> Vec<wgpu::VertexAttribute> {
    layout
        .attributes()
        .iter()
        .filter_map(|a| match a.attribute {
            Attribute::Position => Some(wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: a.offset as u64,
                shader_location: 0,
            }),
            Attribute::Normal => Some(wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: a.offset as u64,
                shader_location: 1,
            }),
            _ => None,
        })
        .collect()
}

struct PipelineDesc<'a> {
    label: &'a str,
    shader: &'a wgpu::ShaderModule,
    vs_entry: &'a str,
    fs_entry: &'a str,
    stride: u64,
    attributes: &'a [wgpu::VertexAttribute],
    topology: wgpu::PrimitiveTopology,
}

fn create_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    surface_format: wgpu::TextureFormat,
    desc: PipelineDesc<'_>,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(desc.label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: desc.shader,
            entry_point: Some(desc.vs_entry),
            compilation_options: Default::default(),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: desc.stride,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: desc.attributes,
            }],
        },
        fragment: Some(wgpu::FragmentState {
            module: desc.shader,
            entry_point: Some(desc.fs_entry),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: desc.topology,
            // The exhaust plate is single-sided; draw both faces.
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: wgpu::TextureFormat::Depth32Float,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::LessEqual,
            stencil: Default::default(),
            bias: Default::default(),
        }),
        multisample: Default::default(),
        multiview: None,
        cache: None,
    })
}
