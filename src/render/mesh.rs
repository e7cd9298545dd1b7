use crate::constants::{DEPTH_FORMAT, MAX_PASSES, NODE_SLOTS_INITIAL, OFFSCREEN_FORMAT};
use glam::{Mat4, Vec3};
use showcase_core::asset::{ModelAsset, Vertex};
use std::num::NonZeroU64;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct CameraUniforms {
    view_proj: [[f32; 4]; 4],
    eye: [f32; 4],
}

impl CameraUniforms {
    pub(crate) fn new(view_proj: Mat4, eye: Vec3) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            eye: eye.extend(1.0).to_array(),
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct NodeUniforms {
    model: [[f32; 4]; 4],
    normal: [[f32; 4]; 4],
    // x = exposure, y = opacity
    tint: [f32; 4],
}

impl NodeUniforms {
    pub(crate) fn new(model: Mat4, exposure: f32, opacity: f32) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            normal: model.inverse().transpose().to_cols_array_2d(),
            tint: [exposure, opacity, 0.0, 0.0],
        }
    }
}

const VERTEX_ATTRS: [wgpu::VertexAttribute; 3] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x4];

/// Vertex and index buffers of one uploaded model.
pub(crate) struct GpuMesh {
    pub(crate) vertex_buffer: wgpu::Buffer,
    pub(crate) index_buffer: wgpu::Buffer,
    pub(crate) index_count: u32,
}

impl GpuMesh {
    pub(crate) fn upload(device: &wgpu::Device, label: &str, asset: &ModelAsset) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&asset.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&asset.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            index_buffer,
            index_count: asset.indices.len() as u32,
        }
    }
}

/// Model pipeline plus the per-pass camera uniforms and the dynamic-offset
/// node uniform buffer.
pub(crate) struct MeshResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) camera_buffers: Vec<wgpu::Buffer>,
    pub(crate) camera_bind_groups: Vec<wgpu::BindGroup>,
    node_bgl: wgpu::BindGroupLayout,
    pub(crate) node_buffer: wgpu::Buffer,
    pub(crate) node_bind_group: wgpu::BindGroup,
    pub(crate) node_stride: u64,
    node_capacity: usize,
}

impl MeshResources {
    pub(crate) fn new(device: &wgpu::Device, shader: &wgpu::ShaderModule) -> Self {
        let camera_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("camera_bgl"),
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
        let node_size = std::mem::size_of::<NodeUniforms>() as u64;
        let node_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("node_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: NonZeroU64::new(node_size),
                },
                count: None,
            }],
        });

        let camera_buffers: Vec<wgpu::Buffer> = (0..MAX_PASSES)
            .map(|i| {
                device.create_buffer(&wgpu::BufferDescriptor {
                    label: Some(&format!("camera_uniforms_{i}")),
                    size: std::mem::size_of::<CameraUniforms>() as u64,
                    usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                    mapped_at_creation: false,
                })
            })
            .collect();
        let camera_bind_groups = camera_buffers
            .iter()
            .map(|b| {
                device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("camera_bg"),
                    layout: &camera_bgl,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: b.as_entire_binding(),
                    }],
                })
            })
            .collect();

        let align = device.limits().min_uniform_buffer_offset_alignment as u64;
        let node_stride = node_size.div_ceil(align) * align;
        let (node_buffer, node_bind_group) =
            create_node_slots(device, &node_bgl, node_stride, NODE_SLOTS_INITIAL);

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl_mesh"),
            bind_group_layouts: &[&camera_bgl, &node_bgl],
            push_constant_ranges: &[],
        });
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("mesh_pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &VERTEX_ATTRS,
                }],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: OFFSCREEN_FORMAT,
                    blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        Self {
            pipeline,
            camera_buffers,
            camera_bind_groups,
            node_bgl,
            node_buffer,
            node_bind_group,
            node_stride,
            node_capacity: NODE_SLOTS_INITIAL,
        }
    }

    /// Write one node uniform per draw, growing the slot buffer when needed.
    pub(crate) fn write_nodes(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        nodes: &[NodeUniforms],
    ) {
        if nodes.is_empty() {
            return;
        }
        if nodes.len() > self.node_capacity {
            let capacity = nodes.len().next_power_of_two();
            self.node_buffer.destroy();
            (self.node_buffer, self.node_bind_group) =
                create_node_slots(device, &self.node_bgl, self.node_stride, capacity);
            self.node_capacity = capacity;
            log::info!("[render] node slots grown to {capacity}");
        }
        let stride = self.node_stride as usize;
        let mut bytes = vec![0u8; stride * nodes.len()];
        for (i, n) in nodes.iter().enumerate() {
            let src = bytemuck::bytes_of(n);
            bytes[i * stride..i * stride + src.len()].copy_from_slice(src);
        }
        queue.write_buffer(&self.node_buffer, 0, &bytes);
    }
}

fn create_node_slots(
    device: &wgpu::Device,
    bgl: &wgpu::BindGroupLayout,
    stride: u64,
    capacity: usize,
) -> (wgpu::Buffer, wgpu::BindGroup) {
    let buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("node_uniforms"),
        size: stride * capacity as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("node_bg"),
        layout: bgl,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                buffer: &buffer,
                offset: 0,
                size: NonZeroU64::new(std::mem::size_of::<NodeUniforms>() as u64),
            }),
        }],
    });
    (buffer, bind_group)
}
