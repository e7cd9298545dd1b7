use crate::constants::MAX_PASSES;
use wgpu;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct GradeUniforms {
    // x = saturation
    params: [f32; 4],
}

/// Saturation grade that composites a finished pass onto the swapchain.
/// Every pass gets its own uniform buffer and bind group so all writes can
/// land before the single submit.
pub(crate) struct GradeResources {
    pub(crate) bgl: wgpu::BindGroupLayout,
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) uniform_buffers: Vec<wgpu::Buffer>,
    pub(crate) bind_groups: Vec<wgpu::BindGroup>,
}

pub(crate) fn create_grade_resources(
    device: &wgpu::Device,
    post_shader: &wgpu::ShaderModule,
    sampler: &wgpu::Sampler,
    source: &wgpu::TextureView,
    swap_format: wgpu::TextureFormat,
) -> GradeResources {
    let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("grade_bgl"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 2,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            },
        ],
    });
    let uniform_buffers: Vec<wgpu::Buffer> = (0..MAX_PASSES)
        .map(|i| {
            device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(&format!("grade_uniforms_{i}")),
                size: std::mem::size_of::<GradeUniforms>() as u64,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            })
        })
        .collect();
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("pl_grade"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });
    let pipeline = grade_pipeline(device, &layout, post_shader, swap_format);
    let bind_groups = rebuild_bind_groups(device, &bgl, sampler, source, &uniform_buffers);

    GradeResources {
        bgl,
        pipeline,
        uniform_buffers,
        bind_groups,
    }
}

// Fullscreen triangle, premultiplied "over" onto whatever the swapchain holds.
fn grade_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    swap_format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("grade_pipeline"),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_fullscreen"),
            buffers: &[],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_grade"),
            targets: &[Some(wgpu::ColorTargetState {
                format: swap_format,
                blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    })
}

pub(crate) fn rebuild_bind_groups(
    device: &wgpu::Device,
    bgl: &wgpu::BindGroupLayout,
    sampler: &wgpu::Sampler,
    source: &wgpu::TextureView,
    uniform_buffers: &[wgpu::Buffer],
) -> Vec<wgpu::BindGroup> {
    uniform_buffers
        .iter()
        .enumerate()
        .map(|(i, ub)| {
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(&format!("grade_bg_{i}")),
                layout: bgl,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(source),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(sampler),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: ub.as_entire_binding(),
                    },
                ],
            })
        })
        .collect()
}

pub(crate) fn write_grade_uniforms(queue: &wgpu::Queue, buffer: &wgpu::Buffer, saturation: f32) {
    let u = GradeUniforms {
        params: [saturation, 0.0, 0.0, 0.0],
    };
    queue.write_buffer(buffer, 0, bytemuck::bytes_of(&u));
}

pub(crate) fn blit(
    encoder: &mut wgpu::CommandEncoder,
    label: &str,
    target: &wgpu::TextureView,
    load: wgpu::LoadOp<wgpu::Color>,
    pipeline: &wgpu::RenderPipeline,
    bg0: &wgpu::BindGroup,
) {
    let mut r = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(label),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: target,
            resolve_target: None,
            ops: wgpu::Operations {
                load,
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
    });
    r.set_pipeline(pipeline);
    r.set_bind_group(0, bg0, &[]);
    r.draw(0..3, 0..1);
    drop(r);
}
