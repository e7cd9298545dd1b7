use crate::constants::CLEAR_COLOR;
use fnv::FnvHashMap;
use glam::Mat4;
use showcase_core::asset::ModelAsset;
use showcase_core::camera::Camera;
use showcase_core::passes::{ClearOp, LayerMask, RenderPass};
use showcase_core::{POST_WGSL, SCENE_WGSL};
use smallvec::SmallVec;
use web_sys as web;

mod mesh;
mod post;
mod targets;
use mesh::{CameraUniforms, GpuMesh, MeshResources, NodeUniforms};
use post::GradeResources;
use targets::RenderTargets;

/// One mounted node as the renderer sees it.
#[derive(Clone, Copy, Debug)]
pub struct NodeDraw {
    pub index: usize,
    pub model: Mat4,
    pub exposure: f32,
    pub opacity: f32,
    pub layer: LayerMask,
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    targets: RenderTargets,
    linear_sampler: wgpu::Sampler,
    mesh: MeshResources,
    grade: GradeResources,
    meshes: FnvHashMap<usize, GpuMesh>,

    width: u32,
    height: u32,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

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
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        // The page background shows through transparent pixels.
        let alpha_mode = if caps
            .alpha_modes
            .contains(&wgpu::CompositeAlphaMode::PreMultiplied)
        {
            wgpu::CompositeAlphaMode::PreMultiplied
        } else {
            caps.alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto)
        };
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!("[gpu] surface {width}x{height} {format:?} alpha={alpha_mode:?}");

        let targets = RenderTargets::new(&device, width, height);

        let scene_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(SCENE_WGSL.into()),
        });
        let post_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("post_shader"),
            source: wgpu::ShaderSource::Wgsl(POST_WGSL.into()),
        });
        let linear_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let mesh = MeshResources::new(&device, &scene_shader);
        let grade = post::create_grade_resources(
            &device,
            &post_shader,
            &linear_sampler,
            &targets.color_view,
            format,
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            targets,
            linear_sampler,
            mesh,
            grade,
            meshes: FnvHashMap::default(),
            width,
            height,
        })
    }

    pub fn upload_mesh(&mut self, index: usize, asset: &ModelAsset) {
        if self.meshes.contains_key(&index) {
            return;
        }
        let mesh = GpuMesh::upload(&self.device, &format!("mesh_{index}"), asset);
        log::info!(
            "[gpu] uploaded mesh {index}: {} tris",
            asset.triangle_count()
        );
        self.meshes.insert(index, mesh);
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
            self.targets.recreate(&self.device, width, height);
            self.grade.bind_groups = post::rebuild_bind_groups(
                &self.device,
                &self.grade.bgl,
                &self.linear_sampler,
                &self.targets.color_view,
                &self.grade.uniform_buffers,
            );
        }
    }

    /// Configure the surface again after it was lost or went stale.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Draw each planned pass into the offscreen target and composite it onto
    /// the swapchain with the pass's grade.
    pub fn render(
        &mut self,
        plan: &[RenderPass],
        camera: &Camera,
        draws: &[NodeDraw],
    ) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        // Only nodes with an uploaded mesh get a uniform slot.
        let drawable: SmallVec<[&NodeDraw; 16]> = draws
            .iter()
            .filter(|d| self.meshes.contains_key(&d.index))
            .collect();
        let nodes: Vec<NodeUniforms> = drawable
            .iter()
            .map(|d| NodeUniforms::new(d.model, d.exposure, d.opacity))
            .collect();
        self.mesh.write_nodes(&self.device, &self.queue, &nodes);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });

        if plan.is_empty() {
            post_clear(&mut encoder, &view);
        }

        for (pass_index, pass) in plan.iter().enumerate().take(self.mesh.camera_buffers.len()) {
            let cam = CameraUniforms::new(pass.view_proj(camera), pass.pose.eye);
            self.queue.write_buffer(
                &self.mesh.camera_buffers[pass_index],
                0,
                bytemuck::bytes_of(&cam),
            );
            post::write_grade_uniforms(
                &self.queue,
                &self.grade.uniform_buffers[pass_index],
                pass.shading.saturation(),
            );

            {
                let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some(pass.label),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &self.targets.color_view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                        view: &self.targets.depth_view,
                        depth_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Clear(1.0),
                            store: wgpu::StoreOp::Store,
                        }),
                        stencil_ops: None,
                    }),
                    timestamp_writes: None,
                    occlusion_query_set: None,
                });
                rpass.set_pipeline(&self.mesh.pipeline);
                rpass.set_bind_group(0, &self.mesh.camera_bind_groups[pass_index], &[]);
                for (slot, d) in drawable.iter().enumerate() {
                    if !pass.layers.intersects(d.layer) {
                        continue;
                    }
                    let Some(m) = self.meshes.get(&d.index) else {
                        continue;
                    };
                    let offset = (slot as u64 * self.mesh.node_stride) as u32;
                    rpass.set_bind_group(1, &self.mesh.node_bind_group, &[offset]);
                    rpass.set_vertex_buffer(0, m.vertex_buffer.slice(..));
                    rpass.set_index_buffer(m.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                    rpass.draw_indexed(0..m.index_count, 0, 0..1);
                }
            }

            let load = match pass.clear {
                ClearOp::ColorAndDepth => wgpu::LoadOp::Clear(CLEAR_COLOR),
                ClearOp::DepthOnly => wgpu::LoadOp::Load,
            };
            post::blit(
                &mut encoder,
                "composite",
                &view,
                load,
                &self.grade.pipeline,
                &self.grade.bind_groups[pass_index],
            );
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn post_clear(encoder: &mut wgpu::CommandEncoder, target: &wgpu::TextureView) {
    _ = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("clear"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: target,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
    });
}
