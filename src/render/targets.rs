use crate::constants::{DEPTH_FORMAT, OFFSCREEN_FORMAT};
use wgpu;

/// Offscreen color and depth shared by every pass of a frame.
///
/// Each pass clears both, draws its layers, and is then composited onto the
/// swapchain, so a single pair is enough.
pub(crate) struct RenderTargets {
    pub(crate) color_tex: wgpu::Texture,
    pub(crate) color_view: wgpu::TextureView,
    pub(crate) depth_tex: wgpu::Texture,
    pub(crate) depth_view: wgpu::TextureView,
}

impl RenderTargets {
    pub(crate) fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let (color_tex, color_view) = color_target(device, width, height);
        let (depth_tex, depth_view) = depth_target(device, width, height);
        Self {
            color_tex,
            color_view,
            depth_tex,
            depth_view,
        }
    }

    pub(crate) fn recreate(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.color_tex.destroy();
        self.depth_tex.destroy();
        (self.color_tex, self.color_view) = color_target(device, width, height);
        (self.depth_tex, self.depth_view) = depth_target(device, width, height);
    }
}

fn color_target(device: &wgpu::Device, width: u32, height: u32) -> (wgpu::Texture, wgpu::TextureView) {
    create_target(
        device,
        "pass_color",
        width,
        height,
        OFFSCREEN_FORMAT,
        wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
    )
}

fn depth_target(device: &wgpu::Device, width: u32, height: u32) -> (wgpu::Texture, wgpu::TextureView) {
    create_target(
        device,
        "pass_depth",
        width,
        height,
        DEPTH_FORMAT,
        wgpu::TextureUsages::RENDER_ATTACHMENT,
    )
}

// Zero-sized canvases still get a 1x1 target.
fn create_target(
    device: &wgpu::Device,
    label: &str,
    width: u32,
    height: u32,
    format: wgpu::TextureFormat,
    usage: wgpu::TextureUsages,
) -> (wgpu::Texture, wgpu::TextureView) {
    let tex = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage,
        view_formats: &[],
    });
    let view = tex.create_view(&wgpu::TextureViewDescriptor::default());
    (tex, view)
}
