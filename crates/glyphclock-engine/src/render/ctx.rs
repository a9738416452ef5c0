use crate::coords::Viewport;
use crate::device::Gpu;

/// What a renderer may touch while recording one frame.
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    /// Pipelines are rebuilt when this changes.
    pub surface_format: wgpu::TextureFormat,
    /// Logical size; draw rects are in the same units.
    pub viewport: Viewport,
}

impl<'a> RenderCtx<'a> {
    pub fn for_gpu(gpu: &'a Gpu<'_>, viewport: Viewport) -> Self {
        Self {
            device: gpu.device(),
            queue: gpu.queue(),
            surface_format: gpu.surface_format(),
            viewport,
        }
    }
}

/// Encoder and surface view of the frame being recorded. Renderers load the
/// existing contents; the clear happens before any of them runs.
pub struct RenderTarget<'a> {
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub color_view: &'a wgpu::TextureView,
}
