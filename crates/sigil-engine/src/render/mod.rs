//! Draw-list renderers.
//!
//! A renderer turns the rect/text commands a [`DrawList`](crate::scene::DrawList)
//! accumulated into wgpu passes. Geometry is recorded in logical pixels
//! (top-left origin, +Y down); the vertex stage maps to NDC through a
//! viewport uniform, and clip rects become scissor state.

pub mod shapes;

use crate::coords::Viewport;

/// Everything a renderer needs per frame, borrowed from the surface.
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub surface_format: wgpu::TextureFormat,
    /// Drawable extent in logical pixels.
    pub viewport: Viewport,
    /// Physical pixels per logical pixel (scissor rects are physical).
    pub scale_factor: f32,
}

impl<'a> RenderCtx<'a> {
    #[inline]
    pub fn new(
        device: &'a wgpu::Device,
        queue: &'a wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        viewport: Viewport,
        scale_factor: f32,
    ) -> Self {
        Self {
            device,
            queue,
            surface_format,
            viewport,
            scale_factor,
        }
    }
}

/// Where a renderer records: the frame encoder and its color view.
pub struct RenderTarget<'a> {
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub color_view: &'a wgpu::TextureView,
}

impl<'a> RenderTarget<'a> {
    #[inline]
    pub fn new(encoder: &'a mut wgpu::CommandEncoder, color_view: &'a wgpu::TextureView) -> Self {
        Self { encoder, color_view }
    }
}
