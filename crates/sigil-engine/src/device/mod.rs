//! wgpu device layer backing a [`NativeSurface`](crate::surface::NativeSurface).
//!
//! One window, one [`Gpu`]: instance/adapter/device/queue creation,
//! swapchain configuration, frame acquisition. The widget layer never
//! touches this module directly; it goes through the surface trait.

mod gpu;
mod init;
mod swapchain;

pub use gpu::Gpu;
pub use init::GpuInit;

/// What to do after a failed frame acquisition.
///
/// Produced by [`Gpu::handle_surface_error`]; the surface decides whether
/// the frame is retried, skipped, or the application shuts down.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// The swapchain was rebuilt; acquiring should succeed next frame.
    Reconfigured,
    /// Transient failure, drop this frame and carry on.
    SkipFrame,
    /// Unrecoverable (out of GPU memory); stop presenting.
    Fatal,
}

/// An acquired swapchain texture plus the encoder recording into it.
///
/// Short-lived: hand it back via [`Gpu::submit`] before the next
/// acquisition, since the held texture blocks the swapchain.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
