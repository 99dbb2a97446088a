/// Knobs for bringing up the GPU behind a surface.
///
/// The defaults suit a widget toolkit: sRGB output so themed colors
/// land on screen as authored, FIFO presentation (vsync on; the
/// runtime redraws continuously), and a two-frame latency cap to keep
/// pointer interaction snappy. `NativeSurface::set_vsync` switches the
/// present mode later without touching this struct.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Render into an sRGB surface format when the platform offers one.
    pub prefer_srgb: bool,

    /// Initial present mode. FIFO is the portable vsync-on choice.
    pub present_mode: wgpu::PresentMode,

    /// Composite alpha request; ignored if the surface lacks it.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    /// Extra device features. The rect pipeline needs none.
    pub required_features: wgpu::Features,

    /// Device limits to request. Defaults are plenty for quad batches.
    pub required_limits: wgpu::Limits,

    /// How many frames the driver may queue before blocking acquisition.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
        }
    }
}
