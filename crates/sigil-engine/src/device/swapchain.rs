//! Swapchain configuration helpers.
//!
//! Pure selection logic lives here so it can be tested without a GPU;
//! [`Gpu`](super::Gpu) applies the results to the live surface.

use winit::dpi::PhysicalSize;

use super::SurfaceErrorAction;

/// Picks the surface format the rect pipeline renders into.
///
/// UI colors are authored in sRGB, so an sRGB-flavored format is taken
/// when the surface offers one; otherwise the surface's preferred
/// (first-listed) format wins.
pub(crate) fn select_format(
    available: &[wgpu::TextureFormat],
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    if prefer_srgb {
        if let Some(f) = available.iter().copied().find(|f| f.is_srgb()) {
            return Some(f);
        }
    }
    available.first().copied()
}

/// Picks the composite alpha mode, honoring a request only when the
/// surface supports it.
pub(crate) fn select_alpha_mode(
    available: &[wgpu::CompositeAlphaMode],
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| available.contains(m))
        .or_else(|| available.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

/// Reconfigures the surface for `new_size`.
///
/// A zero-extent surface cannot be configured; the size is remembered
/// and configuration waits for the next non-empty resize.
pub(crate) fn apply_resize(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &mut wgpu::SurfaceConfiguration,
    size: &mut PhysicalSize<u32>,
    new_size: PhysicalSize<u32>,
) {
    *size = new_size;
    if new_size.width == 0 || new_size.height == 0 {
        return;
    }

    config.width = new_size.width;
    config.height = new_size.height;
    surface.configure(device, config);
}

/// Maps a frame-acquisition error to the action the surface should take.
pub(crate) fn classify_surface_error(err: &wgpu::SurfaceError) -> SurfaceErrorAction {
    match err {
        // The swapchain no longer matches the window; rebuild it.
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
            SurfaceErrorAction::Reconfigured
        }
        wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other => SurfaceErrorAction::SkipFrame,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── select_format ─────────────────────────────────────────────────────

    #[test]
    fn srgb_format_preferred_when_offered() {
        let available = [
            wgpu::TextureFormat::Bgra8Unorm,
            wgpu::TextureFormat::Bgra8UnormSrgb,
        ];
        assert_eq!(
            select_format(&available, true),
            Some(wgpu::TextureFormat::Bgra8UnormSrgb)
        );
    }

    #[test]
    fn first_format_wins_without_srgb_preference() {
        let available = [
            wgpu::TextureFormat::Bgra8Unorm,
            wgpu::TextureFormat::Bgra8UnormSrgb,
        ];
        assert_eq!(
            select_format(&available, false),
            Some(wgpu::TextureFormat::Bgra8Unorm)
        );
    }

    #[test]
    fn srgb_preference_falls_back_when_unavailable() {
        let available = [wgpu::TextureFormat::Rgba16Float];
        assert_eq!(
            select_format(&available, true),
            Some(wgpu::TextureFormat::Rgba16Float)
        );
    }

    #[test]
    fn no_formats_yields_none() {
        assert_eq!(select_format(&[], true), None);
    }

    // ── select_alpha_mode ─────────────────────────────────────────────────

    #[test]
    fn requested_alpha_mode_honored_when_supported() {
        let available = [
            wgpu::CompositeAlphaMode::Opaque,
            wgpu::CompositeAlphaMode::PreMultiplied,
        ];
        assert_eq!(
            select_alpha_mode(&available, Some(wgpu::CompositeAlphaMode::PreMultiplied)),
            wgpu::CompositeAlphaMode::PreMultiplied
        );
    }

    #[test]
    fn unsupported_request_falls_back_to_first_available() {
        let available = [wgpu::CompositeAlphaMode::Opaque];
        assert_eq!(
            select_alpha_mode(&available, Some(wgpu::CompositeAlphaMode::PostMultiplied)),
            wgpu::CompositeAlphaMode::Opaque
        );
    }

    // ── classify_surface_error ────────────────────────────────────────────

    #[test]
    fn lost_and_outdated_trigger_reconfigure() {
        assert_eq!(
            classify_surface_error(&wgpu::SurfaceError::Lost),
            SurfaceErrorAction::Reconfigured
        );
        assert_eq!(
            classify_surface_error(&wgpu::SurfaceError::Outdated),
            SurfaceErrorAction::Reconfigured
        );
    }

    #[test]
    fn out_of_memory_is_fatal() {
        assert_eq!(
            classify_surface_error(&wgpu::SurfaceError::OutOfMemory),
            SurfaceErrorAction::Fatal
        );
    }

    #[test]
    fn timeout_skips_the_frame() {
        assert_eq!(
            classify_surface_error(&wgpu::SurfaceError::Timeout),
            SurfaceErrorAction::SkipFrame
        );
    }
}
