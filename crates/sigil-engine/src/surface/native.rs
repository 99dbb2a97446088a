use std::collections::VecDeque;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use ouroboros::self_referencing;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::window::{Icon, Window};

use crate::coords::{Rect, Vec2, View, Viewport};
use crate::device::{Gpu, GpuInit, SurfaceErrorAction};
use crate::input::RawEvent;
use crate::paint::Color;
use crate::render::shapes::rect::RectRenderer;
use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList};

use super::Surface;

#[self_referencing]
struct SurfaceInner {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

/// Production [`Surface`] backed by a winit window and a wgpu swapchain.
///
/// Events are pushed into an internal queue by the runtime loop and
/// drained by the owner through `poll_event`. Drawing is retained per
/// frame: callers record into the draw list, then `present()` renders
/// and clears it.
pub struct NativeSurface {
    inner: SurfaceInner,

    events: VecDeque<RawEvent>,

    draw_list: DrawList,
    rect_renderer: RectRenderer,

    /// Explicit view, `None` keeps the identity view tracking the size.
    view: Option<View>,

    clip: Option<Rect>,
    clear_color: Color,

    /// Minimum frame duration when a framerate cap is set.
    frame_budget: Option<Duration>,
    last_present: Instant,

    key_repeat: bool,
    vsync: bool,
    open: bool,

    warned_text: bool,
}

impl NativeSurface {
    /// Wraps an existing winit window and initializes the GPU for it.
    pub fn new(window: Window, gpu_init: GpuInit) -> Result<Self> {
        let inner = SurfaceInnerTryBuilder {
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("failed to initialize GPU for surface")?;

        Ok(Self {
            inner,
            events: VecDeque::new(),
            draw_list: DrawList::new(),
            rect_renderer: RectRenderer::new(),
            view: None,
            clip: None,
            clear_color: Color::transparent(),
            frame_budget: None,
            last_present: Instant::now(),
            key_repeat: true,
            vsync: true,
            open: true,
            warned_text: false,
        })
    }

    /// Queues a translated platform event. Called by the runtime loop.
    pub(crate) fn push_event(&mut self, ev: RawEvent) {
        if !self.key_repeat {
            if let RawEvent::Key(k) = &ev {
                if k.repeat {
                    return;
                }
            }
        }
        self.events.push_back(ev);
    }

    /// Reconfigures the swapchain after a platform resize.
    pub(crate) fn handle_resize(&mut self, width: u32, height: u32) {
        self.inner
            .with_gpu_mut(|gpu| gpu.resize(PhysicalSize::new(width, height)));
    }

    pub(crate) fn request_redraw(&self) {
        self.inner.with_window(|w| w.request_redraw());
    }

    fn wait_out_frame_budget(&mut self) {
        if let Some(budget) = self.frame_budget {
            let elapsed = self.last_present.elapsed();
            if elapsed < budget {
                std::thread::sleep(budget - elapsed);
            }
        }
        self.last_present = Instant::now();
    }
}

impl Surface for NativeSurface {
    fn size(&self) -> Vec2 {
        let s = self.inner.with_window(|w| w.inner_size());
        Vec2::new(s.width as f32, s.height as f32)
    }

    fn set_size(&mut self, size: Vec2) {
        self.inner.with_window(|w| {
            let _ = w.request_inner_size(PhysicalSize::new(size.x as u32, size.y as u32));
        });
    }

    fn position(&self) -> Vec2 {
        self.inner.with_window(|w| {
            w.outer_position()
                .map(|p| Vec2::new(p.x as f32, p.y as f32))
                .unwrap_or_default()
        })
    }

    fn set_position(&mut self, position: Vec2) {
        self.inner.with_window(|w| {
            w.set_outer_position(PhysicalPosition::new(position.x as i32, position.y as i32));
        });
    }

    fn set_title(&mut self, title: &str) {
        self.inner.with_window(|w| w.set_title(title));
    }

    fn set_icon(&mut self, width: u32, height: u32, rgba: &[u8]) -> Result<()> {
        let icon = Icon::from_rgba(rgba.to_vec(), width, height)
            .context("invalid RGBA icon data")?;
        self.inner.with_window(|w| w.set_window_icon(Some(icon)));
        Ok(())
    }

    fn set_cursor_visible(&mut self, visible: bool) {
        self.inner.with_window(|w| w.set_cursor_visible(visible));
    }

    fn set_vsync(&mut self, enabled: bool) {
        if self.vsync == enabled {
            return;
        }
        self.vsync = enabled;

        let mode = if enabled {
            wgpu::PresentMode::Fifo
        } else {
            wgpu::PresentMode::AutoNoVsync
        };
        self.inner.with_gpu_mut(|gpu| gpu.set_present_mode(mode));
    }

    fn set_key_repeat(&mut self, enabled: bool) {
        self.key_repeat = enabled;
    }

    fn set_framerate_limit(&mut self, fps: Option<u32>) {
        self.frame_budget = fps
            .filter(|&f| f > 0)
            .map(|f| Duration::from_secs_f64(1.0 / f as f64));
    }

    fn poll_event(&mut self) -> Option<RawEvent> {
        self.events.pop_front()
    }

    fn wait_event(&mut self) -> Option<RawEvent> {
        self.events.pop_front()
    }

    fn view(&self) -> View {
        self.view.unwrap_or_else(|| {
            let size = self.size();
            View::from_rect(Rect::from_origin_size(Vec2::zero(), size))
        })
    }

    fn set_view(&mut self, view: View) {
        self.view = Some(view);
    }

    fn clip_region(&self) -> Option<Rect> {
        self.clip
    }

    fn set_clip_region(&mut self, clip: Option<Rect>) {
        self.clip = clip;
    }

    fn clear(&mut self, color: Color) {
        self.clear_color = color;
    }

    fn draw_list(&mut self) -> &mut DrawList {
        &mut self.draw_list
    }

    fn present(&mut self) -> Result<()> {
        if !self.open {
            self.draw_list.clear();
            return Ok(());
        }

        if let Some(base) = self.clip {
            self.draw_list.restrict_to(base);
        }

        if !self.warned_text
            && self
                .draw_list
                .items()
                .iter()
                .any(|i| matches!(i.cmd, DrawCmd::Text(_)))
        {
            log::debug!("text draw commands present but no text backend is attached");
            self.warned_text = true;
        }

        let clear_color = self.clear_color;
        let draw_list = &mut self.draw_list;
        let renderer = &mut self.rect_renderer;

        let mut fatal = false;

        self.inner.with_mut(|fields| {
            let mut frame = match fields.gpu.begin_frame() {
                Ok(f) => f,
                Err(err) => {
                    match fields.gpu.handle_surface_error(err) {
                        SurfaceErrorAction::Fatal => fatal = true,
                        SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => {}
                    }
                    return;
                }
            };

            // Clear pass — dropped before the encoder is moved into submit().
            {
                let _rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("sigil clear"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &frame.view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(wgpu::Color {
                                r: clear_color.r as f64,
                                g: clear_color.g as f64,
                                b: clear_color.b as f64,
                                a: clear_color.a as f64,
                            }),
                            store: wgpu::StoreOp::Store,
                        },
                        depth_slice: None,
                    })],
                    depth_stencil_attachment: None,
                    timestamp_writes: None,
                    occlusion_query_set: None,
                    multiview_mask: None,
                });
            }

            let size = fields.window.inner_size();
            let ctx = RenderCtx::new(
                fields.gpu.device(),
                fields.gpu.queue(),
                fields.gpu.surface_format(),
                Viewport::new(size.width as f32, size.height as f32),
                1.0,
            );

            // RenderTarget borrows frame.encoder; dropped before submit() takes frame.
            {
                let mut target = RenderTarget::new(&mut frame.encoder, &frame.view);
                renderer.render(&ctx, &mut target, draw_list);
            }

            fields.window.pre_present_notify();
            fields.gpu.submit(frame);
        });

        self.draw_list.clear();
        self.wait_out_frame_budget();

        anyhow::ensure!(!fatal, "surface ran out of GPU memory");
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn close(&mut self) {
        self.open = false;
    }
}
