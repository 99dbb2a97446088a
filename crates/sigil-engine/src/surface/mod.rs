//! Render-surface abstraction.
//!
//! [`Surface`] is the narrow interface the GUI layer depends on: a
//! window-like target that produces raw input events, carries a view
//! (camera) for pixel/scene mapping, and accepts a draw stream. The
//! production implementation is [`NativeSurface`] (winit + wgpu); tests
//! substitute lightweight mocks.

mod native;

pub use native::NativeSurface;

use anyhow::Result;

use crate::coords::{Rect, Vec2, View};
use crate::input::RawEvent;
use crate::paint::Color;
use crate::scene::DrawList;

/// A render target with window semantics.
///
/// Coordinate conventions:
/// - `size`, `position` and event coordinates are pixels.
/// - the draw stream and the view's scene region are logical (scene) units;
///   with the default view the two coincide.
pub trait Surface {
    /// Current drawable size in pixels.
    fn size(&self) -> Vec2;

    /// Requests a new drawable size in pixels.
    fn set_size(&mut self, size: Vec2);

    /// Window position in screen pixels, `(0, 0)` when unavailable.
    fn position(&self) -> Vec2;

    fn set_position(&mut self, position: Vec2);

    fn set_title(&mut self, title: &str);

    /// Sets the window icon from tightly packed RGBA8 pixels.
    fn set_icon(&mut self, width: u32, height: u32, rgba: &[u8]) -> Result<()>;

    fn set_cursor_visible(&mut self, visible: bool);

    /// Enables or disables vertical sync.
    fn set_vsync(&mut self, enabled: bool);

    /// Enables or disables delivery of key-repeat events.
    fn set_key_repeat(&mut self, enabled: bool);

    /// Caps presentation rate, `None` removes the cap.
    fn set_framerate_limit(&mut self, fps: Option<u32>);

    /// Returns the next pending event, `None` when the queue is empty.
    fn poll_event(&mut self) -> Option<RawEvent>;

    /// Like [`poll_event`](Self::poll_event); event arrival between calls
    /// is driven by the runtime's control flow, so this never spins.
    fn wait_event(&mut self) -> Option<RawEvent>;

    /// The active view (camera transform).
    fn view(&self) -> View;

    fn set_view(&mut self, view: View);

    /// Maps a pixel position to scene coordinates through the active view.
    fn map_pixel_to_coords(&self, pixel: Vec2) -> Vec2 {
        self.view().pixel_to_coords(pixel, self.size())
    }

    /// Maps scene coordinates to a pixel position through the active view.
    fn map_coords_to_pixel(&self, coords: Vec2) -> Vec2 {
        self.view().coords_to_pixel(coords, self.size())
    }

    /// Surface-wide clip region in scene coordinates, `None` when unclipped.
    fn clip_region(&self) -> Option<Rect>;

    /// Sets (or clears) the surface-wide clip region.
    ///
    /// Applied to every recorded draw item at present time, intersected
    /// with any per-item clip rects.
    fn set_clip_region(&mut self, clip: Option<Rect>);

    /// Sets the clear color for the next present.
    fn clear(&mut self, color: Color);

    /// Draw stream for the current frame.
    fn draw_list(&mut self) -> &mut DrawList;

    /// Renders the recorded draw stream and presents the frame.
    fn present(&mut self) -> Result<()>;

    /// Whether the surface is still open for events and drawing.
    fn is_open(&self) -> bool;

    /// Closes the surface. Further presents are no-ops.
    fn close(&mut self);
}
