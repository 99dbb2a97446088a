use sigil_engine::coords::{Rect, Vec2};
use sigil_engine::paint::Color;
use sigil_engine::scene::{Border, DrawList, ZIndex};

/// Drawing surface passed to [`Widget::draw`](crate::widget::Widget::draw).
///
/// Wraps the engine's `DrawList` with a translation origin (containers
/// draw children relative to themselves) and a monotonically increasing
/// z counter, so widgets drawn later appear on top.
pub struct Painter<'a> {
    draw_list: &'a mut DrawList,
    origin: Vec2,
    z: i32,
}

impl<'a> Painter<'a> {
    pub fn new(draw_list: &'a mut DrawList) -> Self {
        Self {
            draw_list,
            origin: Vec2::zero(),
            z: 0,
        }
    }

    // ── drawing ───────────────────────────────────────────────────────────

    /// Solid axis-aligned rectangle.
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let z = self.next_z();
        self.draw_list
            .push_solid_rect(z, rect.translated(self.origin), color);
    }

    /// Rectangle with fill and optional border stroke.
    pub fn rect(&mut self, rect: Rect, fill: Color, border: Option<Border>) {
        let z = self.next_z();
        self.draw_list
            .push_rect(z, rect.translated(self.origin), fill, border);
    }

    /// Border stroke only.
    pub fn border(&mut self, rect: Rect, border: Border) {
        let z = self.next_z();
        self.draw_list
            .push_rect(z, rect.translated(self.origin), Color::transparent(), Some(border));
    }

    /// Text block with top-left at `origin` (widget-local).
    pub fn text(&mut self, text: &str, size: f32, color: Color, origin: Vec2, max_width: Option<f32>) {
        let z = self.next_z();
        self.draw_list
            .push_text(z, text, size, color, origin + self.origin, max_width);
    }

    // ── scoping ───────────────────────────────────────────────────────────

    /// Draws through `f` with everything translated by `delta`.
    pub fn with_offset(&mut self, delta: Vec2, f: impl FnOnce(&mut Painter<'_>)) {
        let mut nested = Painter {
            draw_list: self.draw_list,
            origin: self.origin + delta,
            z: self.z,
        };
        f(&mut nested);
        self.z = nested.z;
    }

    /// Draws through `f` clipped to `rect` (widget-local coordinates).
    pub fn with_clip(&mut self, rect: Rect, f: impl FnOnce(&mut Painter<'_>)) {
        self.draw_list.push_clip(rect.translated(self.origin));
        f(self);
        self.draw_list.pop_clip();
    }

    fn next_z(&mut self) -> ZIndex {
        let z = ZIndex(self.z);
        self.z += 1;
        z
    }
}
