use sigil_engine::coords::{Rect, Vec2};
use sigil_engine::paint::Color;
use sigil_engine::scene::Border;

use crate::callback::Signal;
use crate::event::{Event, EventResult};
use crate::painter::Painter;
use crate::theme::Theme;
use crate::widget::{EventCtx, Widget, WidgetId};
use crate::widgets::Padding;

/// Push button.
///
/// Emits `Pressed` on pointer-down inside its bounds and `Clicked` when
/// the pointer is released inside them. A release outside cancels the
/// press without a callback.
#[derive(Debug, Clone)]
pub struct Button {
    id: WidgetId,
    callback_id: u32,
    bounds: Rect,

    text: String,
    text_size: f32,
    text_color: Option<Color>,
    fill: Option<Color>,
    fill_hover: Option<Color>,
    fill_pressed: Option<Color>,
    border: Option<Border>,
    padding: Padding,

    pressed: bool,
    hovered: bool,
}

impl Button {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let text_size = 14.0;
        let padding = Padding::new(12.0, 6.0, 12.0, 6.0);
        let width = text.chars().count() as f32 * text_size * 0.6 + padding.horizontal();
        let height = text_size * 1.4 + padding.vertical();

        Self {
            id: WidgetId::new(),
            callback_id: 0,
            bounds: Rect::from_origin_size(Vec2::zero(), Vec2::new(width, height)),
            text,
            text_size,
            text_color: None,
            fill: None,
            fill_hover: None,
            fill_pressed: None,
            border: None,
            padding,
            pressed: false,
            hovered: false,
        }
    }

    // ── builders ──────────────────────────────────────────────────────────

    pub fn with_position(mut self, position: Vec2) -> Self {
        self.bounds.origin = position;
        self
    }

    pub fn with_size(mut self, size: Vec2) -> Self {
        self.bounds.size = size;
        self
    }

    pub fn with_callback_id(mut self, id: u32) -> Self {
        self.callback_id = id;
        self
    }

    pub fn with_fill(mut self, color: Color) -> Self {
        self.fill = Some(color);
        self
    }

    pub fn with_border(mut self, border: Border) -> Self {
        self.border = Some(border);
        self
    }

    // ── state ─────────────────────────────────────────────────────────────

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    fn contains(&self, x: i32, y: i32) -> bool {
        self.bounds.contains(Vec2::new(x as f32, y as f32))
    }

    fn current_fill(&self) -> Color {
        let base = self.fill.unwrap_or_else(|| Theme::default().accent);
        if self.pressed {
            self.fill_pressed.unwrap_or_else(|| darken(base, 0.75))
        } else if self.hovered {
            self.fill_hover.unwrap_or(base)
        } else {
            base
        }
    }
}

/// Scales the color components, keeping alpha (valid for premultiplied
/// colors as long as `factor <= 1`).
fn darken(c: Color, factor: f32) -> Color {
    Color::from_premul(c.r * factor, c.g * factor, c.b * factor, c.a)
}

impl Widget for Button {
    fn id(&self) -> WidgetId {
        self.id
    }

    fn callback_id(&self) -> u32 {
        self.callback_id
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_position(&mut self, position: Vec2) {
        self.bounds.origin = position;
    }

    fn handle_event(&mut self, event: &Event, ctx: &mut EventCtx) -> EventResult {
        match event {
            Event::PointerMoved { x, y } => {
                self.hovered = self.contains(*x, *y);
                EventResult::Ignored
            }

            Event::PointerPressed { x, y, .. } if self.contains(*x, *y) => {
                self.pressed = true;
                ctx.emit(self.id, self.callback_id, Signal::Pressed, None, Some((*x, *y)));
                EventResult::Consumed
            }

            Event::PointerReleased { x, y, .. } if self.pressed => {
                self.pressed = false;
                ctx.emit(self.id, self.callback_id, Signal::Released, None, Some((*x, *y)));
                if self.contains(*x, *y) {
                    ctx.emit(
                        self.id,
                        self.callback_id,
                        Signal::Clicked,
                        Some(self.text.clone()),
                        Some((*x, *y)),
                    );
                }
                EventResult::Consumed
            }

            _ => EventResult::Ignored,
        }
    }

    fn draw(&self, painter: &mut Painter<'_>) {
        painter.rect(self.bounds, self.current_fill(), self.border);

        let color = self.text_color.unwrap_or_else(|| Theme::default().text_color);
        let origin = self.bounds.origin + Vec2::new(self.padding.left, self.padding.top);
        let max_width = self.bounds.size.x - self.padding.horizontal();
        painter.text(&self.text, self.text_size, color, origin, Some(max_width));
    }

    fn initialize(&mut self, theme: &Theme) {
        if self.text_color.is_none() {
            self.text_color = Some(theme.text_color);
        }
        if self.fill.is_none() {
            self.fill = Some(theme.accent);
        }
        if self.border.is_none() && theme.border_width > 0.0 {
            self.border = Some(Border {
                width: theme.border_width,
                color: theme.border_color,
            });
        }
    }

    fn clone_widget(&self) -> Box<dyn Widget> {
        Box::new(self.clone())
    }

    fn payload(&self) -> Option<String> {
        Some(self.text.clone())
    }
}

#[cfg(test)]
mod tests {
    use sigil_engine::input::MouseButton;

    use super::*;

    fn press(x: i32, y: i32) -> Event {
        Event::PointerPressed { button: MouseButton::Left, x, y }
    }

    fn release(x: i32, y: i32) -> Event {
        Event::PointerReleased { button: MouseButton::Left, x, y }
    }

    fn button() -> Button {
        Button::new("ok")
            .with_position(Vec2::new(0.0, 0.0))
            .with_size(Vec2::new(60.0, 24.0))
            .with_callback_id(1)
    }

    #[test]
    fn press_then_release_inside_clicks() {
        let mut b = button();
        let mut ctx = EventCtx::new();

        assert!(b.handle_event(&press(10, 10), &mut ctx).is_consumed());
        assert!(b.handle_event(&release(10, 10), &mut ctx).is_consumed());

        let signals: Vec<Signal> = ctx.drain().map(|c| c.signal).collect();
        assert_eq!(signals, vec![Signal::Pressed, Signal::Released, Signal::Clicked]);
    }

    #[test]
    fn release_outside_cancels() {
        let mut b = button();
        let mut ctx = EventCtx::new();

        b.handle_event(&press(10, 10), &mut ctx);
        b.handle_event(&release(200, 200), &mut ctx);

        let signals: Vec<Signal> = ctx.drain().map(|c| c.signal).collect();
        assert_eq!(signals, vec![Signal::Pressed, Signal::Released]);
        assert!(!b.is_pressed());
    }

    #[test]
    fn press_outside_is_ignored() {
        let mut b = button();
        let mut ctx = EventCtx::new();

        assert_eq!(b.handle_event(&press(200, 200), &mut ctx), EventResult::Ignored);
        assert_eq!(ctx.drain().count(), 0);
    }

    #[test]
    fn hover_tracks_pointer() {
        let mut b = button();
        let mut ctx = EventCtx::new();

        b.handle_event(&Event::PointerMoved { x: 10, y: 10 }, &mut ctx);
        assert!(b.hovered);
        b.handle_event(&Event::PointerMoved { x: 200, y: 10 }, &mut ctx);
        assert!(!b.hovered);
    }

    #[test]
    fn theme_fills_in_unset_colors() {
        let mut b = Button::new("ok");
        let theme = Theme::default();
        b.initialize(&theme);
        assert_eq!(b.fill, Some(theme.accent));
        assert_eq!(b.text_color, Some(theme.text_color));
    }
}
