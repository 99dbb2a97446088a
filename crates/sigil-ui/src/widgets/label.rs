use sigil_engine::coords::{Rect, Vec2};
use sigil_engine::paint::Color;
use sigil_engine::scene::Border;

use crate::callback::Signal;
use crate::event::{Event, EventResult};
use crate::painter::Painter;
use crate::theme::Theme;
use crate::widget::{EventCtx, Widget, WidgetId};
use crate::widgets::Padding;

/// Static text, optionally with a background fill and border.
///
/// Labels size themselves from their text unless an explicit size is
/// set. They are click-transparent by default but report `Clicked` when
/// given a callback id, carrying their text as payload.
#[derive(Debug, Clone)]
pub struct Label {
    id: WidgetId,
    callback_id: u32,
    bounds: Rect,
    explicit_size: bool,

    text: String,
    text_size: f32,
    text_color: Option<Color>,
    background: Option<Color>,
    border: Option<Border>,
    padding: Padding,

    pressed: bool,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        let mut label = Self {
            id: WidgetId::new(),
            callback_id: 0,
            bounds: Rect::default(),
            explicit_size: false,
            text: text.into(),
            text_size: 14.0,
            text_color: None,
            background: None,
            border: None,
            padding: Padding::uniform(2.0),
            pressed: false,
        };
        label.autosize();
        label
    }

    // ── builders ──────────────────────────────────────────────────────────

    pub fn with_position(mut self, position: Vec2) -> Self {
        self.bounds.origin = position;
        self
    }

    pub fn with_size(mut self, size: Vec2) -> Self {
        self.bounds.size = size;
        self.explicit_size = true;
        self
    }

    pub fn with_text_size(mut self, size: f32) -> Self {
        self.text_size = size;
        self.autosize();
        self
    }

    pub fn with_text_color(mut self, color: Color) -> Self {
        self.text_color = Some(color);
        self
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn with_border(mut self, border: Border) -> Self {
        self.border = Some(border);
        self
    }

    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self.autosize();
        self
    }

    /// Attaches a callback id; the label then consumes clicks and emits
    /// `Clicked`.
    pub fn with_callback_id(mut self, id: u32) -> Self {
        self.callback_id = id;
        self
    }

    // ── state ─────────────────────────────────────────────────────────────

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.autosize();
    }

    /// Estimated text extent until real glyph metrics are wired up.
    /// Average advance of ~0.6em works for the interim rect rendering.
    fn autosize(&mut self) {
        if self.explicit_size {
            return;
        }
        let width = self.text.chars().count() as f32 * self.text_size * 0.6;
        let height = self.text_size * 1.4;
        self.bounds.size = Vec2::new(
            width + self.padding.horizontal(),
            height + self.padding.vertical(),
        );
    }

    fn contains(&self, x: i32, y: i32) -> bool {
        self.bounds.contains(Vec2::new(x as f32, y as f32))
    }
}

impl Widget for Label {
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
        // Labels without a callback id stay click-transparent.
        if self.callback_id == 0 {
            return EventResult::Ignored;
        }

        match event {
            Event::PointerPressed { x, y, .. } if self.contains(*x, *y) => {
                self.pressed = true;
                EventResult::Consumed
            }
            Event::PointerReleased { x, y, .. } if self.pressed => {
                self.pressed = false;
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
        if self.background.is_some() || self.border.is_some() {
            painter.rect(
                self.bounds,
                self.background.unwrap_or_else(Color::transparent),
                self.border,
            );
        }

        let color = self.text_color.unwrap_or_else(|| Theme::default().text_color);
        let origin = self.bounds.origin + Vec2::new(self.padding.left, self.padding.top);
        let max_width = self.bounds.size.x - self.padding.horizontal();
        painter.text(&self.text, self.text_size, color, origin, Some(max_width));
    }

    fn initialize(&mut self, theme: &Theme) {
        if self.text_color.is_none() {
            self.text_color = Some(theme.text_color);
        }
        if (self.text_size - 14.0).abs() < f32::EPSILON {
            self.text_size = theme.text_size;
            self.autosize();
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

    #[test]
    fn sizes_itself_from_text() {
        let short = Label::new("hi");
        let long = Label::new("a considerably longer line");
        assert!(long.bounds().size.x > short.bounds().size.x);
        assert!(short.bounds().size.y > 0.0);
    }

    #[test]
    fn explicit_size_wins_over_autosize() {
        let mut label = Label::new("hi").with_size(Vec2::new(200.0, 40.0));
        label.set_text("a much longer replacement text");
        assert_eq!(label.bounds().size, Vec2::new(200.0, 40.0));
    }

    #[test]
    fn without_callback_id_events_pass_through() {
        let mut label = Label::new("hi").with_position(Vec2::new(0.0, 0.0));
        let mut ctx = EventCtx::new();
        assert_eq!(label.handle_event(&press(1, 1), &mut ctx), EventResult::Ignored);
    }

    #[test]
    fn click_emits_with_text_payload() {
        let mut label = Label::new("save")
            .with_position(Vec2::new(0.0, 0.0))
            .with_size(Vec2::new(50.0, 20.0))
            .with_callback_id(7);
        let mut ctx = EventCtx::new();

        label.handle_event(&press(5, 5), &mut ctx);
        label.handle_event(&release(5, 5), &mut ctx);

        let cbs: Vec<_> = ctx.drain().collect();
        assert_eq!(cbs.len(), 1);
        assert_eq!(cbs[0].signal, Signal::Clicked);
        assert_eq!(cbs[0].id, 7);
        assert_eq!(cbs[0].text.as_deref(), Some("save"));
        assert_eq!(cbs[0].position, Some((5, 5)));
    }

    #[test]
    fn release_outside_cancels_the_click() {
        let mut label = Label::new("save")
            .with_position(Vec2::new(0.0, 0.0))
            .with_size(Vec2::new(50.0, 20.0))
            .with_callback_id(7);
        let mut ctx = EventCtx::new();

        label.handle_event(&press(5, 5), &mut ctx);
        label.handle_event(&release(500, 500), &mut ctx);

        assert_eq!(ctx.drain().count(), 0);
    }

    #[test]
    fn theme_fills_in_unset_text_color() {
        let mut label = Label::new("hi");
        let theme = Theme::default();
        label.initialize(&theme);
        assert_eq!(label.text_color, Some(theme.text_color));
    }
}
