use sigil_engine::coords::{Rect, Vec2};
use sigil_engine::paint::Color;
use sigil_engine::scene::Border;
use std::time::Duration;

use crate::event::{Event, EventResult};
use crate::painter::Painter;
use crate::theme::Theme;
use crate::widget::{Element, EventCtx, Widget, WidgetId};

/// Rectangular container grouping child widgets.
///
/// Children live in panel-local coordinates. Events are rebased before
/// forwarding and offered topmost-first; drawing clips children to the
/// panel bounds.
#[derive(Clone)]
pub struct Panel {
    id: WidgetId,
    callback_id: u32,
    bounds: Rect,

    fill: Option<Color>,
    border: Option<Border>,

    children: Vec<Element>,
}

impl Panel {
    pub fn new(bounds: Rect) -> Self {
        Self {
            id: WidgetId::new(),
            callback_id: 0,
            bounds,
            fill: None,
            border: None,
            children: Vec::new(),
        }
    }

    pub fn with_fill(mut self, color: Color) -> Self {
        self.fill = Some(color);
        self
    }

    pub fn with_border(mut self, border: Border) -> Self {
        self.border = Some(border);
        self
    }

    /// Adds a child on top of the existing ones. Returns its id.
    pub fn add<W: Widget>(&mut self, widget: W) -> WidgetId {
        let element = Element::new(widget);
        let id = element.id();
        self.children.push(element);
        id
    }

    pub fn remove(&mut self, id: WidgetId) -> bool {
        let before = self.children.len();
        self.children.retain(|c| c.id() != id);
        self.children.len() != before
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    fn contains(&self, x: i32, y: i32) -> bool {
        self.bounds.contains(Vec2::new(x as f32, y as f32))
    }

    /// Rebases a scene-coordinate event into panel-local coordinates.
    fn rebase(&self, event: &Event) -> Event {
        let dx = self.bounds.origin.x as i32;
        let dy = self.bounds.origin.y as i32;
        match event.clone() {
            Event::PointerMoved { x, y } => Event::PointerMoved { x: x - dx, y: y - dy },
            Event::PointerPressed { button, x, y } => {
                Event::PointerPressed { button, x: x - dx, y: y - dy }
            }
            Event::PointerReleased { button, x, y } => {
                Event::PointerReleased { button, x: x - dx, y: y - dy }
            }
            Event::WheelScrolled { delta, x, y } => {
                Event::WheelScrolled { delta, x: x - dx, y: y - dy }
            }
            other => other,
        }
    }
}

impl Widget for Panel {
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
        // Positioned events outside the panel never reach children, except
        // releases: a child holding an in-progress press must see the
        // release wherever it lands, or it would stay pressed forever.
        match event {
            Event::PointerMoved { x, y }
            | Event::PointerPressed { x, y, .. }
            | Event::WheelScrolled { x, y, .. }
                if !self.contains(*x, *y) =>
            {
                return EventResult::Ignored;
            }
            _ => {}
        }

        let local = self.rebase(event);
        for child in self.children.iter_mut().rev() {
            if child.handle_event(&local, ctx).is_consumed() {
                return EventResult::Consumed;
            }
        }

        // An opaque panel swallows pointer presses on its body.
        match event {
            Event::PointerPressed { .. } if self.fill.is_some() => EventResult::Consumed,
            _ => EventResult::Ignored,
        }
    }

    fn update(&mut self, dt: Duration) {
        for child in &mut self.children {
            child.update(dt);
        }
    }

    fn draw(&self, painter: &mut Painter<'_>) {
        if self.fill.is_some() || self.border.is_some() {
            painter.rect(
                self.bounds,
                self.fill.unwrap_or_else(Color::transparent),
                self.border,
            );
        }

        painter.with_clip(self.bounds, |painter| {
            painter.with_offset(self.bounds.origin, |painter| {
                for child in &self.children {
                    child.draw(painter);
                }
            });
        });
    }

    fn initialize(&mut self, theme: &Theme) {
        if self.fill.is_none() {
            self.fill = Some(theme.background);
        }
        for child in &mut self.children {
            child.initialize(theme);
        }
    }

    fn clone_widget(&self) -> Box<dyn Widget> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use sigil_engine::input::MouseButton;
    use sigil_engine::scene::DrawList;

    use super::*;
    use crate::callback::Signal;
    use crate::widgets::Button;

    fn press(x: i32, y: i32) -> Event {
        Event::PointerPressed { button: MouseButton::Left, x, y }
    }

    fn release(x: i32, y: i32) -> Event {
        Event::PointerReleased { button: MouseButton::Left, x, y }
    }

    fn panel_with_button() -> (Panel, WidgetId) {
        let mut panel = Panel::new(Rect::new(100.0, 100.0, 200.0, 200.0));
        let id = panel.add(
            Button::new("ok")
                .with_position(Vec2::new(10.0, 10.0))
                .with_size(Vec2::new(50.0, 20.0))
                .with_callback_id(1),
        );
        (panel, id)
    }

    #[test]
    fn events_are_rebased_into_child_coordinates() {
        let (mut panel, child) = panel_with_button();
        let mut ctx = EventCtx::new();

        // Scene (120, 115) is child-local (20, 15), inside the button.
        panel.handle_event(&press(120, 115), &mut ctx);
        panel.handle_event(&release(120, 115), &mut ctx);

        let cbs: Vec<_> = ctx.drain().collect();
        assert!(cbs.iter().any(|c| c.signal == Signal::Clicked && c.source == child));
        // Positions reported by the child are panel-local.
        assert_eq!(
            cbs.iter().find(|c| c.signal == Signal::Clicked).and_then(|c| c.position),
            Some((20, 15))
        );
    }

    #[test]
    fn events_outside_the_panel_are_ignored() {
        let (mut panel, _) = panel_with_button();
        let mut ctx = EventCtx::new();

        assert_eq!(panel.handle_event(&press(10, 10), &mut ctx), EventResult::Ignored);
        assert_eq!(ctx.drain().count(), 0);
    }

    #[test]
    fn topmost_child_wins_when_overlapping() {
        let mut panel = Panel::new(Rect::new(0.0, 0.0, 200.0, 200.0));
        let bottom = panel.add(
            Button::new("a")
                .with_position(Vec2::new(10.0, 10.0))
                .with_size(Vec2::new(50.0, 20.0))
                .with_callback_id(1),
        );
        let top = panel.add(
            Button::new("b")
                .with_position(Vec2::new(10.0, 10.0))
                .with_size(Vec2::new(50.0, 20.0))
                .with_callback_id(2),
        );
        let mut ctx = EventCtx::new();

        panel.handle_event(&press(20, 20), &mut ctx);

        let cbs: Vec<_> = ctx.drain().collect();
        assert_eq!(cbs.len(), 1);
        assert_eq!(cbs[0].source, top);
        assert_ne!(cbs[0].source, bottom);
    }

    #[test]
    fn release_outside_the_panel_cancels_a_pressed_child() {
        let (mut panel, _) = panel_with_button();
        let mut ctx = EventCtx::new();

        // Press the button, then release far outside the panel. The child
        // must see the release so the press cycle ends there.
        panel.handle_event(&press(120, 115), &mut ctx);
        panel.handle_event(&release(500, 500), &mut ctx);

        let signals: Vec<Signal> = ctx.drain().map(|c| c.signal).collect();
        assert_eq!(signals, vec![Signal::Pressed, Signal::Released]);

        // A later bare release over the button is not a click.
        panel.handle_event(&release(120, 115), &mut ctx);
        assert_eq!(ctx.drain().count(), 0);
    }

    #[test]
    fn opaque_panel_swallows_presses_on_its_body() {
        let (mut panel, _) = panel_with_button();
        panel.fill = Some(Color::from_premul(0.1, 0.1, 0.1, 1.0));
        let mut ctx = EventCtx::new();

        // Inside the panel, outside the button.
        assert!(panel.handle_event(&press(290, 290), &mut ctx).is_consumed());
    }

    #[test]
    fn draw_offsets_and_clips_children() {
        let (mut panel, _) = panel_with_button();
        panel.fill = None;

        let mut list = DrawList::new();
        let mut p = Painter::new(&mut list);
        panel.draw(&mut p);

        // Child button at local (10, 10) lands at scene (110, 110), clipped
        // to the panel bounds.
        let items = list.items();
        assert!(!items.is_empty());
        for item in items {
            assert_eq!(item.clip_rect, Some(Rect::new(100.0, 100.0, 200.0, 200.0)));
        }
    }

    #[test]
    fn initialize_reaches_children() {
        let (mut panel, _) = panel_with_button();
        let theme = Theme::default();
        panel.initialize(&theme);
        assert_eq!(panel.fill, Some(theme.background));
    }

    #[test]
    fn remove_drops_the_child() {
        let (mut panel, child) = panel_with_button();
        assert!(panel.remove(child));
        assert!(panel.children().is_empty());
        assert!(!panel.remove(child));
    }
}
