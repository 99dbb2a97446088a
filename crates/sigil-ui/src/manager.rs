//! Event routing, focus, and the double-click state machine.

use std::time::Duration;

use sigil_engine::coords::Vec2;

use crate::callback::{Callback, Signal};
use crate::event::{Event, EventResult};
use crate::painter::Painter;
use crate::widget::{Element, EventCtx, WidgetId};

/// Default time window for a second click to count as a double-click.
pub const DEFAULT_DOUBLE_CLICK_THRESHOLD: Duration = Duration::from_millis(500);

/// A click waiting for its potential second half.
///
/// Only one click can be pending at a time; a qualifying click on a
/// different widget replaces it.
#[derive(Debug, Clone, Copy)]
struct PendingClick {
    source: WidgetId,
    deadline: Duration,
}

/// Owns the widget list and routes corrected events through it.
///
/// Ordering: widgets render in insertion order, so the last added is
/// topmost; hit-testing therefore walks in reverse insertion order.
pub struct EventManager {
    widgets: Vec<Element>,
    focused: Option<WidgetId>,

    /// Accumulated time advanced by [`update_time`](Self::update_time).
    now: Duration,
    pending_click: Option<PendingClick>,
    double_click_threshold: Duration,

    ctx: EventCtx,
}

impl EventManager {
    pub fn new() -> Self {
        Self {
            widgets: Vec::new(),
            focused: None,
            now: Duration::ZERO,
            pending_click: None,
            double_click_threshold: DEFAULT_DOUBLE_CLICK_THRESHOLD,
            ctx: EventCtx::new(),
        }
    }

    // ── widget list ───────────────────────────────────────────────────────

    /// Adds a widget on top of the existing ones. Returns its id.
    pub fn add(&mut self, widget: Element) -> WidgetId {
        let id = widget.id();
        self.widgets.push(widget);
        id
    }

    /// Removes a widget; clears focus and pending click state referring to it.
    pub fn remove(&mut self, id: WidgetId, sink: &mut Vec<Callback>) {
        if self.focused == Some(id) {
            self.set_focus(None, sink);
        }
        if self.pending_click.as_ref().is_some_and(|p| p.source == id) {
            self.pending_click = None;
        }

        let before = self.widgets.len();
        self.widgets.retain(|w| w.id() != id);
        if self.widgets.len() == before {
            log::warn!("remove: widget {id:?} not in the hierarchy");
        }
    }

    pub fn widgets(&self) -> &[Element] {
        &self.widgets
    }

    pub fn widgets_mut(&mut self) -> &mut [Element] {
        &mut self.widgets
    }

    pub fn focused(&self) -> Option<WidgetId> {
        self.focused
    }

    /// Time window for double-click detection.
    pub fn double_click_threshold(&self) -> Duration {
        self.double_click_threshold
    }

    pub fn set_double_click_threshold(&mut self, threshold: Duration) {
        self.double_click_threshold = threshold;
    }

    // ── focus ─────────────────────────────────────────────────────────────

    /// Moves focus, emitting `Unfocused` for the old widget and `Focused`
    /// for the new one.
    pub fn set_focus(&mut self, target: Option<WidgetId>, sink: &mut Vec<Callback>) {
        if self.focused == target {
            return;
        }

        if let Some(old) = self.focused {
            if let Some(w) = self.widgets.iter().find(|w| w.id() == old) {
                sink.push(Callback {
                    source: old,
                    id: w.callback_id(),
                    signal: Signal::Unfocused,
                    text: w.payload(),
                    position: None,
                });
            }
        }

        self.focused = target;

        if let Some(new) = target {
            if let Some(w) = self.widgets.iter().find(|w| w.id() == new) {
                sink.push(Callback {
                    source: new,
                    id: w.callback_id(),
                    signal: Signal::Focused,
                    text: w.payload(),
                    position: None,
                });
            }
        }
    }

    // ── time ──────────────────────────────────────────────────────────────

    /// Advances the manager clock, expires a stale pending click, and
    /// forwards `update(dt)` to every widget. Called once per frame.
    pub fn update_time(&mut self, dt: Duration) {
        self.now += dt;

        if self
            .pending_click
            .as_ref()
            .is_some_and(|p| self.now >= p.deadline)
        {
            self.pending_click = None;
        }

        for w in &mut self.widgets {
            w.update(dt);
        }
    }

    // ── dispatch ──────────────────────────────────────────────────────────

    /// Routes a corrected event through the hierarchy, appending any
    /// produced callbacks to `sink`.
    pub fn handle_event(&mut self, event: &Event, sink: &mut Vec<Callback>) {
        match event {
            Event::KeyPressed { .. } | Event::KeyReleased { .. } | Event::TextEntered { .. } => {
                // Keyboard activity is unrelated to a click-in-progress.
                self.pending_click = None;
                self.dispatch_to_focused(event);
            }

            Event::PointerPressed { x, y, .. } => {
                let target = self.hit_test(*x, *y);

                // A press outside the pending widget abandons the pending click.
                if self
                    .pending_click
                    .as_ref()
                    .is_some_and(|p| Some(p.source) != target)
                {
                    self.pending_click = None;
                }

                self.set_focus(target, sink);

                if let Some(id) = target {
                    self.dispatch_to(id, event);
                }
            }

            Event::PointerReleased { x, y, .. } => {
                // The focused widget owns an in-progress press even when the
                // release lands outside it.
                if !self.dispatch_to_focused(event) {
                    if let Some(id) = self.hit_test(*x, *y) {
                        self.dispatch_to(id, event);
                    }
                }
            }

            Event::PointerMoved { x, y } | Event::WheelScrolled { x, y, .. } => {
                if !self.dispatch_to_focused(event) {
                    if let Some(id) = self.hit_test(*x, *y) {
                        self.dispatch_to(id, event);
                    }
                }
            }

            // Surface-level events are handled by the Gui, not the widgets.
            Event::Resized { .. } | Event::FocusChanged(_) | Event::Closed => {}
        }

        self.collect_callbacks(sink);
    }

    /// Draws every widget in insertion order (bottom to top).
    pub fn draw(&self, painter: &mut Painter<'_>) {
        for w in &self.widgets {
            w.draw(painter);
        }
    }

    /// Topmost widget containing `(x, y)`, if any.
    fn hit_test(&self, x: i32, y: i32) -> Option<WidgetId> {
        let p = Vec2::new(x as f32, y as f32);
        self.widgets
            .iter()
            .rev()
            .find(|w| w.bounds().contains(p))
            .map(|w| w.id())
    }

    fn dispatch_to(&mut self, id: WidgetId, event: &Event) -> bool {
        let Some(w) = self.widgets.iter_mut().find(|w| w.id() == id) else {
            return false;
        };
        w.handle_event(event, &mut self.ctx) == EventResult::Consumed
    }

    fn dispatch_to_focused(&mut self, event: &Event) -> bool {
        match self.focused {
            Some(id) => self.dispatch_to(id, event),
            None => false,
        }
    }

    /// Drains widget-emitted callbacks into `sink`, feeding `Clicked`
    /// signals through the double-click state machine.
    fn collect_callbacks(&mut self, sink: &mut Vec<Callback>) {
        let emitted: Vec<Callback> = self.ctx.drain().collect();

        for cb in emitted {
            let is_click = cb.signal == Signal::Clicked;
            let source = cb.source;

            if is_click {
                let completes_double = self
                    .pending_click
                    .as_ref()
                    .is_some_and(|p| p.source == source && self.now < p.deadline);

                if completes_double {
                    let mut double = cb.clone();
                    double.signal = Signal::DoubleClicked;
                    sink.push(cb);
                    sink.push(double);
                    self.pending_click = None;
                    continue;
                }

                self.pending_click = Some(PendingClick {
                    source,
                    deadline: self.now + self.double_click_threshold,
                });
            }

            sink.push(cb);
        }
    }
}

impl Default for EventManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use sigil_engine::coords::Rect;
    use sigil_engine::input::MouseButton;

    use super::*;
    use crate::widget::Widget;

    /// Minimal clickable area: consumes press/release inside its bounds
    /// and emits `Clicked` on release.
    #[derive(Clone)]
    struct ClickPad {
        id: WidgetId,
        callback_id: u32,
        bounds: Rect,
        pressed: bool,
    }

    impl ClickPad {
        fn new(callback_id: u32, bounds: Rect) -> Self {
            Self {
                id: WidgetId::new(),
                callback_id,
                bounds,
                pressed: false,
            }
        }
    }

    impl Widget for ClickPad {
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
                Event::PointerPressed { x, y, .. }
                    if self.bounds.contains(Vec2::new(*x as f32, *y as f32)) =>
                {
                    self.pressed = true;
                    EventResult::Consumed
                }
                Event::PointerReleased { x, y, .. } if self.pressed => {
                    self.pressed = false;
                    if self.bounds.contains(Vec2::new(*x as f32, *y as f32)) {
                        ctx.emit(
                            self.id,
                            self.callback_id,
                            Signal::Clicked,
                            None,
                            Some((*x, *y)),
                        );
                    }
                    EventResult::Consumed
                }
                _ => EventResult::Ignored,
            }
        }

        fn draw(&self, _painter: &mut Painter<'_>) {}

        fn clone_widget(&self) -> Box<dyn Widget> {
            Box::new(self.clone())
        }
    }

    fn press(x: i32, y: i32) -> Event {
        Event::PointerPressed { button: MouseButton::Left, x, y }
    }

    fn release(x: i32, y: i32) -> Event {
        Event::PointerReleased { button: MouseButton::Left, x, y }
    }

    fn click(mgr: &mut EventManager, sink: &mut Vec<Callback>, x: i32, y: i32) {
        mgr.handle_event(&press(x, y), sink);
        mgr.handle_event(&release(x, y), sink);
    }

    fn signals(sink: &[Callback]) -> Vec<Signal> {
        sink.iter().map(|c| c.signal).collect()
    }

    fn count(sink: &[Callback], signal: Signal) -> usize {
        sink.iter().filter(|c| c.signal == signal).count()
    }

    // ── double-click ──────────────────────────────────────────────────────

    #[test]
    fn second_click_within_threshold_emits_one_double_click() {
        let mut mgr = EventManager::new();
        mgr.add(Element::new(ClickPad::new(1, Rect::new(0.0, 0.0, 100.0, 100.0))));
        let mut sink = Vec::new();

        let threshold = mgr.double_click_threshold();

        click(&mut mgr, &mut sink, 10, 10);
        mgr.update_time(threshold.mul_f32(0.3));
        click(&mut mgr, &mut sink, 10, 10);

        assert_eq!(count(&sink, Signal::DoubleClicked), 1);
        assert_eq!(count(&sink, Signal::Clicked), 2);
    }

    #[test]
    fn second_click_after_threshold_emits_no_double_click() {
        let mut mgr = EventManager::new();
        mgr.add(Element::new(ClickPad::new(1, Rect::new(0.0, 0.0, 100.0, 100.0))));
        let mut sink = Vec::new();

        let threshold = mgr.double_click_threshold();

        click(&mut mgr, &mut sink, 10, 10);
        mgr.update_time(threshold.mul_f32(1.5));
        click(&mut mgr, &mut sink, 10, 10);

        assert_eq!(count(&sink, Signal::DoubleClicked), 0);
    }

    #[test]
    fn third_click_starts_a_new_cycle() {
        let mut mgr = EventManager::new();
        mgr.add(Element::new(ClickPad::new(1, Rect::new(0.0, 0.0, 100.0, 100.0))));
        let mut sink = Vec::new();

        // Triple click: clicks 1+2 pair into a double; click 3 starts over.
        click(&mut mgr, &mut sink, 10, 10);
        click(&mut mgr, &mut sink, 10, 10);
        click(&mut mgr, &mut sink, 10, 10);

        assert_eq!(count(&sink, Signal::DoubleClicked), 1);
    }

    #[test]
    fn key_press_between_clicks_resets_the_pending_click() {
        let mut mgr = EventManager::new();
        mgr.add(Element::new(ClickPad::new(1, Rect::new(0.0, 0.0, 100.0, 100.0))));
        let mut sink = Vec::new();

        click(&mut mgr, &mut sink, 10, 10);
        mgr.handle_event(
            &Event::KeyPressed {
                key: sigil_engine::input::Key::A,
                modifiers: Default::default(),
            },
            &mut sink,
        );
        click(&mut mgr, &mut sink, 10, 10);

        assert_eq!(count(&sink, Signal::DoubleClicked), 0);
    }

    #[test]
    fn press_on_another_widget_resets_the_pending_click() {
        let mut mgr = EventManager::new();
        mgr.add(Element::new(ClickPad::new(1, Rect::new(0.0, 0.0, 50.0, 50.0))));
        mgr.add(Element::new(ClickPad::new(2, Rect::new(100.0, 0.0, 50.0, 50.0))));
        let mut sink = Vec::new();

        click(&mut mgr, &mut sink, 10, 10);
        click(&mut mgr, &mut sink, 110, 10);
        click(&mut mgr, &mut sink, 10, 10);

        assert_eq!(count(&sink, Signal::DoubleClicked), 0);
    }

    #[test]
    fn pointer_move_does_not_reset_the_pending_click() {
        let mut mgr = EventManager::new();
        mgr.add(Element::new(ClickPad::new(1, Rect::new(0.0, 0.0, 100.0, 100.0))));
        let mut sink = Vec::new();

        click(&mut mgr, &mut sink, 10, 10);
        mgr.handle_event(&Event::PointerMoved { x: 12, y: 12 }, &mut sink);
        click(&mut mgr, &mut sink, 12, 12);

        assert_eq!(count(&sink, Signal::DoubleClicked), 1);
    }

    #[test]
    fn double_click_carries_the_click_id_and_position() {
        let mut mgr = EventManager::new();
        mgr.add(Element::new(ClickPad::new(42, Rect::new(0.0, 0.0, 100.0, 100.0))));
        let mut sink = Vec::new();

        click(&mut mgr, &mut sink, 10, 20);
        click(&mut mgr, &mut sink, 10, 20);

        let double = sink
            .iter()
            .find(|c| c.signal == Signal::DoubleClicked)
            .unwrap();
        assert_eq!(double.id, 42);
        assert_eq!(double.position, Some((10, 20)));
    }

    // ── focus & routing ───────────────────────────────────────────────────

    #[test]
    fn press_moves_focus_and_emits_focus_signals() {
        let mut mgr = EventManager::new();
        let a = mgr.add(Element::new(ClickPad::new(1, Rect::new(0.0, 0.0, 50.0, 50.0))));
        let b = mgr.add(Element::new(ClickPad::new(2, Rect::new(100.0, 0.0, 50.0, 50.0))));
        let mut sink = Vec::new();

        mgr.handle_event(&press(10, 10), &mut sink);
        assert_eq!(mgr.focused(), Some(a));
        assert_eq!(signals(&sink), vec![Signal::Focused]);

        sink.clear();
        mgr.handle_event(&press(110, 10), &mut sink);
        assert_eq!(mgr.focused(), Some(b));
        assert_eq!(signals(&sink), vec![Signal::Unfocused, Signal::Focused]);
    }

    #[test]
    fn press_on_empty_space_clears_focus() {
        let mut mgr = EventManager::new();
        mgr.add(Element::new(ClickPad::new(1, Rect::new(0.0, 0.0, 50.0, 50.0))));
        let mut sink = Vec::new();

        mgr.handle_event(&press(10, 10), &mut sink);
        mgr.handle_event(&release(10, 10), &mut sink);
        sink.clear();

        mgr.handle_event(&press(500, 500), &mut sink);
        assert_eq!(mgr.focused(), None);
        assert_eq!(signals(&sink), vec![Signal::Unfocused]);
    }

    #[test]
    fn overlapping_widgets_route_to_the_topmost() {
        let mut mgr = EventManager::new();
        let _bottom = mgr.add(Element::new(ClickPad::new(1, Rect::new(0.0, 0.0, 100.0, 100.0))));
        let top = mgr.add(Element::new(ClickPad::new(2, Rect::new(0.0, 0.0, 100.0, 100.0))));
        let mut sink = Vec::new();

        click(&mut mgr, &mut sink, 10, 10);

        let clicked: Vec<WidgetId> = sink
            .iter()
            .filter(|c| c.signal == Signal::Clicked)
            .map(|c| c.source)
            .collect();
        assert_eq!(clicked, vec![top]);
    }

    #[test]
    fn key_events_go_only_to_the_focused_widget() {
        let mut mgr = EventManager::new();

        /// Records whether it ever saw a key event.
        #[derive(Clone)]
        struct KeySpy {
            id: WidgetId,
            bounds: Rect,
            seen: std::rc::Rc<std::cell::Cell<u32>>,
        }

        impl Widget for KeySpy {
            fn id(&self) -> WidgetId {
                self.id
            }
            fn callback_id(&self) -> u32 {
                0
            }
            fn bounds(&self) -> Rect {
                self.bounds
            }
            fn set_position(&mut self, position: Vec2) {
                self.bounds.origin = position;
            }
            fn handle_event(&mut self, event: &Event, _ctx: &mut EventCtx) -> EventResult {
                match event {
                    Event::KeyPressed { .. } => {
                        self.seen.set(self.seen.get() + 1);
                        EventResult::Consumed
                    }
                    Event::PointerPressed { .. } => EventResult::Consumed,
                    _ => EventResult::Ignored,
                }
            }
            fn draw(&self, _painter: &mut Painter<'_>) {}
            fn clone_widget(&self) -> Box<dyn Widget> {
                Box::new(self.clone())
            }
        }

        let seen_a = std::rc::Rc::new(std::cell::Cell::new(0));
        let seen_b = std::rc::Rc::new(std::cell::Cell::new(0));

        mgr.add(Element::new(KeySpy {
            id: WidgetId::new(),
            bounds: Rect::new(0.0, 0.0, 50.0, 50.0),
            seen: std::rc::Rc::clone(&seen_a),
        }));
        mgr.add(Element::new(KeySpy {
            id: WidgetId::new(),
            bounds: Rect::new(100.0, 0.0, 50.0, 50.0),
            seen: std::rc::Rc::clone(&seen_b),
        }));

        let mut sink = Vec::new();
        mgr.handle_event(&press(110, 10), &mut sink);
        mgr.handle_event(
            &Event::KeyPressed {
                key: sigil_engine::input::Key::Enter,
                modifiers: Default::default(),
            },
            &mut sink,
        );

        assert_eq!(seen_a.get(), 0);
        assert_eq!(seen_b.get(), 1);
    }

    #[test]
    fn update_time_expires_a_pending_click() {
        let mut mgr = EventManager::new();
        mgr.set_double_click_threshold(Duration::from_millis(100));
        mgr.add(Element::new(ClickPad::new(1, Rect::new(0.0, 0.0, 100.0, 100.0))));
        let mut sink = Vec::new();

        click(&mut mgr, &mut sink, 10, 10);
        mgr.update_time(Duration::from_millis(60));
        mgr.update_time(Duration::from_millis(60));
        click(&mut mgr, &mut sink, 10, 10);

        assert_eq!(count(&sink, Signal::DoubleClicked), 0);
    }

    #[test]
    fn removing_a_widget_clears_its_focus() {
        let mut mgr = EventManager::new();
        let a = mgr.add(Element::new(ClickPad::new(1, Rect::new(0.0, 0.0, 50.0, 50.0))));
        let mut sink = Vec::new();

        mgr.handle_event(&press(10, 10), &mut sink);
        assert_eq!(mgr.focused(), Some(a));

        sink.clear();
        mgr.remove(a, &mut sink);
        assert_eq!(mgr.focused(), None);
        assert_eq!(signals(&sink), vec![Signal::Unfocused]);
    }
}
