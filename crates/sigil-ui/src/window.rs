//! The `Gui`: a widget tree bound to a render surface.
//!
//! Wraps a [`Surface`] (owned or shared), corrects raw pixel events into
//! scene coordinates, routes them through the [`EventManager`], and
//! draws the hierarchy into the surface's draw stream.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use anyhow::Result;

use sigil_engine::coords::{Rect, Vec2, View};
use sigil_engine::input::RawEvent;
use sigil_engine::paint::Color;
use sigil_engine::surface::Surface;
use sigil_engine::time::FrameClock;

use crate::callback::{Callback, CallbackQueue, HandlerList};
use crate::event::Event;
use crate::manager::EventManager;
use crate::painter::Painter;
use crate::theme::Theme;
use crate::widget::{Element, Widget, WidgetId};

/// How the Gui holds its surface.
///
/// The variant decides destruction responsibility: an owned surface is
/// dropped with the Gui, a shared one is left alive for its other owners.
pub enum SurfaceHandle {
    Owned(Box<dyn Surface>),
    Shared(Rc<RefCell<dyn Surface>>),
}

impl SurfaceHandle {
    fn with<R>(&self, f: impl FnOnce(&dyn Surface) -> R) -> R {
        match self {
            SurfaceHandle::Owned(s) => f(s.as_ref()),
            SurfaceHandle::Shared(s) => f(&*s.borrow()),
        }
    }

    fn with_mut<R>(&mut self, f: impl FnOnce(&mut dyn Surface) -> R) -> R {
        match self {
            SurfaceHandle::Owned(s) => f(s.as_mut()),
            SurfaceHandle::Shared(s) => f(&mut *s.borrow_mut()),
        }
    }
}

/// Root of a widget hierarchy bound to one surface.
pub struct Gui {
    surface: SurfaceHandle,
    manager: EventManager,
    queue: CallbackQueue,
    handlers: HandlerList,
    clock: FrameClock,
    theme: Theme,

    /// Scratch buffer reused across dispatches.
    sink: Vec<Callback>,

    /// Last corrected pointer position, attached to wheel events
    /// (raw wheel events carry no position of their own).
    last_pointer: (i32, i32),
}

impl Gui {
    /// Creates a Gui that owns its surface; dropping the Gui frees it.
    pub fn new<S>(surface: S) -> Self
    where
        S: Surface + 'static,
    {
        Self::with_handle(SurfaceHandle::Owned(Box::new(surface)))
    }

    /// Creates a Gui over a surface shared with other owners (typically
    /// the engine runtime); dropping the Gui leaves the surface alive.
    pub fn shared(surface: Rc<RefCell<dyn Surface>>) -> Self {
        Self::with_handle(SurfaceHandle::Shared(surface))
    }

    fn with_handle(surface: SurfaceHandle) -> Self {
        Self {
            surface,
            manager: EventManager::new(),
            queue: CallbackQueue::new(),
            handlers: HandlerList::new(),
            clock: FrameClock::new(),
            theme: Theme::default(),
            sink: Vec::new(),
            last_pointer: (0, 0),
        }
    }

    // ── widgets ───────────────────────────────────────────────────────────

    /// Adds a widget on top of the existing ones, handing it the theme.
    /// Returns its id.
    pub fn add<W: Widget>(&mut self, mut widget: W) -> WidgetId {
        widget.initialize(&self.theme);
        self.manager.add(Element::new(widget))
    }

    pub fn remove(&mut self, id: WidgetId) {
        let mut sink = std::mem::take(&mut self.sink);
        self.manager.remove(id, &mut sink);
        self.route_sink(&mut sink);
        self.sink = sink;
    }

    /// Moves keyboard focus, emitting `Focused`/`Unfocused` callbacks.
    pub fn focus(&mut self, id: Option<WidgetId>) {
        let mut sink = std::mem::take(&mut self.sink);
        self.manager.set_focus(id, &mut sink);
        self.route_sink(&mut sink);
        self.sink = sink;
    }

    pub fn focused(&self) -> Option<WidgetId> {
        self.manager.focused()
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Sets the theme used to initialize widgets added afterwards.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn double_click_threshold(&self) -> Duration {
        self.manager.double_click_threshold()
    }

    pub fn set_double_click_threshold(&mut self, threshold: Duration) {
        self.manager.set_double_click_threshold(threshold);
    }

    // ── events ────────────────────────────────────────────────────────────

    /// Corrects a raw surface event into scene coordinates and routes it
    /// through the widget hierarchy.
    ///
    /// Pointer positions are mapped through the surface view, then rounded
    /// by adding 0.5 and truncating, so e.g. pixel (10.4, 10.6) under the
    /// identity view becomes (10, 11).
    pub fn handle_event(&mut self, raw: RawEvent) {
        let Some(event) = self.correct_event(raw) else {
            return;
        };

        let mut sink = std::mem::take(&mut self.sink);
        self.manager.handle_event(&event, &mut sink);
        self.route_sink(&mut sink);
        self.sink = sink;
    }

    fn correct_event(&mut self, raw: RawEvent) -> Option<Event> {
        use sigil_engine::input::{KeyState, MouseButtonState, WheelDelta};

        let ev = match raw {
            RawEvent::PointerMoved(m) => {
                let (x, y) = self.correct_position(m.x, m.y);
                self.last_pointer = (x, y);
                Event::PointerMoved { x, y }
            }

            RawEvent::PointerButton(b) => {
                let (x, y) = self.correct_position(b.x, b.y);
                self.last_pointer = (x, y);
                match b.state {
                    MouseButtonState::Pressed => Event::PointerPressed { button: b.button, x, y },
                    MouseButtonState::Released => Event::PointerReleased { button: b.button, x, y },
                }
            }

            RawEvent::Key(k) => match k.state {
                KeyState::Pressed => Event::KeyPressed { key: k.key, modifiers: k.modifiers },
                KeyState::Released => Event::KeyReleased { key: k.key, modifiers: k.modifiers },
            },

            RawEvent::Text(t) => Event::TextEntered { text: t.text },

            RawEvent::Wheel { delta, .. } => {
                let dy = match delta {
                    WheelDelta::Line { y, .. } => y,
                    WheelDelta::Pixel { y, .. } => y,
                };
                let (x, y) = self.last_pointer;
                Event::WheelScrolled { delta: dy, x, y }
            }

            RawEvent::Resized { width, height } => Event::Resized { width, height },
            RawEvent::Focused(f) => Event::FocusChanged(f),
            RawEvent::CloseRequested => Event::Closed,

            RawEvent::ModifiersChanged(_) | RawEvent::PointerLeft => return None,
        };

        Some(ev)
    }

    /// Maps a pixel position through the surface view and rounds half-up.
    fn correct_position(&self, x: f32, y: f32) -> (i32, i32) {
        let mapped = self
            .surface
            .with(|s| s.map_pixel_to_coords(Vec2::new(x, y)));
        ((mapped.x + 0.5) as i32, (mapped.y + 0.5) as i32)
    }

    fn route_sink(&mut self, sink: &mut Vec<Callback>) {
        for cb in sink.drain(..) {
            self.add_child_callback(cb);
        }
    }

    // ── callbacks ─────────────────────────────────────────────────────────

    /// Accepts a callback from the widget hierarchy.
    ///
    /// Queued by default; while handlers are registered, delivered to them
    /// synchronously instead. Handler registration is never retroactive
    /// for callbacks already in the queue.
    pub fn add_child_callback(&mut self, cb: Callback) {
        if self.handlers.is_empty() {
            self.queue.push(cb);
        } else {
            self.handlers.deliver(&cb);
        }
    }

    /// Removes and returns the oldest queued callback; `None` when empty.
    pub fn poll_callback(&mut self) -> Option<Callback> {
        self.queue.poll()
    }

    /// Registers a synchronous callback handler.
    pub fn register_handler<F>(&mut self, handler: F)
    where
        F: FnMut(&Callback) + 'static,
    {
        self.handlers.register(handler);
        log::debug!(
            "callback handler registered; {} queued callback(s) still drain via poll",
            self.queue.len()
        );
    }

    // ── drawing ───────────────────────────────────────────────────────────

    /// Advances widget time and records the widget hierarchy into the
    /// surface draw stream.
    ///
    /// The surface clip region is saved first; if none is active a
    /// full-surface clip is established for the duration of the draw, and
    /// the saved state is restored exactly afterwards.
    pub fn draw_gui(&mut self) {
        let dt = self.clock.restart();
        self.manager.update_time(dt);

        let manager = &self.manager;
        self.surface.with_mut(|s| {
            let saved = s.clip_region();
            let active =
                saved.unwrap_or_else(|| Rect::from_origin_size(Vec2::zero(), s.size()));
            s.set_clip_region(Some(active));

            {
                let list = s.draw_list();
                list.push_clip(active);
                let mut painter = Painter::new(list);
                manager.draw(&mut painter);
                list.pop_clip();
            }

            s.set_clip_region(saved);
        });
    }

    // ── surface pass-throughs ─────────────────────────────────────────────

    pub fn size(&self) -> Vec2 {
        self.surface.with(|s| s.size())
    }

    pub fn set_size(&mut self, size: Vec2) {
        self.surface.with_mut(|s| s.set_size(size));
    }

    pub fn position(&self) -> Vec2 {
        self.surface.with(|s| s.position())
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.surface.with_mut(|s| s.set_position(position));
    }

    pub fn set_title(&mut self, title: &str) {
        self.surface.with_mut(|s| s.set_title(title));
    }

    pub fn set_icon(&mut self, width: u32, height: u32, rgba: &[u8]) -> Result<()> {
        self.surface.with_mut(|s| s.set_icon(width, height, rgba))
    }

    pub fn set_cursor_visible(&mut self, visible: bool) {
        self.surface.with_mut(|s| s.set_cursor_visible(visible));
    }

    pub fn set_vsync(&mut self, enabled: bool) {
        self.surface.with_mut(|s| s.set_vsync(enabled));
    }

    pub fn set_key_repeat(&mut self, enabled: bool) {
        self.surface.with_mut(|s| s.set_key_repeat(enabled));
    }

    pub fn set_framerate_limit(&mut self, fps: Option<u32>) {
        self.surface.with_mut(|s| s.set_framerate_limit(fps));
    }

    pub fn view(&self) -> View {
        self.surface.with(|s| s.view())
    }

    pub fn set_view(&mut self, view: View) {
        self.surface.with_mut(|s| s.set_view(view));
    }

    pub fn map_pixel_to_coords(&self, pixel: Vec2) -> Vec2 {
        self.surface.with(|s| s.map_pixel_to_coords(pixel))
    }

    pub fn map_coords_to_pixel(&self, coords: Vec2) -> Vec2 {
        self.surface.with(|s| s.map_coords_to_pixel(coords))
    }

    pub fn poll_event(&mut self) -> Option<RawEvent> {
        self.surface.with_mut(|s| s.poll_event())
    }

    pub fn wait_event(&mut self) -> Option<RawEvent> {
        self.surface.with_mut(|s| s.wait_event())
    }

    pub fn clear(&mut self, color: Color) {
        self.surface.with_mut(|s| s.clear(color));
    }

    /// Presents the recorded frame.
    pub fn display(&mut self) -> Result<()> {
        self.surface.with_mut(|s| s.present())
    }

    pub fn close(&mut self) {
        self.surface.with_mut(|s| s.close());
    }

    pub fn is_open(&self) -> bool {
        self.surface.with(|s| s.is_open())
    }
}

// ── tests ─────────────────────────────────────────────────────────────────
