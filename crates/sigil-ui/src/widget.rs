use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use sigil_engine::coords::{Rect, Vec2};

use crate::callback::{Callback, Signal};
use crate::event::{Event, EventResult};
use crate::painter::Painter;
use crate::theme::Theme;

static NEXT_WIDGET_ID: AtomicU64 = AtomicU64::new(1);

// ── WidgetId ──────────────────────────────────────────────────────────────

/// Process-unique widget identifier.
///
/// Allocated once per widget construction via [`WidgetId::new()`] and kept
/// for the widget's lifetime. Callbacks carry it as a non-owning source
/// reference.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct WidgetId(u64);

impl WidgetId {
    /// Allocate a new, globally unique `WidgetId`.
    pub fn new() -> Self {
        WidgetId(NEXT_WIDGET_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for WidgetId {
    fn default() -> Self {
        Self::new()
    }
}

// ── EventCtx ──────────────────────────────────────────────────────────────

/// Callback sink widgets emit into while handling an event.
///
/// The event manager drains it after each dispatch.
#[derive(Debug, Default)]
pub struct EventCtx {
    callbacks: Vec<Callback>,
}

impl EventCtx {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits a callback from `widget`.
    pub fn emit(
        &mut self,
        source: WidgetId,
        id: u32,
        signal: Signal,
        text: Option<String>,
        position: Option<(i32, i32)>,
    ) {
        self.callbacks.push(Callback {
            source,
            id,
            signal,
            text,
            position,
        });
    }

    pub(crate) fn drain(&mut self) -> impl Iterator<Item = Callback> + '_ {
        self.callbacks.drain(..)
    }
}

// ── Widget trait ──────────────────────────────────────────────────────────

/// The core trait every UI component implements.
///
/// Widgets own their position and size (`bounds`, in scene coordinates),
/// react to corrected [`Event`]s, and draw themselves through a
/// [`Painter`]. Container widgets forward all of these to their children.
pub trait Widget: 'static {
    /// Stable identity of this widget.
    fn id(&self) -> WidgetId;

    /// Application-assigned callback id attached to emitted callbacks
    /// (0 when unset).
    fn callback_id(&self) -> u32;

    /// Bounding rectangle in scene coordinates.
    fn bounds(&self) -> Rect;

    /// Moves the widget's top-left corner.
    fn set_position(&mut self, position: Vec2);

    /// Routes an input event. Return [`EventResult::Consumed`] to stop
    /// propagation; emit callbacks through `ctx`.
    fn handle_event(&mut self, event: &Event, ctx: &mut EventCtx) -> EventResult;

    /// Advances time-dependent state. Called once per frame.
    fn update(&mut self, dt: Duration) {
        let _ = dt;
    }

    /// Draws this widget.
    fn draw(&self, painter: &mut Painter<'_>);

    /// Receives the inherited visual defaults when added to a Gui or panel.
    fn initialize(&mut self, theme: &Theme) {
        let _ = theme;
    }

    /// Clones the widget behind the trait object.
    fn clone_widget(&self) -> Box<dyn Widget>;

    /// Text attached to callbacks emitted on this widget's behalf,
    /// e.g. a label's string.
    fn payload(&self) -> Option<String> {
        None
    }
}

// ── Element ───────────────────────────────────────────────────────────────

/// A type-erased widget — the universal child type for containers.
pub struct Element(Box<dyn Widget>);

impl Element {
    pub fn new<W: Widget>(w: W) -> Self {
        Self(Box::new(w))
    }

    pub fn from_boxed(w: Box<dyn Widget>) -> Self {
        Self(w)
    }

    #[inline]
    pub fn id(&self) -> WidgetId {
        self.0.id()
    }

    #[inline]
    pub fn callback_id(&self) -> u32 {
        self.0.callback_id()
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        self.0.bounds()
    }

    #[inline]
    pub fn set_position(&mut self, position: Vec2) {
        self.0.set_position(position)
    }

    #[inline]
    pub fn handle_event(&mut self, event: &Event, ctx: &mut EventCtx) -> EventResult {
        self.0.handle_event(event, ctx)
    }

    #[inline]
    pub fn update(&mut self, dt: Duration) {
        self.0.update(dt)
    }

    #[inline]
    pub fn draw(&self, painter: &mut Painter<'_>) {
        self.0.draw(painter)
    }

    #[inline]
    pub fn initialize(&mut self, theme: &Theme) {
        self.0.initialize(theme)
    }

    #[inline]
    pub fn payload(&self) -> Option<String> {
        self.0.payload()
    }
}

impl Clone for Element {
    fn clone(&self) -> Self {
        Self(self.0.clone_widget())
    }
}

impl<W: Widget> From<W> for Element {
    fn from(w: W) -> Self {
        Self::new(w)
    }
}
