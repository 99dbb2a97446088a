use sigil_engine::input::{Key, Modifiers, MouseButton};

/// Input events routed through the widget tree.
///
/// Unlike the engine's raw events, pointer coordinates here are **scene
/// coordinates**: integer positions produced by mapping the pixel
/// position through the surface view and rounding half-up. Events are
/// immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Pointer moved to `(x, y)`.
    PointerMoved { x: i32, y: i32 },
    /// Mouse button pressed at `(x, y)`.
    PointerPressed { button: MouseButton, x: i32, y: i32 },
    /// Mouse button released at `(x, y)`.
    PointerReleased { button: MouseButton, x: i32, y: i32 },

    KeyPressed { key: Key, modifiers: Modifiers },
    KeyReleased { key: Key, modifiers: Modifiers },

    /// Committed text input (one or more characters).
    TextEntered { text: String },

    /// Vertical scroll at `(x, y)`. `delta` > 0 scrolls up.
    WheelScrolled { delta: f32, x: i32, y: i32 },

    /// Surface resized (new size in pixels).
    Resized { width: u32, height: u32 },

    /// Surface gained or lost OS focus.
    FocusChanged(bool),

    /// The user asked to close the surface.
    Closed,
}

/// Result returned by [`Widget::handle_event`](crate::widget::Widget::handle_event).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was handled — stop routing to siblings / parents.
    Consumed,
    /// Event was not handled — keep routing.
    Ignored,
}

impl EventResult {
    #[inline]
    pub fn is_consumed(self) -> bool {
        self == EventResult::Consumed
    }
}
