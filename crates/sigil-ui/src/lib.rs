//! Sigil UI — retained widget tree on top of `sigil-engine`.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use sigil_ui::prelude::*;
//!
//! let mut gui = Gui::shared(surface);
//! let button = gui.add(Button::new("Quit").with_callback_id(1));
//!
//! // In your frame callback:
//! while let Some(raw) = gui.poll_event() {
//!     gui.handle_event(raw);
//! }
//! gui.clear(Color::from_straight(0.12, 0.12, 0.14, 1.0));
//! gui.draw_gui();
//! gui.display()?;
//!
//! while let Some(cb) = gui.poll_callback() {
//!     if cb.id == 1 && cb.signal == Signal::Clicked {
//!         gui.close();
//!     }
//! }
//! ```
//!
//! # Extending with custom widgets
//!
//! Implement [`Widget`](widget::Widget) for any type, then add it to a
//! [`Gui`](window::Gui) or a [`Panel`](widgets::Panel) like the built-ins.

pub mod callback;
pub mod event;
pub mod manager;
pub mod painter;
pub mod theme;
pub mod widget;
pub mod widgets;
pub mod window;

// Top-level re-export for the common entry point — `use sigil_ui::Gui`.
pub use window::Gui;

/// Everything you need to build and extend UI — import this in your component files.
pub mod prelude {
    pub use crate::callback::{Callback, CallbackQueue, Signal};
    pub use crate::event::{Event, EventResult};
    pub use crate::painter::Painter;
    pub use crate::theme::Theme;
    pub use crate::widget::{Element, EventCtx, Widget, WidgetId};
    pub use crate::widgets::{Button, Label, Padding, Panel};
    pub use crate::window::Gui;

    // Re-export the engine primitives everyone needs.
    pub use sigil_engine::coords::{Rect, Vec2, View};
    pub use sigil_engine::input::{Key, Modifiers, MouseButton};
    pub use sigil_engine::paint::Color;
    pub use sigil_engine::scene::Border;
}
