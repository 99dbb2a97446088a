//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! The runtime translates window-system events into [`RawEvent`]s;
//! coordinates stay in pixel space here — mapping into scene
//! coordinates is the GUI layer's job, through the surface view.

mod state;
mod types;

pub use state::InputTracker;
pub use types::{
    Key,
    KeyEvent,
    KeyState,
    Modifiers,
    MouseButton,
    MouseButtonState,
    PointerButtonEvent,
    PointerMoveEvent,
    RawEvent,
    TextEvent,
    WheelDelta,
};
