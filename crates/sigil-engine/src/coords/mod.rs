//! Coordinate and geometry types shared across the engine and UI.
//!
//! Canonical CPU space:
//! - Logical (scene) coordinates, origin top-left
//! - +X right, +Y down
//!
//! Raw window-system events carry pixel coordinates; the [`View`]
//! transform maps between pixel space and scene space.

mod rect;
mod vec2;
mod view;
mod viewport;

pub use rect::Rect;
pub use vec2::Vec2;
pub use view::View;
pub use viewport::Viewport;
