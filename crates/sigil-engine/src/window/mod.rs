//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and Window, and wires them to the surface layer.

mod runtime;

pub use runtime::{Runtime, SurfaceConfig};
pub use winit::window::CursorIcon;
