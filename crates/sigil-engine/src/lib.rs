//! Sigil engine crate.
//!
//! This crate is the render-surface substrate the GUI layer sits on:
//! platform window + GPU runtime, raw input events, coordinate types,
//! and the renderer-agnostic draw stream.

pub mod device;
pub mod surface;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;
pub mod scene;
