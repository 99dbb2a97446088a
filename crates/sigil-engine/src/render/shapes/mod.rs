//! Shape renderers.

mod common;

pub mod rect;
