//! Core engine-facing contracts.
//!
//! This module defines the stable interface between the runtime (platform
//! loop) and higher layers (UI, demo binaries). It avoids leaking runtime
//! internals into user code.

mod app;

pub use app::{App, AppControl};
