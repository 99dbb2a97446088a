use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;

use crate::surface::NativeSurface;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
///
/// The runtime owns the platform loop; the application owns everything
/// built on top of the surface it receives.
pub trait App {
    /// Called once, after the platform window and GPU are ready.
    ///
    /// The application keeps its own reference to the surface; the runtime
    /// retains one for event delivery.
    fn on_surface_ready(&mut self, surface: Rc<RefCell<NativeSurface>>) -> Result<()>;

    /// Called once per redraw. Drain events, update state, record drawing
    /// and present here.
    fn on_frame(&mut self) -> AppControl;
}
