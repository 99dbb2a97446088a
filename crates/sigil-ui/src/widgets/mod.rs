//! Built-in widgets.

mod button;
mod label;
mod panel;

pub use button::Button;
pub use label::Label;
pub use panel::Panel;

/// Inner spacing between a widget's border and its content.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Padding {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Padding {
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }

    /// Same spacing on all four sides.
    pub const fn uniform(v: f32) -> Self {
        Self::new(v, v, v, v)
    }

    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}
