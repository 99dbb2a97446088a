use crate::coords::Rect;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList, ZIndex};

use super::Border;

/// Rectangle draw payload: solid fill plus optional border stroke.
#[derive(Debug, Clone, PartialEq)]
pub struct RectCmd {
    pub rect: Rect,
    pub fill: Color,
    pub border: Option<Border>,
}

impl RectCmd {
    #[inline]
    pub fn new(rect: Rect, fill: Color, border: Option<Border>) -> Self {
        Self { rect, fill, border }
    }
}

impl DrawList {
    /// Records a rectangle draw command.
    #[inline]
    pub fn push_rect(&mut self, z: ZIndex, rect: Rect, fill: Color, border: Option<Border>) {
        self.push(z, DrawCmd::Rect(RectCmd::new(rect, fill, border)));
    }

    /// Records a solid rectangle draw command.
    #[inline]
    pub fn push_solid_rect(&mut self, z: ZIndex, rect: Rect, fill: Color) {
        self.push_rect(z, rect, fill, None);
    }
}
