use super::{Rect, Vec2};

/// 2D camera transform between pixel space and scene space.
///
/// A view is a center + size pair describing the region of the scene
/// currently visible on the surface. Pixels map linearly onto that
/// region: pixel `(0, 0)` is the view's top-left corner, pixel
/// `(surface_w, surface_h)` is its bottom-right.
///
/// The default view of a surface covers `(0, 0)..(w, h)` in scene
/// units, which makes pixel→scene mapping the identity.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct View {
    pub center: Vec2,
    pub size: Vec2,
}

impl View {
    #[inline]
    pub const fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    /// View covering `rect` exactly.
    #[inline]
    pub fn from_rect(rect: Rect) -> Self {
        let r = rect.normalized();
        Self {
            center: r.origin + r.size / 2.0,
            size: r.size,
        }
    }

    /// The scene-space region this view shows.
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.center - self.size / 2.0, self.size)
    }

    /// Maps a pixel position on a surface of `surface_size` pixels to
    /// scene coordinates.
    pub fn pixel_to_coords(&self, pixel: Vec2, surface_size: Vec2) -> Vec2 {
        let origin = self.center - self.size / 2.0;
        Vec2::new(
            origin.x + pixel.x / surface_size.x * self.size.x,
            origin.y + pixel.y / surface_size.y * self.size.y,
        )
    }

    /// Inverse of [`pixel_to_coords`](Self::pixel_to_coords).
    pub fn coords_to_pixel(&self, coords: Vec2, surface_size: Vec2) -> Vec2 {
        let origin = self.center - self.size / 2.0;
        Vec2::new(
            (coords.x - origin.x) / self.size.x * surface_size.x,
            (coords.y - origin.y) / self.size.y * surface_size.y,
        )
    }
}
