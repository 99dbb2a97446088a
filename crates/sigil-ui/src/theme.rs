use sigil_engine::paint::Color;

/// Inherited visual defaults handed to widgets via
/// [`Widget::initialize`](crate::widget::Widget::initialize).
///
/// Plain data; widgets copy what they need and may be overridden per
/// widget afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub text_color: Color,
    pub text_size: f32,
    pub background: Color,
    pub accent: Color,
    pub border_color: Color,
    pub border_width: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text_color: Color::from_straight(0.92, 0.92, 0.94, 1.0),
            text_size: 14.0,
            background: Color::from_straight(0.17, 0.17, 0.20, 1.0),
            accent: Color::from_straight(0.26, 0.52, 0.96, 1.0),
            border_color: Color::from_straight(0.35, 0.35, 0.40, 1.0),
            border_width: 1.0,
        }
    }
}
