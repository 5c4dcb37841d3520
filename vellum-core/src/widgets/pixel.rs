//! Single pixel with a box model

use crate::surface::{Color, Surface};
use crate::view::{BoxStyle, Drawable, Point, Size};

/// One pixel surrounded by margin, border and padding
pub struct Pixel {
    color: Color,
    style: BoxStyle,
}

impl Pixel {
    pub fn new(color: Color) -> Self {
        Self::styled(color, BoxStyle::default())
    }

    /// The style's `space` is ignored; the content is always 1x1 plus
    /// padding.
    pub fn styled(color: Color, style: BoxStyle) -> Self {
        let mut style = style;
        style.space = Size::new(1 + style.padding.horizontal(), 1 + style.padding.vertical());
        Self { color, style }
    }

    fn footprint(&self) -> Size {
        self.style.outer()
    }
}

impl Drawable for Pixel {
    fn width(&self) -> u16 {
        u16::try_from(self.footprint().width.max(0)).unwrap_or(u16::MAX)
    }

    fn height(&self) -> u16 {
        u16::try_from(self.footprint().height.max(0)).unwrap_or(u16::MAX)
    }

    fn draw(&self, surface: &mut dyn Surface, at: Point) {
        self.style.draw_border(surface, at, self.style.space);
        let dot = self.style.content_origin(at);
        surface.pixel(dot.x, dot.y, self.color);
    }
}
