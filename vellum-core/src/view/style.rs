//! Box model shared by the container views and box-decorated widgets
//!
//! ```text
//! ┌──────────────── margin ────────────────┐
//! │  ╔═════════════ border ══════════════╗  │
//! │  ║  ┌──────── space ──────────────┐  ║  │
//! │  ║  │ padding                      │  ║  │
//! │  ║  │   content origin ─▶ children │  ║  │
//! │  ║  └──────────────────────────────┘  ║  │
//! │  ╚════════════════════════════════════╝  │
//! └──────────────────────────────────────────┘
//! ```
//!
//! Padding lies inside `space`; margin and border are added around it.

use crate::surface::{Color, Surface, ON};

use super::geometry::{Edges, Point, Size};

/// Margin, border and padding around an intrinsic space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoxStyle {
    /// Intrinsic space inside the border
    pub space: Size,
    /// Outer spacing (left, top, right, bottom)
    pub margin: Edges,
    /// Inner spacing between border and content
    pub padding: Edges,
    /// Border thickness in pixels
    pub border: u16,
    /// Border colour
    pub border_color: Color,
}

impl Default for BoxStyle {
    fn default() -> Self {
        Self {
            space: Size::ZERO,
            margin: Edges::ZERO,
            padding: Edges::ZERO,
            border: 0,
            border_color: ON,
        }
    }
}

impl BoxStyle {
    /// Style with the given intrinsic space and no decoration
    pub fn new(space: Size) -> Self {
        Self {
            space,
            ..Default::default()
        }
    }

    pub fn with_margin(mut self, margin: Edges) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_padding(mut self, padding: Edges) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_border(mut self, thickness: u16, color: Color) -> Self {
        self.border = thickness;
        self.border_color = color;
        self
    }

    fn border_px(&self) -> i32 {
        i32::from(self.border)
    }

    /// Space taken by margin and border on each axis
    pub fn edge(&self) -> Size {
        let border = 2 * self.border_px();
        Size::new(
            self.margin.horizontal() + border,
            self.margin.vertical() + border,
        )
    }

    /// Intrinsic space plus margin and border
    pub fn outer(&self) -> Size {
        self.space + self.edge()
    }

    /// Space left for children once padding is taken out
    pub fn content_space(&self) -> Size {
        Size::new(
            self.space.width - self.padding.horizontal(),
            self.space.height - self.padding.vertical(),
        )
    }

    /// Where children are drawn when the box is drawn at `at`
    pub fn content_origin(&self, at: Point) -> Point {
        at.offset(
            self.margin.left + self.border_px() + self.padding.left,
            self.margin.top + self.border_px() + self.padding.top,
        )
    }

    /// Paint `border` concentric outlines around an inner area of `inner`
    ///
    /// Stroke `b` starts `b` pixels in from the margin corner, so stroke 0 is
    /// the outermost.
    pub fn draw_border(&self, surface: &mut dyn Surface, at: Point, inner: Size) {
        let corner = at.offset(self.margin.left, self.margin.top);
        let border = self.border_px();
        for b in 0..border {
            surface.rect(
                corner.x + b,
                corner.y + b,
                inner.width + 2 * (border - b),
                inner.height + 2 * (border - b),
                self.border_color,
            );
        }
    }
}
