//! Vertical stacking view
//!
//! `calc` walks the children top to bottom, handing each the space still
//! free below the previous ones and recording the size it takes. `draw`
//! then stacks the children using those recorded heights.

use alloc::vec::Vec;

use crate::surface::Surface;

use super::{BoxStyle, Element, Point, Size, View};

/// Column of children stacked from the top
pub struct ColumnView {
    style: BoxStyle,
    elements: Vec<Element>,
    /// Per-child size from the last `calc`
    spaces: Vec<Size>,
}

impl ColumnView {
    /// Create an empty column
    pub fn new(style: BoxStyle) -> Self {
        Self {
            style,
            elements: Vec::new(),
            spaces: Vec::new(),
        }
    }

    /// Add a child (builder form)
    pub fn with(mut self, element: Element) -> Self {
        self.elements.push(element);
        self
    }

    /// Add a child
    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    pub fn style(&self) -> &BoxStyle {
        &self.style
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Child sizes recorded by the last `calc`
    ///
    /// Valid until the next `calc`.
    pub fn spaces(&self) -> &[Size] {
        &self.spaces
    }

    fn stacked_height(&self) -> i32 {
        self.spaces.iter().map(|s| s.height).sum()
    }
}

impl View for ColumnView {
    fn calc(&mut self, available: Size) -> Size {
        self.spaces.clear();

        let edge = self.style.edge();
        let mut remaining = available - edge;
        let mut occupied = edge;

        for element in &mut self.elements {
            let size = element.measure(remaining);
            if size.height > remaining.height {
                warn!(
                    "Column child needs {} px but only {} px remain",
                    size.height,
                    remaining.height
                );
            }
            self.spaces.push(size);
            remaining.height -= size.height;
            occupied.height += size.height;
        }

        occupied
    }

    fn draw(&self, surface: &mut dyn Surface, at: Point) {
        let content_height = self.stacked_height() + self.style.padding.vertical();
        let inner = Size::new(
            self.style.space.width,
            self.style.space.height.max(content_height),
        );
        self.style.draw_border(surface, at, inner);

        let mut origin = self.style.content_origin(at);
        for (element, size) in self.elements.iter().zip(&self.spaces) {
            element.draw(surface, origin);
            origin = origin.offset(0, size.height);
        }
    }
}
