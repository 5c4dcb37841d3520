//! Decorator box view
//!
//! Paints margin/border/padding around a fixed intrinsic space and draws
//! every child at the same content origin. Children position themselves;
//! their sizes do not affect the box.

use alloc::vec::Vec;

use crate::surface::Surface;

use super::{BoxStyle, Element, Point, Size, View};

/// Box with a fixed intrinsic space
pub struct BasicView {
    style: BoxStyle,
    elements: Vec<Element>,
}

impl BasicView {
    /// Create an empty box
    pub fn new(style: BoxStyle) -> Self {
        Self {
            style,
            elements: Vec::new(),
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
}

impl View for BasicView {
    fn calc(&mut self, _available: Size) -> Size {
        // Child views still need a layout pass before they are drawn;
        // their results do not change the box.
        let content = self.style.content_space();
        for element in &mut self.elements {
            if let Element::View(view) = element {
                view.calc(content);
            }
        }
        self.style.outer()
    }

    fn draw(&self, surface: &mut dyn Surface, at: Point) {
        self.style.draw_border(surface, at, self.style.space);

        let origin = self.style.content_origin(at);
        for element in &self.elements {
            element.draw(surface, origin);
        }
    }
}
