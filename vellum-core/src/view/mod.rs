//! Layout and draw protocol
//!
//! Two capability roles make up a view tree:
//!
//! - [`Drawable`]: fixed-size leaf content. Reports its footprint and paints
//!   inside it.
//! - [`View`]: composable container. `calc` is handed the space available and
//!   returns the space it occupies; `draw` then paints at an absolute origin.
//!
//! Every frame the engine calls `calc` on the root view with the full surface
//! size and then `draw` at `(0, 0)`. `calc` must run before `draw` in the same
//! frame, since containers remember child sizes between the two calls.

pub mod basic;
pub mod column;
pub mod geometry;
pub mod style;

use alloc::boxed::Box;

use crate::surface::Surface;

pub use basic::BasicView;
pub use column::ColumnView;
pub use geometry::{Edges, Point, Size};
pub use style::BoxStyle;

/// Fixed-footprint leaf content
pub trait Drawable {
    /// Footprint width in pixels
    fn width(&self) -> u16;

    /// Footprint height in pixels
    fn height(&self) -> u16;

    /// Paint at absolute position `at`, staying inside the footprint
    fn draw(&self, surface: &mut dyn Surface, at: Point);

    /// Footprint as a [`Size`]
    fn size(&self) -> Size {
        Size::new(i32::from(self.width()), i32::from(self.height()))
    }
}

/// Composable layout node
pub trait View {
    /// Compute layout for `available` space and return the space occupied
    ///
    /// The result should not exceed `available`; callers treat excess as a
    /// layout warning.
    fn calc(&mut self, available: Size) -> Size;

    /// Paint at absolute position `at`
    fn draw(&self, surface: &mut dyn Surface, at: Point);
}

/// Child of a container
pub enum Element {
    View(Box<dyn View>),
    Drawable(Box<dyn Drawable>),
}

impl Element {
    /// Wrap a view
    pub fn view(view: impl View + 'static) -> Self {
        Element::View(Box::new(view))
    }

    /// Wrap a drawable
    pub fn drawable(drawable: impl Drawable + 'static) -> Self {
        Element::Drawable(Box::new(drawable))
    }

    /// Size this element takes given `available` space
    ///
    /// Views are laid out; drawables report their fixed footprint.
    pub fn measure(&mut self, available: Size) -> Size {
        match self {
            Element::View(view) => view.calc(available),
            Element::Drawable(drawable) => drawable.size(),
        }
    }

    /// Paint at absolute position `at`
    pub fn draw(&self, surface: &mut dyn Surface, at: Point) {
        match self {
            Element::View(view) => view.draw(surface, at),
            Element::Drawable(drawable) => drawable.draw(surface, at),
        }
    }
}
