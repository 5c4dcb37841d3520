//! `embedded-graphics` backed surface
//!
//! Drawing errors from the target cannot be reported through the infallible
//! drawing calls, so they are remembered and surface on the next flush.

use embedded_graphics::mono_font::ascii::FONT_6X9;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::raw::RawU16;
use embedded_graphics::pixelcolor::{BinaryColor, Rgb565};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, StrokeAlignment};
use embedded_graphics::text::{Baseline, Text};

use vellum_core::surface::{Color, Surface, OFF};
use vellum_core::SurfaceError;

/// Maps a vellum colour onto a panel colour
pub trait IndexedColor: PixelColor {
    fn from_index(color: Color) -> Self;
}

impl IndexedColor for BinaryColor {
    fn from_index(color: Color) -> Self {
        if color == OFF {
            BinaryColor::Off
        } else {
            BinaryColor::On
        }
    }
}

impl IndexedColor for Rgb565 {
    fn from_index(color: Color) -> Self {
        Rgb565::from(RawU16::new(color))
    }
}

/// Draw target that buffers and needs an explicit transfer
pub trait Flush {
    type Error;

    /// Transfer the buffer to the panel
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// Vellum surface over an `embedded-graphics` draw target
pub struct GraphicsSurface<D> {
    target: D,
    draw_failed: bool,
}

impl<D> GraphicsSurface<D>
where
    D: DrawTarget + Flush,
    D::Color: IndexedColor,
{
    pub fn new(target: D) -> Self {
        Self {
            target,
            draw_failed: false,
        }
    }

    pub fn target(&self) -> &D {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut D {
        &mut self.target
    }

    pub fn into_inner(self) -> D {
        self.target
    }

    fn record<T, E>(&mut self, result: Result<T, E>) {
        if result.is_err() {
            self.draw_failed = true;
        }
    }
}

fn bounds(x: i32, y: i32, width: i32, height: i32) -> Option<Rectangle> {
    if width <= 0 || height <= 0 {
        return None;
    }
    Some(Rectangle::new(
        Point::new(x, y),
        Size::new(width as u32, height as u32),
    ))
}

impl<D> Surface for GraphicsSurface<D>
where
    D: DrawTarget + Flush,
    D::Color: IndexedColor,
{
    fn fill(&mut self, color: Color) {
        let result = self.target.clear(D::Color::from_index(color));
        self.record(result);
    }

    fn pixel(&mut self, x: i32, y: i32, color: Color) {
        let result = Pixel(Point::new(x, y), D::Color::from_index(color)).draw(&mut self.target);
        self.record(result);
    }

    fn rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Color) {
        let Some(area) = bounds(x, y, width, height) else {
            return;
        };
        let style: PrimitiveStyle<D::Color> = PrimitiveStyleBuilder::new()
            .stroke_color(D::Color::from_index(color))
            .stroke_width(1)
            .stroke_alignment(StrokeAlignment::Inside)
            .build();
        let result = area.into_styled(style).draw(&mut self.target);
        self.record(result);
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Color) {
        let Some(area) = bounds(x, y, width, height) else {
            return;
        };
        let result = self.target.fill_solid(&area, D::Color::from_index(color));
        self.record(result);
    }

    fn text(&mut self, text: &str, x: i32, y: i32, color: Color) {
        let style = MonoTextStyle::new(&FONT_6X9, D::Color::from_index(color));
        let result =
            Text::with_baseline(text, Point::new(x, y), style, Baseline::Top).draw(&mut self.target);
        self.record(result);
    }

    fn flush(&mut self) -> Result<(), SurfaceError> {
        if core::mem::take(&mut self.draw_failed) {
            warn!("Draw target reported an error during the frame");
            return Err(SurfaceError::Communication);
        }
        self.target
            .flush()
            .map_err(|_| SurfaceError::Communication)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::mono::{MonoFrameBuffer, PageSink, WIDTH};
    use std::vec::Vec;
    use vellum_core::surface::{rgb565, ON};

    #[derive(Default)]
    struct Pages {
        written: Vec<u8>,
        fail: bool,
    }

    impl PageSink for Pages {
        type Error = ();

        fn write_page(&mut self, page: u8, _data: &[u8; WIDTH]) -> Result<(), ()> {
            if self.fail {
                return Err(());
            }
            self.written.push(page);
            Ok(())
        }
    }

    fn surface() -> GraphicsSurface<MonoFrameBuffer<Pages>> {
        GraphicsSurface::new(MonoFrameBuffer::new(Pages::default()))
    }

    #[test]
    fn test_color_mapping() {
        assert_eq!(BinaryColor::from_index(OFF), BinaryColor::Off);
        assert_eq!(BinaryColor::from_index(ON), BinaryColor::On);
        assert_eq!(BinaryColor::from_index(0xF800), BinaryColor::On);
        assert_eq!(Rgb565::from_index(rgb565(255, 0, 0)), Rgb565::RED);
        assert_eq!(Rgb565::from_index(0), Rgb565::BLACK);
    }

    #[test]
    fn test_rect_outline_stays_inside() {
        let mut surface = surface();
        surface.rect(2, 3, 4, 3, ON);

        let fb = surface.target();
        assert!(fb.get(2, 3));
        assert!(fb.get(5, 3));
        assert!(fb.get(2, 5));
        assert!(fb.get(5, 5));
        assert!(!fb.get(3, 4));
        assert!(!fb.get(6, 3));
        assert!(!fb.get(2, 6));
    }

    #[test]
    fn test_fill_rect_and_clear() {
        let mut surface = surface();
        surface.fill_rect(0, 0, 3, 2, ON);
        assert!(surface.target().get(2, 1));
        assert_eq!(surface.target().lit(), 6);

        surface.clear();
        assert_eq!(surface.target().lit(), 0);
    }

    #[test]
    fn test_degenerate_rects_draw_nothing() {
        let mut surface = surface();
        surface.rect(0, 0, 0, 5, ON);
        surface.fill_rect(0, 0, 5, -1, ON);
        assert_eq!(surface.target().lit(), 0);
    }

    #[test]
    fn test_text_lands_below_origin() {
        let mut surface = surface();
        surface.text("I", 10, 20, ON);

        let fb = surface.target();
        assert!(fb.lit() > 0);
        // Top baseline: nothing above the origin row or left of the cell
        assert!((0..WIDTH).all(|x| !fb.get(x, 19)));
        assert!((0..64).all(|y| !fb.get(9, y)));
    }

    #[test]
    fn test_out_of_bounds_is_clipped() {
        let mut surface = surface();
        surface.pixel(-1, 0, ON);
        surface.pixel(200, 10, ON);
        surface.fill_rect(120, 60, 20, 20, ON);

        assert_eq!(surface.target().lit(), 8 * 4);
        assert_eq!(surface.flush(), Ok(()));
    }

    #[test]
    fn test_flush_writes_every_page() {
        let mut surface = surface();
        surface.flush().unwrap();
        assert_eq!(
            surface.target().sink().written,
            [0, 1, 2, 3, 4, 5, 6, 7]
        );
    }

    #[test]
    fn test_flush_error_maps_to_communication() {
        let mut surface = surface();
        surface.target_mut().sink_mut().fail = true;
        assert_eq!(surface.flush(), Err(SurfaceError::Communication));
    }
}
