//! Paged monochrome frame buffer
//!
//! 128x64 pixels, 1 bit per pixel, organized the way SH1106/SSD1306
//! controllers expect it: 8 pages of 128 column bytes, bit `n` of a byte is
//! row `page * 8 + n`.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use crate::graphics::Flush;

/// Display width in pixels
pub const WIDTH: usize = 128;

/// Display height in pixels
pub const HEIGHT: usize = 64;

/// Number of 8-row pages
pub const PAGES: usize = HEIGHT / 8;

/// Receives finished pages on flush
pub trait PageSink {
    type Error;

    fn write_page(&mut self, page: u8, data: &[u8; WIDTH]) -> Result<(), Self::Error>;
}

/// 1-bpp frame buffer flushed page by page to a [`PageSink`]
pub struct MonoFrameBuffer<S> {
    sink: S,
    pages: [[u8; WIDTH]; PAGES],
}

impl<S> MonoFrameBuffer<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            pages: [[0; WIDTH]; PAGES],
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Raw page data
    pub fn pages(&self) -> &[[u8; WIDTH]; PAGES] {
        &self.pages
    }

    /// Pixel state; out of range reads as off
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x >= WIDTH || y >= HEIGHT {
            return false;
        }
        self.pages[y / 8][x] & (1 << (y % 8)) != 0
    }

    /// Number of pixels switched on
    pub fn lit(&self) -> u32 {
        self.pages
            .iter()
            .flat_map(|page| page.iter())
            .map(|byte| byte.count_ones())
            .sum()
    }

    fn set(&mut self, x: i32, y: i32, on: bool) {
        if x < 0 || y < 0 || x as usize >= WIDTH || y as usize >= HEIGHT {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        let mask = 1u8 << (y % 8);
        let byte = &mut self.pages[y / 8][x];
        if on {
            *byte |= mask;
        } else {
            *byte &= !mask;
        }
    }
}

impl<S> OriginDimensions for MonoFrameBuffer<S> {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl<S> DrawTarget for MonoFrameBuffer<S> {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set(point.x, point.y, color.is_on());
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        let byte = if color.is_on() { 0xFF } else { 0x00 };
        for page in self.pages.iter_mut() {
            page.fill(byte);
        }
        Ok(())
    }
}

impl<S: PageSink> Flush for MonoFrameBuffer<S> {
    type Error = S::Error;

    fn flush(&mut self) -> Result<(), Self::Error> {
        for (index, page) in self.pages.iter().enumerate() {
            self.sink.write_page(index as u8, page)?;
        }
        Ok(())
    }
}
