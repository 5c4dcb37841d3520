//! Drawing surface trait
//!
//! The engine renders every frame into a [`Surface`]: a pixel buffer owned by
//! the display driver. Drawing calls never fail; coordinates outside the
//! buffer are clipped by the implementation. Only [`Surface::flush`], which
//! moves the buffer to the panel, can report an error.

use crate::error::SurfaceError;

/// Colour value
///
/// Interpretation is up to the panel: monochrome panels treat 0 as off and
/// anything else as on, colour TFT panels take RGB565.
pub type Color = u16;

/// Monochrome "off" / background colour
pub const OFF: Color = 0;

/// Monochrome "on" colour
pub const ON: Color = 1;

/// Pack 8-bit RGB components into RGB565
pub const fn rgb565(r: u8, g: u8, b: u8) -> Color {
    ((r as u16 & 0xF8) << 8) | ((g as u16 & 0xFC) << 3) | (b as u16 >> 3)
}

/// Pixel buffer the engine draws into
pub trait Surface {
    /// Fill the whole buffer with one colour
    fn fill(&mut self, color: Color);

    /// Clear the buffer to the background colour
    fn clear(&mut self) {
        self.fill(OFF);
    }

    /// Set a single pixel
    fn pixel(&mut self, x: i32, y: i32, color: Color);

    /// Draw a one pixel wide rectangle outline
    fn rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Color) {
        if width <= 0 || height <= 0 {
            return;
        }
        for dx in 0..width {
            self.pixel(x + dx, y, color);
            self.pixel(x + dx, y + height - 1, color);
        }
        for dy in 0..height {
            self.pixel(x, y + dy, color);
            self.pixel(x + width - 1, y + dy, color);
        }
    }

    /// Fill a rectangle
    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Color) {
        for dy in 0..height.max(0) {
            for dx in 0..width.max(0) {
                self.pixel(x + dx, y + dy, color);
            }
        }
    }

    /// Draw text with its top-left corner at `(x, y)`
    fn text(&mut self, text: &str, x: i32, y: i32, color: Color);

    /// Transfer the buffer to the panel
    ///
    /// Blocks until the transfer is complete.
    fn flush(&mut self) -> Result<(), SurfaceError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::Canvas;

    #[test]
    fn test_rgb565_packing() {
        assert_eq!(rgb565(0, 0, 0), 0x0000);
        assert_eq!(rgb565(255, 255, 255), 0xFFFF);
        assert_eq!(rgb565(255, 0, 0), 0xF800);
        assert_eq!(rgb565(0, 255, 0), 0x07E0);
        assert_eq!(rgb565(0, 0, 255), 0x001F);
    }

    #[test]
    fn test_default_rect_outline() {
        let mut canvas = Canvas::new(8, 8);
        canvas.rect(1, 1, 4, 3, ON);

        assert_eq!(canvas.get(1, 1), ON);
        assert_eq!(canvas.get(4, 1), ON);
        assert_eq!(canvas.get(1, 3), ON);
        assert_eq!(canvas.get(4, 3), ON);
        // Interior stays clear
        assert_eq!(canvas.get(2, 2), OFF);
        // Outside untouched
        assert_eq!(canvas.get(5, 1), OFF);
        assert_eq!(canvas.lit(), 10);
    }

    #[test]
    fn test_default_fill_rect_ignores_negative_size() {
        let mut canvas = Canvas::new(4, 4);
        canvas.fill_rect(0, 0, -2, 3, ON);
        assert_eq!(canvas.lit(), 0);

        canvas.fill_rect(0, 0, 2, 2, ON);
        assert_eq!(canvas.lit(), 4);
    }
}
