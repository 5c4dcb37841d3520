//! Heap usage gauge

use core::fmt::Write;

use heapless::String;

use crate::surface::{Color, Surface};
use crate::view::{Drawable, Point};

/// Source of heap usage figures
pub trait HeapStats {
    /// Bytes currently allocated
    fn used(&self) -> usize;

    /// Bytes still available
    fn free(&self) -> usize;

    fn total(&self) -> usize {
        self.used() + self.free()
    }

    /// Allocated share of the heap, 0..=100
    fn percent_used(&self) -> u32 {
        let total = self.total();
        if total == 0 {
            return 0;
        }
        (self.used() as u64 * 100 / total as u64) as u32
    }
}

impl<H: HeapStats + ?Sized> HeapStats for &H {
    fn used(&self) -> usize {
        (**self).used()
    }

    fn free(&self) -> usize {
        (**self).free()
    }
}

const WIDTH: u16 = 120;
const HEIGHT: u16 = 30;
const BAR_WIDTH: i32 = 104;
const BAR_HEIGHT: i32 = 8;

/// 120x30 readout: percentage, used/total bytes and a bar
pub struct MemoryGauge<H> {
    heap: H,
    color: Color,
}

impl<H: HeapStats> MemoryGauge<H> {
    pub fn new(heap: H, color: Color) -> Self {
        Self { heap, color }
    }
}

impl<H: HeapStats> Drawable for MemoryGauge<H> {
    fn width(&self) -> u16 {
        WIDTH
    }

    fn height(&self) -> u16 {
        HEIGHT
    }

    fn draw(&self, surface: &mut dyn Surface, at: Point) {
        let used = self.heap.used();
        let total = self.heap.total();
        let percent = self.heap.percent_used();

        let mut line: String<32> = String::new();
        let _ = write!(line, "mem: {} %", percent);
        surface.text(&line, at.x + 2, at.y + 2, self.color);

        line.clear();
        let _ = write!(line, "{}/{}", used, total);
        surface.text(&line, at.x + 2, at.y + 12, self.color);

        surface.rect(at.x + 2, at.y + 22, BAR_WIDTH, BAR_HEIGHT, self.color);
        surface.fill_rect(at.x + 4, at.y + 24, percent as i32, BAR_HEIGHT - 4, self.color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{OFF, ON};
    use crate::test_support::Canvas;
    use alloc::string::String as StdString;

    struct Fixed {
        used: usize,
        free: usize,
    }

    impl HeapStats for Fixed {
        fn used(&self) -> usize {
            self.used
        }

        fn free(&self) -> usize {
            self.free
        }
    }

    #[test]
    fn test_percent() {
        assert_eq!(Fixed { used: 25, free: 75 }.percent_used(), 25);
        assert_eq!(Fixed { used: 0, free: 0 }.percent_used(), 0);
        assert_eq!(Fixed { used: 10, free: 0 }.percent_used(), 100);
    }

    #[test]
    fn test_gauge_draws_text_and_bar() {
        let heap = Fixed {
            used: 1024,
            free: 3072,
        };
        let gauge = MemoryGauge::new(&heap, ON);
        let mut canvas = Canvas::new(128, 64);

        assert_eq!((gauge.width(), gauge.height()), (120, 30));
        gauge.draw(&mut canvas, Point::new(4, 10));

        assert_eq!(
            canvas.texts,
            [
                (StdString::from("mem: 25 %"), 6, 12),
                (StdString::from("1024/4096"), 6, 22),
            ]
        );
        // Bar outline
        assert_eq!(canvas.get(6, 32), ON);
        assert_eq!(canvas.get(6 + 103, 32 + 7), ON);
        // Fill covers 25 columns from x = 8
        assert_eq!(canvas.get(8, 34), ON);
        assert_eq!(canvas.get(8 + 24, 37), ON);
        assert_eq!(canvas.get(8 + 25, 35), OFF);
    }
}
