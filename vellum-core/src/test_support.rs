//! In-memory fixtures for unit tests

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::cell::RefCell;

use crate::engine::frame::Clock;
use crate::error::SurfaceError;
use crate::surface::{Color, Surface, OFF};
use crate::view::{Drawable, Point, Size, View};

/// Pixel buffer that records text and flushes
pub struct Canvas {
    width: i32,
    height: i32,
    pixels: Vec<Color>,
    pub texts: Vec<(String, i32, i32)>,
    pub flushes: usize,
    pub fail_flush: bool,
}

impl Canvas {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            pixels: vec![OFF; (width * height) as usize],
            texts: Vec::new(),
            flushes: 0,
            fail_flush: false,
        }
    }

    pub fn get(&self, x: i32, y: i32) -> Color {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return OFF;
        }
        self.pixels[(y * self.width + x) as usize]
    }

    /// Number of pixels not set to `OFF`
    pub fn lit(&self) -> usize {
        self.pixels.iter().filter(|&&p| p != OFF).count()
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }
}

impl Surface for Canvas {
    fn fill(&mut self, color: Color) {
        self.pixels.iter_mut().for_each(|p| *p = color);
        self.texts.clear();
    }

    fn pixel(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return;
        }
        self.pixels[(y * self.width + x) as usize] = color;
    }

    fn text(&mut self, text: &str, x: i32, y: i32, _color: Color) {
        self.texts.push((String::from(text), x, y));
    }

    fn flush(&mut self) -> Result<(), SurfaceError> {
        if self.fail_flush {
            return Err(SurfaceError::Communication);
        }
        self.flushes += 1;
        Ok(())
    }
}

/// Solid rectangle drawable
pub struct Block {
    width: u16,
    height: u16,
    color: Color,
}

impl Block {
    pub fn new(width: u16, height: u16, color: Color) -> Self {
        Self {
            width,
            height,
            color,
        }
    }
}

impl Drawable for Block {
    fn width(&self) -> u16 {
        self.width
    }

    fn height(&self) -> u16 {
        self.height
    }

    fn draw(&self, surface: &mut dyn Surface, at: Point) {
        surface.fill_rect(
            at.x,
            at.y,
            i32::from(self.width),
            i32::from(self.height),
            self.color,
        );
    }
}

/// View that records the space it is offered and reports a fixed size
pub struct Probe {
    size: Size,
    calls: Rc<RefCell<Vec<Size>>>,
}

impl Probe {
    pub fn new(size: Size) -> (Self, Rc<RefCell<Vec<Size>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        (
            Self {
                size,
                calls: calls.clone(),
            },
            calls,
        )
    }
}

impl View for Probe {
    fn calc(&mut self, available: Size) -> Size {
        self.calls.borrow_mut().push(available);
        self.size
    }

    fn draw(&self, _surface: &mut dyn Surface, _at: Point) {}
}

/// Clock that advances by `step` ms on every read
///
/// The engine reads the clock twice per tick, so each tick appears to take
/// `step` ms.
pub struct StepClock {
    now: core::cell::Cell<u64>,
    step: u64,
}

impl StepClock {
    pub fn new(step: u64) -> Self {
        Self {
            now: core::cell::Cell::new(0),
            step,
        }
    }
}

impl Clock for StepClock {
    fn now_ms(&self) -> u64 {
        let now = self.now.get();
        self.now.set(now + self.step);
        now
    }
}
