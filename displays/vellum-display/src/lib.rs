//! Surface adapters for Vellum
//!
//! This crate provides:
//! - `GraphicsSurface`: a vellum [`Surface`](vellum_core::Surface) over any
//!   `embedded-graphics` draw target that can be flushed
//! - `MonoFrameBuffer`: a 128x64 1-bpp buffer in SH1106/SSD1306 page layout
//! - `Sh1106Sink`: pushes frame buffer pages to an SH1106 panel over I2C
//!
//! # Wiring
//!
//! ```ignore
//! let panel = Sh1106Sink::new(i2c);
//! let mut surface = GraphicsSurface::new(MonoFrameBuffer::new(panel));
//! surface.target_mut().sink_mut().init()?;
//! ```

#![no_std]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod graphics;
pub mod mono;
pub mod sh1106;

pub use graphics::{Flush, GraphicsSurface, IndexedColor};
pub use mono::{MonoFrameBuffer, PageSink, HEIGHT, PAGES, WIDTH};
pub use sh1106::Sh1106Sink;
