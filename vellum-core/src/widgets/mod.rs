//! Ready-made drawables

pub mod memory;
pub mod pixel;

pub use memory::{HeapStats, MemoryGauge};
pub use pixel::Pixel;
