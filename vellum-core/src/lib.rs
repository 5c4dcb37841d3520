//! Vellum Core
//!
//! Board-agnostic UI runtime for small displays: an activity stack with
//! lifecycle hooks, an event queue that serializes navigation and user
//! events, and a box-model layout protocol rendered into a pixel surface at
//! a fixed frame rate.
//!
//! The crate is `no_std` and needs an allocator. Timing and display hardware
//! stay outside: the engine reads a [`Clock`], draws into a [`Surface`] and
//! reports how long the caller should sleep.

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

#[macro_use]
mod fmt;

pub mod activity;
pub mod config;
pub mod engine;
pub mod error;
pub mod surface;
pub mod view;
pub mod widgets;

#[cfg(test)]
mod test_support;

pub use activity::{into_factory, Activity, ActivityFactory};
pub use config::EngineConfig;
pub use engine::control::{ActivityControl, EventControl};
pub use engine::events::{Event, Name, Payload, CLICK};
pub use engine::frame::{Clock, FrameReport};
pub use engine::{Engine, EngineStats, StopHandle};
pub use error::{
    CallbackFault, CallbackResult, ConfigError, ControlError, EngineError, RegistryError,
    SurfaceError,
};
pub use surface::{Color, Surface};
pub use view::{BasicView, BoxStyle, ColumnView, Drawable, Edges, Element, Point, Size, View};
