//! Vellum Runtime
//!
//! Drives a [`vellum_core::Engine`] on an embassy executor:
//! - [`run`] / [`run_with_mailbox`]: the paced async frame loop
//! - [`Mailbox`]: interrupt-safe event hand-off into the engine
//! - [`RuntimeConfig`]: TOML configuration with an embedded default
//! - [`HeapMonitor`]: allocator statistics for the housekeeping hook
//!
//! # Example
//!
//! ```ignore
//! static INPUT: Mailbox<CriticalSectionRawMutex, 8> = Mailbox::new();
//!
//! let config = RuntimeConfig::embedded_default()?;
//! let mut engine = config.build_engine()?;
//! engine.register("home", Home::new)?;
//! engine.set_housekeeping(HeapMonitor::new(AllocatorStats(&HEAP)).housekeeping());
//! config.bootstrap(&mut engine)?;
//!
//! run_with_mailbox(&mut engine, &mut surface, &EmbassyClock, &mut Delay, &INPUT).await?;
//! ```

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

#[macro_use]
mod fmt;

pub mod clock;
pub mod config;
pub mod frame_loop;
pub mod heap;
pub mod mailbox;

pub use clock::EmbassyClock;
pub use config::{parse_config, LoadError, RuntimeConfig, DEFAULT_CONFIG};
pub use frame_loop::{run, run_with_mailbox};
pub use heap::{AllocatorStats, HeapMonitor, HeapReport};
pub use mailbox::{Mailbox, MailboxError};
