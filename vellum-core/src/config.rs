//! Engine configuration
//!
//! Describes the drawing area and the frame pacing target. The type can be
//! deserialized (feature `serde`) so that it can live in a TOML file next to
//! the rest of the board configuration.

use crate::error::ConfigError;
use crate::view::Size;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Highest supported frame rate (1 ms budget)
pub const MAX_TARGET_FPS: u16 = 1000;

/// Engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Surface width in pixels
    pub width: u16,
    /// Surface height in pixels
    pub height: u16,
    /// Target frames per second
    pub target_fps: u16,
    /// Run the housekeeping callback once per cycle
    pub housekeeping: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: 128,
            height: 64,
            target_fps: 20,
            housekeeping: true,
        }
    }
}

impl EngineConfig {
    /// Check the configuration for values the engine cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroDimension);
        }
        if self.target_fps == 0 {
            return Err(ConfigError::ZeroFps);
        }
        if self.target_fps > MAX_TARGET_FPS {
            return Err(ConfigError::FpsTooHigh);
        }
        Ok(())
    }

    /// Per-frame time budget in milliseconds
    pub fn frame_budget_ms(&self) -> u32 {
        1000 / u32::from(self.target_fps.max(1))
    }

    /// Space offered to the root view of the resident activity
    pub fn available_space(&self) -> Size {
        Size::new(i32::from(self.width), i32::from(self.height))
    }
}
