//! Runtime configuration
//!
//! Loaded from TOML. A default is embedded in the firmware image so a board
//! boots even without a configuration of its own.
//!
//! ```toml
//! start = "home"
//!
//! [engine]
//! width = 128
//! height = 64
//! target_fps = 20
//! housekeeping = true
//! ```

use alloc::string::String;

use serde::Deserialize;
use vellum_core::engine::events;
use vellum_core::{ConfigError, ControlError, Engine, EngineConfig, Name};

/// Configuration compiled into the image
pub const DEFAULT_CONFIG: &str = include_str!("../display.toml");

/// Configuration loading errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoadError {
    /// Not valid TOML, or fields of the wrong type
    Parse,
    /// Engine section rejected
    Invalid(ConfigError),
    /// Start activity name rejected
    InvalidStart(ControlError),
}

impl From<ConfigError> for LoadError {
    fn from(e: ConfigError) -> Self {
        LoadError::Invalid(e)
    }
}

#[derive(Deserialize)]
struct RawConfig {
    start: Option<String>,
    #[serde(default)]
    engine: EngineConfig,
}

/// Validated runtime configuration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RuntimeConfig {
    /// Activity pushed before the first frame
    pub start: Option<Name>,
    pub engine: EngineConfig,
}

/// Parse and validate a TOML configuration
pub fn parse_config(input: &str) -> Result<RuntimeConfig, LoadError> {
    let raw: RawConfig = toml::from_str(input).map_err(|_| {
        warn!("TOML parse error in runtime configuration");
        LoadError::Parse
    })?;

    let start = raw
        .start
        .as_deref()
        .map(events::name)
        .transpose()
        .map_err(LoadError::InvalidStart)?;
    raw.engine.validate()?;

    Ok(RuntimeConfig {
        start,
        engine: raw.engine,
    })
}

impl RuntimeConfig {
    /// The configuration compiled into the image
    pub fn embedded_default() -> Result<Self, LoadError> {
        parse_config(DEFAULT_CONFIG)
    }

    pub fn build_engine(&self) -> Result<Engine, ConfigError> {
        info!(
            "Engine: {}x{} @ {} fps",
            self.engine.width,
            self.engine.height,
            self.engine.target_fps
        );
        Engine::new(self.engine)
    }

    /// Queue the configured start activity, if any
    ///
    /// Call after every activity is registered; the name is checked against
    /// the registry on the first tick.
    pub fn bootstrap(&self, engine: &mut Engine) -> Result<(), ControlError> {
        match &self.start {
            Some(start) => {
                if !engine.registry().contains(start) {
                    warn!("Start activity '{}' is not registered", start.as_str());
                }
                engine.start_from(start)
            }
            None => {
                debug!("No start activity configured");
                Ok(())
            }
        }
    }
}
