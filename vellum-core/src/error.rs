//! Error types
//!
//! Errors are split by how they are handled:
//! - [`ControlError`] and [`RegistryError`] are contract violations, returned
//!   immediately at the call site and never queued
//! - [`EngineError`] is a structural violation found while dispatching; it is
//!   fatal to the frame loop
//! - [`CallbackFault`] is returned by event handlers; the engine logs it and
//!   keeps going
//! - [`SurfaceError`] comes from the display driver when flushing

use crate::engine::events::Name;

/// Invalid use of a control facade
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlError {
    /// Name was empty
    EmptyName,
    /// Name exceeds `MAX_NAME_LEN`
    NameTooLong,
    /// Name contains whitespace or control characters
    InvalidName,
    /// Pending event buffer is full
    QueueFull,
}

/// Activity registry errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegistryError {
    /// No room for another activity
    Full,
    /// The frame loop has started; the registry is read-only
    Sealed,
    /// The activity name was rejected
    Name(ControlError),
}

impl From<ControlError> for RegistryError {
    fn from(e: ControlError) -> Self {
        RegistryError::Name(e)
    }
}

/// Structural failures raised while dispatching
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EngineError {
    /// No activity is registered under this name
    UnknownActivity(Name),
    /// Pop requested with no activity on the stack
    EmptyStack,
    /// Push would exceed `MAX_STACK_DEPTH`
    StackOverflow,
}

/// Engine configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Width or height is zero
    ZeroDimension,
    /// Target frame rate is zero
    ZeroFps,
    /// Target frame rate leaves less than 1 ms per frame
    FpsTooHigh,
}

/// Display driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SurfaceError {
    /// Communication error with the panel
    Communication,
    /// Panel not initialized
    NotInitialized,
}

/// Failure reported by an event handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CallbackFault {
    /// The handler could not use the payload it was given
    UnexpectedPayload,
    /// The handler failed for its own reason
    Failed(&'static str),
}

/// Result returned by event handlers
pub type CallbackResult = Result<(), CallbackFault>;
