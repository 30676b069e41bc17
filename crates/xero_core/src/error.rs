//! Configuration error types

use thiserror::Error;

/// Errors raised while configuring scroll widgets and frame clocks
///
/// Runtime operations (drags, frame ticks) never fail; only values handed in
/// at construction or configuration time are validated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Deceleration rate must lie strictly between 0 and 1
    #[error("Invalid deceleration rate {0}: expected 0 < rate < 1")]
    InvalidDecelerationRate(f32),

    /// Velocity threshold must be positive and finite
    #[error("Invalid velocity threshold {0}: expected a positive finite value")]
    InvalidVelocityThreshold(f32),

    /// Frame clock rate must be non-zero
    #[error("Invalid frame rate {0}: expected at least 1 fps")]
    InvalidFrameRate(u32),

    /// A layout dimension was NaN or infinite
    #[error("Non-finite {name}: {value}")]
    NonFiniteDimension { name: &'static str, value: f32 },
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, Error>;

/// Reject NaN and infinite layout values
pub fn ensure_finite(name: &'static str, value: f32) -> Result<f32> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::NonFiniteDimension { name, value })
    }
}
