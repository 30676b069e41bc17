//! Geometric velocity decay
//!
//! Momentum is modelled per frame: the offset moves by `velocity * dt`, then
//! velocity is multiplied by a constant rate in (0, 1). Motion stops once the
//! velocity magnitude falls below a threshold.

use xero_core::{Error, Result};

/// Configuration for momentum decay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayConfig {
    /// Fraction of velocity kept each frame (0 < rate < 1)
    pub rate: f32,
    /// Velocity magnitude (points/second) below which motion stops
    pub velocity_threshold: f32,
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            rate: 0.95,
            velocity_threshold: 0.1,
        }
    }
}

impl DecayConfig {
    /// Create a validated config
    pub fn new(rate: f32, velocity_threshold: f32) -> Result<Self> {
        let config = Self {
            rate,
            velocity_threshold,
        };
        config.validate()?;
        Ok(config)
    }

    /// Short glide, stops quickly
    pub fn fast() -> Self {
        Self {
            rate: 0.9,
            ..Default::default()
        }
    }

    /// Long glide
    pub fn slow() -> Self {
        Self {
            rate: 0.98,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.rate > 0.0 && self.rate < 1.0) {
            return Err(Error::InvalidDecelerationRate(self.rate));
        }
        if !(self.velocity_threshold.is_finite() && self.velocity_threshold > 0.0) {
            return Err(Error::InvalidVelocityThreshold(self.velocity_threshold));
        }
        Ok(())
    }

    /// Velocity after one frame
    pub fn step(&self, velocity: f32) -> f32 {
        velocity * self.rate
    }

    /// Whether motion at this velocity counts as settled
    pub fn is_settled(&self, velocity: f32) -> bool {
        velocity.abs() < self.velocity_threshold
    }

    /// Number of frames until a fling at `velocity` settles, ignoring bounds
    pub fn frames_to_settle(&self, velocity: f32) -> u32 {
        let speed = velocity.abs();
        if speed < self.velocity_threshold {
            return 1;
        }
        let frames = (self.velocity_threshold / speed).ln() / self.rate.ln();
        frames.floor() as u32 + 1
    }

    /// Total travel of a fling at `velocity` with frames of `dt` seconds,
    /// ignoring bounds. Same sign as `velocity`.
    pub fn projected_distance(&self, velocity: f32, dt: f32) -> f32 {
        velocity * dt / (1.0 - self.rate)
    }
}
