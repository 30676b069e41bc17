//! Xero configuration file handling

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use xero_animation::DecayConfig;
use xero_core::error::ensure_finite;
use xero_core::{Insets, Size};
use xero_layout::ScrollConfig;

/// Default config file name looked up in a directory
pub const CONFIG_FILE: &str = "xero.toml";

/// Top-level Xero configuration (xero.toml)
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct XeroConfig {
    #[serde(default)]
    pub viewport: ViewportConfig,
    #[serde(default)]
    pub safe_area: SafeAreaConfig,
    #[serde(default)]
    pub scroll: ScrollSection,
    #[serde(default)]
    pub clock: ClockConfig,
    #[serde(default)]
    pub demo: DemoConfig,
}

/// Viewport size in points
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ViewportConfig {
    #[serde(default = "default_width")]
    pub width: f32,
    #[serde(default = "default_height")]
    pub height: f32,
}

fn default_width() -> f32 {
    390.0
}

fn default_height() -> f32 {
    844.0
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

/// Safe-area insets in points
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct SafeAreaConfig {
    #[serde(default)]
    pub top: f32,
    #[serde(default)]
    pub bottom: f32,
}

/// Momentum tuning
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ScrollSection {
    #[serde(default = "default_deceleration_rate")]
    pub deceleration_rate: f32,
    #[serde(default = "default_velocity_threshold")]
    pub velocity_threshold: f32,
}

fn default_deceleration_rate() -> f32 {
    DecayConfig::default().rate
}

fn default_velocity_threshold() -> f32 {
    DecayConfig::default().velocity_threshold
}

impl Default for ScrollSection {
    fn default() -> Self {
        Self {
            deceleration_rate: default_deceleration_rate(),
            velocity_threshold: default_velocity_threshold(),
        }
    }
}

/// Frame clock settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ClockConfig {
    #[serde(default = "default_fps")]
    pub fps: u32,
    /// Safety cap on frames driven for one fling
    #[serde(default = "default_max_frames")]
    pub max_frames: u32,
}

fn default_fps() -> u32 {
    60
}

fn default_max_frames() -> u32 {
    10_000
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            max_frames: default_max_frames(),
        }
    }
}

/// Demo content: a stack of equally tall items
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DemoConfig {
    #[serde(default = "default_items")]
    pub items: usize,
    #[serde(default = "default_item_height")]
    pub item_height: f32,
}

fn default_items() -> usize {
    20
}

fn default_item_height() -> f32 {
    200.0
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            items: default_items(),
            item_height: default_item_height(),
        }
    }
}

impl XeroConfig {
    /// Load configuration from a file, or from `xero.toml` inside a directory
    pub fn load(path: &Path) -> Result<Self> {
        let config_path = if path.is_dir() {
            path.join(CONFIG_FILE)
        } else {
            path.to_path_buf()
        };

        if !config_path.exists() {
            anyhow::bail!("No config found at {}", config_path.display());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let config: XeroConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid configuration in {}", config_path.display()))?;

        tracing::debug!("loaded config from {}", config_path.display());
        Ok(config)
    }

    /// Load from `path` if given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Check every value the scroll region and clock will consume
    pub fn validate(&self) -> Result<()> {
        ensure_finite("viewport width", self.viewport.width)?;
        ensure_finite("viewport height", self.viewport.height)?;
        ensure_finite("safe area top", self.safe_area.top)?;
        ensure_finite("safe area bottom", self.safe_area.bottom)?;
        ensure_finite("item height", self.demo.item_height)?;
        self.scroll_config()?;
        if self.clock.fps == 0 {
            return Err(xero_core::Error::InvalidFrameRate(0).into());
        }
        Ok(())
    }

    pub fn viewport(&self) -> Size {
        Size::new(self.viewport.width, self.viewport.height)
    }

    pub fn safe_area(&self) -> Insets {
        Insets::new(self.safe_area.top, self.safe_area.bottom)
    }

    pub fn scroll_config(&self) -> xero_core::Result<ScrollConfig> {
        ScrollConfig::new(DecayConfig::new(
            self.scroll.deceleration_rate,
            self.scroll.velocity_threshold,
        )?)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}
