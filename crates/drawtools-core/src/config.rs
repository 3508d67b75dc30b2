//! Tunable parameters for the drawing tools.

use crate::snap::{SNAP_MEMORY_RADIUS, SNAP_RADIUS, SnapRadii};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Default radius (document units) around a handle that counts as a hit.
pub const DEFAULT_HANDLE_TOLERANCE: f64 = 4.0;
/// Default slack (document units) for whole-object hit tests.
pub const DEFAULT_HIT_TOLERANCE: f64 = 2.0;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Radius `{name}` must be positive, got {value}")]
    InvalidRadius { name: &'static str, value: f64 },
    #[error("Snap memory radius ({memory}) must be larger than the snap radius ({active})")]
    MemoryRadiusTooSmall { active: f64, memory: f64 },
}

/// Parameters shared by every tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Distance at which a dragged handle locks onto another object's handle.
    pub snap_radius: f64,
    /// Distance within which an established snap keeps being shown.
    pub snap_memory_radius: f64,
    /// Hit radius for selection handles.
    pub handle_tolerance: f64,
    /// Slack for hit-testing whole objects.
    pub hit_tolerance: f64,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            snap_radius: SNAP_RADIUS,
            snap_memory_radius: SNAP_MEMORY_RADIUS,
            handle_tolerance: DEFAULT_HANDLE_TOLERANCE,
            hit_tolerance: DEFAULT_HIT_TOLERANCE,
        }
    }
}

impl ToolConfig {
    /// Parse and validate a JSON configuration. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::debug!("Loaded tool config from {:?}", path);
        Ok(config)
    }

    /// Check that every radius is positive and the snap radii are ordered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let radii = [
            ("snap_radius", self.snap_radius),
            ("snap_memory_radius", self.snap_memory_radius),
            ("handle_tolerance", self.handle_tolerance),
            ("hit_tolerance", self.hit_tolerance),
        ];
        for (name, value) in radii {
            // NaN fails this check too
            if !(value > 0.0) {
                return Err(ConfigError::InvalidRadius { name, value });
            }
        }
        if self.snap_memory_radius <= self.snap_radius {
            return Err(ConfigError::MemoryRadiusTooSmall {
                active: self.snap_radius,
                memory: self.snap_memory_radius,
            });
        }
        Ok(())
    }

    /// The snap radii used by the snap engine.
    pub fn snap_radii(&self) -> SnapRadii {
        SnapRadii::new(self.snap_radius, self.snap_memory_radius)
    }
}
