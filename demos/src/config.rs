//! RON configuration shared by the demo binaries.

use std::fmt;
use std::fs;
use std::path::Path;

use gamelab_core::Point;
use gamelab_flow::FieldConfig;
use gamelab_search::MatchConfig;
use gamelab_steer::SteeringConfig;
use serde::{Deserialize, Serialize};

/// Everything a demo run can be configured with. Missing fields take their
/// defaults, so an empty `()` file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub field: FieldConfig,
    /// Obstacle cells toggled on before the first update.
    pub obstacles: Vec<Point>,
    /// ASCII map replacing `field`'s size, start, goal and `obstacles`.
    pub map: Option<String>,
    /// Simulation ticks to run.
    pub ticks: u32,
    /// Seconds per tick.
    pub dt: f32,
    pub game: MatchConfig,
    pub steering: SteeringConfig,
    /// Seed for every random choice; unseeded runs use the OS generator.
    pub seed: Option<u64>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            field: FieldConfig::default(),
            obstacles: Vec::new(),
            map: None,
            ticks: 900,
            dt: 1.0 / 60.0,
            game: MatchConfig::default(),
            steering: SteeringConfig::default(),
            seed: None,
        }
    }
}

impl DemoConfig {
    /// Read a RON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_ron(&text)
    }

    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        ron::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn to_ron(&self) -> Result<String, ConfigError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))
    }
}

/// Errors that can occur while loading or saving a [`DemoConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Io(String),
    Parse(String),
    Serialize(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "config: {e}"),
            Self::Parse(e) => write!(f, "config: parse error: {e}"),
            Self::Serialize(e) => write!(f, "config: serialize error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}
