//! Demo configuration, loaded from YAML.
//!
//! Every section derives `Default` with the stock demo constants and is marked
//! `#[serde(default)]`, so a partial file only overrides what it names.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors from loading or validating a config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level demo configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub ship: ShipConfig,
    pub motion: MotionConfig,
    pub joystick: JoystickConfig,
    pub ground: GroundConfig,
}

/// Window and projection parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Spaceship Demo".into(),
            width: 1280,
            height: 720,
            fov_degrees: 75.0,
            near: 1.0,
            far: 10_000.0,
        }
    }
}

/// Initial third-person camera orientation and follow distance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Initial pitch in radians.
    pub initial_rotation_x: f32,
    /// Initial yaw in radians.
    pub initial_rotation_y: f32,
    pub radius: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            initial_rotation_x: 0.57,
            initial_rotation_y: std::f32::consts::FRAC_PI_2,
            radius: 207.3,
        }
    }
}

/// Ship spawn point and draw scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipConfig {
    pub initial_position: Vec3,
    pub scale: f32,
}

impl Default for ShipConfig {
    fn default() -> Self {
        Self {
            initial_position: Vec3::new(271.0, 0.0, 1037.0),
            scale: 0.075,
        }
    }
}

/// Per-frame motion constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Yaw radians per frame at full left-stick deflection.
    pub sensitivity: f32,
    /// World units per frame along the heading.
    pub horizontal_speed: f32,
    /// World units per frame per unit of trigger difference.
    pub trigger_factor: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            sensitivity: 0.01,
            horizontal_speed: 1.5,
            trigger_factor: 0.5,
        }
    }
}

/// Raw axis range handling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JoystickConfig {
    /// Raw magnitudes at or below this are snapped to zero.
    pub dead_zone: i32,
    /// Raw value that maps to full deflection.
    pub max_range: i32,
}

impl Default for JoystickConfig {
    fn default() -> Self {
        Self {
            dead_zone: 3000,
            max_range: 32767,
        }
    }
}

/// Procedural ground constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundConfig {
    /// Tiles on each side of the origin along both axes.
    pub num_tiles: u32,
    pub tile_size: f32,
    pub vertical_scale: f32,
    pub time_scale: f32,
}

/// Largest ground vertex buffer a frame may need, in bytes: wgpu's default
/// `max_buffer_size` (256 MiB).
pub const MAX_GROUND_BUFFER_BYTES: u64 = 256 << 20;

/// Bytes per ground line vertex (three `f32`).
const GROUND_VERTEX_BYTES: u64 = 12;

impl GroundConfig {
    /// Line vertices per frame: `(2N)²` cells, 4 edges of 2 endpoints each.
    /// `None` if the count does not fit in a `u64`.
    pub fn line_vertex_count(&self) -> Option<u64> {
        let side = u64::from(self.num_tiles).checked_mul(2)?;
        side.checked_mul(side)?.checked_mul(8)
    }
}

impl Default for GroundConfig {
    fn default() -> Self {
        Self {
            num_tiles: 64,
            tile_size: 16.0,
            vertical_scale: 56.0,
            time_scale: 3.0,
        }
    }
}

impl DemoConfig {
    /// Parse a config from YAML text and validate it.
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&text)?;
        tracing::debug!(path = %path.display(), "loaded demo config");
        Ok(config)
    }

    /// Load `path` if given, otherwise use the built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    /// Serialize to YAML (used by `--dump-config` style tooling and tests).
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Reject values the demo cannot run with.
    ///
    /// The follow radius is unchecked; zero or negative radii degenerate the view.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid("window size must be non-zero".into()));
        }
        if self.window.near <= 0.0 || self.window.far <= self.window.near {
            return Err(ConfigError::Invalid(
                "projection requires 0 < near < far".into(),
            ));
        }
        if self.ground.num_tiles == 0 {
            return Err(ConfigError::Invalid("ground.num_tiles must be positive".into()));
        }
        let ground_bytes = self
            .ground
            .line_vertex_count()
            .and_then(|n| n.checked_mul(GROUND_VERTEX_BYTES));
        if !ground_bytes.is_some_and(|b| b <= MAX_GROUND_BUFFER_BYTES) {
            return Err(ConfigError::Invalid(format!(
                "ground.num_tiles {} needs more than {MAX_GROUND_BUFFER_BYTES} bytes of line vertices",
                self.ground.num_tiles
            )));
        }
        if self.ground.tile_size <= 0.0 {
            return Err(ConfigError::Invalid("ground.tile_size must be positive".into()));
        }
        if self.joystick.max_range <= 0 {
            return Err(ConfigError::Invalid("joystick.max_range must be positive".into()));
        }
        if self.joystick.dead_zone < 0 || self.joystick.dead_zone >= self.joystick.max_range {
            return Err(ConfigError::Invalid(
                "joystick.dead_zone must lie in [0, max_range)".into(),
            ));
        }
        Ok(())
    }
}
