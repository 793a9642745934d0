use glam::Vec2;
use shipdemo_common::JoystickConfig;

use crate::frame::{AxisMap, InputFrame, RawAxes};

/// Maps raw axis samples to `[-1, 1]` with a dead zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Normalizer {
    pub dead_zone: i32,
    pub max_range: i32,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::from(&JoystickConfig::default())
    }
}

impl From<&JoystickConfig> for Normalizer {
    fn from(cfg: &JoystickConfig) -> Self {
        Self {
            dead_zone: cfg.dead_zone,
            max_range: cfg.max_range,
        }
    }
}

impl Normalizer {
    /// Normalize one raw sample.
    ///
    /// Magnitudes `<= dead_zone` return exactly `0.0`. Everything else is
    /// scaled by `max_range` and clamped to `[-1, 1]`, so the asymmetric
    /// `-32768` end of an `i16` axis still reads `-1.0`.
    pub fn normalize(&self, raw: i32) -> f32 {
        if raw.unsigned_abs() <= self.dead_zone.unsigned_abs() {
            return 0.0;
        }
        (raw as f32 / self.max_range as f32).clamp(-1.0, 1.0)
    }

    /// Build a full frame from raw samples. Triggers use the same symmetric formula.
    pub fn frame(&self, raw: &RawAxes, map: &AxisMap) -> InputFrame {
        let n = |axis: usize| self.normalize(raw.get(axis));
        InputFrame {
            left_stick: Vec2::new(n(map.left_x), n(map.left_y)),
            right_stick: Vec2::new(n(map.right_x), n(map.right_y)),
            triggers: Vec2::new(n(map.left_trigger), n(map.right_trigger)),
        }
    }
}

/// Normalize with the stock dead zone (3000) and range (32767).
pub fn normalize_axis(raw: i32) -> f32 {
    Normalizer::default().normalize(raw)
}
