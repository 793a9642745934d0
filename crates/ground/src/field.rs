use shipdemo_common::GroundConfig;

/// Radially symmetric ripple: `scale · cos(r + t·time_scale) · 10 / r`.
///
/// `r` is the distance from the origin measured in tiles. Amplitude falls off
/// as `1/r`; the origin itself is a flat plateau at `vertical_scale`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundField {
    pub num_tiles: u32,
    pub tile_size: f32,
    pub vertical_scale: f32,
    pub time_scale: f32,
}

impl Default for GroundField {
    fn default() -> Self {
        Self::from(&GroundConfig::default())
    }
}

impl From<&GroundConfig> for GroundField {
    fn from(cfg: &GroundConfig) -> Self {
        Self {
            num_tiles: cfg.num_tiles,
            tile_size: cfg.tile_size,
            vertical_scale: cfg.vertical_scale,
            time_scale: cfg.time_scale,
        }
    }
}

impl GroundField {
    /// Height at world `(x, z)` and animation time `time` (seconds).
    pub fn height(&self, time: f32, x: f32, z: f32) -> f32 {
        if x == 0.0 && z == 0.0 {
            return self.vertical_scale;
        }
        let r = (x * x + z * z).sqrt() / self.tile_size;
        self.vertical_scale * (r + time * self.time_scale).cos() * 10.0 / r
    }

    /// Time after which the field repeats exactly.
    pub fn period(&self) -> f32 {
        std::f32::consts::TAU / self.time_scale
    }

    /// Half the side length of the grid in world units.
    pub fn half_extent(&self) -> f32 {
        self.num_tiles as f32 * self.tile_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_is_plateau_for_any_time() {
        let g = GroundField::default();
        for t in [0.0, 0.5, 1.0, 123.456, -7.0] {
            assert_eq!(g.height(t, 0.0, 0.0), 56.0);
        }
    }

    #[test]
    fn negative_zero_origin_is_still_plateau() {
        let g = GroundField::default();
        assert_eq!(g.height(1.0, -0.0, 0.0), 56.0);
        assert!(g.height(1.0, -0.0, -0.0).is_finite());
    }

    #[test]
    fn periodic_in_time() {
        let g = GroundField::default();
        let period = g.period();
        for (x, z) in [(16.0, 0.0), (-40.0, 100.0), (300.0, -512.0), (1.0, 1.0)] {
            for t in [0.0f32, 0.3, 2.0] {
                let a = g.height(t, x, z);
                let b = g.height(t + period, x, z);
                assert!((a - b).abs() < 0.05 + 1e-3 * a.abs(), "x={x} z={z} t={t}");
            }
        }
    }

    #[test]
    fn radially_symmetric() {
        let g = GroundField::default();
        let a = g.height(0.7, 48.0, 64.0);
        let b = g.height(0.7, -64.0, 48.0);
        let c = g.height(0.7, 80.0, 0.0);
        assert!((a - b).abs() < 1e-3);
        assert!((a - c).abs() < 1e-3);
    }

    #[test]
    fn one_tile_out_at_time_zero() {
        let g = GroundField::default();
        // r = 1 tile: 56 · cos(1) · 10 / 1
        let expected = 56.0 * 1.0f32.cos() * 10.0;
        assert!((g.height(0.0, 16.0, 0.0) - expected).abs() < 1e-3);
    }

    #[test]
    fn amplitude_decays_with_distance() {
        let g = GroundField::default();
        let bound = |r: f32| 56.0 * 10.0 / r;
        for tiles in [2.0f32, 10.0, 50.0] {
            let h = g.height(0.25, tiles * 16.0, 0.0);
            assert!(h.abs() <= bound(tiles) + 1e-3);
        }
    }

    #[test]
    fn extent_and_period_from_config() {
        let g = GroundField::default();
        assert_eq!(g.half_extent(), 1024.0);
        assert!((g.period() - std::f32::consts::TAU / 3.0).abs() < 1e-6);
    }
}
