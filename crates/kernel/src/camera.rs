use glam::Vec3;
use shipdemo_common::{CameraConfig, ViewTransform};

/// Camera orbiting a tracked point at a fixed radius.
///
/// `rotation_x` is pitch and `rotation_y` yaw, both radians. They are plain
/// accumulators: long sessions can grow them past ±2π and nothing wraps them.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ThirdPersonCamera {
    rotation_x: f32,
    rotation_y: f32,
    radius: f32,
}

impl ThirdPersonCamera {
    /// Zero rotation, zero radius.
    pub fn new() -> Self {
        Self::default()
    }

    /// Camera at the configured starting orientation and follow distance.
    pub fn from_config(cfg: &CameraConfig) -> Self {
        let mut cam = Self::new();
        cam.add_rotation(cfg.initial_rotation_x, cfg.initial_rotation_y);
        cam.set_radius(cfg.radius);
        cam
    }

    pub fn rotation_x(&self) -> f32 {
        self.rotation_x
    }

    pub fn rotation_y(&self) -> f32 {
        self.rotation_y
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Accumulate pitch (`dx`) and yaw (`dy`).
    pub fn add_rotation(&mut self, dx: f32, dy: f32) {
        self.rotation_x += dx;
        self.rotation_y += dy;
    }

    /// No bounds checking: zero or negative radii collapse or flip the eye.
    pub fn set_radius(&mut self, r: f32) {
        self.radius = r;
    }

    /// Unit vector from the tracked point toward the eye.
    pub fn forward(&self) -> Vec3 {
        let (sx, cx) = self.rotation_x.sin_cos();
        let (sy, cy) = self.rotation_y.sin_cos();
        Vec3::new(cx * cy, sx, cx * sy)
    }

    /// Look-at view placing the eye `radius` along `forward()` from `tracked`.
    pub fn view_transform(&self, tracked: Vec3) -> ViewTransform {
        ViewTransform {
            eye: tracked + self.forward() * self.radius,
            target: tracked,
            up: Vec3::Y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    const EPS: f32 = 1e-5;

    #[test]
    fn new_camera_points_along_x() {
        let cam = ThirdPersonCamera::new();
        assert!((cam.forward() - Vec3::X).length() < EPS);
        assert_eq!(cam.radius(), 0.0);
    }

    #[test]
    fn forward_is_unit_length() {
        let mut cam = ThirdPersonCamera::new();
        for i in 0..50 {
            cam.add_rotation(0.37 * i as f32, -1.13 * i as f32);
            assert!((cam.forward().length() - 1.0).abs() < EPS);
        }
    }

    #[test]
    fn forward_matches_pitch_and_yaw_formula() {
        let mut cam = ThirdPersonCamera::new();
        cam.add_rotation(0.57, FRAC_PI_2);
        let f = cam.forward();
        assert!((f.x - 0.57f32.cos() * FRAC_PI_2.cos()).abs() < EPS);
        assert!((f.y - 0.57f32.sin()).abs() < EPS);
        assert!((f.z - 0.57f32.cos()).abs() < EPS);
    }

    #[test]
    fn add_rotation_is_invertible() {
        let mut cam = ThirdPersonCamera::from_config(&CameraConfig::default());
        let before = cam.forward();
        cam.add_rotation(0.0, 0.73);
        cam.add_rotation(0.0, -0.73);
        assert!((cam.forward() - before).length() < EPS);
    }

    #[test]
    fn rotation_accumulates_without_wrapping() {
        let mut cam = ThirdPersonCamera::new();
        for _ in 0..10 {
            cam.add_rotation(0.0, PI);
        }
        assert!((cam.rotation_y() - 10.0 * PI).abs() < 1e-4);
        assert_eq!(cam.rotation_x(), 0.0);
    }

    #[test]
    fn view_transform_orbits_at_radius() {
        let mut cam = ThirdPersonCamera::new();
        cam.add_rotation(0.4, 1.2);
        cam.set_radius(50.0);
        let tracked = Vec3::new(10.0, -3.0, 7.0);
        let view = cam.view_transform(tracked);
        assert_eq!(view.target, tracked);
        assert_eq!(view.up, Vec3::Y);
        assert!(((view.eye - tracked).length() - 50.0).abs() < 1e-3);
        assert!(((view.eye - tracked).normalize() - cam.forward()).length() < EPS);
    }

    #[test]
    fn zero_radius_puts_eye_on_target() {
        let cam = ThirdPersonCamera::new();
        let tracked = Vec3::new(1.0, 2.0, 3.0);
        let view = cam.view_transform(tracked);
        assert_eq!(view.eye, view.target);
    }

    #[test]
    fn negative_radius_flips_eye_to_other_side() {
        let mut cam = ThirdPersonCamera::new();
        cam.set_radius(-10.0);
        let view = cam.view_transform(Vec3::ZERO);
        assert!((view.eye - Vec3::new(-10.0, 0.0, 0.0)).length() < EPS);
    }

    #[test]
    fn from_config_uses_initial_values() {
        let cam = ThirdPersonCamera::from_config(&CameraConfig::default());
        assert_eq!(cam.rotation_x(), 0.57);
        assert_eq!(cam.rotation_y(), FRAC_PI_2);
        assert_eq!(cam.radius(), 207.3);
    }
}
