use glam::Vec3;
use shipdemo_common::MotionConfig;
use shipdemo_input::InputFrame;

use crate::camera::ThirdPersonCamera;

/// Per-frame ship integrator coupling heading to camera yaw.
///
/// One call is one fixed Euler step; elapsed time is not consulted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShipMotion {
    pub sensitivity: f32,
    pub horizontal_speed: f32,
    pub trigger_factor: f32,
}

impl Default for ShipMotion {
    fn default() -> Self {
        Self::from(&MotionConfig::default())
    }
}

impl From<&MotionConfig> for ShipMotion {
    fn from(cfg: &MotionConfig) -> Self {
        Self {
            sensitivity: cfg.sensitivity,
            horizontal_speed: cfg.horizontal_speed,
            trigger_factor: cfg.trigger_factor,
        }
    }
}

impl ShipMotion {
    /// Ground-plane heading: the camera forward reversed on x/z with y dropped.
    ///
    /// The camera sits behind the ship along `forward()`, so the ship flies
    /// the opposite way.
    pub fn heading(camera: &ThirdPersonCamera) -> Vec3 {
        let f = camera.forward();
        Vec3::new(-f.x, 0.0, -f.z)
    }

    /// Rotate an x/z direction by `angle` radians in the horizontal plane.
    pub fn rotate_heading(heading: Vec3, angle: f32) -> Vec3 {
        let (s, c) = angle.sin_cos();
        Vec3::new(
            c * heading.x + s * heading.z,
            heading.y,
            -s * heading.x + c * heading.z,
        )
    }

    /// Yaw change for this frame.
    pub fn yaw_delta(&self, input: &InputFrame) -> f32 {
        self.sensitivity * input.left_stick.x
    }

    /// Advance `position` one frame and yaw the camera by the same amount the
    /// heading turned. Returns the yaw delta applied.
    pub fn step(
        &self,
        position: &mut Vec3,
        camera: &mut ThirdPersonCamera,
        input: &InputFrame,
    ) -> f32 {
        let rot_y = self.yaw_delta(input);
        let heading = Self::rotate_heading(Self::heading(camera), rot_y);

        position.y += input.trigger_difference() * self.trigger_factor;
        position.x += heading.x * self.horizontal_speed;
        position.z += heading.z * self.horizontal_speed;

        camera.add_rotation(0.0, rot_y);
        rot_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use shipdemo_common::CameraConfig;

    const EPS: f32 = 1e-4;

    fn stock_camera() -> ThirdPersonCamera {
        ThirdPersonCamera::from_config(&CameraConfig::default())
    }

    fn stock_start() -> Vec3 {
        Vec3::new(271.0, 0.0, 1037.0)
    }

    #[test]
    fn heading_is_flat_and_reversed() {
        let cam = stock_camera();
        let f = cam.forward();
        let h = ShipMotion::heading(&cam);
        assert_eq!(h.y, 0.0);
        assert_eq!(h.x, -f.x);
        assert_eq!(h.z, -f.z);
    }

    #[test]
    fn zero_input_keeps_yaw_and_cruises_straight() {
        let motion = ShipMotion::default();
        let mut cam = stock_camera();
        let mut pos = stock_start();
        let yaw = cam.rotation_y();
        let expected = pos + ShipMotion::heading(&cam) * 1.5;

        let rot = motion.step(&mut pos, &mut cam, &InputFrame::NEUTRAL);

        assert_eq!(rot, 0.0);
        assert_eq!(cam.rotation_y(), yaw);
        assert_eq!(pos.y, 0.0);
        assert!((pos - expected).length() < EPS);
    }

    #[test]
    fn full_left_stick_turns_by_sensitivity() {
        let motion = ShipMotion::default();
        let mut cam = stock_camera();
        let mut pos = stock_start();
        let start = pos;
        let yaw = cam.rotation_y();
        let heading = ShipMotion::heading(&cam);
        let input = InputFrame {
            left_stick: Vec2::new(1.0, 0.0),
            ..InputFrame::NEUTRAL
        };

        let rot = motion.step(&mut pos, &mut cam, &input);

        assert_eq!(rot, 0.01);
        assert!((cam.rotation_y() - (yaw + 0.01)).abs() < 1e-6);
        let turned = ShipMotion::rotate_heading(heading, 0.01);
        assert!((pos - (start + turned * 1.5)).length() < EPS);
    }

    #[test]
    fn rotate_heading_preserves_length() {
        let h = Vec3::new(0.3, 0.0, -0.8);
        for i in 0..20 {
            let r = ShipMotion::rotate_heading(h, i as f32 * 0.4);
            assert!((r.length() - h.length()).abs() < 1e-5);
            assert_eq!(r.y, 0.0);
        }
    }

    #[test]
    fn rotate_heading_quarter_turn() {
        let r = ShipMotion::rotate_heading(Vec3::X, std::f32::consts::FRAC_PI_2);
        assert!((r - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-6);
    }

    #[test]
    fn triggers_drive_vertical_motion() {
        let motion = ShipMotion::default();
        let mut cam = stock_camera();
        let mut pos = Vec3::ZERO;
        let up = InputFrame {
            triggers: Vec2::new(0.0, 1.0),
            ..InputFrame::NEUTRAL
        };
        motion.step(&mut pos, &mut cam, &up);
        assert_eq!(pos.y, 0.5);

        let down = InputFrame {
            triggers: Vec2::new(1.0, 0.0),
            ..InputFrame::NEUTRAL
        };
        motion.step(&mut pos, &mut cam, &down);
        assert_eq!(pos.y, 0.0);
    }

    #[test]
    fn both_triggers_cancel() {
        let motion = ShipMotion::default();
        let mut cam = stock_camera();
        let mut pos = Vec3::ZERO;
        let both = InputFrame {
            triggers: Vec2::new(1.0, 1.0),
            ..InputFrame::NEUTRAL
        };
        motion.step(&mut pos, &mut cam, &both);
        assert_eq!(pos.y, 0.0);
    }

    #[test]
    fn horizontal_step_length_is_speed_times_flat_forward() {
        let motion = ShipMotion::default();
        let mut cam = stock_camera();
        let mut pos = Vec3::ZERO;
        let flat = ShipMotion::heading(&cam).length();
        motion.step(&mut pos, &mut cam, &InputFrame::NEUTRAL);
        assert!((pos.length() - flat * 1.5).abs() < EPS);
    }
}
