use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Look-at view: camera eye, the point it faces, and the up vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 10.0, 10.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
        }
    }
}

impl ViewTransform {
    /// Right-handed view matrix.
    ///
    /// A degenerate view (eye == target) produces a matrix full of NaN; callers
    /// that allow a zero follow radius must tolerate that.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
}

/// Where and how the ship is drawn: translation, uniform scale, yaw about +Y.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShipPose {
    pub translation: Vec3,
    pub scale: f32,
    /// Heading in radians about +Y.
    pub yaw: f32,
}

impl Default for ShipPose {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            scale: 1.0,
            yaw: 0.0,
        }
    }
}

impl ShipPose {
    /// Translate, then scale, then rotate: the model matrix applied to hull vertices.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.translation)
            * Mat4::from_scale(Vec3::splat(self.scale))
            * Mat4::from_rotation_y(self.yaw)
    }
}
