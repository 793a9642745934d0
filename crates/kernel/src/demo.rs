use glam::Vec3;
use shipdemo_common::{DemoConfig, ShipPose, ViewTransform};
use shipdemo_input::{AxisMap, InputFrame, InputSource, Normalizer, RawAxes};

use crate::camera::ThirdPersonCamera;
use crate::clock::FrameClock;
use crate::motion::ShipMotion;

/// Everything the demo mutates from frame to frame.
///
/// Built once at startup from a [`DemoConfig`] and owned by whichever loop
/// drives it (desktop window or headless CLI). Renderers only read from it.
#[derive(Debug, Clone)]
pub struct Demo {
    position: Vec3,
    camera: ThirdPersonCamera,
    motion: ShipMotion,
    clock: FrameClock,
    normalizer: Normalizer,
    axis_map: AxisMap,
    input: InputFrame,
    ship_scale: f32,
}

/// What one call to [`Demo::update`] did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUpdate {
    pub input: InputFrame,
    pub yaw_delta: f32,
    pub position: Vec3,
}

impl Demo {
    pub fn new(config: &DemoConfig) -> Self {
        Self {
            position: config.ship.initial_position,
            camera: ThirdPersonCamera::from_config(&config.camera),
            motion: ShipMotion::from(&config.motion),
            clock: FrameClock::new(),
            normalizer: Normalizer::from(&config.joystick),
            axis_map: AxisMap::default(),
            input: InputFrame::NEUTRAL,
            ship_scale: config.ship.scale,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn camera(&self) -> &ThirdPersonCamera {
        &self.camera
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Input normalized during the last update.
    pub fn input(&self) -> &InputFrame {
        &self.input
    }

    /// Animation time for the ground field, in seconds.
    pub fn ground_time(&self) -> f32 {
        self.clock.elapsed()
    }

    /// Run one frame: advance the clock, normalize input, move the ship.
    pub fn update(&mut self, now_ms: u64, raw: &RawAxes) -> FrameUpdate {
        let _span = tracing::trace_span!("demo_update", frame = self.clock.total_frames()).entered();

        self.clock.advance(now_ms);
        self.input = self.normalizer.frame(raw, &self.axis_map);
        let yaw_delta = self
            .motion
            .step(&mut self.position, &mut self.camera, &self.input);

        tracing::trace!(
            x = self.position.x,
            y = self.position.y,
            z = self.position.z,
            yaw = self.camera.rotation_y(),
            "frame stepped"
        );

        FrameUpdate {
            input: self.input,
            yaw_delta,
            position: self.position,
        }
    }

    /// Poll `source` and run one frame with its samples.
    pub fn update_from(&mut self, source: &mut dyn InputSource, now_ms: u64) -> FrameUpdate {
        let raw = source.poll();
        self.update(now_ms, &raw)
    }

    /// Camera view around the ship.
    pub fn view_transform(&self) -> ViewTransform {
        self.camera.view_transform(self.position)
    }

    /// Ship draw pose. Turning by `270° - yaw` about +Y carries the hull's
    /// local +Z nose onto the flight heading, away from the camera.
    pub fn ship_pose(&self) -> ShipPose {
        ShipPose {
            translation: self.position,
            scale: self.ship_scale,
            yaw: 270f32.to_radians() - self.camera.rotation_y(),
        }
    }
}

impl Default for Demo {
    fn default() -> Self {
        Self::new(&DemoConfig::default())
    }
}
