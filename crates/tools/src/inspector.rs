use glam::Vec3;
use serde::Serialize;
use shipdemo_kernel::Demo;

/// Demo inspector for developer tooling.
///
/// Snapshots the ship, camera and clock without touching simulation state.
pub struct DemoInspector;

impl DemoInspector {
    pub fn summary(demo: &Demo) -> DemoSummary {
        let camera = demo.camera();
        let view = demo.view_transform();
        DemoSummary {
            frame: demo.clock().total_frames(),
            fps: demo.clock().fps(),
            elapsed: demo.clock().elapsed(),
            position: demo.position().to_array(),
            yaw: camera.rotation_y(),
            pitch: camera.rotation_x(),
            radius: camera.radius(),
            eye: view.eye.to_array(),
        }
    }

    /// Horizontal distance the ship has covered from `origin`.
    pub fn ground_distance(demo: &Demo, origin: Vec3) -> f32 {
        let d = demo.position() - origin;
        (d.x * d.x + d.z * d.z).sqrt()
    }
}

/// Point-in-time view of the demo.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemoSummary {
    pub frame: u64,
    pub fps: u32,
    pub elapsed: f32,
    pub position: [f32; 3],
    /// Camera yaw (`rotation_y`) in radians.
    pub yaw: f32,
    /// Camera pitch (`rotation_x`) in radians.
    pub pitch: f32,
    pub radius: f32,
    pub eye: [f32; 3],
}

impl std::fmt::Display for DemoSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Demo: frame={} fps={} t={:.2}s pos=({:.2}, {:.2}, {:.2}) yaw={:.3} pitch={:.3}",
            self.frame,
            self.fps,
            self.elapsed,
            self.position[0],
            self.position[1],
            self.position[2],
            self.yaw,
            self.pitch,
        )
    }
}
