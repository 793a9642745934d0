use glam::Mat4;
use shipdemo_assets::Model;
use shipdemo_common::{DemoConfig, ShipPose, ViewTransform, WindowConfig};
use shipdemo_ground::{GroundField, LineVertex, WireGrid};
use shipdemo_kernel::Demo;

use crate::command::DrawCommand;

pub const CLEAR_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
pub const GROUND_COLOR: [f32; 4] = [0.0, 1.0, 0.0, 1.0];

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Projection {
    pub fn from_config(cfg: &WindowConfig) -> Self {
        let mut p = Self {
            fov_degrees: cfg.fov_degrees,
            aspect: 1.0,
            near: cfg.near,
            far: cfg.far,
        };
        p.set_viewport(cfg.width, cfg.height);
        p
    }

    /// Update the aspect ratio for a new surface size. Zero sizes are clamped to 1.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::from_config(&WindowConfig::default())
    }
}

/// Read-only description of one frame.
#[derive(Debug, Clone)]
pub struct Scene<'a> {
    pub frame: u64,
    pub title: String,
    pub view: ViewTransform,
    pub projection: Projection,
    pub ship: ShipPose,
    pub ground_time: f32,
    pub ground_lines: &'a [LineVertex],
    pub clear_color: [f32; 4],
    pub ground_color: [f32; 4],
}

impl Scene<'_> {
    pub fn view_projection(&self) -> Mat4 {
        self.projection.matrix() * self.view.view_matrix()
    }

    /// Draw list: every ship mesh bracketed by its own transform push/pop,
    /// then the ground lines.
    pub fn commands(&self, model: &Model) -> Vec<DrawCommand> {
        let ship = self.ship.model_matrix();
        let mut out = Vec::with_capacity(model.meshes().len() * 4 + 1);
        for (i, mesh) in model.meshes().iter().enumerate() {
            out.push(DrawCommand::PushTransform(ship));
            out.push(DrawCommand::BindLayout(mesh.layout()));
            out.push(DrawCommand::DrawMesh {
                mesh: i,
                color: model.color(i),
            });
            out.push(DrawCommand::PopTransform);
        }
        out.push(DrawCommand::DrawLines {
            count: self.ground_lines.len() as u32,
            color: self.ground_color,
        });
        out
    }
}

/// Turns demo state into a [`Scene`] each frame, owning the ground line buffer.
pub struct FrameComposer {
    grid: WireGrid,
    lines: Vec<LineVertex>,
    projection: Projection,
    title: String,
}

impl FrameComposer {
    pub fn new(config: &DemoConfig) -> Self {
        let grid = WireGrid::new(GroundField::from(&config.ground));
        let lines = Vec::with_capacity(grid.vertex_count());
        Self {
            grid,
            lines,
            projection: Projection::from_config(&config.window),
            title: config.window.title.clone(),
        }
    }

    /// Largest ground line count any frame will produce.
    pub fn max_ground_vertices(&self) -> usize {
        self.grid.vertex_count()
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.projection.set_viewport(width, height);
    }

    /// Regenerate the ground for the demo's current time and snapshot the frame.
    pub fn compose(&mut self, demo: &Demo) -> Scene<'_> {
        let time = demo.ground_time();
        self.grid.lines_into(time, &mut self.lines);
        Scene {
            frame: demo.clock().total_frames(),
            title: demo.clock().title(&self.title),
            view: demo.view_transform(),
            projection: self.projection,
            ship: demo.ship_pose(),
            ground_time: time,
            ground_lines: &self.lines,
            clear_color: CLEAR_COLOR,
            ground_color: GROUND_COLOR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shipdemo_assets::{VertexLayout, ship_model};
    use shipdemo_common::GroundConfig;
    use shipdemo_input::RawAxes;

    fn small_config() -> DemoConfig {
        DemoConfig {
            ground: GroundConfig {
                num_tiles: 2,
                ..GroundConfig::default()
            },
            ..DemoConfig::default()
        }
    }

    #[test]
    fn projection_aspect_from_window() {
        let p = Projection::default();
        assert!((p.aspect - 1280.0 / 720.0).abs() < 1e-6);
        assert_eq!(p.fov_degrees, 75.0);
    }

    #[test]
    fn zero_viewport_is_clamped() {
        let mut p = Projection::default();
        p.set_viewport(0, 0);
        assert_eq!(p.aspect, 1.0);
        assert!(!p.matrix().col(0).x.is_nan());
    }

    #[test]
    fn compose_tracks_demo() {
        let config = small_config();
        let mut demo = Demo::new(&config);
        demo.update(16, &RawAxes::default());
        let mut composer = FrameComposer::new(&config);
        let scene = composer.compose(&demo);
        assert_eq!(scene.view.target, demo.position());
        assert_eq!(scene.ship.translation, demo.position());
        assert_eq!(scene.ground_lines.len(), 4 * 4 * 8);
        assert_eq!(scene.frame, 1);
        assert_eq!(scene.title, "Spaceship Demo: 0 FPS");
    }

    #[test]
    fn view_projection_puts_ship_in_front() {
        let config = small_config();
        let demo = Demo::new(&config);
        let mut composer = FrameComposer::new(&config);
        let scene = composer.compose(&demo);
        let clip = scene.view_projection() * demo.position().extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(clip.w > 0.0);
        assert!(ndc.x.abs() < 1e-3 && ndc.y.abs() < 1e-3);
        assert!((0.0..=1.0).contains(&ndc.z));
    }

    #[test]
    fn commands_bracket_each_mesh() {
        let config = small_config();
        let demo = Demo::new(&config);
        let model = ship_model().unwrap();
        let mut composer = FrameComposer::new(&config);
        let scene = composer.compose(&demo);
        let cmds = scene.commands(&model);

        assert_eq!(cmds.len(), model.meshes().len() * 4 + 1);
        assert!(matches!(cmds[0], DrawCommand::PushTransform(_)));
        assert_eq!(
            cmds[1],
            DrawCommand::BindLayout(VertexLayout::PositionNormalTexCoord)
        );
        assert!(matches!(cmds[2], DrawCommand::DrawMesh { mesh: 0, .. }));
        assert_eq!(cmds[3], DrawCommand::PopTransform);
        assert_eq!(cmds[5], DrawCommand::BindLayout(VertexLayout::Position));
        assert_eq!(
            cmds.last(),
            Some(&DrawCommand::DrawLines {
                count: 128,
                color: GROUND_COLOR
            })
        );
    }
}
