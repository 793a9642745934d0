use std::fmt::Write;

use shipdemo_assets::Model;

use crate::Renderer;
use crate::command::{DrawCommand, TransformStack};
use crate::scene::Scene;

/// Debug text renderer.
///
/// Replays the frame's draw commands against a transform stack and writes a
/// human-readable trace. Used by the CLI and to test the command contract
/// without a GPU.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, scene: &Scene<'_>, model: &Model) -> String {
        let mut out = String::new();
        let v = &scene.view;
        let s = &scene.ship;
        let _ = writeln!(
            out,
            "=== {} (frame={}, t={:.3}) ===",
            scene.title, scene.frame, scene.ground_time
        );
        let _ = writeln!(
            out,
            "Camera: eye=({:.1}, {:.1}, {:.1}) target=({:.1}, {:.1}, {:.1}) fov={:.0}",
            v.eye.x, v.eye.y, v.eye.z, v.target.x, v.target.y, v.target.z, scene.projection.fov_degrees
        );
        let _ = writeln!(
            out,
            "Ship: pos=({:.2}, {:.2}, {:.2}) scale={:.3} yaw={:.1}deg",
            s.translation.x,
            s.translation.y,
            s.translation.z,
            s.scale,
            s.yaw.to_degrees()
        );

        let mut stack = TransformStack::new();
        for cmd in scene.commands(model) {
            match cmd {
                DrawCommand::PushTransform(m) => {
                    stack.push(m);
                    let t = stack.current().w_axis;
                    let _ = writeln!(out, "  push  -> origin=({:.1}, {:.1}, {:.1})", t.x, t.y, t.z);
                }
                DrawCommand::BindLayout(layout) => {
                    let _ = writeln!(out, "  bind  {} stride={}", layout.name(), layout.stride());
                }
                DrawCommand::DrawMesh { mesh, .. } => {
                    let (name, tris) = model
                        .meshes()
                        .get(mesh)
                        .map(|m| (m.name.as_str(), m.faces.triangle_count()))
                        .unwrap_or(("?", 0));
                    let _ = writeln!(out, "  draw  [{mesh}] {name} triangles={tris}");
                }
                DrawCommand::PopTransform => {
                    stack.pop();
                    let _ = writeln!(out, "  pop   depth={}", stack.depth());
                }
                DrawCommand::DrawLines { count, .. } => {
                    let _ = writeln!(out, "  lines ground vertices={count} segments={}", count / 2);
                }
            }
        }
        out
    }
}
