use glam::Mat4;
use shipdemo_assets::VertexLayout;

/// One step of a frame, in submission order.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Draw `count` ground line vertices (pairs form segments) in world space.
    DrawLines { count: u32, color: [f32; 4] },
    /// Multiply `Mat4` onto the current model transform.
    PushTransform(Mat4),
    /// Select the vertex buffer format for the following mesh draws.
    BindLayout(VertexLayout),
    /// Draw mesh `mesh` of the model with the current transform and layout.
    DrawMesh { mesh: usize, color: [f32; 4] },
    /// Restore the model transform from before the matching push.
    PopTransform,
}

/// Model-matrix stack replaying `PushTransform` / `PopTransform`.
#[derive(Debug, Clone)]
pub struct TransformStack {
    stack: Vec<Mat4>,
}

impl Default for TransformStack {
    fn default() -> Self {
        Self {
            stack: vec![Mat4::IDENTITY],
        }
    }
}

impl TransformStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, m: Mat4) {
        let top = self.current();
        self.stack.push(top * m);
    }

    /// Pop one level. The identity at the bottom is never removed.
    pub fn pop(&mut self) {
        if self.stack.len() > 1 {
            self.stack.pop();
        } else {
            tracing::warn!("transform stack underflow ignored");
        }
    }

    pub fn current(&self) -> Mat4 {
        self.stack.last().copied().unwrap_or(Mat4::IDENTITY)
    }

    pub fn depth(&self) -> usize {
        self.stack.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn push_composes_and_pop_restores() {
        let mut s = TransformStack::new();
        s.push(Mat4::from_translation(Vec3::X));
        s.push(Mat4::from_scale(Vec3::splat(2.0)));
        let p = s.current().transform_point3(Vec3::ONE);
        assert_eq!(p, Vec3::new(3.0, 2.0, 2.0));
        assert_eq!(s.depth(), 2);
        s.pop();
        s.pop();
        assert_eq!(s.current(), Mat4::IDENTITY);
    }

    #[test]
    fn underflow_keeps_identity() {
        let mut s = TransformStack::new();
        s.pop();
        assert_eq!(s.depth(), 0);
        assert_eq!(s.current(), Mat4::IDENTITY);
    }
}
