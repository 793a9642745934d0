//! Rendering adapter: renderer-agnostic frame description.
//!
//! # Invariants
//! - Renderers never mutate demo state; a [`Scene`] is a read-only snapshot.
//! - The ship is drawn as push transform → bind layout → draw → pop transform
//!   per mesh, so any backend only needs a transform stack and one buffer
//!   binding per vertex layout.

mod command;
mod scene;
mod text;

pub use command::{DrawCommand, TransformStack};
pub use scene::{FrameComposer, Projection, Scene};
pub use text::DebugTextRenderer;

use shipdemo_assets::Model;

/// Renderer-agnostic interface for backends that can be driven without a GPU
/// context. Backends that need device handles expose their own `render`.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame of `scene` with the ship `model`.
    fn render(&self, scene: &Scene<'_>, model: &Model) -> Self::Output;
}
