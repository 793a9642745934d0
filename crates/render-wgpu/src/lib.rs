//! wgpu render backend for the spaceship demo.
//!
//! Draws the per-frame ground line list and the ship model. One pipeline is
//! built per [`VertexLayout`](shipdemo_assets::VertexLayout), so a mesh's
//! attribute mask decides which pipeline and buffer stride it is drawn with.
//!
//! # Invariants
//! - Renderer never mutates demo state.
//! - Ship buffers are uploaded once; only the ground buffer is rewritten per frame.

mod gpu;
mod shaders;

pub use gpu::WgpuRenderer;
