//! Developer tooling for the spaceship demo.
//!
//! Read-only views over a running [`shipdemo_kernel::Demo`], shared by the
//! CLI and the desktop HUD.

mod inspector;

pub use inspector::{DemoInspector, DemoSummary};
