//! Demo kernel: third-person camera, ship motion, frame clock, frame stepping.
//!
//! # Invariants
//! - Camera yaw changes by exactly the ship's heading change each frame.
//! - Camera angles accumulate without wraparound or clamping.
//! - Motion advances one fixed step per frame regardless of elapsed time.

pub mod camera;
pub mod clock;
pub mod demo;
pub mod motion;

pub use camera::ThirdPersonCamera;
pub use clock::FrameClock;
pub use demo::Demo;
pub use motion::ShipMotion;
