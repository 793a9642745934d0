//! Shared configuration and value types for the spaceship demo.
//!
//! # Invariants
//! - Every config field defaults to the demo's fixed constants; an absent
//!   config file reproduces the stock demo exactly.

pub mod config;
pub mod types;

pub use config::{
    CameraConfig, ConfigError, DemoConfig, GroundConfig, JoystickConfig, MAX_GROUND_BUFFER_BYTES,
    MotionConfig, ShipConfig, WindowConfig,
};
pub use types::{ShipPose, ViewTransform};
