//! Input: raw device axis samples normalized into a per-frame `InputFrame`.
//!
//! # Invariants
//! - Raw magnitudes inside the dead zone become exactly `0.0`.
//! - An absent device produces an all-zero frame, never an error.
//! - Frames are rebuilt every tick; nothing here is persisted.

pub mod frame;
pub mod gamepad;
pub mod normalize;
pub mod source;

pub use frame::{AxisMap, InputFrame, RawAxes};
#[cfg(feature = "gamepad")]
pub use gamepad::GamepadSource;
pub use gamepad::{FULL_DEFLECTION, PadSample, axis_to_raw};
pub use normalize::{Normalizer, normalize_axis};
pub use source::{InputSource, KeyboardStick, NullDevice, ScriptedInput, StickKey};
