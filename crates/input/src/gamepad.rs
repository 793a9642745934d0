//! Physical gamepad input.
//!
//! Device values are converted to the signed 16-bit sample range the
//! [`Normalizer`](crate::Normalizer) expects, so a pad and the keyboard stick
//! feed the same pipeline. The device backend (`gilrs`) is behind the
//! `gamepad` feature; the conversion is always available.

use crate::frame::{AxisMap, RawAxes};

/// Raw sample value for a fully deflected axis.
pub const FULL_DEFLECTION: i32 = i16::MAX as i32;

/// One poll of a pad in device units: sticks in `[-1, 1]` with +Y up,
/// analog triggers in `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PadSample {
    pub left_x: f32,
    pub left_y: f32,
    pub right_x: f32,
    pub right_y: f32,
    pub left_trigger: f32,
    pub right_trigger: f32,
}

impl PadSample {
    /// Write this sample into the device axes named by `map`.
    ///
    /// Stick Y is flipped so "up" reads negative, matching joystick axes.
    pub fn to_raw(&self, map: &AxisMap) -> RawAxes {
        let mut raw = RawAxes::default();
        raw.set(map.left_x, axis_to_raw(self.left_x));
        raw.set(map.left_y, axis_to_raw(-self.left_y));
        raw.set(map.right_x, axis_to_raw(self.right_x));
        raw.set(map.right_y, axis_to_raw(-self.right_y));
        raw.set(map.left_trigger, axis_to_raw(self.left_trigger));
        raw.set(map.right_trigger, axis_to_raw(self.right_trigger));
        raw
    }
}

/// Scale a unit axis value to a raw sample, clamping out-of-range input.
/// NaN reads as centred.
pub fn axis_to_raw(value: f32) -> i32 {
    if value.is_nan() {
        return 0;
    }
    (value.clamp(-1.0, 1.0) * FULL_DEFLECTION as f32).round() as i32
}

#[cfg(feature = "gamepad")]
pub use device::GamepadSource;

#[cfg(feature = "gamepad")]
mod device {
    use super::PadSample;
    use crate::frame::{AxisMap, RawAxes};
    use crate::source::InputSource;
    use gilrs::{Axis, Button, EventType, GamepadId, Gilrs};

    /// First connected gamepad, read through `gilrs`.
    ///
    /// Follows hot-plugging: when the active pad disconnects the next
    /// connected one is picked up, and with none present `poll` returns
    /// centred axes.
    pub struct GamepadSource {
        gilrs: Gilrs,
        active: Option<GamepadId>,
        map: AxisMap,
        name: String,
    }

    impl GamepadSource {
        /// Start the gamepad backend. Returns `None` if the platform backend
        /// cannot be initialised.
        pub fn open(map: AxisMap) -> Option<Self> {
            let gilrs = match Gilrs::new() {
                Ok(g) => g,
                Err(e) => {
                    tracing::warn!("gamepad backend unavailable: {e}");
                    return None;
                }
            };
            let mut source = Self {
                gilrs,
                active: None,
                map,
                name: String::from("gamepad"),
            };
            source.select_first();
            Some(source)
        }

        /// Whether a pad is currently attached.
        pub fn is_connected(&self) -> bool {
            self.active.is_some()
        }

        fn select_first(&mut self) {
            let first = self.gilrs.gamepads().next().map(|(id, _)| id);
            self.activate(first);
        }

        fn activate(&mut self, id: Option<GamepadId>) {
            self.active = id;
            let Some(pad) = id.and_then(|id| self.gilrs.connected_gamepad(id)) else {
                tracing::info!("no gamepad connected");
                return;
            };
            self.name = pad.name().to_string();
            tracing::info!(
                name = pad.name(),
                os_name = pad.os_name(),
                mapping = ?pad.mapping_source(),
                power = ?pad.power_info(),
                "opened gamepad"
            );
        }

        fn drain_events(&mut self) {
            while let Some(gilrs::Event { id, event, .. }) = self.gilrs.next_event() {
                match event {
                    EventType::Connected if self.active.is_none() => self.activate(Some(id)),
                    EventType::Disconnected if self.active == Some(id) => {
                        tracing::info!(name = %self.name, "gamepad disconnected");
                        self.select_first();
                    }
                    _ => {}
                }
            }
        }

        fn sample(&self) -> PadSample {
            let Some(pad) = self.active.and_then(|id| self.gilrs.connected_gamepad(id)) else {
                return PadSample::default();
            };
            let trigger = |b: Button| pad.button_data(b).map(|d| d.value()).unwrap_or(0.0);
            PadSample {
                left_x: pad.value(Axis::LeftStickX),
                left_y: pad.value(Axis::LeftStickY),
                right_x: pad.value(Axis::RightStickX),
                right_y: pad.value(Axis::RightStickY),
                left_trigger: trigger(Button::LeftTrigger2),
                right_trigger: trigger(Button::RightTrigger2),
            }
        }
    }

    impl InputSource for GamepadSource {
        fn poll(&mut self) -> RawAxes {
            self.drain_events();
            self.sample().to_raw(&self.map)
        }

        fn name(&self) -> &str {
            &self.name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Normalizer;

    #[test]
    fn axis_scaling_and_clamping() {
        assert_eq!(axis_to_raw(0.0), 0);
        assert_eq!(axis_to_raw(1.0), 32767);
        assert_eq!(axis_to_raw(-1.0), -32767);
        assert_eq!(axis_to_raw(0.5), 16384);
        assert_eq!(axis_to_raw(1.5), 32767);
        assert_eq!(axis_to_raw(f32::NAN), 0);
    }

    #[test]
    fn sample_lands_on_mapped_axes() {
        let map = AxisMap::default();
        let raw = PadSample {
            left_x: 1.0,
            left_y: 1.0,
            right_x: -0.25,
            right_y: 0.0,
            left_trigger: 0.0,
            right_trigger: 1.0,
        }
        .to_raw(&map);

        assert_eq!(raw.get(map.left_x), 32767);
        // Stick pushed up reads negative.
        assert_eq!(raw.get(map.left_y), -32767);
        assert_eq!(raw.get(map.right_x), -8192);
        assert_eq!(raw.get(map.right_y), 0);
        assert_eq!(raw.get(map.left_trigger), 0);
        assert_eq!(raw.get(map.right_trigger), 32767);
    }

    #[test]
    fn pad_feeds_the_normalizer() {
        let map = AxisMap::default();
        let frame = Normalizer::default().frame(
            &PadSample {
                left_x: -1.0,
                left_y: 0.05,
                right_trigger: 0.5,
                ..PadSample::default()
            }
            .to_raw(&map),
            &map,
        );
        assert_eq!(frame.left_stick.x, -1.0);
        // 0.05 of full range is inside the dead zone.
        assert_eq!(frame.left_stick.y, 0.0);
        assert!((frame.right_trigger() - 16384.0 / 32767.0).abs() < 1e-6);
    }

    #[test]
    fn neutral_pad_is_neutral_frame() {
        let map = AxisMap::default();
        let frame = Normalizer::default().frame(&PadSample::default().to_raw(&map), &map);
        assert!(frame.is_neutral());
    }
}
