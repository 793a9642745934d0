use crate::frame::{AXIS_COUNT, AxisMap, RawAxes};

/// A device that can be polled for raw axis samples once per frame.
pub trait InputSource {
    /// Read the current raw samples. Must not block.
    fn poll(&mut self) -> RawAxes;

    /// Human-readable device name for logs.
    fn name(&self) -> &str;
}

/// Stand-in for an unopened device: every poll is all zeros.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDevice;

impl InputSource for NullDevice {
    fn poll(&mut self) -> RawAxes {
        RawAxes::default()
    }

    fn name(&self) -> &str {
        "none"
    }
}

/// Logical keys a keyboard can bind to synthetic stick deflections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StickKey {
    TurnLeft,
    TurnRight,
    Up,
    Down,
    TriggerLeft,
    TriggerRight,
}

/// Keyboard emulating a gamepad: held keys produce full-deflection samples.
///
/// Opposing keys held together cancel to zero on that axis.
#[derive(Debug, Clone)]
pub struct KeyboardStick {
    map: AxisMap,
    full: i32,
    held: [bool; 6],
}

impl KeyboardStick {
    /// `full` is the raw value written for a fully deflected axis.
    pub fn new(map: AxisMap, full: i32) -> Self {
        Self {
            map,
            full,
            held: [false; 6],
        }
    }

    fn slot(key: StickKey) -> usize {
        match key {
            StickKey::TurnLeft => 0,
            StickKey::TurnRight => 1,
            StickKey::Up => 2,
            StickKey::Down => 3,
            StickKey::TriggerLeft => 4,
            StickKey::TriggerRight => 5,
        }
    }

    pub fn set(&mut self, key: StickKey, pressed: bool) {
        let slot = Self::slot(key);
        if self.held[slot] != pressed {
            tracing::trace!(?key, pressed, "keyboard stick");
        }
        self.held[slot] = pressed;
    }

    pub fn is_held(&self, key: StickKey) -> bool {
        self.held[Self::slot(key)]
    }

    /// Release every key, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.held = [false; 6];
    }

    fn axis(&self, negative: StickKey, positive: StickKey) -> i32 {
        let mut v = 0;
        if self.is_held(negative) {
            v -= self.full;
        }
        if self.is_held(positive) {
            v += self.full;
        }
        v
    }
}

impl Default for KeyboardStick {
    fn default() -> Self {
        Self::new(AxisMap::default(), crate::gamepad::FULL_DEFLECTION)
    }
}

impl InputSource for KeyboardStick {
    fn poll(&mut self) -> RawAxes {
        let mut raw = RawAxes::default();
        raw.set(
            self.map.left_x,
            self.axis(StickKey::TurnLeft, StickKey::TurnRight),
        );
        // Stick "up" reads negative, as on a gamepad.
        raw.set(self.map.left_y, self.axis(StickKey::Up, StickKey::Down));
        if self.is_held(StickKey::TriggerLeft) {
            raw.set(self.map.left_trigger, self.full);
        }
        if self.is_held(StickKey::TriggerRight) {
            raw.set(self.map.right_trigger, self.full);
        }
        raw
    }

    fn name(&self) -> &str {
        "keyboard"
    }
}

/// Replays a fixed list of raw frames, then behaves like an absent device.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: Vec<RawAxes>,
    cursor: usize,
}

impl ScriptedInput {
    pub fn new(frames: Vec<RawAxes>) -> Self {
        Self { frames, cursor: 0 }
    }

    /// The same raw sample repeated `count` times.
    pub fn constant(raw: RawAxes, count: usize) -> Self {
        Self::new(vec![raw; count])
    }

    /// Frames not yet consumed.
    pub fn remaining(&self) -> usize {
        self.frames.len().saturating_sub(self.cursor)
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> RawAxes {
        match self.frames.get(self.cursor) {
            Some(raw) => {
                self.cursor += 1;
                *raw
            }
            None => RawAxes([0; AXIS_COUNT]),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Normalizer;

    #[test]
    fn null_device_is_all_zero() {
        let mut dev = NullDevice;
        assert_eq!(dev.poll(), RawAxes::default());
        assert_eq!(dev.name(), "none");
    }

    #[test]
    fn keyboard_turn_right_is_full_positive_x() {
        let mut kb = KeyboardStick::default();
        kb.set(StickKey::TurnRight, true);
        let f = Normalizer::default().frame(&kb.poll(), &AxisMap::default());
        assert_eq!(f.left_stick.x, 1.0);
        assert_eq!(f.left_stick.y, 0.0);
    }

    #[test]
    fn keyboard_opposing_keys_cancel() {
        let mut kb = KeyboardStick::default();
        kb.set(StickKey::TurnLeft, true);
        kb.set(StickKey::TurnRight, true);
        assert_eq!(kb.poll().get(0), 0);
    }

    #[test]
    fn keyboard_triggers_rest_at_zero() {
        let mut kb = KeyboardStick::default();
        let f = Normalizer::default().frame(&kb.poll(), &AxisMap::default());
        assert_eq!(f.trigger_difference(), 0.0);

        kb.set(StickKey::TriggerRight, true);
        let f = Normalizer::default().frame(&kb.poll(), &AxisMap::default());
        assert_eq!(f.trigger_difference(), 1.0);
    }

    #[test]
    fn keyboard_release_all_clears_state() {
        let mut kb = KeyboardStick::default();
        kb.set(StickKey::Up, true);
        kb.set(StickKey::TriggerLeft, true);
        kb.release_all();
        assert_eq!(kb.poll(), RawAxes::default());
    }

    #[test]
    fn scripted_input_replays_then_goes_quiet() {
        let a = RawAxes([10_000, 0, 0, 0, 0, 0]);
        let b = RawAxes([0, 0, 0, 0, 0, 20_000]);
        let mut s = ScriptedInput::new(vec![a, b]);
        assert_eq!(s.remaining(), 2);
        assert_eq!(s.poll(), a);
        assert_eq!(s.poll(), b);
        assert_eq!(s.remaining(), 0);
        assert_eq!(s.poll(), RawAxes::default());
    }

    #[test]
    fn scripted_constant_repeats() {
        let raw = RawAxes([32767, 0, 0, 0, 0, 0]);
        let mut s = ScriptedInput::constant(raw, 3);
        for _ in 0..3 {
            assert_eq!(s.poll(), raw);
        }
        assert_eq!(s.poll(), RawAxes::default());
    }
}
