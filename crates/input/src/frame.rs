use glam::Vec2;

/// Number of raw axes a device reports.
pub const AXIS_COUNT: usize = 6;

/// Raw signed samples for each device axis, as read after a poll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawAxes(pub [i32; AXIS_COUNT]);

impl RawAxes {
    /// Sample for a device axis index. Out-of-range indices read as zero.
    pub fn get(&self, axis: usize) -> i32 {
        self.0.get(axis).copied().unwrap_or(0)
    }

    pub fn set(&mut self, axis: usize, value: i32) {
        if let Some(slot) = self.0.get_mut(axis) {
            *slot = value;
        }
    }
}

/// Which device axis feeds which logical channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisMap {
    pub left_x: usize,
    pub left_y: usize,
    pub right_x: usize,
    pub right_y: usize,
    pub left_trigger: usize,
    pub right_trigger: usize,
}

impl Default for AxisMap {
    /// Common gamepad layout: sticks on 0/1 and 4/3, triggers on 2 and 5.
    fn default() -> Self {
        Self {
            left_x: 0,
            left_y: 1,
            right_x: 4,
            right_y: 3,
            left_trigger: 2,
            right_trigger: 5,
        }
    }
}

/// Normalized input for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputFrame {
    pub left_stick: Vec2,
    pub right_stick: Vec2,
    /// `x` is the left trigger, `y` the right trigger.
    pub triggers: Vec2,
}

impl InputFrame {
    /// All-zero frame, as produced by an absent device.
    pub const NEUTRAL: Self = Self {
        left_stick: Vec2::ZERO,
        right_stick: Vec2::ZERO,
        triggers: Vec2::ZERO,
    };

    pub fn left_trigger(&self) -> f32 {
        self.triggers.x
    }

    pub fn right_trigger(&self) -> f32 {
        self.triggers.y
    }

    /// Right minus left trigger. Both fully pressed cancel to zero.
    pub fn trigger_difference(&self) -> f32 {
        self.right_trigger() - self.left_trigger()
    }

    pub fn is_neutral(&self) -> bool {
        *self == Self::NEUTRAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_axes_out_of_range_reads_zero() {
        let mut raw = RawAxes::default();
        raw.set(9, 100);
        assert_eq!(raw.get(9), 0);
        raw.set(2, -5);
        assert_eq!(raw.get(2), -5);
    }

    #[test]
    fn default_axis_map_uses_gamepad_layout() {
        let map = AxisMap::default();
        assert_eq!((map.left_x, map.left_y), (0, 1));
        assert_eq!((map.right_x, map.right_y), (4, 3));
        assert_eq!((map.left_trigger, map.right_trigger), (2, 5));
    }

    #[test]
    fn triggers_cancel_when_both_pressed() {
        let frame = InputFrame {
            triggers: Vec2::new(1.0, 1.0),
            ..InputFrame::NEUTRAL
        };
        assert_eq!(frame.trigger_difference(), 0.0);
    }

    #[test]
    fn default_frame_is_neutral() {
        assert!(InputFrame::default().is_neutral());
    }
}
