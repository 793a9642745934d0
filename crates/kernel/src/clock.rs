/// Millisecond frame clock: frame delta, total elapsed time, frames per second.
///
/// The clock is fed timestamps rather than reading the system time, so the
/// desktop loop can drive it from `Instant` and tests from fixed values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameClock {
    last_ms: u64,
    now_ms: u64,
    /// Milliseconds into the current one-second FPS window.
    window_ms: u64,
    /// Frames counted in the current window.
    frame: u32,
    fps: u32,
    total_frames: u64,
    dt: f32,
    elapsed: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to timestamp `now_ms`. A timestamp earlier than the previous one
    /// counts as a zero-length frame.
    pub fn advance(&mut self, now_ms: u64) {
        self.last_ms = self.now_ms;
        self.now_ms = now_ms;
        let delta = self.now_ms.saturating_sub(self.last_ms);

        self.window_ms += delta;
        if self.window_ms > 1000 {
            self.fps = self.frame;
            self.frame = 0;
        }
        self.window_ms %= 1000;
        self.frame += 1;
        self.total_frames += 1;

        self.dt = delta as f32 / 1000.0;
        self.elapsed += self.dt;
    }

    /// Seconds covered by the last frame.
    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Seconds accumulated since the clock started; drives the ground animation.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Frames counted during the last completed one-second window.
    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Frames advanced since the clock started.
    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    /// Window title carrying the current FPS, e.g. `"Spaceship Demo: 60 FPS"`.
    pub fn title(&self, base: &str) -> String {
        format!("{base}: {} FPS", self.fps)
    }
}
