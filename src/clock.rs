/// Longest slice of time one step may simulate, in seconds.
pub const MAX_FRAME_DT: f64 = 0.05;

/// Turns successive clock readings into clamped frame deltas.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous reading, clamped to `[0, MAX_FRAME_DT]`.
    /// The first reading yields 0.
    pub fn tick(&mut self, now: f64) -> f64 {
        let dt = match self.last {
            Some(last) => (now - last).clamp(0.0, MAX_FRAME_DT),
            None => 0.0,
        };
        self.last = Some(now);
        dt
    }
}
