//! Fixed-rate tick pacing, decoupled from the render frame rate.

/// Converts elapsed wall time into a number of logical ticks.
#[derive(Debug, Clone)]
pub struct TickClock {
    tick_duration: f32,
    accumulator: f32,
    max_ticks_per_frame: u32,
}

impl TickClock {
    /// Creates a clock running at `tick_rate` ticks per second.
    pub fn new(tick_rate: f32, max_ticks_per_frame: u32) -> Self {
        Self {
            tick_duration: 1.0 / tick_rate,
            accumulator: 0.0,
            max_ticks_per_frame,
        }
    }

    /// Adds `elapsed` seconds, scaled by `speed`, and returns how many ticks
    /// are due.
    ///
    /// Time beyond `max_ticks_per_frame` ticks is dropped so a slow frame
    /// cannot snowball.
    pub fn advance(&mut self, elapsed: f32, speed: f32) -> u32 {
        self.accumulator += elapsed.max(0.0) * speed.max(0.0);
        let due = (self.accumulator / self.tick_duration).floor();
        if due >= self.max_ticks_per_frame as f32 {
            self.accumulator = 0.0;
            return self.max_ticks_per_frame;
        }
        self.accumulator -= due * self.tick_duration;
        due as u32
    }

    /// Forgets any accumulated time.
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
