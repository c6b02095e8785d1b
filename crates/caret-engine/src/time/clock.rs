use std::time::{Duration, Instant};

/// Monotonic stopwatch.
///
/// Measures time since construction or the last [`reset`](Clock::reset). Drives
/// time-based animation of drawables; frame pacing is left to the host loop.
#[derive(Debug, Clone)]
pub struct Clock {
    start: Instant,
}

impl Clock {
    pub fn new() -> Self {
        Self { start: Instant::now() }
    }

    /// Time elapsed since the clock was started or last reset.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Elapsed time in whole milliseconds.
    pub fn elapsed_ms(&self) -> u128 {
        self.elapsed().as_millis()
    }

    /// Restarts the clock from now.
    pub fn reset(&mut self) {
        self.start = Instant::now();
    }

    /// Restarts the clock and returns the time elapsed before the restart.
    pub fn restart(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = now.saturating_duration_since(self.start);
        self.start = now;
        elapsed
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}
