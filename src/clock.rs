use std::thread;
use std::time::{Duration, Instant};

/// Paces the loop to a target frame rate.
#[derive(Debug)]
pub struct FrameClock {
    period: Duration,
    last: Option<Instant>,
}

impl FrameClock {
    pub fn new(fps: u32) -> Self {
        Self { period: Duration::from_secs(1) / fps.max(1), last: None }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Sleep until a full period has passed since the previous tick, then
    /// return the time elapsed since it.  The first tick returns immediately.
    pub fn tick(&mut self) -> Duration {
        let now = Instant::now();
        let Some(last) = self.last else {
            self.last = Some(now);
            return Duration::ZERO;
        };
        let elapsed = now.duration_since(last);
        if elapsed < self.period {
            thread::sleep(self.period - elapsed);
        }
        let now = Instant::now();
        self.last = Some(now);
        now.duration_since(last)
    }
}
