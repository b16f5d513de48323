use std::time::Duration;

/// Fixed-interval pacing between webcam reads.
#[derive(Debug, Clone, Copy)]
pub struct Pacing {
    interval: Duration,
}

impl Pacing {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval: Duration::from_millis(interval_ms),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn pause(&self) {
        std::thread::sleep(self.interval);
    }
}
