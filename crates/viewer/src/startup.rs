use std::time::{Duration, Instant};

/// Holds the frame loop back until a fixed delay after startup has passed.
#[derive(Debug, Clone, Copy)]
pub struct StartupGate {
    opens_at: Instant,
    open: bool,
}

impl StartupGate {
    pub fn new(now: Instant, delay: Duration) -> Self {
        Self {
            opens_at: now + delay,
            open: delay.is_zero(),
        }
    }

    /// Whether frames may run at `now`. Once open, stays open.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.open && now >= self.opens_at {
            self.open = true;
            tracing::debug!("startup delay elapsed, frame loop running");
        }
        self.open
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}
