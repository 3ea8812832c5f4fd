//! Frame throttling.

use std::time::Duration;

/// Gate that lets work through at most once per interval.
///
/// Renderers are called on every frame and ask the throttle whether enough
/// time has passed since the last tick that did work. Frames in between are
/// cheap no-ops.
#[derive(Debug, Clone)]
pub struct Throttle {
    interval: Duration,
    last: Duration,
}

impl Throttle {
    /// Create a throttle whose clock starts at zero.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: Duration::ZERO,
        }
    }

    /// Returns `true` and records `now` if the interval has elapsed.
    pub fn ready(&mut self, now: Duration) -> bool {
        if now.saturating_sub(self.last) >= self.interval {
            self.last = now;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn first_tick_waits_one_interval() {
        let mut t = Throttle::new(ms(50));
        assert!(!t.ready(ms(16)));
        assert!(!t.ready(ms(49)));
        assert!(t.ready(ms(50)));
    }

    #[test]
    fn interval_measured_from_last_tick() {
        let mut t = Throttle::new(ms(33));
        assert!(t.ready(ms(40)));
        assert!(!t.ready(ms(56)));
        assert!(!t.ready(ms(72)));
        assert!(t.ready(ms(73)));
    }
}
