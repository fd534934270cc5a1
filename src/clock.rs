use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant, SystemTime};

/// Source of "now" for the typing session
pub trait Clock {
    /// Wall time, stamped on the session
    fn now(&self) -> SystemTime;

    /// Monotonic time, used to schedule the countdown
    fn instant(&self) -> Instant;
}

/// Wall clock used by the binary
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }

    fn instant(&self) -> Instant {
        Instant::now()
    }
}

/// Hand-driven clock for tests. Clones share the same elapsed time, and
/// advancing moves both the wall and the monotonic reading.
#[derive(Clone, Debug)]
pub struct ManualClock {
    wall_start: SystemTime,
    mono_start: Instant,
    elapsed: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new(start: SystemTime) -> Self {
        Self {
            wall_start: start,
            mono_start: Instant::now(),
            elapsed: Rc::new(Cell::new(Duration::ZERO)),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.elapsed.set(self.elapsed.get() + by);
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000))
    }
}

impl Clock for ManualClock {
    fn now(&self) -> SystemTime {
        self.wall_start + self.elapsed.get()
    }

    fn instant(&self) -> Instant {
        self.mono_start + self.elapsed.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::default();
        let other = clock.clone();
        let before = other.now();

        clock.advance_ms(1500);

        assert_eq!(
            other.now().duration_since(before).unwrap(),
            Duration::from_millis(1500)
        );
    }

    #[test]
    fn manual_clock_advances_monotonic_time_too() {
        let clock = ManualClock::default();
        let other = clock.clone();
        let before = other.instant();

        clock.advance_ms(2_250);

        assert_eq!(other.instant() - before, Duration::from_millis(2_250));
    }

    #[test]
    fn system_clock_moves_forward() {
        let clock = SystemClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);

        let a = clock.instant();
        let b = clock.instant();
        assert!(b >= a);
    }
}
