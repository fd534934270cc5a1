use std::time::{Duration, Instant};

pub const COUNTDOWN_PERIOD: Duration = Duration::from_secs(1);

/// Periodic task that fires once per `period` while armed.
///
/// The event loop polls it; nothing runs in the background, so a cancelled
/// countdown can never touch a session again. Scheduling uses monotonic
/// `Instant`s so wall clock adjustments neither stall nor burst it.
#[derive(Clone, Debug)]
pub struct Countdown {
    period: Duration,
    next_due: Option<Instant>,
}

impl Countdown {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_due: None,
        }
    }

    /// Schedule the first firing one period after `now`
    pub fn arm(&mut self, now: Instant) {
        self.next_due = Some(now + self.period);
    }

    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    /// Clear the schedule. Returns true only if it was armed.
    pub fn cancel(&mut self) -> bool {
        self.next_due.take().is_some()
    }

    /// Number of periods that came due up to `now`
    pub fn poll(&mut self, now: Instant) -> u32 {
        let Some(mut due) = self.next_due else {
            return 0;
        };

        let mut fired = 0;
        while due <= now {
            fired += 1;
            due += self.period;
        }
        self.next_due = Some(due);
        fired
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(COUNTDOWN_PERIOD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t0() -> Instant {
        static BASE: std::sync::OnceLock<Instant> = std::sync::OnceLock::new();
        *BASE.get_or_init(Instant::now)
    }

    #[test]
    fn test_unarmed_never_fires() {
        let mut countdown = Countdown::default();
        assert!(!countdown.is_armed());
        assert_eq!(countdown.poll(t0() + Duration::from_secs(10)), 0);
    }

    #[test]
    fn test_fires_once_per_period() {
        let mut countdown = Countdown::default();
        countdown.arm(t0());

        assert_eq!(countdown.poll(t0() + Duration::from_millis(900)), 0);
        assert_eq!(countdown.poll(t0() + Duration::from_millis(1000)), 1);
        assert_eq!(countdown.poll(t0() + Duration::from_millis(1500)), 0);
        assert_eq!(countdown.poll(t0() + Duration::from_millis(2100)), 1);
    }

    #[test]
    fn test_catches_up_after_a_stall() {
        let mut countdown = Countdown::default();
        countdown.arm(t0());

        assert_eq!(countdown.poll(t0() + Duration::from_millis(3500)), 3);
        assert_eq!(countdown.poll(t0() + Duration::from_millis(4000)), 1);
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut countdown = Countdown::default();
        countdown.arm(t0());

        assert!(countdown.cancel());
        assert!(!countdown.cancel());
        assert!(!countdown.is_armed());
        assert_eq!(countdown.poll(t0() + Duration::from_secs(5)), 0);
    }

    #[test]
    fn test_custom_period() {
        let mut countdown = Countdown::new(Duration::from_millis(250));
        countdown.arm(t0());

        assert_eq!(countdown.period(), Duration::from_millis(250));
        assert_eq!(countdown.poll(t0() + Duration::from_millis(1000)), 4);
    }
}
