use crate::clock::Clock;
use crate::countdown::Countdown;
use crate::sentence_bank::SentenceBank;
use crate::session::{Session, Status};
use tracing::{debug, info};

/// A typing test wired to a clock, a sentence bank and its countdown.
///
/// `Session` holds the pure state; this type decides when the countdown is
/// armed and makes sure it is cancelled whenever the session leaves Running.
#[derive(Debug)]
pub struct TypingSession<C: Clock> {
    session: Session,
    countdown: Countdown,
    clock: C,
    bank: SentenceBank,
    duration_secs: u32,
}

impl<C: Clock> TypingSession<C> {
    pub fn new(mut bank: SentenceBank, clock: C, duration_secs: u32) -> Self {
        let session = Session::new(bank.pick_random(), duration_secs);
        Self {
            session,
            countdown: Countdown::default(),
            clock,
            bank,
            duration_secs,
        }
    }

    pub fn with_countdown(mut self, countdown: Countdown) -> Self {
        self.countdown = countdown;
        self
    }

    /// Idle -> Running, normally triggered by the first keystroke
    pub fn start(&mut self) -> bool {
        let started = self.session.start(self.clock.now());
        if started {
            self.countdown.arm(self.clock.instant());
            info!(
                target_len = self.session.target_len(),
                duration_secs = self.duration_secs,
                "session started"
            );
        }
        started
    }

    /// Apply a new input value. Countdown periods that are already due are
    /// settled first, so input arriving after the deadline is dropped.
    pub fn on_input(&mut self, value: &str) {
        self.poll_timer();
        if self.session.has_finished() {
            return;
        }
        if !self.session.has_started() && !value.is_empty() {
            self.start();
        }
        let was = self.session.status();
        self.session.on_input(value, self.clock.now());
        self.after_transition(was);
    }

    pub fn tick(&mut self) {
        let was = self.session.status();
        self.session.tick(self.clock.now());
        self.after_transition(was);
    }

    pub fn finish(&mut self) -> bool {
        let was = self.session.status();
        let finished = self.session.finish(self.clock.now());
        self.after_transition(was);
        finished
    }

    /// Fire `tick` for every countdown period that came due
    pub fn poll_timer(&mut self) -> u32 {
        let fired = self.countdown.poll(self.clock.instant());
        for _ in 0..fired {
            if self.session.status() != Status::Running {
                break;
            }
            self.tick();
        }
        fired
    }

    /// Fresh Idle session on a newly picked sentence
    pub fn reset(&mut self) {
        self.cancel_countdown();
        self.session = Session::new(self.bank.pick_random(), self.duration_secs);
        debug!(bank = self.bank.name(), "session reset");
    }

    /// Start over on the same sentence
    pub fn restart(&mut self) {
        self.cancel_countdown();
        let target = self.session.target_text().to_string();
        self.session = Session::new(target, self.duration_secs);
        debug!("session restarted");
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    pub fn bank(&self) -> &SentenceBank {
        &self.bank
    }

    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    fn after_transition(&mut self, was: Status) {
        if was != Status::Finished && self.session.has_finished() {
            self.cancel_countdown();
            info!(
                wpm = self.session.wpm().unwrap_or(0),
                accuracy = self.session.accuracy(),
                elapsed_secs = self.session.elapsed_seconds(),
                time_remaining_secs = self.session.time_remaining_secs(),
                "session finished"
            );
        }
    }

    fn cancel_countdown(&mut self) {
        if self.countdown.cancel() {
            debug!("countdown cancelled");
        }
    }
}
