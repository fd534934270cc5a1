use itertools::{EitherOrBoth, Itertools};
use std::time::SystemTime;

/// Seconds on the clock for a fresh session
pub const DEFAULT_DURATION_SECS: u32 = 60;
/// Longest countdown accepted from the command line or the config file
pub const MAX_DURATION_SECS: u32 = 3600;

/// Characters that make up one "word" for WPM purposes
pub const CHARS_PER_WORD: f64 = 5.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
pub enum Status {
    Idle,
    Running,
    Finished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mark {
    Correct,
    Incorrect,
    Pending,
}

/// One character of the target sentence as the presentation layer sees it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CharMark {
    pub expected: char,
    pub mark: Mark,
}

/// State of a single typing test.
///
/// Every transition takes the current instant as an argument so the whole
/// lifecycle can be replayed without a real clock. Positions and lengths are
/// counted in `char`s, never bytes.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    target_text: String,
    target_len: usize,
    input: String,
    input_len: usize,
    status: Status,
    started_at: Option<SystemTime>,
    ended_at: Option<SystemTime>,
    duration_secs: u32,
    time_remaining_secs: u32,
    correct_char_count: usize,
    wpm: Option<u32>,
}

impl Session {
    pub fn new(target_text: impl Into<String>, duration_secs: u32) -> Self {
        let target_text = target_text.into();
        Self {
            target_len: target_text.chars().count(),
            target_text,
            input: String::new(),
            input_len: 0,
            status: Status::Idle,
            started_at: None,
            ended_at: None,
            duration_secs,
            time_remaining_secs: duration_secs,
            correct_char_count: 0,
            wpm: None,
        }
    }

    /// Idle -> Running. Returns false when the session was already past Idle.
    pub fn start(&mut self, now: SystemTime) -> bool {
        if self.status != Status::Idle {
            return false;
        }
        self.started_at = Some(now);
        self.status = Status::Running;
        true
    }

    /// Replace the typed text with `value` and rescore it.
    ///
    /// Ignored once the session has finished.
    pub fn on_input(&mut self, value: &str, now: SystemTime) {
        if self.status == Status::Finished {
            return;
        }
        if self.started_at.is_none() && !value.is_empty() {
            self.start(now);
        }

        self.correct_char_count = count_correct(&self.target_text, value);
        self.input = value.to_string();
        self.input_len = value.chars().count();

        if let Some(started_at) = self.started_at {
            self.wpm = Some(calc_wpm(
                self.correct_char_count,
                elapsed_ms(started_at, now),
            ));
        }

        if value == self.target_text {
            self.finish(now);
        }
    }

    /// One countdown period elapsed
    pub fn tick(&mut self, now: SystemTime) {
        if self.status != Status::Running {
            return;
        }
        self.time_remaining_secs = self.time_remaining_secs.saturating_sub(1);
        if self.time_remaining_secs == 0 {
            self.finish(now);
        }
    }

    /// Running -> Finished. Returns false if there was nothing to finish.
    pub fn finish(&mut self, now: SystemTime) -> bool {
        if self.status != Status::Running {
            return false;
        }
        self.ended_at = Some(now);
        self.status = Status::Finished;
        if let Some(started_at) = self.started_at {
            self.wpm = Some(calc_wpm(
                self.correct_char_count,
                elapsed_ms(started_at, now),
            ));
        }
        true
    }

    pub fn target_text(&self) -> &str {
        &self.target_text
    }

    pub fn target_len(&self) -> usize {
        self.target_len
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn input_len(&self) -> usize {
        self.input_len
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn started_at(&self) -> Option<SystemTime> {
        self.started_at
    }

    pub fn ended_at(&self) -> Option<SystemTime> {
        self.ended_at
    }

    pub fn has_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn has_finished(&self) -> bool {
        self.status == Status::Finished
    }

    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    pub fn time_remaining_secs(&self) -> u32 {
        self.time_remaining_secs
    }

    pub fn correct_char_count(&self) -> usize {
        self.correct_char_count
    }

    pub fn wpm(&self) -> Option<u32> {
        self.wpm
    }

    /// Percentage of typed characters that match the target, 0 when nothing is typed
    pub fn accuracy(&self) -> u32 {
        if self.input_len == 0 {
            return 0;
        }
        ((self.correct_char_count as f64 / self.input_len as f64) * 100.0).round() as u32
    }

    /// Share of the target covered by the input, capped at 100
    pub fn progress(&self) -> f64 {
        if self.target_len == 0 {
            return 0.0;
        }
        (self.input_len as f64 / self.target_len as f64 * 100.0).min(100.0)
    }

    pub fn elapsed_seconds(&self) -> f64 {
        match (self.started_at, self.ended_at) {
            (Some(start), Some(end)) => elapsed_ms(start, end) as f64 / 1000.0,
            _ => 0.0,
        }
    }

    /// Position of the next character to type. May run past the target.
    pub fn cursor(&self) -> usize {
        self.input_len
    }

    /// Characters typed beyond the end of the target
    pub fn overflow(&self) -> usize {
        self.input_len.saturating_sub(self.target_len)
    }

    pub fn char_marks(&self) -> Vec<CharMark> {
        self.target_text
            .chars()
            .zip_longest(self.input.chars())
            .filter_map(|pair| match pair {
                EitherOrBoth::Both(expected, typed) => Some(CharMark {
                    expected,
                    mark: if expected == typed {
                        Mark::Correct
                    } else {
                        Mark::Incorrect
                    },
                }),
                EitherOrBoth::Left(expected) => Some(CharMark {
                    expected,
                    mark: Mark::Pending,
                }),
                EitherOrBoth::Right(_) => None,
            })
            .collect()
    }
}

/// Number of positions where `input` matches `target` exactly
pub fn count_correct(target: &str, input: &str) -> usize {
    target
        .chars()
        .zip(input.chars())
        .filter(|(expected, typed)| expected == typed)
        .count()
}

/// `(correct / 5) / minutes`, rounded half up. Zero elapsed time scores 0.
pub fn calc_wpm(correct_chars: usize, elapsed_ms: u64) -> u32 {
    if elapsed_ms == 0 {
        return 0;
    }
    let words = correct_chars as f64 / CHARS_PER_WORD;
    let minutes = elapsed_ms as f64 / 60_000.0;
    (words / minutes).round() as u32
}

pub fn elapsed_ms(start: SystemTime, end: SystemTime) -> u64 {
    end.duration_since(start)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
