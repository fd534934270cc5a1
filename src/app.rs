use crate::clock::{Clock, SystemClock};
use crate::runtime::AppEvent;
use crate::session::Session;
use crate::typing_session::TypingSession;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    Quit,
}

/// Terminal front end state: maps key presses onto text-change events and
/// reset triggers for the typing session.
#[derive(Debug)]
pub struct App<C: Clock = SystemClock> {
    pub typing: TypingSession<C>,
}

impl<C: Clock> App<C> {
    pub fn new(typing: TypingSession<C>) -> Self {
        Self { typing }
    }

    pub fn session(&self) -> &Session {
        self.typing.session()
    }

    pub fn on_tick(&mut self) {
        self.typing.poll_timer();
    }

    /// One pass of the event loop. The countdown is settled on every event,
    /// not only on ticks, so a steady key stream cannot hold it back.
    pub fn on_event(&mut self, event: AppEvent) -> Action {
        self.on_tick();
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Resize | AppEvent::Tick => Action::Continue,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        // AltGr arrives as Ctrl+Alt on some platforms and still produces text
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL)
            && !key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::Esc => return Action::Quit,
            KeyCode::Char('c') if ctrl => return Action::Quit,
            KeyCode::Tab => self.typing.reset(),
            KeyCode::Enter if self.session().has_finished() => self.typing.reset(),
            KeyCode::Char('r') if ctrl => self.typing.restart(),
            KeyCode::Char('w') | KeyCode::Char('h') if ctrl => self.edit(delete_last_word),
            KeyCode::Backspace if ctrl => self.edit(delete_last_word),
            KeyCode::Backspace => self.edit(|s| {
                s.pop();
            }),
            KeyCode::Char(c) if !ctrl => self.edit(|s| s.push(c)),
            _ => {}
        }
        Action::Continue
    }

    /// Apply `f` to a copy of the input and feed the result to the session
    fn edit(&mut self, f: impl FnOnce(&mut String)) {
        if self.session().has_finished() {
            return;
        }
        let mut value = self.session().input().to_string();
        f(&mut value);
        if value != self.session().input() {
            self.typing.on_input(&value);
        }
    }
}

/// Drop trailing whitespace, then the word before it
pub fn delete_last_word(s: &mut String) {
    let trimmed = s.trim_end().len();
    s.truncate(trimmed);
    let keep = s
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map(|(idx, c)| idx + c.len_utf8())
        .unwrap_or(0);
    s.truncate(keep);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::sentence_bank::{SentenceBank, SequentialPicker};
    use crate::session::Status;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn create_test_app(sentences: &[&str]) -> (App<ManualClock>, ManualClock) {
        let clock = ManualClock::default();
        let bank = SentenceBank::new("test", sentences.iter().copied())
            .unwrap()
            .with_picker(SequentialPicker::default());
        (
            App::new(TypingSession::new(bank, clock.clone(), 60)),
            clock,
        )
    }

    fn type_str(app: &mut App<ManualClock>, text: &str) {
        for c in text.chars() {
            assert_eq!(app.handle_key(key(KeyCode::Char(c))), Action::Continue);
        }
    }

    #[test]
    fn test_typing_builds_input() {
        let (mut app, _clock) = create_test_app(&["hello world"]);
        type_str(&mut app, "hel");

        assert_eq!(app.session().input(), "hel");
        assert_eq!(app.session().status(), Status::Running);
    }

    #[test]
    fn test_shifted_chars_are_typed() {
        let (mut app, _clock) = create_test_app(&["Hi"]);
        app.handle_key(KeyEvent::new(KeyCode::Char('H'), KeyModifiers::SHIFT));

        assert_eq!(app.session().input(), "H");
        assert_eq!(app.session().correct_char_count(), 1);
    }

    #[test]
    fn test_backspace() {
        let (mut app, _clock) = create_test_app(&["hello"]);
        type_str(&mut app, "hex");
        app.handle_key(key(KeyCode::Backspace));

        assert_eq!(app.session().input(), "he");
        assert_eq!(app.session().correct_char_count(), 2);
    }

    #[test]
    fn test_backspace_on_empty_does_not_start() {
        let (mut app, _clock) = create_test_app(&["hello"]);
        app.handle_key(key(KeyCode::Backspace));

        assert_eq!(app.session().status(), Status::Idle);
    }

    #[test]
    fn test_ctrl_w_deletes_word() {
        let (mut app, _clock) = create_test_app(&["one two three"]);
        type_str(&mut app, "one twx ");
        app.handle_key(ctrl('w'));

        assert_eq!(app.session().input(), "one ");
    }

    #[test]
    fn test_completing_sentence_finishes() {
        let (mut app, _clock) = create_test_app(&["hi"]);
        type_str(&mut app, "hi");

        assert_eq!(app.session().status(), Status::Finished);

        // input is locked once finished
        type_str(&mut app, "x");
        app.handle_key(key(KeyCode::Backspace));
        assert_eq!(app.session().input(), "hi");
    }

    #[test]
    fn test_enter_resets_only_when_finished() {
        let (mut app, _clock) = create_test_app(&["hi", "yo"]);
        type_str(&mut app, "h");
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.session().target_text(), "hi");
        assert_eq!(app.session().input(), "h");

        type_str(&mut app, "i");
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.session().target_text(), "yo");
        assert_eq!(app.session().status(), Status::Idle);
    }

    #[test]
    fn test_tab_resets_any_time() {
        let (mut app, _clock) = create_test_app(&["one", "two"]);
        type_str(&mut app, "o");
        app.handle_key(key(KeyCode::Tab));

        assert_eq!(app.session().target_text(), "two");
        assert_eq!(app.session().status(), Status::Idle);
        assert_eq!(app.session().time_remaining_secs(), 60);
    }

    #[test]
    fn test_ctrl_r_restarts_same_sentence() {
        let (mut app, _clock) = create_test_app(&["one", "two"]);
        type_str(&mut app, "ox");
        app.handle_key(ctrl('r'));

        assert_eq!(app.session().target_text(), "one");
        assert_eq!(app.session().input(), "");
    }

    #[test]
    fn test_quit_keys() {
        let (mut app, _clock) = create_test_app(&["hi"]);
        assert_eq!(app.handle_key(key(KeyCode::Esc)), Action::Quit);
        assert_eq!(app.handle_key(ctrl('c')), Action::Quit);
    }

    #[test]
    fn test_on_tick_drives_countdown() {
        let (mut app, clock) = create_test_app(&["hello"]);
        type_str(&mut app, "h");

        clock.advance_ms(1_000);
        app.on_tick();
        assert_eq!(app.session().time_remaining_secs(), 59);

        clock.advance_ms(59_000);
        app.on_tick();
        assert_eq!(app.session().status(), Status::Finished);
    }

    #[test]
    fn test_key_events_also_drive_countdown() {
        let (mut app, clock) = create_test_app(&["hello world"]);
        app.on_event(AppEvent::Key(key(KeyCode::Char('h'))));

        clock.advance_ms(2_000);
        app.on_event(AppEvent::Key(key(KeyCode::Char('e'))));
        assert_eq!(app.session().time_remaining_secs(), 58);

        clock.advance_ms(58_000);
        app.on_event(AppEvent::Key(key(KeyCode::Char('l'))));
        assert_eq!(app.session().status(), Status::Finished);
        assert_eq!(app.session().input(), "he");
    }

    #[test]
    fn test_on_event_quit_and_resize() {
        let (mut app, _clock) = create_test_app(&["hello"]);
        assert_eq!(app.on_event(AppEvent::Resize), Action::Continue);
        assert_eq!(app.on_event(AppEvent::Tick), Action::Continue);
        assert_eq!(
            app.on_event(AppEvent::Key(key(KeyCode::Esc))),
            Action::Quit
        );
    }

    #[test]
    fn test_delete_last_word() {
        let cases = [
            ("", ""),
            ("hello", ""),
            ("hello ", ""),
            ("one two", "one "),
            ("one two   ", "one "),
            ("naïve café", "naïve "),
        ];
        for (input, expected) in cases {
            let mut s = input.to_string();
            delete_last_word(&mut s);
            assert_eq!(s, expected, "input {input:?}");
        }
    }
}
