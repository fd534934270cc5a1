pub mod format;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::{
    app::App,
    clock::Clock,
    session::{Mark, Session},
};

const HORIZONTAL_MARGIN: u16 = 4;
const MAX_WIDTH: u16 = 90;

impl<C: Clock> Widget for &App<C> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        render_session(self.session(), area, buf);
    }
}

/// Lines a bordered paragraph of `text` needs at `width` columns, borders included
fn boxed_height(text: &str, width: u16) -> u16 {
    let inner = width.saturating_sub(2).max(1) as usize;
    let lines = text.width().div_ceil(inner).max(1);
    // wrapping on word boundaries can spill one extra line
    let lines = if lines > 1 { lines + 1 } else { lines };
    lines as u16 + 2
}

pub fn render_session(session: &Session, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let dim_style = Style::default().add_modifier(Modifier::DIM);
    let italic_dim_style = dim_style.add_modifier(Modifier::ITALIC);

    let width = area
        .width
        .saturating_sub(HORIZONTAL_MARGIN * 2)
        .min(MAX_WIDTH);
    let column = Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        width,
        ..area
    };

    let target_height = boxed_height(session.target_text(), width);
    let input_height = boxed_height(session.input(), width);
    let footer_height = if session.has_started() { 0 } else { 2 };
    let results_height = if session.has_finished() { 2 } else { 0 };

    // title, subtitle, gap, timer, gauge, gap and the legend take one row each
    let content_height = 7 + target_height + input_height + results_height + footer_height;
    let top_padding = area.height.saturating_sub(content_height) / 2;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(top_padding),
            Constraint::Length(1), // title
            Constraint::Length(1), // subtitle
            Constraint::Length(1),
            Constraint::Length(1), // time left
            Constraint::Length(1), // progress
            Constraint::Length(1),
            Constraint::Length(target_height),
            Constraint::Length(input_height),
            Constraint::Length(results_height),
            Constraint::Length(1), // legend
            Constraint::Length(footer_height),
            Constraint::Min(0),
        ])
        .split(column);

    Paragraph::new(Span::styled("Typing Speed Test", bold_style))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

    Paragraph::new(Span::styled(
        format!(
            "You have {} to type the sentence below.",
            format::duration_phrase(session.duration_secs())
        ),
        dim_style,
    ))
    .alignment(Alignment::Center)
    .render(chunks[2], buf);

    Paragraph::new(Span::styled(
        format::time_left_label(session.time_remaining_secs()),
        Style::default().patch(bold_style).fg(Color::Red),
    ))
    .alignment(Alignment::Center)
    .render(chunks[4], buf);

    Gauge::default()
        .gauge_style(Style::default().fg(Color::Blue).bg(Color::DarkGray))
        .ratio(session.progress() / 100.0)
        .label(format::percent_label(session.progress()))
        .render(chunks[5], buf);

    Paragraph::new(Line::from(target_spans(session)))
        .block(Block::default().borders(Borders::ALL).title(" Sentence "))
        .wrap(Wrap { trim: false })
        .render(chunks[7], buf);

    render_input(session, chunks[8], buf);

    if session.has_finished() {
        render_results(session, chunks[9], buf);
    }

    let legend = if session.has_finished() {
        "(enter) Try Again / (tab) new sentence / (esc) quit"
    } else {
        "(tab) Reset / (ctrl+r) restart / (esc) quit"
    };
    Paragraph::new(Span::styled(legend, italic_dim_style))
        .alignment(Alignment::Center)
        .render(chunks[10], buf);

    if !session.has_started() {
        Paragraph::new(Span::styled(
            format!(
                "Start typing when you're ready. You have only {}!",
                format::duration_phrase(session.duration_secs())
            ),
            italic_dim_style,
        ))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(chunks[11], buf);
    }
}

/// Target sentence coloured by correctness, with the cursor underlined
fn target_spans(session: &Session) -> Vec<Span<'static>> {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let cursor = session.cursor();

    session
        .char_marks()
        .into_iter()
        .enumerate()
        .map(|(idx, mark)| {
            let (text, mut style) = match mark.mark {
                Mark::Correct => (
                    mark.expected.to_string(),
                    bold_style.fg(Color::Green),
                ),
                Mark::Incorrect => (
                    match mark.expected {
                        ' ' => "·".to_owned(),
                        c => c.to_string(),
                    },
                    bold_style.fg(Color::Red),
                ),
                Mark::Pending => (
                    mark.expected.to_string(),
                    bold_style.add_modifier(Modifier::DIM),
                ),
            };
            if idx == cursor && !session.has_finished() {
                style = style
                    .remove_modifier(Modifier::DIM)
                    .add_modifier(Modifier::UNDERLINED)
                    .bg(Color::Blue);
            }
            Span::styled(text, style)
        })
        .collect()
}

fn render_input(session: &Session, area: Rect, buf: &mut Buffer) {
    let title = if session.has_finished() {
        " Input (locked) "
    } else {
        " Input "
    };
    let block = Block::default().borders(Borders::ALL).title(title);

    let body = if session.input().is_empty() {
        Line::from(Span::styled(
            "Start typing here...",
            Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC),
        ))
    } else {
        let typed = session.target_len().min(session.input_len());
        let (within, overflow): (String, String) = {
            let mut chars = session.input().chars();
            let within: String = chars.by_ref().take(typed).collect();
            (within, chars.collect())
        };
        let mut spans = vec![Span::raw(within)];
        if !overflow.is_empty() {
            spans.push(Span::styled(
                overflow,
                Style::default().fg(Color::Red).add_modifier(Modifier::CROSSED_OUT),
            ));
        }
        Line::from(spans)
    };

    Paragraph::new(body)
        .block(block)
        .wrap(Wrap { trim: false })
        .render(area, buf);
}

fn render_results(session: &Session, area: Rect, buf: &mut Buffer) {
    let label_style = Style::default().add_modifier(Modifier::DIM);
    let stat = |color: Color| Style::default().fg(color).add_modifier(Modifier::BOLD);

    let line = Line::from(vec![
        Span::styled("Speed ", label_style),
        Span::styled(format::wpm_label(session.wpm()), stat(Color::Blue)),
        Span::raw("   "),
        Span::styled("Accuracy ", label_style),
        Span::styled(format!("{}%", session.accuracy()), stat(Color::Green)),
        Span::raw("   "),
        Span::styled("Time ", label_style),
        Span::styled(
            format::elapsed_label(session.elapsed_seconds()),
            stat(Color::Magenta),
        ),
    ]);

    Paragraph::new(line)
        .alignment(Alignment::Center)
        .render(area, buf);
}
