use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
    Frame,
};
use typetick::{
    session::Session,
    settings::{Field, Settings},
    timer::Timer,
    CharStatus, Mode,
};

use crate::{App, Tab};

const HORIZONTAL_MARGIN: u16 = 5;
const VISIBLE_LINES: usize = 3;
const BAR_WIDTH: usize = 50;

const HELP_TEXT: &str = "← → to change tabs\n\nCTRL C / ESC to quit\n\nCTRL R restart test\n\nENTER start test with current settings\n\nTAB select setting\n\n↑ ↓ change current setting";

pub fn draw(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(1)
            .constraints([Constraint::Length(2), Constraint::Min(0)])
            .split(area);

        tabs_line(self.tab).render(chunks[0], buf);

        match self.tab {
            Tab::Typing => render_typing(&self.session, chunks[1], buf),
            Tab::Settings => render_settings(&self.settings, chunks[1], buf),
            Tab::Help => Paragraph::new(HELP_TEXT)
                .alignment(Alignment::Center)
                .render(chunks[1], buf),
        }
    }
}

fn tabs_line(active: Tab) -> Paragraph<'static> {
    let spans = Tab::ALL
        .iter()
        .flat_map(|tab| {
            let style = if *tab == active {
                Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().add_modifier(Modifier::DIM)
            };
            [Span::styled(tab.title(), style), Span::raw("  ")]
        })
        .collect::<Vec<Span>>();

    Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
}

/// Break the content into display lines of `(index, char)`.
///
/// Line breaks in the content end a line; countdown content has none, so it
/// is broken after every 15th word instead.
pub fn layout_lines(session: &Session) -> Vec<Vec<(usize, char)>> {
    let mut lines = vec![];
    let mut line = vec![];
    let mut words = 0;

    for (idx, c) in session.content().iter().copied().enumerate() {
        line.push((idx, c));
        let wrap = match c {
            '\n' => true,
            ' ' if session.mode() == Mode::Countdown => {
                words += 1;
                words % typetick::word_generator::WORDS_PER_LINE == 0
            }
            _ => false,
        };
        if wrap {
            lines.push(std::mem::take(&mut line));
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

fn render_typing(session: &Session, area: Rect, buf: &mut Buffer) {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let dim = bold.add_modifier(Modifier::DIM);

    let lines = layout_lines(session);
    let cursor = session.cursor();
    let first = lines
        .iter()
        .position(|l| l.last().map_or(false, |(idx, _)| *idx >= cursor))
        .unwrap_or(lines.len().saturating_sub(1));

    let text = lines
        .iter()
        .skip(first)
        .take(VISIBLE_LINES)
        .map(|line| {
            Line::from(
                line.iter()
                    .map(|(idx, c)| {
                        let status = session.status()[*idx];
                        let shown = match (*c, status) {
                            (' ' | '\n', CharStatus::Incorrect) => '·',
                            ('\n', _) => ' ',
                            (c, _) => c,
                        };
                        let mut style = match status {
                            CharStatus::Unmatched => dim,
                            CharStatus::Correct => bold.fg(Color::Green),
                            CharStatus::Incorrect => bold.fg(Color::Red),
                        };
                        if *idx == cursor && !session.is_finished() {
                            style = style.add_modifier(Modifier::UNDERLINED);
                        }
                        Span::styled(shown.to_string(), style)
                    })
                    .collect::<Vec<Span>>(),
            )
        })
        .collect::<Vec<Line>>();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(VISIBLE_LINES as u16),
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    Paragraph::new(text)
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

    let timer_style = match session.timer() {
        Timer::CountDown { .. } => Style::default().fg(Color::Blue),
        Timer::CountUp(_) => dim,
    };
    Paragraph::new(Span::styled(timer_text(session), timer_style))
        .alignment(Alignment::Center)
        .render(chunks[3], buf);
}

/// The timer line under the text: elapsed time for word rounds, a progress
/// bar and remaining time for countdown rounds, plus the score once finished.
pub fn timer_text(session: &Session) -> String {
    let timer = session.timer();
    let score = session.final_score().unwrap_or_default();

    match timer {
        Timer::CountUp(_) if timer.is_finished() => {
            format!("{:.2} s, WPM = {:.1}", session.elapsed_secs(), score)
        }
        Timer::CountUp(_) if timer.is_started() => format!("{:.2} s", session.elapsed_secs()),
        Timer::CountUp(_) => "0s".to_string(),
        Timer::CountDown { budget_secs, .. } => {
            if timer.is_finished() {
                format!("{} 0.00 s, WPM = {:.1}", progress_bar(0.0, BAR_WIDTH), score)
            } else {
                let fraction = session.remaining_fraction().unwrap_or(1.0);
                let remaining = session.remaining_secs().unwrap_or(*budget_secs);
                format!("{} {:.2} s", progress_bar(fraction, BAR_WIDTH), remaining)
            }
        }
    }
}

pub fn progress_bar(fraction: f64, width: usize) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn render_settings(settings: &Settings, area: Rect, buf: &mut Buffer) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(area);

    for (field, column) in Field::ALL.iter().zip(columns.iter()) {
        let selected = settings.selected(*field);
        let lines = field
            .options()
            .into_iter()
            .enumerate()
            .map(|(i, option)| {
                let mark = if i == selected { "(X)" } else { "( )" };
                Line::from(format!("{option} {mark}"))
            })
            .collect::<Vec<Line>>();

        let border = if settings.active() == *field {
            Style::default().fg(Color::Indexed(62))
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border)
            .title(field.title());

        Paragraph::new(lines).block(block).render(*column, buf);
    }
}
