use super::ACCENT;
use crate::cli::CliArgs;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

const KEYS: [(&str, &str); 7] = [
    ("Tab", "Switch between the year and region filters"),
    ("↑/↓ ←/→", "Change the focused filter"),
    ("r", "Refresh every widget"),
    ("[ / ]", "Previous / next state on the map"),
    ("F1 / ?", "Toggle this help"),
    ("Esc", "Close help"),
    ("q / Esc", "Quit"),
];

pub fn render_help(f: &mut Frame<'_>) {
    let area = centered_rect(80, 85, f.area());

    let mut lines = KEYS
        .iter()
        .map(|(key, action)| {
            TextLine::from(vec![
                Span::styled(
                    format!("{key:>9}"),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!("  {action}")),
            ])
        })
        .collect::<Vec<_>>();

    lines.push(TextLine::from(""));
    lines.push(TextLine::from(Span::styled(
        "Command line",
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    )));
    let usage = CliArgs::help_text();
    let flag_style = Style::default().fg(Color::Gray);
    lines.extend(
        usage
            .lines()
            .map(|line| TextLine::from(Span::styled(line.to_string(), flag_style))),
    );

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(" Help ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(ACCENT)),
    );

    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}
