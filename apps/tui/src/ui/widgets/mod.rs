pub mod charts;
pub mod kpi;
pub mod lists;
pub mod map;
pub mod popup;

use crate::app::App;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use retail_dash_core::charts::Rgb;
use retail_dash_core::Endpoint;
use throbber_widgets_tui::Throbber;

pub const ACCENT: Color = Color::Cyan;

pub const fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

/// Bordered panel; the title notes when a newer update is on its way.
pub fn panel(title: &str, updating: bool) -> Block<'static> {
    let title = if updating {
        format!(" {title} (updating) ")
    } else {
        format!(" {title} ")
    };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
}

/// Placeholder for a widget with nothing to draw yet: a throbber while its
/// fetch is in flight, otherwise a short note.
pub fn render_empty(app: &App, f: &mut Frame<'_>, area: Rect, title: &str, endpoint: Endpoint) {
    let block = panel(title, false);
    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.height == 0 {
        return;
    }

    if app.dashboard.is_pending(endpoint) {
        let throbber = Throbber::default()
            .label("Loading...")
            .style(Style::default().fg(Color::Gray))
            .throbber_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD));
        let mut state = app.throbber.clone();
        f.render_stateful_widget(throbber, Rect { height: 1, ..inner }, &mut state);
    } else {
        let paragraph = Paragraph::new("No data")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        f.render_widget(paragraph, inner);
    }
}
