use super::{panel, ACCENT};
use crate::app::App;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use retail_dash_core::widgets::PLACEHOLDER;
use retail_dash_core::Endpoint;

pub fn render_kpi_cards(app: &App, f: &mut Frame<'_>, area: Rect) {
    let kpi = app.dashboard.widgets().kpi.as_ref();
    let updating = kpi.is_some() && app.dashboard.is_pending(Endpoint::Kpi);

    let values: [(&str, Option<&str>); 4] = [
        ("Total Revenue", kpi.map(|k| k.total_revenue.as_str())),
        ("Total Profit", kpi.map(|k| k.total_profit.as_str())),
        ("Regions", kpi.map(|k| k.regions_count.as_str())),
        ("Units Sold", kpi.map(|k| k.units_sold.as_str())),
    ];

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    for ((title, value), card) in values.into_iter().zip(cards.iter()) {
        let paragraph = Paragraph::new(value.unwrap_or(PLACEHOLDER))
            .style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(panel(title, updating));
        f.render_widget(paragraph, *card);
    }
}
