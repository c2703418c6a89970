use super::{panel, render_empty};
use crate::app::App;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{List, ListItem};
use ratatui::Frame;
use retail_dash_core::widgets::ListWidget;
use retail_dash_core::Endpoint;

fn growth_color(value: &str) -> Color {
    if value.starts_with('-') {
        Color::Red
    } else {
        Color::Green
    }
}

fn render_list(
    app: &App,
    f: &mut Frame<'_>,
    area: Rect,
    title: &str,
    endpoint: Endpoint,
    list: &ListWidget,
    value_color: fn(&str) -> Color,
) {
    if list.rows().is_empty() {
        render_empty(app, f, area, title, endpoint);
        return;
    }

    let items = list
        .rows()
        .iter()
        .map(|row| {
            ListItem::new(TextLine::from(vec![
                Span::raw(format!("{}  ", row.label)),
                Span::styled(row.value.clone(), Style::default().fg(value_color(&row.value))),
            ]))
        })
        .collect::<Vec<_>>();

    let list = List::new(items).block(panel(title, app.dashboard.is_pending(endpoint)));
    f.render_widget(list, area);
}

pub fn render_growing_categories(app: &App, f: &mut Frame<'_>, area: Rect) {
    render_list(
        app,
        f,
        area,
        "Top Growing Categories",
        Endpoint::GrowthByCategory,
        &app.dashboard.widgets().growing_categories,
        growth_color,
    );
}

pub fn render_outperforming_regions(app: &App, f: &mut Frame<'_>, area: Rect) {
    render_list(
        app,
        f,
        area,
        "Outperforming Regions",
        Endpoint::OutperformingRegions,
        &app.dashboard.widgets().outperforming_regions,
        |_| Color::White,
    );
}
