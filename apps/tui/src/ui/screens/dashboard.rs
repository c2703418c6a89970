use crate::app::{App, FilterFocus};
use crate::ui::widgets::{charts, color, kpi, lists, map, ACCENT};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use retail_dash_core::charts::BarFill;
use retail_dash_core::filter::{RegionFilter, YearFilter};

pub fn render_dashboard(app: &App, f: &mut Frame<'_>) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Title + filters
            Constraint::Length(3), // KPI cards
            Constraint::Percentage(35),
            Constraint::Min(10),
            Constraint::Length(8), // Lists
            Constraint::Length(1), // Status
        ])
        .split(f.area());

    render_header(app, f, rows[0]);
    kpi::render_kpi_cards(app, f, rows[1]);

    let charts_row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[2]);
    charts::render_revenue_chart(app, f, charts_row[0]);
    charts::render_category_chart(app, f, charts_row[1]);

    let map_row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(rows[3]);
    charts::render_region_chart(app, f, map_row[0]);
    map::render_map(app, f, map_row[1]);

    let list_row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[4]);
    lists::render_growing_categories(app, f, list_row[0]);
    lists::render_outperforming_regions(app, f, list_row[1]);

    render_status(app, f, rows[5]);
}

fn render_header(app: &App, f: &mut Frame<'_>, area: Rect) {
    let dashboard = &app.dashboard;
    let title = dashboard.title();

    let mut title_spans = Vec::new();
    if let Some(region) = &title.highlight {
        title_spans.push(Span::styled(
            region.clone(),
            Style::default()
                .fg(color(BarFill::Highlight.color()))
                .add_modifier(Modifier::BOLD),
        ));
    }
    title_spans.push(Span::styled(
        title.text.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    ));

    let year_filter = dashboard.year_filter();
    let region_filter = dashboard.region_filter();
    let year_label = year_filter
        .options()
        .get(year_filter.position())
        .map_or("All Years", |option| YearFilter::option_label(option));
    let region_label = RegionFilter::option_label(region_filter.selected().as_query_value());

    let filter_style = |focus: FilterFocus, active: bool| {
        let mut style = Style::default().fg(if active { Color::Yellow } else { Color::White });
        if app.focus == focus {
            style = style.add_modifier(Modifier::REVERSED);
        }
        style
    };

    let filters = TextLine::from(vec![
        Span::raw("Year: "),
        Span::styled(
            format!(" {year_label} "),
            filter_style(FilterFocus::Year, year_filter.selected_year().is_some()),
        ),
        Span::raw("   Region: "),
        Span::styled(
            format!(" {region_label} "),
            filter_style(FilterFocus::Region, region_filter.is_active()),
        ),
    ]);

    let paragraph = Paragraph::new(vec![TextLine::from(title_spans), filters])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ACCENT)),
        );
    f.render_widget(paragraph, area);
}

fn render_status(app: &App, f: &mut Frame<'_>, area: Rect) {
    let style = if app.dashboard.failed().is_empty() {
        Style::default().fg(Color::Gray)
    } else {
        Style::default().fg(Color::Red)
    };
    let line = TextLine::from(vec![
        Span::styled(app.status_line(), style),
        Span::styled("   F1: help  q: quit", Style::default().fg(Color::DarkGray)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}
