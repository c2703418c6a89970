use ratzilla::ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line as TextLine, Span},
    widgets::{
        canvas::{Canvas, Circle, Map, MapResolution},
        Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Clear, Dataset, GraphType, List,
        ListItem, Paragraph,
    },
    Frame,
};
use retail_dash_core::charts::{BarFill, Rgb, PROFIT_COLOR, REVENUE_COLOR};
use retail_dash_core::filter::{RegionFilter, YearFilter};
use retail_dash_core::format::compact_currency;
use retail_dash_core::geo::{LAT_BOUNDS, LON_BOUNDS};
use retail_dash_core::widgets::{ListWidget, PLACEHOLDER};
use retail_dash_core::Endpoint;

use crate::{Focus, WebState};

const BORDER: Color = Color::Cyan;

const fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

fn panel(title: &str) -> Block<'static> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BORDER))
}

fn render_placeholder(
    state: &WebState,
    f: &mut Frame<'_>,
    area: Rect,
    title: &str,
    endpoint: Endpoint,
) {
    let text = if state.dashboard.is_pending(endpoint) {
        "Loading..."
    } else {
        "No data"
    };
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray))
        .block(panel(title));
    f.render_widget(paragraph, area);
}

pub fn render(state: &WebState, f: &mut Frame<'_>) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Percentage(35),
            Constraint::Min(12),
            Constraint::Length(8),
        ])
        .split(f.area());

    render_header(state, f, rows[0]);
    render_kpis(state, f, rows[1]);

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[2]);
    render_revenue(state, f, charts[0]);
    render_categories(state, f, charts[1]);

    let geo = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(rows[3]);
    render_regions(state, f, geo[0]);
    render_map(state, f, geo[1]);

    let lists = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[4]);
    let widgets = state.dashboard.widgets();
    render_list(
        state,
        f,
        lists[0],
        "Top Growing Categories",
        Endpoint::GrowthByCategory,
        &widgets.growing_categories,
    );
    render_list(
        state,
        f,
        lists[1],
        "Outperforming Regions",
        Endpoint::OutperformingRegions,
        &widgets.outperforming_regions,
    );

    if state.show_help {
        render_help(f);
    }
}

fn render_header(state: &WebState, f: &mut Frame<'_>, area: Rect) {
    let dashboard = &state.dashboard;
    let title = dashboard.title();

    let mut spans = Vec::new();
    if let Some(region) = &title.highlight {
        spans.push(Span::styled(
            region.clone(),
            Style::default()
                .fg(color(BarFill::Highlight.color()))
                .add_modifier(Modifier::BOLD),
        ));
    }
    spans.push(Span::styled(
        title.text.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    ));

    let years = dashboard.year_filter();
    let regions = dashboard.region_filter();
    let year_label = years
        .options()
        .get(years.position())
        .map_or("All Years", |option| YearFilter::option_label(option));
    let region_label = RegionFilter::option_label(regions.selected().as_query_value());

    let style = |focus: Focus, active: bool| {
        let style = Style::default().fg(if active { Color::Yellow } else { Color::White });
        if state.focus == focus {
            style.add_modifier(Modifier::REVERSED)
        } else {
            style
        }
    };

    let filters = TextLine::from(vec![
        Span::raw("Year: "),
        Span::styled(
            format!(" {year_label} "),
            style(Focus::Year, years.selected_year().is_some()),
        ),
        Span::raw("   Region: "),
        Span::styled(
            format!(" {region_label} "),
            style(Focus::Region, regions.is_active()),
        ),
        Span::styled("   Tab / arrows / r / ?", Style::default().fg(Color::DarkGray)),
    ]);

    let paragraph = Paragraph::new(vec![TextLine::from(spans), filters])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(BORDER)),
        );
    f.render_widget(paragraph, area);
}

fn render_kpis(state: &WebState, f: &mut Frame<'_>, area: Rect) {
    let kpi = state.dashboard.widgets().kpi.as_ref();
    let cards = [
        ("Total Revenue", kpi.map(|k| k.total_revenue.as_str())),
        ("Total Profit", kpi.map(|k| k.total_profit.as_str())),
        ("Regions", kpi.map(|k| k.regions_count.as_str())),
        ("Units Sold", kpi.map(|k| k.units_sold.as_str())),
    ];
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    for ((title, value), column) in cards.into_iter().zip(columns.iter()) {
        let paragraph = Paragraph::new(value.unwrap_or(PLACEHOLDER))
            .alignment(Alignment::Center)
            .style(Style::default().fg(BORDER).add_modifier(Modifier::BOLD))
            .block(panel(title));
        f.render_widget(paragraph, *column);
    }
}

fn render_revenue(state: &WebState, f: &mut Frame<'_>, area: Rect) {
    const TITLE: &str = "Revenue & Profit Over Time";
    let Some(chart) = state.dashboard.widgets().revenue.get() else {
        render_placeholder(state, f, area, TITLE, Endpoint::RevenueOverTime);
        return;
    };

    let revenue = chart.revenue_points();
    let profit = chart.profit_points();
    let datasets = vec![
        Dataset::default()
            .name("Revenue")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(color(REVENUE_COLOR)))
            .data(&revenue),
        Dataset::default()
            .name("Profit")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(color(PROFIT_COLOR)))
            .data(&profit),
    ];

    let x_max = (chart.labels.len().saturating_sub(1).max(1)) as f64;
    let x_labels = match (chart.labels.first(), chart.labels.last()) {
        (Some(first), Some(last)) => vec![Span::raw(first.clone()), Span::raw(last.clone())],
        _ => Vec::new(),
    };
    let y_max = chart.y_max().max(1.0);

    let widget = Chart::new(datasets)
        .block(panel(TITLE))
        .x_axis(Axis::default().bounds([0.0, x_max]).labels(x_labels))
        .y_axis(
            Axis::default()
                .bounds([0.0, y_max])
                .labels(vec![
                    Span::raw(compact_currency(0.0)),
                    Span::raw(compact_currency(y_max.round())),
                ]),
        );
    f.render_widget(widget, area);
}

fn render_categories(state: &WebState, f: &mut Frame<'_>, area: Rect) {
    const TITLE: &str = "Revenue by Category";
    let Some(chart) = state.dashboard.widgets().category.get() else {
        render_placeholder(state, f, area, TITLE, Endpoint::RevenueByCategory);
        return;
    };

    let items = chart
        .slices
        .iter()
        .map(|slice| {
            ListItem::new(TextLine::from(vec![
                Span::styled("■ ", Style::default().fg(color(slice.color))),
                Span::raw(slice.tooltip()),
            ]))
        })
        .collect::<Vec<_>>();
    f.render_widget(List::new(items).block(panel(TITLE)), area);
}

fn render_regions(state: &WebState, f: &mut Frame<'_>, area: Rect) {
    const TITLE: &str = "Revenue by Region";
    let Some(chart) = state.dashboard.widgets().region.get() else {
        render_placeholder(state, f, area, TITLE, Endpoint::RevenueByRegion);
        return;
    };

    let bars: Vec<Bar<'_>> = chart
        .bars
        .iter()
        .map(|bar| {
            let fill = color(bar.fill.color());
            Bar::default()
                .value(bar.revenue.max(0.0).round() as u64)
                .label(TextLine::from(bar.region.clone()))
                .text_value(compact_currency(bar.revenue.round()))
                .style(Style::default().fg(fill))
                .value_style(Style::default().fg(Color::Black).bg(fill))
        })
        .collect();

    let widget = BarChart::default()
        .block(panel(TITLE))
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .data(BarGroup::default().bars(&bars));
    f.render_widget(widget, area);
}

fn render_map(state: &WebState, f: &mut Frame<'_>, area: Rect) {
    const TITLE: &str = "State Revenue & Growth";
    let Some(map) = state.dashboard.widgets().map.instance() else {
        render_placeholder(state, f, area, TITLE, Endpoint::StateGrowth);
        return;
    };

    let legend = map
        .legend()
        .unwrap_or_default()
        .iter()
        .flat_map(|entry| {
            [
                Span::styled(" ● ", Style::default().fg(color(entry.color))),
                Span::raw(entry.label),
            ]
        })
        .collect::<Vec<_>>();

    let block = panel(TITLE).title_bottom(TextLine::from(legend));
    let selected = map.selected_index();
    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds(LON_BOUNDS)
        .y_bounds(LAT_BOUNDS)
        .paint(|ctx| {
            ctx.draw(&Map {
                color: Color::DarkGray,
                resolution: MapResolution::High,
            });
            ctx.layer();
            for (index, bubble) in map.markers().enumerate() {
                ctx.draw(&Circle {
                    x: bubble.lng,
                    y: bubble.lat,
                    radius: bubble.radius_deg(),
                    color: color(bubble.band.color()),
                });
                if selected == Some(index) {
                    ctx.print(
                        bubble.lng,
                        bubble.lat,
                        Span::styled("◉", Style::default().fg(Color::White)),
                    );
                }
            }
        });
    f.render_widget(canvas, area);

    if let Some(bubble) = map.selected_marker() {
        let lines = bubble.popup_lines().map(TextLine::from).to_vec();
        let popup = Rect {
            x: area.x + 2,
            y: area.bottom().saturating_sub(7),
            width: 30.min(area.width.saturating_sub(4)),
            height: 6.min(area.height),
        };
        f.render_widget(Clear, popup);
        f.render_widget(
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL)),
            popup,
        );
    }
}

fn render_list(
    state: &WebState,
    f: &mut Frame<'_>,
    area: Rect,
    title: &str,
    endpoint: Endpoint,
    list: &ListWidget,
) {
    if list.rows().is_empty() {
        render_placeholder(state, f, area, title, endpoint);
        return;
    }
    let items = list
        .rows()
        .iter()
        .map(|row| ListItem::new(format!("{}  {}", row.label, row.value)))
        .collect::<Vec<_>>();
    f.render_widget(List::new(items).block(panel(title)), area);
}

fn render_help(f: &mut Frame<'_>) {
    let area = f.area();
    let popup = Rect {
        x: area.width.saturating_sub(50) / 2,
        y: area.height.saturating_sub(10) / 2,
        width: 50.min(area.width),
        height: 10.min(area.height),
    };
    let lines = [
        "Tab      switch year / region filter",
        "arrows   change the focused filter",
        "r        refresh every widget",
        "[ / ]    previous / next map state",
        "? / F1   toggle help, Esc closes",
    ]
    .map(TextLine::from)
    .to_vec();
    f.render_widget(Clear, popup);
    f.render_widget(Paragraph::new(lines).block(panel("Help")), popup);
}
