use super::{color, panel, render_empty};
use crate::app::App;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::canvas::{Canvas, Points};
use ratatui::widgets::{
    Axis, Bar, BarChart, BarGroup, Chart, Dataset, GraphType, List, ListItem,
};
use ratatui::Frame;
use retail_dash_core::charts::{CategoryChart, PROFIT_COLOR, REVENUE_COLOR};
use retail_dash_core::format::{compact_currency, format_currency};
use retail_dash_core::Endpoint;
use std::f64::consts::TAU;

pub fn render_revenue_chart(app: &App, f: &mut Frame<'_>, area: Rect) {
    const TITLE: &str = "Revenue & Profit Over Time";
    let Some(chart) = app.dashboard.widgets().revenue.get() else {
        render_empty(app, f, area, TITLE, Endpoint::RevenueOverTime);
        return;
    };

    let revenue = chart.revenue_points();
    let profit = chart.profit_points();
    // Legend entries carry the latest point's values.
    let [revenue_name, profit_name] = chart
        .labels
        .len()
        .checked_sub(1)
        .and_then(|last| chart.tooltip(last))
        .unwrap_or_else(|| ["Revenue".to_string(), "Profit".to_string()]);

    let datasets = vec![
        Dataset::default()
            .name(revenue_name)
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(color(REVENUE_COLOR)))
            .data(&revenue),
        Dataset::default()
            .name(profit_name)
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(color(PROFIT_COLOR)))
            .data(&profit),
    ];

    let x_max = chart.labels.len().saturating_sub(1).max(1) as f64;
    let x_labels = match (chart.labels.first(), chart.labels.last()) {
        (Some(first), Some(last)) => vec![Span::raw(first.clone()), Span::raw(last.clone())],
        _ => Vec::new(),
    };
    let y_max = chart.y_max().max(1.0);
    let y_labels = [0.0, y_max / 2.0, y_max]
        .into_iter()
        .map(|value| Span::raw(compact_currency(value.round())))
        .collect::<Vec<_>>();

    let widget = Chart::new(datasets)
        .block(panel(TITLE, app.dashboard.is_pending(Endpoint::RevenueOverTime)))
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, y_max])
                .labels(y_labels),
        );

    f.render_widget(widget, area);
}

/// Inner and outer radius of the donut ring, in canvas units.
const DONUT_RADII: (f64, f64) = (0.55, 1.0);

/// Points filling each slice's arc of the ring, one set per slice.
pub fn donut_points(chart: &CategoryChart) -> Vec<Vec<(f64, f64)>> {
    const RINGS: usize = 8;
    const STEPS_PER_TURN: f64 = 240.0;

    let total = chart.total();
    if total <= 0.0 {
        return Vec::new();
    }

    let (inner, outer) = DONUT_RADII;
    let mut start = 0.0;
    chart
        .slices
        .iter()
        .map(|slice| {
            let sweep = TAU * slice.value.max(0.0) / total;
            let steps = (sweep / TAU * STEPS_PER_TURN).ceil() as usize;
            let mut points = Vec::with_capacity(steps * RINGS);
            for step in 0..steps {
                // Clockwise from twelve o'clock, like a pie chart is read.
                let angle = start + sweep * step as f64 / steps as f64;
                for ring in 0..RINGS {
                    let radius = inner + (outer - inner) * ring as f64 / (RINGS - 1) as f64;
                    points.push((radius * angle.sin(), radius * angle.cos()));
                }
            }
            start += sweep;
            points
        })
        .collect()
}

pub fn render_category_chart(app: &App, f: &mut Frame<'_>, area: Rect) {
    const TITLE: &str = "Revenue by Category";
    let Some(chart) = app.dashboard.widgets().category.get() else {
        render_empty(app, f, area, TITLE, Endpoint::RevenueByCategory);
        return;
    };

    let block = panel(TITLE, app.dashboard.is_pending(Endpoint::RevenueByCategory));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let split = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(inner);

    let arcs = donut_points(chart);
    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-1.1, 1.1])
        .y_bounds([-1.1, 1.1])
        .paint(|ctx| {
            for (points, slice) in arcs.iter().zip(&chart.slices) {
                ctx.draw(&Points {
                    coords: points,
                    color: color(slice.color),
                });
            }
        });
    f.render_widget(canvas, split[0]);

    let legend = chart
        .slices
        .iter()
        .map(|slice| {
            ListItem::new(TextLine::from(vec![
                Span::styled("■ ", Style::default().fg(color(slice.color))),
                Span::raw(slice.tooltip()),
            ]))
        })
        .collect::<Vec<_>>();
    f.render_widget(List::new(legend), split[1]);
}

pub fn render_region_chart(app: &App, f: &mut Frame<'_>, area: Rect) {
    const TITLE: &str = "Revenue by Region";
    let Some(chart) = app.dashboard.widgets().region.get() else {
        render_empty(app, f, area, TITLE, Endpoint::RevenueByRegion);
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
                .value_style(
                    Style::default()
                        .fg(Color::Black)
                        .bg(fill)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let widget = BarChart::default()
        .block(panel(TITLE, app.dashboard.is_pending(Endpoint::RevenueByRegion)))
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .data(BarGroup::default().bars(&bars));

    f.render_widget(widget, area);

    if let Some(top) = chart.bars.iter().max_by(|a, b| a.revenue.total_cmp(&b.revenue)) {
        let footer = Rect {
            y: area.bottom().saturating_sub(1),
            height: 1,
            x: area.x + 2,
            width: area.width.saturating_sub(4),
        };
        if footer.height > 0 && area.height > 2 {
            f.render_widget(
                TextLine::from(format!("Top: {} {}", top.region, format_currency(top.revenue)))
                    .style(Style::default().fg(Color::Gray)),
                footer,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use retail_dash_core::payload::CategoryBreakdown;

    #[test]
    fn donut_arcs_follow_slice_shares() {
        let chart = CategoryChart::build(&CategoryBreakdown {
            categories: vec!["Soda".into(), "Tea".into()],
            revenue: vec![75.0, 25.0],
        });
        let arcs = donut_points(&chart);
        assert_eq!(arcs.len(), 2);
        assert!(arcs[0].len() > arcs[1].len() * 2);
        for (x, y) in arcs.iter().flatten() {
            let radius = x.hypot(*y);
            assert!(radius >= DONUT_RADII.0 - 1e-9 && radius <= DONUT_RADII.1 + 1e-9);
        }
    }

    #[test]
    fn empty_total_draws_nothing() {
        let chart = CategoryChart::build(&CategoryBreakdown {
            categories: vec!["Soda".into()],
            revenue: vec![0.0],
        });
        assert!(donut_points(&chart).is_empty());
    }
}
