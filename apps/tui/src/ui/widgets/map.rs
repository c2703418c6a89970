use super::{color, panel, render_empty};
use crate::app::App;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::canvas::{Canvas, Circle, Map as WorldMap, MapResolution, Points};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;
use retail_dash_core::geo::{Bubble, LAT_BOUNDS, LON_BOUNDS};
use retail_dash_core::widgets::{LegendEntry, MapLayer};
use retail_dash_core::Endpoint;

pub fn render_map(app: &App, f: &mut Frame<'_>, area: Rect) {
    const TITLE: &str = "State Revenue & Growth";
    let Some(map) = app.dashboard.widgets().map.instance() else {
        render_empty(app, f, area, TITLE, Endpoint::StateGrowth);
        return;
    };

    let mut block = panel(TITLE, app.dashboard.is_pending(Endpoint::StateGrowth));
    let attribution = map.layers().iter().find_map(|layer| match layer {
        MapLayer::Tiles { attribution } => Some(*attribution),
        _ => None,
    });
    if let Some(attribution) = attribution {
        block = block.title_bottom(TextLine::from(attribution).right_aligned());
    }

    let selected = map.selected_index();
    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds(LON_BOUNDS)
        .y_bounds(LAT_BOUNDS)
        .paint(|ctx| {
            ctx.draw(&WorldMap {
                color: Color::DarkGray,
                resolution: MapResolution::High,
            });
            ctx.layer();
            for (index, bubble) in map.markers().enumerate() {
                let fill = color(bubble.band.color());
                let radius = bubble.radius_deg();
                if radius > 0.0 {
                    ctx.draw(&Circle {
                        x: bubble.lng,
                        y: bubble.lat,
                        radius,
                        color: fill,
                    });
                } else {
                    ctx.draw(&Points {
                        coords: &[(bubble.lng, bubble.lat)],
                        color: fill,
                    });
                }
                if selected == Some(index) {
                    ctx.print(
                        bubble.lng,
                        bubble.lat,
                        Span::styled(
                            "◉",
                            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                        ),
                    );
                }
            }
        });
    f.render_widget(canvas, area);

    if let Some(legend) = map.legend() {
        render_legend(f, area, legend);
    }
    if let Some(bubble) = map.selected_marker() {
        render_marker_popup(f, area, bubble);
    }
}

fn render_legend(f: &mut Frame<'_>, area: Rect, entries: &[LegendEntry]) {
    let width = 14;
    let height = entries.len() as u16 + 2;
    if area.width < width + 4 || area.height < height + 2 {
        return;
    }
    let legend_area = Rect {
        x: area.right() - width - 2,
        y: area.y + 1,
        width,
        height,
    };

    let lines = entries
        .iter()
        .map(|entry| {
            TextLine::from(vec![
                Span::styled("● ", Style::default().fg(color(entry.color))),
                Span::raw(entry.label),
            ])
        })
        .collect::<Vec<_>>();

    f.render_widget(Clear, legend_area);
    f.render_widget(
        Paragraph::new(lines).block(Block::default().title(" Growth ").borders(Borders::ALL)),
        legend_area,
    );
}

fn render_marker_popup(f: &mut Frame<'_>, area: Rect, bubble: &Bubble) {
    let [state, region, revenue, growth] = bubble.popup_lines();
    let width = [&state, &region, &revenue, &growth]
        .iter()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0) as u16
        + 4;
    let height = 6;
    if area.width < width + 4 || area.height < height + 2 {
        return;
    }
    let popup_area = Rect {
        x: area.x + 2,
        y: area.bottom() - height - 1,
        width,
        height,
    };

    let lines = vec![
        TextLine::from(Span::styled(state, Style::default().add_modifier(Modifier::BOLD))),
        TextLine::from(region),
        TextLine::from(revenue),
        TextLine::from(growth),
    ];
    f.render_widget(Clear, popup_area);
    f.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color(bubble.band.color()))),
        ),
        popup_area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use retail_dash_core::geo::{plan_bubbles, MAX_BUBBLE_RADIUS_DEG};
    use retail_dash_core::payload::{GeoGrowth, RegionGrowth};

    #[test]
    fn largest_state_gets_the_full_radius() {
        let mut data = GeoGrowth::default();
        data.0.insert(
            "South".into(),
            RegionGrowth {
                states: vec!["Texas".into(), "Florida".into(), "Georgia".into()],
                revenue: vec![400.0, 100.0, 0.0],
                growth: vec![3.0, -12.0, 20.0],
            },
        );
        let bubbles = plan_bubbles(&data);
        let radii: Vec<f64> = bubbles.iter().map(Bubble::radius_deg).collect();
        assert!((radii[0] - MAX_BUBBLE_RADIUS_DEG).abs() < 1e-9);
        assert!((radii[1] - MAX_BUBBLE_RADIUS_DEG / 2.0).abs() < 1e-9);
        assert!(radii[2].abs() < f64::EPSILON);
    }
}
