use crate::app::state::{App, FilterFocus};
use crossterm::event::KeyCode;
use retail_dash_core::{FilterChange, RefreshRequest};

/// Work the event loop must start on behalf of a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Refresh(RefreshRequest),
    FilterChanged(FilterChange),
}

pub fn handle_input(app: &mut App, key: KeyCode) -> Option<Command> {
    if handle_help_toggle(app, key) {
        return None;
    }

    match key {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.running = false;
            None
        }
        KeyCode::Tab | KeyCode::BackTab => {
            app.focus = app.focus.toggle();
            None
        }
        KeyCode::Char('r') => Some(Command::Refresh(app.dashboard.refresh())),
        KeyCode::Char(']') => {
            app.dashboard.widgets_mut().map.select_next_marker();
            None
        }
        KeyCode::Char('[') => {
            app.dashboard.widgets_mut().map.select_previous_marker();
            None
        }
        KeyCode::Down | KeyCode::Right => change_filter(app, true),
        KeyCode::Up | KeyCode::Left => change_filter(app, false),
        _ => None,
    }
}

fn handle_help_toggle(app: &mut App, key: KeyCode) -> bool {
    if matches!(key, KeyCode::F(1) | KeyCode::Char('?')) {
        app.show_help = !app.show_help;
        return true;
    }

    if app.show_help {
        if key == KeyCode::Esc {
            app.show_help = false;
        }
        return true;
    }

    false
}

fn change_filter(app: &mut App, forward: bool) -> Option<Command> {
    let dashboard = &mut app.dashboard;
    let change = match app.focus {
        FilterFocus::Region => {
            let filter = dashboard.region_filter();
            let region = if forward { filter.next() } else { filter.previous() };
            dashboard.select_region(region)
        }
        FilterFocus::Year => {
            let filter = dashboard.year_filter();
            let index = if forward {
                filter.next_index()
            } else {
                filter.previous_index()
            };
            dashboard.select_year(index)
        }
    };
    change.map(Command::FilterChanged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::FetchOutcome;
    use retail_dash_core::payload::{GeoGrowth, RegionBreakdown, RegionGrowth};
    use retail_dash_core::{Endpoint, Payload, RegionSelector};

    fn app_with_regions() -> App {
        let mut app = App::new(["2024"], RegionSelector::All);
        let request = app.dashboard.refresh();
        app.apply_outcome(FetchOutcome {
            generation: request.generation,
            endpoint: Endpoint::RevenueByRegion,
            result: Ok(Payload::RevenueByRegion(RegionBreakdown {
                regions: vec!["West".into(), "South".into()],
                revenue: vec![2.0, 1.0],
            })),
        });
        app
    }

    #[test]
    fn quit_keys_stop_the_app() {
        let mut app = App::new(Vec::<String>::new(), RegionSelector::All);
        assert!(handle_input(&mut app, KeyCode::Char('q')).is_none());
        assert!(!app.running);
    }

    #[test]
    fn escape_closes_help_before_quitting() {
        let mut app = App::new(Vec::<String>::new(), RegionSelector::All);
        handle_input(&mut app, KeyCode::F(1));
        assert!(app.show_help);
        handle_input(&mut app, KeyCode::Esc);
        assert!(!app.show_help);
        assert!(app.running);
    }

    #[test]
    fn region_keys_walk_the_options() {
        let mut app = app_with_regions();
        let Some(Command::FilterChanged(change)) = handle_input(&mut app, KeyCode::Down) else {
            panic!("expected a filter change");
        };
        assert_eq!(change.refresh.query.region, RegionSelector::parse("West"));
        assert_eq!(change.relayout_after.as_millis(), 100);

        handle_input(&mut app, KeyCode::Up);
        assert_eq!(*app.dashboard.selected_region(), RegionSelector::All);
    }

    #[test]
    fn tab_moves_focus_to_years() {
        let mut app = app_with_regions();
        handle_input(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, FilterFocus::Year);

        let Some(Command::FilterChanged(change)) = handle_input(&mut app, KeyCode::Right) else {
            panic!("expected a filter change");
        };
        assert_eq!(change.refresh.query.year.as_deref(), Some("2024"));
        assert_eq!(*app.dashboard.selected_region(), RegionSelector::All);

        let Some(Command::FilterChanged(change)) = handle_input(&mut app, KeyCode::Down) else {
            panic!("expected a filter change");
        };
        assert_eq!(change.refresh.query.year, None);
    }

    #[test]
    fn refresh_key_issues_a_new_generation() {
        let mut app = App::new(Vec::<String>::new(), RegionSelector::All);
        let before = app.dashboard.latest_generation();
        let Some(Command::Refresh(request)) = handle_input(&mut app, KeyCode::Char('r')) else {
            panic!("expected a refresh");
        };
        assert!(request.generation > before);
    }

    #[test]
    fn bracket_keys_step_markers() {
        let mut app = App::new(Vec::<String>::new(), RegionSelector::All);
        let request = app.dashboard.refresh();
        let mut geo = GeoGrowth::default();
        geo.0.insert(
            "West".into(),
            RegionGrowth {
                states: vec!["Oregon".into(), "Nevada".into()],
                revenue: vec![10.0, 5.0],
                growth: vec![1.0, 2.0],
            },
        );
        app.apply_outcome(FetchOutcome {
            generation: request.generation,
            endpoint: Endpoint::StateGrowth,
            result: Ok(Payload::StateGrowth(geo)),
        });

        handle_input(&mut app, KeyCode::Char('['));
        let map = app.dashboard.widgets().map.instance().unwrap();
        assert_eq!(map.selected_marker().map(|b| b.state.as_str()), Some("Nevada"));
    }
}
