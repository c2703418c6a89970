mod fetch;
mod view;

use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::time::Duration;

use ratzilla::event::KeyCode;
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};
use retail_dash_core::{Applied, Dashboard, FetchFailure, FilterChange, RefreshRequest};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

/// Year options offered after "All Years".
const YEARS: [&str; 2] = ["2023", "2024"];

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Year,
    Region,
}

pub struct WebState {
    pub dashboard: Dashboard,
    pub focus: Focus,
    pub show_help: bool,
}

type Shared = Rc<RefCell<WebState>>;

enum Command {
    Refresh(RefreshRequest),
    FilterChanged(FilterChange),
}

fn main() -> io::Result<()> {
    let state: Shared = Rc::new(RefCell::new(WebState {
        dashboard: Dashboard::new(YEARS),
        focus: Focus::Region,
        show_help: false,
    }));

    let initial = state.borrow_mut().dashboard.refresh();
    start_refresh(&state, &initial);

    let backend = DomBackend::new()?;
    let mut terminal = Terminal::new(backend)?;

    terminal.on_key_event({
        let state = Rc::clone(&state);
        move |event| handle_key(&state, event.code)
    });

    terminal.draw_web(move |f| {
        let mut state = state.borrow_mut();
        // The DOM is repainted every frame, so a pending relayout only
        // needs to be consumed.
        state.dashboard.widgets_mut().map.take_layout_request();
        view::render(&state, f);
    });

    Ok(())
}

fn handle_key(state: &Shared, code: KeyCode) {
    let command = {
        let mut current = state.borrow_mut();
        let WebState {
            dashboard,
            focus,
            show_help,
        } = &mut *current;

        match code {
            KeyCode::F(1) | KeyCode::Char('?') => {
                *show_help = !*show_help;
                None
            }
            KeyCode::Esc => {
                *show_help = false;
                None
            }
            KeyCode::Tab => {
                *focus = match focus {
                    Focus::Year => Focus::Region,
                    Focus::Region => Focus::Year,
                };
                None
            }
            KeyCode::Char('r') => Some(Command::Refresh(dashboard.refresh())),
            KeyCode::Char(']') => {
                dashboard.widgets_mut().map.select_next_marker();
                None
            }
            KeyCode::Char('[') => {
                dashboard.widgets_mut().map.select_previous_marker();
                None
            }
            KeyCode::Down | KeyCode::Right => {
                step_filter(dashboard, *focus, true).map(Command::FilterChanged)
            }
            KeyCode::Up | KeyCode::Left => {
                step_filter(dashboard, *focus, false).map(Command::FilterChanged)
            }
            _ => None,
        }
    };

    match command {
        Some(Command::Refresh(request)) => start_refresh(state, &request),
        Some(Command::FilterChanged(change)) => {
            start_refresh(state, &change.refresh);
            schedule_relayout(state, change.relayout_after);
        }
        None => {}
    }
}

fn step_filter(dashboard: &mut Dashboard, focus: Focus, forward: bool) -> Option<FilterChange> {
    match focus {
        Focus::Region => {
            let filter = dashboard.region_filter();
            let region = if forward { filter.next() } else { filter.previous() };
            dashboard.select_region(region)
        }
        Focus::Year => {
            let filter = dashboard.year_filter();
            let index = if forward {
                filter.next_index()
            } else {
                filter.previous_index()
            };
            dashboard.select_year(index)
        }
    }
}

/// Fires one request per endpoint; each result is applied on arrival.
fn start_refresh(state: &Shared, request: &RefreshRequest) {
    for &endpoint in &request.endpoints {
        let state = Rc::clone(state);
        let query = request.query.clone();
        let generation = request.generation;

        spawn_local(async move {
            let result = fetch::fetch_payload(endpoint, &query)
                .await
                .map_err(|error| {
                    let failure = FetchFailure::new(endpoint, error);
                    web_sys::console::error_1(&failure.to_string().into());
                    failure
                });

            let applied = state.borrow_mut().dashboard.apply(generation, result);
            if let Applied::Stale { endpoint, generation } = applied {
                web_sys::console::debug_1(
                    &format!("discarded stale {endpoint} response from {generation}").into(),
                );
            }
        });
    }
}

fn schedule_relayout(state: &Shared, delay: Duration) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let state = Rc::clone(state);
    let callback = Closure::once_into_js(move || {
        state.borrow_mut().dashboard.widgets_mut().map.invalidate_layout();
    });
    let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
    if let Err(error) = window
        .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), millis)
    {
        web_sys::console::error_1(&error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use retail_dash_core::payload::RegionBreakdown;
    use retail_dash_core::{Payload, RegionSelector};

    fn dashboard_with_regions() -> Dashboard {
        let mut dashboard = Dashboard::new(YEARS);
        let request = dashboard.refresh();
        dashboard.apply(
            request.generation,
            Ok(Payload::RevenueByRegion(RegionBreakdown {
                regions: vec!["West".into(), "South".into()],
                revenue: vec![2.0, 1.0],
            })),
        );
        dashboard
    }

    #[test]
    fn region_steps_wrap_around() {
        let mut dashboard = dashboard_with_regions();
        let change = step_filter(&mut dashboard, Focus::Region, false).unwrap();
        assert_eq!(change.refresh.query.region, RegionSelector::parse("South"));

        let change = step_filter(&mut dashboard, Focus::Region, true).unwrap();
        assert_eq!(change.refresh.query.region, RegionSelector::All);
        assert_eq!(change.relayout_after, Duration::from_millis(100));
    }

    #[test]
    fn year_steps_wrap_around() {
        let mut dashboard = dashboard_with_regions();
        let change = step_filter(&mut dashboard, Focus::Year, false).unwrap();
        assert_eq!(change.refresh.query.year.as_deref(), Some("2024"));

        let change = step_filter(&mut dashboard, Focus::Year, true).unwrap();
        assert_eq!(change.refresh.query.year, None);
        assert_eq!(*dashboard.selected_region(), RegionSelector::All);
    }
}
