use crate::api::FetchOutcome;
use chrono::{DateTime, Local};
use retail_dash_core::{Applied, Dashboard, Endpoint, RegionSelector};
use throbber_widgets_tui::ThrobberState;
use tracing::{debug, info, warn};

/// Which filter the arrow keys change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterFocus {
    Year,
    Region,
}

impl FilterFocus {
    pub const fn toggle(self) -> Self {
        match self {
            Self::Year => Self::Region,
            Self::Region => Self::Year,
        }
    }
}

#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub show_help: bool,
    pub focus: FilterFocus,
    pub dashboard: Dashboard,
    pub status_message: String,
    pub last_update: Option<DateTime<Local>>,
    pub throbber: ThrobberState,
}

impl App {
    pub fn new<I, S>(years: I, region: RegionSelector) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            running: true,
            show_help: false,
            focus: FilterFocus::Region,
            dashboard: Dashboard::new(years).with_region(region),
            status_message: String::new(),
            last_update: None,
            throbber: ThrobberState::default(),
        }
    }

    /// Advances the loading indicators by one frame.
    pub fn tick(&mut self) {
        if self.dashboard.pending_count() > 0 {
            self.throbber.calc_next();
        }
    }

    /// Feeds a fetch result to the dashboard and records what happened.
    pub fn apply_outcome(&mut self, outcome: FetchOutcome) -> Applied {
        let applied = self.dashboard.apply(outcome.generation, outcome.result);
        match &applied {
            Applied::Rendered(endpoint) => {
                self.last_update = Some(Local::now());
                debug!(%endpoint, "widget updated");
                if *endpoint == Endpoint::StateGrowth {
                    let markers = self
                        .dashboard
                        .widgets()
                        .map
                        .instance()
                        .map_or(0, |map| map.markers().count());
                    debug!(markers, "map markers placed");
                }
            }
            Applied::Failed(failure) => {
                self.status_message = failure.to_string();
            }
            Applied::Stale {
                endpoint,
                generation,
            } => {
                debug!(%endpoint, %generation, "discarding stale response");
            }
        }
        let settled = matches!(applied, Applied::Rendered(_) | Applied::Failed(_));
        if settled && self.dashboard.pending_count() == 0 {
            let failed = self.dashboard.failed().len();
            if failed == 0 {
                self.status_message.clear();
                info!(generation = %self.dashboard.latest_generation(), "refresh complete");
            } else {
                warn!(failed, "refresh finished with failures");
            }
        }
        applied
    }

    /// Requests a map layout recompute. Returns whether the map existed.
    pub fn invalidate_map(&mut self) -> bool {
        self.dashboard.widgets_mut().map.invalidate_layout()
    }

    /// Footer text: time of the last rendered update and the failure count.
    pub fn status_line(&self) -> String {
        let updated = self.last_update.map_or_else(
            || "never".to_string(),
            |time| time.format("%H:%M:%S").to_string(),
        );
        let failed = self.dashboard.failed().len();
        let mut line = format!("Last update: {updated}");
        if failed > 0 {
            line.push_str(&format!(" | {failed} failed"));
        }
        if !self.status_message.is_empty() {
            line.push_str(" | ");
            line.push_str(&self.status_message);
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use retail_dash_core::payload::KpiPayload;
    use retail_dash_core::{FetchFailure, Payload};

    #[test]
    fn failure_is_reported_in_the_status_line() {
        let mut app = App::new(["2024"], RegionSelector::All);
        let request = app.dashboard.refresh();
        app.apply_outcome(FetchOutcome {
            generation: request.generation,
            endpoint: Endpoint::Kpi,
            result: Err(FetchFailure::new(Endpoint::Kpi, "HTTP 500")),
        });

        let line = app.status_line();
        assert!(line.starts_with("Last update: never"));
        assert!(line.contains("1 failed"));
        assert!(line.contains("/api/kpi_data"));
    }

    #[test]
    fn rendered_update_sets_the_timestamp() {
        let mut app = App::new(Vec::<String>::new(), RegionSelector::All);
        let request = app.dashboard.refresh();
        let applied = app.apply_outcome(FetchOutcome {
            generation: request.generation,
            endpoint: Endpoint::Kpi,
            result: Ok(Payload::Kpi(KpiPayload::default())),
        });
        assert_eq!(applied, Applied::Rendered(Endpoint::Kpi));
        assert!(app.last_update.is_some());
    }

    #[test]
    fn map_invalidation_waits_for_the_map() {
        let mut app = App::new(Vec::<String>::new(), RegionSelector::All);
        assert!(!app.invalidate_map());
    }
}
