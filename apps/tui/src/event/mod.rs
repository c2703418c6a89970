// Event handling for retail_dash: the interactive loop and the headless report

mod headless;
mod loop_handler;

pub use headless::{refresh_once, run_headless, HeadlessReport};
pub use loop_handler::run;

use crate::api::FetchOutcome;

/// Messages delivered to the UI loop from background tasks.
#[derive(Debug)]
pub enum AppEvent {
    Fetched(FetchOutcome),
    InvalidateMap,
}

impl From<FetchOutcome> for AppEvent {
    fn from(outcome: FetchOutcome) -> Self {
        Self::Fetched(outcome)
    }
}
