use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use retail_dash_core::dashboard::FOCUS_RELAYOUT_DELAY;
use std::io::Stdout;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::{debug, info};

use super::AppEvent;
use crate::api::{spawn_refresh, MetricsSource};
use crate::app::{handle_input, App, Command};
use crate::ui;

fn schedule_map_invalidation(tx: &UnboundedSender<AppEvent>, delay: Duration) {
    let tx = tx.clone();
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let _ = tx.send(AppEvent::InvalidateMap);
    });
}

fn execute<S: MetricsSource>(command: Command, source: &Arc<S>, tx: &UnboundedSender<AppEvent>) {
    match command {
        Command::Refresh(request) => {
            spawn_refresh(source, &request, tx);
        }
        Command::FilterChanged(change) => {
            info!(
                region = %change.refresh.query.region,
                year = change.refresh.query.year.as_deref().unwrap_or("all"),
                "filter changed"
            );
            spawn_refresh(source, &change.refresh, tx);
            schedule_map_invalidation(tx, change.relayout_after);
        }
    }
}

fn handle_app_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::Fetched(outcome) => {
            app.apply_outcome(outcome);
        }
        AppEvent::InvalidateMap => {
            if !app.invalidate_map() {
                debug!("map not created yet, skipping layout refresh");
            }
        }
    }
}

/// Run the main application event loop
pub async fn run<S: MetricsSource>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    source: Arc<S>,
) -> Result<()> {
    // Configure event poll timeout (ms)
    const EVENT_POLL_TIMEOUT: u64 = 50;

    let (tx, mut rx) = mpsc::unbounded_channel::<AppEvent>();
    spawn_refresh(&source, &app.dashboard.refresh(), &tx);

    loop {
        app.tick();

        while let Ok(event) = rx.try_recv() {
            handle_app_event(app, event);
        }

        // A layout request means the map area may have moved or resized,
        // so repaint every cell instead of diffing.
        if app.dashboard.widgets_mut().map.take_layout_request() {
            if let Err(e) = terminal.clear() {
                debug!("terminal clear failed: {e}");
            }
        }

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(color_eyre::eyre::eyre!("Terminal draw error: {e}"));
        }

        if matches!(
            event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if let Some(command) = handle_input(app, key.code) {
                        execute(command, &source, &tx);
                    }
                    if !app.running {
                        break;
                    }
                }
                Ok(Event::Resize(width, height)) => {
                    debug!(width, height, "terminal resized");
                    app.invalidate_map();
                }
                Ok(Event::FocusGained) => {
                    schedule_map_invalidation(&tx, FOCUS_RELAYOUT_DELAY);
                }
                Ok(_) | Err(_) => {
                    // Nothing else affects the dashboard
                }
            }
        }
    }
    Ok(())
}
