use color_eyre::Result;
use retail_dash_core::widgets::WidgetRegistry;
use retail_dash_core::MetricsQuery;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::warn;

use crate::api::{spawn_refresh, FetchOutcome, MetricsSource};
use crate::app::App;

/// Extra time past the request timeout before giving up on stragglers.
const COLLECT_GRACE: Duration = Duration::from_secs(1);

/// Runs one refresh cycle and applies outcomes until every endpoint has
/// answered or `timeout` elapses. Returns how many outcomes were applied.
pub async fn refresh_once<S: MetricsSource>(
    app: &mut App,
    source: &Arc<S>,
    timeout: Duration,
) -> usize {
    let (tx, mut rx) = mpsc::unbounded_channel::<FetchOutcome>();
    let request = app.dashboard.refresh();
    spawn_refresh(source, &request, &tx);
    drop(tx);

    let mut applied = 0;
    let collect = async {
        while let Some(outcome) = rx.recv().await {
            app.apply_outcome(outcome);
            applied += 1;
        }
    };
    if tokio::time::timeout(timeout + COLLECT_GRACE, collect)
        .await
        .is_err()
    {
        warn!(
            pending = app.dashboard.pending_count(),
            "gave up waiting for endpoints"
        );
    }
    applied
}

/// Run the application in headless mode (no UI)
pub async fn run_headless<S: MetricsSource>(
    app: &mut App,
    source: Arc<S>,
    timeout: Duration,
    json: bool,
) -> Result<()> {
    refresh_once(app, &source, timeout).await;
    let report = HeadlessReport::build(app);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render_text());
    }

    Ok(())
}

#[derive(Debug, Serialize)]
pub struct HeadlessReport<'a> {
    pub title: String,
    pub generated_at: String,
    pub query: &'a MetricsQuery,
    pub widgets: &'a WidgetRegistry,
    pub failed: Vec<&'static str>,
    pub pending: Vec<&'static str>,
}

impl<'a> HeadlessReport<'a> {
    pub fn build(app: &'a App) -> Self {
        let dashboard = &app.dashboard;
        Self {
            title: dashboard.title().plain(),
            generated_at: chrono::Local::now().to_rfc3339(),
            query: dashboard.active_query(),
            widgets: dashboard.widgets(),
            failed: dashboard.failed().iter().map(|e| e.path()).collect(),
            pending: retail_dash_core::Endpoint::ALL
                .into_iter()
                .filter(|e| dashboard.is_pending(*e))
                .map(retail_dash_core::Endpoint::path)
                .collect(),
        }
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let mut line = |text: String| {
            out.push_str(&text);
            out.push('\n');
        };

        line(format!("\n{}", self.title));
        line("=".repeat(self.title.chars().count()));
        line(format!(
            "Region: {} | Year: {}",
            self.query.region,
            self.query.year.as_deref().unwrap_or("all")
        ));

        if let Some(kpi) = &self.widgets.kpi {
            line(format!("Total revenue: {}", kpi.total_revenue));
            line(format!("Total profit: {}", kpi.total_profit));
            line(format!("Regions: {}", kpi.regions_count));
            line(format!("Units sold: {}", kpi.units_sold));
        }

        if let Some(chart) = self.widgets.category.get() {
            line("\nRevenue by Category:".to_string());
            for slice in &chart.slices {
                line(format!("- {}", slice.tooltip()));
            }
        }

        if let Some(chart) = self.widgets.region.get() {
            line("\nRevenue by Region:".to_string());
            for bar in &chart.bars {
                line(format!("- {}", bar.tooltip()));
            }
        }

        if let Some(map) = self.widgets.map.instance() {
            line(format!("\nStates on map: {}", map.markers().count()));
        }

        for (heading, list) in [
            ("Top Growing Categories", &self.widgets.growing_categories),
            ("Outperforming Regions", &self.widgets.outperforming_regions),
        ] {
            line(format!("\n{heading}:"));
            for row in list.rows() {
                line(format!("- {} | {}", row.label, row.value));
            }
        }

        if !self.failed.is_empty() {
            line(format!("\nFailed: {}", self.failed.join(", ")));
        }
        if !self.pending.is_empty() {
            line(format!("No answer: {}", self.pending.join(", ")));
        }

        out
    }
}
