//! The dashboard controller: filter state, refresh generations and the
//! widget registry every response is rendered into.

use crate::charts::{CategoryChart, RegionChart, RevenueChart};
use crate::endpoint::{Endpoint, MetricsQuery};
use crate::filter::{RegionFilter, Title, YearFilter};
use crate::generation::{Generation, GenerationCounter};
use crate::payload::Payload;
use crate::region::RegionSelector;
use crate::widgets::{
    growing_category_rows, outperforming_region_rows, KpiCards, WidgetRegistry,
};
use std::collections::BTreeSet;
use std::fmt;
use std::time::Duration;

/// Delay before the map recomputes its layout after a filter change.
pub const MAP_RELAYOUT_DELAY: Duration = Duration::from_millis(100);
/// Delay before the map recomputes its layout when the view regains focus.
pub const FOCUS_RELAYOUT_DELAY: Duration = Duration::from_millis(200);

/// One refresh cycle to execute: fetch every endpoint with `query`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshRequest {
    pub generation: Generation,
    pub query: MetricsQuery,
    pub endpoints: [Endpoint; 7],
}

/// Result of a filter change: a refresh plus a deferred map relayout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterChange {
    pub refresh: RefreshRequest,
    pub relayout_after: Duration,
}

/// A request that produced no usable payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub endpoint: Endpoint,
    pub message: String,
}

impl FetchFailure {
    pub fn new(endpoint: Endpoint, message: impl fmt::Display) -> Self {
        Self {
            endpoint,
            message: message.to_string(),
        }
    }
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "error updating {} ({}): {}",
            self.endpoint.label(),
            self.endpoint.path(),
            self.message
        )
    }
}

/// What [`Dashboard::apply`] did with a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    Rendered(Endpoint),
    /// The widget keeps its previous contents.
    Failed(FetchFailure),
    /// The response belongs to an older refresh and was dropped.
    Stale {
        endpoint: Endpoint,
        generation: Generation,
    },
}

#[derive(Debug)]
pub struct Dashboard {
    region_filter: RegionFilter,
    year_filter: YearFilter,
    title: Title,
    generations: GenerationCounter,
    active_query: MetricsQuery,
    pending: BTreeSet<Endpoint>,
    failed: BTreeSet<Endpoint>,
    widgets: WidgetRegistry,
}

impl Dashboard {
    pub fn new<I, S>(years: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            region_filter: RegionFilter::default(),
            year_filter: YearFilter::new(years),
            title: Title::default(),
            generations: GenerationCounter::default(),
            active_query: MetricsQuery::default(),
            pending: BTreeSet::new(),
            failed: BTreeSet::new(),
            widgets: WidgetRegistry::default(),
        }
    }

    /// Starts on `region` instead of all regions.
    #[must_use]
    pub fn with_region(mut self, region: RegionSelector) -> Self {
        self.set_region(region);
        self
    }

    /// Issues a new generation covering every widget.
    pub fn refresh(&mut self) -> RefreshRequest {
        let generation = self.generations.issue();
        self.active_query = self.query();
        self.pending = Endpoint::ALL.into_iter().collect();
        self.failed.clear();

        RefreshRequest {
            generation,
            query: self.active_query.clone(),
            endpoints: Endpoint::ALL,
        }
    }

    /// Region filter change. Returns `None` when `region` is already selected.
    pub fn select_region(&mut self, region: RegionSelector) -> Option<FilterChange> {
        if *self.region_filter.selected() == region {
            return None;
        }
        self.set_region(region);
        Some(self.filter_change())
    }

    /// Year filter change. The year only affects the query record, since the
    /// API cannot filter by it.
    pub fn select_year(&mut self, index: usize) -> Option<FilterChange> {
        if !self.year_filter.select_index(index) {
            return None;
        }
        Some(self.filter_change())
    }

    fn set_region(&mut self, region: RegionSelector) {
        self.title = Title::for_region(&region);
        self.region_filter.select(region);
    }

    fn filter_change(&mut self) -> FilterChange {
        FilterChange {
            refresh: self.refresh(),
            relayout_after: MAP_RELAYOUT_DELAY,
        }
    }

    /// Renders one response into its widget, unless it is stale.
    pub fn apply(
        &mut self,
        generation: Generation,
        result: Result<Payload, FetchFailure>,
    ) -> Applied {
        let endpoint = match &result {
            Ok(payload) => payload.endpoint(),
            Err(failure) => failure.endpoint,
        };
        if !self.generations.is_current(generation) {
            return Applied::Stale {
                endpoint,
                generation,
            };
        }
        self.pending.remove(&endpoint);

        match result {
            Ok(payload) => {
                self.render(payload);
                Applied::Rendered(endpoint)
            }
            Err(failure) => {
                self.failed.insert(endpoint);
                Applied::Failed(failure)
            }
        }
    }

    fn render(&mut self, payload: Payload) {
        let widgets = &mut self.widgets;
        match payload {
            Payload::Kpi(data) => widgets.kpi = Some(KpiCards::build(&data)),
            Payload::RevenueOverTime(data) => {
                widgets.revenue.replace(RevenueChart::build(&data));
            }
            Payload::RevenueByCategory(data) => {
                widgets.category.replace(CategoryChart::build(&data));
            }
            Payload::RevenueByRegion(data) => {
                let selected = self.region_filter.selected().clone();
                widgets.region.replace(RegionChart::build(&data, &selected));
                // A filtered response lists only the selected region, so only
                // the unfiltered list may seed the dropdown.
                if self.active_query.region.is_all() {
                    self.region_filter
                        .populate(data.regions.iter().map(String::as_str));
                }
            }
            Payload::StateGrowth(data) => {
                widgets.map.render(&data);
            }
            Payload::GrowthByCategory(data) => {
                widgets
                    .growing_categories
                    .repopulate(growing_category_rows(&data));
            }
            Payload::OutperformingRegions(data) => {
                widgets
                    .outperforming_regions
                    .repopulate(outperforming_region_rows(&data));
            }
        }
    }

    /// The query the current filter state would issue.
    pub fn query(&self) -> MetricsQuery {
        MetricsQuery::new(
            self.region_filter.selected().clone(),
            self.year_filter.selected_year().map(str::to_string),
        )
    }

    pub const fn active_query(&self) -> &MetricsQuery {
        &self.active_query
    }

    pub const fn latest_generation(&self) -> Generation {
        self.generations.latest()
    }

    pub const fn title(&self) -> &Title {
        &self.title
    }

    pub const fn region_filter(&self) -> &RegionFilter {
        &self.region_filter
    }

    pub const fn year_filter(&self) -> &YearFilter {
        &self.year_filter
    }

    pub const fn selected_region(&self) -> &RegionSelector {
        self.region_filter.selected()
    }

    pub const fn widgets(&self) -> &WidgetRegistry {
        &self.widgets
    }

    pub fn widgets_mut(&mut self) -> &mut WidgetRegistry {
        &mut self.widgets
    }

    pub fn is_pending(&self, endpoint: Endpoint) -> bool {
        self.pending.contains(&endpoint)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub const fn failed(&self) -> &BTreeSet<Endpoint> {
        &self.failed
    }
}
