use crate::region::RegionSelector;
use serde::Serialize;
use std::fmt;

/// The backend endpoints the dashboard reads, one per widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    Kpi,
    RevenueOverTime,
    RevenueByCategory,
    RevenueByRegion,
    StateGrowth,
    GrowthByCategory,
    OutperformingRegions,
}

impl Endpoint {
    pub const ALL: [Self; 7] = [
        Self::Kpi,
        Self::RevenueOverTime,
        Self::RevenueByCategory,
        Self::RevenueByRegion,
        Self::StateGrowth,
        Self::GrowthByCategory,
        Self::OutperformingRegions,
    ];

    pub const fn path(self) -> &'static str {
        match self {
            Self::Kpi => "/api/kpi_data",
            Self::RevenueOverTime => "/api/revenue_over_time",
            Self::RevenueByCategory => "/api/revenue_by_category",
            Self::RevenueByRegion => "/api/revenue_by_region",
            Self::StateGrowth => "/api/state_growth_data",
            Self::GrowthByCategory => "/api/growth_by_category",
            Self::OutperformingRegions => "/api/outperforming_regions",
        }
    }

    /// Widget name used in diagnostics.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Kpi => "KPI cards",
            Self::RevenueOverTime => "revenue chart",
            Self::RevenueByCategory => "category chart",
            Self::RevenueByRegion => "region chart",
            Self::StateGrowth => "geo map",
            Self::GrowthByCategory => "growing categories",
            Self::OutperformingRegions => "outperforming regions",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Parameters shared by every request of one refresh cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetricsQuery {
    pub region: RegionSelector,
    /// Selected year. The API has no year parameter, so this is carried for
    /// display and diagnostics only and never sent.
    pub year: Option<String>,
}

impl MetricsQuery {
    pub const fn new(region: RegionSelector, year: Option<String>) -> Self {
        Self { region, year }
    }

    /// Query string pairs, unencoded.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![("region", self.region.as_query_value().to_string())]
    }

    /// The year the user picked that the request cannot honour.
    pub fn unforwarded_year(&self) -> Option<&str> {
        self.year.as_deref()
    }

    /// Joins `base` and the endpoint path without doubling slashes.
    pub fn url_for(base: &str, endpoint: Endpoint) -> String {
        format!("{}{}", base.trim_end_matches('/'), endpoint.path())
    }
}
