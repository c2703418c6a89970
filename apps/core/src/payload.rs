//! Response bodies of the metrics API.
//!
//! Every list-shaped payload is a set of parallel arrays where index `i`
//! across the arrays describes one record. Lengths are not validated: the
//! record iterators zip the arrays, so a short array simply yields fewer
//! records. Missing fields fall back to their defaults.

use crate::endpoint::Endpoint;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("malformed {endpoint} body: {source}")]
    Malformed {
        endpoint: Endpoint,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct KpiPayload {
    pub total_revenue: f64,
    pub total_profit: f64,
    pub regions_count: u64,
    pub total_units: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeSeriesPayload {
    pub dates: Vec<String>,
    pub revenue: Vec<f64>,
    pub profit: Vec<f64>,
}

impl TimeSeriesPayload {
    /// `(date, revenue, profit)` in payload order.
    pub fn points(&self) -> impl Iterator<Item = (&str, f64, f64)> + '_ {
        self.dates
            .iter()
            .zip(&self.revenue)
            .zip(&self.profit)
            .map(|((date, revenue), profit)| (date.as_str(), *revenue, *profit))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CategoryBreakdown {
    pub categories: Vec<String>,
    pub revenue: Vec<f64>,
}

impl CategoryBreakdown {
    pub fn records(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.categories
            .iter()
            .zip(&self.revenue)
            .map(|(category, revenue)| (category.as_str(), *revenue))
    }
}

/// Revenue per region. The same shape is returned by the outperforming
/// regions endpoint.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RegionBreakdown {
    pub regions: Vec<String>,
    pub revenue: Vec<f64>,
}

impl RegionBreakdown {
    pub fn records(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.regions
            .iter()
            .zip(&self.revenue)
            .map(|(region, revenue)| (region.as_str(), *revenue))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CategoryGrowth {
    pub categories: Vec<String>,
    pub growth: Vec<f64>,
}

impl CategoryGrowth {
    pub fn records(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.categories
            .iter()
            .zip(&self.growth)
            .map(|(category, growth)| (category.as_str(), *growth))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RegionGrowth {
    pub states: Vec<String>,
    pub revenue: Vec<f64>,
    pub growth: Vec<f64>,
}

/// State revenue and quarter-over-quarter growth, keyed by region.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct GeoGrowth(pub BTreeMap<String, RegionGrowth>);

/// One state row of a [`GeoGrowth`] payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateRecord<'a> {
    pub region: &'a str,
    pub state: &'a str,
    pub revenue: f64,
    pub growth: f64,
}

impl GeoGrowth {
    pub fn records(&self) -> impl Iterator<Item = StateRecord<'_>> + '_ {
        self.0.iter().flat_map(|(region, data)| {
            data.states
                .iter()
                .zip(&data.revenue)
                .zip(&data.growth)
                .map(move |((state, revenue), growth)| StateRecord {
                    region,
                    state,
                    revenue: *revenue,
                    growth: *growth,
                })
        })
    }

    /// Largest state revenue across every region, or 0 for an empty payload.
    pub fn max_revenue(&self) -> f64 {
        self.0
            .values()
            .flat_map(|data| data.revenue.iter().copied())
            .fold(0.0, f64::max)
    }
}

/// A decoded response, tagged by the endpoint it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "endpoint", content = "data", rename_all = "snake_case")]
pub enum Payload {
    Kpi(KpiPayload),
    RevenueOverTime(TimeSeriesPayload),
    RevenueByCategory(CategoryBreakdown),
    RevenueByRegion(RegionBreakdown),
    StateGrowth(GeoGrowth),
    GrowthByCategory(CategoryGrowth),
    OutperformingRegions(RegionBreakdown),
}

impl Payload {
    pub fn from_json(endpoint: Endpoint, body: &str) -> Result<Self, PayloadError> {
        Self::from_slice(endpoint, body.as_bytes())
    }

    pub fn from_slice(endpoint: Endpoint, body: &[u8]) -> Result<Self, PayloadError> {
        let malformed = |source| PayloadError::Malformed { endpoint, source };
        let payload = match endpoint {
            Endpoint::Kpi => Self::Kpi(serde_json::from_slice(body).map_err(malformed)?),
            Endpoint::RevenueOverTime => {
                Self::RevenueOverTime(serde_json::from_slice(body).map_err(malformed)?)
            }
            Endpoint::RevenueByCategory => {
                Self::RevenueByCategory(serde_json::from_slice(body).map_err(malformed)?)
            }
            Endpoint::RevenueByRegion => {
                Self::RevenueByRegion(serde_json::from_slice(body).map_err(malformed)?)
            }
            Endpoint::StateGrowth => {
                Self::StateGrowth(serde_json::from_slice(body).map_err(malformed)?)
            }
            Endpoint::GrowthByCategory => {
                Self::GrowthByCategory(serde_json::from_slice(body).map_err(malformed)?)
            }
            Endpoint::OutperformingRegions => {
                Self::OutperformingRegions(serde_json::from_slice(body).map_err(malformed)?)
            }
        };
        Ok(payload)
    }

    pub const fn endpoint(&self) -> Endpoint {
        match self {
            Self::Kpi(_) => Endpoint::Kpi,
            Self::RevenueOverTime(_) => Endpoint::RevenueOverTime,
            Self::RevenueByCategory(_) => Endpoint::RevenueByCategory,
            Self::RevenueByRegion(_) => Endpoint::RevenueByRegion,
            Self::StateGrowth(_) => Endpoint::StateGrowth,
            Self::GrowthByCategory(_) => Endpoint::GrowthByCategory,
            Self::OutperformingRegions(_) => Endpoint::OutperformingRegions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_geo_growth_keyed_by_region() {
        let body = r#"{
            "West": {"states": ["California", "Oregon"], "revenue": [900.0, 100.0], "growth": [12.5, -3.0]},
            "South": {"states": ["Texas"], "revenue": [400.0], "growth": [20.0]}
        }"#;
        let Payload::StateGrowth(geo) = Payload::from_json(Endpoint::StateGrowth, body).unwrap()
        else {
            panic!("wrong payload variant");
        };

        let records: Vec<_> = geo.records().collect();
        assert_eq!(records.len(), 3);
        assert!((geo.max_revenue() - 900.0).abs() < f64::EPSILON);
        assert!(records
            .iter()
            .any(|r| r.region == "South" && r.state == "Texas"));
    }

    #[test]
    fn mismatched_arrays_yield_fewer_records() {
        let body = r#"{"categories": ["Juice", "Soda", "Water"], "revenue": [10.0, 20.0]}"#;
        let Payload::RevenueByCategory(data) =
            Payload::from_json(Endpoint::RevenueByCategory, body).unwrap()
        else {
            panic!("wrong payload variant");
        };
        assert_eq!(data.records().count(), 2);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let payload = Payload::from_json(Endpoint::Kpi, r#"{"total_revenue": 5.5}"#).unwrap();
        assert_eq!(
            payload,
            Payload::Kpi(KpiPayload {
                total_revenue: 5.5,
                ..KpiPayload::default()
            })
        );
    }

    #[test]
    fn non_json_body_is_an_error() {
        let err = Payload::from_json(Endpoint::RevenueByRegion, "<html>502</html>").unwrap_err();
        assert!(err.to_string().contains("/api/revenue_by_region"));
    }
}
