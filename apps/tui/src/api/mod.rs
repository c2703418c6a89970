//! Fetching metrics from the dashboard API.

mod fetcher;
mod http;

pub use fetcher::{spawn_refresh, FetchOutcome};
pub use http::HttpMetricsSource;

use retail_dash_core::{Endpoint, MetricsQuery, Payload, PayloadError};
use std::future::Future;
use thiserror::Error;

/// Why one widget could not be updated. The variants only shape the
/// diagnostic; every failure is handled the same way.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("server answered HTTP {status}")]
    Status { status: u16 },
    #[error(transparent)]
    Decode(#[from] PayloadError),
}

/// A source of dashboard payloads.
pub trait MetricsSource: Send + Sync + 'static {
    fn fetch(
        &self,
        endpoint: Endpoint,
        query: &MetricsQuery,
    ) -> impl Future<Output = Result<Payload, FetchError>> + Send;
}
