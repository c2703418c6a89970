use super::{FetchError, MetricsSource};
use retail_dash_core::{Endpoint, MetricsQuery, Payload};
use std::time::Duration;
use tracing::debug;

/// Fetches payloads over HTTP from the dashboard API.
#[derive(Debug, Clone)]
pub struct HttpMetricsSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpMetricsSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl MetricsSource for HttpMetricsSource {
    async fn fetch(&self, endpoint: Endpoint, query: &MetricsQuery) -> Result<Payload, FetchError> {
        if let Some(year) = query.unforwarded_year() {
            debug!(%endpoint, year, "year filter is not supported by the API, not sent");
        }

        let url = MetricsQuery::url_for(&self.base_url, endpoint);
        let response = self
            .client
            .get(&url)
            .query(&query.query_pairs())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        Ok(Payload::from_slice(endpoint, &body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_drops_trailing_slashes() {
        let source =
            HttpMetricsSource::new("http://127.0.0.1:5000//", Duration::from_secs(1)).unwrap();
        assert_eq!(source.base_url(), "http://127.0.0.1:5000");
        assert_eq!(
            MetricsQuery::url_for(source.base_url(), Endpoint::StateGrowth),
            "http://127.0.0.1:5000/api/state_growth_data"
        );
    }
}
