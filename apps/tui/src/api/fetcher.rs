use super::MetricsSource;
use retail_dash_core::{Endpoint, FetchFailure, Generation, Payload, RefreshRequest};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::{debug, error};

/// The result of one endpoint's fetch, stamped with the refresh it belongs to.
#[derive(Debug)]
pub struct FetchOutcome {
    pub generation: Generation,
    pub endpoint: Endpoint,
    pub result: Result<Payload, FetchFailure>,
}

/// Starts one task per endpoint. Each outcome is sent as soon as it is ready,
/// so a slow endpoint never holds up the others.
pub fn spawn_refresh<S, T>(
    source: &Arc<S>,
    request: &RefreshRequest,
    tx: &UnboundedSender<T>,
) -> Vec<JoinHandle<()>>
where
    S: MetricsSource,
    T: From<FetchOutcome> + Send + 'static,
{
    debug!(
        generation = %request.generation,
        region = %request.query.region,
        "starting refresh"
    );

    request
        .endpoints
        .iter()
        .map(|&endpoint| {
            let source = Arc::clone(source);
            let query = request.query.clone();
            let generation = request.generation;
            let tx = tx.clone();

            tokio::spawn(async move {
                let result = source.fetch(endpoint, &query).await.map_err(|e| {
                    let failure = FetchFailure::new(endpoint, e);
                    error!("{failure}");
                    failure
                });
                let outcome = FetchOutcome {
                    generation,
                    endpoint,
                    result,
                };
                if tx.send(T::from(outcome)).is_err() {
                    debug!(%endpoint, "receiver dropped before fetch completed");
                }
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::FetchError;
    use retail_dash_core::payload::KpiPayload;
    use retail_dash_core::{Dashboard, MetricsQuery};
    use std::sync::Mutex;
    use tokio::sync::mpsc;

    #[derive(Default)]
    struct Recording {
        queries: Mutex<Vec<(Endpoint, MetricsQuery)>>,
    }

    impl MetricsSource for Recording {
        async fn fetch(
            &self,
            endpoint: Endpoint,
            query: &MetricsQuery,
        ) -> Result<Payload, FetchError> {
            self.queries
                .lock()
                .unwrap()
                .push((endpoint, query.clone()));
            match endpoint {
                Endpoint::Kpi => Ok(Payload::Kpi(KpiPayload::default())),
                _ => Err(FetchError::Status { status: 503 }),
            }
        }
    }

    #[tokio::test]
    async fn every_endpoint_reports_exactly_once() {
        let source = Arc::new(Recording::default());
        let mut dashboard = Dashboard::new(["2024"]);
        let request = dashboard.refresh();
        let (tx, mut rx) = mpsc::unbounded_channel::<FetchOutcome>();

        for handle in spawn_refresh(&source, &request, &tx) {
            handle.await.unwrap();
        }
        drop(tx);

        let mut seen = Vec::new();
        while let Some(outcome) = rx.recv().await {
            assert_eq!(outcome.generation, request.generation);
            assert_eq!(outcome.result.is_ok(), outcome.endpoint == Endpoint::Kpi);
            seen.push(outcome.endpoint);
        }
        seen.sort();
        assert_eq!(seen, Endpoint::ALL.to_vec());

        let queries = source.queries.lock().unwrap();
        assert!(queries.iter().all(|(_, query)| *query == request.query));
    }

    #[tokio::test]
    async fn failures_carry_a_diagnostic() {
        let source = Arc::new(Recording::default());
        let mut dashboard = Dashboard::new(Vec::<String>::new());
        let request = dashboard.refresh();
        let (tx, mut rx) = mpsc::unbounded_channel::<FetchOutcome>();
        for handle in spawn_refresh(&source, &request, &tx) {
            handle.await.unwrap();
        }

        let failure = std::iter::from_fn(|| rx.try_recv().ok())
            .find_map(|outcome| outcome.result.err())
            .unwrap();
        assert!(failure.message.contains("503"));
    }
}
