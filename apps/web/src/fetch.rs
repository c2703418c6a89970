use retail_dash_core::{Endpoint, MetricsQuery, Payload, PayloadError};
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Network(String),
    #[error("server answered HTTP {0}")]
    Status(u16),
    #[error(transparent)]
    Decode(#[from] PayloadError),
}

fn network(error: JsValue) -> FetchError {
    FetchError::Network(
        error
            .as_string()
            .unwrap_or_else(|| format!("{error:?}")),
    )
}

/// Same-origin URL for `endpoint`; the year is never part of it.
pub fn request_url(endpoint: Endpoint, query: &MetricsQuery) -> String {
    let params = query
        .query_pairs()
        .into_iter()
        .map(|(key, value)| format!("{key}={}", String::from(js_sys::encode_uri_component(&value))))
        .collect::<Vec<_>>()
        .join("&");
    format!("{}?{params}", MetricsQuery::url_for("", endpoint))
}

pub async fn fetch_payload(
    endpoint: Endpoint,
    query: &MetricsQuery,
) -> Result<Payload, FetchError> {
    let window = web_sys::window().ok_or_else(|| FetchError::Network("no window".into()))?;

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::SameOrigin);

    let request = Request::new_with_str_and_init(&request_url(endpoint, query), &opts)
        .map_err(network)?;
    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(network)?
        .dyn_into()
        .map_err(network)?;

    if !response.ok() {
        return Err(FetchError::Status(response.status()));
    }

    let body = JsFuture::from(response.text().map_err(network)?)
        .await
        .map_err(network)?
        .as_string()
        .unwrap_or_default();

    Ok(Payload::from_json(endpoint, &body)?)
}
