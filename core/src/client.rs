//! Request dispatch for the Linode API.
//!
//! # Design
//! `LinodeClient` holds only its transport and carries no mutable state
//! between calls. Each call is split into a `build_*` step that produces an
//! `HttpRequest`, one `Transport::post_form`, and a `parse_*` step that
//! consumes the `HttpResponse`. The build and parse steps are plain functions
//! so they can be checked without any transport at all.
//!
//! Single calls surface remote errors as the call's own failure. Batch calls
//! succeed as a whole and hand back per-element errors.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::envelope;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::request::{Request, API_ACTION, API_KEY, BATCH_ACTION, REQUEST_ARRAY};
use crate::transport::{Transport, UreqTransport};
use crate::types::BatchResponse;

/// Synchronous client for the Linode API.
///
/// Every call performs exactly one round trip through the transport and
/// never retries.
#[derive(Debug, Clone)]
pub struct LinodeClient<T = UreqTransport> {
    transport: T,
}

impl LinodeClient<UreqTransport> {
    pub fn new(endpoint: &str) -> Self {
        Self::with_transport(UreqTransport::new(endpoint))
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::with_transport(UreqTransport::from_config(config))
    }
}

impl Default for LinodeClient<UreqTransport> {
    fn default() -> Self {
        Self::from_config(&ClientConfig::default())
    }
}

impl<T: Transport> LinodeClient<T> {
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Run one request and return its data payload.
    ///
    /// Fails with `ApiError::Linode` or `ApiError::LinodeMany` when the API
    /// reports errors; any data sent alongside them is discarded.
    pub fn perform(&self, request: &Request) -> Result<Value, ApiError> {
        tracing::debug!(
            action = request.action(),
            endpoint = self.transport.endpoint(),
            "performing request"
        );
        let response = self.transport.post_form(&build_request(request))?;
        let result = parse_response(response);
        if let Err(err) = &result {
            if !err.remote_errors().is_empty() {
                tracing::warn!(action = request.action(), error = %err, "api reported errors");
            }
        }
        result
    }

    /// Run one request and deserialize its data payload into `D`.
    pub fn perform_as<D: DeserializeOwned>(&self, request: &Request) -> Result<D, ApiError> {
        let data = self.perform(request)?;
        serde_json::from_value(data).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Send `requests` in one exchange.
    ///
    /// The result has one element per request, in the same order. An empty
    /// slice returns immediately without contacting the endpoint.
    pub fn batch(&self, requests: &[Request]) -> Result<Vec<BatchResponse>, ApiError> {
        if requests.is_empty() {
            return Ok(Vec::new());
        }
        let http_request = build_batch(requests)?;
        tracing::debug!(
            count = requests.len(),
            endpoint = self.transport.endpoint(),
            "performing batch"
        );
        let response = self.transport.post_form(&http_request)?;
        let results = parse_batch(response, requests.len())?;

        let failed = results.iter().filter(|r| !r.is_ok()).count();
        if failed > 0 {
            tracing::warn!(failed, count = results.len(), "batch elements reported errors");
        }
        Ok(results)
    }
}

/// Form parameters for one request.
pub fn build_request(request: &Request) -> HttpRequest {
    HttpRequest::from_pairs(request.form_pairs())
}

/// Form parameters for a batch.
///
/// Every request must carry the first request's `api_key`. The outer request
/// repeats that key, and `api_requestArray` holds each request's full
/// parameter map, reserved keys included.
pub fn build_batch(requests: &[Request]) -> Result<HttpRequest, ApiError> {
    let Some(first) = requests.first() else {
        return Err(ApiError::Validation("a batch needs at least one request".into()));
    };
    let api_key = first.api_key();
    if requests.iter().any(|r| r.api_key() != api_key) {
        return Err(ApiError::Validation(
            "all requests in a batch must have the same api_key".into(),
        ));
    }

    let array = serde_json::to_string(requests)
        .map_err(|e| ApiError::Serialization(e.to_string()))?;
    Ok(HttpRequest::from_pairs([
        (API_ACTION, BATCH_ACTION),
        (API_KEY, api_key),
        (REQUEST_ARRAY, array.as_str()),
    ]))
}

/// Classify a single-call reply.
pub fn parse_response(response: HttpResponse) -> Result<Value, ApiError> {
    check_status(&response)?;
    envelope::decode_single(&response.body)?.into_result()
}

/// Split a batch reply into per-request results.
pub fn parse_batch(response: HttpResponse, expected: usize) -> Result<Vec<BatchResponse>, ApiError> {
    check_status(&response)?;
    let envelopes = envelope::decode_batch(&response.body, expected)?;
    Ok(envelopes.into_iter().map(BatchResponse::from).collect())
}

/// Map a non-2xx status to `ApiError::HttpStatus`.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::HttpStatus {
        status: response.status,
        body: String::from_utf8_lossy(&response.body).into_owned(),
    })
}
