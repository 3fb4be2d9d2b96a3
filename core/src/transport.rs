//! Network transports.
//!
//! # Design
//! `Transport` is the only seam that performs I/O. A transport is bound to one
//! endpoint when constructed; `post_form` performs exactly one blocking POST
//! and returns the status plus the complete body. Status interpretation is
//! left to the client.
//!
//! `UreqTransport` reads the body to the end inside `post_form`. The response
//! and its reader are owned by that call frame, so the connection is released
//! on every return path, including a failed read. The body is read without
//! ureq's default size cap; batch replies can be large.

use std::fmt;

use ureq::Agent;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};

/// Performs one form POST against a fixed endpoint.
pub trait Transport {
    fn endpoint(&self) -> &str;

    fn post_form(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn endpoint(&self) -> &str {
        (**self).endpoint()
    }

    fn post_form(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).post_form(request)
    }
}

/// Blocking transport backed by a `ureq::Agent`.
#[derive(Clone)]
pub struct UreqTransport {
    endpoint: String,
    agent: Agent,
}

impl UreqTransport {
    pub fn new(endpoint: &str) -> Self {
        Self::from_config(&ClientConfig::new(endpoint))
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        // Non-2xx statuses come back as data; the client classifies them.
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(config.timeout)
            .build()
            .new_agent();
        Self::with_agent(&config.endpoint, agent)
    }

    /// Use a caller-configured agent. The agent should have
    /// `http_status_as_error` disabled so error bodies reach the client.
    pub fn with_agent(endpoint: &str, agent: Agent) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            agent,
        }
    }
}

impl fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqTransport")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl Transport for UreqTransport {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn post_form(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let pairs = request.form.iter().map(|(k, v)| (k.as_str(), v.as_str()));
        let mut response = self
            .agent
            .post(&self.endpoint)
            .send_form(pairs)
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        tracing::debug!(endpoint = %self.endpoint, status, bytes = body.len(), "response received");
        Ok(HttpResponse { status, body })
    }
}
