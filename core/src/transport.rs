//! Executing `HttpRequest`s against the network.
//!
//! `Transport` is the only I/O seam in the gather path. `UreqTransport` is
//! the blocking implementation used by the binary; tests substitute their own.

use std::time::Duration;

use tracing::{debug, info};

use crate::config::CollectorConfig;
use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse};

const USER_AGENT: &str = concat!("data-collector/", env!("CARGO_PKG_VERSION"));

pub trait Transport {
    /// Perform one round-trip. Any status code, including 4xx/5xx, is a
    /// successful round-trip; only failures below HTTP are errors.
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

/// Blocking transport backed by a `ureq::Agent`.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
    max_body_bytes: u64,
}

impl UreqTransport {
    /// A body longer than `max_body_bytes` fails the round-trip.
    pub fn new(timeout: Option<Duration>, max_body_bytes: u64) -> Self {
        // Status codes are handed back as data so the client can classify them.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .user_agent(USER_AGENT)
            .build()
            .new_agent();
        Self {
            agent,
            max_body_bytes,
        }
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut call = self.agent.get(request.url.as_str());
        for (name, value) in &request.headers {
            call = call.header(name.as_str(), value.as_str());
        }

        let mut response = call
            .call()
            .map_err(|err| TransportError::new(&request.url, err))?;

        let status = response.status().as_u16();
        // Raw bytes: text decoding is classified by the client, not here.
        let body = response
            .body_mut()
            .with_config()
            .limit(self.max_body_bytes)
            .read_to_vec()
            .map_err(|err| TransportError::new(&request.url, err))?;

        debug!(url = %request.url, status, bytes = body.len(), "response received");
        Ok(HttpResponse { status, body })
    }
}

/// Ready the HTTP client for a run.
///
/// The client library is a build-time dependency, so preparation is only
/// agent construction and cannot fail.
pub fn prepare_transport(config: &CollectorConfig) -> UreqTransport {
    match config.timeout {
        Some(timeout) => info!("Preparing HTTP client (timeout {}s)", timeout.as_secs_f64()),
        None => info!("Preparing HTTP client"),
    }
    UreqTransport::new(config.timeout, config.max_body_bytes)
}
