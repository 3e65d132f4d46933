//! Stateless request builder and response classifier for the collection API.
//!
//! # Design
//! `CollectorClient` holds only a `base_url`. `build_fetch` produces the GET
//! for one resource and `parse_collection` turns the matching response into a
//! typed list. Any non-2xx status is an error, even when the body happens to
//! be parseable.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::Resource;

#[derive(Debug, Clone)]
pub struct CollectorClient {
    base_url: String,
}

impl CollectorClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_fetch(&self, resource: Resource) -> HttpRequest {
        HttpRequest {
            url: format!("{}/{}", self.base_url, resource.path()),
            headers: Vec::new(),
        }
    }

    /// Classify `response` and decode it as a list of `T`.
    ///
    /// Status is checked first, then JSON syntax, then shape, so each failure
    /// lands in its own `ApiError` variant.
    pub fn parse_collection<T: DeserializeOwned>(
        &self,
        resource: Resource,
        response: HttpResponse,
    ) -> Result<Vec<T>, ApiError> {
        check_status(resource, &response)?;
        let value: Value = serde_json::from_slice(&response.body)
            .map_err(|source| ApiError::MalformedBody { resource, source })?;
        serde_json::from_value(value).map_err(|source| ApiError::UnexpectedShape { resource, source })
    }
}

fn check_status(resource: Resource, response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::HttpStatus {
        resource,
        status: response.status,
        body: response.body_text(),
    })
}
