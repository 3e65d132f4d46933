//! Error types for the collection pipeline.
//!
//! # Design
//! Errors are split by layer. `ApiError` covers a response that arrived but
//! cannot be used, `TransportError` covers a request that never produced a
//! response, and `GatherError` tags either with the resource being fetched.
//! `PersistError` covers writing the output files.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::Resource;

/// Errors returned by `CollectorClient::parse_collection`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("{resource}: HTTP {status}: {body}")]
    HttpStatus {
        resource: Resource,
        status: u16,
        body: String,
    },

    /// The response body is not JSON at all.
    #[error("{resource}: response body is not valid JSON: {source}")]
    MalformedBody {
        resource: Resource,
        #[source]
        source: serde_json::Error,
    },

    /// The body is JSON but not a list of the expected item shape.
    #[error("{resource}: unexpected response shape: {source}")]
    UnexpectedShape {
        resource: Resource,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    pub fn resource(&self) -> Resource {
        match self {
            ApiError::HttpStatus { resource, .. }
            | ApiError::MalformedBody { resource, .. }
            | ApiError::UnexpectedShape { resource, .. } => *resource,
        }
    }
}

/// A request that failed below HTTP: connection refused, DNS failure,
/// timeout, or a body that could not be read.
#[derive(Debug, Error)]
#[error("GET {url} failed: {source}")]
pub struct TransportError {
    pub url: String,
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync>,
}

impl TransportError {
    pub fn new(
        url: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            url: url.into(),
            source: source.into(),
        }
    }
}

/// Errors that abort `Gatherer::gather`.
#[derive(Debug, Error)]
pub enum GatherError {
    #[error("fetching {resource} failed: {source}")]
    Transport {
        resource: Resource,
        #[source]
        source: TransportError,
    },

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl GatherError {
    /// The resource whose fetch aborted the gather.
    pub fn resource(&self) -> Resource {
        match self {
            GatherError::Transport { resource, .. } => *resource,
            GatherError::Api(err) => err.resource(),
        }
    }
}

/// Errors that abort `write_outputs`.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("serializing aggregate record failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("writing {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("reading size of {}: {source}", .path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
