//! Fetching the four collections into an `AggregateRecord`.
//!
//! Requests run strictly in `Resource::ALL` order. The first failure aborts
//! the gather: nothing fetched so far is returned and no later request is
//! sent.

use chrono::Local;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info};

use crate::client::CollectorClient;
use crate::error::GatherError;
use crate::transport::Transport;
use crate::types::{AggregateRecord, Resource};

/// Local wall-clock time, ISO-8601 without offset, microsecond precision.
pub fn timestamp_now() -> String {
    Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

pub struct Gatherer<T> {
    client: CollectorClient,
    transport: T,
    api_source: String,
}

impl<T: Transport> Gatherer<T> {
    pub fn new(client: CollectorClient, transport: T, api_source: impl Into<String>) -> Self {
        Self {
            client,
            transport,
            api_source: api_source.into(),
        }
    }

    /// Fetch all four collections and stamp them with metadata.
    pub fn gather(&self) -> Result<AggregateRecord, GatherError> {
        info!("Connecting to {}...", self.client.base_url());

        let posts = self.fetch(Resource::Posts)?;
        let users = self.fetch(Resource::Users)?;
        let comments = self.fetch(Resource::Comments)?;
        let todos = self.fetch(Resource::Todos)?;

        let record = AggregateRecord::new(
            posts,
            users,
            comments,
            todos,
            self.api_source.as_str(),
            timestamp_now(),
        );
        info!(
            "Successfully gathered {} data categories",
            AggregateRecord::CATEGORIES
        );
        Ok(record)
    }

    /// `gather`, with the error reported to the operator instead of returned.
    pub fn collect(&self) -> Option<AggregateRecord> {
        match self.gather() {
            Ok(record) => Some(record),
            Err(err) => {
                error!("Error connecting to API: {err}");
                None
            }
        }
    }

    fn fetch<R: DeserializeOwned>(&self, resource: Resource) -> Result<Vec<R>, GatherError> {
        info!("Fetching {resource}...");
        let request = self.client.build_fetch(resource);
        let response = self
            .transport
            .execute(&request)
            .map_err(|source| GatherError::Transport { resource, source })?;
        let items: Vec<R> = self.client.parse_collection(resource, response)?;
        debug!(%resource, count = items.len(), "collection parsed");
        Ok(items)
    }
}
