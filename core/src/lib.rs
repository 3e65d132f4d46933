//! Collection pipeline for a JSONPlaceholder-style REST API.
//!
//! # Overview
//! Fetches `posts`, `users`, `comments` and `todos` with four sequential GETs,
//! assembles them into an `AggregateRecord` with count metadata, and writes the
//! record plus a plain-text summary to disk.
//!
//! # Design
//! - `CollectorClient` is stateless: it builds `HttpRequest`s and classifies
//!   `HttpResponse`s without doing I/O.
//! - `Transport` executes requests; `UreqTransport` is the blocking
//!   implementation. Tests plug in scripted transports or a local mock server.
//! - `Gatherer` drives the four fetches and aborts on the first failure.
//! - `persist` / `write_outputs` produce the data and summary files.

pub mod client;
pub mod config;
pub mod error;
pub mod gather;
pub mod http;
pub mod persist;
pub mod transport;
pub mod types;

pub use client::CollectorClient;
pub use config::{CollectorConfig, OutputPaths};
pub use error::{ApiError, GatherError, PersistError, TransportError};
pub use gather::Gatherer;
pub use http::{HttpRequest, HttpResponse};
pub use persist::{persist, write_outputs, PersistReport};
pub use transport::{prepare_transport, Transport, UreqTransport};
pub use types::{AggregateRecord, Comment, Metadata, Post, Resource, Todo, User};
