//! Synchronous webservice client library.
//!
//! # Overview
//! A thin abstraction over plain HTTP: `RawClient` issues blocking
//! GET/POST/PUT/DELETE requests against a configured base URL and returns
//! raw bodies plus status codes; `JsonClient` layers JSON decoding on top.
//! Both implement the `Webservice` trait, the shared four-verb contract.
//!
//! # Design
//! - Request construction (`build_request`) is pure and separate from
//!   dispatch, so URL assembly and body placement are unit-testable.
//! - Non-2xx statuses are data, not errors; the most recent status is
//!   cached on the client and inspectable via `last_status()`.
//! - One transport connection per call, no pooling, no retries; the only
//!   mutable state across calls is the configuration and `last_status`.

pub mod client;
pub mod error;
pub mod http;
pub mod json;

pub use client::{RawClient, Webservice, LIBRARY_USER_AGENT};
pub use error::Error;
pub use http::{PreparedRequest, RawResponse, Verb};
pub use json::JsonClient;
