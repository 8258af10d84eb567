//! Error types for the webservice client.
//!
//! # Design
//! `UnsupportedVerb` is raised before any network activity, so callers can
//! distinguish "you asked for something the client cannot do" from "the
//! request was attempted and failed." Transport-level failures carry the
//! underlying error message verbatim. HTTP error statuses are *not* errors
//! at this layer; they come back as normal responses with the status code
//! attached, left for the caller to inspect.

use std::fmt;

/// Errors returned by `RawClient` and `JsonClient` verb methods.
#[derive(Debug)]
pub enum Error {
    /// The verb is not one of GET, POST, PUT, DELETE. No request was made.
    UnsupportedVerb(String),

    /// The request failed at the network layer (DNS, connect, TLS,
    /// timeout). Carries the transport's own error message; never retried.
    Transport(String),

    /// The request completed but the response body was empty, so there is
    /// nothing to decode.
    EmptyResponse,

    /// The response body is not valid JSON, or decoded to a top-level null.
    InvalidJson(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnsupportedVerb(verb) => {
                write!(f, "unsupported HTTP verb: {verb}")
            }
            Error::Transport(msg) => write!(f, "transport failure: {msg}"),
            Error::EmptyResponse => {
                write!(f, "request completed but the response body was empty")
            }
            Error::InvalidJson(msg) => {
                write!(f, "response body is not valid JSON: {msg}")
            }
        }
    }
}

impl std::error::Error for Error {}
