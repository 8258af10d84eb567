//! HTTP request and response types, plus query-string encoding.
//!
//! # Design
//! `PreparedRequest` and `RawResponse` describe a request and its result as
//! plain data with owned fields. `RawClient::build_request` produces a
//! `PreparedRequest` without touching the network, so request construction
//! (URL assembly, query encoding, body placement) is testable without a
//! server; dispatch happens in a separate step.

use std::fmt;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::Error;

/// Everything outside the RFC 3986 unreserved set is percent-encoded, so a
/// space becomes `%20` rather than the form-style `+`.
const QUERY_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// HTTP verb supported by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
}

impl Verb {
    /// Parse a verb string, case-insensitively. Anything outside the four
    /// supported verbs is rejected here, before any network activity.
    pub fn parse(s: &str) -> Result<Self, Error> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Verb::Get),
            "POST" => Ok(Verb::Post),
            "PUT" => Ok(Verb::Put),
            "DELETE" => Ok(Verb::Delete),
            _ => Err(Error::UnsupportedVerb(s.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// Built by `RawClient::build_request`. For GET the parameters are already
/// folded into `url`; for POST/PUT/DELETE they live in `body` as a
/// form-encoded string.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub verb: Verb,
    pub url: String,
    pub body: Option<String>,
    pub headers: Vec<(String, String)>,
}

/// The raw result of a dispatched request: the body as received and the
/// HTTP status code. HTTP error statuses land here as data, not as `Err`.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub content: String,
    pub status: u16,
}

/// Encode parameters as a `key=value&key=value` query string, in the order
/// given.
pub fn encode_query(params: &[(&str, &str)]) -> String {
    let mut out = String::new();
    for (key, value) in params {
        if !out.is_empty() {
            out.push('&');
        }
        out.extend(utf8_percent_encode(key, QUERY_ESCAPE));
        out.push('=');
        out.extend(utf8_percent_encode(value, QUERY_ESCAPE));
    }
    out
}
