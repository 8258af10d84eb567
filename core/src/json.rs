//! JSON-decoding client layered on `RawClient`.
//!
//! # Design
//! `JsonClient` owns a `RawClient` and derefs to it, so the configuration
//! API (base URL, user agent, timeout, last status) is shared rather than
//! duplicated. Each verb dispatches through the raw client and then runs
//! the body through `parse_response`; no schema is imposed on the decoded
//! value.
//!
//! A body that decodes to top-level `null` is treated as "no data" and
//! rejected like malformed JSON. Other falsy scalars (`false`, `0`, `""`)
//! decode to their `Value` and are returned to the caller.

use std::ops::{Deref, DerefMut};

use serde_json::Value;

use crate::client::{RawClient, Webservice};
use crate::error::Error;
use crate::http::{RawResponse, Verb};

/// Decode a raw response body as JSON.
pub fn parse_response(response: &RawResponse) -> Result<Value, Error> {
    if response.content.is_empty() {
        return Err(Error::EmptyResponse);
    }
    let value: Value =
        serde_json::from_str(&response.content).map_err(|e| Error::InvalidJson(e.to_string()))?;
    if value.is_null() {
        return Err(Error::InvalidJson("top-level value is null".to_string()));
    }
    Ok(value)
}

/// Synchronous client returning response bodies decoded as JSON.
#[derive(Debug, Clone)]
pub struct JsonClient {
    inner: RawClient,
}

impl JsonClient {
    /// Create a client with the default 5 second connect timeout.
    pub fn new(base_url: &str) -> Self {
        JsonClient {
            inner: RawClient::new(base_url),
        }
    }

    pub fn with_timeout(base_url: &str, timeout: u64) -> Self {
        JsonClient {
            inner: RawClient::with_timeout(base_url, timeout),
        }
    }

    fn call(
        &mut self,
        path: &str,
        params: &[(&str, &str)],
        verb: Verb,
        headers: &[(&str, &str)],
    ) -> Result<Value, Error> {
        let raw = self.inner.request(path, params, verb, headers)?;
        parse_response(&raw)
    }
}

impl Deref for JsonClient {
    type Target = RawClient;

    fn deref(&self) -> &RawClient {
        &self.inner
    }
}

impl DerefMut for JsonClient {
    fn deref_mut(&mut self) -> &mut RawClient {
        &mut self.inner
    }
}

impl Webservice for JsonClient {
    type Output = Value;

    fn get(
        &mut self,
        path: &str,
        params: &[(&str, &str)],
        headers: &[(&str, &str)],
    ) -> Result<Value, Error> {
        self.call(path, params, Verb::Get, headers)
    }

    fn post(
        &mut self,
        path: &str,
        params: &[(&str, &str)],
        headers: &[(&str, &str)],
    ) -> Result<Value, Error> {
        self.call(path, params, Verb::Post, headers)
    }

    fn put(
        &mut self,
        path: &str,
        params: &[(&str, &str)],
        headers: &[(&str, &str)],
    ) -> Result<Value, Error> {
        self.call(path, params, Verb::Put, headers)
    }

    fn delete(
        &mut self,
        path: &str,
        params: &[(&str, &str)],
        headers: &[(&str, &str)],
    ) -> Result<Value, Error> {
        self.call(path, params, Verb::Delete, headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> RawResponse {
        RawResponse {
            content: body.to_string(),
            status,
        }
    }

    #[test]
    fn empty_body_is_rejected_even_on_success_status() {
        let err = parse_response(&response(200, "")).unwrap_err();
        assert!(matches!(err, Error::EmptyResponse));
    }

    #[test]
    fn malformed_body_is_rejected() {
        let err = parse_response(&response(200, "not json")).unwrap_err();
        assert!(matches!(err, Error::InvalidJson(_)));
    }

    #[test]
    fn object_body_decodes_to_a_mapping() {
        let value = parse_response(&response(200, r#"{"ok":true}"#)).unwrap();
        assert_eq!(value["ok"], Value::Bool(true));
    }

    #[test]
    fn array_body_decodes_as_is() {
        let value = parse_response(&response(200, "[1,2,3]")).unwrap();
        assert_eq!(value, serde_json::json!([1, 2, 3]));
    }

    #[test]
    fn null_body_is_rejected() {
        let err = parse_response(&response(200, "null")).unwrap_err();
        assert!(matches!(err, Error::InvalidJson(_)));
    }

    #[test]
    fn falsy_scalars_are_valid_values() {
        assert_eq!(parse_response(&response(200, "false")).unwrap(), Value::Bool(false));
        assert_eq!(parse_response(&response(200, "0")).unwrap(), serde_json::json!(0));
        assert_eq!(
            parse_response(&response(200, r#""""#)).unwrap(),
            Value::String(String::new())
        );
    }

    #[test]
    fn body_is_parsed_regardless_of_http_status() {
        let value = parse_response(&response(404, r#"{"error":"missing"}"#)).unwrap();
        assert_eq!(value["error"], "missing");
    }

    #[test]
    fn json_client_exposes_raw_configuration() {
        let mut c = JsonClient::new(" http://a.com/ ");
        assert_eq!(c.base_url(), "http://a.com");
        assert_eq!(c.timeout(), 5);
        c.set_user_agent("suffix");
        assert_eq!(c.user_agent(), "suffix");
        assert_eq!(c.last_status(), None);
    }
}
