//! Raw webservice client: configuration plus blocking HTTP execution.
//!
//! # Design
//! `RawClient` owns the static configuration (base URL, user-agent suffix,
//! connect timeout) and the last observed HTTP status. Each verb call is
//! split into `build_request`, which assembles a `PreparedRequest` without
//! any I/O, and `dispatch`, which executes it synchronously over a ureq
//! agent scoped to that single call. Keeping construction pure makes URL
//! assembly and body placement testable without a server.

use std::time::Duration;

use tracing::debug;

use crate::error::Error;
use crate::http::{encode_query, PreparedRequest, RawResponse, Verb};

/// Fixed library identifier sent in every `User-Agent` header; the
/// configured suffix is appended after `"; "`.
pub const LIBRARY_USER_AGENT: &str = concat!(
    "webservice-core v",
    env!("CARGO_PKG_VERSION"),
    " <https://crates.io/crates/webservice-core>"
);

const DEFAULT_TIMEOUT_SECS: u64 = 5;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// The four-verb capability set shared by every client variant.
///
/// `RawClient` implements it returning raw bodies; `JsonClient` implements
/// it returning decoded JSON. Parameters and headers are `(key, value)`
/// slices; an empty slice means "none".
pub trait Webservice {
    type Output;

    fn get(
        &mut self,
        path: &str,
        params: &[(&str, &str)],
        headers: &[(&str, &str)],
    ) -> Result<Self::Output, Error>;

    fn post(
        &mut self,
        path: &str,
        params: &[(&str, &str)],
        headers: &[(&str, &str)],
    ) -> Result<Self::Output, Error>;

    fn put(
        &mut self,
        path: &str,
        params: &[(&str, &str)],
        headers: &[(&str, &str)],
    ) -> Result<Self::Output, Error>;

    fn delete(
        &mut self,
        path: &str,
        params: &[(&str, &str)],
        headers: &[(&str, &str)],
    ) -> Result<Self::Output, Error>;
}

/// Synchronous client returning raw response bodies.
///
/// Each call blocks until the response arrives or the connect timeout
/// fires. The transport connection is acquired and released within the
/// call, so nothing is shared between requests besides this configuration.
/// Verb methods take `&mut self` because the last observed status is
/// overwritten on every completed request.
#[derive(Debug, Clone)]
pub struct RawClient {
    base_url: String,
    user_agent: String,
    timeout: u64,
    last_status: Option<u16>,
}

impl RawClient {
    /// Create a client with the default 5 second connect timeout.
    pub fn new(base_url: &str) -> Self {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_timeout(base_url: &str, timeout: u64) -> Self {
        let mut client = RawClient {
            base_url: String::new(),
            user_agent: String::new(),
            timeout,
            last_status: None,
        };
        client.set_base_url(base_url);
        client
    }

    /// Store the base URL, trimmed of surrounding spaces and slashes.
    pub fn set_base_url(&mut self, url: &str) {
        self.base_url = url.trim_matches(|c| c == ' ' || c == '/').to_string();
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Set the suffix appended to the fixed library user-agent identifier.
    pub fn set_user_agent(&mut self, suffix: &str) {
        self.user_agent = suffix.to_string();
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Set the connect timeout in seconds.
    pub fn set_timeout(&mut self, seconds: u64) {
        self.timeout = seconds;
    }

    pub fn timeout(&self) -> u64 {
        self.timeout
    }

    /// Status code of the most recently completed request, or `None` if no
    /// request has produced a response yet.
    pub fn last_status(&self) -> Option<u16> {
        self.last_status
    }

    /// The full `User-Agent` value sent with every request.
    pub fn full_user_agent(&self) -> String {
        format!("{LIBRARY_USER_AGENT}; {}", self.user_agent)
    }

    /// Assemble a request without performing any I/O.
    ///
    /// GET parameters are folded into the URL's query string (`?`, or `&`
    /// when the path already carries a query); for the other verbs the
    /// encoded parameters become the request body.
    pub fn build_request(
        &self,
        path: &str,
        params: &[(&str, &str)],
        verb: Verb,
        headers: &[(&str, &str)],
    ) -> PreparedRequest {
        let query = encode_query(params);
        let mut url = format!("{}{}", self.base_url, path);
        let mut body = None;

        if !query.is_empty() {
            match verb {
                Verb::Get => {
                    url.push(if path.contains('?') { '&' } else { '?' });
                    url.push_str(&query);
                }
                Verb::Post | Verb::Put | Verb::Delete => body = Some(query),
            }
        }

        PreparedRequest {
            verb,
            url,
            body,
            headers: headers
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// Raw execution entry point taking the verb as a string.
    ///
    /// The verb is normalized case-insensitively and rejected with
    /// `Error::UnsupportedVerb` before any network activity.
    pub fn execute(
        &mut self,
        path: &str,
        params: &[(&str, &str)],
        verb: &str,
        headers: &[(&str, &str)],
    ) -> Result<RawResponse, Error> {
        self.request(path, params, Verb::parse(verb)?, headers)
    }

    /// Build and dispatch a request for an already-validated verb.
    pub fn request(
        &mut self,
        path: &str,
        params: &[(&str, &str)],
        verb: Verb,
        headers: &[(&str, &str)],
    ) -> Result<RawResponse, Error> {
        let req = self.build_request(path, params, verb, headers);
        self.dispatch(req)
    }

    /// Execute a prepared request, blocking until the response arrives.
    ///
    /// Non-2xx statuses are returned as normal results; only failures
    /// below the HTTP layer map to `Error::Transport`. `last_status` is
    /// updated as soon as a status line is received, before the body is
    /// read.
    fn dispatch(&mut self, req: PreparedRequest) -> Result<RawResponse, Error> {
        let PreparedRequest {
            verb,
            url,
            body,
            headers,
        } = req;

        let agent: ureq::Agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_connect(Some(Duration::from_secs(self.timeout)))
            .user_agent(self.full_user_agent())
            .build()
            .new_agent();

        debug!(verb = verb.as_str(), url = %url, "dispatching request");

        let result = match verb {
            Verb::Get => {
                let mut call = agent.get(&url);
                for (k, v) in &headers {
                    call = call.header(k.as_str(), v.as_str());
                }
                call.call()
            }
            Verb::Post | Verb::Put => {
                let mut call = if verb == Verb::Post {
                    agent.post(&url)
                } else {
                    agent.put(&url)
                };
                if body.is_some() {
                    call = call.content_type(FORM_CONTENT_TYPE);
                }
                for (k, v) in &headers {
                    call = call.header(k.as_str(), v.as_str());
                }
                match &body {
                    Some(b) => call.send(b.as_bytes()),
                    None => call.send_empty(),
                }
            }
            Verb::Delete => {
                let mut call = agent.delete(&url);
                for (k, v) in &headers {
                    call = call.header(k.as_str(), v.as_str());
                }
                match &body {
                    // The transport must support DELETE with a body.
                    Some(b) => call
                        .force_send_body()
                        .content_type(FORM_CONTENT_TYPE)
                        .send(b.as_bytes()),
                    None => call.call(),
                }
            }
        };

        let mut response = result.map_err(|e| Error::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        self.last_status = Some(status);
        debug!(status, "request completed");

        let content = response
            .body_mut()
            .read_to_string()
            .map_err(|e| Error::Transport(e.to_string()))?;

        Ok(RawResponse { content, status })
    }
}

impl Webservice for RawClient {
    type Output = RawResponse;

    fn get(
        &mut self,
        path: &str,
        params: &[(&str, &str)],
        headers: &[(&str, &str)],
    ) -> Result<RawResponse, Error> {
        self.request(path, params, Verb::Get, headers)
    }

    fn post(
        &mut self,
        path: &str,
        params: &[(&str, &str)],
        headers: &[(&str, &str)],
    ) -> Result<RawResponse, Error> {
        self.request(path, params, Verb::Post, headers)
    }

    fn put(
        &mut self,
        path: &str,
        params: &[(&str, &str)],
        headers: &[(&str, &str)],
    ) -> Result<RawResponse, Error> {
        self.request(path, params, Verb::Put, headers)
    }

    fn delete(
        &mut self,
        path: &str,
        params: &[(&str, &str)],
        headers: &[(&str, &str)],
    ) -> Result<RawResponse, Error> {
        self.request(path, params, Verb::Delete, headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> RawClient {
        RawClient::new("http://localhost:3000")
    }

    #[test]
    fn base_url_is_trimmed_of_spaces_and_slashes() {
        let c = RawClient::new(" http://a.com/ ");
        assert_eq!(c.base_url(), "http://a.com");
    }

    #[test]
    fn set_base_url_retrims() {
        let mut c = client();
        c.set_base_url("https://b.org//");
        assert_eq!(c.base_url(), "https://b.org");
    }

    #[test]
    fn timeout_defaults_to_five_seconds() {
        assert_eq!(client().timeout(), 5);
    }

    #[test]
    fn with_timeout_overrides_default() {
        let c = RawClient::with_timeout("http://a.com", 30);
        assert_eq!(c.timeout(), 30);
    }

    #[test]
    fn getters_are_idempotent() {
        let mut c = client();
        c.set_user_agent("my-app/2.1");
        c.set_timeout(10);
        for _ in 0..3 {
            assert_eq!(c.base_url(), "http://localhost:3000");
            assert_eq!(c.user_agent(), "my-app/2.1");
            assert_eq!(c.timeout(), 10);
        }
    }

    #[test]
    fn last_status_is_unset_before_any_request() {
        assert_eq!(client().last_status(), None);
    }

    #[test]
    fn full_user_agent_has_library_prefix_and_suffix() {
        let mut c = client();
        c.set_user_agent("my-app/2.1");
        let ua = c.full_user_agent();
        assert!(ua.starts_with("webservice-core v"), "{ua}");
        assert!(ua.contains("<https://crates.io/crates/webservice-core>"), "{ua}");
        assert!(ua.ends_with("; my-app/2.1"), "{ua}");
    }

    #[test]
    fn build_get_folds_params_into_query_string() {
        let req = client().build_request("/x", &[("a", "1"), ("b", "2 ")], Verb::Get, &[]);
        assert_eq!(req.url, "http://localhost:3000/x?a=1&b=2%20");
        assert!(req.body.is_none());
    }

    #[test]
    fn build_get_appends_with_ampersand_when_path_has_query() {
        let req = client().build_request("/x?q=1", &[("a", "1")], Verb::Get, &[]);
        assert_eq!(req.url, "http://localhost:3000/x?q=1&a=1");
    }

    #[test]
    fn build_get_without_params_leaves_url_untouched() {
        let req = client().build_request("/items", &[], Verb::Get, &[]);
        assert_eq!(req.url, "http://localhost:3000/items");
        assert!(req.body.is_none());
    }

    #[test]
    fn build_post_places_params_in_body() {
        let req = client().build_request("/submit", &[("a", "1"), ("b", "2")], Verb::Post, &[]);
        assert_eq!(req.url, "http://localhost:3000/submit");
        assert_eq!(req.body.as_deref(), Some("a=1&b=2"));
    }

    #[test]
    fn build_put_and_delete_place_params_in_body() {
        for verb in [Verb::Put, Verb::Delete] {
            let req = client().build_request("/item", &[("k", "v")], verb, &[]);
            assert_eq!(req.url, "http://localhost:3000/item");
            assert_eq!(req.body.as_deref(), Some("k=v"), "{verb}");
        }
    }

    #[test]
    fn build_keeps_headers_in_given_order() {
        let req = client().build_request(
            "/x",
            &[],
            Verb::Get,
            &[("X-First", "1"), ("X-Second", "2")],
        );
        assert_eq!(
            req.headers,
            vec![
                ("X-First".to_string(), "1".to_string()),
                ("X-Second".to_string(), "2".to_string()),
            ]
        );
    }

    #[test]
    fn execute_rejects_unsupported_verb_before_dispatch() {
        let mut c = client();
        let err = c.execute("/x", &[], "PATCH", &[]).unwrap_err();
        assert!(matches!(err, Error::UnsupportedVerb(_)));
        assert_eq!(c.last_status(), None);
    }
}
