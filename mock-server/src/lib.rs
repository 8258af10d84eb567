//! Echo server backing the webservice-core integration tests.
//!
//! Reflects requests back as JSON so tests can assert on the verb, query
//! string, headers, and body the client actually sent, and serves a few
//! fixed routes covering the JSON-parsing error paths (empty body, non-JSON
//! body, null body, scalar body, arbitrary status codes).

use std::collections::HashMap;

use axum::{
    extract::{Path, Query},
    http::{HeaderMap, Method, StatusCode},
    response::IntoResponse,
    routing::{any, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

/// What the `/echo` route saw of the incoming request.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Echo {
    pub method: String,
    pub query: HashMap<String, String>,
    pub headers: HashMap<String, String>,
    pub body: String,
}

pub fn app() -> Router {
    Router::new()
        .route("/echo", any(echo))
        .route("/empty", get(empty))
        .route("/not-json", get(not_json))
        .route("/null", get(null_body))
        .route("/scalar", get(scalar))
        .route("/status/{code}", any(with_status))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn echo(
    method: Method,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: String,
) -> Json<Echo> {
    let headers = headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                value.to_str().unwrap_or_default().to_string(),
            )
        })
        .collect();
    Json(Echo {
        method: method.to_string(),
        query,
        headers,
        body,
    })
}

async fn empty() -> &'static str {
    ""
}

async fn not_json() -> &'static str {
    "certainly not json"
}

async fn null_body() -> Json<serde_json::Value> {
    Json(serde_json::Value::Null)
}

async fn scalar() -> Json<bool> {
    Json(false)
}

async fn with_status(Path(code): Path<u16>) -> impl IntoResponse {
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_REQUEST);
    (status, Json(serde_json::json!({ "status": code })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn echo_serializes_to_json() {
        let echo = Echo {
            method: "GET".to_string(),
            query: HashMap::from([("a".to_string(), "1".to_string())]),
            headers: HashMap::new(),
            body: String::new(),
        };
        let json = serde_json::to_value(&echo).unwrap();
        assert_eq!(json["method"], "GET");
        assert_eq!(json["query"]["a"], "1");
        assert_eq!(json["body"], "");
    }

    #[test]
    fn echo_roundtrips_through_json() {
        let echo = Echo {
            method: "POST".to_string(),
            query: HashMap::new(),
            headers: HashMap::from([("user-agent".to_string(), "test".to_string())]),
            body: "a=1".to_string(),
        };
        let json = serde_json::to_string(&echo).unwrap();
        let back: Echo = serde_json::from_str(&json).unwrap();
        assert_eq!(back.method, echo.method);
        assert_eq!(back.headers, echo.headers);
        assert_eq!(back.body, echo.body);
    }
}
