//! Runtime dispatch support for generated wrappers.
//!
//! Every generated `serve_http` builds a table of [`Route`] entries and hands
//! it to [`dispatch`], which enforces the fixed request sequence: path match,
//! auth, method, validation, invocation. The table holds only constants and
//! fn pointers, so a host may call the generated entry points concurrently
//! without synchronization.

use http::Method;
use serde_json::{json, Value};
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

use crate::validator::ValidationError;

/// Header checked when a route requires authentication.
pub const AUTH_HEADER: &str = "X-Auth";
/// Token the auth header must carry.
pub const AUTH_TOKEN: &str = "100500";

/// Verb constraint attached to a route.
///
/// `Any` accepts every verb; `Get`/`Post` require an exact match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodRule {
    Any,
    Get,
    Post,
}

impl MethodRule {
    pub fn allows(&self, method: &Method) -> bool {
        match self {
            MethodRule::Any => true,
            MethodRule::Get => *method == Method::GET,
            MethodRule::Post => *method == Method::POST,
        }
    }
}

/// Raw request parameters handed to generated validators.
///
/// Built once per request from the query string or the form body; the first
/// occurrence of a key wins, matching classic form semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(HashMap<String, String>);

impl Params {
    pub fn new() -> Self {
        Params(HashMap::new())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.entry(key.into()).or_insert_with(|| value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    fn from_urlencoded(raw: &str) -> Self {
        let mut params = Params::new();
        for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
            params.insert(key.into_owned(), value.into_owned());
        }
        params
    }
}

/// One incoming request as the host hands it to a generated wrapper.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: String,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        ApiRequest {
            method,
            path: path.into(),
            query: String::new(),
            headers: HashMap::new(),
            body: String::new(),
        }
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Attach an `application/x-www-form-urlencoded` body.
    pub fn with_form_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Parameter source per the dispatch contract: form body for POST,
    /// query string for everything else.
    pub fn params(&self) -> Params {
        if self.method == Method::POST {
            Params::from_urlencoded(&self.body)
        } else {
            Params::from_urlencoded(&self.query)
        }
    }

    fn authorized(&self) -> bool {
        self.headers.get(AUTH_HEADER).map(String::as_str) == Some(AUTH_TOKEN)
    }
}

/// Response envelope produced by generated dispatchers.
///
/// The body always carries an `error` key (empty string on success) and a
/// `response` key only when the call succeeded.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn ok(response: Value) -> Self {
        ApiResponse {
            status: 200,
            body: json!({ "error": "", "response": response }),
        }
    }

    pub fn error(status: u16, message: impl Into<String>) -> Self {
        ApiResponse {
            status,
            body: json!({ "error": message.into() }),
        }
    }
}

/// Domain error a business method may return, carrying its own status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    pub status: u16,
    pub message: String,
}

impl ApiError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        ApiError {
            status,
            message: message.into(),
        }
    }

    /// Unclassified failure; surfaces as 500.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(500, message)
    }
}

/// Failure raised while invoking a matched route.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CallError {
    #[error("{0}")]
    Invalid(#[from] ValidationError),
    #[error("{0}")]
    Api(#[from] ApiError),
}

impl From<serde_json::Error> for CallError {
    fn from(err: serde_json::Error) -> Self {
        CallError::Api(ApiError::internal(err.to_string()))
    }
}

/// One registered URL in a generated dispatch table.
pub struct Route<S> {
    pub url: &'static str,
    pub auth: bool,
    pub method: MethodRule,
    pub call: fn(&S, &Params) -> Result<Value, CallError>,
}

/// Run the routing/auth/method/validation/invocation sequence for one request.
pub fn dispatch<S>(api: &S, routes: &[Route<S>], req: &ApiRequest) -> ApiResponse {
    let Some(route) = routes.iter().find(|r| r.url == req.path) else {
        debug!(path = %req.path, "no route matched");
        return ApiResponse::error(404, "unknown method");
    };
    if route.auth && !req.authorized() {
        debug!(url = route.url, "missing or invalid auth token");
        return ApiResponse::error(403, "unauthorized");
    }
    if !route.method.allows(&req.method) {
        debug!(url = route.url, method = %req.method, "verb not allowed");
        return ApiResponse::error(406, "bad method");
    }
    let params = req.params();
    match (route.call)(api, &params) {
        Ok(value) => ApiResponse::ok(value),
        Err(CallError::Invalid(err)) => ApiResponse::error(400, err.to_string()),
        Err(CallError::Api(err)) => ApiResponse::error(err.status, err.message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope() {
        let res = ApiResponse::ok(json!({ "id": 42 }));
        assert_eq!(res.status, 200);
        assert_eq!(res.body, json!({ "error": "", "response": { "id": 42 } }));
    }

    #[test]
    fn test_error_envelope_has_no_response_key() {
        let res = ApiResponse::error(404, "unknown method");
        assert_eq!(res.body, json!({ "error": "unknown method" }));
    }

    #[test]
    fn test_params_first_value_wins() {
        let req = ApiRequest::new(Method::GET, "/x").with_query("a=1&a=2&b=3");
        let params = req.params();
        assert_eq!(params.get("a"), Some("1"));
        assert_eq!(params.get("b"), Some("3"));
    }

    #[test]
    fn test_post_reads_form_body_not_query() {
        let req = ApiRequest::new(Method::POST, "/x")
            .with_query("a=query")
            .with_form_body("a=body");
        assert_eq!(req.params().get("a"), Some("body"));
    }

    #[test]
    fn test_method_rule_matching() {
        assert!(MethodRule::Any.allows(&Method::DELETE));
        assert!(MethodRule::Get.allows(&Method::GET));
        assert!(!MethodRule::Get.allows(&Method::POST));
        assert!(!MethodRule::Post.allows(&Method::GET));
    }
}
