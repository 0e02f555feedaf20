//! Request handling and transformation.
//!
//! # Responsibilities
//! - Generate unique request IDs (UUID v4)
//! - Enforce the body size limit
//! - Convert an HTTP request into a `RequestContext`
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Query string and urlencoded form body share one parameter map; form
//!   values win on key collisions
//! - Methods the router has no entries for are rejected before dispatch

use std::collections::HashMap;

use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderMap, HeaderValue, Request, StatusCode};
use http_body_util::LengthLimitError;
use thiserror::Error;
use tower_http::request_id::{MakeRequestId, RequestId};
use url::form_urlencoded;
use uuid::Uuid;

use crate::dispatch::RequestContext;
use crate::routing::{Method, MethodParseError};

pub const X_REQUEST_ID: &str = "x-request-id";

/// Issues a fresh UUID v4 for requests that arrive without an ID.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = HeaderValue::from_str(&Uuid::new_v4().to_string()).ok()?;
        Some(RequestId::new(id))
    }
}

/// The request ID header of `headers`, or `"unknown"`.
pub fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// Reasons a request never reaches the router.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error(transparent)]
    Method(#[from] MethodParseError),

    #[error("request body exceeds {limit} bytes")]
    BodyTooLarge { limit: usize },

    #[error("failed to read request body: {0}")]
    Body(#[source] axum::Error),
}

impl RequestError {
    pub fn status(&self) -> StatusCode {
        match self {
            RequestError::Method(_) => StatusCode::METHOD_NOT_ALLOWED,
            RequestError::BodyTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            RequestError::Body(_) => StatusCode::BAD_REQUEST,
        }
    }
}

fn parse_pairs(input: &[u8]) -> impl Iterator<Item = (String, String)> + '_ {
    form_urlencoded::parse(input).into_owned()
}

fn is_form(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"))
}

fn declared_length(headers: &HeaderMap) -> Option<usize> {
    headers
        .get(header::CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .parse()
        .ok()
}

/// Whether a body read failed on the size cap rather than on I/O.
fn is_length_limit(error: &axum::Error) -> bool {
    let mut source = std::error::Error::source(error);
    while let Some(err) = source {
        if err.is::<LengthLimitError>() {
            return true;
        }
        source = err.source();
    }
    false
}

/// Read `request` into the shape the router dispatches on.
pub async fn into_context(
    request: Request<Body>,
    max_body_bytes: usize,
) -> Result<RequestContext, RequestError> {
    let (parts, body) = request.into_parts();

    let method = Method::from_request(parts.method.as_str())?;

    if declared_length(&parts.headers).is_some_and(|len| len > max_body_bytes) {
        return Err(RequestError::BodyTooLarge {
            limit: max_body_bytes,
        });
    }
    // Chunked bodies carry no length up front; the cap is hit while reading.
    let body = to_bytes(body, max_body_bytes).await.map_err(|e| {
        if is_length_limit(&e) {
            RequestError::BodyTooLarge {
                limit: max_body_bytes,
            }
        } else {
            RequestError::Body(e)
        }
    })?;

    let mut data: HashMap<String, String> = parts
        .uri
        .query()
        .map(|q| parse_pairs(q.as_bytes()).collect())
        .unwrap_or_default();
    if is_form(&parts.headers) {
        data.extend(parse_pairs(&body));
    }

    Ok(RequestContext {
        path: parts.uri.path().to_string(),
        method,
        data,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_query_and_path() {
        let req = Request::builder()
            .method("GET")
            .uri("http://example.com/items/9?sort=asc&q=a%20b")
            .body(Body::empty())
            .unwrap();
        let ctx = into_context(req, 1024).await.unwrap();
        assert_eq!(ctx.path, "/items/9");
        assert_eq!(ctx.method, Method::Get);
        assert_eq!(ctx.data.get("sort").map(String::as_str), Some("asc"));
        assert_eq!(ctx.data.get("q").map(String::as_str), Some("a b"));
    }

    #[tokio::test]
    async fn test_form_overrides_query() {
        let req = Request::builder()
            .method("POST")
            .uri("/items?name=query&page=2")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("name=form"))
            .unwrap();
        let ctx = into_context(req, 1024).await.unwrap();
        assert_eq!(ctx.data.get("name").map(String::as_str), Some("form"));
        assert_eq!(ctx.data.get("page").map(String::as_str), Some("2"));
        assert_eq!(&ctx.body[..], b"name=form");
    }

    #[tokio::test]
    async fn test_json_body_kept_opaque() {
        let req = Request::builder()
            .method("PUT")
            .uri("/items/1")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"a":1}"#))
            .unwrap();
        let ctx = into_context(req, 1024).await.unwrap();
        assert!(ctx.data.is_empty());
        assert_eq!(&ctx.body[..], br#"{"a":1}"#);
    }

    #[tokio::test]
    async fn test_unsupported_method() {
        let req = Request::builder()
            .method("HEAD")
            .uri("/")
            .body(Body::empty())
            .unwrap();
        let err = into_context(req, 1024).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_body_limit() {
        let req = Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_LENGTH, "10")
            .body(Body::from("0123456789"))
            .unwrap();
        let err = into_context(req, 4).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_body_limit_without_content_length() {
        let req = Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::from("0123456789"))
            .unwrap();
        assert!(req.headers().get(header::CONTENT_LENGTH).is_none());

        let err = into_context(req, 4).await.unwrap_err();
        assert!(matches!(err, RequestError::BodyTooLarge { limit: 4 }));
        assert_eq!(err.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_body_at_limit_is_read() {
        let req = Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::from("0123"))
            .unwrap();
        let ctx = into_context(req, 4).await.unwrap();
        assert_eq!(&ctx.body[..], b"0123");
    }

    #[test]
    fn test_request_id_fallback() {
        assert_eq!(request_id(&HeaderMap::new()), "unknown");
    }
}
