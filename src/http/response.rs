//! Response handling and transformation.
//!
//! # Design Decisions
//! - Buffered payloads are written back to back, in emission order
//! - No handler invoked → 404; handlers ran but emitted nothing → 204
//! - Requests rejected before dispatch map to their `RequestError` status

use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::dispatch::{BufferedSink, DispatchOutcome};
use crate::http::request::RequestError;

const APPLICATION_JSON: &str = "application/json";

/// Build the HTTP response for a finished dispatch.
pub fn into_response(outcome: &DispatchOutcome, sink: BufferedSink) -> Response {
    if !outcome.matched() {
        return (StatusCode::NOT_FOUND, "No matching route found").into_response();
    }
    if sink.payloads().is_empty() {
        return StatusCode::NO_CONTENT.into_response();
    }

    let mut response = Response::new(Body::from(sink.concat()));
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(APPLICATION_JSON),
    );
    response
}

pub fn error_response(error: &RequestError) -> Response {
    (error.status(), error.to_string()).into_response()
}
