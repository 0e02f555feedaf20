//! Handler capability, continuation token and reply type.
//!
//! # Responsibilities
//! - Define what a route handler is (`Handler`)
//! - Give handlers a read-only view of the request (`HandlerRequest`)
//! - Let a handler allow the next eligible entry to run (`Next`)
//! - Carry an optional serializable response (`Reply`)

use std::collections::HashMap;
use std::fmt;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::dispatch::context::RequestContext;
use crate::routing::{Method, Params};

/// A route handler.
///
/// Implemented for every `Fn(&HandlerRequest<'_>, &mut Next) -> Reply`
/// closure. Annotate closure arguments so the signature is inferred as
/// higher-ranked.
pub trait Handler: Send + Sync + 'static {
    fn handle(&self, req: &HandlerRequest<'_>, next: &mut Next) -> Reply;
}

impl<F> Handler for F
where
    F: Fn(&HandlerRequest<'_>, &mut Next) -> Reply + Send + Sync + 'static,
{
    fn handle(&self, req: &HandlerRequest<'_>, next: &mut Next) -> Reply {
        self(req, next)
    }
}

/// What a handler sees of the request.
#[derive(Debug)]
pub struct HandlerRequest<'a> {
    params: Params,
    request: &'a RequestContext,
}

impl<'a> HandlerRequest<'a> {
    pub(crate) fn new(params: Params, request: &'a RequestContext) -> Self {
        Self { params, request }
    }

    /// Captures of the entry's template.
    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }

    /// Query/form parameters.
    pub fn data(&self) -> &HashMap<String, String> {
        &self.request.data
    }

    pub fn data_value(&self, name: &str) -> Option<&str> {
        self.request.data.get(name).map(String::as_str)
    }

    pub fn body(&self) -> &Bytes {
        &self.request.body
    }

    /// Deserialize the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.request.body)
    }

    pub fn method(&self) -> Method {
        self.request.method
    }

    pub fn path(&self) -> &str {
        &self.request.path
    }
}

/// Continuation token handed to each invoked handler.
///
/// Calling [`Next::resume`] lets the next eligible route entry run once the
/// handler returns. Not resuming ends the chain for this dispatch.
#[derive(Debug, Default)]
pub struct Next {
    resumed: bool,
}

impl Next {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub fn resume(&mut self) {
        self.resumed = true;
    }

    pub fn is_resumed(&self) -> bool {
        self.resumed
    }
}

/// Serialization deferred until emission.
pub trait Payload: Send {
    fn to_pretty_json(&self) -> Result<String, serde_json::Error>;
}

impl<T: Serialize + Send> Payload for T {
    fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Handler result: nothing to emit, or a value to serialize.
#[derive(Default)]
pub enum Reply {
    #[default]
    Empty,
    Value(Box<dyn Payload>),
}

impl Reply {
    pub fn empty() -> Self {
        Reply::Empty
    }

    pub fn json<T: Serialize + Send + 'static>(value: T) -> Self {
        Reply::Value(Box::new(value))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Reply::Empty)
    }
}

impl fmt::Debug for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Empty => f.write_str("Reply::Empty"),
            Reply::Value(_) => f.write_str("Reply::Value(..)"),
        }
    }
}

impl<T: Serialize + Send + 'static> From<Option<T>> for Reply {
    fn from(value: Option<T>) -> Self {
        value.map(Reply::json).unwrap_or_default()
    }
}
