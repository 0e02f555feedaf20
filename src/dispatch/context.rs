//! Pre-parsed request handed to the router.

use std::collections::HashMap;

use bytes::Bytes;

use crate::routing::Method;

/// The request as the router sees it.
///
/// Produced by whatever reads the wire (see `http::request`); the router
/// never parses bytes itself.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub path: String,
    pub method: Method,
    /// Query and form parameters.
    pub data: HashMap<String, String>,
    pub body: Bytes,
}

impl RequestContext {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method,
            data: HashMap::new(),
            body: Bytes::new(),
        }
    }

    pub fn with_data<K, V>(mut self, data: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.data
            .extend(data.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }
}
