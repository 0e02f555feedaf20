//! Route methods.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Method a route entry is registered under.
///
/// `Use` is the universal method: it accepts every request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Use,
}

impl Method {
    /// Request methods a client can send.
    pub const REQUEST_METHODS: [Method; 5] = [
        Method::Get,
        Method::Post,
        Method::Put,
        Method::Patch,
        Method::Delete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
            Method::Use => "USE",
        }
    }

    /// Returns true if an entry registered under `self` runs for `request`.
    pub fn accepts(&self, request: Method) -> bool {
        *self == Method::Use || *self == request
    }

    /// Parse a method received on the wire. `USE` is not a request method.
    pub fn from_request(s: &str) -> Result<Self, MethodParseError> {
        match s.parse()? {
            Method::Use => Err(MethodParseError(s.to_string())),
            m => Ok(m),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown method name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported method: {0}")]
pub struct MethodParseError(pub String);

impl FromStr for Method {
    type Err = MethodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "PATCH" => Ok(Method::Patch),
            "DELETE" => Ok(Method::Delete),
            "USE" => Ok(Method::Use),
            other => Err(MethodParseError(other.to_string())),
        }
    }
}
