//! HTTP front end.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, trace, timeout)
//!     → request.rs (method, path, query/form data, body → RequestContext)
//!     → routing::Router::listen on the blocking pool (gated handler chain, BufferedSink)
//!     → response.rs (payloads → HTTP response)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestError, UuidRequestId, X_REQUEST_ID};
pub use server::HttpServer;
