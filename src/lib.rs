//! In-process HTTP request router with continuation-gated handler chains.

pub mod catalog;
pub mod config;
pub mod dispatch;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::RouterConfig;
pub use dispatch::{Handler, HandlerRequest, Next, Reply, RequestContext, ResponseSink};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{Method, Router, RouterBuilder};
