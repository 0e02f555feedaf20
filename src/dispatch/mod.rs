//! Dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! RequestContext (path, method, data, body)
//!     → engine.rs (candidates, gated walk over route entries)
//!     → handler.rs (HandlerRequest view + Next token per invocation)
//!     → emitter.rs (Reply → pretty JSON → ResponseSink)
//! ```

pub mod context;
pub mod emitter;
pub mod engine;
pub mod handler;

pub use context::RequestContext;
pub use emitter::{BufferedSink, ResponseSink, StdoutSink};
pub use engine::{DispatchOutcome, DispatchState};
pub use handler::{Handler, HandlerRequest, Next, Payload, Reply};
