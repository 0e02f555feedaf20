//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration (before serving):
//!     RouterBuilder::route(template)
//!     → TemplateScope::get/post/.../use_(handler)
//!     → table.rs (RouteEntry list + TemplateSet)
//!     → build(): validate, freeze as immutable Router
//!
//! Incoming request path:
//!     → template.rs (select candidate templates)
//!     → dispatch::engine walks the table in registration order
//! ```
//!
//! # Design Decisions
//! - Routes registered up front, immutable at runtime
//! - No regex in hot path (byte scan tokenizer)
//! - Deterministic: registration order is the only precedence
//! - `USE` entries run for every request method

pub mod method;
pub mod router;
pub mod table;
pub mod template;

pub use method::{Method, MethodParseError};
pub use router::{BuildError, DuplicateCapturePolicy, Router, RouterBuilder, TemplateScope};
pub use table::{RouteEntry, RouteTable, TemplateSet};
pub use template::{match_template, select_candidates, tokenize, Params};
