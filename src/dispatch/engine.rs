//! Continuation-gated dispatch.
//!
//! # Responsibilities
//! - Select candidate templates for the request path
//! - Walk route entries in registration order
//! - Invoke an eligible handler only while the chain is running
//! - Forward replies to the emitter
//!
//! # State Machine
//! ```text
//! Running --(eligible entry)--> Paused   handler invoked
//! Paused  --(eligible entry)--> Paused   entry skipped
//! Paused  --(handler resumed)--> Running next eligible entry may run
//! ```
//!
//! # Design Decisions
//! - State lives on the stack of one `listen` call, never on the router
//! - The walk visits every entry even after the chain stops
//! - Replies are emitted as they come; emission is not gated

use std::time::Instant;

use crate::dispatch::context::RequestContext;
use crate::dispatch::emitter::{self, ResponseSink};
use crate::dispatch::handler::{HandlerRequest, Next};
use crate::observability::metrics;
use crate::routing::template::{match_template, select_candidates};
use crate::routing::Router;

/// Continuation flag of one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    Running,
    Paused,
}

/// Summary of one `listen` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// Number of candidate templates for the path.
    pub candidates: usize,
    /// Handlers actually invoked.
    pub invoked: usize,
    /// Entries that were eligible but skipped because the chain was paused.
    pub gated: usize,
    /// Payloads written to the sink.
    pub emitted: usize,
}

impl DispatchOutcome {
    pub fn matched(&self) -> bool {
        self.invoked > 0
    }
}

impl Router {
    /// Dispatch one request, writing replies to `sink`.
    pub fn listen(&self, request: &RequestContext, sink: &mut dyn ResponseSink) -> DispatchOutcome {
        let start = Instant::now();
        let candidates = select_candidates(self.table.templates().iter(), &request.path);

        tracing::debug!(
            method = %request.method,
            path = %request.path,
            candidates = candidates.len(),
            "Dispatching request"
        );

        let mut outcome = DispatchOutcome {
            candidates: candidates.len(),
            ..Default::default()
        };
        let mut state = DispatchState::Running;

        for entry in self.table.entries() {
            if !candidates.contains(&&*entry.template) {
                continue;
            }
            if !entry.method.accepts(request.method) {
                continue;
            }
            if state == DispatchState::Paused {
                tracing::trace!(
                    template = %entry.template,
                    method = %entry.method,
                    "Chain paused, skipping entry"
                );
                outcome.gated += 1;
                continue;
            }

            state = DispatchState::Paused;

            // The fast path can select a template that does not token-match
            // (e.g. "/"); such entries see no captures.
            let params = match_template(&request.path, &entry.template).unwrap_or_default();
            let view = HandlerRequest::new(params, request);
            let mut next = Next::new();

            tracing::trace!(template = %entry.template, method = %entry.method, "Invoking handler");
            metrics::record_handler_invoked(entry.method.as_str());
            let reply = entry.handler.handle(&view, &mut next);
            outcome.invoked += 1;

            if next.is_resumed() {
                state = DispatchState::Running;
            }

            if emitter::emit(reply, sink, self.emit_failure_diagnostics) {
                outcome.emitted += 1;
            }
        }

        metrics::record_dispatch(request.method.as_str(), outcome.matched(), start);
        tracing::debug!(
            invoked = outcome.invoked,
            gated = outcome.gated,
            emitted = outcome.emitted,
            "Dispatch complete"
        );

        outcome
    }
}
