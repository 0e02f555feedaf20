//! Response emission.
//!
//! # Responsibilities
//! - Serialize handler replies to pretty-printed JSON
//! - Hand the text to a `ResponseSink`
//! - Report serialization failures without aborting dispatch
//!
//! # Design Decisions
//! - The sink is a plain text channel with no error path back
//! - Failures are logged and counted; writing the error text to the sink is
//!   opt-in (`emit_failure_diagnostics`)

use std::io::Write;

use crate::dispatch::handler::Reply;
use crate::observability::metrics;

/// Destination for serialized replies.
pub trait ResponseSink {
    fn emit(&mut self, payload: &str);
}

/// Writes payloads to stdout, back to back.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl ResponseSink for StdoutSink {
    fn emit(&mut self, payload: &str) {
        let mut out = std::io::stdout().lock();
        if let Err(e) = out.write_all(payload.as_bytes()).and_then(|_| out.flush()) {
            tracing::warn!(error = %e, "Failed to write response to stdout");
        }
    }
}

/// Keeps every payload in emission order.
#[derive(Debug, Default, Clone)]
pub struct BufferedSink {
    payloads: Vec<String>,
}

impl BufferedSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn payloads(&self) -> &[String] {
        &self.payloads
    }

    /// The last payload, which is what a reader of the concatenated output
    /// sees last.
    pub fn last(&self) -> Option<&str> {
        self.payloads.last().map(String::as_str)
    }

    /// All payloads concatenated, as a stream writer would have produced.
    pub fn concat(&self) -> String {
        self.payloads.concat()
    }

    pub fn into_payloads(self) -> Vec<String> {
        self.payloads
    }
}

impl ResponseSink for BufferedSink {
    fn emit(&mut self, payload: &str) {
        self.payloads.push(payload.to_string());
    }
}

/// Serialize `reply` and write it to `sink`.
///
/// Returns true if something was written.
pub fn emit(reply: Reply, sink: &mut dyn ResponseSink, diagnostics: bool) -> bool {
    let Reply::Value(payload) = reply else {
        return false;
    };

    match payload.to_pretty_json() {
        Ok(text) => {
            sink.emit(&text);
            true
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize handler reply");
            metrics::record_emission_failure();
            if diagnostics {
                sink.emit(&e.to_string());
                true
            } else {
                false
            }
        }
    }
}
